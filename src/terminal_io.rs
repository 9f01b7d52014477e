use std::collections::HashMap;
use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor::{Hide, Show},
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
        supports_keyboard_enhancement,
    },
};
use log::{error, info};

use crate::constants::{FIRST_HOLD_FRAMES, HOLD_FRAMES, WINDOW_TITLE};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    Quit,
}

#[derive(Clone, Copy, Debug)]
enum Direction {
    Left = 0,
    Right = 1,
    Up = 2,
    Down = 3,
}

impl Direction {
    fn from_key(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Left => Some(Direction::Left),
            KeyCode::Right => Some(Direction::Right),
            KeyCode::Up => Some(Direction::Up),
            KeyCode::Down => Some(Direction::Down),
            _ => None,
        }
    }
}

// Without release reporting a terminal only sends presses and auto-repeats.
// The first press is held long enough to reach the first repeat, then each
// repeat extends the hold by HOLD_FRAMES.
#[derive(Clone, Copy, Debug)]
struct Hold {
    pressed_at: u64,
    last_seen: u64,
}

#[derive(Debug)]
pub struct InputState {
    holds: [Option<Hold>; 4],
    reports_release: bool,
}

impl InputState {
    pub fn new(reports_release: bool) -> Self {
        InputState {
            holds: [None; 4],
            reports_release,
        }
    }

    pub fn handle_event(&mut self, event: &Event, frame: u64) -> Option<Command> {
        let Event::Key(key_event) = event else {
            return None;
        };

        if let Some(direction) = Direction::from_key(key_event.code) {
            let still_held = self.is_held(direction, frame);
            let slot = &mut self.holds[direction as usize];
            match (key_event.kind, *slot) {
                (KeyEventKind::Release, _) => *slot = None,
                (_, Some(hold)) if still_held => {
                    *slot = Some(Hold { last_seen: frame, ..hold });
                }
                _ => *slot = Some(Hold { pressed_at: frame, last_seen: frame }),
            }
            return None;
        }

        if key_event.kind != KeyEventKind::Press {
            return None;
        }
        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
            KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Command::Quit)
            }
            KeyCode::Char(' ') => Some(Command::Start),
            _ => None,
        }
    }

    fn is_held(&self, direction: Direction, frame: u64) -> bool {
        let Some(hold) = self.holds[direction as usize] else {
            return false;
        };
        if self.reports_release {
            return true;
        }
        let window = if hold.last_seen == hold.pressed_at { FIRST_HOLD_FRAMES } else { HOLD_FRAMES };
        frame.saturating_sub(hold.last_seen) < window
    }

    pub fn held(&self, frame: u64) -> HeldKeys {
        HeldKeys {
            left: self.is_held(Direction::Left, frame),
            right: self.is_held(Direction::Right, frame),
            up: self.is_held(Direction::Up, frame),
            down: self.is_held(Direction::Down, frame),
        }
    }
}

// --- SimulatedInput for headless runs ---
pub struct SimulatedInput {
    events: HashMap<u64, Vec<Event>>,
    current_frame: u64,
}

impl SimulatedInput {
    pub fn new(events: HashMap<u64, Vec<Event>>) -> Self {
        SimulatedInput { events, current_frame: 0 }
    }

    pub fn demo_script() -> Self {
        let mut script = HashMap::new();
        script.insert(1, vec![key(KeyCode::Char(' '), KeyEventKind::Press)]);
        script.insert(5, vec![key(KeyCode::Left, KeyEventKind::Press)]);
        script.insert(40, vec![
            key(KeyCode::Left, KeyEventKind::Release),
            key(KeyCode::Up, KeyEventKind::Press),
        ]);
        script.insert(70, vec![key(KeyCode::Up, KeyEventKind::Release)]);
        script.insert(240, vec![key(KeyCode::Char('q'), KeyEventKind::Press)]);
        SimulatedInput::new(script)
    }

    pub fn poll(&mut self, frame_count: u64) -> io::Result<bool> {
        self.current_frame = frame_count;
        Ok(self.events.get(&frame_count).is_some_and(|pending| !pending.is_empty()))
    }

    pub fn read(&mut self) -> io::Result<Event> {
        let pending = self.events.get_mut(&self.current_frame);
        match pending {
            Some(pending) if !pending.is_empty() => Ok(pending.remove(0)),
            _ => Ok(Event::Key(KeyCode::Null.into())),
        }
    }
}

pub fn key(code: KeyCode, kind: KeyEventKind) -> Event {
    Event::Key(KeyEvent {
        code,
        modifiers: KeyModifiers::NONE,
        kind,
        state: KeyEventState::NONE,
    })
}

// --- Where events come from ---
pub enum InputSource {
    Terminal,
    Simulated(SimulatedInput),
}

impl InputSource {
    pub fn next_event(&mut self, frame_count: u64) -> io::Result<Option<Event>> {
        match self {
            InputSource::Terminal => {
                if event::poll(Duration::ZERO).map_err(|e| { error!("Failed to poll event: {}", e); e })? {
                    Ok(Some(event::read().map_err(|e| { error!("Failed to read event: {}", e); e })?))
                } else {
                    Ok(None)
                }
            }
            InputSource::Simulated(sim_input) => {
                if sim_input.poll(frame_count)? {
                    Ok(Some(sim_input.read()?))
                } else {
                    Ok(None)
                }
            }
        }
    }
}

pub struct TerminalGuard {
    enhanced_keyboard: bool,
}

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        info!("Attempting to enable raw mode.");
        enable_raw_mode().map_err(|e| { error!("Failed to enable raw mode: {}", e); e })?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, Hide, SetTitle(WINDOW_TITLE))
            .map_err(|e| { error!("Failed to prepare screen: {}", e); e })?;

        let enhanced_keyboard = supports_keyboard_enhancement().unwrap_or(false);
        if enhanced_keyboard {
            execute!(stdout, PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES))?;
        }
        info!("Terminal ready (key release events: {}).", enhanced_keyboard);
        Ok(TerminalGuard { enhanced_keyboard })
    }

    pub fn reports_release(&self) -> bool {
        self.enhanced_keyboard
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        if self.enhanced_keyboard {
            let _ = execute!(stdout, PopKeyboardEnhancementFlags);
        }
        if let Err(e) = execute!(stdout, Show, LeaveAlternateScreen) {
            error!("Failed to restore screen: {}", e);
        }
        if let Err(e) = disable_raw_mode() {
            error!("Failed to disable raw mode on exit: {}", e);
        }
        let _ = stdout.flush();
        info!("Terminal restored.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release_track_held_keys() {
        let mut input = InputState::new(true);
        input.handle_event(&key(KeyCode::Left, KeyEventKind::Press), 0);
        input.handle_event(&key(KeyCode::Down, KeyEventKind::Press), 0);
        assert_eq!(input.held(500), HeldKeys { left: true, down: true, ..HeldKeys::default() });

        input.handle_event(&key(KeyCode::Left, KeyEventKind::Release), 501);
        assert_eq!(input.held(501), HeldKeys { down: true, ..HeldKeys::default() });
    }

    #[test]
    fn first_press_outlasts_the_repeat_delay() {
        let mut input = InputState::new(false);
        input.handle_event(&key(KeyCode::Left, KeyEventKind::Press), 0);
        let gaps: Vec<u64> = (0..30).filter(|&frame| !input.held(frame).left).collect();
        assert!(gaps.is_empty(), "released at frames {gaps:?}");
        assert!(input.held(FIRST_HOLD_FRAMES - 1).left);
        assert!(!input.held(FIRST_HOLD_FRAMES).left);
    }

    #[test]
    fn repeats_shorten_the_hold_window() {
        let mut input = InputState::new(false);
        input.handle_event(&key(KeyCode::Right, KeyEventKind::Press), 10);
        // Plain terminals report auto-repeat as further presses.
        input.handle_event(&key(KeyCode::Right, KeyEventKind::Press), 35);
        assert!(input.held(35 + HOLD_FRAMES - 1).right);
        assert!(!input.held(35 + HOLD_FRAMES).right);

        // A press after the hold lapsed starts over with the long window.
        input.handle_event(&key(KeyCode::Right, KeyEventKind::Press), 100);
        assert!(input.held(100 + HOLD_FRAMES + 5).right);
    }

    #[test]
    fn commands_come_from_presses_only() {
        let mut input = InputState::new(true);
        assert_eq!(input.handle_event(&key(KeyCode::Char(' '), KeyEventKind::Press), 0), Some(Command::Start));
        assert_eq!(input.handle_event(&key(KeyCode::Char(' '), KeyEventKind::Release), 0), None);
        assert_eq!(input.handle_event(&key(KeyCode::Esc, KeyEventKind::Press), 0), Some(Command::Quit));
        assert_eq!(input.handle_event(&key(KeyCode::Char('q'), KeyEventKind::Press), 0), Some(Command::Quit));

        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(input.handle_event(&ctrl_c, 0), Some(Command::Quit));
        assert_eq!(input.handle_event(&Event::FocusLost, 0), None);
    }

    #[test]
    fn simulated_input_replays_each_frame_in_order() {
        let mut sim = SimulatedInput::demo_script();
        assert!(!sim.poll(0).unwrap());
        assert!(sim.poll(40).unwrap());
        assert_eq!(sim.read().unwrap(), key(KeyCode::Left, KeyEventKind::Release));
        assert!(sim.poll(40).unwrap());
        assert_eq!(sim.read().unwrap(), key(KeyCode::Up, KeyEventKind::Press));
        assert!(!sim.poll(40).unwrap());
    }
}
