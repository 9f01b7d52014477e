use std::io::Write;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::Event;
use crossterm::style::Color;
use log::{debug, error, info, warn};
use rand::Rng;
use rand::rngs::StdRng;

use crate::constants::*;
use crate::entities::{Asteroid, Player, Star};
use crate::error::Result;
use crate::particles::ParticleSystem;
use crate::persistence::HighScoreStore;
use crate::rendering::{GameGrid, OutputTarget};
use crate::terminal_io::{Command, HeldKeys, InputSource, InputState};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Inactive,
    Active,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    GameOver,
}

#[derive(Debug)]
pub struct GameState {
    pub phase: Phase,
    pub player: Player,
    pub star: Star,
    pub asteroids: Vec<Asteroid>,
    pub particles: ParticleSystem,
    pub score: u32,
    pub high_score: u32,
}

impl GameState {
    pub fn new(high_score: u32, rng: &mut impl Rng) -> Self {
        GameState {
            phase: Phase::Inactive,
            player: Player::new(),
            star: Star::random(rng),
            asteroids: Vec::new(),
            particles: ParticleSystem::new(),
            score: 0,
            high_score,
        }
    }

    pub fn start(&mut self, rng: &mut impl Rng) {
        self.phase = Phase::Active;
        self.score = 0;
        self.player = Player::new();
        self.star.relocate(rng);
        self.asteroids.clear();
        info!("Game started (high score {}).", self.high_score);
    }

    pub fn update(&mut self, keys: &HeldKeys, rng: &mut impl Rng, store: &HighScoreStore) -> FrameOutcome {
        if self.phase != Phase::Active {
            return FrameOutcome::Continue;
        }

        self.particles.advance();
        self.player.steer(keys);

        if self.asteroids.len() < MAX_ASTEROIDS {
            self.asteroids.push(Asteroid::spawn(rng));
        }
        self.asteroids.retain_mut(|asteroid| {
            asteroid.update();
            !asteroid.is_off_screen()
        });

        let player_rect = self.player.rect();
        if player_rect.overlaps(&self.star.rect()) {
            self.score += 1;
            self.particles.spawn(self.star.x, self.star.y, Color::Yellow, rng);
            debug!("Star collected at ({}, {}), score {}.", self.star.x, self.star.y, self.score);
            self.star.relocate(rng);
        }

        // Only the first asteroid hit counts.
        let hit = self.asteroids.iter().find(|asteroid| player_rect.overlaps(&asteroid.rect())).copied();
        if let Some(asteroid) = hit {
            self.particles.spawn(asteroid.x, asteroid.y, Color::Red, rng);
        }

        self.record_high_score(store);

        match hit {
            Some(asteroid) => {
                info!("Ship hit asteroid at ({}, {}). Final score {}.", asteroid.x, asteroid.y, self.score);
                self.phase = Phase::Inactive;
                FrameOutcome::GameOver
            }
            None => FrameOutcome::Continue,
        }
    }

    fn record_high_score(&mut self, store: &HighScoreStore) {
        if self.score <= self.high_score {
            return;
        }
        self.high_score = self.score;
        info!("New high score: {}", self.high_score);
        if let Err(e) = store.save(self.high_score) {
            warn!("{}", e);
        }
    }

    pub fn draw(&self, game_grid: &mut GameGrid) {
        self.player.draw(game_grid);
        self.star.draw(game_grid);
        for asteroid in &self.asteroids {
            asteroid.draw(game_grid);
        }
        self.particles.render(game_grid);

        game_grid.put_text(1, 0, &format!("Score: {}", self.score), Color::White);
        game_grid.put_text_right(0, 1, &format!("High Score: {}", self.high_score), Color::White);
    }

    pub fn draw_start_screen(&self, game_grid: &mut GameGrid) {
        let row = game_grid.height as i32 / 2;
        game_grid.put_text_centered(row, "Press SPACE to Start", Color::White);
    }

    pub fn draw_game_over(&self, game_grid: &mut GameGrid) {
        let row = game_grid.height as i32 / 2;
        game_grid.put_text_centered(row, "Game Over", Color::Red);
    }
}

pub struct FrameClock {
    frame: Duration,
    last_tick: Instant,
}

impl FrameClock {
    pub fn new(fps: u64) -> Self {
        FrameClock {
            frame: Duration::from_secs(1) / fps as u32,
            last_tick: Instant::now(),
        }
    }

    pub fn tick(&mut self) {
        let elapsed = self.last_tick.elapsed();
        if elapsed < self.frame {
            thread::sleep(self.frame - elapsed);
        }
        self.last_tick = Instant::now();
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub score: u32,
    pub high_score: u32,
    pub game_over: bool,
}

pub struct Game {
    state: GameState,
    store: HighScoreStore,
    input: InputState,
    input_source: InputSource,
    stdout_target: OutputTarget,
    game_grid: GameGrid,
    rng: StdRng,
    max_frames: Option<u64>,
    clock: Option<FrameClock>,
    game_over_delay: Duration,
}

impl Game {
    pub fn new(
        store: HighScoreStore,
        input_source: InputSource,
        stdout_target: OutputTarget,
        screen_size: (u16, u16),
        reports_release: bool,
        mut rng: StdRng,
    ) -> Self {
        let high_score = store.load();
        let state = GameState::new(high_score, &mut rng);
        Game {
            state,
            store,
            input: InputState::new(reports_release),
            input_source,
            stdout_target,
            game_grid: GameGrid::new(screen_size.0, screen_size.1),
            rng,
            max_frames: None,
            clock: Some(FrameClock::new(TARGET_FPS)),
            game_over_delay: Duration::from_millis(GAME_OVER_DELAY_MS),
        }
    }

    pub fn with_max_frames(mut self, max_frames: Option<u64>) -> Self {
        self.max_frames = max_frames;
        self
    }

    pub fn unpaced(mut self) -> Self {
        self.clock = None;
        self.game_over_delay = Duration::ZERO;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn output(&self) -> &OutputTarget {
        &self.stdout_target
    }

    pub fn run(&mut self) -> Result<RunSummary> {
        let mut running = true;
        let mut game_over = false;
        let mut frame_count = 0;

        while running && self.max_frames.is_none_or(|max| frame_count < max) {
            running = self.handle_input(frame_count)?;
            if !running {
                info!("Quit requested. Exiting game loop.");
                break;
            }

            self.game_grid.clear();
            match self.state.phase {
                Phase::Active => {
                    let keys = self.input.held(frame_count);
                    let outcome = self.state.update(&keys, &mut self.rng, &self.store);
                    self.state.draw(&mut self.game_grid);
                    if outcome == FrameOutcome::GameOver {
                        self.state.draw_game_over(&mut self.game_grid);
                        self.present()?;
                        thread::sleep(self.game_over_delay);
                        game_over = true;
                        running = false;
                    }
                }
                Phase::Inactive => self.state.draw_start_screen(&mut self.game_grid),
            }

            if running {
                self.present()?;
            }
            frame_count += 1;
            if let Some(clock) = &mut self.clock {
                clock.tick();
            }
        }

        info!("Game loop ended after {} frames.", frame_count);
        Ok(RunSummary {
            frames: frame_count,
            score: self.state.score,
            high_score: self.state.high_score,
            game_over,
        })
    }

    fn handle_input(&mut self, frame_count: u64) -> Result<bool> {
        while let Some(event) = self.input_source.next_event(frame_count)? {
            if let Event::Resize(width, height) = event {
                debug!("Resized to {}x{}", width, height);
                self.game_grid = GameGrid::new(width, height);
                continue;
            }
            match self.input.handle_event(&event, frame_count) {
                Some(Command::Quit) => return Ok(false),
                Some(Command::Start) if self.state.phase == Phase::Inactive => {
                    self.state.start(&mut self.rng);
                }
                _ => {}
            }
        }
        Ok(true)
    }

    fn present(&mut self) -> Result<()> {
        self.game_grid
            .render(&mut self.stdout_target)
            .map_err(|e| { error!("Failed to draw frame: {}", e); e })?;
        self.stdout_target
            .flush()
            .map_err(|e| { error!("Failed to flush frame: {}", e); e })?;
        if let OutputTarget::ScreenBuffer(sb) = &self.stdout_target {
            sb.print_to_log();
        }
        Ok(())
    }
}
