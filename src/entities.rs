use crossterm::style::Color;
use rand::Rng;

use crate::constants::*;
use crate::rendering::GameGrid;
use crate::terminal_io::HeldKeys;
use crate::types::Rect;

// --- Player ship ---
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Player {
    pub x: i32,
    pub y: i32,
}

impl Player {
    pub const START_X: i32 = PLAY_WIDTH / 2;
    pub const START_Y: i32 = PLAY_HEIGHT - 2 * PLAYER_SIZE;

    pub fn new() -> Self {
        Player { x: Self::START_X, y: Self::START_Y }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, PLAYER_SIZE, PLAYER_SIZE)
    }

    pub fn steer(&mut self, keys: &HeldKeys) {
        if keys.left {
            self.x = (self.x - PLAYER_SPEED).max(0);
        }
        if keys.right {
            self.x = (self.x + PLAYER_SPEED).min(PLAY_WIDTH - PLAYER_SIZE);
        }
        if keys.up {
            self.y = (self.y - PLAYER_SPEED).max(0);
        }
        if keys.down {
            self.y = (self.y + PLAYER_SPEED).min(PLAY_HEIGHT - PLAYER_SIZE);
        }
    }

    pub fn draw(&self, game_grid: &mut GameGrid) {
        game_grid.fill_rect(self.rect(), 'A', Color::Cyan);
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

// --- Star (collectible) ---
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Star {
    pub x: i32,
    pub y: i32,
}

impl Star {
    pub fn random(rng: &mut impl Rng) -> Self {
        let mut star = Star { x: 0, y: 0 };
        star.relocate(rng);
        star
    }

    pub fn relocate(&mut self, rng: &mut impl Rng) {
        self.x = rng.gen_range(0..=PLAY_WIDTH - STAR_SIZE);
        self.y = rng.gen_range(0..=PLAY_HEIGHT / 2);
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, STAR_SIZE, STAR_SIZE)
    }

    pub fn draw(&self, game_grid: &mut GameGrid) {
        game_grid.fill_rect(self.rect(), '*', Color::Yellow);
    }
}

// --- Asteroid ---
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Asteroid {
    pub x: i32,
    pub y: i32,
    pub speed: i32,
}

impl Asteroid {
    pub fn new(x: i32, y: i32) -> Self {
        Asteroid { x, y, speed: ASTEROID_SPEED }
    }

    pub fn spawn(rng: &mut impl Rng) -> Self {
        let x = rng.gen_range(0..=PLAY_WIDTH - ASTEROID_SIZE);
        let y = rng.gen_range(ASTEROID_SPAWN_MIN_Y..=ASTEROID_SPAWN_MAX_Y);
        Asteroid::new(x, y)
    }

    pub fn update(&mut self) {
        self.y += self.speed;
    }

    pub fn is_off_screen(&self) -> bool {
        self.y > PLAY_HEIGHT
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, ASTEROID_SIZE, ASTEROID_SIZE)
    }

    pub fn draw(&self, game_grid: &mut GameGrid) {
        game_grid.fill_rect(self.rect(), '@', Color::DarkGrey);
    }
}
