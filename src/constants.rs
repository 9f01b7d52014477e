// --- Play area ---
pub const PLAY_WIDTH: i32 = 800;
pub const PLAY_HEIGHT: i32 = 600;

// --- Player ---
pub const PLAYER_SIZE: i32 = 50;
pub const PLAYER_SPEED: i32 = 5; // World units per frame

// --- Star ---
pub const STAR_SIZE: i32 = 30;

// --- Asteroids ---
pub const ASTEROID_SIZE: i32 = 50;
pub const ASTEROID_SPEED: i32 = 3;
pub const MAX_ASTEROIDS: usize = 5;
pub const ASTEROID_SPAWN_MIN_Y: i32 = -100;
pub const ASTEROID_SPAWN_MAX_Y: i32 = -50;

// --- Particles ---
pub const PARTICLES_PER_BURST: usize = 5;
pub const PARTICLE_MAX_SPEED: i32 = 3;

// --- Timing ---
pub const TARGET_FPS: u64 = 60;
pub const GAME_OVER_DELAY_MS: u64 = 2000;
pub const FIRST_HOLD_FRAMES: u64 = 40; // Outlasts the terminal's auto-repeat delay
pub const HOLD_FRAMES: u64 = 12; // Between auto-repeats

// --- Persistence / logging defaults ---
pub const DEFAULT_HIGH_SCORE_FILE: &str = "space_high_score.txt";
pub const DEFAULT_LOG_FILE: &str = "space-collector.log";

pub const WINDOW_TITLE: &str = "Space Collector";
