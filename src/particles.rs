use crossterm::style::Color;
use rand::Rng;

use crate::constants::*;
use crate::rendering::GameGrid;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub x: i32,
    pub y: i32,
    pub dx: i32,
    pub dy: i32,
    pub color: Color,
}

impl Particle {
    pub fn new(x: i32, y: i32, dx: i32, dy: i32, color: Color) -> Self {
        Particle { x, y, dx, dy, color }
    }

    pub fn update(&mut self) {
        self.x += self.dx;
        self.y += self.dy;
    }

    // Dies outside the open play area or when velocity is exactly (0,0).
    // A single zero axis still drifts, so it survives.
    pub fn is_alive(&self) -> bool {
        let inside = 0 < self.x && self.x < PLAY_WIDTH && 0 < self.y && self.y < PLAY_HEIGHT;
        inside && (self.dx, self.dy) != (0, 0)
    }

    pub fn draw(&self, game_grid: &mut GameGrid) {
        game_grid.plot(self.x, self.y, 'o', self.color);
    }
}

#[derive(Debug, Default)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn new() -> Self {
        ParticleSystem { particles: Vec::new() }
    }

    pub fn spawn(&mut self, x: i32, y: i32, color: Color, rng: &mut impl Rng) {
        for _ in 0..PARTICLES_PER_BURST {
            let dx = rng.gen_range(-PARTICLE_MAX_SPEED..=PARTICLE_MAX_SPEED);
            let dy = rng.gen_range(-PARTICLE_MAX_SPEED..=PARTICLE_MAX_SPEED);
            self.particles.push(Particle::new(x, y, dx, dy, color));
        }
    }

    pub fn advance(&mut self) {
        self.particles.retain_mut(|particle| {
            particle.update();
            particle.is_alive()
        });
    }

    pub fn render(&self, game_grid: &mut GameGrid) {
        for particle in &self.particles {
            particle.draw(game_grid);
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
