//! Visual-only particles
//!
//! Fixed lifetime in ticks and a hard cap on pool size, so decay is fully
//! predictable. Nothing here feeds back into gameplay.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{MAX_PARTICLES, PARTICLE_LIFE, PARTICLE_SPREAD};

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks remaining
    pub life: u32,
    pub color: u32,
}

impl Particle {
    /// Opacity, 1 at birth fading to 0
    pub fn alpha(&self) -> f32 {
        self.life as f32 / PARTICLE_LIFE as f32
    }
}

/// Bounded particle pool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticlePool {
    particles: Vec<Particle>,
    capacity: usize,
}

impl Default for ParticlePool {
    fn default() -> Self {
        Self::with_capacity(MAX_PARTICLES)
    }
}

impl ParticlePool {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            particles: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Burst of `count` particles at `origin`; spawns beyond capacity are dropped
    pub fn emit<R: Rng>(&mut self, origin: Vec2, color: u32, count: usize, rng: &mut R) {
        let room = self.capacity.saturating_sub(self.particles.len());
        for _ in 0..count.min(room) {
            let vel = Vec2::new(
                (rng.random::<f32>() - 0.5) * PARTICLE_SPREAD,
                (rng.random::<f32>() - 0.5) * PARTICLE_SPREAD,
            );
            self.particles.push(Particle {
                pos: origin,
                vel,
                life: PARTICLE_LIFE,
                color,
            });
        }
    }

    /// Move and age every particle, dropping the expired ones
    pub fn update(&mut self) {
        self.particles.retain_mut(|p| {
            p.pos += p.vel;
            p.life = p.life.saturating_sub(1);
            p.life > 0
        });
    }
}
