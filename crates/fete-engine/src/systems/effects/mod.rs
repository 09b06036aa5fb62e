//! Visual effects: keyframed particles and the RNG that scatters them.

mod rng;
mod particle;

pub use rng::Rng;
pub use particle::{Envelope, Particle, ParticleShape};

#[cfg(feature = "vectors")]
use crate::systems::vector::VectorState;

/// Container for live particles.
/// Generic — pages spawn particles; the runner ticks and draws them.
pub struct EffectsState {
    pub particles: Vec<Particle>,
    pub rng: Rng,
}

impl EffectsState {
    /// Create a new EffectsState with the given RNG seed.
    pub fn new(seed: u64) -> Self {
        EffectsState {
            particles: Vec::with_capacity(256),
            rng: Rng::new(seed.wrapping_add(7919)),
        }
    }

    pub fn spawn(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    pub fn extend(&mut self, particles: impl IntoIterator<Item = Particle>) {
        self.particles.extend(particles);
    }

    /// Advance all particles, dropping finished ones.
    pub fn tick(&mut self, dt: f32) {
        self.particles.retain_mut(|p| p.tick(dt));
    }

    /// Particles past their delay.
    pub fn visible_count(&self) -> usize {
        self.particles.iter().filter(|p| p.progress().is_some()).count()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Tessellate every visible particle into the vector buffer.
    #[cfg(feature = "vectors")]
    pub fn draw(&self, vectors: &mut VectorState) {
        for p in &self.particles {
            p.draw(vectors);
        }
    }
}
