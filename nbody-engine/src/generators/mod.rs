// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Initial-condition generators and simulation run state
//!
//! A generator owns a [`SimulationState`]: the particle collection, the
//! radial distance of every particle from the central body at generation
//! time, the iteration counter and the executor used for evolution. The
//! [`SystemGenerator`] trait requires only the population step; accessors,
//! evolution and wholesale replacement are shared default methods that go
//! through the state.
//!
//! # Conventions
//!
//! - Index 0 is always the central body: at the origin, at rest, dominant
//!   mass.
//! - The auxiliary distance sequence has the same order and length as the
//!   particle sequence.
//! - Populating must happen once, before any evolution or energy query.
//!   Evolving an unpopulated generator operates on an empty collection and
//!   silently produces zero results.
//!
//! # Available generators
//!
//! - [`SolarSystemGenerator`]: the Sun and the eight planets
//! - [`NBodyGenerator`]: a unit-mass central body plus uniformly random
//!   light bodies

use crate::energy::EnergyBreakdown;
use crate::error::GenerationError;
use crate::gravity;
use crate::integration::{self, EvolutionMode, SymplecticEulerIntegrator};
use crate::parallel::Executor;
use crate::particle::Particle;
use crate::vector::Vector3;

mod nbody;
mod solar;

pub use nbody::NBodyGenerator;
pub use solar::{SolarSystemGenerator, SOLAR_SYSTEM_BODIES};

/// Position and velocity of a circular orbit around a unit mass at the origin
///
/// The orbit lies in the xy-plane at radius `distance` and phase `theta`,
/// with speed `1 / sqrt(distance)`.
pub fn circular_orbit(distance: f64, theta: f64) -> (Vector3, Vector3) {
    let (sin, cos) = theta.sin_cos();
    let position = Vector3::new(distance * sin, distance * cos, 0.0);
    let velocity = Vector3::new(-cos, sin, 0.0) / distance.sqrt();
    (position, velocity)
}

/// Particle collection, auxiliary data and iteration counter of one run
#[derive(Debug, Clone, Default)]
pub struct SimulationState {
    particles: Vec<Particle>,
    distances: Vec<f64>,
    iterations: u64,
    generated: bool,
    executor: Executor,
}

impl SimulationState {
    /// Create an empty state that evolves with `executor`
    pub fn new(executor: Executor) -> Self {
        SimulationState {
            executor,
            ..Self::default()
        }
    }

    /// The particle collection
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Radial distance of each particle from the central body
    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    /// Completed steps since construction
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// Executor used for evolution
    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    /// Check whether initial conditions have been generated
    pub fn is_generated(&self) -> bool {
        self.generated
    }

    /// Fail if this state was already populated by a generator
    pub fn ensure_not_generated(&self) -> Result<(), GenerationError> {
        if self.is_generated() {
            Err(GenerationError::AlreadyGenerated)
        } else {
            Ok(())
        }
    }

    /// Install a freshly generated collection
    ///
    /// # Panics
    ///
    /// Panics if `particles` and `distances` differ in length
    pub fn populate(&mut self, particles: Vec<Particle>, distances: Vec<f64>) {
        assert_eq!(
            particles.len(),
            distances.len(),
            "Every particle needs a radial distance"
        );
        for (index, particle) in particles.iter().enumerate() {
            if !particle.is_valid() {
                log::warn!("Generated particle {} has non-finite state", index);
            }
        }
        log::debug!("Generated system with {} particles", particles.len());
        self.particles = particles;
        self.distances = distances;
        self.generated = true;
    }

    /// Replace the collection wholesale
    ///
    /// Radial distances are recomputed against the new particle 0. The
    /// iteration counter is kept.
    pub fn replace_particles(&mut self, particles: Vec<Particle>) {
        self.distances = match particles.first() {
            Some(central) => particles
                .iter()
                .map(|particle| gravity::distance(central, particle))
                .collect(),
            None => Vec::new(),
        };
        log::debug!("Replaced system with {} particles", particles.len());
        self.particles = particles;
    }

    /// Advance the collection with semi-implicit Euler
    ///
    /// Returns the number of steps taken by this call; the counter grows by
    /// the same amount.
    pub fn evolve(&mut self, mode: EvolutionMode, limit: f64, dt: f64, epsilon: f64) -> u64 {
        log::info!(
            "Evolving {} particles ({} mode, limit {}, dt {}, epsilon {})",
            self.particles.len(),
            mode,
            limit,
            dt,
            epsilon
        );
        let steps = integration::evolve(
            &SymplecticEulerIntegrator,
            &mut self.particles,
            mode,
            limit,
            dt,
            epsilon,
            &self.executor,
        );
        self.iterations += steps;
        log::info!("Completed {} steps ({} in total)", steps, self.iterations);
        steps
    }
}

/// Builder of initial conditions with shared run-state behavior
///
/// Implementors provide the population step and access to their
/// [`SimulationState`]; everything else has a default.
pub trait SystemGenerator {
    /// Populate the collection with `particle_count` particles
    ///
    /// # Errors
    ///
    /// - [`GenerationError::EmptySystem`] when `particle_count` is zero
    /// - [`GenerationError::RosterMismatch`] when the generator has a fixed
    ///   roster of a different size
    /// - [`GenerationError::AlreadyGenerated`] on a second call
    fn generate_initial_conditions(&mut self, particle_count: usize) -> Result<(), GenerationError>;

    /// Shared run state
    fn state(&self) -> &SimulationState;

    /// Mutable shared run state
    fn state_mut(&mut self) -> &mut SimulationState;

    /// Copy of the current particle collection
    fn snapshot(&self) -> Vec<Particle> {
        self.state().particles().to_vec()
    }

    /// Completed steps since construction
    fn iterations(&self) -> u64 {
        self.state().iterations()
    }

    /// Number of particles in the collection
    fn number_of_particles(&self) -> usize {
        self.state().particles().len()
    }

    /// Radial distance of each particle from the central body
    fn distances_from_central_body(&self) -> &[f64] {
        self.state().distances()
    }

    /// Kinetic and potential energy, evaluated with the state's executor
    fn energy(&self) -> EnergyBreakdown {
        EnergyBreakdown::compute(self.state().particles(), self.state().executor())
    }

    /// Advance the system; see [`integration::evolve`]
    fn evolve(&mut self, mode: EvolutionMode, limit: f64, dt: f64, epsilon: f64) -> u64 {
        self.state_mut().evolve(mode, limit, dt, epsilon)
    }

    /// Replace the collection with a caller-built one
    fn copy_system(&mut self, particles: Vec<Particle>) {
        self.state_mut().replace_particles(particles);
    }
}
