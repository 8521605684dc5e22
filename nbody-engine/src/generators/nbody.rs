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
//! Random N-body system around a unit-mass central body

use super::{circular_orbit, SimulationState, SystemGenerator};
use crate::error::GenerationError;
use crate::parallel::Executor;
use crate::particle::Particle;
use crate::random::RandomSource;
use std::f64::consts::PI;

/// Mass of the central body
pub const CENTRAL_MASS: f64 = 1.0;

/// Lower bound of the orbiting body mass range
pub const MIN_MASS: f64 = 1.0 / 6_000_000.0;

/// Upper bound of the orbiting body mass range
pub const MAX_MASS: f64 = 1.0 / 1_000.0;

/// Lower bound of the orbital radius range
pub const MIN_DISTANCE: f64 = 0.4;

/// Upper bound of the orbital radius range
pub const MAX_DISTANCE: f64 = 30.0;

/// Generator for a central body plus uniformly random light bodies
///
/// Every body after the first draws a mass from `[MIN_MASS, MAX_MASS)`, a
/// radius from `[MIN_DISTANCE, MAX_DISTANCE)` and a phase from `[0, 2π)`,
/// and starts on the circular orbit for that radius and phase.
#[derive(Debug)]
pub struct NBodyGenerator {
    state: SimulationState,
    random: RandomSource,
}

impl NBodyGenerator {
    /// Create a generator evolving on the global pool
    pub fn new(random: RandomSource) -> Self {
        Self::with_executor(random, Executor::default())
    }

    /// Create a generator evolving with `executor`
    pub fn with_executor(random: RandomSource, executor: Executor) -> Self {
        NBodyGenerator {
            state: SimulationState::new(executor),
            random,
        }
    }
}

impl SystemGenerator for NBodyGenerator {
    fn generate_initial_conditions(&mut self, particle_count: usize) -> Result<(), GenerationError> {
        if particle_count == 0 {
            return Err(GenerationError::EmptySystem);
        }
        self.state.ensure_not_generated()?;

        let mut particles = Vec::with_capacity(particle_count);
        let mut distances = Vec::with_capacity(particle_count);

        particles.push(Particle::new(CENTRAL_MASS));
        distances.push(0.0);

        for _ in 1..particle_count {
            let mass = self.random.uniform(MIN_MASS, MAX_MASS);
            let theta = self.random.uniform(0.0, 2.0 * PI);
            let distance = self.random.uniform(MIN_DISTANCE, MAX_DISTANCE);
            let (position, velocity) = circular_orbit(distance, theta);
            particles.push(
                Particle::new(mass)
                    .with_position(position)
                    .with_velocity(velocity),
            );
            distances.push(distance);
        }

        self.state.populate(particles, distances);
        Ok(())
    }

    fn state(&self) -> &SimulationState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::Vector3;

    #[test]
    fn test_generates_requested_count() {
        for &n in &[1usize, 2, 17, 1000] {
            let mut system = NBodyGenerator::new(RandomSource::seeded(n as u64));
            system.generate_initial_conditions(n).unwrap();
            assert_eq!(system.number_of_particles(), n);
            assert_eq!(system.distances_from_central_body().len(), n);
        }
    }

    #[test]
    fn test_zero_particles_rejected() {
        let mut system = NBodyGenerator::new(RandomSource::seeded(1));
        assert_eq!(
            system.generate_initial_conditions(0),
            Err(GenerationError::EmptySystem)
        );
    }

    #[test]
    fn test_sampling_ranges() {
        let mut system = NBodyGenerator::new(RandomSource::seeded(99));
        system.generate_initial_conditions(500).unwrap();
        let particles = system.snapshot();

        let central = particles[0];
        assert_eq!(central.mass(), CENTRAL_MASS);
        assert_eq!(central.position(), Vector3::zero());
        assert_eq!(central.velocity(), Vector3::zero());

        for (p, &d) in particles.iter().zip(system.distances_from_central_body()).skip(1) {
            assert!(p.mass() >= MIN_MASS && p.mass() < MAX_MASS);
            assert!((MIN_DISTANCE..MAX_DISTANCE).contains(&d));
            assert!((p.position().norm() - d).abs() < 1e-9);
        }
    }

    #[test]
    fn test_same_seed_same_system() {
        let mut a = NBodyGenerator::new(RandomSource::seeded(2024));
        let mut b = NBodyGenerator::new(RandomSource::seeded(2024));
        a.generate_initial_conditions(64).unwrap();
        b.generate_initial_conditions(64).unwrap();
        assert_eq!(a.snapshot(), b.snapshot());
    }
}
