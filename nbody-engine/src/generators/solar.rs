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
//! Sun and eight planets on circular orbits
//!
//! Masses are ratios to the solar mass and distances are in astronomical
//! units, so with G = 1 one Earth year lasts 2π time units. Each planet is
//! placed at a random phase on its circular orbit.

use super::{circular_orbit, SimulationState, SystemGenerator};
use crate::error::GenerationError;
use crate::parallel::Executor;
use crate::particle::Particle;
use crate::random::RandomSource;
use std::f64::consts::PI;

/// Number of bodies in the solar system roster
pub const SOLAR_SYSTEM_BODIES: usize = 9;

/// Roster entry
struct Body {
    name: &'static str,
    mass: f64,
    distance: f64,
}

const ROSTER: [Body; SOLAR_SYSTEM_BODIES] = [
    Body { name: "Sun", mass: 1.0, distance: 0.0 },
    Body { name: "Mercury", mass: 1.0 / 6_023_600.0, distance: 0.4 },
    Body { name: "Venus", mass: 1.0 / 408_524.0, distance: 0.7 },
    Body { name: "Earth", mass: 1.0 / 332_946.038, distance: 1.0 },
    Body { name: "Mars", mass: 1.0 / 3_098_710.0, distance: 1.5 },
    Body { name: "Jupiter", mass: 1.0 / 1_047.55, distance: 5.2 },
    Body { name: "Saturn", mass: 1.0 / 3_499.0, distance: 9.5 },
    Body { name: "Uranus", mass: 1.0 / 22_962.0, distance: 19.2 },
    Body { name: "Neptune", mass: 1.0 / 19_352.0, distance: 30.1 },
];

/// Generator for the Sun and the eight planets
///
/// # Example
///
/// ```
/// use nbody_engine::generators::{SolarSystemGenerator, SystemGenerator};
/// use nbody_engine::random::RandomSource;
///
/// let mut solar = SolarSystemGenerator::new(RandomSource::seeded(1));
/// solar.generate_initial_conditions(9).unwrap();
/// assert_eq!(solar.identifiers()[3], "Earth");
/// ```
#[derive(Debug)]
pub struct SolarSystemGenerator {
    state: SimulationState,
    random: RandomSource,
    names: Vec<String>,
}

impl SolarSystemGenerator {
    /// Create a generator evolving on the global pool
    pub fn new(random: RandomSource) -> Self {
        Self::with_executor(random, Executor::default())
    }

    /// Create a generator evolving with `executor`
    pub fn with_executor(random: RandomSource, executor: Executor) -> Self {
        SolarSystemGenerator {
            state: SimulationState::new(executor),
            random,
            names: Vec::new(),
        }
    }

    /// Body names in collection order
    ///
    /// Empty until initial conditions are generated, then always as long as
    /// the particle collection.
    pub fn identifiers(&self) -> &[String] {
        &self.names
    }
}

/// Label for slot `index` of a collection installed by `copy_system`
fn slot_name(index: usize) -> String {
    match ROSTER.get(index) {
        Some(body) => body.name.to_string(),
        None => format!("Body {}", index),
    }
}

impl SystemGenerator for SolarSystemGenerator {
    fn generate_initial_conditions(&mut self, particle_count: usize) -> Result<(), GenerationError> {
        if particle_count == 0 {
            return Err(GenerationError::EmptySystem);
        }
        if particle_count != SOLAR_SYSTEM_BODIES {
            return Err(GenerationError::RosterMismatch {
                expected: SOLAR_SYSTEM_BODIES,
                requested: particle_count,
            });
        }
        self.state.ensure_not_generated()?;

        let mut particles = Vec::with_capacity(SOLAR_SYSTEM_BODIES);
        let mut distances = Vec::with_capacity(SOLAR_SYSTEM_BODIES);

        // The star stays at the origin, at rest
        particles.push(Particle::new(ROSTER[0].mass));
        distances.push(ROSTER[0].distance);

        for body in &ROSTER[1..] {
            let theta = self.random.uniform(0.0, 2.0 * PI);
            let (position, velocity) = circular_orbit(body.distance, theta);
            particles.push(
                Particle::new(body.mass)
                    .with_position(position)
                    .with_velocity(velocity),
            );
            distances.push(body.distance);
        }

        self.names = ROSTER.iter().map(|body| body.name.to_string()).collect();
        self.state.populate(particles, distances);
        Ok(())
    }

    fn state(&self) -> &SimulationState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    /// Replace the collection, keeping one name per particle
    ///
    /// Slots that existed keep their name and slots past the roster are
    /// labelled `Body <index>`.
    fn copy_system(&mut self, particles: Vec<Particle>) {
        let count = particles.len();
        self.names.truncate(count);
        let named = self.names.len();
        self.names.extend((named..count).map(slot_name));
        self.state.replace_particles(particles);
    }
}
