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
//! Point-mass particle
//!
//! A [`Particle`] carries a mass and three kinematic vectors. Position and
//! velocity are integrated state; acceleration is transient and only ever
//! holds the net pull last computed from some collection, so it is stale
//! until recomputed.
//!
//! # Identity
//!
//! Particles have no identifier: a collection is an ordered slice and the
//! index is the only identity. When summing over a collection a particle
//! therefore recognises "itself" heuristically, by an exactly zero distance
//! combined with an exactly equal mass (see [`Particle::is_same_as`]). Two
//! distinct particles of equal mass that happen to coincide are skipped as
//! well. This is a known approximation of the model.

use crate::gravity;
use crate::random::RandomSource;
use crate::vector::Vector3;

/// A gravitating point mass
///
/// # Examples
///
/// ```
/// use nbody_engine::particle::Particle;
/// use nbody_engine::vector::Vector3;
///
/// let mut p = Particle::new(1.0);
/// p.set_velocity(Vector3::new(1.0, 1.0, 0.0));
/// assert_eq!(p.kinetic_energy(), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    mass: f64,
    position: Vector3,
    velocity: Vector3,
    acceleration: Vector3,
}

impl Particle {
    /// Create a particle at rest at the origin
    ///
    /// # Panics
    ///
    /// Panics if `mass` is not positive and finite
    pub fn new(mass: f64) -> Self {
        assert!(
            mass > 0.0 && mass.is_finite(),
            "Mass must be positive and finite"
        );
        Particle {
            mass,
            position: Vector3::zero(),
            velocity: Vector3::zero(),
            acceleration: Vector3::zero(),
        }
    }

    /// Create a particle, returning `None` for a non-positive or non-finite mass
    pub fn try_new(mass: f64) -> Option<Self> {
        if mass > 0.0 && mass.is_finite() {
            Some(Self::new(mass))
        } else {
            None
        }
    }

    /// Builder-style position setter
    pub fn with_position(mut self, position: Vector3) -> Self {
        self.position = position;
        self
    }

    /// Builder-style velocity setter
    pub fn with_velocity(mut self, velocity: Vector3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Get the mass
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Get the position
    pub fn position(&self) -> Vector3 {
        self.position
    }

    /// Get the velocity
    pub fn velocity(&self) -> Vector3 {
        self.velocity
    }

    /// Get the last computed acceleration
    pub fn acceleration(&self) -> Vector3 {
        self.acceleration
    }

    /// Set the mass
    ///
    /// # Panics
    ///
    /// Panics if `mass` is not positive and finite
    pub fn set_mass(&mut self, mass: f64) {
        assert!(
            mass > 0.0 && mass.is_finite(),
            "Mass must be positive and finite"
        );
        self.mass = mass;
    }

    /// Set the position
    pub fn set_position(&mut self, position: Vector3) {
        self.position = position;
    }

    /// Set the velocity
    pub fn set_velocity(&mut self, velocity: Vector3) {
        self.velocity = velocity;
    }

    /// Set the acceleration
    pub fn set_acceleration(&mut self, acceleration: Vector3) {
        self.acceleration = acceleration;
    }

    /// Draw each position component uniformly from `[min, max)`
    pub fn randomize_position(&mut self, source: &mut RandomSource, min: f64, max: f64) {
        self.position = random_vector(source, min, max);
    }

    /// Draw each velocity component uniformly from `[min, max)`
    pub fn randomize_velocity(&mut self, source: &mut RandomSource, min: f64, max: f64) {
        self.velocity = random_vector(source, min, max);
    }

    /// Draw each acceleration component uniformly from `[min, max)`
    pub fn randomize_acceleration(&mut self, source: &mut RandomSource, min: f64, max: f64) {
        self.acceleration = random_vector(source, min, max);
    }

    /// Check if every kinematic component is finite
    pub fn is_valid(&self) -> bool {
        self.position.is_valid() && self.velocity.is_valid() && self.acceleration.is_valid()
    }

    /// Heuristic self test used when summing over a collection
    ///
    /// True when `other` sits at exactly zero distance and has exactly the
    /// same mass.
    pub fn is_same_as(&self, other: &Particle) -> bool {
        gravity::distance(self, other) == 0.0 && self.mass == other.mass
    }

    /// Kinetic energy, m |v|² / 2
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.norm_squared()
    }

    /// Potential energy contribution against the rest of `collection`
    ///
    /// Each pair carries half of `-m_i m_j / r`, so summing this over every
    /// particle of a collection yields the total potential energy once.
    pub fn potential_energy(&self, collection: &[Particle]) -> f64 {
        collection
            .iter()
            .filter(|other| !self.is_same_as(other))
            .map(|other| -0.5 * self.mass * other.mass / gravity::distance(self, other))
            .sum()
    }

    /// Net softened gravitational acceleration induced by `collection`
    ///
    /// Pure: reads the collection and returns the sum without storing it.
    pub fn net_acceleration(&self, collection: &[Particle], epsilon: f64) -> Vector3 {
        collection
            .iter()
            .filter(|other| !self.is_same_as(other))
            .map(|other| gravity::acceleration(self, other, epsilon))
            .sum()
    }

    /// Recompute and store the acceleration from `collection`
    pub fn accumulate_acceleration(&mut self, collection: &[Particle], epsilon: f64) {
        self.acceleration = self.net_acceleration(collection, epsilon);
    }

    /// Advance one semi-implicit Euler step
    ///
    /// Position moves with the velocity from before the step and velocity
    /// moves with the acceleration from before the step.
    pub fn update(&mut self, dt: f64) {
        let velocity = self.velocity;
        let acceleration = self.acceleration;
        self.position += velocity * dt;
        self.velocity = velocity + acceleration * dt;
    }
}

fn random_vector(source: &mut RandomSource, min: f64, max: f64) -> Vector3 {
    let x = source.uniform(min, max);
    let y = source.uniform(min, max);
    let z = source.uniform(min, max);
    Vector3::new(x, y, z)
}
