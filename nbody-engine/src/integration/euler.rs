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
//! Semi-implicit Euler integrator
//!
//! # Algorithm
//!
//! ```text
//! a(t)      = Σ_j a(x_i(t), x_j(t))
//! x(t + dt) = x(t) + v(t)*dt
//! v(t + dt) = v(t) + a(t)*dt
//! ```
//!
//! Both updates use the state from before the step. The variant is fixed:
//! it is neither velocity-first nor averaged.
//!
//! # Properties
//!
//! - **First-order accurate**: global error O(dt)
//! - **One force evaluation per step**
//! - Energy is not conserved exactly; the drift is a function of `dt`
//!
//! # References
//!
//! - Hairer, E., Lubich, C., & Wanner, G. (2006). Geometric Numerical Integration:
//!   Structure-Preserving Algorithms for Ordinary Differential Equations (2nd ed.).
//!   Springer. Section I.1.

use super::Integrator;
use crate::gravity;
use crate::parallel::Executor;
use crate::particle::Particle;

/// Semi-implicit Euler integrator for gravitating particles
///
/// # Example
///
/// ```
/// use nbody_engine::integration::{Integrator, SymplecticEulerIntegrator};
/// use nbody_engine::parallel::Executor;
/// use nbody_engine::particle::Particle;
/// use nbody_engine::vector::Vector3;
///
/// let sun = Particle::new(1.0);
/// let planet = Particle::new(0.1)
///     .with_position(Vector3::new(1.0, 0.0, 0.0))
///     .with_velocity(Vector3::new(0.0, 1.0, 0.0));
/// let mut system = vec![sun, planet];
///
/// SymplecticEulerIntegrator.step(&mut system, 0.1, 0.0, &Executor::sequential());
/// assert!(system[1].position().is_approx(&Vector3::new(1.0, 0.1, 0.0), 1e-12));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SymplecticEulerIntegrator;

impl Integrator for SymplecticEulerIntegrator {
    fn name(&self) -> &str {
        "Symplectic Euler"
    }

    fn step(&self, particles: &mut [Particle], dt: f64, epsilon: f64, executor: &Executor) {
        // Phase 1 reads a snapshot and writes nothing
        let accelerations = gravity::compute_accelerations(particles, epsilon, executor);

        // Phase 2 touches each particle only through its own slot
        executor.for_each_zip_mut(particles, &accelerations, |particle, acceleration| {
            particle.set_acceleration(*acceleration);
            particle.update(dt);
        });
    }
}
