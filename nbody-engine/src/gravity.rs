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
//! Pairwise gravitational law with softening
//!
//! # Physics Background
//!
//! Units are chosen so that the gravitational constant is 1. The
//! acceleration induced on particle 1 by particle 2 is
//!
//! **a₁ = m₂ (x₂ - x₁) / (d² + ε²)^(3/2)**
//!
//! where d is their separation. The quantity is directed: it is the pull of
//! p2 on p1 only, and the net acceleration of a particle is the sum of this
//! term over every other particle.
//!
//! ## Softening Factor
//!
//! ε regularises the singularity at d → 0. Pass ε = 0 for exact Newtonian
//! gravity; with ε = 0 and d = 0 the result is not finite. See:
//! - Dehnen, W. (2001). "Towards optimal softening in three-dimensional N-body codes"
//! - Aarseth, S. J. (2003). "Gravitational N-Body Simulations"
//!
//! ## Parallel Computation
//!
//! [`compute_accelerations`] evaluates all N² directed interactions from a
//! read-only view of the collection and returns one vector per particle.
//! Nothing is written to the collection, so every particle can be handled
//! by a different worker. For large collections the inner sum of a single
//! particle is also split: each worker folds its share of partners into a
//! private partial sum and the partials are reduced afterwards.

use crate::parallel::Executor;
use crate::particle::Particle;
use crate::vector::Vector3;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Euclidean distance between two particles
pub fn distance(p1: &Particle, p2: &Particle) -> f64 {
    (p1.position() - p2.position()).norm()
}

/// Softened acceleration induced on `p1` by `p2`
///
/// # Example
///
/// ```
/// use nbody_engine::gravity::acceleration;
/// use nbody_engine::particle::Particle;
/// use nbody_engine::vector::Vector3;
///
/// let p1 = Particle::new(1.0);
/// let p2 = Particle::new(2.0).with_position(Vector3::new(1.0, 0.0, 0.0));
/// assert_eq!(acceleration(&p1, &p2, 0.0), Vector3::new(2.0, 0.0, 0.0));
/// ```
pub fn acceleration(p1: &Particle, p2: &Particle, epsilon: f64) -> Vector3 {
    let d = distance(p1, p2);
    let softened = d * d + epsilon * epsilon;
    (p2.position() - p1.position()) * p2.mass() / (softened * softened.sqrt())
}

/// Net acceleration of every particle in `collection`
///
/// The result has the same length and order as `collection`. Uses the
/// inner reduction when the collection reaches the executor's
/// `inner_reduction_threshold`.
pub fn compute_accelerations(
    collection: &[Particle],
    epsilon: f64,
    executor: &Executor,
) -> Vec<Vector3> {
    let threshold = executor.config().inner_reduction_threshold;
    if executor.is_parallel() && threshold > 0 && collection.len() >= threshold {
        compute_accelerations_reduced(collection, epsilon, executor)
    } else {
        executor.map(collection, |particle| {
            particle.net_acceleration(collection, epsilon)
        })
    }
}

#[cfg(feature = "parallel")]
fn compute_accelerations_reduced(
    collection: &[Particle],
    epsilon: f64,
    executor: &Executor,
) -> Vec<Vector3> {
    let chunk = executor.chunk_size(collection.len());
    executor.map(collection, |particle| {
        collection
            .par_iter()
            .with_min_len(chunk)
            .filter(|other| !particle.is_same_as(other))
            .fold(Vector3::zero, |partial, other| {
                partial + acceleration(particle, other, epsilon)
            })
            .reduce(Vector3::zero, |a, b| a + b)
    })
}

#[cfg(not(feature = "parallel"))]
fn compute_accelerations_reduced(
    collection: &[Particle],
    epsilon: f64,
    executor: &Executor,
) -> Vec<Vector3> {
    executor.map(collection, |particle| {
        particle.net_acceleration(collection, epsilon)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parallel::{ParallelConfig, Schedule};

    fn particle_at(mass: f64, x: f64, y: f64, z: f64) -> Particle {
        Particle::new(mass).with_position(Vector3::new(x, y, z))
    }

    #[test]
    fn test_distance() {
        let p1 = particle_at(1.0, 1.0, 0.0, 0.0);
        let p2 = particle_at(1.0, 0.0, 1.0, 1.0);
        assert_eq!(distance(&p1, &p2), 3.0_f64.sqrt());
        assert_eq!(distance(&p1, &p1), 0.0);
    }

    #[test]
    fn test_acceleration_unsoftened() {
        let p1 = particle_at(1.0, 0.0, 0.0, 0.0);
        let p2 = particle_at(2.0, 1.0, 0.0, 0.0);
        let a = acceleration(&p1, &p2, 0.0);
        assert!(a.is_approx(&Vector3::new(2.0, 0.0, 0.0), 1e-12));
    }

    #[test]
    fn test_acceleration_is_directed() {
        let p1 = particle_at(1.0, 0.0, 0.0, 0.0);
        let p2 = particle_at(2.0, 1.0, 0.0, 0.0);
        // Pull on p1 scales with m2, pull on p2 with m1
        assert_eq!(acceleration(&p1, &p2, 0.0).x(), 2.0);
        assert_eq!(acceleration(&p2, &p1, 0.0).x(), -1.0);
    }

    #[test]
    fn test_softening_keeps_close_encounters_finite() {
        let p1 = particle_at(1.0, 0.0, 0.0, 0.0);
        let p2 = particle_at(2.0, 0.001, 0.0, 0.0);
        let a = acceleration(&p1, &p2, 0.1);
        assert!(a.is_approx(&Vector3::new(1.9997, 0.0, 0.0), 0.01));
        assert!(a.is_valid());
    }

    #[test]
    fn test_compute_accelerations_matches_per_particle_sum() {
        let system = vec![
            particle_at(1.0, 0.0, 0.0, 0.0),
            particle_at(2.0, 2.0, 0.0, 0.0),
            particle_at(1.0, -1.0, 0.0, 0.0),
        ];
        let accelerations = compute_accelerations(&system, 0.0, &Executor::sequential());
        assert_eq!(accelerations.len(), 3);
        for (particle, computed) in system.iter().zip(&accelerations) {
            assert_eq!(*computed, particle.net_acceleration(&system, 0.0));
        }
        assert!(accelerations[0].is_approx(&Vector3::new(-0.5, 0.0, 0.0), 1e-12));
    }

    #[test]
    fn test_reduced_path_agrees_with_direct_sum() {
        let system: Vec<Particle> = (0..64)
            .map(|i| {
                let angle = i as f64 * 0.37;
                particle_at(1.0 + (i % 5) as f64, angle.cos() * (1.0 + i as f64), angle.sin(), 0.1 * i as f64)
            })
            .collect();

        let direct = compute_accelerations(&system, 0.01, &Executor::sequential());
        let reduced_executor = Executor::new(
            ParallelConfig::default()
                .with_threads(4)
                .with_schedule(Schedule::Dynamic)
                .with_chunk_size(4)
                .with_inner_reduction_threshold(16),
        )
        .unwrap();
        let reduced = compute_accelerations(&system, 0.01, &reduced_executor);

        for (a, b) in direct.iter().zip(&reduced) {
            assert!((*a - *b).norm() <= 1e-12 * a.norm().max(1.0));
        }
    }

    #[test]
    fn test_empty_collection() {
        let accelerations = compute_accelerations(&[], 0.0, &Executor::default());
        assert!(accelerations.is_empty());
    }
}
