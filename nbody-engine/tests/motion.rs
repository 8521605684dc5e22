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
//! Single-particle motion against closed-form kinematics
//!
//! Each test steps a lone particle with `update` until the accumulated time
//! passes 2π and compares against the analytic solution at the time actually
//! reached.

use nbody_engine::particle::Particle;
use nbody_engine::random::RandomSource;
use nbody_engine::vector::Vector3;
use std::f64::consts::PI;

const DT: f64 = 0.001;
const PERIOD: f64 = 2.0 * PI;

/// Step `particle` until `t >= PERIOD`, calling `after_step` after each move
fn run_for_period<F>(particle: &mut Particle, mut after_step: F) -> f64
where
    F: FnMut(&mut Particle),
{
    let mut t = 0.0;
    while t < PERIOD {
        particle.update(DT);
        after_step(particle);
        t += DT;
    }
    t
}

#[test]
fn test_zero_acceleration_is_uniform_motion() {
    let mut random = RandomSource::seeded(11);
    let mut p = Particle::new(3.5);
    p.randomize_position(&mut random, -50.0, 50.0);
    p.randomize_velocity(&mut random, -50.0, 50.0);

    let x0 = p.position();
    let v0 = p.velocity();
    let t = run_for_period(&mut p, |_| {});

    assert!(p.position().is_approx(&(x0 + v0 * t), 0.01));
    assert_eq!(p.velocity(), v0);
    assert_eq!(p.acceleration(), Vector3::zero());
}

#[test]
fn test_constant_acceleration_is_uniformly_accelerated_motion() {
    let mut random = RandomSource::seeded(12);
    let mut p = Particle::new(3.5);
    p.randomize_position(&mut random, 1.0, 50.0);
    p.randomize_velocity(&mut random, 1.0, 50.0);
    p.randomize_acceleration(&mut random, 1.0, 10.0);

    let x0 = p.position();
    let v0 = p.velocity();
    let a = p.acceleration();
    let t = run_for_period(&mut p, |_| {});

    let expected_position = x0 + v0 * t + 0.5 * a * t * t;
    let expected_velocity = v0 + a * t;
    assert!(p.position().is_approx(&expected_position, 0.01));
    assert!(p.velocity().is_approx(&expected_velocity, 0.01));
    // Acceleration is never recomputed by a bare update
    assert_eq!(p.acceleration(), a);
}

#[test]
fn test_harmonic_motion_returns_after_one_period() {
    let mut p = Particle::new(3.5)
        .with_position(Vector3::new(1.0, 0.0, 0.0))
        .with_velocity(Vector3::new(0.0, 1.0, 0.0));
    p.set_acceleration(-p.position());

    let x0 = p.position();
    let v0 = p.velocity();
    run_for_period(&mut p, |p| p.set_acceleration(-p.position()));

    assert!(p.position().is_approx(&x0, 0.01));
    assert!(p.velocity().is_approx(&v0, 0.01));
}

#[test]
fn test_single_update_uses_old_velocity_for_position() {
    let mut p = Particle::new(1.0)
        .with_position(Vector3::new(1.0, 2.0, 3.0))
        .with_velocity(Vector3::new(1.0, 0.0, 0.0));
    p.set_acceleration(Vector3::new(0.0, 10.0, 0.0));
    p.update(0.5);

    assert_eq!(p.position(), Vector3::new(1.5, 2.0, 3.0));
    assert_eq!(p.velocity(), Vector3::new(1.0, 5.0, 0.0));
}
