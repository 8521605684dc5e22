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
//! Edge case tests for evolution, energy and parallel execution

use nbody_engine::energy::{total_energy, EnergyBreakdown, EnergyDrift};
use nbody_engine::generators::{NBodyGenerator, SolarSystemGenerator, SystemGenerator};
use nbody_engine::integration::{evolve, EvolutionMode, SymplecticEulerIntegrator};
use nbody_engine::parallel::{Executor, ParallelConfig, Schedule};
use nbody_engine::particle::Particle;
use nbody_engine::random::RandomSource;
use nbody_engine::vector::Vector3;

#[test]
fn test_unpopulated_generator_evolves_nothing() {
    let mut system = NBodyGenerator::new(RandomSource::default());
    assert_eq!(system.evolve(EvolutionMode::Steps, 10.0, 0.1, 0.0), 10);
    assert!(system.snapshot().is_empty());
    assert_eq!(total_energy(&system.snapshot()), 0.0);
}

#[test]
fn test_empty_collection_energy_is_zero() {
    let breakdown = EnergyBreakdown::compute(&[], &Executor::default());
    assert_eq!(breakdown, EnergyBreakdown::default());
}

#[test]
fn test_coincident_equal_mass_twin_is_skipped() {
    // Two physically distinct particles that look like the same one
    let twin = Particle::new(1.0).with_position(Vector3::new(0.5, 0.5, 0.5));
    let system = vec![twin, twin];

    assert_eq!(system[0].net_acceleration(&system, 0.0), Vector3::zero());
    assert_eq!(system[0].potential_energy(&system), 0.0);
    assert_eq!(total_energy(&system), 0.0);
}

#[test]
fn test_coincident_unequal_masses_with_softening_stay_finite() {
    let system = vec![Particle::new(1.0), Particle::new(2.0)];
    let a = system[0].net_acceleration(&system, 0.1);
    assert!(a.is_valid());
    assert_eq!(a.norm(), 0.0);
}

#[test]
fn test_coincident_unequal_masses_without_softening_are_singular() {
    let system = vec![Particle::new(1.0), Particle::new(2.0)];
    assert!(!system[0].net_acceleration(&system, 0.0).is_valid());
}

#[test]
fn test_time_mode_overshoots_by_at_most_one_step() {
    let mut system = vec![Particle::new(1.0)];
    let executor = Executor::sequential();
    let steps = evolve(&SymplecticEulerIntegrator, &mut system, EvolutionMode::Time, 1.0, 0.3, 0.0, &executor);
    assert_eq!(steps, 4);

    let steps = evolve(&SymplecticEulerIntegrator, &mut system, EvolutionMode::Time, 1.0, 0.25, 0.0, &executor);
    assert_eq!(steps, 4);
}

#[test]
fn test_fractional_and_negative_step_limits() {
    let mut system = vec![Particle::new(1.0)];
    let executor = Executor::sequential();
    let run = |system: &mut Vec<Particle>, limit: f64| {
        evolve(&SymplecticEulerIntegrator, system, EvolutionMode::Steps, limit, 0.1, 0.0, &executor)
    };

    assert_eq!(run(&mut system, 2.7), 2);
    assert_eq!(run(&mut system, 0.9), 0);
    assert_eq!(run(&mut system, -3.0), 0);
    assert_eq!(run(&mut system, f64::NAN), 0);
}

#[test]
fn test_non_positive_time_limit_takes_no_steps() {
    let mut system = vec![Particle::new(1.0)];
    let executor = Executor::sequential();
    assert_eq!(
        evolve(&SymplecticEulerIntegrator, &mut system, EvolutionMode::Time, 0.0, 0.1, 0.0, &executor),
        0
    );
}

#[test]
fn test_lone_particle_keeps_moving_uniformly() {
    let mut system = vec![Particle::new(1.0).with_velocity(Vector3::new(1.0, 0.0, 0.0))];
    evolve(&SymplecticEulerIntegrator, &mut system, EvolutionMode::Steps, 10.0, 0.5, 0.0, &Executor::sequential());
    assert_eq!(system[0].position(), Vector3::new(5.0, 0.0, 0.0));
    assert_eq!(system[0].velocity(), Vector3::new(1.0, 0.0, 0.0));
}

#[test]
fn test_parallel_matches_sequential_exactly() {
    let run = |executor: Executor| {
        let mut system = NBodyGenerator::with_executor(RandomSource::seeded(21), executor);
        system.generate_initial_conditions(200).unwrap();
        system.evolve(EvolutionMode::Steps, 5.0, 0.01, 0.01);
        system.snapshot()
    };

    let reference = run(Executor::sequential());
    for schedule in [Schedule::Static, Schedule::Dynamic] {
        let config = ParallelConfig::default().with_threads(4).with_schedule(schedule);
        assert_eq!(run(Executor::new(config).unwrap()), reference);
    }
    assert_eq!(run(Executor::default()), reference);
}

#[test]
fn test_inner_reduction_agrees_with_direct_sum() {
    let run = |executor: Executor| {
        let mut system = NBodyGenerator::with_executor(RandomSource::seeded(22), executor);
        system.generate_initial_conditions(120).unwrap();
        system.evolve(EvolutionMode::Steps, 3.0, 0.01, 0.01);
        system.snapshot()
    };

    let reference = run(Executor::sequential());
    let config = ParallelConfig::default()
        .with_threads(3)
        .with_inner_reduction_threshold(64);
    let reduced = run(Executor::new(config).unwrap());

    for (a, b) in reduced.iter().zip(&reference) {
        assert!((a.position() - b.position()).norm() < 1e-9);
        assert!((a.velocity() - b.velocity()).norm() < 1e-9);
    }
}

#[test]
fn test_solar_energy_drift_is_small() {
    let mut solar = SolarSystemGenerator::new(RandomSource::seeded(8));
    solar.generate_initial_conditions(9).unwrap();

    let initial = total_energy(&solar.snapshot());
    solar.evolve(EvolutionMode::Steps, 1000.0, 1e-3, 0.0);
    let drift = EnergyDrift::new(initial, total_energy(&solar.snapshot()));

    assert!(initial < 0.0);
    assert!(drift.percentage() < 0.1);
}
