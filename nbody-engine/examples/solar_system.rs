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
//! Solar System Simulation Example
//!
//! Evolves the Sun and the eight planets on initially circular orbits and
//! reports the state of every body before and after the run, together with
//! the energy drift and the wall-clock cost.
//!
//! # Units
//!
//! G = 1, masses in solar masses, distances in AU. One Earth year lasts 2π
//! time units.
//!
//! # Running
//!
//! ```bash
//! # One Earth year with dt = 1e-4
//! cargo run --example solar_system --release -- 0.0001 time 6.2832
//!
//! # Exactly 10000 steps
//! cargo run --example solar_system --release -- 0.001 steps 10000
//!
//! # Reproducible phases
//! cargo run --example solar_system --release -- 0.001 steps 10000 --seed 42
//! ```

use anyhow::{bail, Result};
use clap::Parser;
use nbody_engine::energy::EnergyDrift;
use nbody_engine::generators::{SolarSystemGenerator, SystemGenerator, SOLAR_SYSTEM_BODIES};
use nbody_engine::integration::{EvolutionMode, Integrator, SymplecticEulerIntegrator, TimestepAdvice};
use nbody_engine::parallel::{Executor, ParallelConfig};
use nbody_engine::particle::Particle;
use nbody_engine::random::{RandomSource, SeedPolicy};
use std::time::Instant;

/// Evolve the solar system with semi-implicit Euler
#[derive(Parser, Debug)]
#[command(about)]
struct Args {
    /// Timestep
    dt: f64,
    /// Run length unit: `time` or `steps`
    mode: EvolutionMode,
    /// Total simulated time, or number of steps
    limit: f64,
    /// Fixed seed for the planetary phases (entropy when omitted)
    #[arg(long)]
    seed: Option<u64>,
}

fn validate(args: &Args) -> Result<()> {
    let advice = SymplecticEulerIntegrator.check_timestep(args.dt)?;
    if advice != TimestepAdvice::Suitable {
        log::warn!("{}", advice);
    }
    if !(args.limit > 0.0 && args.limit.is_finite()) {
        bail!("limit must be positive and finite, got {}", args.limit);
    }
    if args.mode == EvolutionMode::Time && args.limit <= args.dt {
        bail!(
            "total time {} must be larger than the timestep {}",
            args.limit,
            args.dt
        );
    }
    Ok(())
}

fn print_bodies(names: &[String], particles: &[Particle]) {
    for (name, body) in names.iter().zip(particles) {
        let [x, y, z] = body.position().as_array();
        let [vx, vy, vz] = body.velocity().as_array();
        println!("Body {}:", name);
        println!("  Position: ({:.16e}, {:.16e}, {:.16e})", x, y, z);
        println!("  Velocity: ({:.16e}, {:.16e}, {:.16e})", vx, vy, vz);
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    validate(&args)?;

    let executor = Executor::new(ParallelConfig::from_env()?)?;
    let policy = args.seed.map(SeedPolicy::Fixed).unwrap_or(SeedPolicy::Entropy);
    let mut solar = SolarSystemGenerator::with_executor(RandomSource::new(policy), executor);
    solar.generate_initial_conditions(SOLAR_SYSTEM_BODIES)?;
    let names = solar.identifiers().to_vec();

    println!("==========================================================");
    println!("       Solar System Simulation");
    println!("==========================================================");
    println!("  Integrator: {}", SymplecticEulerIntegrator.name());
    println!("  Timestep:   {}", args.dt);
    println!("  Mode:       {} (limit {})", args.mode, args.limit);
    println!();

    println!("-> Initial positions and velocities");
    let before = solar.snapshot();
    print_bodies(&names, &before);
    let initial_energy = solar.energy().total();

    println!();
    println!("-> Running the simulation");
    let start = Instant::now();
    let steps = solar.evolve(args.mode, args.limit, args.dt, 0.0);
    let elapsed = start.elapsed();

    println!();
    println!("-> Final positions and velocities");
    let after = solar.snapshot();
    print_bodies(&names, &after);

    let drift = EnergyDrift::new(initial_energy, solar.energy().total());
    println!();
    println!("Energy before:   {:.12e}", drift.initial);
    println!("Energy after:    {:.12e}", drift.final_energy);
    println!("Absolute drift:  {:.6e}", drift.absolute());
    println!("Steps:           {}", steps);
    println!("Time elapsed:    {:.6} s", elapsed.as_secs_f64());
    if steps > 0 {
        println!("Time per step:   {:.3e} s", elapsed.as_secs_f64() / steps as f64);
    }

    Ok(())
}
