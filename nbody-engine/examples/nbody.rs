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
//! Random N-Body Scaling Example
//!
//! Evolves a unit-mass central body surrounded by uniformly random light
//! bodies and reports the relative energy drift and timing. Intended for
//! strong and weak scaling measurements.
//!
//! # Parallel configuration
//!
//! - `NBODY_NUM_THREADS`: worker count (0 or unset uses the global pool)
//! - `NBODY_SCHEDULE`: `static`, `dynamic` or `sequential`, optionally with
//!   a chunk length such as `static,32`
//! - `NBODY_INNER_REDUCTION`: particle count from which each per-particle
//!   sum is also split across workers
//!
//! # Running
//!
//! ```bash
//! # Strong scaling: 2000 particles whatever the worker count
//! NBODY_NUM_THREADS=8 cargo run --example nbody --release -- 0.001 steps 100 2000 0.01 strong
//!
//! # Weak scaling: 250 particles per worker
//! NBODY_NUM_THREADS=8 NBODY_SCHEDULE=static cargo run --example nbody --release -- 0.001 time 0.1 250 0.01 weak
//! ```

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use nbody_engine::energy::EnergyDrift;
use nbody_engine::generators::{NBodyGenerator, SystemGenerator};
use nbody_engine::integration::{EvolutionMode, Integrator, SymplecticEulerIntegrator, TimestepAdvice};
use nbody_engine::parallel::{Executor, ParallelConfig};
use nbody_engine::random::{RandomSource, SeedPolicy};
use std::time::Instant;

/// How the particle count relates to the worker count
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Scaling {
    /// Use the particle count as given
    Strong,
    /// Multiply the particle count by the worker count
    Weak,
}

/// Evolve a random N-body system with semi-implicit Euler
#[derive(Parser, Debug)]
#[command(about)]
struct Args {
    /// Timestep
    dt: f64,
    /// Run length unit: `time` or `steps`
    mode: EvolutionMode,
    /// Total simulated time, or number of steps
    limit: f64,
    /// Particle count, including the central body
    particles: usize,
    /// Softening length
    epsilon: f64,
    /// Scaling experiment
    #[arg(value_enum)]
    scaling: Scaling,
    /// Fixed seed for the initial conditions (entropy when omitted)
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
    if !(args.epsilon > 0.0 && args.epsilon.is_finite()) {
        bail!("softening must be positive and finite, got {}", args.epsilon);
    }
    if args.particles == 0 {
        bail!("at least one particle is required");
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    validate(&args)?;

    let config = ParallelConfig::from_env().context("reading parallel configuration")?;
    let executor = Executor::new(config)?;
    let workers = executor.thread_count();

    let particle_count = match args.scaling {
        Scaling::Strong => args.particles,
        Scaling::Weak => args
            .particles
            .checked_mul(workers)
            .context("particle count overflows")?,
    };

    let policy = args.seed.map(SeedPolicy::Fixed).unwrap_or(SeedPolicy::Entropy);
    let mut system = NBodyGenerator::with_executor(RandomSource::new(policy), executor);
    system.generate_initial_conditions(particle_count)?;

    println!("==========================================================");
    println!("       Random N-Body Simulation");
    println!("==========================================================");
    println!("  Integrator: {}", SymplecticEulerIntegrator.name());
    println!("  Particles:  {} ({:?} scaling)", particle_count, args.scaling);
    println!("  Workers:    {}", workers);
    println!("  Schedule:   {}", system.state().executor().config().schedule);
    println!("  Timestep:   {}", args.dt);
    println!("  Softening:  {}", args.epsilon);
    println!("  Mode:       {} (limit {})", args.mode, args.limit);
    println!();

    let initial_energy = system.energy().total();

    let start = Instant::now();
    let steps = system.evolve(args.mode, args.limit, args.dt, args.epsilon);
    let elapsed = start.elapsed();

    let drift = EnergyDrift::new(initial_energy, system.energy().total());
    println!("Energy before:   {:.12e}", drift.initial);
    println!("Energy after:    {:.12e}", drift.final_energy);
    println!("Relative drift:  {:.6e} %", drift.percentage());
    println!("Steps:           {}", steps);
    println!("Time elapsed:    {:.6} s", elapsed.as_secs_f64());
    if steps > 0 {
        println!("Time per step:   {:.3e} s", elapsed.as_secs_f64() / steps as f64);
    }

    Ok(())
}
