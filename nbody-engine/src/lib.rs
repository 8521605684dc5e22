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
//! # N-Body Engine
//!
//! Direct-summation simulation of gravitationally interacting point masses
//! in units where G = 1, with a solar-system preset and a random N-body
//! preset.
//!
//! ## Features
//!
//! - **Softened Newtonian gravity**: exact O(N²) pairwise summation
//! - **Semi-implicit Euler**: one force evaluation per step
//! - **Energy diagnostic**: total energy before and after a run
//! - **Parallelization**: optional Rayon fan-out over particles, with
//!   injected worker count and scheduling
//! - **Reproducibility**: injected, seedable random source for initial
//!   conditions
//!
//! ## Example
//!
//! ```rust
//! use nbody_engine::energy::total_energy;
//! use nbody_engine::generators::{SolarSystemGenerator, SystemGenerator};
//! use nbody_engine::integration::EvolutionMode;
//! use nbody_engine::random::RandomSource;
//!
//! let mut solar = SolarSystemGenerator::new(RandomSource::seeded(7));
//! solar.generate_initial_conditions(9).unwrap();
//!
//! let before = total_energy(&solar.snapshot());
//! solar.evolve(EvolutionMode::Steps, 100.0, 1e-3, 0.0);
//! let after = total_energy(&solar.snapshot());
//!
//! assert_eq!(solar.iterations(), 100);
//! assert!(((after - before) / before).abs() < 1e-3);
//! ```

#![warn(missing_docs)]

/// Error types
pub mod error;

/// Three-component vectors
pub mod vector;

/// Seedable random source
pub mod random;

/// Point-mass particles
pub mod particle;

/// Pairwise gravitational law
pub mod gravity;

/// Energy diagnostic
pub mod energy;

/// Parallel execution configuration
pub mod parallel;

/// Time integration and the evolution driver
pub mod integration;

/// Initial-condition generators
pub mod generators;

pub use energy::total_energy;
pub use error::{ConfigError, GenerationError};
pub use generators::{NBodyGenerator, SolarSystemGenerator, SystemGenerator};
pub use integration::{EvolutionMode, TimestepAdvice};
pub use parallel::{Executor, ParallelConfig, Schedule};
pub use particle::Particle;
pub use random::{RandomSource, SeedPolicy};
pub use vector::Vector3;
