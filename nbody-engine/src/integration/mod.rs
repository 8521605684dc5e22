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
//! Time integration of a particle collection
//!
//! A step is two strictly ordered phases over the whole collection:
//!
//! 1. recompute every particle's acceleration from the current state of
//!    the collection,
//! 2. advance every particle's position and velocity.
//!
//! Phase 1 reads positions that phase 2 writes, so all of phase 1 finishes
//! before any of phase 2 starts, and phase 2 finishes before the next
//! step's phase 1.
//!
//! # Run length
//!
//! [`evolve`] runs either for a simulated duration ([`EvolutionMode::Time`])
//! or for a number of steps ([`EvolutionMode::Steps`]). In time mode the
//! loop continues while the accumulated time is below the limit, so the
//! final simulated time may overshoot the limit by up to one `dt`; no
//! partial step is taken to land on it exactly.
//!
//! # Timestep Guidelines
//!
//! The engine does not validate `dt`, `epsilon` or the limit. Callers check
//! them before a run; [`Integrator::check_timestep`] rejects unusable values
//! and classifies the rest so a caller can warn about them.

use crate::error::ConfigError;
use crate::parallel::Executor;
use crate::particle::Particle;
use std::fmt;
use std::str::FromStr;

mod euler;

pub use euler::SymplecticEulerIntegrator;

/// How the length of a run is measured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvolutionMode {
    /// Step until the accumulated simulated time reaches the limit
    Time,
    /// Take `floor(limit)` steps
    Steps,
}

impl FromStr for EvolutionMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "time" => Ok(EvolutionMode::Time),
            "steps" => Ok(EvolutionMode::Steps),
            other => Err(ConfigError::UnknownMode(other.to_string())),
        }
    }
}

impl fmt::Display for EvolutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvolutionMode::Time => f.write_str("time"),
            EvolutionMode::Steps => f.write_str("steps"),
        }
    }
}

/// Trait for single-step integration schemes
pub trait Integrator: Send + Sync {
    /// Get the name of this integrator
    fn name(&self) -> &str;

    /// Advance every particle in `particles` by one step of `dt`
    ///
    /// Accelerations are recomputed from `particles` with softening
    /// `epsilon` before any particle moves.
    fn step(&self, particles: &mut [Particle], dt: f64, epsilon: f64, executor: &Executor);

    /// Classify `dt` before a run
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidTimestep`] when `dt` is zero, negative or not
    /// finite.
    fn check_timestep(&self, dt: f64) -> Result<TimestepAdvice, ConfigError> {
        if !(dt > 0.0 && dt.is_finite()) {
            return Err(ConfigError::InvalidTimestep(dt.to_string()));
        }
        Ok(if dt < MIN_RESOLVED_TIMESTEP {
            TimestepAdvice::PrecisionLoss
        } else if dt > MAX_ACCURATE_TIMESTEP {
            TimestepAdvice::Coarse
        } else {
            TimestepAdvice::Suitable
        })
    }
}

/// Below this, `t += dt` stops resolving steps over runs of a few orbits
pub const MIN_RESOLVED_TIMESTEP: f64 = 1e-9;

/// Above this, an orbit at radius 0.4 gets fewer than about 160 steps
pub const MAX_ACCURATE_TIMESTEP: f64 = 0.01;

/// Outcome of [`Integrator::check_timestep`] for a usable timestep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestepAdvice {
    /// Within the accurate range
    Suitable,
    /// So small that accumulated time loses precision
    PrecisionLoss,
    /// Large enough that inner orbits degrade visibly
    Coarse,
}

impl fmt::Display for TimestepAdvice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimestepAdvice::Suitable => f.write_str("timestep is within the accurate range"),
            TimestepAdvice::PrecisionLoss => write!(
                f,
                "timestep below {} loses precision when accumulating time",
                MIN_RESOLVED_TIMESTEP
            ),
            TimestepAdvice::Coarse => write!(
                f,
                "timestep above {} resolves inner orbits poorly and drifts in energy",
                MAX_ACCURATE_TIMESTEP
            ),
        }
    }
}

/// Advance `particles` for the run described by `mode` and `limit`
///
/// Returns the number of completed steps. `dt` must be positive in time
/// mode, otherwise the loop never terminates.
pub fn evolve<I>(
    integrator: &I,
    particles: &mut [Particle],
    mode: EvolutionMode,
    limit: f64,
    dt: f64,
    epsilon: f64,
    executor: &Executor,
) -> u64
where
    I: Integrator + ?Sized,
{
    let mut steps = 0u64;
    match mode {
        EvolutionMode::Time => {
            debug_assert!(dt > 0.0, "time mode requires a positive timestep");
            let mut t = 0.0;
            while t < limit {
                integrator.step(particles, dt, epsilon, executor);
                t += dt;
                steps += 1;
                log::trace!("step {} reached t = {}", steps, t);
            }
        }
        EvolutionMode::Steps => {
            // Truncates; negative and NaN limits saturate to zero steps
            let total = limit as u64;
            for _ in 0..total {
                integrator.step(particles, dt, epsilon, executor);
                steps += 1;
                log::trace!("step {} of {}", steps, total);
            }
        }
    }
    steps
}
