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
//! Error types reported by the engine
//!
//! Only generator arguments and caller-supplied configuration are checked.
//! Numeric preconditions of the physics (positive timestep, non-degenerate
//! softening) are the caller's responsibility and are not reported here.

use std::fmt;

/// Failure to populate a system with initial conditions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// A particle count of zero was requested
    EmptySystem,
    /// The requested count does not match a generator with a fixed roster
    RosterMismatch {
        /// Number of bodies the generator always produces
        expected: usize,
        /// Number of bodies the caller asked for
        requested: usize,
    },
    /// Initial conditions were already generated for this instance
    AlreadyGenerated,
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::EmptySystem => {
                write!(f, "the number of particles must be greater than 0")
            }
            GenerationError::RosterMismatch { expected, requested } => write!(
                f,
                "this system always contains {} bodies, {} were requested",
                expected, requested
            ),
            GenerationError::AlreadyGenerated => {
                write!(f, "initial conditions have already been generated")
            }
        }
    }
}

impl std::error::Error for GenerationError {}

/// Invalid run or execution configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Evolution mode keyword other than `time` or `steps`
    UnknownMode(String),
    /// Worker count that is not a non-negative integer
    InvalidThreadCount(String),
    /// Scheduling policy that could not be parsed
    InvalidSchedule(String),
    /// Inner-reduction threshold that is not a non-negative integer
    InvalidThreshold(String),
    /// Timestep that is zero, negative or not finite
    InvalidTimestep(String),
    /// The dedicated thread pool could not be built
    ThreadPool(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownMode(mode) => write!(
                f,
                "unknown evolution mode '{}', expected 'time' or 'steps'",
                mode
            ),
            ConfigError::InvalidThreadCount(value) => {
                write!(f, "invalid worker count '{}'", value)
            }
            ConfigError::InvalidSchedule(value) => write!(
                f,
                "invalid schedule '{}', expected 'static' or 'dynamic' with an optional ',<chunk>'",
                value
            ),
            ConfigError::InvalidThreshold(value) => write!(
                f,
                "invalid inner-reduction threshold '{}', expected a particle count",
                value
            ),
            ConfigError::InvalidTimestep(value) => {
                write!(f, "invalid timestep {}, must be positive and finite", value)
            }
            ConfigError::ThreadPool(reason) => {
                write!(f, "failed to build thread pool: {}", reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_error_messages() {
        assert_eq!(
            GenerationError::EmptySystem.to_string(),
            "the number of particles must be greater than 0"
        );
        let err = GenerationError::RosterMismatch { expected: 9, requested: 4 };
        assert!(err.to_string().contains("9"));
        assert!(err.to_string().contains("4"));
    }

    #[test]
    fn test_config_error_messages() {
        let err = ConfigError::UnknownMode("step".to_string());
        assert!(err.to_string().contains("'step'"));

        let boxed: Box<dyn std::error::Error> = Box::new(ConfigError::InvalidSchedule("auto".into()));
        assert!(boxed.to_string().contains("auto"));

        let err = ConfigError::InvalidThreshold("lots".to_string());
        assert!(err.to_string().contains("threshold 'lots'"));
        assert!(!err.to_string().contains("static"));
    }
}
