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
//! Total energy diagnostic
//!
//! Semi-implicit Euler only approximately conserves energy, so the total
//! energy before and after a run is a measure of integration error for the
//! chosen timestep rather than an enforced invariant.

use crate::parallel::Executor;
use crate::particle::Particle;

/// Kinetic and potential parts of a collection's energy
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EnergyBreakdown {
    /// Σ m |v|² / 2
    pub kinetic: f64,
    /// Σ over pairs of -m_i m_j / r
    pub potential: f64,
}

impl EnergyBreakdown {
    /// Compute both parts, fanning out over particles with `executor`
    ///
    /// An empty collection yields zero for both parts.
    pub fn compute(collection: &[Particle], executor: &Executor) -> Self {
        executor
            .map(collection, |particle| {
                (particle.kinetic_energy(), particle.potential_energy(collection))
            })
            .into_iter()
            .fold(EnergyBreakdown::default(), |acc, (kinetic, potential)| {
                EnergyBreakdown {
                    kinetic: acc.kinetic + kinetic,
                    potential: acc.potential + potential,
                }
            })
    }

    /// Kinetic plus potential energy
    pub fn total(&self) -> f64 {
        self.kinetic + self.potential
    }
}

/// Total energy of `collection`
///
/// Each particle's potential term already carries the factor ½, so the
/// double-counted pairs sum to the correct total.
pub fn total_energy(collection: &[Particle]) -> f64 {
    EnergyBreakdown::compute(collection, &Executor::default()).total()
}

/// Energy change over a run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyDrift {
    /// Energy before the run
    pub initial: f64,
    /// Energy after the run
    pub final_energy: f64,
}

impl EnergyDrift {
    /// Record the energies before and after a run
    pub fn new(initial: f64, final_energy: f64) -> Self {
        EnergyDrift { initial, final_energy }
    }

    /// `final - initial`
    pub fn absolute(&self) -> f64 {
        self.final_energy - self.initial
    }

    /// `|final - initial| / |initial| * 100`
    ///
    /// Not finite when the initial energy is zero.
    pub fn percentage(&self) -> f64 {
        (self.absolute() / self.initial).abs() * 100.0
    }
}
