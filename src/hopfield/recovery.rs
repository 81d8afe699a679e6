//! Asynchronous stochastic recovery
//!
//! Starting from a (possibly corrupted) state, one randomly chosen neuron
//! is set to the sign of its local field per step. Every step is recorded
//! so callers can replay or plot the descent.

use std::collections::VecDeque;

use log::{debug, trace};
use ndarray::{Array1, ArrayBase, Data, Ix1};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;

use super::classical::HopfieldModel;
use super::{RecoveryConfig, RecoveryOutcome};
use crate::error::{HopfieldError, Result};
use crate::utils::validate_bipolar;

/// States and energies of every executed step
///
/// Steps are numbered from 1; entry `t` holds the state right after the
/// `t`-th update and its energy.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Trajectory {
    states: Vec<Array1<f64>>,
    energies: Vec<f64>,
}

impl Trajectory {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            states: Vec::with_capacity(capacity),
            energies: Vec::with_capacity(capacity),
        }
    }

    fn record(&mut self, state: &Array1<f64>, energy: f64) {
        self.states.push(state.clone());
        self.energies.push(energy);
    }

    /// Number of recorded steps
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// State after step `step` (1-based)
    pub fn state_at(&self, step: usize) -> Option<&Array1<f64>> {
        step.checked_sub(1).and_then(|i| self.states.get(i))
    }

    /// Energy after step `step` (1-based)
    pub fn energy_at(&self, step: usize) -> Option<f64> {
        step.checked_sub(1)
            .and_then(|i| self.energies.get(i))
            .copied()
    }

    pub fn states(&self) -> &[Array1<f64>] {
        &self.states
    }

    pub fn energies(&self) -> &[f64] {
        &self.energies
    }

    pub fn last_state(&self) -> Option<&Array1<f64>> {
        self.states.last()
    }

    pub fn last_energy(&self) -> Option<f64> {
        self.energies.last().copied()
    }

    /// Iterate over `(step, state, energy)` starting at step 1
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Array1<f64>, f64)> + '_ {
        self.states
            .iter()
            .zip(self.energies.iter())
            .enumerate()
            .map(|(i, (state, &energy))| (i + 1, state, energy))
    }
}

/// Result of a recovery run
#[derive(Debug, Clone, Serialize)]
pub struct Recovery {
    /// Every executed step
    pub trajectory: Trajectory,
    /// Whether and how the run converged
    pub outcome: RecoveryOutcome,
    /// Energy the caller wants to compare against (not used by the loop)
    pub reference_energy: Option<f64>,
}

impl Recovery {
    pub fn final_state(&self) -> Option<&Array1<f64>> {
        self.trajectory.last_state()
    }

    pub fn final_energy(&self) -> Option<f64> {
        self.trajectory.last_energy()
    }

    /// Final energy minus the reference energy
    pub fn energy_gap(&self) -> Option<f64> {
        Some(self.final_energy()? - self.reference_energy?)
    }

    pub fn is_converged(&self) -> bool {
        self.outcome.is_converged()
    }
}

/// Run asynchronous recovery with a caller-supplied random source
///
/// Fails if the configuration is invalid or `initial` is not a bipolar
/// vector of the model's dimension. Running out of iterations is not an
/// error: the outcome is [`RecoveryOutcome::Exhausted`].
pub fn recover_with_rng<S, R>(
    model: &HopfieldModel,
    initial: &ArrayBase<S, Ix1>,
    reference_energy: Option<f64>,
    config: &RecoveryConfig,
    rng: &mut R,
) -> Result<Recovery>
where
    S: Data<Elem = f64>,
    R: Rng + ?Sized,
{
    config.validate()?;
    model.check_dimension(initial.len())?;
    validate_bipolar(initial)?;

    let dimension = model.dimension();
    let min_iterations = config.effective_min_iterations();
    let mut state = initial.to_owned();
    let mut trajectory = Trajectory::with_capacity(config.max_iterations.min(4096));
    let mut window: VecDeque<Array1<f64>> =
        VecDeque::with_capacity(config.patience.map_or(0, |p| p + 1));

    for step in 1..=config.max_iterations {
        let neuron = rng.gen_range(0..dimension);
        let field = model.local_field_unchecked(&state, neuron);
        state[neuron] = if field >= 0.0 { 1.0 } else { -1.0 };

        let energy = model.energy_unchecked(&state);
        trajectory.record(&state, energy);
        trace!("step {}: neuron {} -> {}, energy {:.4}", step, neuron, state[neuron], energy);

        if let Some(patience) = config.patience {
            window.push_back(state.clone());
            if window.len() > patience {
                window.pop_front();
            }
        }

        if step < min_iterations {
            continue;
        }

        let stagnated = match config.patience {
            Some(patience) => {
                window.len() == patience && window.iter().all(|s| s == &window[0])
            }
            None => false,
        };
        let recalled = model.matching_memory(&state);

        if stagnated || recalled.is_some() {
            debug!(
                "Converged at step {} (stagnated={}, recalled={:?}, energy={:.4})",
                step, stagnated, recalled, energy
            );
            return Ok(Recovery {
                trajectory,
                outcome: RecoveryOutcome::Converged {
                    step,
                    stagnated,
                    recalled,
                },
                reference_energy,
            });
        }
    }

    debug!(
        "Recovery exhausted {} iterations without converging",
        config.max_iterations
    );
    Ok(Recovery {
        trajectory,
        outcome: RecoveryOutcome::Exhausted {
            steps: config.max_iterations,
        },
        reference_energy,
    })
}

/// Run asynchronous recovery using the thread-local random source
pub fn recover<S>(
    model: &HopfieldModel,
    initial: &ArrayBase<S, Ix1>,
    reference_energy: Option<f64>,
    config: &RecoveryConfig,
) -> Result<Recovery>
where
    S: Data<Elem = f64>,
{
    recover_with_rng(
        model,
        initial,
        reference_energy,
        config,
        &mut rand::thread_rng(),
    )
}

/// Recover a batch of initial states in parallel
///
/// `reference_energies[i]` belongs to `initial_states[i]`; pass an empty
/// slice when no run has a reference. Run `i` draws from its own `StdRng`
/// seeded with `seed + i`, so results do not depend on thread scheduling.
pub fn recover_batch(
    model: &HopfieldModel,
    initial_states: &[Array1<f64>],
    reference_energies: &[Option<f64>],
    config: &RecoveryConfig,
    seed: u64,
) -> Result<Vec<Recovery>> {
    if !reference_energies.is_empty() && reference_energies.len() != initial_states.len() {
        return Err(HopfieldError::DimensionMismatch {
            expected: initial_states.len(),
            actual: reference_energies.len(),
        });
    }

    initial_states
        .par_iter()
        .enumerate()
        .map(|(i, initial)| {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(i as u64));
            let reference_energy = reference_energies.get(i).copied().flatten();
            recover_with_rng(model, initial, reference_energy, config, &mut rng)
        })
        .collect()
}
