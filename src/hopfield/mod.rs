//! Hopfield Network model and recovery
//!
//! This module provides the classical (1982) Hopfield model built with
//! Hebb's rule and the asynchronous stochastic recovery loop that
//! completes a noisy state into a stored memory.

pub mod classical;
pub mod recovery;

use serde::{Deserialize, Serialize};

use crate::error::{HopfieldError, Result};

/// Configuration for the recovery loop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoveryConfig {
    /// Maximum number of single-neuron updates
    pub max_iterations: usize,
    /// Size of the stagnation window; `None` disables stagnation detection
    pub patience: Option<usize>,
    /// First step at which convergence is checked; defaults to `patience`
    pub min_iterations: Option<usize>,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            patience: Some(5),
            min_iterations: None,
        }
    }
}

impl RecoveryConfig {
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_patience(mut self, patience: Option<usize>) -> Self {
        self.patience = patience;
        self
    }

    pub fn with_min_iterations(mut self, min_iterations: usize) -> Self {
        self.min_iterations = Some(min_iterations);
        self
    }

    /// Step from which convergence checks run
    ///
    /// Falls back to the patience window, or to the first step when
    /// stagnation detection is disabled.
    pub fn effective_min_iterations(&self) -> usize {
        self.min_iterations.or(self.patience).unwrap_or(1)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(HopfieldError::InvalidConfig(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        if self.patience == Some(0) {
            return Err(HopfieldError::InvalidConfig(
                "patience must be at least 1 (use None to disable)".to_string(),
            ));
        }
        Ok(())
    }
}

/// How a recovery ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecoveryOutcome {
    /// Converged at `step`
    Converged {
        step: usize,
        /// The patience window held identical states
        stagnated: bool,
        /// Index of the stored memory the final state equals
        recalled: Option<usize>,
    },
    /// Ran the whole iteration budget without converging
    Exhausted { steps: usize },
}

impl RecoveryOutcome {
    pub fn is_converged(&self) -> bool {
        matches!(self, RecoveryOutcome::Converged { .. })
    }

    /// Number of executed steps
    pub fn steps(&self) -> usize {
        match *self {
            RecoveryOutcome::Converged { step, .. } => step,
            RecoveryOutcome::Exhausted { steps } => steps,
        }
    }

    /// Stored memory reached, if recovery ended on one
    pub fn recalled(&self) -> Option<usize> {
        match *self {
            RecoveryOutcome::Converged { recalled, .. } => recalled,
            RecoveryOutcome::Exhausted { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RecoveryConfig::default();
        assert_eq!(config.max_iterations, 1000);
        assert_eq!(config.patience, Some(5));
        assert_eq!(config.effective_min_iterations(), 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_min_iterations_fallback() {
        let explicit = RecoveryConfig::default().with_min_iterations(2);
        assert_eq!(explicit.effective_min_iterations(), 2);

        let disabled = RecoveryConfig::default().with_patience(None);
        assert_eq!(disabled.effective_min_iterations(), 1);
    }

    #[test]
    fn test_invalid_config() {
        assert!(RecoveryConfig::default()
            .with_max_iterations(0)
            .validate()
            .is_err());
        assert!(matches!(
            RecoveryConfig::default().with_patience(Some(0)).validate(),
            Err(HopfieldError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_outcome_accessors() {
        let converged = RecoveryOutcome::Converged {
            step: 12,
            stagnated: false,
            recalled: Some(2),
        };
        assert!(converged.is_converged());
        assert_eq!(converged.steps(), 12);
        assert_eq!(converged.recalled(), Some(2));

        let exhausted = RecoveryOutcome::Exhausted { steps: 1000 };
        assert!(!exhausted.is_converged());
        assert_eq!(exhausted.steps(), 1000);
        assert_eq!(exhausted.recalled(), None);
    }
}
