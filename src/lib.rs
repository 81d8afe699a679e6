//! # Hopfield Recall
//!
//! A Rust library implementing the classical Hopfield Network as an
//! associative memory: bipolar memories are stored with Hebb's rule and
//! recovered from noisy or partial states by asynchronous stochastic
//! updates.
//!
//! ## Features
//!
//! - One-shot Hebbian model construction with per-memory reference energies
//! - Energy function and local fields
//! - Asynchronous recovery with stagnation and exact-recall detection
//! - Full per-step trajectory (states and energies) for external plotting
//! - Parallel batch recovery over a shared, immutable model
//!
//! ## Quick Start
//!
//! ```rust
//! use hopfield_recall::prelude::*;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//!
//! // Three random 8×8 memories, one per column
//! let memories = random_memories(64, 3, &mut rng);
//! let model = HopfieldModel::build(&memories).unwrap();
//!
//! // Corrupt the first memory and try to recover it
//! let target = model.memory(0).unwrap().to_owned();
//! let noisy = corrupt(&target, 0.1, &mut rng);
//!
//! let result = recover_with_rng(
//!     &model,
//!     &noisy,
//!     model.reference_energy(0),
//!     &RecoveryConfig::default(),
//!     &mut rng,
//! )
//! .unwrap();
//!
//! assert!(result.trajectory.len() <= 1000);
//! let image = decode(result.final_state().unwrap()).unwrap();
//! assert_eq!(image.dim(), (8, 8));
//! ```

pub mod error;
pub mod hopfield;
pub mod utils;

// Re-export main types for convenience
pub use error::{HopfieldError, Result};
pub use hopfield::classical::{build, compute_energy, HopfieldModel};
pub use hopfield::recovery::{recover, recover_batch, recover_with_rng, Recovery, Trajectory};
pub use hopfield::{RecoveryConfig, RecoveryOutcome};
pub use utils::{corrupt, decode, encode, hamming, random_memories};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{HopfieldError, Result};
    pub use crate::hopfield::classical::{build, compute_energy, HopfieldModel};
    pub use crate::hopfield::recovery::{
        recover, recover_batch, recover_with_rng, Recovery, Trajectory,
    };
    pub use crate::hopfield::{RecoveryConfig, RecoveryOutcome};
    pub use crate::utils::{corrupt, decode, encode, hamming, random_memories};
}
