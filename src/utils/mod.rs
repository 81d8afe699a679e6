//! Utility module for bipolar vector handling
//!
//! This module provides the counting, reshaping and corruption helpers
//! that sit around the Hopfield model: Hamming distance, image
//! decoding/encoding and noise injection.

pub mod bipolar;

pub use bipolar::*;
