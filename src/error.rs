//! Error types for Hopfield model construction and recovery

use thiserror::Error;

/// Precondition violations raised by the model builder, the energy
/// function, the recovery engine and the bipolar helpers.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HopfieldError {
    /// No memories (or zero-length memories) were supplied
    #[error("Memory set is empty")]
    EmptyMemorySet,

    /// A vector does not have the length the model or operation expects
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// One pattern of a row-wise pattern list has a different length
    #[error("Memory {index} has length {actual}, expected {expected}")]
    RaggedMemories {
        index: usize,
        expected: usize,
        actual: usize,
    },

    /// An entry outside {-1, +1}
    #[error("Value {value} at position {index} is not bipolar")]
    NotBipolar { index: usize, value: f64 },

    /// Neuron index outside the network
    #[error("Neuron {neuron} out of range for dimension {dimension}")]
    NeuronOutOfRange { neuron: usize, dimension: usize },

    /// Decoding requires a length of the form n²
    #[error("Length {0} is not a perfect square")]
    NotPerfectSquare(usize),

    /// Invalid recovery configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for Hopfield operations
pub type Result<T> = std::result::Result<T, HopfieldError>;
