//! Classical Hopfield Network (1982)
//!
//! Binary (bipolar) associative memory whose weights are assigned in one
//! shot with Hebb's rule. The model is immutable once built, so a single
//! instance can back any number of concurrent recoveries.

use log::{debug, warn};
use ndarray::{Array1, Array2, ArrayBase, ArrayView1, Axis, Data, Ix1};
use serde::Serialize;

use crate::error::{HopfieldError, Result};
use crate::utils::validate_bipolar;

/// Fraction of the dimension a classical network can store reliably
/// (Amit, Gutfreund & Sompolinsky).
pub const CAPACITY_RATIO: f64 = 0.138;

/// Classical Hopfield model built from a set of bipolar memories
///
/// # Example
///
/// ```rust
/// use hopfield_recall::hopfield::classical::HopfieldModel;
/// use ndarray::array;
///
/// // Two memories of dimension 4, one per column
/// let memories = array![[1.0, 1.0], [1.0, -1.0], [-1.0, 1.0], [-1.0, -1.0]];
/// let model = HopfieldModel::build(&memories).unwrap();
///
/// assert_eq!(model.dimension(), 4);
/// assert_eq!(model.memory_count(), 2);
/// assert_eq!(model.weights()[[0, 0]], 0.0);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct HopfieldModel {
    /// Weight matrix (N × N, symmetric, zero diagonal)
    weights: Array2<f64>,
    /// Bias vector, identically zero for the classical network
    bias: Array1<f64>,
    /// Energy of each stored memory, indexed like the memory columns
    reference_energies: Vec<f64>,
    /// Stored memories (N × K, one memory per column)
    memories: Array2<f64>,
}

impl HopfieldModel {
    /// Build a model from an `N × K` memory matrix using Hebb's rule
    ///
    /// W = (1/K) Σ_k m_k m_kᵀ, with the diagonal set to zero.
    pub fn build<S>(memories: &ArrayBase<S, ndarray::Ix2>) -> Result<Self>
    where
        S: Data<Elem = f64>,
    {
        let (dimension, count) = memories.dim();
        if dimension == 0 || count == 0 {
            return Err(HopfieldError::EmptyMemorySet);
        }
        validate_bipolar(memories)?;

        let mut weights = memories.dot(&memories.t()) / count as f64;
        weights.diag_mut().fill(0.0);

        let mut model = Self {
            weights,
            bias: Array1::zeros(dimension),
            reference_energies: Vec::with_capacity(count),
            memories: memories.to_owned(),
        };

        model.reference_energies = model
            .memories
            .axis_iter(Axis(1))
            .map(|memory| model.energy_unchecked(&memory))
            .collect();

        let capacity = model.capacity();
        if count > capacity {
            warn!(
                "Storing {} memories in a network of dimension {} (capacity ~{}); recall may be unreliable",
                count, dimension, capacity
            );
        }
        debug!(
            "Built Hopfield model: dimension={}, memories={}",
            dimension, count
        );

        Ok(model)
    }

    /// Build a model from a list of patterns, one pattern per entry
    ///
    /// Fails when the list is empty or when the patterns do not all share
    /// the length of the first one.
    pub fn from_patterns(patterns: &[Vec<f64>]) -> Result<Self> {
        let first = patterns.first().ok_or(HopfieldError::EmptyMemorySet)?;
        let dimension = first.len();

        if let Some((index, pattern)) = patterns
            .iter()
            .enumerate()
            .find(|(_, pattern)| pattern.len() != dimension)
        {
            return Err(HopfieldError::RaggedMemories {
                index,
                expected: dimension,
                actual: pattern.len(),
            });
        }

        let memories =
            Array2::from_shape_fn((dimension, patterns.len()), |(i, k)| patterns[k][i]);
        Self::build(&memories)
    }

    /// Energy of a state: E(s) = -½ sᵀWs - bᵀs
    pub fn energy<S>(&self, state: &ArrayBase<S, Ix1>) -> Result<f64>
    where
        S: Data<Elem = f64>,
    {
        self.check_dimension(state.len())?;
        Ok(self.energy_unchecked(state))
    }

    pub(crate) fn energy_unchecked<S>(&self, state: &ArrayBase<S, Ix1>) -> f64
    where
        S: Data<Elem = f64>,
    {
        -0.5 * state.dot(&self.weights.dot(state)) - self.bias.dot(state)
    }

    /// Local field of one neuron: h_i = Σ_j W[i][j]·s[j] - b[i]
    pub fn local_field<S>(&self, state: &ArrayBase<S, Ix1>, neuron: usize) -> Result<f64>
    where
        S: Data<Elem = f64>,
    {
        self.check_dimension(state.len())?;
        if neuron >= self.dimension() {
            return Err(HopfieldError::NeuronOutOfRange {
                neuron,
                dimension: self.dimension(),
            });
        }
        Ok(self.local_field_unchecked(state, neuron))
    }

    pub(crate) fn local_field_unchecked<S>(&self, state: &ArrayBase<S, Ix1>, neuron: usize) -> f64
    where
        S: Data<Elem = f64>,
    {
        self.weights.row(neuron).dot(state) - self.bias[neuron]
    }

    /// Index of the stored memory equal to `state`, if any
    pub fn matching_memory<S>(&self, state: &ArrayBase<S, Ix1>) -> Option<usize>
    where
        S: Data<Elem = f64>,
    {
        let state = state.view();
        self.memories
            .axis_iter(Axis(1))
            .position(|memory| memory == state)
    }

    pub(crate) fn check_dimension(&self, actual: usize) -> Result<()> {
        if actual != self.dimension() {
            return Err(HopfieldError::DimensionMismatch {
                expected: self.dimension(),
                actual,
            });
        }
        Ok(())
    }

    /// Number of neurons (N)
    pub fn dimension(&self) -> usize {
        self.weights.nrows()
    }

    /// Number of stored memories (K)
    pub fn memory_count(&self) -> usize {
        self.memories.ncols()
    }

    /// Theoretical capacity (≈ 0.138·N random patterns)
    pub fn capacity(&self) -> usize {
        (CAPACITY_RATIO * self.dimension() as f64).floor() as usize
    }

    pub fn weights(&self) -> &Array2<f64> {
        &self.weights
    }

    pub fn bias(&self) -> &Array1<f64> {
        &self.bias
    }

    /// Stored memories, one per column
    pub fn memories(&self) -> &Array2<f64> {
        &self.memories
    }

    /// Stored memory `index` (0-based)
    pub fn memory(&self, index: usize) -> Option<ArrayView1<'_, f64>> {
        (index < self.memory_count()).then(|| self.memories.column(index))
    }

    /// Energy of stored memory `index`, computed at build time
    pub fn reference_energy(&self, index: usize) -> Option<f64> {
        self.reference_energies.get(index).copied()
    }

    pub fn reference_energies(&self) -> &[f64] {
        &self.reference_energies
    }
}

/// Build a model from an `N × K` memory matrix (see [`HopfieldModel::build`])
pub fn build<S>(memories: &ArrayBase<S, ndarray::Ix2>) -> Result<HopfieldModel>
where
    S: Data<Elem = f64>,
{
    HopfieldModel::build(memories)
}

/// Energy of `state` under `model` (see [`HopfieldModel::energy`])
pub fn compute_energy<S>(model: &HopfieldModel, state: &ArrayBase<S, Ix1>) -> Result<f64>
where
    S: Data<Elem = f64>,
{
    model.energy(state)
}
