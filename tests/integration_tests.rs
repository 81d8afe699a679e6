//! Integration Tests for Hopfield Recall Library

use approx::assert_relative_eq;
use hopfield_recall::prelude::*;
use ndarray::{array, Array1, Array2};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Two orthogonal 4×4 images: a vertical bar and a horizontal bar
fn bar_memories() -> Array2<f64> {
    let vertical = array![
        [0.0, 1.0, 1.0, 0.0],
        [0.0, 1.0, 1.0, 0.0],
        [0.0, 1.0, 1.0, 0.0],
        [0.0, 1.0, 1.0, 0.0]
    ];
    let horizontal = vertical.t().to_owned();

    let mut memories = Array2::zeros((16, 2));
    memories.column_mut(0).assign(&encode(&vertical));
    memories.column_mut(1).assign(&encode(&horizontal));
    memories
}

/// Test the worked example: one memory of dimension 4
#[test]
fn test_four_neuron_example() {
    let memories = array![[1.0], [1.0], [-1.0], [-1.0]];
    let model = build(&memories).unwrap();

    assert_eq!(model.weights()[[0, 1]], 1.0);
    assert_eq!(model.weights()[[0, 2]], -1.0);
    assert!(model.weights().diag().iter().all(|&w| w == 0.0));

    let memory = model.memory(0).unwrap();
    let direct = -0.5 * memory.dot(&model.weights().dot(&memory));
    assert_relative_eq!(direct, model.reference_energy(0).unwrap(), epsilon = 1e-12);
    assert_relative_eq!(
        compute_energy(&model, &memory).unwrap(),
        model.reference_energy(0).unwrap(),
        epsilon = 1e-12
    );
}

/// Test complete pipeline from images to a recovered image
#[test]
fn test_image_recovery_pipeline() {
    let memories = bar_memories();
    let model = HopfieldModel::build(&memories).unwrap();
    let target = model.memory(1).unwrap().to_owned();

    let mut rng = StdRng::seed_from_u64(2024);
    let noisy = corrupt(&target, 0.125, &mut rng);
    assert_eq!(hamming(&target, &noisy).unwrap(), 2);

    let config = RecoveryConfig::default().with_patience(None);
    let result =
        recover_with_rng(&model, &noisy, model.reference_energy(1), &config, &mut rng).unwrap();

    assert!(result.is_converged());
    assert_eq!(result.outcome.recalled(), Some(1));
    assert!(result.trajectory.len() <= config.max_iterations);

    let image = decode(result.final_state().unwrap()).unwrap();
    let expected = decode(&target).unwrap();
    assert_eq!(image, expected);
    assert_relative_eq!(result.energy_gap().unwrap(), 0.0, epsilon = 1e-9);
}

/// Test that every stored memory is a fixed point that converges
#[test]
fn test_stored_memories_converge() {
    let memories = bar_memories();
    let model = HopfieldModel::build(&memories).unwrap();
    let config = RecoveryConfig::default();

    for k in 0..model.memory_count() {
        let memory = model.memory(k).unwrap();
        let result = recover(&model, &memory, model.reference_energy(k), &config).unwrap();

        assert!(result.is_converged());
        assert_eq!(result.outcome.recalled(), Some(k));
        assert!(result.trajectory.len() <= config.max_iterations);
    }
}

/// Test trajectory bookkeeping over many random probes
#[test]
fn test_trajectory_invariants() {
    let mut rng = StdRng::seed_from_u64(7);
    let memories = random_memories(36, 4, &mut rng);
    let model = HopfieldModel::build(&memories).unwrap();
    let config = RecoveryConfig::default().with_max_iterations(200);

    for _ in 0..10 {
        let probe: Array1<f64> = random_memories(36, 1, &mut rng).column(0).to_owned();
        let result = recover_with_rng(&model, &probe, None, &config, &mut rng).unwrap();
        let trajectory = &result.trajectory;

        assert!(!trajectory.is_empty());
        assert!(trajectory.len() <= 200);
        assert_eq!(trajectory.states().len(), trajectory.energies().len());
        assert_eq!(result.outcome.steps(), trajectory.len());

        let steps: Vec<usize> = trajectory.iter().map(|(step, _, _)| step).collect();
        assert_eq!(steps, (1..=trajectory.len()).collect::<Vec<_>>());

        for pair in trajectory.energies().windows(2) {
            assert!(pair[1] <= pair[0] + 1e-9);
        }

        if let RecoveryOutcome::Converged {
            recalled: Some(k), ..
        } = result.outcome
        {
            assert_eq!(
                result.final_state().unwrap(),
                &model.memory(k).unwrap().to_owned()
            );
        }
    }
}

/// Test parallel recovery over a shared model
#[test]
fn test_batch_recovery() {
    let memories = bar_memories();
    let model = HopfieldModel::build(&memories).unwrap();
    let mut rng = StdRng::seed_from_u64(99);

    let probes: Vec<Array1<f64>> = (0..model.memory_count())
        .map(|k| corrupt(&model.memory(k).unwrap(), 0.125, &mut rng))
        .collect();
    let config = RecoveryConfig::default().with_patience(None);

    let references: Vec<Option<f64>> =
        model.reference_energies().iter().copied().map(Some).collect();

    let results = recover_batch(&model, &probes, &references, &config, 5).unwrap();
    assert_eq!(results.len(), 2);
    for (k, result) in results.iter().enumerate() {
        assert_eq!(result.outcome.recalled(), Some(k));
        assert_relative_eq!(result.energy_gap().unwrap(), 0.0, epsilon = 1e-9);
    }
}

/// Test that trajectories serialize for external plotting
#[test]
fn test_recovery_serializes() {
    let model = HopfieldModel::build(&bar_memories()).unwrap();
    let memory = model.memory(0).unwrap();
    let result = recover(&model, &memory, None, &RecoveryConfig::default()).unwrap();

    let json = serde_json::to_string(&result).unwrap();
    assert!(json.contains("trajectory"));
    assert!(json.contains("Converged"));
}

/// Test precondition violations
#[test]
fn test_precondition_errors() {
    assert_eq!(
        HopfieldModel::build(&Array2::<f64>::zeros((0, 0))).unwrap_err(),
        HopfieldError::EmptyMemorySet
    );
    assert_eq!(
        decode(&Array1::from_elem(5, 1.0)).unwrap_err(),
        HopfieldError::NotPerfectSquare(5)
    );
    assert!(hamming(&array![1.0, -1.0], &array![1.0]).is_err());

    let model = HopfieldModel::build(&bar_memories()).unwrap();
    assert!(compute_energy(&model, &Array1::from_elem(9, 1.0)).is_err());
}
