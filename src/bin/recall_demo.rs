//! Store random images in a Hopfield network and recover a corrupted one
//!
//! Usage:
//!   cargo run --bin recall_demo -- --side 8 --memories 3 --noise 0.2

use anyhow::{ensure, Context, Result};
use clap::Parser;
use hopfield_recall::prelude::*;
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Parser, Debug)]
#[command(name = "recall_demo")]
#[command(about = "Recover a corrupted memory with a classical Hopfield network")]
struct Args {
    /// Image side length (the network has side² neurons)
    #[arg(long, default_value = "8")]
    side: usize,

    /// Number of random memories to store
    #[arg(short, long, default_value = "3")]
    memories: usize,

    /// Fraction of pixels flipped in the probe
    #[arg(short, long, default_value = "0.2")]
    noise: f64,

    /// Maximum number of single-neuron updates
    #[arg(long, default_value = "1000")]
    max_iterations: usize,

    /// Stagnation window (0 disables stagnation detection)
    #[arg(long, default_value = "5")]
    patience: usize,

    /// First step at which convergence is checked (defaults to patience)
    #[arg(long)]
    min_iterations: Option<usize>,

    /// Random seed
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Also recover one corrupted probe per memory in parallel
    #[arg(long)]
    batch: bool,
}

fn render(image: &Array2<f64>) -> String {
    image
        .rows()
        .into_iter()
        .map(|row| {
            row.iter()
                .map(|&pixel| if pixel > 0.5 { '#' } else { '.' })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    ensure!(args.side > 0, "side must be positive");

    let mut config = RecoveryConfig {
        max_iterations: args.max_iterations,
        patience: (args.patience > 0).then_some(args.patience),
        min_iterations: None,
    };
    if let Some(min_iterations) = args.min_iterations {
        config = config.with_min_iterations(min_iterations);
    }
    config.validate()?;

    let mut rng = StdRng::seed_from_u64(args.seed);
    let dimension = args.side * args.side;

    log::info!(
        "Storing {} random memories of dimension {}",
        args.memories,
        dimension
    );
    let memories = random_memories(dimension, args.memories, &mut rng);
    let model = HopfieldModel::build(&memories).context("failed to build model")?;
    log::info!("Theoretical capacity: {} memories", model.capacity());

    let target = model
        .memory(0)
        .context("no memory to probe")?
        .to_owned();
    let probe = corrupt(&target, args.noise, &mut rng);
    let reference = model.reference_energy(0);

    println!("=== Target ===\n{}\n", render(&decode(&target)?));
    println!(
        "=== Probe ({} pixels flipped) ===\n{}\n",
        hamming(&target, &probe)?,
        render(&decode(&probe)?)
    );

    let result = recover_with_rng(&model, &probe, reference, &config, &mut rng)?;
    let final_state = result
        .final_state()
        .context("recovery produced no steps")?;

    println!("=== Recovered ===\n{}\n", render(&decode(final_state)?));

    println!("=== Recovery Statistics ===");
    match result.outcome {
        RecoveryOutcome::Converged {
            step,
            stagnated,
            recalled,
        } => {
            println!("Outcome:         converged at step {}", step);
            println!("Stagnated:       {}", stagnated);
            match recalled {
                Some(index) => println!("Recalled memory: {}", index),
                None => println!("Recalled memory: none (spurious attractor)"),
            }
        }
        RecoveryOutcome::Exhausted { steps } => {
            println!("Outcome:         exhausted after {} steps", steps);
        }
    }
    println!("Distance:        {}", hamming(&target, final_state)?);
    println!(
        "Initial energy:  {:.4}",
        result.trajectory.energy_at(1).unwrap_or(f64::NAN)
    );
    println!(
        "Final energy:    {:.4}",
        result.final_energy().unwrap_or(f64::NAN)
    );
    if let (Some(reference), Some(gap)) = (result.reference_energy, result.energy_gap()) {
        println!("Target energy:   {:.4} (gap {:+.4})", reference, gap);
    }

    if args.batch {
        let probes: Vec<_> = memories
            .columns()
            .into_iter()
            .map(|memory| corrupt(&memory, args.noise, &mut rng))
            .collect();
        let references: Vec<Option<f64>> =
            model.reference_energies().iter().copied().map(Some).collect();
        let results = recover_batch(&model, &probes, &references, &config, args.seed)?;

        println!("\n=== Batch Recovery ===");
        for (k, recovery) in results.iter().enumerate() {
            let distance = match recovery.final_state() {
                Some(state) => hamming(&memories.column(k), state)?,
                None => dimension,
            };
            println!(
                "  Memory {}: steps={}, converged={}, recalled={:?}, distance={}",
                k,
                recovery.outcome.steps(),
                recovery.is_converged(),
                recovery.outcome.recalled(),
                distance
            );
        }
        let recalled = results
            .iter()
            .enumerate()
            .filter(|(k, r)| r.outcome.recalled() == Some(*k))
            .count();
        println!(
            "Recall rate:     {:.1}%",
            recalled as f64 / results.len().max(1) as f64 * 100.0
        );
    }

    Ok(())
}
