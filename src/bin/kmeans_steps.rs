//! Run the stepwise k-means engine over a point set stored as `.npy`.
//!
//! Reads an `(n_points, 2)` `f64` array, records every iteration, logs each
//! step and writes the final centroids to another `.npy` file.
//!
//! Usage: `kmeans-steps <input.npy> <output.npy> <k> <method> <seed> <max_steps>`
//!
//! `method` is one of `random`, `farthest` or `kmeans++`. Set `RUST_LOG=debug`
//! to see per-iteration centroid shifts.

use kmeans_stepper::{InitMethod, KMeans, KMeansConfig};
use ndarray::Array2;
use ndarray_npy::{ReadNpyExt, WriteNpyExt};
use std::env;
use std::fs::File;
use std::io::BufReader;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() != 7 {
        eprintln!(
            "Usage: {} <input.npy> <output.npy> <k> <method> <seed> <max_steps>",
            args[0]
        );
        std::process::exit(1);
    }

    let input_path = &args[1];
    let output_path = &args[2];
    let k: usize = args[3].parse()?;
    let init: InitMethod = args[4].parse()?;
    let seed: u64 = args[5].parse()?;
    let max_steps: usize = args[6].parse()?;

    let reader = BufReader::new(File::open(input_path)?);
    let points: Array2<f64> = Array2::read_npy(reader)?;

    tracing::info!(
        path = %input_path,
        n_points = points.nrows(),
        n_features = points.ncols(),
        "loaded points"
    );

    let config = KMeansConfig::new(k)
        .with_init(init)
        .with_seed(seed)
        .with_max_steps(max_steps);

    let mut kmeans = KMeans::new(points, config)?;
    let history = kmeans.fit_default()?;

    for (i, step) in history.iter().enumerate() {
        let sizes: Vec<usize> = step.clusters.iter().map(Vec::len).collect();
        let centroids: Vec<Vec<f64>> = step.centroids.outer_iter().map(|c| c.to_vec()).collect();
        tracing::info!(step = i + 1, ?sizes, ?centroids, "step");
    }

    tracing::info!(
        steps = history.len(),
        outcome = ?history.outcome(),
        "finished"
    );

    let writer = File::create(output_path)?;
    kmeans.centroids().write_npy(writer)?;

    tracing::info!(path = %output_path, "saved centroids");

    Ok(())
}
