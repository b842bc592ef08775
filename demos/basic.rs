//! Walk through a k-means run one step at a time, the way the interactive
//! front-end does.
//!
//! Run with: cargo run --example basic

use kmeans_stepper::{InitMethod, Session};
use ndarray::{Array1, Array2, Axis};
use ndarray_rand::rand_distr::Normal;
use ndarray_rand::RandomExt;

fn main() {
    println!("=== kmeans-stepper walk-through ===\n");

    // Three blobs along the diagonal, 100 points each
    let centers = [[0.0, 0.0], [5.0, 5.0], [10.0, 10.0]];
    let mut points = Array2::<f64>::zeros((0, 2));
    for center in centers.iter() {
        let blob = Array2::random((100, 2), Normal::new(0.0, 1.0).unwrap())
            + &Array1::from(center.to_vec());
        points.append(Axis(0), blob.view()).unwrap();
    }

    println!("Generated {} points around:", points.nrows());
    for (i, center) in centers.iter().enumerate() {
        println!("  Blob {}: ({:.2}, {:.2})", i, center[0], center[1]);
    }
    println!();

    let mut session = Session::new(points, 42);
    let len = session
        .initialize(3, InitMethod::KMeansPlusPlus)
        .expect("Initialization failed")
        .len();
    println!("Recorded {} steps with kmeans++ initialization\n", len);

    loop {
        let finished = session.step().expect("Session not initialized");
        let position = session.cursor().map(|c| c.position()).unwrap_or(0);
        let step = session.current_step().expect("Cursor past position 0");

        println!("Step {}:", position);
        for (slot, centroid) in step.centroids.outer_iter().enumerate() {
            println!(
                "  Centroid {} at ({:.4}, {:.4}) owns {} points",
                slot,
                centroid[0],
                centroid[1],
                step.clusters[slot].len()
            );
        }

        if finished {
            break;
        }
    }

    let kmeans = session.kmeans().expect("Session not initialized");
    println!("\nOutcome: {:?}", kmeans.outcome());
    println!("Final centroids:");
    for (slot, centroid) in kmeans.centroids().outer_iter().enumerate() {
        println!("  Centroid {}: ({:.4}, {:.4})", slot, centroid[0], centroid[1]);
    }

    println!("\n=== Done! ===");
}
