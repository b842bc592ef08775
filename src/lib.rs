//! # kmeans-stepper
//!
//! Step-by-step k-means clustering for interactive visualization.
//!
//! The engine picks initial centroids, then runs Lloyd's algorithm and
//! records every iteration as a [`Step`]: the centroids an assignment was
//! computed against, together with that assignment. A caller walks the
//! resulting [`StepHistory`] with a [`StepCursor`] (advance, jump to the end,
//! rewind) without re-running anything.
//!
//! ## Features
//!
//! - **Four initialization policies**: `random`, `farthest`, `kmeans++` and
//!   `manual`, modelled as [`InitMethod`]
//! - **Seedable randomness**: every draw goes through an injected
//!   [`rand::Rng`], or a `ChaCha8Rng` seeded from [`KMeansConfig::seed`]
//! - **ndarray compatible**: point sets are `Array2<f64>` of shape
//!   `(n_points, 2)`; any width works as long as it is consistent
//! - **Playback sessions**: [`Session`] holds one user's points, engine,
//!   history and cursor, with no shared global state
//!
//! ## Example
//!
//! ```rust
//! use kmeans_stepper::{InitMethod, KMeans, KMeansConfig, StepCursor};
//! use ndarray::array;
//!
//! let points = array![
//!     [0.0, 0.0], [0.5, 0.2], [0.1, 0.6],
//!     [5.0, 5.0], [5.4, 5.1], [4.8, 5.3],
//! ];
//! let config = KMeansConfig::new(2)
//!     .with_init(InitMethod::KMeansPlusPlus)
//!     .with_seed(42);
//!
//! let mut kmeans = KMeans::new(points, config).unwrap();
//! let history = kmeans.fit(10).unwrap();
//!
//! let mut cursor = StepCursor::for_history(&history);
//! while !cursor.advance() {
//!     let step = cursor.current(&history).unwrap();
//!     assert_eq!(step.centroids.nrows(), 2);
//! }
//! assert_eq!(cursor.current(&history), history.last());
//! ```

mod algorithm;
mod config;
mod distance;
mod error;
mod init;
mod kmeans;
pub mod playback;
mod step;

pub use algorithm::{assign_clusters, update_centroids};
pub use config::KMeansConfig;
pub use error::KMeansError;
pub use init::{initialize_centroids, InitMethod};
pub use kmeans::KMeans;
pub use playback::{Session, StepCursor};
pub use step::{Clusters, FitOutcome, Step, StepHistory};
