//! Caller-side playback over a recorded [`StepHistory`].
//!
//! The engine computes every step up front; a [`StepCursor`] walks them one
//! at a time. [`Session`] bundles a point set, an engine, its history and a
//! cursor so that each interactive user owns independent state.

use crate::config::KMeansConfig;
use crate::error::KMeansError;
use crate::init::InitMethod;
use crate::kmeans::KMeans;
use crate::step::{Step, StepHistory};
use ndarray::Array2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Step budget used by interactive sessions
pub const DEFAULT_SESSION_STEPS: usize = 10;

/// Position within a history of `len` steps.
///
/// Position 0 shows the raw points; position `p >= 1` shows step `p - 1`.
/// The cursor is finished once it reaches `len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepCursor {
    position: usize,
    len: usize,
}

impl StepCursor {
    pub fn new(len: usize) -> Self {
        Self { position: 0, len }
    }

    pub fn for_history(history: &StepHistory) -> Self {
        Self::new(history.len())
    }

    /// Move forward by one step, stopping at the end.
    ///
    /// Returns `true` once the cursor is finished.
    pub fn advance(&mut self) -> bool {
        if self.position < self.len {
            self.position += 1;
        }
        self.is_finished()
    }

    pub fn jump_to_end(&mut self) {
        self.position = self.len;
    }

    pub fn reset(&mut self) {
        self.position = 0;
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_finished(&self) -> bool {
        self.position == self.len
    }

    /// Step shown at the current position, `None` at position 0
    pub fn current<'a>(&self, history: &'a StepHistory) -> Option<&'a Step> {
        self.position
            .checked_sub(1)
            .and_then(|index| history.get(index))
    }
}

/// Fitted engine plus its history and cursor
#[derive(Debug, Clone)]
struct Run {
    kmeans: KMeans,
    history: StepHistory,
    cursor: StepCursor,
}

/// One user's interactive clustering state.
///
/// Owns its own random generator so that sessions never share state.
#[derive(Debug, Clone)]
pub struct Session {
    points: Array2<f64>,
    rng: ChaCha8Rng,
    max_steps: usize,
    run: Option<Run>,
}

impl Session {
    pub fn new(points: Array2<f64>, seed: u64) -> Self {
        Self {
            points,
            rng: ChaCha8Rng::seed_from_u64(seed),
            max_steps: DEFAULT_SESSION_STEPS,
            run: None,
        }
    }

    /// Set the step budget used for every fit in this session
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Build and fit a fresh engine, with the cursor at position 0
    pub fn initialize(&mut self, k: usize, init: InitMethod) -> Result<&StepHistory, KMeansError> {
        let config = KMeansConfig::new(k)
            .with_init(init)
            .with_max_steps(self.max_steps);
        let mut kmeans = KMeans::with_rng(self.points.clone(), config, &mut self.rng)?;
        let history = kmeans.fit_default()?;

        tracing::info!(
            k,
            init = %kmeans.init(),
            steps = history.len(),
            "session initialized"
        );

        let cursor = StepCursor::for_history(&history);
        let run = self.run.insert(Run {
            kmeans,
            history,
            cursor,
        });
        Ok(&run.history)
    }

    /// Advance by one step. Returns `true` once the last step is shown.
    pub fn step(&mut self) -> Result<bool, KMeansError> {
        let run = self.run.as_mut().ok_or(KMeansError::NotInitialized)?;
        Ok(run.cursor.advance())
    }

    /// Show the final step
    pub fn run_to_convergence(&mut self) -> Result<(), KMeansError> {
        let run = self.run.as_mut().ok_or(KMeansError::NotInitialized)?;
        run.cursor.jump_to_end();
        Ok(())
    }

    /// Move the cursor back to position 0 without refitting
    pub fn rewind(&mut self) -> Result<(), KMeansError> {
        let run = self.run.as_mut().ok_or(KMeansError::NotInitialized)?;
        run.cursor.reset();
        Ok(())
    }

    /// Start over on the same points with the same k and policy.
    ///
    /// Sampling policies draw new initial centroids from the session's
    /// generator; manual centroids are reused.
    pub fn reset(&mut self) -> Result<&StepHistory, KMeansError> {
        let run = self.run.as_ref().ok_or(KMeansError::NotInitialized)?;
        let config = run.kmeans.config();
        let (k, init) = (config.k, config.init.clone());
        self.initialize(k, init)
    }

    /// Swap in a new point set and drop the current run
    pub fn replace_points(&mut self, points: Array2<f64>) {
        self.points = points;
        self.run = None;
    }

    /// Step at the cursor, `None` before the first step or without a run
    pub fn current_step(&self) -> Option<&Step> {
        self.run
            .as_ref()
            .and_then(|run| run.cursor.current(&run.history))
    }

    pub fn cursor(&self) -> Option<StepCursor> {
        self.run.as_ref().map(|run| run.cursor)
    }

    pub fn history(&self) -> Option<&StepHistory> {
        self.run.as_ref().map(|run| &run.history)
    }

    pub fn kmeans(&self) -> Option<&KMeans> {
        self.run.as_ref().map(|run| &run.kmeans)
    }

    pub fn points(&self) -> &Array2<f64> {
        &self.points
    }

    pub fn is_finished(&self) -> bool {
        self.run.as_ref().is_some_and(|run| run.cursor.is_finished())
    }
}
