//! Per-pass score table

use crate::score::count_transitions;

/// Scores of every (candidate angle, sampled row) pair of one search pass.
///
/// Stored angle-major so that a candidate's row sequence is one slice.
#[derive(Debug, Clone)]
pub struct ScoreTable {
    angles: usize,
    rows: usize,
    scores: Vec<f64>,
}

impl ScoreTable {
    /// Create a table of zero scores.
    pub fn new(angles: usize, rows: usize) -> Self {
        Self {
            angles,
            rows,
            scores: vec![0.0; angles * rows],
        }
    }

    /// Build a table from per-row score vectors, each holding one score
    /// per candidate angle in candidate order.
    pub fn from_rows(angles: usize, rows: &[Vec<f64>]) -> Self {
        let mut table = Self::new(angles, rows.len());
        for (row, scores) in rows.iter().enumerate() {
            table.set_row(row, scores);
        }
        table
    }

    /// Number of candidate angles.
    pub fn angles(&self) -> usize {
        self.angles
    }

    /// Number of sampled rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Store the scores of `row` for every candidate angle.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of range or `scores.len() != angles`.
    pub fn set_row(&mut self, row: usize, scores: &[f64]) {
        assert_eq!(scores.len(), self.angles);
        for (angle, &score) in scores.iter().enumerate() {
            self.scores[angle * self.rows + row] = score;
        }
    }

    /// Row scores of one candidate, top to bottom.
    pub fn row_scores(&self, angle: usize) -> &[f64] {
        &self.scores[angle * self.rows..(angle + 1) * self.rows]
    }

    /// Accumulated score of one candidate.
    ///
    /// Summed in row order so the result does not depend on how rows were
    /// scheduled.
    pub fn total(&self, angle: usize) -> f64 {
        self.row_scores(angle).iter().sum()
    }

    /// Number of high/low flips in one candidate's row sequence.
    pub fn row_transitions(&self, angle: usize, threshold: f64) -> u32 {
        count_transitions(self.row_scores(angle).iter().copied(), threshold)
    }
}
