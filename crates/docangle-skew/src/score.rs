//! Line and row scoring
//!
//! A line that runs through the gap between two text lines crosses no ink
//! and scores 1.0; every white/black flip along the line lowers the score
//! as `1 / (1 + transitions)`.

use crate::line::LineStats;

/// Score one sampled line in `[0, 1]`.
///
/// A line with no samples scores 0.
#[inline]
pub fn score_line(stats: &LineStats) -> f64 {
    if stats.samples() == 0 {
        return 0.0;
    }
    1.0 / (1.0 + f64::from(stats.transitions))
}

/// Count how often a score sequence crosses `threshold`.
///
/// Each value is classified as high (`> threshold`) or low; every change of
/// class between consecutive values counts once.
pub fn count_transitions<I>(scores: I, threshold: f64) -> u32
where
    I: IntoIterator<Item = f64>,
{
    let mut iter = scores.into_iter().map(|s| s > threshold);
    let Some(mut prev) = iter.next() else {
        return 0;
    };
    let mut count = 0;
    for high in iter {
        if high != prev {
            count += 1;
        }
        prev = high;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(white: u32, black: u32, transitions: u32) -> LineStats {
        LineStats {
            white,
            black,
            transitions,
        }
    }

    #[test]
    fn test_score_line() {
        assert_eq!(score_line(&stats(100, 0, 0)), 1.0);
        assert_eq!(score_line(&stats(0, 100, 0)), 1.0);
        assert_eq!(score_line(&stats(60, 40, 1)), 0.5);
        assert_eq!(score_line(&stats(50, 50, 3)), 0.25);
        assert_eq!(score_line(&stats(0, 0, 0)), 0.0);
    }

    #[test]
    fn test_count_transitions() {
        assert_eq!(count_transitions(Vec::<f64>::new(), 0.3), 0);
        assert_eq!(count_transitions([1.0, 1.0, 1.0], 0.3), 0);
        assert_eq!(count_transitions([1.0, 0.1, 1.0, 0.1], 0.3), 3);
        // Exactly at the threshold counts as low
        assert_eq!(count_transitions([0.3, 0.31, 0.3], 0.3), 2);
    }
}
