//! Trimmed-mean scoring.
//!
//! A panel of judges scores each presentation. The final score drops one
//! instance of the highest and one instance of the lowest submission and
//! averages the rest, limiting the influence any single judge can have.
//!
//! Small panels (fewer than [`TRIM_THRESHOLD`] submissions) fall back to the
//! plain arithmetic mean, since dropping extremes would leave nothing
//! meaningful to average.
//!
//! # Formatting
//!
//! The final score is rounded to two decimals and carried as a string from
//! then on, so every client renders the exact same value regardless of how
//! the number is re-serialized downstream.

use thiserror::Error;

/// Minimum number of submissions before the highest/lowest trim applies.
pub const TRIM_THRESHOLD: usize = 3;

/// Errors that can occur while computing a final score.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScoringError {
    /// Computation was requested before any judge submitted a score.
    #[error("at least one judge score is required")]
    InsufficientScores,
}

/// Outcome of a final-score computation.
#[derive(Debug, Clone, PartialEq)]
pub struct FinalScore {
    /// The final score, formatted to two decimals.
    pub value: String,
    /// Highest submitted score. For small panels this is still the maximum
    /// of the submissions, even though nothing was trimmed.
    pub highest: f64,
    /// Lowest submitted score.
    pub lowest: f64,
}

/// Compute the final score for a set of judge submissions.
///
/// With [`TRIM_THRESHOLD`] or more submissions, exactly one instance of the
/// maximum and one instance of the minimum are excluded before averaging.
/// When every submission is identical the two exclusions still happen, so a
/// panel of three equal scores averages the single remaining value.
///
/// # Examples
///
/// ```
/// use rostrum_scoring::compute_final_score;
///
/// let result = compute_final_score(&[70.0, 80.0, 90.0]).unwrap();
/// assert_eq!(result.value, "80.00");
/// assert_eq!(result.highest, 90.0);
/// assert_eq!(result.lowest, 70.0);
/// ```
///
/// Fails with [`ScoringError::InsufficientScores`] on an empty panel.
pub fn compute_final_score(scores: &[f64]) -> Result<FinalScore, ScoringError> {
    if scores.is_empty() {
        return Err(ScoringError::InsufficientScores);
    }

    let highest = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let lowest = scores.iter().copied().fold(f64::INFINITY, f64::min);

    if scores.len() < TRIM_THRESHOLD {
        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        return Ok(FinalScore {
            value: format_score(mean),
            highest,
            lowest,
        });
    }

    let mut remaining = scores.to_vec();
    remove_one(&mut remaining, highest);
    remove_one(&mut remaining, lowest);

    let value = if remaining.is_empty() {
        "0.00".to_string()
    } else {
        format_score(remaining.iter().sum::<f64>() / remaining.len() as f64)
    };

    Ok(FinalScore {
        value,
        highest,
        lowest,
    })
}

/// Format a score to the canonical two-decimal string form.
pub fn format_score(score: f64) -> String {
    format!("{score:.2}")
}

/// Remove a single occurrence of `value`, leaving duplicates in place.
fn remove_one(scores: &mut Vec<f64>, value: f64) {
    if let Some(pos) = scores.iter().position(|&s| s == value) {
        scores.remove(pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_panel_fails() {
        assert_eq!(
            compute_final_score(&[]),
            Err(ScoringError::InsufficientScores)
        );
    }

    #[test]
    fn single_score_is_its_own_mean() {
        let result = compute_final_score(&[87.5]).unwrap();
        assert_eq!(result.value, "87.50");
        assert_eq!(result.highest, 87.5);
        assert_eq!(result.lowest, 87.5);
    }

    #[test]
    fn two_scores_use_plain_mean() {
        let result = compute_final_score(&[60.0, 70.0]).unwrap();
        assert_eq!(result.value, "65.00");
        // Extremes are reported even though nothing was trimmed.
        assert_eq!(result.highest, 70.0);
        assert_eq!(result.lowest, 60.0);
    }

    #[test]
    fn three_scores_trim_both_extremes() {
        let result = compute_final_score(&[70.0, 80.0, 90.0]).unwrap();
        assert_eq!(result.value, "80.00");
        assert_eq!(result.highest, 90.0);
        assert_eq!(result.lowest, 70.0);
    }

    #[test]
    fn duplicate_extremes_lose_only_one_instance() {
        // One of the two 90s survives the trim: (90 + 80) / 2.
        let result = compute_final_score(&[90.0, 90.0, 70.0, 80.0]).unwrap();
        assert_eq!(result.value, "85.00");
    }

    #[test]
    fn all_equal_panel_drops_two_instances() {
        // Max and min coincide but both removals still happen,
        // leaving a single 50 to average.
        let result = compute_final_score(&[50.0, 50.0, 50.0]).unwrap();
        assert_eq!(result.value, "50.00");
        assert_eq!(result.highest, 50.0);
        assert_eq!(result.lowest, 50.0);
    }

    #[test]
    fn all_equal_larger_panel() {
        let result = compute_final_score(&[50.0, 50.0, 50.0, 50.0]).unwrap();
        assert_eq!(result.value, "50.00");
    }

    #[test]
    fn repeating_decimal_rounds_to_two_places() {
        // (79 + 80 + 82) / 3 = 80.333...
        let result = compute_final_score(&[70.0, 79.0, 80.0, 82.0, 90.0]).unwrap();
        assert_eq!(result.value, "80.33");
    }

    #[test]
    fn trimmed_mean_table() {
        let cases: &[(&[f64], &str)] = &[
            (&[80.0, 81.0, 82.0, 84.0], "81.50"),
            (&[100.0, 0.0, 50.0], "50.00"),
            (&[95.5, 88.0, 91.25], "91.25"),
            (&[60.0, 60.0, 90.0], "60.00"),
        ];

        for (scores, expected) in cases {
            let result = compute_final_score(scores).unwrap();
            assert_eq!(
                result.value, *expected,
                "final score for {scores:?} should be {expected}"
            );
        }
    }

    #[test]
    fn small_panel_mean_matches_arithmetic_mean() {
        for scores in [&[42.0][..], &[88.0, 91.0][..]] {
            let mean = scores.iter().sum::<f64>() / scores.len() as f64;
            let result = compute_final_score(scores).unwrap();
            assert_eq!(result.value, format_score(mean));
        }
    }

    #[test]
    fn format_is_always_two_decimals() {
        assert_eq!(format_score(80.0), "80.00");
        assert_eq!(format_score(80.5), "80.50");
        assert_eq!(format_score(80.125), "80.12");
        assert_eq!(format_score(0.0), "0.00");
    }
}
