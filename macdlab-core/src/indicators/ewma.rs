//! Exponentially Weighted Moving Average (EWMA).
//!
//! alpha = 2 / (span + 1). Seeded with the first value, so the output has no
//! warmup gap and is the same length as the input.
//!
//! Two weightings are supported:
//! - `Recursive`: EWMA[t] = alpha * x[t] + (1 - alpha) * EWMA[t-1]
//! - `Adjusted`: EWMA[t] = sum((1-alpha)^k * x[t-k]) / sum((1-alpha)^k), k = 0..=t

use serde::{Deserialize, Serialize};

/// How past observations are weighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weighting {
    #[default]
    Recursive,
    Adjusted,
}

/// Smoothing factor for a span.
pub fn alpha_for_span(span: usize) -> f64 {
    2.0 / (span as f64 + 1.0)
}

/// EWMA of an arbitrary series. Empty input gives empty output.
pub fn ewma_of_series(values: &[f64], span: usize, weighting: Weighting) -> Vec<f64> {
    let alpha = alpha_for_span(span);
    match weighting {
        Weighting::Recursive => recursive(values, alpha),
        Weighting::Adjusted => adjusted(values, alpha),
    }
}

fn recursive(values: &[f64], alpha: f64) -> Vec<f64> {
    let mut result = Vec::with_capacity(values.len());
    let mut iter = values.iter();
    let Some(&first) = iter.next() else {
        return result;
    };

    let mut prev = first;
    result.push(prev);
    for &x in iter {
        // Algebraically equal to alpha*x + (1-alpha)*prev, though rounding differs.
        // In this form a flat input stays exactly flat.
        prev += alpha * (x - prev);
        result.push(prev);
    }
    result
}

fn adjusted(values: &[f64], alpha: f64) -> Vec<f64> {
    let decay = 1.0 - alpha;
    let mut num = 0.0;
    let mut den = 0.0;
    values
        .iter()
        .map(|&x| {
            num = x + decay * num;
            den = 1.0 + decay * den;
            num / den
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn alpha_matches_span() {
        assert_approx(alpha_for_span(3), 0.5, DEFAULT_EPSILON);
        assert_approx(alpha_for_span(12), 2.0 / 13.0, DEFAULT_EPSILON);
        assert_approx(alpha_for_span(1), 1.0, DEFAULT_EPSILON);
    }

    #[test]
    fn recursive_known_values() {
        // alpha = 0.5
        // 10 -> 10, 11 -> 10.5, 12 -> 11.25, 13 -> 12.125
        let result = ewma_of_series(&[10.0, 11.0, 12.0, 13.0], 3, Weighting::Recursive);
        assert_eq!(result.len(), 4);
        assert_approx(result[0], 10.0, DEFAULT_EPSILON);
        assert_approx(result[1], 10.5, DEFAULT_EPSILON);
        assert_approx(result[2], 11.25, DEFAULT_EPSILON);
        assert_approx(result[3], 12.125, DEFAULT_EPSILON);
    }

    #[test]
    fn adjusted_known_values() {
        // decay = 0.5
        // [1] (11 + 0.5*10) / 1.5
        // [2] (12 + 0.5*11 + 0.25*10) / 1.75
        let result = ewma_of_series(&[10.0, 11.0, 12.0], 3, Weighting::Adjusted);
        assert_approx(result[0], 10.0, DEFAULT_EPSILON);
        assert_approx(result[1], 16.0 / 1.5, DEFAULT_EPSILON);
        assert_approx(result[2], 20.0 / 1.75, DEFAULT_EPSILON);
    }

    #[test]
    fn span_1_equals_input() {
        let input = [100.0, 200.0, 300.0];
        for weighting in [Weighting::Recursive, Weighting::Adjusted] {
            let result = ewma_of_series(&input, 1, weighting);
            for (r, x) in result.iter().zip(input) {
                assert_approx(*r, x, DEFAULT_EPSILON);
            }
        }
    }

    #[test]
    fn flat_input_stays_exactly_flat() {
        let input = [10.0; 40];
        let result = ewma_of_series(&input, 26, Weighting::Recursive);
        assert!(result.iter().all(|&v| v == 10.0));
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(ewma_of_series(&[], 12, Weighting::Recursive).is_empty());
        assert!(ewma_of_series(&[], 12, Weighting::Adjusted).is_empty());
    }

    #[test]
    fn no_look_ahead() {
        let full = [5.0, 7.0, 6.0, 9.0, 12.0, 11.0, 10.0];
        let full_result = ewma_of_series(&full, 4, Weighting::Recursive);
        let truncated = ewma_of_series(&full[..4], 4, Weighting::Recursive);
        for i in 0..4 {
            assert_eq!(full_result[i], truncated[i]);
        }
    }
}
