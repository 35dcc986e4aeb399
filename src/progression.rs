//! @ai:module:intent Reconstruct the chronological history of personal bests
//! @ai:module:layer domain
//! @ai:module:public_api Milestone, progression, progression_for_kind
//! @ai:module:depends_on attempt, window
//! @ai:module:stateless true
//!
//! Attempts are replayed in timestamp order (missing timestamps count as 0,
//! ties keep input order). A milestone is recorded whenever a value is
//! strictly lower than every earlier one; equal values never count.

use crate::attempt::Attempt;
use crate::window::{window_average, Statistic};
use serde::{Deserialize, Serialize};

/// @ai:intent A record-breaking point in a statistic's history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    /// Single duration or window average, in seconds.
    pub value: f64,
    /// Effective timestamp of the most recent contributing attempt.
    pub date: i64,
    /// The attempt (single) or the `n` consecutive attempts (average), oldest first.
    pub attempts: Vec<Attempt>,
}

/// @ai:intent Compute the PB progression of a statistic, most recent first
/// @ai:pre attempts is in any order; it is not modified
/// @ai:post returned values strictly increase from first to last
/// @ai:post only attempts with effective timestamp <= cutoff are considered
/// @ai:effects pure
pub fn progression(
    attempts: &[Attempt],
    statistic: Statistic,
    cutoff: Option<i64>,
) -> Vec<Milestone> {
    let sorted = chronological(attempts, cutoff);

    let mut history = match statistic {
        Statistic::Single => replay_singles(&sorted),
        Statistic::Average(n) => replay_averages(&sorted, n),
    };

    history.reverse();
    history
}

/// @ai:intent Progression keyed by a caller-supplied kind string
/// @ai:post unknown kinds yield an empty list
/// @ai:effects pure
pub fn progression_for_kind(attempts: &[Attempt], kind: &str, cutoff: Option<i64>) -> Vec<Milestone> {
    match Statistic::from_kind(kind) {
        Some(statistic) => progression(attempts, statistic, cutoff),
        None => Vec::new(),
    }
}

/// Filtered, chronologically sorted copy. `sort_by_key` is stable, so equal
/// timestamps keep their input order.
fn chronological(attempts: &[Attempt], cutoff: Option<i64>) -> Vec<Attempt> {
    let mut sorted: Vec<Attempt> = attempts
        .iter()
        .filter(|a| a.is_within(cutoff))
        .copied()
        .collect();
    sorted.sort_by_key(Attempt::effective_timestamp);
    sorted
}

fn replay_singles(sorted: &[Attempt]) -> Vec<Milestone> {
    let mut best = f64::INFINITY;
    let mut history = Vec::new();

    for attempt in sorted {
        if attempt.duration < best {
            best = attempt.duration;
            history.push(Milestone {
                value: attempt.duration,
                date: attempt.effective_timestamp(),
                attempts: vec![*attempt],
            });
        }
    }

    history
}

fn replay_averages(sorted: &[Attempt], n: usize) -> Vec<Milestone> {
    if n == 0 || sorted.len() < n {
        return Vec::new();
    }

    let mut best = f64::INFINITY;
    let mut history = Vec::new();
    let mut durations = Vec::with_capacity(n);

    for window in sorted.windows(n) {
        durations.clear();
        durations.extend(window.iter().map(|a| a.duration));
        let avg = window_average(&durations);

        if avg < best {
            best = avg;
            history.push(Milestone {
                value: avg,
                date: window[n - 1].effective_timestamp(),
                attempts: window.to_vec(),
            });
        }
    }

    history
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dated(pairs: &[(f64, i64)]) -> Vec<Attempt> {
        pairs.iter().map(|&(d, t)| Attempt::new(d, Some(t))).collect()
    }

    fn values(milestones: &[Milestone]) -> Vec<f64> {
        milestones.iter().map(|m| m.value).collect()
    }

    #[test]
    fn test_single_progression_most_recent_first() {
        let attempts = dated(&[(10.0, 100), (8.0, 200), (9.0, 300), (5.0, 400)]);
        let history = progression(&attempts, Statistic::Single, None);

        assert_eq!(values(&history), vec![5.0, 8.0, 10.0]);
        assert_eq!(history[0].date, 400);
        assert_eq!(history[0].attempts, vec![Attempt::new(5.0, Some(400))]);
    }

    #[test]
    fn test_single_progression_with_cutoff() {
        let attempts = dated(&[(10.0, 100), (8.0, 200), (9.0, 300), (5.0, 400)]);
        let history = progression(&attempts, Statistic::Single, Some(300));

        assert_eq!(values(&history), vec![8.0, 10.0]);
    }

    #[test]
    fn test_cutoff_equals_truncation() {
        let attempts = dated(&[(12.0, 50), (9.0, 400), (11.0, 100), (7.0, 300), (8.0, 200)]);
        let mut sorted = attempts.clone();
        sorted.sort_by_key(Attempt::effective_timestamp);

        for k in 1..=sorted.len() {
            let cutoff = sorted[k - 1].effective_timestamp();
            assert_eq!(
                progression(&attempts, Statistic::Single, Some(cutoff)),
                progression(&sorted[..k], Statistic::Single, None)
            );
        }
    }

    #[test]
    fn test_sorts_by_timestamp_not_input_order() {
        let attempts = dated(&[(5.0, 400), (10.0, 100), (8.0, 200)]);
        let history = progression(&attempts, Statistic::Single, None);

        assert_eq!(values(&history), vec![5.0, 8.0, 10.0]);
        // Input list is untouched.
        assert_eq!(attempts[0].duration, 5.0);
    }

    #[test]
    fn test_missing_timestamps_sort_first() {
        let attempts = vec![
            Attempt::new(6.0, Some(100)),
            Attempt::new(9.0, None),
            Attempt::new(7.0, None),
        ];
        let history = progression(&attempts, Statistic::Single, Some(0));

        assert_eq!(values(&history), vec![7.0, 9.0]);
        assert!(history.iter().all(|m| m.date == 0));
    }

    #[test]
    fn test_ties_do_not_create_milestones() {
        let attempts = dated(&[(8.0, 1), (8.0, 2), (8.0, 3)]);
        let history = progression(&attempts, Statistic::Single, None);

        assert_eq!(history.len(), 1);
        assert_eq!(history[0].date, 1);
    }

    #[test]
    fn test_average_progression() {
        let attempts = dated(&[(10.0, 1), (12.0, 2), (8.0, 3), (9.0, 4), (13.0, 5), (4.0, 6)]);
        let history = progression(&attempts, Statistic::Average(3), None);

        // Windows: 10.0, 29/3, 10.0, 26/3
        assert_eq!(history.len(), 3);
        assert!((history[0].value - 26.0 / 3.0).abs() < 1e-9);
        assert_eq!(history[0].date, 6);
        assert_eq!(values(&history[1..]), vec![29.0 / 3.0, 10.0]);
        assert_eq!(history[2].date, 3);
        assert_eq!(
            history[2].attempts,
            dated(&[(10.0, 1), (12.0, 2), (8.0, 3)])
        );
    }

    #[test]
    fn test_average_progression_trims() {
        let attempts = dated(&[(5.0, 1), (1.0, 2), (9.0, 3), (2.0, 4), (8.0, 5)]);
        let history = progression(&attempts, Statistic::Average(5), None);

        assert_eq!(history.len(), 1);
        assert!((history[0].value - 5.0).abs() < 1e-9);
        assert_eq!(history[0].attempts.len(), 5);
    }

    #[test]
    fn test_average_insufficient_data() {
        let attempts = dated(&[(1.0, 1), (2.0, 2)]);
        assert!(progression(&attempts, Statistic::Average(5), None).is_empty());

        let attempts = dated(&[(1.0, 1), (2.0, 2), (3.0, 3)]);
        assert!(progression(&attempts, Statistic::Average(3), Some(2)).is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(progression(&[], Statistic::Single, None).is_empty());
        let attempts = dated(&[(1.0, 10)]);
        assert!(progression(&attempts, Statistic::Single, Some(5)).is_empty());
    }

    #[test]
    fn test_strictly_decreasing_chronologically() {
        let attempts: Vec<Attempt> = (0..60)
            .map(|i| Attempt::new(((i * 53) % 23) as f64 + 10.0 - i as f64 * 0.1, Some(i)))
            .collect();

        for statistic in [Statistic::Single, Statistic::Average(5), Statistic::Average(12)] {
            let mut history = progression(&attempts, statistic, None);
            history.reverse();
            for pair in history.windows(2) {
                assert!(pair[1].value < pair[0].value);
                assert!(pair[1].date >= pair[0].date);
            }
            for m in &history {
                assert_eq!(m.attempts.len(), statistic.window_size());
            }
        }
    }

    #[test]
    fn test_unknown_kind_is_empty() {
        let attempts = dated(&[(1.0, 1), (2.0, 2), (3.0, 3)]);
        assert!(progression_for_kind(&attempts, "ao7", None).is_empty());
        assert_eq!(progression_for_kind(&attempts, "ao3", None).len(), 1);
    }

    #[test]
    fn test_idempotent() {
        let attempts = dated(&[(3.0, 3), (1.0, 1), (2.0, 2), (0.5, 4)]);
        assert_eq!(
            progression(&attempts, Statistic::Average(3), Some(4)),
            progression(&attempts, Statistic::Average(3), Some(4))
        );
    }
}
