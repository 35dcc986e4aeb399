//! @ai:module:intent Best single and best rolling averages over attempt durations
//! @ai:module:layer domain
//! @ai:module:public_api Statistic, STANDARD_WINDOWS, window_average, best_window_average, best_single
//! @ai:module:stateless true

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Average window sizes the summary table reports.
pub const STANDARD_WINDOWS: [usize; 5] = [3, 5, 12, 50, 100];

/// Windows of at least this size drop their best and worst value before averaging.
pub const TRIM_THRESHOLD: usize = 5;

/// @ai:intent A statistic a caller can request: the best single or a rolling average
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Statistic {
    Single,
    Average(usize),
}

impl Statistic {
    /// @ai:intent Resolve a caller-supplied kind ("single", "ao3" .. "ao100")
    /// @ai:post None for kinds outside the closed set
    /// @ai:effects pure
    pub fn from_kind(kind: &str) -> Option<Self> {
        if kind == "single" {
            return Some(Statistic::Single);
        }

        let n: usize = kind.strip_prefix("ao")?.parse().ok()?;
        STANDARD_WINDOWS
            .contains(&n)
            .then_some(Statistic::Average(n))
    }

    /// Number of attempts a single value of this statistic is built from.
    pub fn window_size(&self) -> usize {
        match self {
            Statistic::Single => 1,
            Statistic::Average(n) => *n,
        }
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statistic::Single => write!(f, "single"),
            Statistic::Average(n) => write!(f, "ao{}", n),
        }
    }
}

/// Serializes as its kind string (`"single"`, `"ao5"`).
impl Serialize for Statistic {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl FromStr for Statistic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Statistic::from_kind(&s.to_ascii_lowercase())
            .ok_or_else(|| format!("unknown statistic '{}', expected single or ao3/ao5/ao12/ao50/ao100", s))
    }
}

/// @ai:intent Average one window, trimming best and worst when the window is large enough
/// @ai:pre window is non-empty
/// @ai:example ([5, 1, 9, 2, 8]) -> 5.0
/// @ai:example ([10, 8, 12]) -> 10.0
/// @ai:effects pure
pub fn window_average(window: &[f64]) -> f64 {
    if window.len() >= TRIM_THRESHOLD {
        let mut sorted = window.to_vec();
        sorted.sort_by(f64::total_cmp);
        let kept = &sorted[1..sorted.len() - 1];
        kept.iter().sum::<f64>() / kept.len() as f64
    } else {
        window.iter().sum::<f64>() / window.len() as f64
    }
}

/// @ai:intent Find the lowest window average over every offset of `durations`, in input order
/// @ai:post None when durations.len() < n or n == 0
/// @ai:complexity O(len * n log n)
/// @ai:effects pure
pub fn best_window_average(durations: &[f64], n: usize) -> Option<f64> {
    if n == 0 || durations.len() < n {
        return None;
    }

    durations
        .windows(n)
        .map(window_average)
        .fold(None, |best: Option<f64>, avg| match best {
            Some(b) if b <= avg => Some(b),
            _ => Some(avg),
        })
}

/// @ai:intent Fastest single duration
/// @ai:effects pure
pub fn best_single(durations: &[f64]) -> Option<f64> {
    durations.iter().copied().reduce(f64::min)
}

/// @ai:intent Evaluate any statistic over durations in input order
/// @ai:effects pure
pub fn best_of(durations: &[f64], statistic: Statistic) -> Option<f64> {
    match statistic {
        Statistic::Single => best_single(durations),
        Statistic::Average(n) => best_window_average(durations, n),
    }
}
