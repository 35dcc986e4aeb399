//! @ai:module:intent Normalize raw timer records into valid attempts
//! @ai:module:layer domain
//! @ai:module:public_api Attempt, normalize, normalize_with, OK_CODE
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result code a timer writes for a completed attempt (no penalty, no DNF).
pub const OK_CODE: i64 = 0;

/// @ai:intent A single completed attempt
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Attempt {
    /// Duration in seconds, always > 0.
    pub duration: f64,
    /// Unix seconds; `None` when the record carried no timestamp.
    pub timestamp: Option<i64>,
}

impl Attempt {
    pub fn new(duration: f64, timestamp: Option<i64>) -> Self {
        Self {
            duration,
            timestamp,
        }
    }

    /// @ai:intent Timestamp used for ordering and cutoff filtering
    /// @ai:post missing timestamps compare as 0
    /// @ai:effects pure
    pub fn effective_timestamp(&self) -> i64 {
        self.timestamp.unwrap_or(0)
    }

    /// @ai:intent Check whether the attempt is known at the given cutoff
    /// @ai:effects pure
    pub fn is_within(&self, cutoff: Option<i64>) -> bool {
        cutoff.map_or(true, |c| self.effective_timestamp() <= c)
    }
}

/// @ai:intent Filter a decoded group into attempts using the default OK code
/// @ai:effects pure
pub fn normalize(raw_group: &Value) -> Vec<Attempt> {
    normalize_with(raw_group, OK_CODE)
}

/// @ai:intent Filter a decoded group into attempts, keeping only records with `ok_code`
/// @ai:pre raw_group is any JSON value; non-arrays yield an empty list
/// @ai:post every returned attempt has duration > 0
/// @ai:post input order is preserved
/// @ai:effects pure
pub fn normalize_with(raw_group: &Value, ok_code: i64) -> Vec<Attempt> {
    let Some(records) = raw_group.as_array() else {
        return Vec::new();
    };

    records
        .iter()
        .filter_map(|record| parse_record(record, ok_code))
        .collect()
}

/// Record shape: `[[result_code, duration_ms], scramble, comment, timestamp, ...]`.
fn parse_record(record: &Value, ok_code: i64) -> Option<Attempt> {
    let fields = record.as_array()?;
    let result = fields.first()?.as_array()?;

    // Integers may arrive in float form (`0.0`, `1700000000.0`).
    if result.first()?.as_f64()? != ok_code as f64 {
        return None;
    }

    let duration_ms = result.get(1)?.as_f64()?;
    if duration_ms <= 0.0 || !duration_ms.is_finite() {
        return None;
    }

    // A zero timestamp means "not recorded" in timer exports.
    let timestamp = fields
        .get(3)
        .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|t| t as i64)))
        .filter(|&t| t != 0);

    Some(Attempt::new(duration_ms / 1000.0, timestamp))
}
