//! @ai:module:intent Group attempts into categories and expose their statistics
//! @ai:module:layer application
//! @ai:module:public_api Category, CategorySummary, WindowBest, CategorySet, aggregate
//! @ai:module:depends_on attempt, window, progression, error

use crate::attempt::Attempt;
use crate::error::{Error, Result};
use crate::progression::{progression, progression_for_kind, Milestone};
use crate::window::{best_single, best_window_average, Statistic};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// @ai:intent Best average for one window size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowBest {
    pub window: usize,
    pub value: Option<f64>,
}

/// @ai:intent Best single and best averages of a category, optionally as of a cutoff
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub key: String,
    pub label: String,
    pub attempt_count: usize,
    pub single: Option<f64>,
    pub averages: Vec<WindowBest>,
}

impl CategorySummary {
    /// @ai:intent Look up the value reported for a statistic
    /// @ai:effects pure
    pub fn value(&self, statistic: Statistic) -> Option<f64> {
        match statistic {
            Statistic::Single => self.single,
            Statistic::Average(n) => self
                .averages
                .iter()
                .find(|w| w.window == n)
                .and_then(|w| w.value),
        }
    }
}

/// @ai:intent One group of attempts with its all-time statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    key: String,
    label: String,
    attempts: Vec<Attempt>,
    all_time: CategorySummary,
}

impl Category {
    /// @ai:intent Build a category and compute its all-time statistics once
    /// @ai:pre windows are positive
    /// @ai:effects pure
    pub fn new(key: String, label: String, attempts: Vec<Attempt>, windows: &[usize]) -> Self {
        let all_time = summarize(&key, &label, &attempts, windows, None);
        Self {
            key,
            label,
            attempts,
            all_time,
        }
    }

    /// Group key from the export, unique within one parse.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Attempts in input order.
    pub fn attempts(&self) -> &[Attempt] {
        &self.attempts
    }

    pub fn best_single(&self) -> Option<f64> {
        self.all_time.single
    }

    /// Best average for `n` over the full attempt list. Windows not configured
    /// at construction are computed on demand.
    pub fn best_average(&self, n: usize) -> Option<f64> {
        match self.all_time.averages.iter().find(|w| w.window == n) {
            Some(w) => w.value,
            None => best_window_average(&durations(&self.attempts, None), n),
        }
    }

    pub fn all_time(&self) -> &CategorySummary {
        &self.all_time
    }

    /// @ai:intent Statistics over the attempts known at `cutoff`, recomputed from the stored list
    /// @ai:effects pure
    pub fn summary(&self, windows: &[usize], cutoff: Option<i64>) -> CategorySummary {
        summarize(&self.key, &self.label, &self.attempts, windows, cutoff)
    }

    /// @ai:intent PB progression for a statistic, most recent first
    /// @ai:effects pure
    pub fn history(&self, statistic: Statistic, cutoff: Option<i64>) -> Vec<Milestone> {
        progression(&self.attempts, statistic, cutoff)
    }

    /// @ai:intent PB progression for a kind string; unknown kinds give an empty list
    /// @ai:effects pure
    pub fn history_for_kind(&self, kind: &str, cutoff: Option<i64>) -> Vec<Milestone> {
        progression_for_kind(&self.attempts, kind, cutoff)
    }
}

fn durations(attempts: &[Attempt], cutoff: Option<i64>) -> Vec<f64> {
    attempts
        .iter()
        .filter(|a| a.is_within(cutoff))
        .map(|a| a.duration)
        .collect()
}

fn summarize(
    key: &str,
    label: &str,
    attempts: &[Attempt],
    windows: &[usize],
    cutoff: Option<i64>,
) -> CategorySummary {
    let times = durations(attempts, cutoff);

    CategorySummary {
        key: key.to_string(),
        label: label.to_string(),
        attempt_count: times.len(),
        single: best_single(&times),
        averages: windows
            .iter()
            .map(|&window| WindowBest {
                window,
                value: best_window_average(&times, window),
            })
            .collect(),
    }
}

/// @ai:intent Build one category per non-empty group, labelled from the lookup table
/// @ai:post groups with no valid attempts are dropped
/// @ai:post output order follows input order
/// @ai:effects pure
pub fn aggregate<I>(groups: I, labels: &HashMap<String, String>, windows: &[usize]) -> Vec<Category>
where
    I: IntoIterator<Item = (String, Vec<Attempt>)>,
{
    groups
        .into_iter()
        .filter_map(|(key, attempts)| {
            if attempts.is_empty() {
                tracing::debug!("Dropping group {} with no valid attempts", key);
                return None;
            }
            let label = labels.get(&key).cloned().unwrap_or_else(|| key.clone());
            Some(Category::new(key, label, attempts, windows))
        })
        .collect()
}

/// @ai:intent Owned collection of categories from one parse
///
/// Mutation takes `&mut self`, so no statistic call can observe a
/// half-updated list.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CategorySet {
    windows: Vec<usize>,
    categories: Vec<Category>,
}

impl CategorySet {
    /// @ai:intent Create a set from normalized groups
    /// @ai:effects pure
    pub fn from_groups<I>(groups: I, labels: &HashMap<String, String>, windows: Vec<usize>) -> Self
    where
        I: IntoIterator<Item = (String, Vec<Attempt>)>,
    {
        let categories = aggregate(groups, labels, &windows);
        Self {
            windows,
            categories,
        }
    }

    pub fn windows(&self) -> &[usize] {
        &self.windows
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    /// @ai:intent Find a category by group key, falling back to its display label
    /// @ai:effects pure
    pub fn get(&self, id: &str) -> Option<&Category> {
        self.position(id).map(|i| &self.categories[i])
    }

    /// @ai:intent Like `get`, but an unknown id is an error
    pub fn require(&self, id: &str) -> Result<&Category> {
        self.get(id)
            .ok_or_else(|| Error::UnknownCategory(id.to_string()))
    }

    /// @ai:intent Remove a category by group key or label, leaving the others untouched
    /// @ai:effects mutates self
    pub fn remove(&mut self, id: &str) -> Result<Category> {
        let index = self
            .position(id)
            .ok_or_else(|| Error::UnknownCategory(id.to_string()))?;
        let removed = self.categories.remove(index);
        tracing::info!("Removed category {}", removed.label);
        Ok(removed)
    }

    /// @ai:intent Remove every listed category, returning the ids that matched nothing
    /// @ai:effects mutates self
    pub fn exclude<'a, I>(&mut self, ids: I) -> Vec<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        ids.into_iter()
            .filter(|id| self.remove(id).is_err())
            .collect()
    }

    /// @ai:intent Summaries for every category as of `cutoff`
    /// @ai:effects pure
    pub fn summaries(&self, cutoff: Option<i64>) -> Vec<CategorySummary> {
        self.categories
            .iter()
            .map(|c| match cutoff {
                None => c.all_time().clone(),
                Some(_) => c.summary(&self.windows, cutoff),
            })
            .collect()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.categories
            .iter()
            .position(|c| c.key == id)
            .or_else(|| self.categories.iter().position(|c| c.label == id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::STANDARD_WINDOWS;
    use pretty_assertions::assert_eq;

    fn attempts(pairs: &[(f64, i64)]) -> Vec<Attempt> {
        pairs.iter().map(|&(d, t)| Attempt::new(d, Some(t))).collect()
    }

    fn sample_set() -> CategorySet {
        let labels = HashMap::from([("session1".to_string(), "3x3".to_string())]);
        let groups = vec![
            (
                "session1".to_string(),
                attempts(&[(10.0, 100), (8.0, 200), (12.0, 300)]),
            ),
            ("session2".to_string(), vec![]),
            (
                "session3".to_string(),
                attempts(&[(40.0, 10), (35.0, 20), (50.0, 30), (30.0, 40), (45.0, 50)]),
            ),
        ];
        CategorySet::from_groups(groups, &labels, STANDARD_WINDOWS.to_vec())
    }

    #[test]
    fn test_aggregate_labels_and_drops_empty() {
        let set = sample_set();
        let labels: Vec<_> = set.iter().map(|c| c.label().to_string()).collect();

        assert_eq!(labels, vec!["3x3".to_string(), "session3".to_string()]);
    }

    #[test]
    fn test_all_time_statistics() {
        let set = sample_set();
        let cube = set.get("3x3").unwrap();

        assert_eq!(cube.best_single(), Some(8.0));
        assert_eq!(cube.best_average(3), Some(10.0));
        assert_eq!(cube.best_average(5), None);

        let big = set.get("session3").unwrap();
        // sorted [30, 35, 40, 45, 50] -> trimmed mean of 35, 40, 45
        assert_eq!(big.best_average(5), Some(40.0));
        assert_eq!(big.all_time().value(Statistic::Average(100)), None);
    }

    #[test]
    fn test_best_average_unconfigured_window() {
        let set = sample_set();
        let big = set.get("session3").unwrap();
        assert_eq!(big.best_average(2), Some(37.5));
    }

    #[test]
    fn test_summary_with_cutoff_recomputes() {
        let set = sample_set();
        let cube = set.get("session1").unwrap();

        let early = cube.summary(&[3], Some(200));
        assert_eq!(early.attempt_count, 2);
        assert_eq!(early.single, Some(8.0));
        assert_eq!(early.value(Statistic::Average(3)), None);

        // Cutoff never sticks to the stored category.
        assert_eq!(cube.best_average(3), Some(10.0));
        assert_eq!(cube.summary(&[3], None), {
            let mut s = cube.all_time().clone();
            s.averages.retain(|w| w.window == 3);
            s
        });
    }

    #[test]
    fn test_history_delegates() {
        let set = sample_set();
        let cube = set.get("3x3").unwrap();

        let history = cube.history(Statistic::Single, None);
        let values: Vec<f64> = history.iter().map(|m| m.value).collect();
        assert_eq!(values, vec![8.0, 10.0]);

        assert!(cube.history_for_kind("ao7", None).is_empty());
        assert_eq!(cube.history_for_kind("ao3", None).len(), 1);
    }

    #[test]
    fn test_remove_leaves_others() {
        let mut set = sample_set();
        let before = set.get("session3").unwrap().clone();

        let removed = set.remove("3x3").unwrap();
        assert_eq!(removed.key(), "session1");
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("session3").unwrap(), &before);

        assert!(matches!(set.remove("3x3"), Err(Error::UnknownCategory(_))));
    }

    #[test]
    fn test_exclude_reports_unmatched_and_keeps_going() {
        let mut set = sample_set();

        let unmatched = set.exclude(["nope", "3x3"]);
        assert_eq!(unmatched, vec!["nope"]);
        assert_eq!(set.len(), 1);
        assert!(set.get("session3").is_some());
    }

    #[test]
    fn test_summaries_as_of_cutoff() {
        let set = sample_set();
        let summaries = set.summaries(Some(20));

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].attempt_count, 0);
        assert_eq!(summaries[0].single, None);
        assert_eq!(summaries[1].single, Some(35.0));
        assert_eq!(set.summaries(None)[1].single, Some(30.0));
    }
}
