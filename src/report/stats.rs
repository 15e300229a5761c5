//! Frequency counting with stable ranking.

use std::collections::HashMap;

/// Counts occurrences of string labels and ranks them by count.
///
/// Ranking is stable: labels with equal counts keep the order in
/// which they were first seen, so repeated runs over the same input
/// always produce the same report.
#[derive(Debug, Default)]
pub struct FrequencyTable {
    entries: Vec<(String, u64)>,
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, label: &str) {
        match self.index.get(label) {
            Some(&position) => self.entries[position].1 += 1,
            None => {
                self.index.insert(label.to_string(), self.entries.len());
                self.entries.push((label.to_string(), 1));
            }
        }
    }

    /// Number of distinct labels seen.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The `n` most frequent labels, most frequent first. Ties keep
    /// first-seen order.
    pub fn top(&self, n: usize) -> Vec<(&str, u64)> {
        let mut ranked: Vec<&(String, u64)> = self.entries.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
            .into_iter()
            .take(n)
            .map(|(label, count)| (label.as_str(), *count))
            .collect()
    }
}
