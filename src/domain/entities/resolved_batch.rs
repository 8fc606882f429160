//! Ordered result of a batch resolution.

use std::collections::HashMap;

/// Identifier to display URL mapping that remembers first-insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedBatch {
    entries: Vec<(String, String)>,
    positions: HashMap<String, usize>,
}

impl ResolvedBatch {
    /// Creates an empty batch with room for `capacity` identifiers.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            positions: HashMap::with_capacity(capacity),
        }
    }

    /// Records a URL. A repeated identifier keeps its first position.
    pub fn insert(&mut self, identifier: String, url: String) {
        if let Some(&position) = self.positions.get(&identifier) {
            self.entries[position].1 = url;
            return;
        }
        self.positions.insert(identifier.clone(), self.entries.len());
        self.entries.push((identifier, url));
    }

    /// Returns the URL resolved for `identifier`.
    #[must_use]
    pub fn get(&self, identifier: &str) -> Option<&str> {
        self.positions
            .get(identifier)
            .map(|&position| self.entries[position].1.as_str())
    }

    /// Returns the number of distinct identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the batch is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(identifier, url)` pairs in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(identifier, url)| (identifier.as_str(), url.as_str()))
    }
}

impl IntoIterator for ResolvedBatch {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
