//! Index-type behaviour, selected once per resolution pass.
//!
//! `IndexStrategy` decides whether entries are keyed by id or label and
//! whether an alias is emitted. `IndexResolution` is the full id/label table
//! of the index type, fetched before any slice so that every fetcher can
//! translate ids without depending on what other fetchers have seen.

use pd_api::DataClient;
use pd_core::{Config, Identifier, IndexKeying};
use std::collections::HashMap;

/// Keying and aliasing policy of one index type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexStrategy {
    index_type: String,
    keying: IndexKeying,
    alias_label: Option<String>,
}

impl IndexStrategy {
    /// Select the strategy configured for `index_type`
    pub fn select(index_type: &str, config: &Config) -> Self {
        let policy = config.index_policy(index_type);
        let alias_label = match policy.keying {
            IndexKeying::Id => policy.alias_label,
            IndexKeying::Label => None,
        };
        Self {
            index_type: index_type.to_string(),
            keying: policy.keying,
            alias_label,
        }
    }

    pub fn index_type(&self) -> &str {
        &self.index_type
    }

    pub fn keying(&self) -> IndexKeying {
        self.keying
    }

    /// Label of the id-to-display-label alias, if one is emitted
    pub fn alias_label(&self) -> Option<&str> {
        self.alias_label.as_deref()
    }

    /// Canonical key of an entity known by both id and label.
    ///
    /// Returns `None` when the field this strategy keys by is empty.
    pub fn key<'a>(&self, id: &'a str, label: &'a str) -> Option<&'a str> {
        let key = match self.keying {
            IndexKeying::Id => id,
            IndexKeying::Label => label,
        };
        if key.is_empty() {
            None
        } else {
            Some(key)
        }
    }

    /// Canonical key of an entity known only by id
    pub fn key_for_id<'a>(&self, id: &'a str, resolution: &'a IndexResolution) -> Option<&'a str> {
        match self.keying {
            IndexKeying::Id => Some(id),
            IndexKeying::Label => resolution.label_of(id),
        }
    }
}

/// Every known entity of the index type, in catalog order
#[derive(Debug, Clone, Default)]
pub struct IndexResolution {
    entries: Vec<Identifier>,
    label_by_id: HashMap<String, String>,
    position_by_id: HashMap<String, usize>,
}

impl IndexResolution {
    pub fn from_identifiers(entries: Vec<Identifier>) -> Self {
        let mut label_by_id = HashMap::with_capacity(entries.len());
        let mut position_by_id = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            label_by_id
                .entry(entry.id.clone())
                .or_insert_with(|| entry.label.clone());
            position_by_id.entry(entry.id.clone()).or_insert(i);
        }
        Self {
            entries,
            label_by_id,
            position_by_id,
        }
    }

    /// Fetch the identifiers of `index_type`.
    ///
    /// A failed lookup yields an empty resolution: label translation then
    /// degrades instead of failing the pass.
    pub async fn resolve(client: &DataClient, index_type: &str) -> Self {
        match client.dimension_identifiers(index_type).await {
            Ok(entries) => {
                let resolution = Self::from_identifiers(entries);
                if resolution.is_empty() {
                    log::warn!("Index type '{}' has no known identifiers", index_type);
                } else {
                    log::debug!(
                        "index type '{}' resolved to {} identifiers",
                        index_type,
                        resolution.len()
                    );
                }
                resolution
            }
            Err(e) => {
                log::warn!(
                    "Could not resolve identifiers of index type '{}': {}",
                    index_type,
                    e
                );
                Self::default()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn label_of(&self, id: &str) -> Option<&str> {
        self.label_by_id
            .get(id)
            .map(String::as_str)
            .filter(|l| !l.is_empty())
    }

    /// Sort ids into catalog order. The sort is stable: ids unknown to the
    /// catalog follow, in their incoming order.
    pub fn sort_ids(&self, ids: &mut [String]) {
        ids.sort_by_key(|id| self.position_by_id.get(id).copied().unwrap_or(usize::MAX));
    }
}

#[cfg(test)]
#[path = "index_test.rs"]
mod tests;
