use std::cmp::Ordering;

use icu_collator::{Collator, CollatorOptions};
use tracing::warn;

/// Compares names the way a person reads them: alphabetically first, with case only deciding
/// between names that are otherwise equal. "beta" lands between "Alpha" and "Gamma".
pub struct NameCollator {
    collator: Option<Collator>,
}

impl NameCollator {
    pub fn new() -> Self {
        let collator = Collator::try_new(&Default::default(), CollatorOptions::new())
            .inspect_err(|e| warn!("Couldn't load collation data, ignoring case instead {e}"))
            .ok();
        Self { collator }
    }

    /// Total order over names. Names the collator considers equal fall back to their bytes.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        let ordering = match &self.collator {
            Some(collator) => collator.compare(a, b),
            None => a.to_lowercase().cmp(&b.to_lowercase()),
        };
        ordering.then_with(|| a.cmp(b))
    }
}

impl Default for NameCollator {
    fn default() -> Self {
        Self::new()
    }
}
