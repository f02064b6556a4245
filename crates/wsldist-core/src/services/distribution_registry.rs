//! Case-insensitive identity map from distribution name to instance.

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use crate::domain::Distribution;
use crate::ports::DistributionError;

/// Keeps one `Arc<Distribution>` per case-insensitive name.
///
/// Keys are lower-cased names; values keep the original case. Lookups are
/// shard reads. Inserts and case overrides go through the entry API, so two
/// threads racing on the same name end up with the same instance.
#[derive(Debug, Default)]
pub struct DistributionRegistry {
    entries: DashMap<String, Arc<Distribution>>,
}

fn registry_key(ms_id: &str) -> String {
    ms_id.to_lowercase()
}

impl DistributionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a distribution without creating it.
    pub fn get(&self, ms_id: &str) -> Option<Arc<Distribution>> {
        self.entries
            .get(&registry_key(ms_id))
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Return the instance for `ms_id`, creating it on first use.
    ///
    /// With `override_case`, an existing entry whose name differs from `ms_id`
    /// only in case is replaced by a fresh instance carrying `ms_id`'s case.
    /// This is how names reported by `wsl.exe` win over caller spellings.
    pub fn get_or_create(
        &self,
        ms_id: &str,
        override_case: bool,
    ) -> Result<Arc<Distribution>, DistributionError> {
        if ms_id.is_empty() {
            return Err(DistributionError::InvalidArgument(
                "WSL msId is empty".to_string(),
            ));
        }

        let key = registry_key(ms_id);
        if let Some(existing) = self.entries.get(&key) {
            if !override_case || existing.ms_id() == ms_id {
                return Ok(Arc::clone(existing.value()));
            }
        }

        let distribution = match self.entries.entry(key) {
            Entry::Occupied(mut occupied) => {
                if override_case && occupied.get().ms_id() != ms_id {
                    debug!(
                        from = occupied.get().ms_id(),
                        to = ms_id,
                        "Replacing distribution with canonical name"
                    );
                    let replacement = Arc::new(Distribution::new(ms_id));
                    occupied.insert(Arc::clone(&replacement));
                    replacement
                } else {
                    Arc::clone(occupied.get())
                }
            }
            Entry::Vacant(vacant) => {
                let created = Arc::new(Distribution::new(ms_id));
                vacant.insert(Arc::clone(&created));
                created
            }
        };
        Ok(distribution)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}
