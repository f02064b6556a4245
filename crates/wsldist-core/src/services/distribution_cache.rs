//! Cached view of installed WSL distributions.
//!
//! The cache holds one immutable snapshot behind an atomically swapped
//! pointer. A snapshot is valid while the external change counter still has
//! the value it was captured with; there is no time-based expiry.
//!
//! Refreshes are single-flight: stale readers queue on a mutex, and the
//! first one through re-enumerates while the rest find a fresh snapshot on
//! the second check.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use arc_swap::ArcSwapOption;
use futures_util::FutureExt;
use futures_util::future::{self, BoxFuture};
use tokio::runtime::Handle;
use tracing::{debug, error, warn};

use super::distribution_registry::DistributionRegistry;
use super::listing_mode::{ListingMode, select_listing_mode};
use crate::domain::Distribution;
use crate::ports::{ChangeCounter, DistributionError, DistributionLister};
use crate::settings::Settings;

/// Cheaply clonable list of installed distributions.
pub type DistributionList = Arc<[Arc<Distribution>]>;

#[derive(Debug)]
struct CachedDistributions {
    distributions: DistributionList,
    external_changes_count: u64,
}

impl CachedDistributions {
    fn is_up_to_date(&self, changes: &dyn ChangeCounter) -> bool {
        changes.modification_count() == self.external_changes_count
    }
}

/// Clears the background refresh flag when dropped, including on unwind.
struct BackgroundRefreshDone<'a>(&'a AtomicBool);

impl Drop for BackgroundRefreshDone<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Lazily refreshed, event-invalidated list of installed distributions.
///
/// Construct one per application at the composition root and share it as
/// `Arc<DistributionCache>`. The blocking methods run external processes and
/// must not be called from latency-sensitive threads; use
/// [`installed_distributions_async`](Self::installed_distributions_async) or
/// [`cached_distributions`](Self::cached_distributions) there.
pub struct DistributionCache {
    lister: Arc<dyn DistributionLister>,
    changes: Arc<dyn ChangeCounter>,
    settings: Settings,
    runtime: Handle,
    registry: DistributionRegistry,
    installed: ArcSwapOption<CachedDistributions>,
    refresh_lock: Mutex<()>,
    background_refresh: AtomicBool,
}

impl fmt::Debug for DistributionCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DistributionCache")
            .field("settings", &self.settings)
            .field("registry", &self.registry)
            .field("installed", &self.installed.load_full())
            .finish_non_exhaustive()
    }
}

impl DistributionCache {
    /// Create an empty cache.
    ///
    /// `runtime` is the pool background refreshes are scheduled on.
    pub fn new(
        lister: Arc<dyn DistributionLister>,
        changes: Arc<dyn ChangeCounter>,
        settings: Settings,
        runtime: Handle,
    ) -> Self {
        Self {
            lister,
            changes,
            settings,
            runtime,
            registry: DistributionRegistry::new(),
            installed: ArcSwapOption::empty(),
            refresh_lock: Mutex::new(()),
            background_refresh: AtomicBool::new(false),
        }
    }

    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The current list if it is up to date, without blocking.
    ///
    /// On a cold or stale cache this returns `None` and schedules a refresh
    /// in the background, so a later call can answer from the cache.
    pub fn cached_distributions(self: &Arc<Self>) -> Option<DistributionList> {
        if let Some(distributions) = self.fresh_snapshot() {
            return Some(distributions);
        }

        if self
            .background_refresh
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            let cache = Arc::clone(self);
            drop(self.runtime.spawn_blocking(move || {
                let _done = BackgroundRefreshDone(&cache.background_refresh);
                if let Err(e) = cache.installed_distributions() {
                    warn!(error = %e, "Background distribution refresh failed");
                }
            }));
        } else {
            debug!("Background distribution refresh already scheduled");
        }
        None
    }

    /// Installed distributions, enumerating them if the snapshot is stale.
    ///
    /// Blocks on external processes when a refresh is needed. Concurrent
    /// callers share one enumeration.
    pub fn installed_distributions(&self) -> Result<DistributionList, DistributionError> {
        if let Some(distributions) = self.fresh_snapshot() {
            return Ok(distributions);
        }

        let _guard = self
            .refresh_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        // Another caller may have refreshed while we waited.
        if let Some(distributions) = self.fresh_snapshot() {
            debug!("Distribution snapshot refreshed by a concurrent caller");
            return Ok(distributions);
        }

        // Captured before enumerating: a change during the listing leaves the
        // new snapshot already stale.
        let external_changes_count = self.changes.modification_count();
        let distributions: DistributionList = self.load_installed_distributions()?.into();
        debug!(
            count = distributions.len(),
            external_changes_count, "Published distribution snapshot"
        );
        self.installed.store(Some(Arc::new(CachedDistributions {
            distributions: Arc::clone(&distributions),
            external_changes_count,
        })));
        Ok(distributions)
    }

    /// Installed distributions without blocking the caller.
    ///
    /// Resolves immediately when the snapshot is fresh; otherwise the refresh
    /// runs on the blocking pool. Dropping the future does not cancel it.
    pub fn installed_distributions_async(
        self: &Arc<Self>,
    ) -> BoxFuture<'static, Result<DistributionList, DistributionError>> {
        if let Some(distributions) = self.fresh_snapshot() {
            return future::ready(Ok(distributions)).boxed();
        }

        let cache = Arc::clone(self);
        self.runtime
            .spawn_blocking(move || cache.installed_distributions())
            .map(|joined| {
                joined.unwrap_or_else(|e| Err(DistributionError::Background(e.to_string())))
            })
            .boxed()
    }

    /// Distribution instance for `ms_id`, reused across calls.
    ///
    /// The returned distribution is not necessarily installed; check
    /// [`installed_distributions`](Self::installed_distributions) for that.
    pub fn get_or_create_distribution(
        &self,
        ms_id: &str,
    ) -> Result<Arc<Distribution>, DistributionError> {
        self.registry.get_or_create(ms_id, false)
    }

    /// Like [`get_or_create_distribution`](Self::get_or_create_distribution),
    /// optionally replacing a cached entry whose case differs from `ms_id`.
    pub fn get_or_create_distribution_with_case(
        &self,
        ms_id: &str,
        override_case: bool,
    ) -> Result<Arc<Distribution>, DistributionError> {
        self.registry.get_or_create(ms_id, override_case)
    }

    /// Previously seen distribution, if any.
    pub fn distribution(&self, ms_id: &str) -> Option<Arc<Distribution>> {
        self.registry.get(ms_id)
    }

    /// Drop every cached instance and the snapshot.
    pub fn dispose(&self) {
        self.registry.clear();
        self.installed.store(None);
    }

    fn fresh_snapshot(&self) -> Option<DistributionList> {
        self.installed
            .load_full()
            .filter(|cached| cached.is_up_to_date(self.changes.as_ref()))
            .map(|cached| Arc::clone(&cached.distributions))
    }

    fn load_installed_distributions(&self) -> Result<Vec<Arc<Distribution>>, DistributionError> {
        let profile = self.lister.host_profile();
        let mode = select_listing_mode(&self.settings, &profile);
        debug!(?mode, ?profile, "Listing installed distributions");

        match mode {
            ListingMode::Legacy => {
                let names = self.lister.list_legacy()?;
                return self.register_names(&names);
            }
            ListingMode::Verbose => match self.lister.list_with_versions() {
                Ok(listed) => {
                    return listed
                        .into_iter()
                        .map(|entry| -> Result<_, DistributionError> {
                            let distribution = self.registry.get_or_create(&entry.name, true)?;
                            distribution.set_version(entry.version);
                            Ok(distribution)
                        })
                        .collect();
                }
                Err(e) if e.is_parse() => {
                    error!(error = %e, "Verbose listing unreadable, falling back to names only");
                }
                Err(e) => {
                    warn!(error = %e, "Verbose listing failed, falling back to names only");
                }
            },
            ListingMode::Quiet => {}
        }

        let names = self.lister.list_names()?;
        self.register_names(&names)
    }

    fn register_names(&self, names: &[String]) -> Result<Vec<Arc<Distribution>>, DistributionError> {
        names
            .iter()
            .map(|name| self.registry.get_or_create(name, true))
            .collect()
    }
}
