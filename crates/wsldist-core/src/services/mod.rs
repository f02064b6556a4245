//! Core services.
//!
//! Services depend only on ports and are wired together by the adapter's
//! composition root.

mod distribution_cache;
mod distribution_registry;
mod listing_mode;

pub use distribution_cache::{DistributionCache, DistributionList};
pub use distribution_registry::DistributionRegistry;
pub use listing_mode::{ListingMode, select_listing_mode};
