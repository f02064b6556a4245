//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter:
//! - Settings from `.env` files and the environment
//! - `wsl.exe` adapter and change tracker (via wsldist-runtime)
//! - The distribution cache (via wsldist-core)

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::runtime::Handle;
use tracing::debug;
use wsldist_core::ports::{ChangeCounter, DistributionLister, NetworkProbe};
use wsldist_core::{DistributionCache, Settings};
use wsldist_runtime::{ExternalChangesTracker, WslCli};

use crate::error::CliError;

/// Fully composed application context for CLI commands.
pub struct CliContext {
    /// Shared distribution cache.
    pub cache: Arc<DistributionCache>,
    /// Address lookups inside distributions.
    pub probe: Arc<dyn NetworkProbe>,
    /// Change counter the cache is invalidated by.
    pub changes: Arc<ExternalChangesTracker>,
}

impl CliContext {
    /// Tear down application services.
    pub fn shutdown(&self) {
        self.cache.dispose();
    }
}

/// `.env` file in the per-user data directory.
pub fn data_env_file() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("wsldist").join(".env"))
}

fn read_env_file(path: &Path) -> Result<Vec<(String, String)>, CliError> {
    let entries = dotenvy::from_path_iter(path)
        .map_err(|e| CliError::Config(format!("{}: {e}", path.display())))?;
    entries
        .map(|entry| entry.map_err(|e| CliError::Config(format!("{}: {e}", path.display()))))
        .collect()
}

/// Resolve settings from `.env` files and environment variables.
///
/// Later sources win: files in the given order, then `env`.
pub fn settings_from_sources<I>(env_files: &[PathBuf], env: I) -> Result<Settings, CliError>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut vars = Vec::new();
    for path in env_files.iter().filter(|p| p.is_file()) {
        debug!(path = %path.display(), "Reading settings file");
        vars.extend(read_env_file(path)?);
    }
    vars.extend(env);
    Settings::from_vars(vars).map_err(CliError::from)
}

/// Load settings from `$DATA_DIR/wsldist/.env`, `./.env` and the environment.
pub fn load_settings() -> Result<Settings, CliError> {
    let mut files: Vec<PathBuf> = data_env_file().into_iter().collect();
    files.push(PathBuf::from(".env"));
    settings_from_sources(&files, std::env::vars())
}

/// Wire the application together.
///
/// `runtime` becomes the pool background refreshes run on.
pub fn bootstrap(settings: Settings, runtime: Handle) -> CliContext {
    let cli = Arc::new(WslCli::new(&settings));
    let changes = Arc::new(ExternalChangesTracker::new());
    let lister: Arc<dyn DistributionLister> = cli.clone();
    let counter: Arc<dyn ChangeCounter> = changes.clone();
    let cache = Arc::new(DistributionCache::new(lister, counter, settings, runtime));

    CliContext {
        cache,
        probe: cli,
        changes,
    }
}
