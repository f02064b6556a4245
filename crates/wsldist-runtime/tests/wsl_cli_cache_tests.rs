//! End-to-end tests of the distribution cache over `WslCli`.
//!
//! A shell script stands in for `wsl.exe`, so these run on Unix only.
#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tempfile::TempDir;
use tokio::runtime::Handle;
use wsldist_core::ports::{ChangeCounter, DistributionLister, ListingError, NetworkProbe};
use wsldist_core::{DistributionCache, DistributionError, Settings};
use wsldist_runtime::{ExternalChangesTracker, WslCli};

/// Scripts are written and executed under this lock. Spawning while another
/// test thread holds a script open for writing fails with ETXTBSY.
static SCRIPT_LOCK: Mutex<()> = Mutex::new(());

fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

const HELP: &str = r#"  "--help") printf 'Usage: wsl.exe\n  --list, -l\n    --verbose, -v\n    --quiet, -q\n' ;;"#;

fn fake_wsl(dir: &Path, verbose_branch: &str) -> PathBuf {
    let body = format!(
        r#"case "$*" in
{HELP}
  "--list --verbose") {verbose_branch} ;;
  "--list --quiet") printf 'Ubuntu\nDebian\n' ;;
  "-d Ubuntu -e hostname -I") printf '172.28.1.5 \n' ;;
  "-d Ubuntu -e ip route show default") printf 'default via 172.28.0.1 dev eth0\n' ;;
  *) echo "unexpected: $*"; exit 1 ;;
esac
"#
    );
    write_script(dir, "wsl.exe", &body)
}

fn cache_over(cli: Arc<WslCli>, changes: Arc<ExternalChangesTracker>) -> Arc<DistributionCache> {
    Arc::new(DistributionCache::new(
        cli,
        changes,
        Settings::default(),
        Handle::current(),
    ))
}

fn names(cache: &DistributionCache) -> Vec<(String, Option<u8>)> {
    cache
        .installed_distributions()
        .unwrap()
        .iter()
        .map(|d| (d.ms_id().to_string(), d.version()))
        .collect()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_verbose_listing_through_script() {
    let _lock = SCRIPT_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    let dir = TempDir::new().unwrap();
    let wsl = fake_wsl(
        dir.path(),
        r"printf '  NAME      STATE     VERSION\n* Ubuntu    Running   2\n  Debian    Stopped   1\n'",
    );

    let cli = Arc::new(WslCli::with_executables(
        wsl.to_string_lossy(),
        "/nonexistent/wslconfig.exe",
    ));
    let profile = cli.host_profile();
    assert!(profile.tool_flags.is_some_and(|f| f.verbose && f.quiet));

    let cache = cache_over(cli, Arc::new(ExternalChangesTracker::new()));
    assert_eq!(
        names(&cache),
        vec![
            ("Ubuntu".to_string(), Some(2)),
            ("Debian".to_string(), Some(1))
        ]
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_unreadable_verbose_output_falls_back_to_quiet() {
    let _lock = SCRIPT_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    let dir = TempDir::new().unwrap();
    let wsl = fake_wsl(dir.path(), r"printf 'Error: 0x8007019e WSL is not installed\n'");

    let cli = Arc::new(WslCli::with_executables(
        wsl.to_string_lossy(),
        "/nonexistent/wslconfig.exe",
    ));
    assert!(matches!(
        cli.list_with_versions(),
        Err(ListingError::Parse { .. })
    ));

    let cache = cache_over(cli, Arc::new(ExternalChangesTracker::new()));
    assert_eq!(
        names(&cache),
        vec![("Ubuntu".to_string(), None), ("Debian".to_string(), None)]
    );
}

const NO_DISTRIBUTIONS: &str = r"printf 'Windows Subsystem for Linux has no installed distributions.\nUse wsl.exe --list --online to list available distributions\n'";

fn empty_host_wsl(dir: &Path, exit_code: u8) -> PathBuf {
    let body = format!(
        r#"case "$*" in
{HELP}
  "--list --verbose"|"--list --quiet") {NO_DISTRIBUTIONS}; exit {exit_code} ;;
  *) echo "unexpected: $*"; exit 1 ;;
esac
"#
    );
    write_script(dir, "wsl.exe", &body)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_host_without_distributions_lists_nothing() {
    let _lock = SCRIPT_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    let dir = TempDir::new().unwrap();
    let wsl = empty_host_wsl(dir.path(), 0);

    let cli = Arc::new(WslCli::with_executables(
        wsl.to_string_lossy(),
        "/nonexistent/wslconfig.exe",
    ));
    assert!(cli.list_names().unwrap().is_empty());

    let cache = cache_over(cli, Arc::new(ExternalChangesTracker::new()));
    assert!(cache.installed_distributions().unwrap().is_empty());
    assert!(cache.cached_distributions().unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_no_distributions_banner_with_failing_status_lists_nothing() {
    let _lock = SCRIPT_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    let dir = TempDir::new().unwrap();
    let wsl = empty_host_wsl(dir.path(), 1);

    let cli = Arc::new(WslCli::with_executables(
        wsl.to_string_lossy(),
        "/nonexistent/wslconfig.exe",
    ));
    assert!(cli.list_with_versions().unwrap().is_empty());
    assert!(cli.list_names().unwrap().is_empty());

    let cache = cache_over(cli, Arc::new(ExternalChangesTracker::new()));
    let listed = cache.installed_distributions_async().await.unwrap();
    assert!(listed.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_failing_tool_surfaces_through_async_call() {
    let _lock = SCRIPT_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    let dir = TempDir::new().unwrap();
    let wsl = write_script(dir.path(), "wsl.exe", "echo 'WSL is not enabled'\nexit 4\n");

    let cli = Arc::new(WslCli::with_executables(
        wsl.to_string_lossy(),
        "/nonexistent/wslconfig.exe",
    ));
    let cache = cache_over(cli, Arc::new(ExternalChangesTracker::new()));

    let err = cache.installed_distributions_async().await.unwrap_err();
    match err {
        DistributionError::Listing(ListingError::Execution { command, reason }) => {
            assert!(command.ends_with("--list --quiet"));
            assert!(reason.contains("exit code 4"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_change_tracker_invalidates_snapshot() {
    let _lock = SCRIPT_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    let dir = TempDir::new().unwrap();
    let state = dir.path().join("installed");
    fs::write(&state, "Ubuntu\n").unwrap();
    let wsl = write_script(
        dir.path(),
        "wsl.exe",
        &format!(
            "case \"$*\" in\n  \"--list --verbose\") exit 1 ;;\n  \"--list --quiet\") cat '{}' ;;\n  *) exit 1 ;;\nesac\n",
            state.display()
        ),
    );

    let cli = Arc::new(WslCli::with_executables(
        wsl.to_string_lossy(),
        "/nonexistent/wslconfig.exe",
    ));
    let changes = Arc::new(ExternalChangesTracker::new());
    let cache = cache_over(cli, Arc::clone(&changes));

    let first = cache.installed_distributions().unwrap();
    assert_eq!(first.len(), 1);

    fs::write(&state, "Ubuntu\nAlpine\n").unwrap();
    let unchanged = cache.installed_distributions().unwrap();
    assert!(Arc::ptr_eq(&first, &unchanged));

    changes.increment();
    assert_eq!(changes.modification_count(), 1);
    let refreshed = cache.installed_distributions().unwrap();
    assert_eq!(refreshed.len(), 2);
    assert!(Arc::ptr_eq(&first[0], &refreshed[0]));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_network_addresses_through_script() {
    let _lock = SCRIPT_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    let dir = TempDir::new().unwrap();
    let wsl = fake_wsl(dir.path(), "exit 1");

    let cli = Arc::new(WslCli::with_executables(
        wsl.to_string_lossy(),
        "/nonexistent/wslconfig.exe",
    ));
    let cache = cache_over(Arc::clone(&cli), Arc::new(ExternalChangesTracker::new()));
    let ubuntu = cache.get_or_create_distribution("Ubuntu").unwrap();

    let probe: &dyn NetworkProbe = cli.as_ref();
    assert_eq!(ubuntu.wsl_ip(probe).unwrap().to_string(), "172.28.1.5");
    assert_eq!(ubuntu.host_ip(probe).unwrap().to_string(), "172.28.0.1");
    assert!(cli.wsl_ip("Debian").is_err());
}
