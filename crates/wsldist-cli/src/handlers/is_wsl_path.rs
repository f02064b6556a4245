//! Path check handler.

use wsldist_core::parse_wsl_path;

/// Print whether `path` is on the WSL share. Returns the answer so `main`
/// can turn it into an exit code.
pub fn execute(path: &str) -> bool {
    match parse_wsl_path(path) {
        Some(parsed) => {
            println!(
                "true (distribution: {}, path: {})",
                parsed.distribution, parsed.linux_path
            );
            true
        }
        None if wsldist_core::is_wsl_path(path) => {
            println!("true");
            true
        }
        None => {
            println!("false");
            false
        }
    }
}
