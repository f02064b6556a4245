//! Command execution for the WSL tools.
//!
//! Output is decoded with [`decode_output`] because `wsl.exe` writes
//! UTF-16LE unless told otherwise.

use std::process::{Command, Output};

use tracing::debug;
use wsldist_core::ports::ListingError;

use crate::wsl::decode_output;

/// Command line as shown in logs and errors.
pub fn describe(program: &str, args: &[&str]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{program} {}", args.join(" "))
    }
}

fn spawn(program: &str, args: &[&str]) -> Result<Output, ListingError> {
    let mut cmd = Command::new(program);
    cmd.args(args).env("WSL_UTF8", "1");

    #[cfg(windows)]
    {
        use std::os::windows::process::CommandExt;
        const CREATE_NO_WINDOW: u32 = 0x0800_0000;
        cmd.creation_flags(CREATE_NO_WINDOW);
    }

    debug!(command = %describe(program, args), "Running");
    cmd.output()
        .map_err(|e| ListingError::execution(describe(program, args), e.to_string()))
}

/// Run a command and return its decoded stdout.
///
/// A spawn failure or non-zero exit status is an execution error.
pub fn run_command(program: &str, args: &[&str]) -> Result<String, ListingError> {
    run_command_accepting(program, args, |_| false)
}

/// Like [`run_command`], but a non-zero exit whose stdout satisfies
/// `accept_failure` returns that stdout instead of an error.
pub fn run_command_accepting(
    program: &str,
    args: &[&str],
    accept_failure: impl Fn(&str) -> bool,
) -> Result<String, ListingError> {
    let output = spawn(program, args)?;

    if !output.status.success() {
        let stderr = decode_output(&output.stderr);
        let stdout = decode_output(&output.stdout);
        if accept_failure(&stdout) {
            debug!(
                command = %describe(program, args),
                status = ?output.status.code(),
                "Accepting output of failed command"
            );
            return Ok(stdout);
        }
        // wsl.exe reports most failures on stdout
        let detail = if stderr.trim().is_empty() {
            stdout
        } else {
            stderr
        };
        let reason = match output.status.code() {
            Some(code) => format!("exit code {code}: {}", detail.trim()),
            None => format!("terminated by signal: {}", detail.trim()),
        };
        return Err(ListingError::execution(describe(program, args), reason));
    }

    Ok(decode_output(&output.stdout))
}

/// Run a command and return stdout followed by stderr, whatever the exit status.
///
/// For help texts, which some `wsl.exe` builds print with a failing status.
pub fn capture_output(program: &str, args: &[&str]) -> Result<String, ListingError> {
    let output = spawn(program, args)?;
    let mut text = decode_output(&output.stdout);
    text.push('\n');
    text.push_str(&decode_output(&output.stderr));
    Ok(text)
}
