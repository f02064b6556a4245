//! Info command handler.

use std::sync::Arc;

use anyhow::Result;
use tracing::debug;
use wsldist_core::Distribution;
use wsldist_core::ports::NetworkProbe;

use crate::bootstrap::CliContext;
use crate::error::CliError;

fn describe_version(distribution: &Distribution) -> String {
    distribution
        .version()
        .map_or_else(|| "unknown".to_string(), |v| v.to_string())
}

/// Show name, installation state, version, UNC root and addresses.
///
/// Addresses are only looked up for installed distributions, since the
/// lookup starts the distribution.
pub async fn execute(ctx: &CliContext, name: &str) -> Result<()> {
    let cache = Arc::clone(&ctx.cache);
    let installed = tokio::task::spawn_blocking(move || cache.installed_distributions())
        .await?
        .map_err(CliError::from)?;

    // After the listing so the canonical spelling is used.
    let distribution = ctx
        .cache
        .get_or_create_distribution(name)
        .map_err(CliError::from)?;
    let is_installed = installed.iter().any(|d| Arc::ptr_eq(d, &distribution));

    println!("name:      {}", distribution.ms_id());
    println!("installed: {is_installed}");
    println!("version:   {}", describe_version(&distribution));
    println!("unc root:  {}", distribution.unc_root());

    if !is_installed {
        return Ok(());
    }

    let probe: Arc<dyn NetworkProbe> = Arc::clone(&ctx.probe);
    let target = Arc::clone(&distribution);
    let (wsl_ip, host_ip) = tokio::task::spawn_blocking(move || {
        (
            target.wsl_ip(probe.as_ref()),
            target.host_ip(probe.as_ref()),
        )
    })
    .await?;

    for (label, address) in [("wsl ip:   ", wsl_ip), ("host ip:  ", host_ip)] {
        match address {
            Ok(ip) => println!("{label} {ip}"),
            Err(e) => {
                debug!(error = %e, "Address lookup failed");
                println!("{label} unavailable");
            }
        }
    }
    Ok(())
}
