use anyhow::{Result, bail};
use cmdb_application::DashboardState;
use colored::Colorize;

pub async fn run(state: &DashboardState, styled: bool) -> Result<()> {
    let health = state.health().await?;
    let version = health.version.as_deref().unwrap_or("unknown");
    let line = format!("{} (version {})", health.status, version);

    if !health.is_healthy() {
        bail!("backend reports {line}");
    }
    if styled {
        println!("{}", line.green());
    } else {
        println!("{line}");
    }
    Ok(())
}
