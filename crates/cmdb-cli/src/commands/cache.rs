use anyhow::Result;
use cmdb_application::{CacheScope, DashboardState, cache};

pub async fn clear(state: &DashboardState, scope: CacheScope) -> Result<()> {
    let cleared = cache::clear(state.store().as_ref(), scope).await?;
    let names: Vec<&str> = cleared.iter().map(|key| key.as_str()).collect();
    println!("Cleared {}", names.join(", "));
    Ok(())
}
