use anyhow::{Context, Result};
use cmdb_application::DashboardState;
use cmdb_core::diagram::VpcAssociation;
use std::path::{Path, PathBuf};

pub async fn graph(state: &mut DashboardState, output: Option<PathBuf>, first_vpc: bool) -> Result<()> {
    state.load_snapshot().await?;
    let association = first_vpc.then_some(VpcAssociation::FirstVpc);
    let graph = state.graph(association)?;
    let json = serde_json::to_string_pretty(&graph)?;
    emit(&json, output.as_deref())
}

pub async fn mermaid(state: &mut DashboardState, output: Option<PathBuf>) -> Result<()> {
    state.load_snapshot().await?;
    let markup = state.mermaid()?;
    emit(&markup, output.as_deref())
}

fn emit(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "[Diagram] Written");
            eprintln!("Wrote {}", path.display());
        }
        None => {
            print!("{content}");
            if !content.ends_with('\n') {
                println!();
            }
        }
    }
    Ok(())
}
