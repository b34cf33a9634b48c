use crate::render;
use anyhow::Result;
use cmdb_application::DashboardState;
use cmdb_core::view::InventoryTab;
use colored::Colorize;
use strum::IntoEnumIterator;

/// Prints the header and the requested tab, or every tab in order.
pub async fn run(state: &mut DashboardState, tab: Option<InventoryTab>, styled: bool) -> Result<()> {
    state.load_snapshot().await?;

    println!("{}", render::header(&state.header()?, styled));
    println!();

    let tabs: Vec<InventoryTab> = match tab {
        Some(tab) => vec![tab],
        None => InventoryTab::iter().collect(),
    };

    for tab in tabs {
        if styled {
            println!("{}", format!("== {} ==", tab.label()).bright_yellow().bold());
        } else {
            println!("== {} ==", tab.label());
        }
        for table in state.tables(tab)? {
            println!("{}", render::table(&table, styled));
        }
    }
    Ok(())
}
