use anyhow::Result;
use clap::{Parser, Subcommand};
use cmdb_application::CacheScope;
use cmdb_core::view::InventoryTab;
use std::io::IsTerminal;
use std::path::PathBuf;

mod commands;
mod context;
mod render;

use context::GlobalArgs;

#[derive(Parser)]
#[command(name = "cmdb")]
#[command(about = "CMDB Dashboard - inventory, FAQ and chat for a cloud account snapshot", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the inventory snapshot as tables
    Inventory {
        /// Only this tab: instances, security-groups, iam or vpc
        #[arg(long)]
        tab: Option<InventoryTab>,
    },
    /// Show the FAQ list (cached after the first fetch)
    Faq {
        /// Expand the n-th question (1-based)
        #[arg(long, value_name = "N")]
        open: Option<usize>,
        /// Expand every question
        #[arg(long, conflicts_with = "open")]
        expand_all: bool,
    },
    /// Interactive chat about the infrastructure
    Chat,
    /// Ask a single question and print the answer
    Ask {
        /// The question text
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },
    /// Derive an infrastructure diagram from the snapshot
    Diagram {
        #[command(subcommand)]
        kind: DiagramKind,
    },
    /// Manage the local cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
    /// Check backend health
    Health,
}

#[derive(Subcommand)]
enum DiagramKind {
    /// Node/edge graph as JSON
    Graph {
        /// Write to a file instead of stdout
        #[arg(long, short, value_name = "FILE")]
        output: Option<PathBuf>,
        /// Attach every resource to the first VPC
        #[arg(long)]
        first_vpc: bool,
    },
    /// Mermaid flowchart markup
    Mermaid {
        /// Write to a file instead of stdout
        #[arg(long, short, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum CacheAction {
    /// Remove cached entries: faq, chat or all
    Clear {
        #[arg(default_value = "all")]
        scope: CacheScope,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let styled = std::io::stdout().is_terminal();

    let config = context::resolve_config(&cli.global)?;
    let _log_guard = context::init_logging(&config, cli.global.verbose);
    tracing::info!(command = command_name(&cli.command), "[Main] Starting cmdb");

    let mut state = context::build_state(config)?;

    let result = match cli.command {
        Commands::Inventory { tab } => commands::inventory::run(&mut state, tab, styled).await,
        Commands::Faq { open, expand_all } => {
            commands::faq::run(&state, open, expand_all, styled).await
        }
        Commands::Chat => commands::chat::run(&state).await,
        Commands::Ask { question } => commands::chat::ask(&state, &question.join(" "), styled).await,
        Commands::Diagram { kind } => match kind {
            DiagramKind::Graph { output, first_vpc } => {
                commands::diagram::graph(&mut state, output, first_vpc).await
            }
            DiagramKind::Mermaid { output } => commands::diagram::mermaid(&mut state, output).await,
        },
        Commands::Cache { action } => match action {
            CacheAction::Clear { scope } => commands::cache::clear(&state, scope).await,
        },
        Commands::Health => commands::health::run(&state, styled).await,
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "[Main] Command failed");
    }
    result
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Inventory { .. } => "inventory",
        Commands::Faq { .. } => "faq",
        Commands::Chat => "chat",
        Commands::Ask { .. } => "ask",
        Commands::Diagram { .. } => "diagram",
        Commands::Cache { .. } => "cache",
        Commands::Health => "health",
    }
}
