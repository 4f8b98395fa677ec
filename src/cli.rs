use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::query::{Query, QueryClient};
use crate::report::Block;
use crate::store::ReportStore;

/// CLI for report-builder: run export queries and inspect report documents.
#[derive(Parser)]
#[clap(
    name = "report-builder",
    version,
    about = "Run export queries and build report documents from the command line"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a single query against the export endpoint and print the JSON result
    Query {
        /// Free-form filter expression
        expression: String,
        /// Maximum number of results to request
        #[clap(long)]
        limit: Option<u64>,
    },
    /// Build a small example report through the store and print its wire shape
    Demo,
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    tracing::info!("trace_initialised");

    match cli.command {
        Commands::Query { expression, limit } => {
            let client = QueryClient::new_from_env();
            let mut query = Query::new(expression);
            if let Some(limit) = limit {
                query = query.with_limit(limit);
            }
            match client.run(&query).await {
                Some(result) => {
                    println!("{}", serde_json::to_string_pretty(&result)?);
                    Ok(())
                }
                None => {
                    eprintln!("[ERROR] Query produced no result (see logs for details)");
                    anyhow::bail!("query produced no result")
                }
            }
        }
        Commands::Demo => {
            let store = ReportStore::new();
            store.update(|report| {
                report
                    .with_title("Example Report")
                    .with_block(Block::markdown("Introduction", "# Findings\n"))
                    .with_block(Block::query("Recent connections", ":timestamp > 1 hour ago"))
            });
            println!("{}", serde_json::to_string_pretty(&store.get())?);
            Ok(())
        }
    }
}
