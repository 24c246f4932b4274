//! `gmap` - run a single GMAP API operation from the command line.
//!
//! Connection settings come from `GMAP_API_URL`, `GMAP_USERNAME` and
//! `GMAP_PASSWORD`, optionally loaded from a `.env` file. The result is
//! printed to stdout as pretty JSON.

use std::io;

use anyhow::{bail, Context, Result};
use serde_json::Value;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use gmap_client::{
    Config, GmapClient, NodeRef, QueryParams, SearchParams, TraversalParams,
};

// ============================================================================
// Constants
// ============================================================================

/// Results per page when `search` is called without one
const DEFAULT_PER_PAGE: u32 = 20;

const USAGE: &str = "\
Usage: gmap <command> [args]

Commands:
  graphs
  collections
  node <collection> <node_id>
  query <kind> <value>
  search <collection,...> <query> [per_page] [page]
  traversal <graph,...> <start_vertex> <max_depth> <direction>
  plugin <plugin_name> [key=value ...]

Settings are read from GMAP_API_URL, GMAP_USERNAME and GMAP_PASSWORD
(a .env file in the working directory is loaded first).
Set RUST_LOG=debug for request logging.";

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

/// A parsed command line
#[derive(Debug, PartialEq)]
enum Command {
    Graphs,
    Collections,
    Node(NodeRef),
    Query(QueryParams),
    Search(SearchParams),
    Traversal(TraversalParams),
    Plugin {
        name: String,
        options: Vec<(String, String)>,
    },
}

fn split_list(arg: &str) -> Vec<String> {
    arg.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_number(arg: Option<&String>, name: &str, default: u32) -> Result<u32> {
    match arg {
        Some(value) => value
            .parse()
            .with_context(|| format!("{} must be a non-negative integer, got {:?}", name, value)),
        None => Ok(default),
    }
}

fn parse_args(args: &[String]) -> Result<Command> {
    let (command, rest) = match args.split_first() {
        Some((command, rest)) => (command.as_str(), rest),
        None => bail!("missing command"),
    };

    let arg = |index: usize, name: &str| -> Result<String> {
        rest.get(index)
            .cloned()
            .with_context(|| format!("{}: missing <{}>", command, name))
    };

    let parsed = match command {
        "graphs" => Command::Graphs,
        "collections" => Command::Collections,
        "node" => Command::Node(NodeRef::new(arg(0, "collection")?, arg(1, "node_id")?)),
        "query" => Command::Query(QueryParams::new(arg(0, "kind")?, arg(1, "value")?)),
        "search" => Command::Search(SearchParams::new(
            split_list(&arg(0, "collection,...")?),
            arg(1, "query")?,
            parse_number(rest.get(2), "per_page", DEFAULT_PER_PAGE)?,
            parse_number(rest.get(3), "page", 1)?,
        )),
        "traversal" => {
            let max_depth = arg(2, "max_depth")?;
            Command::Traversal(TraversalParams::new(
                split_list(&arg(0, "graph,...")?),
                arg(1, "start_vertex")?,
                parse_number(Some(&max_depth), "max_depth", 0)?,
                arg(3, "direction")?,
            ))
        }
        "plugin" => {
            let name = arg(0, "plugin_name")?;
            let options = rest[1..]
                .iter()
                .map(|pair| match pair.split_once('=') {
                    Some((key, value)) => Ok((key.to_string(), value.to_string())),
                    None => bail!("plugin option must be key=value, got {:?}", pair),
                })
                .collect::<Result<Vec<_>>>()?;
            Command::Plugin { name, options }
        }
        other => bail!("unknown command {:?}", other),
    };

    Ok(parsed)
}

async fn run(client: &GmapClient, command: Command) -> Result<Value> {
    debug!(?command, "Running command");
    let value = match command {
        Command::Graphs => client.list_graphs().await?,
        Command::Collections => client.list_collections().await?,
        Command::Node(node) => client.get_node(&node).await?,
        Command::Query(params) => client.query(&params).await?,
        Command::Search(params) => client.search(&params).await?,
        Command::Traversal(params) => Value::Array(client.traversal(&params).await?),
        Command::Plugin { name, options } => client.plugin_data(&name, options).await?,
    };
    Ok(value)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() || args[0] == "--help" || args[0] == "-h" {
        eprintln!("{}", USAGE);
        std::process::exit(if args.is_empty() { 2 } else { 0 });
    }

    let command = match parse_args(&args) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("Error: {:#}\n\n{}", e, USAGE);
            std::process::exit(2);
        }
    };

    let config = Config::from_env();
    info!(api_url = %config.api_url, "Connecting to GMAP");
    let client = GmapClient::new(config).context("Failed to create API client")?;

    let value = run(&client, command).await?;
    println!(
        "{}",
        serde_json::to_string_pretty(&value).context("Failed to format response")?
    );

    Ok(())
}
