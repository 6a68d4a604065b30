use anyhow::{Context, Result};
use busplan_catalogue::RouteGraph;
use clap::Parser;
use std::io::{Read, Write};
use std::path::PathBuf;

mod model;
mod process;

use model::InputDocument;
use process::{answer_requests, build_catalogue};

#[derive(Parser, Debug)]
#[command(
    name = "busplan",
    author,
    version,
    about = "Answer transit stat and route queries from a JSON request document",
    long_about = "Reads a JSON document with base_requests (stops, buses, road \
                  distances), routing_settings, and stat_requests, populates an \
                  in-memory transit catalogue, builds the routing graph, and \
                  prints a JSON array with one response per stat request."
)]
struct Args {
    /// Input JSON document (defaults to stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file for the response array (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verbose output (show debug messages)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.verbose { "debug" } else { "info" }),
    )
    .format_timestamp(None)
    .init();

    let raw = match &args.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            buffer
        }
    };

    let document: InputDocument =
        serde_json::from_str(&raw).context("Failed to parse input document")?;

    let catalogue = build_catalogue(&document.base_requests);

    let graph = match document.routing_settings {
        Some(settings) => {
            log::info!(
                "building routing graph (wait {} min, {} km/h)",
                settings.bus_wait_time,
                settings.bus_velocity
            );
            Some(RouteGraph::build(&catalogue, settings).context("Failed to build routing graph")?)
        }
        None => None,
    };

    let responses = answer_requests(&catalogue, graph.as_ref(), &document.stat_requests)?;
    let rendered = serde_json::to_string_pretty(&responses).context("Failed to render responses")?;

    match &args.output {
        Some(path) => {
            let mut file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            file.write_all(rendered.as_bytes())?;
            file.write_all(b"\n")?;
        }
        None => println!("{rendered}"),
    }

    log::info!("answered {} requests", responses.len());
    Ok(())
}
