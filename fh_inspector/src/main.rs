use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use fh_cluster::{load_loader_config_from_env, load_with_config};
use fh_schema::ByteOrder;
use tracing::info;

mod report;

use report::{entity_json, Query, Summary};

#[derive(Parser, Debug)]
#[command(author, version, about = "Far Horizons data file inspector", long_about = None)]
struct Cli {
    /// Directory holding galaxy.dat, stars.dat, planets.dat and the spNN.dat files.
    #[arg(long)]
    data: Option<PathBuf>,
    /// Byte order the files were written in (`little` or `big`).
    #[arg(long)]
    byte_order: Option<ByteOrder>,
    /// Print JSON on a single line.
    #[arg(long)]
    compact: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Cluster counts and one line per species (the default).
    Summary {
        /// Print the summary as JSON.
        #[arg(long)]
        json: bool,
    },
    /// One star system by id.
    System { id: u32 },
    /// One planet by global id.
    Planet { id: u32 },
    /// One species by number.
    Species { id: u32 },
    /// One colony of a species.
    Colony { species: u32, colony: u32 },
    /// One ship of a species.
    Ship { species: u32, ship: u32 },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .compact()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = load_loader_config_from_env();
    if let Some(data) = cli.data {
        config.data_path = data;
    }
    if let Some(order) = cli.byte_order {
        config.byte_order = order;
    }
    info!(
        target: "far_horizons::inspector",
        path = %config.data_path.display(),
        byte_order = %config.byte_order,
        "inspector.loading"
    );

    let cluster = load_with_config(&config)?;

    let query = match cli.command.unwrap_or(Command::Summary { json: false }) {
        Command::Summary { json } => {
            let summary = Summary::of(&cluster);
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", summary.render());
            }
            return Ok(());
        }
        Command::System { id } => Query::System(id),
        Command::Planet { id } => Query::Planet(id),
        Command::Species { id } => Query::Species(id),
        Command::Colony { species, colony } => Query::Colony { species, colony },
        Command::Ship { species, ship } => Query::Ship { species, ship },
    };

    let json = entity_json(&cluster, query, !cli.compact)?
        .ok_or_else(|| eyre!("no entity matches {query:?}"))?;
    println!("{json}");
    Ok(())
}
