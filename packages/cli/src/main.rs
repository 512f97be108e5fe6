#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the OSM cleaning tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use osm_clean::pipeline::ProcessOptions;
use osm_clean::{load_tables, print_report, reports, run_process};

#[derive(Parser)]
#[command(
    name = "osm_clean",
    about = "Audit OSM street names and convert map elements to JSON lines"
)]
struct Cli {
    /// TOML file with custom suffix and direction tables (defaults to the
    /// built-in Washington, DC tables)
    #[arg(long, global = true)]
    tables: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Shape every node and way into a JSON document, written to `<input>.json`
    Process {
        /// OSM XML file
        input: PathBuf,
        /// Indent each document
        #[arg(long)]
        pretty: bool,
        /// Skip elements missing an `id` instead of aborting
        #[arg(long)]
        skip_malformed: bool,
    },
    /// Group street names by unexpected trailing token
    Audit {
        /// OSM XML file
        input: PathBuf,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Count occurrences of each element name
    Tags {
        /// OSM XML file
        input: PathBuf,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Count tag keys by character class
    Keys {
        /// OSM XML file
        input: PathBuf,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List distinct contributing user ids
    Users {
        /// OSM XML file
        input: PathBuf,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = osm_clean_cli_utils::init_logger();
    let cli = Cli::parse();

    let tables = load_tables(cli.tables.as_deref())?;

    let Some(command) = cli.command else {
        return osm_clean::interactive::run(&tables, &multi);
    };

    match command {
        Commands::Process {
            input,
            pretty,
            skip_malformed,
        } => {
            run_process(
                &input,
                &tables,
                ProcessOptions {
                    pretty,
                    skip_malformed,
                },
                &multi,
            )?;
        }
        Commands::Audit { input, json } => {
            print_report(&reports::audit_map(&input, &tables.suffix)?, json)?;
        }
        Commands::Tags { input, json } => print_report(&reports::tags_map(&input)?, json)?,
        Commands::Keys { input, json } => print_report(&reports::key_types_map(&input)?, json)?,
        Commands::Users { input, json } => {
            let users = reports::users_map(&input)?;
            print_report(&users, json)?;
            if !json {
                println!("{} distinct users", users.len());
            }
        }
    }

    Ok(())
}
