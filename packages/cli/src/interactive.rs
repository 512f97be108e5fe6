#![allow(clippy::module_name_repetitions)]

//! Interactive menu for the OSM cleaning tool.
//!
//! Prompts for an action and a map file using `dialoguer`, so the tool can
//! be driven without remembering subcommands and flags.

use std::path::PathBuf;

use dialoguer::{Confirm, Input, Select};
use osm_clean_cli_utils::MultiProgress;
use osm_clean_street::TokenTables;

use crate::pipeline::ProcessOptions;
use crate::{print_report, reports, run_process};

/// Top-level actions available in the interactive menu.
enum CleanAction {
    Process,
    Audit,
    Tags,
    Keys,
    Users,
}

impl CleanAction {
    const ALL: &[Self] = &[
        Self::Process,
        Self::Audit,
        Self::Tags,
        Self::Keys,
        Self::Users,
    ];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::Process => "Convert map to JSON lines",
            Self::Audit => "Audit street names",
            Self::Tags => "Count element names",
            Self::Keys => "Count tag key types",
            Self::Users => "List contributing users",
        }
    }
}

/// Runs the interactive menu, prompting for an action and its inputs.
///
/// # Errors
///
/// Returns an error if a prompt fails or the selected operation fails.
pub fn run(tables: &TokenTables, multi: &MultiProgress) -> Result<(), Box<dyn std::error::Error>> {
    let labels: Vec<&str> = CleanAction::ALL.iter().map(CleanAction::label).collect();

    let idx = Select::new()
        .with_prompt("What would you like to do?")
        .items(&labels)
        .default(0)
        .interact()?;

    let input = prompt_map_path()?;

    match CleanAction::ALL[idx] {
        CleanAction::Process => {
            let pretty = Confirm::new()
                .with_prompt("Pretty-print each document?")
                .default(false)
                .interact()?;
            let skip_malformed = Confirm::new()
                .with_prompt("Skip malformed elements instead of aborting?")
                .default(false)
                .interact()?;
            run_process(
                &input,
                tables,
                ProcessOptions {
                    pretty,
                    skip_malformed,
                },
                multi,
            )?;
        }
        CleanAction::Audit => {
            print_report(&reports::audit_map(&input, &tables.suffix)?, false)?;
        }
        CleanAction::Tags => print_report(&reports::tags_map(&input)?, false)?,
        CleanAction::Keys => print_report(&reports::key_types_map(&input)?, false)?,
        CleanAction::Users => {
            let users = reports::users_map(&input)?;
            print_report(&users, false)?;
            println!("{} distinct users", users.len());
        }
    }

    Ok(())
}

/// Prompts for the path of an OSM XML file until an existing one is given.
fn prompt_map_path() -> Result<PathBuf, dialoguer::Error> {
    let path: String = Input::new()
        .with_prompt("Path to OSM XML file")
        .validate_with(|input: &String| -> Result<(), String> {
            if PathBuf::from(input.trim()).is_file() {
                Ok(())
            } else {
                Err(format!("{} is not a file", input.trim()))
            }
        })
        .interact_text()?;
    Ok(PathBuf::from(path.trim()))
}
