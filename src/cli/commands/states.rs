//! State directory commands

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;

use super::{client, resolve_state};
use crate::api::StateDirectory;
use crate::app_data;
use crate::cli::output::{OutputFormat, print_formatted, print_success};

#[derive(Subcommand, Debug)]
pub enum StatesCommands {
    /// List selectable states and how many districts the backend knows
    List,

    /// List the districts of a state
    Districts {
        /// State name (e.g., "Kerala")
        name: String,
    },
}

#[derive(Debug, Serialize)]
struct StateRow {
    name: String,
    districts: usize,
}

#[derive(Debug, Serialize)]
struct DistrictsResult {
    state: String,
    districts: Vec<String>,
}

pub async fn run(
    command: StatesCommands,
    format: OutputFormat,
    quiet: bool,
    backend: Option<&str>,
) -> Result<()> {
    let client = client(backend)?;

    match command {
        StatesCommands::List => {
            let directory = client.states().await.unwrap_or_else(|e| {
                tracing::warn!("Failed to load state directory: {}", e);
                StateDirectory::default()
            });
            let rows = state_rows(&directory);

            print_formatted(&rows, format, |rows| {
                rows.iter()
                    .map(|row| match row.districts {
                        0 => row.name.clone(),
                        n => format!("{:<34}{} districts", row.name, n),
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            });
        }
        StatesCommands::Districts { name } => {
            let state = resolve_state(&name)?;
            let directory = client.states().await?;
            let result = districts(&directory, state);

            if result.districts.is_empty() && format == OutputFormat::Text {
                print_success(&format!("No districts known for {}", result.state), quiet);
                return Ok(());
            }

            print_formatted(&result, format, |r| r.districts.join("\n"));
        }
    }

    Ok(())
}

/// Every selectable state, in selector order, with its district count
fn state_rows(directory: &StateDirectory) -> Vec<StateRow> {
    app_data::selectable_states()
        .iter()
        .map(|name| StateRow {
            name: name.clone(),
            districts: directory.districts(name).map_or(0, <[String]>::len),
        })
        .collect()
}

fn districts(directory: &StateDirectory, state: &str) -> DistrictsResult {
    DistrictsResult {
        state: state.to_string(),
        districts: directory
            .districts(state)
            .map(<[String]>::to_vec)
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> StateDirectory {
        [
            ("Kerala".to_string(), vec!["Kochi".to_string(), "Thrissur".to_string()]),
            ("Goa".to_string(), vec!["Panaji".to_string()]),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_state_rows_follow_selector_order() {
        let rows = state_rows(&directory());
        assert_eq!(rows.len(), app_data::selectable_states().len());
        assert_eq!(rows[0].name, "Andhra Pradesh");
        assert_eq!(rows[0].districts, 0);

        let kerala = rows.iter().find(|row| row.name == "Kerala").unwrap();
        assert_eq!(kerala.districts, 2);
    }

    #[test]
    fn test_districts_for_unknown_directory_entry() {
        let found = districts(&directory(), "Kerala");
        assert_eq!(found.districts, vec!["Kochi", "Thrissur"]);

        let missing = districts(&directory(), "Punjab");
        assert!(missing.districts.is_empty());
    }
}
