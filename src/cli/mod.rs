//! CLI Module for phonetrack
//! Non-interactive access to lookups, templates and history, sharing the
//! data directory with the TUI. Running without a command opens the TUI.

pub mod commands;

use crate::config::AppConfig;
use crate::lookup::Tracker;
use crate::models::StorageManager;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// phonetrack - phone number lookup and template manager
#[derive(Parser, Debug)]
#[clap(name = "phonetrack", author, version, about = "Phone number lookup and template manager")]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Option<Commands>,

    #[clap(long, help = "Directory holding templates, history and prefix data")]
    pub data_dir: Option<PathBuf>,

    #[clap(long, short, help = "Path to config.toml")]
    pub config: Option<PathBuf>,

    #[clap(long, short, help = "Log level: error, warn, info, debug or trace")]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Look up a number (include the country code, e.g. +1 650-253-0000)
    Lookup {
        number: String,

        #[clap(long, help = "Write the results to a CSV file")]
        export: Option<PathBuf>,

        #[clap(long, help = "Do not record the lookup in the search history")]
        no_history: bool,
    },
    /// Print the live validation status of a number
    Check { number: String },
    /// Manage saved number templates
    Templates {
        #[clap(subcommand)]
        action: TemplateCommands,
    },
    /// Show or clear the search history
    History {
        #[clap(subcommand)]
        action: HistoryCommands,
    },
    /// List the quick country calling codes
    Countries,
}

#[derive(Subcommand, Debug)]
pub enum TemplateCommands {
    /// List categories and their templates
    List { category: Option<String> },
    /// Validate a number and save it as a template
    Save {
        category: String,
        name: String,
        number: String,
    },
    /// Delete a template
    Delete { category: String, name: String },
    /// Create an empty category
    AddCategory { name: String },
    /// Back up all templates to a JSON or YAML file
    Export { file: PathBuf },
    /// Merge templates from a JSON or YAML backup
    Import {
        file: PathBuf,

        #[clap(long, help = "Replace templates that already exist")]
        overwrite: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum HistoryCommands {
    /// Show recent searches, newest first
    List {
        #[clap(long, short, help = "Maximum number of entries to show")]
        limit: Option<usize>,
    },
    /// Delete the whole search history
    Clear {
        #[clap(long, short, help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

/// Executes one CLI command against the shared data directory
pub fn execute_cli(command: Commands, storage: &StorageManager, config: &AppConfig) -> Result<()> {
    let tracker = Tracker::new(storage.load_prefixes());

    match command {
        Commands::Lookup {
            number,
            export,
            no_history,
        } => commands::lookup(&tracker, storage, &number, export.as_deref(), !no_history),
        Commands::Check { number } => commands::check(&tracker, &number),
        Commands::Templates { action } => match action {
            TemplateCommands::List { category } => {
                commands::list_templates(storage, category.as_deref())
            }
            TemplateCommands::Save {
                category,
                name,
                number,
            } => commands::save_template(&tracker, storage, &category, &name, &number),
            TemplateCommands::Delete { category, name } => {
                commands::delete_template(storage, &category, &name)
            }
            TemplateCommands::AddCategory { name } => commands::add_category(storage, &name),
            TemplateCommands::Export { file } => commands::export_templates(storage, &file),
            TemplateCommands::Import { file, overwrite } => {
                commands::import_templates(storage, &file, overwrite)
            }
        },
        Commands::History { action } => match action {
            HistoryCommands::List { limit } => {
                commands::list_history(storage, limit.unwrap_or(config.history_display_limit))
            }
            HistoryCommands::Clear { yes } => commands::clear_history(storage, yes),
        },
        Commands::Countries => {
            commands::list_countries();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_parse_nested_template_commands() {
        let cli = Cli::try_parse_from([
            "phonetrack",
            "--data-dir",
            "/tmp/pt",
            "templates",
            "save",
            "Work",
            "Desk",
            "+1 650-253-0000",
        ])
        .expect("parse");

        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/pt")));
        match cli.command {
            Some(Commands::Templates {
                action:
                    TemplateCommands::Save {
                        category,
                        name,
                        number,
                    },
            }) => {
                assert_eq!(category, "Work");
                assert_eq!(name, "Desk");
                assert_eq!(number, "+1 650-253-0000");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_should_open_the_tui_without_a_command() {
        let cli = Cli::try_parse_from(["phonetrack"]).expect("parse");
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_should_run_template_commands_against_the_data_dir() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let storage = StorageManager::new(Some(tmp.path().to_path_buf())).expect("storage");
        let config = AppConfig::default();

        execute_cli(
            Commands::Templates {
                action: TemplateCommands::Save {
                    category: "Work".to_string(),
                    name: "Desk".to_string(),
                    number: "+1 650-253-0000".to_string(),
                },
            },
            &storage,
            &config,
        )
        .expect("save");
        assert_eq!(
            storage.load_templates().get("Work", "Desk"),
            Some("+1 650-253-0000")
        );

        let err = execute_cli(
            Commands::Templates {
                action: TemplateCommands::Delete {
                    category: "Work".to_string(),
                    name: "Missing".to_string(),
                },
            },
            &storage,
            &config,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Missing"));
    }

    #[test]
    fn test_should_record_lookups_unless_disabled() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let storage = StorageManager::new(Some(tmp.path().to_path_buf())).expect("storage");
        let config = AppConfig::default();
        let lookup = |no_history| Commands::Lookup {
            number: "+44 20 7031 3000".to_string(),
            export: None,
            no_history,
        };

        execute_cli(lookup(true), &storage, &config).expect("lookup");
        assert!(storage.load_history().is_empty());

        execute_cli(lookup(false), &storage, &config).expect("lookup");
        assert_eq!(storage.load_history().len(), 1);
    }

    #[test]
    fn test_should_fail_lookups_of_invalid_numbers() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let storage = StorageManager::new(Some(tmp.path().to_path_buf())).expect("storage");

        let err = execute_cli(
            Commands::Lookup {
                number: "+1 650-253-000".to_string(),
                export: None,
                no_history: false,
            },
            &storage,
            &AppConfig::default(),
        )
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Invalid phone number! Please enter a valid number."
        );
        assert!(storage.load_history().is_empty());
    }
}
