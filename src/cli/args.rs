//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Course catalog index: load, inspect, validate and edit course prerequisites
#[derive(Parser, Debug)]
#[command(name = "course-index")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output, repeat for more detail (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub debug: u8,

    /// Catalog file (default: catalog_file from config)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,

    /// Interactive menu when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List courses in id order
    List {
        /// Order so every course follows its prerequisites
        #[arg(long)]
        by_prereqs: bool,
    },

    /// Show one course with its prerequisites
    Show {
        /// Course id (case-insensitive)
        id: String,
    },

    /// Check id/name rules and prerequisite references
    Validate,

    /// List courses a cascading delete would remove
    Impact {
        /// Course id (case-insensitive)
        id: String,
    },

    /// Show the index tree shape
    Tree,

    /// Interactive menu
    Menu,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Print a commented template
    Template,
    /// Show config file locations
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    // https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing
    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn given_repeated_debug_flag_when_parsing_then_counts() {
        let cli = Cli::try_parse_from(["course-index", "-dd", "show", "csci100"]).unwrap();
        assert_eq!(cli.debug, 2);
        assert!(matches!(cli.command, Some(Commands::Show { ref id }) if id == "csci100"));
    }

    #[test]
    fn given_global_file_after_subcommand_when_parsing_then_accepted() {
        let cli =
            Cli::try_parse_from(["course-index", "list", "--by-prereqs", "-f", "courses.csv"])
                .unwrap();
        assert_eq!(cli.file, Some(PathBuf::from("courses.csv")));
        assert!(matches!(cli.command, Some(Commands::List { by_prereqs: true })));
    }

    #[test]
    fn given_no_subcommand_when_parsing_then_command_is_none() {
        let cli = Cli::try_parse_from(["course-index"]).unwrap();
        assert!(cli.command.is_none());
    }
}
