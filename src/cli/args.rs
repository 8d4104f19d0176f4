//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::config::OutputFormat;

/// Selectable option lists from nested-set hierarchies
#[derive(Parser, Debug)]
#[command(name = "nestopt")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Project directory holding .nestopt.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    /// Output format (overrides config)
    #[arg(short, long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List legal destinations for moving a node
    Move {
        /// Hierarchy document
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Id of the node being moved (default: list every node)
        #[arg(short, long)]
        mover: Option<String>,
        /// Only list the tree below this root id
        #[arg(short, long)]
        root: Option<String>,
        /// Indentation unit (overrides config)
        #[arg(long)]
        indent: Option<String>,
    },

    /// List selectable leaves for an association
    Assoc {
        /// Hierarchy document
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Only list the subtree below this node id
        #[arg(short, long)]
        node: Option<String>,
        /// Leaf ids to leave out (repeatable or comma-separated)
        #[arg(short = 'x', long, value_delimiter = ',')]
        exclude: Vec<String>,
        /// Placeholder heading the list (overrides config)
        #[arg(short, long)]
        prompt: Option<String>,
        /// Indentation unit (overrides config)
        #[arg(long)]
        indent: Option<String>,
    },

    /// Pick a selectable leaf interactively (fzf)
    Pick {
        /// Hierarchy document
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Only offer the subtree below this node id
        #[arg(short, long)]
        node: Option<String>,
        /// Leaf ids to leave out (repeatable or comma-separated)
        #[arg(short = 'x', long, value_delimiter = ',')]
        exclude: Vec<String>,
    },

    /// Show hierarchy as tree
    Tree {
        /// Hierarchy document
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

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
    /// Show effective settings
    Show,
    /// Show config file locations
    Path,
    /// Print a commented config template
    Template,
}
