//! CLI argument definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::codec::VarType;

/// shotvars - typed production variables with per-shot overrides
#[derive(Parser, Debug)]
#[command(name = "shotvars")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Base directory holding the latest and version records
    #[arg(long, default_value = "./shotvars", global = true)]
    pub dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List all variables with their defaults
    List,

    /// Show one variable including its overrides
    Show {
        /// Variable name
        name: String,
    },

    /// Add a variable and publish a new version
    Add {
        /// Variable name (unique, non-empty)
        name: String,

        /// Variable type: string, integer, float, boolean, color or vector
        #[arg(long = "type", value_name = "TYPE")]
        var_type: VarType,

        /// Default value in textual form, e.g. "3.5" or "255, 0, 0"
        #[arg(long)]
        default: String,
    },

    /// Replace a variable's default value and publish a new version
    SetDefault {
        /// Variable name
        name: String,

        /// New default value in textual form
        value: String,
    },

    /// Delete a variable and its overrides, then publish a new version
    Delete {
        /// Variable name
        name: String,
    },

    /// Manage per-shot overrides
    #[command(subcommand)]
    Override(OverrideCommand),

    /// List published version numbers
    Versions,
}

#[derive(Subcommand, Debug)]
pub enum OverrideCommand {
    /// Add or replace an override and publish a new version
    Set {
        /// Variable name
        variable: String,

        /// Shot identifier, e.g. "shot01"
        shot: String,

        /// Override value in textual form
        value: String,
    },

    /// Delete an override and publish a new version
    Delete {
        /// Variable name
        variable: String,

        /// Shot identifier
        shot: String,
    },

    /// List overrides of a variable
    List {
        /// Variable name
        variable: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
