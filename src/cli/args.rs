//! CLI argument definitions using clap
//!
//! Commands:
//! - elimindex query --input <c.e> --min-t <t> --bbox <min_x,min_y,max_x,max_y> [--geo] [--config <path>]
//! - elimindex inspect --input <c.e> [--config <path>]
//! - elimindex dump --input <c.e> [--config <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// elimindex - query labels by bounding box and elimination time
#[derive(Parser, Debug)]
#[command(name = "elimindex")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Answer a single range query and exit
    Query {
        /// Path to the c.e label file
        #[arg(long)]
        input: PathBuf,

        /// Minimum elimination time
        #[arg(long, allow_hyphen_values = true)]
        min_t: f64,

        /// Query box as min_x,min_y,max_x,max_y
        #[arg(long, allow_hyphen_values = true)]
        bbox: String,

        /// Treat coordinates as lon/lat and allow boxes across the antimeridian
        #[arg(long)]
        geo: bool,

        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print index statistics
    Inspect {
        /// Path to the c.e label file
        #[arg(long)]
        input: PathBuf,

        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the tree structure
    Dump {
        /// Path to the c.e label file
        #[arg(long)]
        input: PathBuf,

        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query() {
        let cli = Cli::try_parse_from([
            "elimindex",
            "query",
            "--input",
            "labels.ce",
            "--min-t",
            "-1.5",
            "--bbox",
            "-10,-5,10,5",
            "--geo",
        ])
        .unwrap();

        match cli.command {
            Command::Query {
                input,
                min_t,
                bbox,
                geo,
                config,
            } => {
                assert_eq!(input, PathBuf::from("labels.ce"));
                assert_eq!(min_t, -1.5);
                assert_eq!(bbox, "-10,-5,10,5");
                assert!(geo);
                assert!(config.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_input_required() {
        assert!(Cli::try_parse_from(["elimindex", "inspect"]).is_err());
    }
}
