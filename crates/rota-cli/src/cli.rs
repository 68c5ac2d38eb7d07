use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Rotating duty scheduler for a small roster.
#[derive(Parser, Debug)]
#[command(name = "rota", about = "Rotating duty scheduler for a small roster")]
pub struct CliArgs {
    /// Path to config file (default: ./rota.toml if present)
    #[arg(long, env = "ROTA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Roster data file (overrides config)
    #[arg(long, env = "ROTA_DATA")]
    pub data: Option<PathBuf>,

    /// Workers per duty (overrides config)
    #[arg(long)]
    pub crew_size: Option<usize>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fill an empty roster (names default to `seed_workers` from config)
    Init {
        names: Vec<String>,
    },
    /// Show the roster in rotation order
    List,
    /// Add a worker at the back of the rotation
    Add {
        name: String,
    },
    /// Remove a worker
    Remove {
        id: i64,
    },
    /// Take a worker out of the rotation
    Off {
        id: i64,
    },
    /// Put a worker back into the rotation
    On {
        id: i64,
    },
    /// Set the rotation order (every worker id, first to last)
    Reorder {
        #[arg(required = true)]
        ids: Vec<i64>,
    },
    /// Show who is on duty next
    Next,
    /// Record duty for the next crew and rotate
    Advance,
    /// Record duty for specific workers and rotate
    Record {
        #[arg(required = true)]
        ids: Vec<i64>,
    },
    /// Roster counts
    Status,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_flags_and_subcommand() {
        let args = CliArgs::try_parse_from([
            "rota", "--data", "x.json", "--crew-size", "3", "reorder", "3", "1", "2",
        ])
        .unwrap();

        assert_eq!(args.data, Some(PathBuf::from("x.json")));
        assert_eq!(args.crew_size, Some(3));
        assert!(matches!(args.command, Command::Reorder { ids } if ids == vec![3, 1, 2]));
    }

    #[test]
    fn reorder_requires_ids() {
        assert!(CliArgs::try_parse_from(["rota", "reorder"]).is_err());
    }

    #[test]
    fn init_names_are_optional() {
        let args = CliArgs::try_parse_from(["rota", "init"]).unwrap();
        assert!(matches!(args.command, Command::Init { names } if names.is_empty()));
    }
}
