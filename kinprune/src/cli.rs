//! The KinPrune command line interface.

use clap::{crate_version, Parser};
use std::fs;
use std::path::Path;

use crate::kinship::KinshipError;
use crate::prune::PruneError;

pub mod prune;
pub mod stats;

/// CLI arguments.
#[derive(Parser, Debug)]
#[clap(version = crate_version!(), long_about = None)]
#[clap(about = "Remove closely related individuals from a cohort")]
pub enum Cli {
    /// Select a set of mutually unrelated individuals to keep.
    Prune(prune::PruneArgs),
    /// Describe the relatedness graph of a kinship matrix.
    Stats(stats::StatsArgs),
}

/// Error type for the CLI.
#[derive(Debug, derive_more::Display, derive_more::From)]
pub enum CliError {
    /// Error reading or writing files.
    #[display("IO error: {_0}")]
    IO(std::io::Error),
    /// Error reading or validating the kinship matrix.
    #[display("Error reading kinship matrix: {_0}")]
    Kinship(KinshipError),
    /// Error while pruning.
    #[display("Error pruning individuals: {_0}")]
    Prune(PruneError),
    /// A line of the include file is not an index.
    #[display("Include file line {_0} is not an individual index: {_1:?}")]
    Include(usize, String),
    #[display("Error writing JSON: {_0}")]
    Json(serde_json::Error),
}

impl Cli {
    pub fn run(self) -> Result<(), CliError> {
        match self {
            Cli::Prune(args) => args.run(),
            Cli::Stats(args) => args.run(),
        }
    }
}

/// Read one individual index per line. Blank lines are skipped.
pub fn read_include(path: &Path) -> Result<Vec<usize>, CliError> {
    let text = fs::read_to_string(path)?;
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            line.trim()
                .parse()
                .map_err(|_| CliError::Include(i + 1, line.to_string()))
        })
        .collect()
}

/// Write `text` to `out`, or print it if there is no output path.
fn emit(text: &str, out: Option<&Path>) -> Result<(), CliError> {
    if let Some(out_path) = out {
        fs::write(out_path, text)?;
    } else {
        print!("{text}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn include_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "3\n 10\n\n0\n").unwrap();
        assert_eq!(read_include(f.path()).unwrap(), vec![3, 10, 0]);
    }

    #[test]
    fn bad_include_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "3\nfour\n").unwrap();
        let err = read_include(f.path()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Include file line 2 is not an individual index: \"four\""
        );
    }
}
