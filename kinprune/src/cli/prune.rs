//! The `prune` CLI subcommand.

use clap::Parser;
use std::path::PathBuf;

use crate::independent_set::IndependentSetFinder;
use crate::kinship::KinshipMatrix;
use crate::prune::{PruneResult, Pruner};

use super::{emit, read_include, CliError};

/// Select a set of mutually unrelated individuals to keep.
#[derive(Parser, Debug)]
pub struct PruneArgs {
    /// Kinship matrix as comma separated values, without column or row names.
    matrix: PathBuf,

    /// Pairs with a kinship coefficient above this are considered related.
    #[arg(allow_negative_numbers = true)]
    threshold: f64,

    /// Write the kept indices to a file instead of printing them.
    #[arg(long, short)]
    out: Option<PathBuf>,

    /// File of individuals to keep if possible, one index per line.
    #[arg(long, short)]
    include: Option<PathBuf>,

    /// Accept kinship matrices that are symmetric up to this difference.
    #[arg(long, short, default_value_t = 0.0)]
    tolerance: f64,

    /// Emit the full result as JSON instead of one index per line.
    #[arg(long)]
    json: bool,

    /// Run clique removal on the whole graph rather than per connected component.
    #[arg(long)]
    no_split: bool,

    /// Skip the final pass that adds every individual with no kept relative.
    #[arg(long)]
    no_extend: bool,
}

impl PruneArgs {
    /// Run the `prune` command using the provided arguments.
    pub fn run(self) -> Result<(), CliError> {
        let matrix = KinshipMatrix::from_csv_file(&self.matrix)?;
        let include = self.include.as_deref().map(read_include).transpose()?;

        let finder = *IndependentSetFinder::new()
            .with_split_components(!self.no_split)
            .with_maximal(!self.no_extend);
        let res = Pruner::new()
            .with_threshold(self.threshold)
            .with_tolerance(self.tolerance)
            .with_include(include)
            .with_finder(finder)
            .prune(&matrix)?;

        eprintln!("{}", summary(&res));

        let text = if self.json {
            serde_json::to_string_pretty(&res)? + "\n"
        } else {
            res.kept.iter().map(|i| format!("{i}\n")).collect()
        };
        emit(&text, self.out.as_deref())
    }
}

fn summary(res: &PruneResult) -> String {
    let mut s = format!(
        "After pruning, {} out of {} individuals are remaining.",
        res.kept.len(),
        res.total
    );
    if let (Some(removed), Some(len)) = (res.removed_include(), res.include_len) {
        s += &format!("\nIn the include list, {removed} out of {len} individuals were removed.");
    }
    s
}
