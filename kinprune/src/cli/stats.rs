//! The `stats` CLI subcommand.

use clap::Parser;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

use crate::graph::GraphLike;
use crate::independent_set::approximate_independent_set;
use crate::kinship::{relatedness_graph, KinshipMatrix};
use crate::vec_graph::Graph;

use super::{emit, CliError};

/// Describe the relatedness graph of a kinship matrix.
#[derive(Parser, Debug)]
pub struct StatsArgs {
    /// Kinship matrix as comma separated values, without column or row names.
    matrix: PathBuf,

    /// Pairs with a kinship coefficient above this are considered related.
    #[arg(allow_negative_numbers = true)]
    threshold: f64,

    /// Accept kinship matrices that are symmetric up to this difference.
    #[arg(long, short, default_value_t = 0.0)]
    tolerance: f64,

    /// Also write the graph in Graphviz format, with kept individuals filled.
    #[arg(long)]
    dot: Option<PathBuf>,

    /// Emit the statistics as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub individuals: usize,
    pub related_pairs: usize,
    pub isolated: usize,
    pub components: usize,
    pub largest_component: usize,
}

impl GraphStats {
    pub fn of(g: &impl GraphLike) -> Self {
        let comps = g.component_vertices();
        GraphStats {
            individuals: g.num_vertices(),
            related_pairs: g.num_edges(),
            isolated: g.isolated_vertices().len(),
            components: comps.len(),
            largest_component: comps.iter().map(Vec::len).max().unwrap_or(0),
        }
    }
}

impl StatsArgs {
    /// Run the `stats` command using the provided arguments.
    pub fn run(self) -> Result<(), CliError> {
        let matrix = KinshipMatrix::from_csv_file(&self.matrix)?;
        let g: Graph = relatedness_graph(&matrix, self.threshold, self.tolerance)?;
        let stats = GraphStats::of(&g);

        if let Some(dot_path) = &self.dot {
            let kept = approximate_independent_set(&g);
            fs::write(dot_path, g.to_dot(&kept))?;
        }

        let text = if self.json {
            serde_json::to_string_pretty(&stats)? + "\n"
        } else {
            format!(
                "individuals: {}\nrelated pairs: {}\nisolated: {}\ncomponents: {}\nlargest component: {}\n",
                stats.individuals,
                stats.related_pairs,
                stats.isolated,
                stats.components,
                stats.largest_component
            )
        };
        emit(&text, None)
    }
}
