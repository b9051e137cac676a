//! Command-line interface orchestration for the `dendro` binary.
//!
//! Every command loads a delimited point file, builds an average-linkage
//! clusterer with the requested metric, and produces either a flat
//! partition (`cut`), the merge history (`dendrogram`), or a silhouette-chosen
//! partition (`select-k`).

mod commands;

pub use commands::{
    Cli, CliError, Command, CutCommand, DendrogramCommand, ExecutionSummary, InputArgs, MetricArg,
    Outcome, SelectKCommand, render_summary, run_cli,
};

#[cfg(test)]
mod test_helpers;
