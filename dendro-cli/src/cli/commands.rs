//! Command implementations and argument parsing for the `dendro` binary.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use dendro_core::{
    BuiltinMetric, Classes, ClusterError, Clusterer, Dendrogram, HierarchicalBuilder,
    HierarchicalClusterer, Split, ValidationError, split_by_average_silhouette,
};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use crate::input::{InputError, load_points};

const DEFAULT_DELIMITER: char = ',';
const DEFAULT_EXPONENT: f64 = 2.0;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "dendro",
    about = "Average-linkage hierarchical clustering of delimited point files."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Cut the dendrogram into a fixed number of clusters and print labels.
    Cut(CutCommand),
    /// Print the full merge history.
    Dendrogram(DendrogramCommand),
    /// Choose the cluster count with the best average silhouette.
    SelectK(SelectKCommand),
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Self::Cut(_) => "cut",
            Self::Dendrogram(_) => "dendrogram",
            Self::SelectK(_) => "select-k",
        }
    }
}

/// Input file and metric options shared by every command.
#[derive(Debug, Args, Clone)]
pub struct InputArgs {
    /// Delimited text file with one point per line.
    pub path: PathBuf,

    /// Dissimilarity between points.
    #[arg(long, value_enum, default_value_t = MetricArg::Euclidean)]
    pub metric: MetricArg,

    /// Exponent used by `--metric minkowski`.
    #[arg(long, default_value_t = DEFAULT_EXPONENT)]
    pub p: f64,

    /// Field separator; any whitespace character splits on runs of whitespace.
    #[arg(long, default_value_t = DEFAULT_DELIMITER)]
    pub delimiter: char,
}

/// Options accepted by the `cut` command.
#[derive(Debug, Args, Clone)]
pub struct CutCommand {
    /// Input configuration.
    #[command(flatten)]
    pub input: InputArgs,

    /// Number of clusters to produce.
    #[arg(short = 'k', long = "clusters")]
    pub clusters: usize,
}

/// Options accepted by the `dendrogram` command.
#[derive(Debug, Args, Clone)]
pub struct DendrogramCommand {
    /// Input configuration.
    #[command(flatten)]
    pub input: InputArgs,
}

/// Options accepted by the `select-k` command.
#[derive(Debug, Args, Clone)]
pub struct SelectKCommand {
    /// Input configuration.
    #[command(flatten)]
    pub input: InputArgs,

    /// Largest cluster count to evaluate; 0 evaluates every count up to m - 1.
    #[arg(long = "max-k", default_value_t = 0)]
    pub max_k: usize,
}

/// Metrics selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MetricArg {
    /// Straight-line distance.
    Euclidean,
    /// Squared straight-line distance.
    SquaredEuclidean,
    /// Sum of absolute differences.
    Manhattan,
    /// Largest absolute difference.
    Chebyshev,
    /// Lp distance of order `--p`.
    Minkowski,
}

impl MetricArg {
    /// Resolves the library metric, using `p` for Minkowski.
    #[must_use]
    pub fn to_metric(self, p: f64) -> BuiltinMetric {
        match self {
            Self::Euclidean => BuiltinMetric::Euclidean,
            Self::SquaredEuclidean => BuiltinMetric::SquaredEuclidean,
            Self::Manhattan => BuiltinMetric::Manhattan,
            Self::Chebyshev => BuiltinMetric::Chebyshev,
            Self::Minkowski => BuiltinMetric::Minkowski { p },
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Loading the input points failed.
    #[error(transparent)]
    Input(#[from] InputError),
    /// Clustering failed.
    #[error(transparent)]
    Core(#[from] ClusterError),
    /// Cluster-count selection failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl CliError {
    /// Stable machine-readable code of the underlying library error, if any.
    #[must_use]
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::Input(_) => None,
            Self::Core(err) => Some(err.code().as_str()),
            Self::Validation(err) => Some(err.code().as_str()),
        }
    }
}

/// Result of the executed command.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Flat partition from `cut`.
    Cut(Classes),
    /// Merge history from `dendrogram`.
    Dendrogram(Dendrogram),
    /// Chosen split and its partition from `select-k`.
    SelectK {
        /// Selected cluster count and its cost.
        split: Split,
        /// Partition at the selected count.
        classes: Classes,
    },
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Name derived from the input file.
    pub data_source: String,
    /// Number of points read.
    pub points: usize,
    /// Metric label, including the Minkowski exponent when relevant.
    pub metric: String,
    /// Command result.
    pub outcome: Outcome,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading, clustering or selection fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use dendro_cli::cli::{Cli, Command, CutCommand, InputArgs, MetricArg, Outcome, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "0,0\n0,1\n10,10\n10,11\n")?;
/// let cli = Cli {
///     command: Command::Cut(CutCommand {
///         input: InputArgs {
///             path: file.path().to_path_buf(),
///             metric: MetricArg::Euclidean,
///             p: 2.0,
///             delimiter: ',',
///         },
///         clusters: 2,
///     }),
/// };
/// let summary = run_cli(cli)?;
/// let Outcome::Cut(classes) = summary.outcome else { unreachable!() };
/// assert_eq!(classes.partitions(), [vec![0, 1], vec![2, 3]]);
/// # Ok(())
/// # }
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    Span::current().record("command", field::display(cli.command.name()));
    let summary = match cli.command {
        Command::Cut(command) => run_cut(command)?,
        Command::Dendrogram(command) => run_dendrogram(command)?,
        Command::SelectK(command) => run_select_k(command)?,
    };
    info!(
        data_source = summary.data_source.as_str(),
        points = summary.points,
        "command completed"
    );
    Ok(summary)
}

struct Prepared {
    data_source: String,
    metric: String,
    clusterer: HierarchicalClusterer<BuiltinMetric>,
}

impl Prepared {
    fn finish(self, outcome: Outcome) -> ExecutionSummary {
        ExecutionSummary {
            data_source: self.data_source,
            points: self.clusterer.points().len(),
            metric: self.metric,
            outcome,
        }
    }
}

fn prepare(input: InputArgs) -> Result<Prepared, CliError> {
    let InputArgs {
        path,
        metric,
        p,
        delimiter,
    } = input;
    let points = load_points(&path, delimiter)?;
    let metric = metric.to_metric(p);
    let clusterer = HierarchicalBuilder::new().with_metric(metric).build(points)?;
    Ok(Prepared {
        data_source: derive_data_source_name(&path),
        metric: metric.to_string(),
        clusterer,
    })
}

#[instrument(
    name = "cli.cut",
    err,
    skip(command),
    fields(clusters = command.clusters, metric = field::Empty),
)]
pub(super) fn run_cut(command: CutCommand) -> Result<ExecutionSummary, CliError> {
    let prepared = prepare(command.input)?;
    Span::current().record("metric", field::display(&prepared.metric));
    let classes = prepared.clusterer.cluster(command.clusters)?;
    Ok(prepared.finish(Outcome::Cut(classes)))
}

#[instrument(name = "cli.dendrogram", err, skip(command), fields(metric = field::Empty))]
pub(super) fn run_dendrogram(command: DendrogramCommand) -> Result<ExecutionSummary, CliError> {
    let prepared = prepare(command.input)?;
    Span::current().record("metric", field::display(&prepared.metric));
    let dendrogram = prepared.clusterer.dendrogram()?;
    Ok(prepared.finish(Outcome::Dendrogram(dendrogram)))
}

#[instrument(
    name = "cli.select_k",
    err,
    skip(command),
    fields(max_k = command.max_k, metric = field::Empty, selected = field::Empty),
)]
pub(super) fn run_select_k(command: SelectKCommand) -> Result<ExecutionSummary, CliError> {
    let prepared = prepare(command.input)?;
    let span = Span::current();
    span.record("metric", field::display(&prepared.metric));
    let distances = prepared.clusterer.distances()?;
    let split = split_by_average_silhouette(&distances, &prepared.clusterer, command.max_k)?;
    span.record("selected", split.k);
    let classes = prepared.clusterer.cluster(split.k)?;
    Ok(prepared.finish(Outcome::SelectK { split, classes }))
}

pub(super) fn derive_data_source_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|value| value.to_str())
        .map_or_else(|| "points".to_owned(), ToOwned::to_owned)
}

/// Renders `summary` to `writer` as tab-separated text.
///
/// A header of `key: value` lines is followed by one line per point
/// (`index`, `label`) for partitions, or one line per merge (`first`,
/// `second`, `distance`, `size`) for merge histories.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use dendro_cli::cli::{ExecutionSummary, Outcome, render_summary};
/// # use dendro_core::{Classes, ClusterId};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let classes = Classes::try_from_assignments(vec![ClusterId::new(0), ClusterId::new(1)], 0.0)?;
/// let summary = ExecutionSummary {
///     data_source: "demo".into(),
///     points: 2,
///     metric: "euclidean".into(),
///     outcome: Outcome::Cut(classes),
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert_eq!(
///     String::from_utf8(buffer)?,
///     "data source: demo\npoints: 2\nmetric: euclidean\nclusters: 2\ncost: 0\n0\t0\n1\t1\n",
/// );
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "data source: {}", summary.data_source)?;
    writeln!(writer, "points: {}", summary.points)?;
    writeln!(writer, "metric: {}", summary.metric)?;
    match &summary.outcome {
        Outcome::Cut(classes) => {
            writeln!(writer, "clusters: {}", classes.cluster_count())?;
            writeln!(writer, "cost: {}", classes.cost())?;
            render_labels(classes, &mut writer)
        }
        Outcome::Dendrogram(dendrogram) => {
            writeln!(writer, "merges: {}", dendrogram.len())?;
            for linkage in dendrogram {
                writeln!(
                    writer,
                    "{}\t{}\t{}\t{}",
                    linkage.first, linkage.second, linkage.distance, linkage.size
                )?;
            }
            Ok(())
        }
        Outcome::SelectK { split, classes } => {
            writeln!(writer, "selected k: {}", split.k)?;
            writeln!(writer, "average silhouette: {}", 1.0 - split.cost)?;
            render_labels(classes, &mut writer)
        }
    }
}

fn render_labels(classes: &Classes, mut writer: impl Write) -> io::Result<()> {
    for (index, label) in classes.assignments().iter().enumerate() {
        writeln!(writer, "{index}\t{label}")?;
    }
    Ok(())
}
