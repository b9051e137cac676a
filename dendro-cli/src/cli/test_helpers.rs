//! Small helpers shared across CLI tests.
//!
//! The CLI tests write point files to a temporary directory and build
//! commands around them. These helpers keep the test cases concise.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use super::{Cli, CliError, InputArgs, MetricArg, run_cli};

/// Two well-separated pairs in the plane.
pub(super) const TWO_PAIRS: &str = "0,0\n0,1\n10,10\n10,11\n";

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn create_points_file(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    let mut file = File::create(&path)?;
    file.write_all(contents.as_bytes())?;
    Ok(path)
}

pub(super) fn input_args(path: &Path) -> InputArgs {
    InputArgs {
        path: path.to_path_buf(),
        metric: MetricArg::Euclidean,
        p: 2.0,
        delimiter: ',',
    }
}

pub(super) fn run_cli_expecting_error(cli: Cli, panic_msg: &str) -> CliError {
    match run_cli(cli) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
