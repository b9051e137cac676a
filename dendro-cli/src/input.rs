//! Loading points from delimited text.
//!
//! Each non-blank line holds one point as delimiter-separated numbers. Lines
//! whose first non-blank character is `#` are comments. A whitespace
//! delimiter splits on any run of whitespace.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::num::ParseFloatError;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{Span, debug, field, instrument};

/// Errors raised while reading points.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum InputError {
    /// The input file could not be opened.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Reading a line failed part-way through the input.
    #[error("failed to read line {line}: {source}")]
    Read {
        /// One-based line number.
        line: usize,
        /// Underlying read error.
        #[source]
        source: io::Error,
    },
    /// A field was not a number.
    #[error("line {line}, field {field}: `{value}` is not a number")]
    InvalidNumber {
        /// One-based line number.
        line: usize,
        /// One-based field number.
        field: usize,
        /// Offending text.
        value: String,
        /// Parse failure.
        #[source]
        source: ParseFloatError,
    },
    /// A field parsed to NaN or an infinity.
    #[error("line {line}, field {field}: value must be finite")]
    NonFinite {
        /// One-based line number.
        line: usize,
        /// One-based field number.
        field: usize,
    },
    /// A row's width differed from the first row's.
    #[error("line {line} has {found} fields but the first point has {expected}")]
    RaggedRow {
        /// One-based line number.
        line: usize,
        /// Fields found on this line.
        found: usize,
        /// Fields on the first data line.
        expected: usize,
    },
    /// The input held no data lines.
    #[error("input contains no points")]
    Empty,
}

/// Opens `path` and reads its points.
///
/// # Errors
/// Returns [`InputError::Io`] when the file cannot be opened and propagates
/// [`read_points`] failures.
#[instrument(
    name = "cli.load_points",
    err,
    skip(path),
    fields(path = field::Empty, points = field::Empty),
)]
pub fn load_points(path: &Path, delimiter: char) -> Result<Vec<Vec<f64>>, InputError> {
    let span = Span::current();
    span.record("path", field::display(path.display()));
    let file = File::open(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let points = read_points(BufReader::new(file), delimiter)?;
    span.record("points", points.len());
    Ok(points)
}

/// Reads one point per data line from `reader`.
///
/// # Errors
/// Returns [`InputError`] for unreadable lines, non-numeric or non-finite
/// fields, rows whose width differs from the first, and inputs with no
/// data lines.
///
/// # Examples
/// ```
/// use dendro_cli::input::read_points;
///
/// let text = "# x, y\n0, 0\n1.5, -2\n\n3, 4\n";
/// let points = read_points(text.as_bytes(), ',')?;
/// assert_eq!(points, [vec![0.0, 0.0], vec![1.5, -2.0], vec![3.0, 4.0]]);
/// # Ok::<(), dendro_cli::input::InputError>(())
/// ```
pub fn read_points<R: BufRead>(reader: R, delimiter: char) -> Result<Vec<Vec<f64>>, InputError> {
    let mut points: Vec<Vec<f64>> = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line.map_err(|source| InputError::Read {
            line: line_number,
            source,
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let point = parse_line(trimmed, delimiter, line_number)?;
        if let Some(first) = points.first()
            && first.len() != point.len()
        {
            return Err(InputError::RaggedRow {
                line: line_number,
                found: point.len(),
                expected: first.len(),
            });
        }
        points.push(point);
    }
    if points.is_empty() {
        return Err(InputError::Empty);
    }
    debug!(points = points.len(), "parsed input points");
    Ok(points)
}

fn parse_line(line: &str, delimiter: char, line_number: usize) -> Result<Vec<f64>, InputError> {
    let fields: Box<dyn Iterator<Item = &str>> = if delimiter.is_whitespace() {
        Box::new(line.split_whitespace())
    } else {
        Box::new(line.split(delimiter))
    };
    fields
        .enumerate()
        .map(|(index, raw)| {
            let value = raw.trim();
            let parsed: f64 = value.parse().map_err(|source| InputError::InvalidNumber {
                line: line_number,
                field: index + 1,
                value: value.to_owned(),
                source,
            })?;
            if parsed.is_finite() {
                Ok(parsed)
            } else {
                Err(InputError::NonFinite {
                    line: line_number,
                    field: index + 1,
                })
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::comma("1,2\n3,4\n", ',')]
    #[case::tab("1\t2\n3\t4\n", '\t')]
    #[case::spaces("  1   2\n3 4  \n", ' ')]
    #[case::semicolon_with_padding("1 ; 2\n3;4\n", ';')]
    fn reads_points_with_any_delimiter(#[case] text: &str, #[case] delimiter: char) {
        let points = read_points(text.as_bytes(), delimiter).expect("input is valid");
        assert_eq!(points, [vec![1.0, 2.0], vec![3.0, 4.0]]);
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let points = read_points("# header\n\n  \n5\n  # note\n6\n".as_bytes(), ',')
            .expect("input is valid");
        assert_eq!(points, [vec![5.0], vec![6.0]]);
    }

    #[test]
    fn reports_the_offending_field() {
        let err = read_points("1,2\n3,x\n".as_bytes(), ',').expect_err("x is not a number");
        match err {
            InputError::InvalidNumber {
                line, field, value, ..
            } => assert_eq!((line, field, value.as_str()), (2, 2, "x")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[rstest]
    #[case("NaN")]
    #[case("inf")]
    #[case("-infinity")]
    fn rejects_non_finite_values(#[case] raw: &str) {
        let text = format!("0\n{raw}\n");
        let err = read_points(text.as_bytes(), ',').expect_err("value must be finite");
        assert!(matches!(err, InputError::NonFinite { line: 2, field: 1 }));
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = read_points("1,2\n# skipped\n3\n".as_bytes(), ',').expect_err("ragged");
        assert!(matches!(
            err,
            InputError::RaggedRow {
                line: 3,
                found: 1,
                expected: 2
            }
        ));
    }

    #[test]
    fn rejects_inputs_without_points() {
        let err = read_points("# only a comment\n".as_bytes(), ',').expect_err("empty");
        assert!(matches!(err, InputError::Empty));
    }

    #[test]
    fn missing_files_report_their_path() {
        let err = load_points(Path::new("/nonexistent/dendro/points.csv"), ',')
            .expect_err("file does not exist");
        match err {
            InputError::Io { path, .. } => assert!(path.ends_with("points.csv")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
