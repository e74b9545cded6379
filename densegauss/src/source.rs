//! Sources a [`crate::DenseMatrix`] can be materialized from
//!
//! A source hands out a rectangular grid of either integers or reals. The matrix reads it once
//! at construction and keeps a pristine copy of what it read, so the source is never consulted
//! again.

use std::{fs, io, path::Path, str::FromStr};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("could not read matrix source: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: cannot parse {token:?} as a number")]
    Parse { line: usize, token: String },

    #[error("matrix source contains no rows")]
    Empty,

    #[error("value {value} does not fit the element type")]
    OutOfRange { value: String },
}

/// Supplies the grid a matrix is built from
pub trait MatrixSource {
    fn read_integer_grid(&mut self) -> Result<Vec<Vec<i64>>, SourceError>;
    fn read_real_grid(&mut self) -> Result<Vec<Vec<f64>>, SourceError>;
}

/// A matrix written out as text, one row per line
///
/// Entries are separated by whitespace and/or commas. Blank lines are skipped, as is anything
/// following a `#` on a line.
///
/// ```
/// use densegauss::source::{MatrixSource, TextGrid};
///
/// let mut grid = TextGrid::new("# coefficients\n1, 2\n3, 4\n");
/// assert_eq!(grid.read_integer_grid().unwrap(), vec![vec![1, 2], vec![3, 4]]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextGrid {
    text: String,
}

impl TextGrid {
    pub fn new(text: impl Into<String>) -> Self {
        TextGrid { text: text.into() }
    }

    /// Loads the whole file up front; parsing is deferred until a grid is requested
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let text = fs::read_to_string(path.as_ref())?;
        log::debug!("loaded matrix text from {}", path.as_ref().display());
        Ok(TextGrid { text })
    }

    fn parse_grid<T: FromStr>(&self) -> Result<Vec<Vec<T>>, SourceError> {
        let mut grid = Vec::new();
        for (n, line) in self.text.lines().enumerate() {
            let content = match line.find('#') {
                Some(i) => &line[..i],
                None => line,
            };
            let row = content
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter(|tok| !tok.is_empty())
                .map(|tok| {
                    tok.parse::<T>().map_err(|_| SourceError::Parse {
                        line: n + 1,
                        token: tok.to_owned(),
                    })
                })
                .collect::<Result<Vec<T>, _>>()?;

            if !row.is_empty() {
                grid.push(row);
            }
        }

        if grid.is_empty() {
            return Err(SourceError::Empty);
        }

        Ok(grid)
    }
}

impl FromStr for TextGrid {
    type Err = SourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(TextGrid::new(s))
    }
}

impl MatrixSource for TextGrid {
    fn read_integer_grid(&mut self) -> Result<Vec<Vec<i64>>, SourceError> {
        self.parse_grid()
    }

    fn read_real_grid(&mut self) -> Result<Vec<Vec<f64>>, SourceError> {
        self.parse_grid()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_integers() {
        let mut src = TextGrid::new("1 1 1\n\n2, 2, 2   # second row\n3\t3\t3\n");
        assert_eq!(
            src.read_integer_grid().unwrap(),
            vec![vec![1, 1, 1], vec![2, 2, 2], vec![3, 3, 3]]
        );
    }

    #[test]
    fn parse_reals() {
        let mut src: TextGrid = "4 -2 4 -2\n3 1 4 2\n0.5 1e1 2 1".parse().unwrap();
        assert_eq!(
            src.read_real_grid().unwrap(),
            vec![
                vec![4.0, -2.0, 4.0, -2.0],
                vec![3.0, 1.0, 4.0, 2.0],
                vec![0.5, 10.0, 2.0, 1.0]
            ]
        );
    }

    #[test]
    fn parse_errors() {
        let mut src = TextGrid::new("1 2\n3 x");
        match src.read_integer_grid() {
            Err(SourceError::Parse { line, token }) => {
                assert_eq!(line, 2);
                assert_eq!(token, "x");
            }
            other => panic!("expected parse error, got {:?}", other),
        }

        // a real is not an integer
        let mut src = TextGrid::new("1.5");
        assert!(matches!(
            src.read_integer_grid(),
            Err(SourceError::Parse { line: 1, .. })
        ));

        let mut src = TextGrid::new("  \n# nothing here\n");
        assert!(matches!(src.read_real_grid(), Err(SourceError::Empty)));
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            TextGrid::from_path("/nonexistent/densegauss/matrix.txt"),
            Err(SourceError::Io(_))
        ));
    }

    #[test]
    fn from_file() {
        let path = std::env::temp_dir().join(format!("densegauss-{}.txt", std::process::id()));
        fs::write(&path, "1 2\n3 4\n").unwrap();
        let mut src = TextGrid::from_path(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(src.read_real_grid().unwrap(), vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    }
}
