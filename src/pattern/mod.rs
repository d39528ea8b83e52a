//! Reading patterns from the common text formats.
//!
//! Every reader yields live cells with `x` growing east and `y` growing south, the way the
//! patterns read on screen.

use thiserror::Error;

use crate::parse_util;
use crate::world::Point;

pub mod life;
pub mod plaintext;
pub mod rle;
pub mod rule;

pub use life::LifeError;
pub use rle::RleError;
pub use rule::RuleError;
pub use rule::RuleSet;

/// A parsed pattern file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub name: Option<String>,
    pub author: Option<String>,

    /// Free text comments, in file order
    pub description: Vec<String>,

    /// Live cells
    pub cells: Vec<Point>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Rows of characters, `1`, `*` or `O` marking live cells
    Plaintext,

    /// `#Life 1.05`, rows of `*` and `.` placed by `#P` directives
    Life105,

    /// `#Life 1.06`, one `x y` coordinate pair per line
    Life106,

    /// Run length encoded, with an `x = .., y = ..` header
    Rle,
}

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("Life file error: {0}")]
    Life(#[from] LifeError),

    #[error("RLE file error: {0}")]
    Rle(#[from] RleError),
}

impl Format {
    /// Guess the format of a pattern file from its first lines.
    pub fn detect(bytes: &[u8]) -> Self {
        let mut bytes = parse_util::take_ws(bytes);

        if let Ok(rest) = parse_util::expect_slice(b"#Life 1.0", bytes) {
            match parse_util::peek_1(rest) {
                Some(b'5') => return Self::Life105,
                Some(b'6') => return Self::Life106,
                _ => {}
            }
        }

        // RLE files may open with comment lines, the header comes first after them
        while !bytes.is_empty() {
            let (line, rest) = parse_util::take_line(bytes);
            let line = parse_util::take_ws(line);

            match parse_util::peek_1(line) {
                Some(b'#') => bytes = rest,
                Some(b'x') => {
                    let after = parse_util::take_ws(&line[1..]);

                    if parse_util::peek_1(after) == Some(b'=') {
                        return Self::Rle;
                    }

                    break;
                }
                _ => break,
            }
        }

        Self::Plaintext
    }
}

/// Parse a pattern file, whatever its format.
pub fn read_pattern(bytes: &[u8]) -> Result<Pattern, PatternError> {
    let format = Format::detect(bytes);
    tracing::debug!(?format, "reading pattern");

    read_pattern_as(bytes, format)
}

/// Parse a pattern file of a known format.
pub fn read_pattern_as(bytes: &[u8], format: Format) -> Result<Pattern, PatternError> {
    let pattern = match format {
        Format::Plaintext => plaintext::read_plaintext(bytes),
        Format::Life105 => life::read_life_105(bytes)?,
        Format::Life106 => life::read_life_106(bytes)?,
        Format::Rle => rle::read_rle(bytes)?,
    };

    Ok(pattern)
}

#[cfg(test)]
mod test {
    use super::Format;
    use super::PatternError;
    use super::read_pattern;

    #[test]
    fn detect() {
        assert_eq!(Format::detect(b"#Life 1.05\n#P 0 0\n*"), Format::Life105);
        assert_eq!(Format::detect(b"#Life 1.06\n0 0\n"), Format::Life106);
        assert_eq!(Format::detect(b"x = 3, y = 1\n3o!"), Format::Rle);
        assert_eq!(Format::detect(b"#N Blinker\n#C a comment\nx=3,y=1\n3o!"), Format::Rle);
        assert_eq!(Format::detect(b"010\n010\n010\n"), Format::Plaintext);
        assert_eq!(Format::detect(b"!Name: Block\nOO\nOO\n"), Format::Plaintext);
        assert_eq!(Format::detect(b"x.x\n"), Format::Plaintext);
        assert_eq!(Format::detect(b""), Format::Plaintext);
    }

    #[test]
    fn same_pattern_every_format() {
        let files: [&[u8]; 4] = [
            b".*.\n..*\n***\n",
            b"#Life 1.05\n#P 0 0\n.*.\n..*\n***\n",
            b"#Life 1.06\n1 0\n2 1\n0 2\n1 2\n2 2\n",
            b"x = 3, y = 3, rule = B3/S23\nbo$2bo$3o!\n",
        ];

        for bytes in files {
            let mut cells = read_pattern(bytes).unwrap().cells;
            cells.sort();

            assert_eq!(cells, vec![(0, 2), (1, 0), (1, 2), (2, 1), (2, 2)]);
        }
    }

    #[test]
    fn unsupported_rule_is_a_parse_failure() {
        let err = read_pattern(b"x = 1, y = 1, rule = B36/S23\no!").unwrap_err();

        assert!(matches!(err, PatternError::Rle(_)));
        assert!(err.to_string().contains("B36/S23"));
    }
}
