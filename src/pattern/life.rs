use thiserror::Error;
use tracing::warn;

use super::Pattern;
use super::rule::RuleError;
use super::rule::RuleSet;
use crate::WorldOffset;
use crate::parse_util;
use crate::parse_util::ConvertError;

#[derive(Debug, Error)]
pub enum LifeError {
    #[error("Expected a \"#Life {version}\" header")]
    MissingHeader { version: &'static str },

    #[error("Line {line}: unknown directive '#{got}'")]
    UnknownDirective { line: usize, got: char },

    #[error("Line {line}: invalid rule: {source}")]
    InvalidRule { line: usize, source: RuleError },

    #[error("Line {line}: expected two coordinates")]
    MissingCoordinate { line: usize },

    #[error("Line {line}: invalid coordinate: {source}")]
    InvalidCoordinate { line: usize, source: ConvertError },

    #[error("Line {line}: unexpected '{got}' in a cell row")]
    InvalidCell { line: usize, got: char },

    #[error("Line {line}: cell coordinates overflow")]
    Overflow { line: usize },
}

/// Strips the header line, or fails if it is missing.
fn read_header<'a>(bytes: &'a [u8], version: &'static str) -> Result<&'a [u8], LifeError> {
    let (header, rest) = parse_util::take_line(parse_util::take_ws(bytes));

    let header = parse_util::expect_slice(b"#Life ", header)
        .and_then(|h| parse_util::expect_slice(version.as_bytes(), h));

    match header {
        Ok(_) => Ok(rest),
        Err(_) => Err(LifeError::MissingHeader { version }),
    }
}

/// Parse an `x y` pair of whitespace separated coordinates.
fn read_coordinates(bytes: &[u8], line: usize) -> Result<(WorldOffset, WorldOffset), LifeError> {
    let bytes = parse_util::take_ws(bytes);
    let (Some(x), bytes) = parse_util::take_until_ws(bytes) else {
        return Err(LifeError::MissingCoordinate { line });
    };

    let bytes = parse_util::take_ws(bytes);
    let (Some(y), bytes) = parse_util::take_until_ws(bytes) else {
        return Err(LifeError::MissingCoordinate { line });
    };

    if !parse_util::take_ws(bytes).is_empty() {
        warn!(line, "Ignoring trailing characters after coordinates");
    }

    let convert = |bytes: &[u8]| {
        parse_util::convert::<WorldOffset>(bytes)
            .map_err(|source| LifeError::InvalidCoordinate { line, source })
    };

    Ok((convert(x)?, convert(y)?))
}

fn read_rule(bytes: &[u8], line: usize) -> Result<RuleSet, LifeError> {
    let rule = String::from_utf8_lossy(bytes);

    rule.parse::<RuleSet>()
        .and_then(RuleSet::require_conway)
        .map_err(|source| LifeError::InvalidRule { line, source })
}

/// Parse the Life 1.05 format.
///
/// Cells come in blocks of `.` and `*` rows, each block placed by the `#P x y` line before it.
/// `#D` (or `#C`) lines are description, `#N` selects the normal rules and `#R` spells out a rule,
/// which must be Conway's.
///
/// See: https://conwaylife.com/wiki/Life_1.05
pub fn read_life_105(bytes: &[u8]) -> Result<Pattern, LifeError> {
    let bytes = read_header(bytes, "1.05")?;

    let mut pattern = Pattern::default();
    let (mut x0, mut y0): (WorldOffset, WorldOffset) = (0, 0);
    let mut row = 0;

    // the header is the first line
    for (i, line) in parse_util::lines(bytes).enumerate() {
        let n = i + 2;

        let Ok(directive) = parse_util::expect(b'#', line) else {
            for (x, &b) in line.iter().enumerate() {
                match b {
                    b'*' => {
                        let cell = (x0.checked_add(x as WorldOffset), y0.checked_add(row));
                        let (Some(x), Some(y)) = cell else {
                            return Err(LifeError::Overflow { line: n });
                        };

                        pattern.cells.push((x, y));
                    }
                    b'.' => {}
                    b if b.is_ascii_whitespace() => {}
                    b => return Err(LifeError::InvalidCell { line: n, got: b as char }),
                }
            }

            row += 1;
            continue;
        };

        let (Some(kind), rest) = parse_util::take_1(directive) else {
            return Err(LifeError::UnknownDirective { line: n, got: ' ' });
        };

        match kind {
            b'D' | b'C' => {
                let text = String::from_utf8_lossy(parse_util::take_ws(rest));
                pattern.description.push(text.trim_end().to_string());
            }
            b'N' => {}
            b'R' => {
                read_rule(rest, n)?;
            }
            b'P' => {
                (x0, y0) = read_coordinates(rest, n)?;
                row = 0;
            }
            b => return Err(LifeError::UnknownDirective { line: n, got: b as char }),
        }
    }

    Ok(pattern)
}

/// Parse the Life 1.06 format, one `x y` pair per line. `#` lines are comments.
///
/// See: https://conwaylife.com/wiki/Life_1.06
pub fn read_life_106(bytes: &[u8]) -> Result<Pattern, LifeError> {
    let bytes = read_header(bytes, "1.06")?;

    let mut pattern = Pattern::default();

    for (i, line) in parse_util::lines(bytes).enumerate() {
        let n = i + 2;

        if let Ok(comment) = parse_util::expect(b'#', line) {
            let text = String::from_utf8_lossy(parse_util::take_ws(comment));
            pattern.description.push(text.trim_end().to_string());

            continue;
        }

        if parse_util::take_ws(line).is_empty() {
            continue;
        }

        pattern.cells.push(read_coordinates(line, n)?);
    }

    Ok(pattern)
}

#[cfg(test)]
mod test {
    use super::LifeError;
    use super::read_life_105;
    use super::read_life_106;

    #[test]
    fn blocks() {
        let bytes = b"#Life 1.05\n#D Two blinkers\n#N\n#P -1 -1\n***\n#P 10 0\n*\n*\n*\n";
        let pattern = read_life_105(bytes).unwrap();

        assert_eq!(pattern.description, vec!["Two blinkers".to_string()]);
        assert_eq!(
            pattern.cells,
            vec![(-1, -1), (0, -1), (1, -1), (10, 0), (10, 1), (10, 2)]
        );
    }

    #[test]
    fn conway_rule_accepted() {
        let pattern = read_life_105(b"#Life 1.05\n#R 23/3\n#P 0 0\n.*\n").unwrap();

        assert_eq!(pattern.cells, vec![(1, 0)]);
    }

    #[test]
    fn other_rule_rejected() {
        let err = read_life_105(b"#Life 1.05\n#R 23/36\n#P 0 0\n*\n").unwrap_err();

        assert!(matches!(err, LifeError::InvalidRule { line: 2, .. }));
    }

    #[test]
    fn bad_cells() {
        let err = read_life_105(b"#Life 1.05\n#P 0 0\n*x*\n").unwrap_err();

        assert!(matches!(err, LifeError::InvalidCell { line: 3, got: 'x' }));
    }

    #[test]
    fn bad_directive() {
        let err = read_life_105(b"#Life 1.05\n#Q what\n").unwrap_err();

        assert!(matches!(err, LifeError::UnknownDirective { line: 2, got: 'Q' }));
    }

    #[test]
    fn bad_position() {
        let err = read_life_105(b"#Life 1.05\n#P 1\n").unwrap_err();
        assert!(matches!(err, LifeError::MissingCoordinate { line: 2 }));

        let err = read_life_105(b"#Life 1.05\n#P a b\n").unwrap_err();
        assert!(matches!(err, LifeError::InvalidCoordinate { line: 2, .. }));
    }

    #[test]
    fn block_past_the_edge() {
        let bytes = b"#Life 1.05\n#P 170141183460469231731687303715884105726 0\n**\n.**\n";
        let err = read_life_105(bytes).unwrap_err();

        assert!(matches!(err, LifeError::Overflow { line: 4 }));
    }

    #[test]
    fn missing_header() {
        let err = read_life_105(b"#P 0 0\n*\n").unwrap_err();

        assert!(matches!(err, LifeError::MissingHeader { version: "1.05" }));
    }

    #[test]
    fn coordinates() {
        let bytes = b"#Life 1.06\n# glider\n0 -1\n1 0\n\n-1 1\r\n0 1\n1 1";
        let pattern = read_life_106(bytes).unwrap();

        assert_eq!(pattern.description, vec!["glider".to_string()]);
        assert_eq!(pattern.cells, vec![(0, -1), (1, 0), (-1, 1), (0, 1), (1, 1)]);
    }
}
