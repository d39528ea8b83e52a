use thiserror::Error;
use tracing::warn;

use super::Pattern;
use super::rule::RuleError;
use super::rule::RuleSet;
use crate::WorldOffset;
use crate::parse_util;
use crate::parse_util::ConvertError;
use crate::parse_util::ParseError;

#[derive(Debug, Error)]
pub enum RleError {
    #[error("Comment line error: {0}")]
    CommentLine(#[from] RleCommentLineError),

    #[error("Header line error: {0}")]
    HeaderLine(#[from] RleHeaderLineError),

    #[error("Encoding error: {0}")]
    Encoding(#[from] RleEncodingError),
}

/// Parse the RLE file format.
///
/// Comment lines come first, then the `x = .., y = ..` header, then the run length encoded cells.
/// An offset given by a `#P` or `#R` line shifts every cell.
///
/// See: https://conwaylife.com/wiki/Run_Length_Encoded
pub fn read_rle(mut bytes: &[u8]) -> Result<Pattern, RleError> {
    let mut pattern = Pattern::default();
    let mut offset = None;

    // Parse as many comment lines as possible
    loop {
        let res = read_line_comment(parse_util::take_ws(bytes))?;
        let (Some(line), rest) = res else { break };

        match line {
            RleCommentLine::Comment { text } => pattern.description.push(text),
            RleCommentLine::Name { name } => {
                if pattern.name.is_some() {
                    warn!("RLE file name already defined. Using latest");
                }

                pattern.name = Some(name);
            }
            RleCommentLine::Author { author } => {
                if pattern.author.is_some() {
                    warn!("RLE author already defined. Using latest");
                }

                pattern.author = Some(author);
            }
            RleCommentLine::Offset { x, y } => {
                if offset.is_some() {
                    warn!("RLE offset already defined. Using latest");
                }

                offset = Some((x, y));
            }
            RleCommentLine::Rule => {}
        }

        bytes = rest;
    }

    // Parse header line, if it's present
    let (header, rest) = read_line_header(bytes)?;
    bytes = rest;

    let offset = offset.unwrap_or_default();
    let (w, h) = read_encoding(bytes, offset, |x, y| pattern.cells.push((x, y)))?;

    if let Some(RleHeaderLine { width, height }) = header {
        if w > width || h > height {
            warn!(width, height, "RLE cells lie outside of the declared size");
        }
    }

    Ok(pattern)
}

enum RleCommentLine {
    Comment { text: String },
    Name { name: String },
    Author { author: String },
    Offset { x: WorldOffset, y: WorldOffset },
    Rule,
}

#[derive(Debug, Error)]
pub enum RleCommentLineError {
    #[error("No comment type")]
    NoType,

    #[error("Empty name line")]
    EmptyName,

    #[error("Empty author line")]
    EmptyAuthor,

    #[error("Invalid rule: {0}")]
    InvalidRule(#[from] RuleError),

    #[error("Expected two offset coordinates")]
    MissingOffset,

    #[error("Invalid offset: {0}")]
    InvalidOffset(#[source] ConvertError),

    #[error("Invalid comment type, found '{got}'")]
    InvalidType { got: char },
}

/// Attempt to parse a comment line, otherwise leaves `bytes` as-is.
fn read_line_comment(bytes: &[u8]) -> Result<(Option<RleCommentLine>, &[u8]), RleCommentLineError> {
    let Ok(line) = parse_util::expect(b'#', bytes) else {
        return Ok((None, bytes));
    };

    let (line, rest) = parse_util::take_line(line);

    let (Some(b), line) = parse_util::take_1(line) else {
        return Err(RleCommentLineError::NoType);
    };

    let text = || String::from_utf8_lossy(parse_util::take_ws(line)).trim_end().to_string();

    let line = match b {
        // Comment line
        b'C' | b'c' => RleCommentLine::Comment { text: text() },

        // Pattern name
        b'N' => {
            let name = text();
            if name.is_empty() {
                return Err(RleCommentLineError::EmptyName);
            }

            RleCommentLine::Name { name }
        }

        // Pattern author
        b'O' => {
            let author = text();
            if author.is_empty() {
                return Err(RleCommentLineError::EmptyAuthor);
            }

            RleCommentLine::Author { author }
        }

        // Pattern offset
        b'R' | b'P' => {
            let (x, y) = read_offset(line)?;

            RleCommentLine::Offset { x, y }
        }

        // Pattern rules, in survival/birth order
        b'r' => {
            text().parse::<RuleSet>()?.require_conway()?;

            RleCommentLine::Rule
        }

        b => return Err(RleCommentLineError::InvalidType { got: b as char }),
    };

    Ok((Some(line), rest))
}

fn read_offset(bytes: &[u8]) -> Result<(WorldOffset, WorldOffset), RleCommentLineError> {
    let (Some(x), bytes) = parse_util::take_until_ws(parse_util::take_ws(bytes)) else {
        return Err(RleCommentLineError::MissingOffset);
    };

    let (Some(y), _) = parse_util::take_until_ws(parse_util::take_ws(bytes)) else {
        return Err(RleCommentLineError::MissingOffset);
    };

    let convert = |bytes: &[u8]| {
        parse_util::convert::<WorldOffset>(bytes).map_err(RleCommentLineError::InvalidOffset)
    };

    Ok((convert(x)?, convert(y)?))
}

struct RleHeaderLine {
    width: WorldOffset,
    height: WorldOffset,
}

#[derive(Debug, Error)]
pub enum RleHeaderLineError {
    #[error("Parse error: {0}")]
    ParseError(#[from] ParseError),

    #[error("Expected a value for '{axis}'")]
    MissingSize { axis: char },

    #[error("Failed to parse '{axis}': {source}")]
    InvalidSize { axis: char, source: ConvertError },

    #[error("Invalid token: expected ',' or '\\n', found '{got}'")]
    InvalidToken { got: char },

    #[error("Invalid rule: {0}")]
    InvalidRule(#[from] RuleError),
}

/// Attempt to parse a header line, otherwise leaves `bytes` as-is.
fn read_line_header(bytes: &[u8]) -> Result<(Option<RleHeaderLine>, &[u8]), RleHeaderLineError> {
    let (line, rest) = parse_util::take_line(parse_util::take_ws(bytes));

    if parse_util::peek_1(line) != Some(b'x') {
        return Ok((None, bytes));
    }

    let (width, line) = read_size(b'x', line)?;
    let line = parse_util::expect(b',', parse_util::take_ws(line))?;
    let (height, line) = read_size(b'y', parse_util::take_ws(line))?;

    match parse_util::take_1(parse_util::take_ws(line)) {
        (None, _) => {}
        (Some(b','), line) => {
            let line = parse_util::take_ws(line);
            let line = parse_util::expect_slice(b"rule", line)?;
            let line = parse_util::take_ws(line);
            let line = parse_util::expect(b'=', line)?;

            String::from_utf8_lossy(line)
                .parse::<RuleSet>()?
                .require_conway()?;
        }
        (Some(b), _) => return Err(RleHeaderLineError::InvalidToken { got: b as char }),
    }

    Ok((Some(RleHeaderLine { width, height }), rest))
}

/// Parse `axis = n`, up to the next `,` or whitespace.
fn read_size(axis: u8, bytes: &[u8]) -> Result<(WorldOffset, &[u8]), RleHeaderLineError> {
    let bytes = parse_util::expect(axis, bytes)?;
    let bytes = parse_util::take_ws(bytes);
    let bytes = parse_util::expect(b'=', bytes)?;
    let bytes = parse_util::take_ws(bytes);

    let p = |b: u8| b == b',' || b.is_ascii_whitespace();
    let (Some(n), bytes) = parse_util::take_until_fn(p, bytes) else {
        return Err(RleHeaderLineError::MissingSize { axis: axis as char });
    };

    let n = parse_util::convert(n).map_err(|source| RleHeaderLineError::InvalidSize {
        axis: axis as char,
        source,
    })?;

    Ok((n, bytes))
}

#[derive(Debug, Error)]
pub enum RleEncodingError {
    #[error("Unexpected EOF, expected '!'")]
    UnexpectedEof,

    #[error("Failed to convert run length: {0}")]
    RunLength(#[from] ConvertError),

    #[error("Unrecognized byte: 0x{got:0X}")]
    UnrecognizedByte { got: u8 },

    #[error("Cell coordinates overflow")]
    Overflow,
}

/// Decode the cells up to the closing `!`, calling `f` on each live one, shifted by `offset`.
/// Anything after the `!` is ignored.
///
/// Returns the width and height of the smallest box holding the live cells, before shifting.
fn read_encoding<F>(
    mut bytes: &[u8],
    (dx, dy): (WorldOffset, WorldOffset),
    mut f: F,
) -> Result<(WorldOffset, WorldOffset), RleEncodingError>
where
    F: FnMut(WorldOffset, WorldOffset),
{
    let add = |a: WorldOffset, b: WorldOffset| a.checked_add(b).ok_or(RleEncodingError::Overflow);

    let mut rep: WorldOffset = 1;

    let (mut x, mut y) = (0, 0);
    let (mut w, mut h) = (0, 0);

    loop {
        let (Some(b), rest) = parse_util::take_1(bytes) else {
            return Err(RleEncodingError::UnexpectedEof);
        };
        bytes = rest;

        match b {
            b if b.is_ascii_whitespace() => {}

            // End of input
            b'!' => break,

            // Dead cells
            b'b' | b'.' => {
                x = add(x, rep)?;
                rep = 1;
            }

            // Live cells
            b'o' => {
                let end = add(x, rep)?;
                let cy = add(dy, y)?;

                for cx in x..end {
                    f(add(dx, cx)?, cy)
                }

                (w, h) = (w.max(end), h.max(add(y, 1)?));

                x = end;
                rep = 1;
            }

            // End of line
            b'$' => {
                y = add(y, rep)?;
                x = 0;
                rep = 1;
            }

            b'0'..=b'9' => {
                let (n, rest) = parse_util::take_until_fn(|b| !b.is_ascii_digit(), bytes);
                bytes = rest;

                let digits = [&[b][..], n.unwrap_or_default()].concat();
                rep = parse_util::convert(&digits)?;
            }

            b => return Err(RleEncodingError::UnrecognizedByte { got: b }),
        }
    }

    Ok((w, h))
}
