use std::str::FromStr;
use std::str::Utf8Error;

use thiserror::Error;

pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Unexpected end of file, expected '{exp}'")]
    UnexpectedEof { exp: char },

    #[error("Expected '{exp}', but got '{got}'")]
    UnexpectedToken { exp: char, got: char },

    #[error("Expected \"{exp}\", but got \"{got}\"")]
    UnexpectedSlice { exp: String, got: String },
}

/// Consumes the slice until a non-ascii whitespace character is reached.
pub fn take_ws(bytes: &[u8]) -> &[u8] {
    let i = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());

    &bytes[i..]
}

/// Takes the next character from the slice. If none is found, the slice is left as-is.
pub const fn take_1(bytes: &[u8]) -> (Option<u8>, &[u8]) {
    let [b, bytes @ ..] = bytes else {
        return (None, bytes);
    };

    (Some(*b), bytes)
}

/// Like `take_1`, but doesn't consume the token
pub fn peek_1(bytes: &[u8]) -> Option<u8> {
    bytes.first().copied()
}

/// Splits off the next line, without its linebreak.
///
/// A linebreak is either `\n` or `\r\n`. The last line need not end with one.
pub fn take_line(bytes: &[u8]) -> (&[u8], &[u8]) {
    let (line, rest) = match bytes.iter().position(|&b| b == b'\n') {
        Some(i) => (&bytes[..i], &bytes[i + 1..]),
        None => (bytes, &bytes[bytes.len()..]),
    };

    let line = line.strip_suffix(b"\r").unwrap_or(line);

    (line, rest)
}

/// Iterates over the lines of `bytes`, as split by `take_line`.
pub fn lines(mut bytes: &[u8]) -> impl Iterator<Item = &[u8]> {
    std::iter::from_fn(move || {
        if bytes.is_empty() {
            return None;
        }

        let (line, rest) = take_line(bytes);
        bytes = rest;

        Some(line)
    })
}

/// Expects the next character in `bytes` to be `b`. Otherwise leaves `bytes` unchanged.
pub fn expect(b: u8, bytes: &[u8]) -> ParseResult<&[u8]> {
    let (Some(a), rest) = take_1(bytes) else {
        return Err(ParseError::UnexpectedEof { exp: b as char });
    };

    if a != b {
        return Err(ParseError::UnexpectedToken {
            exp: b as char,
            got: a as char,
        });
    }

    Ok(rest)
}

/// Expects `bytes` to start with `bs`, ignoring ascii case.
pub fn expect_slice<'a>(bs: &[u8], bytes: &'a [u8]) -> ParseResult<&'a [u8]> {
    let n = bs.len().min(bytes.len());
    let (head, rest) = bytes.split_at(n);

    if head.eq_ignore_ascii_case(bs) {
        Ok(rest)
    } else {
        Err(ParseError::UnexpectedSlice {
            exp: String::from_utf8_lossy(bs).to_string(),
            got: String::from_utf8_lossy(head).to_string(),
        })
    }
}

/// Advance the slice until `P` is satisfied, without consuming the byte satisfying it.
///
/// If `P` is never satisfied, the whole slice is taken. Returns `None` when nothing was taken.
#[inline]
pub fn take_until_fn<P>(p: P, bytes: &[u8]) -> (Option<&[u8]>, &[u8])
where
    P: Fn(u8) -> bool,
{
    let i = bytes.iter().position(|&b| p(b)).unwrap_or(bytes.len());

    if i == 0 {
        (None, bytes)
    } else {
        let (res, bytes) = bytes.split_at(i);

        (Some(res), bytes)
    }
}

/// Advance the slice until the first ascii whitespace character, without consuming it.
pub fn take_until_ws(bytes: &[u8]) -> (Option<&[u8]>, &[u8]) {
    take_until_fn(|a| a.is_ascii_whitespace(), bytes)
}

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Error parsing bytes from UTF-8: {0}")]
    InvalidUTF8(#[from] Utf8Error),

    #[error("Failed to convert \"{str}\"")]
    ParseError { str: String },
}

/// Converts `&[u8]` to `T` if `T: FromStr`. Surrounding whitespace is ignored.
pub fn convert<T: FromStr>(bytes: &[u8]) -> Result<T, ConvertError> {
    let str = std::str::from_utf8(bytes)?.trim();

    let Ok(res) = str.parse::<T>() else {
        return Err(ConvertError::ParseError {
            str: str.to_string(),
        });
    };

    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::ParseError;

    #[test]
    fn test_take_ws_full_ws() {
        let bytes = b"  ";

        let res = super::take_ws(bytes);

        assert_eq!(res, b"")
    }

    #[test]
    fn test_take_line() {
        let (line, rest) = super::take_line(b"ab\r\ncd");
        assert_eq!(line, b"ab");
        assert_eq!(rest, b"cd");

        let (line, rest) = super::take_line(rest);
        assert_eq!(line, b"cd");
        assert_eq!(rest, b"");
    }

    #[test]
    fn test_lines() {
        let lines: Vec<&[u8]> = super::lines(b"a\n\nb\r\n").collect();

        assert_eq!(lines, vec![b"a".as_slice(), b"".as_slice(), b"b".as_slice()]);
    }

    #[test]
    fn test_expect() {
        assert_eq!(super::expect(b'x', b"x = 1").unwrap(), b" = 1");

        let err = super::expect(b'x', b"y").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { exp: 'x', got: 'y' }));

        let err = super::expect(b'x', b"").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEof { exp: 'x' }));
    }

    #[test]
    fn test_expect_slice_ignores_case() {
        assert_eq!(super::expect_slice(b"rule", b"RULE = b3").unwrap(), b" = b3");
        assert!(super::expect_slice(b"rule", b"ru").is_err());
    }

    #[test]
    fn test_take_until_ws_takes_all() {
        let (res, rest) = super::take_until_ws(b"123");

        assert_eq!(res, Some(b"123".as_slice()));
        assert_eq!(rest, b"");

        let (res, rest) = super::take_until_ws(b" 1");
        assert_eq!(res, None);
        assert_eq!(rest, b" 1");
    }

    #[test]
    fn test_convert() {
        assert_eq!(super::convert::<i64>(b" -12 ").unwrap(), -12);
        assert!(super::convert::<u64>(b"x").is_err());
    }
}
