use tracing::warn;

use super::Pattern;
use crate::WorldOffset;
use crate::parse_util;

/// Parse a grid of characters, one row per line. `1`, `*` and `O` are live cells, anything else
/// is dead.
///
/// Lines starting with `!` are comments, as in `.cells` files. A `!Name:` comment names the
/// pattern.
///
/// See: https://conwaylife.com/wiki/Plaintext
pub fn read_plaintext(mut bytes: &[u8]) -> Pattern {
    let mut pattern = Pattern::default();
    let mut y = 0;

    while !bytes.is_empty() {
        let (line, rest) = parse_util::take_line(bytes);
        bytes = rest;

        if let Ok(comment) = parse_util::expect(b'!', line) {
            let comment = String::from_utf8_lossy(comment);

            if let Some(name) = comment.strip_prefix("Name:") {
                if pattern.name.is_some() {
                    warn!("Pattern name already defined. Using latest");
                }

                pattern.name = Some(name.trim().to_string());
            } else if let Some(author) = comment.strip_prefix("Author:") {
                pattern.author = Some(author.trim().to_string());
            } else {
                pattern.description.push(comment.trim().to_string());
            }

            continue;
        }

        for (x, &b) in line.iter().enumerate() {
            if matches!(b, b'1' | b'*' | b'O') {
                pattern.cells.push((x as WorldOffset, y));
            }
        }

        y += 1;
    }

    pattern
}
