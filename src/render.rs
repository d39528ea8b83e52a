//! Text renderings of a set of live cells.

use tracing::warn;

use crate::WorldOffset;
use crate::world::Point;

/// Default frame size, in cells
pub const DEFAULT_WIDTH: usize = 80;
pub const DEFAULT_HEIGHT: usize = 40;

/// Hex values of braille dots
///
/// ```text
///  1   8
///  2  10
///  4  20
/// 40  80
/// ```
///
/// Where the base blank pattern is codepoint `0x2800` (or U+2800)
///
/// To get other configurations, just add the numbers above.
const BRAILLE_EMPTY: u32 = 0x2800;

/// A frame of `width * height` cells, drawn with one braille character per 2x4 cells.
pub struct Braille {
    /// The cell buffer
    cb: Vec<bool>,

    /// The frame buffer.
    fb: String,

    /// Codepoints, one per braille character
    cp: Vec<u32>,

    /// Width of the cell buffer
    w: usize,

    /// Height of the cell buffer
    h: usize,
}

impl Default for Braille {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl Braille {
    pub fn new(w: usize, h: usize) -> Self {
        // Let `w` and `h` refer to width and height of the cell buffer. Then `bw = ceil(w / 2)`
        // and `bh = ceil(h / 4)` are the width and height of braille characters of the frame.
        let (bw, bh) = (w.div_ceil(2), h.div_ceil(4));

        // Each braille character is 3 bytes, each newline one byte.
        let fb = String::with_capacity(3 * (bw * bh) + bh);

        Self {
            cb: vec![false; w * h],
            fb,
            cp: vec![BRAILLE_EMPTY; bw * bh],
            w,
            h,
        }
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    /// Turns on the cells at `points`, placing `origin` at the top left corner of the frame.
    /// Cells falling outside of the frame are skipped.
    pub fn draw(&mut self, points: &[Point], origin: Point) {
        let (w, h) = (self.w as WorldOffset, self.h as WorldOffset);

        for &(x, y) in points {
            let (Some(x), Some(y)) = (x.checked_sub(origin.0), y.checked_sub(origin.1)) else {
                continue;
            };

            if (0..w).contains(&x) && (0..h).contains(&y) {
                let i = self.xy_from(x as usize, y as usize);
                self.cb[i] = true;
            }
        }
    }

    /// Reset the cell buffer
    pub fn reset(&mut self) {
        self.cb.fill(false);
    }

    /// Rows of braille characters, joined by `\n`.
    pub fn render(&mut self) -> &str {
        let bw = self.w.div_ceil(2);

        // compute new codepoints
        self.cp.fill(BRAILLE_EMPTY);

        for (n, &px) in self.cb.iter().enumerate() {
            if px {
                let (x, y) = self.xy_to(n);
                self.cp[(y / 4) * bw + (x / 2)] += Self::get_hex_value(x, y);
            }
        }

        // update framebuffer
        self.fb.clear();

        for (i, &c) in self.cp.iter().enumerate() {
            if i > 0 && i % bw == 0 {
                self.fb.push('\n');
            }

            self.fb
                .push(char::from_u32(c).unwrap_or(char::REPLACEMENT_CHARACTER));
        }

        &self.fb
    }

    fn xy_to(&self, n: usize) -> (usize, usize) {
        (n % self.w, n / self.w)
    }

    fn xy_from(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }

    fn get_hex_value(x: usize, y: usize) -> u32 {
        match (x % 2, y % 4) {
            (0, 0) => 0x1,
            (1, 0) => 0x8,
            (0, 1) => 0x2,
            (1, 1) => 0x10,
            (0, 2) => 0x4,
            (1, 2) => 0x20,
            (0, 3) => 0x40,
            (1, 3) => 0x80,
            _ => unreachable!(),
        }
    }
}

/// Largest side, in cells, of a [`plaintext`] rendering
pub const PLAINTEXT_LIMIT: usize = 1 << 10;

/// `*` for live and `.` for dead cells, over the bounding box of `points`.
///
/// The grid starts at the north-west corner of the box and is clipped to [`PLAINTEXT_LIMIT`]
/// cells on each side.
pub fn plaintext(points: &[Point]) -> String {
    let Some(&(x0, y0)) = points.first() else {
        return String::new();
    };

    let (mut min, mut max) = ((x0, y0), (x0, y0));
    for &(x, y) in points {
        min = (min.0.min(x), min.1.min(y));
        max = (max.0.max(x), max.1.max(y));
    }

    // distance from `from` to `to`, `None` when it does not fit the frame
    let index = |from: WorldOffset, to: WorldOffset| {
        to.checked_sub(from)
            .and_then(|d| usize::try_from(d).ok())
            .filter(|&d| d < PLAINTEXT_LIMIT)
    };

    let (w, h) = (index(min.0, max.0), index(min.1, max.1));

    if w.is_none() || h.is_none() {
        warn!(limit = PLAINTEXT_LIMIT, "Pattern too large, clipping the grid");
    }

    let w = w.map_or(PLAINTEXT_LIMIT, |d| d + 1);
    let h = h.map_or(PLAINTEXT_LIMIT, |d| d + 1);

    let mut grid = vec![vec!['.'; w]; h];
    for &(x, y) in points {
        if let (Some(x), Some(y)) = (index(min.0, x), index(min.1, y)) {
            grid[y][x] = '*';
        }
    }

    grid.into_iter()
        .map(|row| row.into_iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod test {
    use super::Braille;
    use super::PLAINTEXT_LIMIT;
    use super::Point;
    use super::WorldOffset;
    use super::plaintext;

    const GLIDER: [Point; 5] = [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)];

    #[test]
    fn plaintext_glider() {
        insta::assert_snapshot!(plaintext(&GLIDER), @r"
        .*.
        ..*
        ***
        ");
    }

    #[test]
    fn plaintext_empty() {
        assert_eq!(plaintext(&[]), "");
    }

    #[test]
    fn plaintext_is_relative_to_bounds() {
        assert_eq!(plaintext(&[(-10, -10), (-8, -10)]), "*.*");
    }

    #[test]
    fn plaintext_is_clipped() {
        let text = plaintext(&[(0, 0), (1 << 33, 1 << 33), (1, PLAINTEXT_LIMIT as i128)]);
        let rows: Vec<&str> = text.lines().collect();

        assert_eq!(rows.len(), PLAINTEXT_LIMIT);
        assert!(rows.iter().all(|row| row.len() == PLAINTEXT_LIMIT));
        assert!(rows[0].starts_with("*."));
        assert_eq!(text.matches('*').count(), 1);
    }

    #[test]
    fn plaintext_far_apart() {
        let text = plaintext(&[(WorldOffset::MIN, 0), (WorldOffset::MAX, 0)]);

        assert_eq!(text.len(), PLAINTEXT_LIMIT);
        assert!(text.starts_with('*'));
    }

    #[test]
    fn braille_far_from_origin() {
        let mut frame = Braille::new(2, 4);
        frame.draw(&[(WorldOffset::MAX, 0), (0, 0)], (WorldOffset::MIN, 0));

        assert_eq!(frame.render(), "\u{2800}");
    }

    #[test]
    fn braille_glider() {
        let mut frame = Braille::new(4, 4);
        frame.draw(&GLIDER, (0, 0));

        insta::assert_snapshot!(frame.render(), @"⠬⠆");
    }

    #[test]
    fn braille_rows() {
        let mut frame = Braille::new(2, 8);
        frame.draw(&[(10, 20), (11, 27)], (10, 20));

        insta::assert_snapshot!(frame.render(), @r"
        ⠁
        ⢀
        ");
    }

    #[test]
    fn braille_skips_outside_cells() {
        let mut frame = Braille::new(2, 4);
        frame.draw(&[(-1, 0), (2, 0), (0, 4), (0, 0)], (0, 0));

        assert_eq!(frame.render(), "⠁");
    }

    #[test]
    fn braille_reset() {
        let mut frame = Braille::new(2, 4);
        frame.draw(&GLIDER, (0, 0));
        frame.reset();

        assert_eq!(frame.render(), "\u{2800}");
        assert_eq!((frame.width(), frame.height()), (2, 4));
    }
}
