use std::fmt::Display;
use std::str::FromStr;

use thiserror::Error;

/// Rules of Conway's Game of Life, the only rule the engine simulates.
pub const B3S23: RuleSet = RuleSet::new(0b1000, 0b1100);

/// A birth/survival rule as found in pattern files.
///
/// # Representation
/// ```notrust
/// |------birth------|
/// 0000_0000_0000_0000_0000_0000_0000_0000
///                     |----survival-----|
/// ```
///
/// # Format
///
/// Either named, `B3/S23` (the slash and case are optional), or nameless in survival/birth order,
/// `23/3`.
///
/// See: https://conwaylife.com/wiki/Rulestring
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RuleSet {
    rule: u32,
}

impl Default for RuleSet {
    fn default() -> Self {
        B3S23
    }
}

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("Invalid character '{got}' in rule")]
    InvalidChar { got: char },

    #[error("Nameless rules need exactly one '/'")]
    MissingSlash,

    #[error("Unsupported rule {rule}, only B3/S23 can be simulated")]
    Unsupported { rule: RuleSet },
}

impl RuleSet {
    /// Create a new `RuleSet`. Bit `i` of `b` (resp. `s`) is on when `i` neighbors cause a birth
    /// (resp. survival). Any bit past the 8th is ignored.
    pub const fn new(b: u16, s: u16) -> Self {
        let b = b & 0x1FF;
        let s = s & 0x1FF;

        Self {
            rule: (b as u32) << 16 | s as u32,
        }
    }

    pub fn births(&self) -> u16 {
        ((self.rule >> 16) & 0x1FF) as u16
    }

    pub fn survivals(&self) -> u16 {
        (self.rule & 0x1FF) as u16
    }

    /// Fails unless this is Conway's rule.
    pub fn require_conway(self) -> Result<Self, RuleError> {
        if self == B3S23 {
            Ok(self)
        } else {
            Err(RuleError::Unsupported { rule: self })
        }
    }

    fn digits(s: &str) -> Result<u16, RuleError> {
        let mut n = 0;

        for c in s.chars() {
            match c.to_digit(10) {
                Some(d) if d <= 8 => n |= 1 << d,
                _ => return Err(RuleError::InvalidChar { got: c }),
            }
        }

        Ok(n)
    }
}

impl FromStr for RuleSet {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if !s.contains(['b', 'B', 's', 'S']) {
            let Some((s, b)) = s.split_once('/') else {
                return Err(RuleError::MissingSlash);
            };

            return Ok(RuleSet::new(Self::digits(b)?, Self::digits(s)?));
        }

        enum State {
            Birth,
            Survival,
        }

        let mut state = State::Birth;
        let (mut births, mut survivals) = (0, 0);

        for c in s.chars() {
            match c {
                'b' | 'B' => state = State::Birth,
                's' | 'S' => state = State::Survival,
                '/' => {}
                n => {
                    let n = n.to_digit(10).filter(|&n| n <= 8);
                    let Some(n) = n else {
                        return Err(RuleError::InvalidChar { got: c });
                    };

                    match state {
                        State::Birth => births |= 1 << n,
                        State::Survival => survivals |= 1 << n,
                    }
                }
            }
        }

        Ok(RuleSet::new(births, survivals))
    }
}

impl Display for RuleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let digits = |bits: u16| -> String {
            (0..=8u8)
                .filter(|&i| bits >> i & 1 == 1)
                .map(|i| char::from(b'0' + i))
                .collect()
        };

        write!(f, "B{}/S{}", digits(self.births()), digits(self.survivals()))
    }
}
