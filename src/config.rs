use std::path::PathBuf;

use thiserror::Error;

use crate::render;

pub const USAGE: &str =
    "Usage: quadlife <PATTERN> [ITERATIONS] [--braille] [--width N] [--height N]";

/// Command line configuration of the `quadlife` binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Pattern file to load
    pub path: PathBuf,

    /// Generations to simulate
    pub iterations: u64,

    /// Draw a braille frame rather than a grid of `*` and `.`
    pub braille: bool,

    /// Size of the braille frame, in cells
    pub width: usize,
    pub height: usize,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{}", USAGE)]
    Help,

    #[error("Missing pattern file\n{}", USAGE)]
    MissingPath,

    #[error("{flag} requires a value")]
    MissingValue { flag: String },

    #[error("Invalid value \"{value}\" for {name}")]
    InvalidValue { name: String, value: String },

    #[error("Unexpected argument \"{arg}\"\n{}", USAGE)]
    UnexpectedArgument { arg: String },
}

impl Config {
    /// Parse the arguments following the program name.
    pub fn from_args<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut path = None;
        let mut iterations: Option<u64> = None;
        let mut braille = false;
        let mut width = render::DEFAULT_WIDTH;
        let mut height = render::DEFAULT_HEIGHT;

        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => return Err(ConfigError::Help),
                "--braille" => braille = true,
                "--width" => width = parse_value(&arg, args.next())?,
                "--height" => height = parse_value(&arg, args.next())?,
                _ if arg.starts_with("--") => {
                    return Err(ConfigError::UnexpectedArgument { arg });
                }
                _ if path.is_none() => path = Some(PathBuf::from(arg)),
                _ if iterations.is_none() => {
                    iterations = Some(parse("ITERATIONS", arg)?);
                }
                _ => return Err(ConfigError::UnexpectedArgument { arg }),
            }
        }

        let Some(path) = path else {
            return Err(ConfigError::MissingPath);
        };

        Ok(Self {
            path,
            iterations: iterations.unwrap_or(0),
            braille,
            width,
            height,
        })
    }
}

fn parse<T: std::str::FromStr>(name: &str, value: String) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        name: name.to_string(),
        value,
    })
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<String>) -> Result<T, ConfigError> {
    let Some(value) = value else {
        return Err(ConfigError::MissingValue {
            flag: flag.to_string(),
        });
    };

    parse(flag, value)
}
