use std::io;
use std::time::Instant;

use anyhow::Context;
use crossterm::execute;
use crossterm::style;
use tracing::info;
use tracing_subscriber::EnvFilter;

use quadlife::World;
use quadlife::config::Config;
use quadlife::config::ConfigError;
use quadlife::pattern;
use quadlife::render;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(io::stderr)
        .init();

    let config = match Config::from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(ConfigError::Help) => {
            println!("{}", quadlife::config::USAGE);
            return Ok(());
        }
        Err(e) => return Err(e).context("Invalid arguments"),
    };

    let bytes = std::fs::read(&config.path)
        .with_context(|| format!("Failed to read {}", config.path.display()))?;

    let pattern = pattern::read_pattern(&bytes)
        .with_context(|| format!("Failed to parse {}", config.path.display()))?;

    info!(
        name = pattern.name.as_deref().unwrap_or("unnamed"),
        cells = pattern.cells.len(),
        "loaded pattern"
    );

    let start = Instant::now();

    let mut world = World::from_points(&pattern.cells);
    world.advance(config.iterations);

    let elapsed = start.elapsed();
    let points = world.points();

    let frame = if config.braille {
        let origin = world.bounds().map(|(min, _)| min).unwrap_or_default();

        let mut frame = render::Braille::new(config.width, config.height);
        frame.draw(&points, origin);
        frame.render().to_string()
    } else {
        render::plaintext(&points)
    };

    let mut stdout = io::stdout();

    for line in frame.lines() {
        execute!(stdout, style::Print(line), style::Print("\n"))?;
    }

    execute!(
        stdout,
        style::Print(format!(
            "generation {}, population {}, {:.3?}\n",
            world.generation(),
            world.population(),
            elapsed
        ))
    )?;

    Ok(())
}
