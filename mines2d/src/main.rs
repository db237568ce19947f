use std::{path::PathBuf, str::FromStr};

use anyhow::{anyhow, ensure, Context};
use minefield::{Config, GameConfig, Grid, GridPos, MineMap, Position, RecordingSurface, Renderer};
use structopt::{clap::ArgMatches, StructOpt};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Renders a Minesweeper board, applies clicks to it and prints the result.
#[derive(Debug, StructOpt)]
#[structopt(name = "mines2d")]
struct Options {
    /// TOML config file with `[game]` and `[render]` sections.
    #[structopt(short, long, parse(from_os_str))]
    config: Option<PathBuf>,
    /// Number of fields per side, overriding the config file.
    #[structopt(short, long)]
    size: Option<usize>,
    /// Places a mine at `col,row`.
    #[structopt(long = "mine", number_of_values = 1)]
    mines: Vec<Pair<usize>>,
    /// Flags the field below the pixel `x,y`. Clicks are applied in the order they are given.
    #[structopt(long = "flag", number_of_values = 1)]
    flags: Vec<Pair<f32>>,
    /// Reveals the field below the pixel `x,y`. Clicks are applied in the order they are given.
    #[structopt(long = "reveal", number_of_values = 1)]
    reveals: Vec<Pair<f32>>,
}

/// Two comma separated values, such as `3,4`.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Pair<T>(T, T);

impl<T: FromStr> FromStr for Pair<T> {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (a, b) = s
            .split_once(',')
            .ok_or_else(|| anyhow!("expected two comma separated values, got {s:?}"))?;
        let parse = |value: &str| {
            value
                .trim()
                .parse()
                .map_err(|_| anyhow!("invalid value {value:?} in {s:?}"))
        };
        Ok(Self(parse(a)?, parse(b)?))
    }
}

/// Flag and reveal clicks, merged back into command line order.
fn clicks(matches: &ArgMatches, options: &Options) -> Vec<(Pair<f32>, bool)> {
    let mut clicks: Vec<_> = indexed(matches, "flags", &options.flags, true)
        .chain(indexed(matches, "reveals", &options.reveals, false))
        .collect();
    clicks.sort_by_key(|&(index, _)| index);
    clicks.into_iter().map(|(_, click)| click).collect()
}

fn indexed<'a>(
    matches: &'a ArgMatches,
    name: &str,
    points: &'a [Pair<f32>],
    flagging: bool,
) -> impl Iterator<Item = (usize, (Pair<f32>, bool))> + 'a {
    matches
        .indices_of(name)
        .into_iter()
        .flatten()
        .zip(points.iter().map(move |&point| (point, flagging)))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let matches = Options::clap().get_matches();
    let options = Options::from_clap(&matches);

    let mut config = match &options.config {
        Some(path) => Config::read(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(size) = options.size {
        config.game = GameConfig::new(size)?;
    }

    let field_size = config.game.field_size();
    let mut mine_map = MineMap::new(&config.game);
    for &Pair(col, row) in &options.mines {
        ensure!(
            col < field_size && row < field_size,
            "mine at {col},{row} is outside of the {field_size}x{field_size} board"
        );
        mine_map.place_mine(GridPos::new(col, row));
    }

    let mut grid = Grid::from_mine_map(config.game, &mine_map)?;
    let renderer = Renderer::new(config.game, config.render)?;
    info!(field_size, mines = mine_map.mine_count(), "board ready");

    // hitboxes only exist after the first render
    let mut surface = RecordingSurface::new();
    renderer.render(&mut grid, &mut surface)?;

    for (Pair(x, y), flagging) in clicks(&matches, &options) {
        match grid.click(Position::new(x, y), flagging) {
            Some(pos) => info!(?pos, flagging, "field hit"),
            None => warn!(x, y, "click missed the board"),
        }
    }

    surface.clear();
    renderer.render(&mut grid, &mut surface)?;

    print!("{grid}");
    println!(
        "{} fields, {} lines, {} counts drawn",
        surface.fills().len(),
        surface.strokes().len(),
        surface.texts().len()
    );

    Ok(())
}
