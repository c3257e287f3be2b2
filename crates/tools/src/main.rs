mod canvas;
mod settings;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Args, Parser, Subcommand};
use delve::tile::names;
use delve::{
    Direction, Dungeon, Level, LightingEngine, RenderTarget, TileCatalog, Viewshed,
    generate_dungeon,
};
use log::LevelFilter;

use canvas::Canvas;
use settings::{Overrides, Settings};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace). RUST_LOG wins when set.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// TOML settings file with a [dungeon] table
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a dungeon and print every level
    Generate(GenerateArgs),
    /// Spawn the player on the first level, walk a path, and print what they saw
    Walk(WalkArgs),
}

#[derive(Args)]
struct DungeonArgs {
    #[arg(short, long)]
    seed: Option<u64>,
    #[arg(short, long)]
    levels: Option<usize>,
    #[arg(long)]
    width: Option<usize>,
    #[arg(long)]
    height: Option<usize>,
    #[arg(long)]
    rooms: Option<usize>,
    /// Print with ANSI colors instead of plain glyphs
    #[arg(long)]
    color: bool,
}

impl DungeonArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            seed: self.seed,
            levels: self.levels,
            width: self.width,
            height: self.height,
            rooms: self.rooms,
        }
    }
}

#[derive(Args)]
struct GenerateArgs {
    #[command(flatten)]
    dungeon: DungeonArgs,
}

#[derive(Args)]
struct WalkArgs {
    #[command(flatten)]
    dungeon: DungeonArgs,
    /// Comma-separated steps, e.g. `e,e,se,s,w`
    #[arg(short, long, value_delimiter = ',', value_parser = parse_direction)]
    path: Vec<Direction>,
}

fn parse_direction(token: &str) -> Result<Direction> {
    let direction = match token.trim().to_ascii_lowercase().as_str() {
        "n" | "north" => Direction::North,
        "ne" | "northeast" => Direction::NorthEast,
        "e" | "east" => Direction::East,
        "se" | "southeast" => Direction::SouthEast,
        "s" | "south" => Direction::South,
        "sw" | "southwest" => Direction::SouthWest,
        "w" | "west" => Direction::West,
        "nw" | "northwest" => Direction::NorthWest,
        "." | "wait" => Direction::None,
        other => bail!("unknown direction '{other}'"),
    };
    Ok(direction)
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new().filter_level(level).parse_default_env().init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut settings = Settings::load(cli.config.as_deref())?;
    match cli.command {
        Command::Generate(args) => {
            settings.apply(args.dungeon.overrides());
            run_generate(&settings, args.dungeon.color)
        }
        Command::Walk(args) => {
            settings.apply(args.dungeon.overrides());
            run_walk(&settings, &args.path, args.dungeon.color)
        }
    }
}

fn build_dungeon(settings: &Settings) -> Result<(Dungeon, TileCatalog)> {
    let catalog = settings.catalog()?;
    let dungeon = generate_dungeon(&settings.dungeon, &catalog)
        .with_context(|| format!("Failed to generate dungeon for seed {}", settings.dungeon.seed))?;
    Ok((dungeon, catalog))
}

fn print_level(level: &Level, color: bool) -> Result<()> {
    if color {
        let mut canvas = Canvas::for_level(level);
        canvas.draw_all(&level.render_all());
        canvas.write_colored(&mut io::stdout().lock()).context("Failed to write level")?;
    } else {
        println!("{level}");
    }
    Ok(())
}

fn run_generate(settings: &Settings, color: bool) -> Result<()> {
    let (mut dungeon, _) = build_dungeon(settings)?;
    let levels = dungeon.len();
    for index in 0..levels {
        let Some(level) = dungeon.level_mut(index) else {
            continue;
        };
        if color {
            // Show the whole map: generation leaves every cell unexplored.
            let positions: Vec<_> = level.iter().map(|(pos, _)| pos).collect();
            for pos in positions {
                if let Ok(tile) = level.get_mut(pos) {
                    tile.explored = true;
                }
            }
        }
        println!(
            "Level {index}: {}x{}, {} rooms, {} entities",
            level.width(),
            level.height(),
            level.rooms().len(),
            level.entities().count()
        );
        print_level(level, color)?;
    }
    println!("Seed: {}", dungeon.seed());
    println!("Fingerprint: {:016x}", dungeon.fingerprint());
    Ok(())
}

fn run_walk(settings: &Settings, path: &[Direction], color: bool) -> Result<()> {
    let (mut dungeon, catalog) = build_dungeon(settings)?;
    let level = dungeon.level_mut(0).context("Dungeon has no levels")?;

    let mut engine = LightingEngine::new(&settings.dungeon.light);
    let light = engine.player_light();
    let player = catalog.get(names::PLAYER)?;
    let id = level.spawn_player(player, Some(light)).context("Failed to spawn the player")?;
    let mut viewer = level.entity(id).map(|entity| entity.pos).context("Player vanished")?;

    let mut canvas = Canvas::for_level(level);
    let mut viewshed = Viewshed::new();
    canvas.draw_all(&engine.refresh(level));
    canvas.draw_all(&viewshed.update(level, viewer));

    let mut blocked = 0;
    for &direction in path {
        let Some(step) = level.move_entity(id, direction) else {
            let target = viewer + direction;
            if level.open_door(target, &catalog).unwrap_or(false) {
                log::info!("opened door at ({}, {})", target.x, target.y);
            } else {
                log::info!("blocked moving {direction:?} from ({}, {})", viewer.x, viewer.y);
                blocked += 1;
                continue;
            }
            canvas.draw_all(&engine.refresh(level));
            canvas.draw_all(&viewshed.update(level, viewer));
            continue;
        };
        viewer = step.to;
        canvas.draw_all(&engine.refresh(level));
        canvas.draw_all(&viewshed.update(level, viewer));
        // Both cells may keep their light and visibility, so neither update redraws them.
        for pos in [step.from, step.to] {
            if let Ok(request) = level.render_request(pos) {
                canvas.draw(&request);
            }
        }
    }

    if color {
        canvas.write_colored(&mut io::stdout().lock()).context("Failed to write map")?;
    } else {
        print!("{}", canvas.to_ascii());
    }
    let explored = level.iter().filter(|(_, tile)| tile.explored).count();
    println!(
        "Walked {} of {} steps to ({}, {}); {} cells explored, {} visible",
        path.len() - blocked,
        path.len(),
        viewer.x,
        viewer.y,
        explored,
        viewshed.visible().len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directions_parse_short_and_long_forms() {
        assert_eq!(parse_direction("ne").expect("valid"), Direction::NorthEast);
        assert_eq!(parse_direction(" South ").expect("valid"), Direction::South);
        assert_eq!(parse_direction(".").expect("valid"), Direction::None);
        assert!(parse_direction("up").is_err());
    }

    #[test]
    fn walk_arguments_split_on_commas() {
        let cli = Cli::try_parse_from(["delve", "walk", "--seed", "4", "--path", "e,e,s"])
            .expect("valid arguments");
        let Command::Walk(args) = cli.command else {
            panic!("expected walk");
        };
        assert_eq!(args.path, vec![Direction::East, Direction::East, Direction::South]);
        assert_eq!(args.dungeon.seed, Some(4));
    }

    #[test]
    fn verbosity_counts_repeats() {
        let cli = Cli::try_parse_from(["delve", "-vv", "generate"]).expect("valid arguments");
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Command::Generate(_)));
    }
}
