use cave_generation::{CaveConfig, Tile, generate_batch};
use clap::Parser;
use std::path::PathBuf;

/// Generate many caves in parallel and report statistics.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Config {
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of caves to generate
    #[arg(short, long, default_value_t = 64)]
    num_caves: u64,

    /// First seed; caves use consecutive seeds from here
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    #[clap(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Config::parse();
    let config = match &args.config {
        Some(path) => CaveConfig::load(path)?,
        None => CaveConfig::default(),
    };

    let seeds: Vec<u64> = (args.seed..args.seed + args.num_caves).collect();
    let caves = generate_batch(&config, &seeds, true)?;

    let total = (config.width * config.height) as f64;
    let mut connected = 0;
    for (seed, cave) in seeds.iter().zip(&caves) {
        let open = cave.grid().map_or(0, |grid| grid.count(Tile::Empty));
        if cave.is_fully_connected() {
            connected += 1;
        }
        if args.verbose {
            println!(
                "seed {seed:>6}  rooms {:>3}  open {:5.1}%  connected {}",
                cave.room_regions().len(),
                100.0 * open as f64 / total,
                cave.is_fully_connected()
            );
        }
    }

    println!("Fully connected caves: {connected}/{}", caves.len());
    Ok(())
}
