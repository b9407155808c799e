use cave_generation::{Cave, CaveConfig};
use clap::Parser;
use std::path::PathBuf;

/// Cave generation configuration.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Config {
    /// YAML parameter file; defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Write the resolved parameters back out as YAML
    #[arg(short, long)]
    output_config: Option<PathBuf>,

    #[clap(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Config::parse();
    let config = match &args.config {
        Some(path) => CaveConfig::load(path)?,
        None => CaveConfig::default(),
    };

    if args.verbose {
        println!("Map size          : {}x{}", config.width, config.height);
        println!("Fill percent      : {}", config.fill_percent);
        println!("Smoothing passes  : {}", config.smooth_steps);
        println!("Kernel size       : {}", config.kernel.size());
        println!("Connection type   : {:?}", config.connection_type);
        println!("Seed              : {}", args.seed);
    }

    if let Some(path) = &args.output_config {
        config.save(path)?;
    }

    let cave = Cave::generate_seeded(config, args.seed)?;
    if let Some(grid) = cave.grid() {
        print!("{grid}");
    }

    if args.verbose {
        println!("Wall regions      : {}", cave.wall_regions().len());
        println!("Room regions      : {}", cave.room_regions().len());
        if let Some(summary) = cave.last_connection() {
            println!("Corridors carved  : {}/{}", summary.carved, summary.pairs);
        }
        println!("Fully connected   : {}", cave.is_fully_connected());
    }
    Ok(())
}
