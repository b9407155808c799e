use cave_generation::{Cave, CaveConfig, Stage};
use clap::Parser;
use rand::{SeedableRng, rngs::StdRng};
use std::path::PathBuf;

/// Print the cave after every pipeline stage.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Config {
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long, default_value_t = 0)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    let args = Config::parse();
    let config = match &args.config {
        Some(path) => CaveConfig::load(path)?,
        None => CaveConfig::default(),
    };

    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut cave = Cave::new(config)?;

    loop {
        let stage = cave.step(&mut rng);
        println!("== {stage}");
        if let Some(grid) = cave.grid() {
            print!("{grid}");
        }
        match stage {
            Stage::RegionsExtracted | Stage::Pruned => {
                println!(
                    "   {} wall regions, {} room regions",
                    cave.wall_regions().len(),
                    cave.room_regions().len()
                );
            }
            Stage::Connected => break,
            _ => {}
        }
    }

    for room in cave.room_regions() {
        let centroid = room.centroid();
        println!(
            "room {:>4}  tiles {:>5}  edges {:>4}  centre ({:6.1}, {:6.1})  connected {}",
            room.id(),
            room.len(),
            room.edge_tiles().len(),
            centroid.x,
            centroid.y,
            room.connected
        );
    }
    Ok(())
}
