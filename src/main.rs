use std::path::Path;

use clap::Parser;

use overland::explorer;
use overland::export::{export_window_png, ExportLayer};
use overland::field::FieldParams;
use overland::keybinds::KeyBindings;
use overland::storage::MapStorage;
use overland::world::{WorldConfig, WorldMap};

#[derive(Parser, Debug)]
#[command(name = "overland")]
#[command(about = "Explore an infinite procedurally generated tile world")]
struct Args {
    /// Map name; keys the saved tile cache
    #[arg(short, long, default_value = "world")]
    name: String,

    /// Random seed (uses a random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Window width in tiles
    #[arg(short = 'W', long, default_value = "80")]
    width: usize,

    /// Window height in tiles
    #[arg(short = 'H', long, default_value = "50")]
    height: usize,

    /// Directory for saved maps and keybind config
    #[arg(long, default_value = "data")]
    data_dir: String,

    /// Number of noise octaves for both fields
    #[arg(long, default_value = "6")]
    octaves: u32,

    /// Amplitude falloff per octave
    #[arg(long, default_value = "0.5")]
    persistence: f64,

    /// Frequency growth per octave
    #[arg(long, default_value = "2.0")]
    lacunarity: f64,

    /// Shaping exponent for the elevation field (higher = more ocean)
    #[arg(long, default_value = "1.6")]
    exponent: f64,

    /// Export the initial window to a PNG and exit
    #[arg(long)]
    export: Option<String>,

    /// Export raw field channels instead of biome colors
    #[arg(long)]
    export_fields: bool,

    /// Pixels per tile for PNG export
    #[arg(long, default_value = "4")]
    export_scale: u32,
}

fn main() {
    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);

    let elevation = FieldParams {
        octaves: args.octaves,
        persistence: args.persistence,
        lacunarity: args.lacunarity,
        exponent: args.exponent,
        ..FieldParams::default()
    };
    let moisture = FieldParams {
        octaves: args.octaves,
        persistence: args.persistence,
        lacunarity: args.lacunarity,
        ..FieldParams::default()
    };
    let config = WorldConfig {
        name: args.name.clone(),
        seed,
        width: args.width,
        height: args.height,
        origin: (0, 0),
        elevation,
        moisture,
    };

    let storage = MapStorage::new(&args.data_dir);
    let map = match WorldMap::load_or_new(config, &storage) {
        Ok(map) => map,
        Err(e) => {
            eprintln!("Failed to load map '{}': {}", args.name, e);
            std::process::exit(1);
        }
    };

    // Export exits early without launching the explorer
    if let Some(ref path) = args.export {
        let layer = if args.export_fields {
            ExportLayer::Fields
        } else {
            ExportLayer::Biome
        };
        match export_window_png(&map, layer, args.export_scale, path) {
            Ok(()) => println!("Exported window to: {}", path),
            Err(e) => eprintln!("Failed to export window: {}", e),
        }
        return;
    }

    let binds = KeyBindings::load(Path::new(&args.data_dir).join("keybinds.json"));
    if let Err(e) = explorer::run_explorer(map, storage, binds) {
        eprintln!("Explorer error: {}", e);
    }
}
