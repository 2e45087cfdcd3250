//! Planet preview binary: derives a planet and prints its properties, biome
//! weights and an ASCII map of heights and biomes.
//!
//! Usage: cargo run --release --bin preview_planet -- [OPTIONS]
//!
//! Options:
//!   --preset <NAME>   earth | moon | venus | desert | volcanic | oceanic (default: earth)
//!   --config <PATH>   Load a planet config JSON instead of a preset
//!   --save <PATH>     Write the config used to a JSON file
//!   --seed <SEED>     Override the seed (default: 12345)
//!   --size <N>        Map width/height in cells (default: 48)
//!   --step <BLOCKS>   World blocks per cell (default: 16)

use std::path::PathBuf;
use std::time::Instant;

use serde_json::json;

use planetforge::core::logging;
use planetforge::generation::{GenerationConfig, GenerationPipeline};
use planetforge::planet::{PlanetConfig, ScalarField};

const HEIGHT_SHADES: &[u8] = b" .:-=+*#%@";
const BIOME_GLYPHS: &[u8] = b"ABCDE";

fn main() {
    logging::init();

    let args: Vec<String> = std::env::args().collect();
    let preset = parse_str_arg(&args, "--preset").unwrap_or_else(|| "earth".to_string());
    let seed = parse_u64_arg(&args, "--seed");
    let size = parse_usize_arg(&args, "--size").unwrap_or(48).max(1);
    let step = parse_i32_arg(&args, "--step").unwrap_or(16).max(1);

    let mut config = match parse_str_arg(&args, "--config") {
        Some(path) => PlanetConfig::load(&PathBuf::from(path)).expect("Failed to load planet config"),
        None => PlanetConfig::preset(&preset, 12345).unwrap_or_else(|| {
            eprintln!("Unknown preset '{}', expected earth|moon|venus|desert|volcanic|oceanic", preset);
            std::process::exit(2);
        }),
    };
    if let Some(seed) = seed {
        config.seed = seed;
    }
    if let Some(path) = parse_str_arg(&args, "--save") {
        config.save(&PathBuf::from(&path)).expect("Failed to save planet config");
        println!("Saved config to {}", path);
    }

    let pipeline = GenerationPipeline::new(GenerationConfig::default());
    let start = Instant::now();
    let model = pipeline.create_planet(config).unwrap_or_else(|e| {
        eprintln!("Invalid planet: {}", e);
        std::process::exit(1);
    });
    let props = model.properties();

    println!("=== Planetforge Preview ===");
    println!("Planet:   {} ({})", model.name(), model.archetype().name());
    println!("Seed:     {}", model.seed());
    println!("Gravity:  {:.2} m/s^2", props.gravity);
    println!("Pressure: {:.3} atm", props.atmospheric_pressure);
    println!("Temp:     {:.1} C", props.average_surface_temp);
    println!("Habitability {:.2}, erosion {:.2}, rock {:.2}, tectonic {:.2}", props.habitability, props.erosion_rate, props.rock_exposure, props.tectonic_activity);
    println!("Sea level {} (liquid: {}), loose material: {}", props.sea_level, props.has_liquid, props.loose_material);
    println!();

    let variants = model.archetype().variants();
    println!("Biome weights:");
    for (i, &(variant, weight)) in model.biome_weights().weights().iter().enumerate() {
        let glyph = BIOME_GLYPHS.get(i).copied().unwrap_or(b'?') as char;
        println!("  {} {:<14} {:.3}", glyph, variant.name(), weight);
    }
    println!();

    let half = (size as i32 * step) / 2;
    let mut heights = Vec::with_capacity(size * size);
    let mut biome_rows = Vec::with_capacity(size);
    let mut min_h = f64::MAX;
    let mut max_h = f64::MIN;
    for row in 0..size {
        let z = row as i32 * step - half;
        let mut line = String::with_capacity(size);
        for col in 0..size {
            let x = col as i32 * step - half;
            let (h, biome) = model.sample_height_and_biome(x as f64, z as f64);
            min_h = min_h.min(h);
            max_h = max_h.max(h);
            heights.push(h);
            let idx = variants.iter().position(|&v| v == biome).unwrap_or(0);
            line.push(BIOME_GLYPHS.get(idx).copied().unwrap_or(b'?') as char);
        }
        biome_rows.push(line);
    }

    println!("Heights ({:.1} .. {:.1}, '~' = liquid):", min_h, max_h);
    let span = (max_h - min_h).max(1e-6);
    for row in heights.chunks(size) {
        let line: String = row
            .iter()
            .map(|&h| {
                if props.is_submerged(h) {
                    '~'
                } else {
                    let t = ((h - min_h) / span * (HEIGHT_SHADES.len() - 1) as f64).round() as usize;
                    HEIGHT_SHADES[t.min(HEIGHT_SHADES.len() - 1)] as char
                }
            })
            .collect();
        println!("  {}", line);
    }
    println!();

    println!("Biomes:");
    for line in &biome_rows {
        println!("  {}", line);
    }
    println!();

    let columns = pipeline.generate_chunk_columns(model.name(), 0, 0);
    let mean_temp = (0..size)
        .map(|i| {
            let p = i as f64 * step as f64;
            model.sample_scalar_field(p, -p, ScalarField::Temperature)
        })
        .sum::<f64>()
        / size as f64;

    let summary = json!({
        "name": model.name(),
        "archetype": model.archetype().name(),
        "seed": model.seed(),
        "gravity": props.gravity,
        "pressure": props.atmospheric_pressure,
        "temperature": props.average_surface_temp,
        "diagonal_mean_temperature": mean_temp,
        "habitability": props.habitability,
        "sea_level": props.sea_level,
        "has_liquid": props.has_liquid,
        "traits": model.traits(),
        "biomes": model.biome_weights().weights().iter().map(|(v, w)| {
            json!({"variant": v.name(), "weight": w})
        }).collect::<Vec<_>>(),
        "height_range": [min_h, max_h],
        "chunk_columns": columns.len(),
        "elapsed_ms": start.elapsed().as_secs_f64() * 1000.0,
    });
    println!("{}", serde_json::to_string_pretty(&summary).unwrap());
}

fn parse_u64_arg(args: &[String], flag: &str) -> Option<u64> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_i32_arg(args: &[String], flag: &str) -> Option<i32> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_usize_arg(args: &[String], flag: &str) -> Option<usize> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(|s| s.clone())
}
