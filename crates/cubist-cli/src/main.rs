use std::path::{Path, PathBuf};
use std::process;

mod decode;
mod naming;

use cubist_core::grid::VoxelGrid;
use cubist_mesh::atlas::ColorAtlas;
use cubist_mesh::emit::{self, CollisionMode, CubeDims};
use cubist_mesh::{cull, merge};
use thiserror::Error;

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Decode(#[from] decode::DecodeError),

    #[error(transparent)]
    Grid(#[from] cubist_core::error::GridError),

    #[error(transparent)]
    Emit(#[from] cubist_mesh::EmitError),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

struct Options {
    input: PathBuf,
    dims: CubeDims,
    collision: Option<CollisionMode>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = parse_args();
    if let Err(err) = run(&options) {
        log::error!("{err}");
        process::exit(1);
    }
}

fn usage() {
    eprintln!("Usage: cubist -f <input.png> -x <width> -y <depth> -z <height> [-c <scale>]");
    eprintln!("  -f, --input <path>       Source image (8 bits per channel, with alpha)");
    eprintln!("  -x, --cube-width <n>     Scene units per pixel along the image's width");
    eprintln!("  -y, --cube-depth <n>     Scene units of constant model depth");
    eprintln!("  -z, --cube-height <n>    Scene units per pixel along the image's height");
    eprintln!("  -c, --collision <scale>  Emit a collision box; 0 fits the opaque bounds");
}

fn invalid(message: &str) -> ! {
    eprintln!("{message}");
    usage();
    process::exit(1);
}

fn parse_args() -> Options {
    let args: Vec<String> = std::env::args().collect();

    let mut input: Option<PathBuf> = None;
    let mut width: Option<u32> = None;
    let mut depth: Option<u32> = None;
    let mut height: Option<u32> = None;
    let mut collision: Option<CollisionMode> = None;

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--input" | "-f" => {
                i += 1;
                input = Some(PathBuf::from(flag_value(&args, i, flag)));
            }
            "--cube-width" | "-x" => {
                i += 1;
                width = Some(parse_dimension(flag_value(&args, i, flag), flag));
            }
            "--cube-depth" | "-y" => {
                i += 1;
                depth = Some(parse_dimension(flag_value(&args, i, flag), flag));
            }
            "--cube-height" | "-z" => {
                i += 1;
                height = Some(parse_dimension(flag_value(&args, i, flag), flag));
            }
            "--collision" | "-c" => {
                i += 1;
                collision = Some(parse_collision(flag_value(&args, i, flag)));
            }
            "--help" | "-h" => {
                usage();
                process::exit(0);
            }
            other => invalid(&format!("Unknown argument: {other}")),
        }
        i += 1;
    }

    match (input, width, depth, height) {
        (Some(input), Some(width), Some(depth), Some(height)) => Options {
            input,
            dims: CubeDims {
                width,
                depth,
                height,
            },
            collision,
        },
        _ => invalid("Missing required arguments"),
    }
}

fn flag_value<'a>(args: &'a [String], i: usize, flag: &str) -> &'a str {
    match args.get(i) {
        Some(value) => value,
        None => invalid(&format!("{flag} requires a value")),
    }
}

fn parse_dimension(value: &str, flag: &str) -> u32 {
    match value.parse() {
        Ok(n) if n > 0 => n,
        _ => invalid(&format!("{flag} must be a positive integer, got '{value}'")),
    }
}

fn parse_collision(value: &str) -> CollisionMode {
    match value.parse::<f32>() {
        Ok(scale) if scale == 0.0 => CollisionMode::AutoFit,
        Ok(scale) if scale > 0.0 && scale.is_finite() => CollisionMode::Scaled(scale),
        _ => invalid(&format!("-c must be a non-negative number, got '{value}'")),
    }
}

fn run(options: &Options) -> Result<(), CliError> {
    log::info!("Reading {}...", options.input.display());
    let img = decode::load(&options.input)?;
    let mut grid = VoxelGrid::build(img.width, img.height, &img.pixels)?;

    log::info!("Merging blocks...");
    merge::merge_rows(&mut grid);
    merge::merge_columns(&mut grid);
    cull::cull_faces(&mut grid);

    let names = naming::derive(&options.input);

    log::info!("Generating texture atlas...");
    let atlas = ColorAtlas::build(grid.palette());
    if atlas.is_empty() {
        log::warn!("image has no opaque pixels; skipping {}", names.texture);
    } else {
        atlas.save(Path::new(&names.texture))?;
    }

    let (model, bounds) = emit::emit_model(&grid, &atlas, options.dims, &names.texture)?;
    log::info!("Writing {} ({} triangles)...", names.model, model.triangle_count());
    write_file(&names.model, &model.render())?;

    if let Some(mode) = options.collision {
        if let Some(proxy) =
            emit::emit_collision(&grid, bounds, &atlas, options.dims, mode, &names.texture)
        {
            log::info!("Writing {}...", names.collision);
            write_file(&names.collision, &proxy.render())?;
        }
    }

    log::info!("Finished.");
    Ok(())
}

fn write_file(name: &str, contents: &str) -> Result<(), CliError> {
    std::fs::write(name, contents).map_err(|source| CliError::Write {
        path: PathBuf::from(name),
        source,
    })
}
