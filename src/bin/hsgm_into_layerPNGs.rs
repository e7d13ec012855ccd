#![warn(clippy::pedantic, elided_lifetimes_in_paths, explicit_outlives_requirements)]
#![allow(non_snake_case)]

use {
	anyhow::{Context, Result},
	clap::Parser,
	hsgm_png::{encodePng, parse, Canvas, Config, Layer},
	std::{fs, path::PathBuf},
};

fn main() -> Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	/// Writes one PNG per entity layer: textures.png, colliders.png, triggers.png.
	#[derive(Parser, Debug)]
	struct Args {
		mapFile: PathBuf,
		outputDir: PathBuf,
		#[clap(long)]
		config: Option<PathBuf>,
	}
	let Args { mapFile, outputDir, config } = Args::parse();
	let config = config.map_or_else(|| Ok(Config::default()), |path| Config::load(&path))?;
	let parsedMap = parse(&mapFile)?;
	fs::create_dir_all(&outputDir).with_context(|| format!("{outputDir:?}"))?;
	for layer in Layer::ALL {
		let canvas = Canvas::renderLayers(&parsedMap, &config, &[layer])?;
		let path = outputDir.join(layer.name()).with_extension("png");
		encodePng(&path, canvas.width, canvas.height, &canvas.data)?;
		eprintln!("{}: {}", layer.name(), path.display());
	}
	Ok(())
}
