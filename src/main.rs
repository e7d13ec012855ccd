#![warn(clippy::pedantic, elided_lifetimes_in_paths, explicit_outlives_requirements)]
#![allow(non_snake_case)]

use {
	anyhow::Result,
	clap::Parser,
	hsgm_png::{encodePng, parse, Canvas, Config, Pattern},
	std::{path::PathBuf, process::ExitCode},
};

/// Renders an `.hsgm` map description into an RGBA PNG.
#[derive(Parser, Debug)]
#[clap(version)]
struct Args {
	mapFile: PathBuf,
	outputPng: PathBuf,
	/// TOML file with canvas and color settings
	#[clap(long)]
	config: Option<PathBuf>,
	#[clap(long, value_enum)]
	pattern: Option<Pattern>,
	#[clap(long)]
	width: Option<u32>,
	#[clap(long)]
	height: Option<u32>,
	/// Edge length in pixels of one entity marker
	#[clap(long)]
	tileSize: Option<u32>,
}

fn main() -> ExitCode {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
	let args = match Args::try_parse() {
		Ok(args) => args,
		Err(err) => {
			_ = err.print();
			return if err.use_stderr() { ExitCode::FAILURE } else { ExitCode::SUCCESS };
		}
	};
	match run(args) {
		Ok(outputPng) => {
			println!("PNG file generated: {}", outputPng.display());
			ExitCode::SUCCESS
		}
		Err(err) => {
			eprintln!("Error: {err:#}");
			ExitCode::FAILURE
		}
	}
}

fn run(args: Args) -> Result<PathBuf> {
	let Args { mapFile, outputPng, config, pattern, width, height, tileSize } = args;
	let mut config = match config {
		Some(path) => Config::load(&path)?,
		None => Config::default(),
	};
	macro_rules! override_ {
		($($field: ident),*) => {
			$(if let Some(value) = $field {
				config.$field = value;
			})*
		};
	}
	override_!(pattern, width, height, tileSize);

	let parsedMap = parse(&mapFile)?;
	let canvas = Canvas::render(&parsedMap, &config)?;
	encodePng(&outputPng, canvas.width, canvas.height, &canvas.data)?;
	Ok(outputPng)
}
