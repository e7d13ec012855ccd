#![warn(clippy::pedantic, elided_lifetimes_in_paths, explicit_outlives_requirements)]
#![allow(non_snake_case)]

use {
	anyhow::Result,
	clap::Parser,
	hsgm_png::{parse, CoordinateTable},
	serde::Serialize,
	std::{
		collections::{BTreeMap, HashMap},
		io::{self, Write},
		path::PathBuf,
	},
};

fn main() -> Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

	/// Dumps the tables and bindings of a map file as TOML on stdout.
	#[derive(Parser, Debug)]
	struct Args {
		mapFile: PathBuf,
	}
	let Args { mapFile } = Args::parse();
	let parsedMap = parse(&mapFile)?;

	#[derive(Serialize)]
	struct MapTOML<'a> {
		textures: BTreeMap<&'a str, [i32; 2]>,
		colliders: BTreeMap<&'a str, [i32; 2]>,
		triggers: BTreeMap<&'a str, [i32; 2]>,
		binding: BindingTOML<'a>,
	}
	#[derive(Serialize)]
	struct BindingTOML<'a> {
		texture: BTreeMap<&'a str, &'a str>,
		collider: BTreeMap<&'a str, &'a str>,
		trigger: BTreeMap<&'a str, &'a str>,
	}
	fn positions(table: &CoordinateTable) -> BTreeMap<&str, [i32; 2]> {
		table.iter().map(|(key, position)| (key.as_str(), position.to_array())).collect()
	}
	fn sorted(bindings: &HashMap<String, String>) -> BTreeMap<&str, &str> {
		bindings.iter().map(|(name, value)| (name.as_str(), value.as_str())).collect()
	}
	let binding = &parsedMap.binding;
	let tomlString = toml::to_string_pretty(&MapTOML {
		textures: positions(&parsedMap.textures),
		colliders: positions(&parsedMap.colliders),
		triggers: positions(&parsedMap.triggers),
		binding: BindingTOML {
			texture: sorted(&binding.textureBindings),
			collider: sorted(&binding.colliderBindings),
			trigger: sorted(&binding.triggerBindings),
		},
	})?;
	io::stdout().lock().write_all(tomlString.as_bytes())?;
	Ok(())
}
