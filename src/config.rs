use {
	crate::{Error, Rgba, Result, OPAQUE_BLACK},
	clap::ValueEnum,
	log::info,
	serde::Deserialize,
	std::{fs, path::Path},
};

pub const DEFAULT_WIDTH: u32 = 256;
pub const DEFAULT_HEIGHT: u32 = 256;

/// What the synthesized image shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Pattern {
	/// Red follows x, green follows y.
	#[default]
	Gradient,
	/// One marker per parsed texture, collider and trigger.
	Entities,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	pub width: u32,
	pub height: u32,
	pub pattern: Pattern,
	pub tileSize: u32,
	pub textureColor: Rgba,
	pub colliderColor: Rgba,
	pub triggerColor: Rgba,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			width: DEFAULT_WIDTH,
			height: DEFAULT_HEIGHT,
			pattern: Pattern::default(),
			tileSize: 1,
			textureColor: [0xFF, 0, 0, 0xFF],
			colliderColor: OPAQUE_BLACK,
			triggerColor: OPAQUE_BLACK,
		}
	}
}

impl Config {
	pub fn load(path: &Path) -> Result<Self> {
		let text = fs::read_to_string(path).map_err(Error::io(path))?;
		let config = Self::fromToml(&text).map_err(|source| Error::Config { path: path.to_owned(), source })?;
		info!("{path:?}: {config:?}");
		Ok(config)
	}

	pub fn fromToml(text: &str) -> Result<Self, toml::de::Error> {
		toml::from_str(text)
	}
}
