#![warn(clippy::pedantic, elided_lifetimes_in_paths, explicit_outlives_requirements)]
#![allow(non_snake_case)]

//! Parser for `.hsgm` map descriptions and an RGBA PNG writer for the images rendered from them.
//!
//! A map file is a list of `Key=Value` lines. Keys mentioning `Texture`, `Collider` or `Trigger`
//! carry an `x,y` position; keys of the form `Binding:<Type>:<Name>` carry a style value
//! (a texture path or a color token).

pub mod binding;
pub mod canvas;
pub mod config;
pub mod encode;
pub mod map;
pub mod tuple;

pub use {
	binding::{parseRgba, Binding, Rgba, OPAQUE_BLACK},
	canvas::{Canvas, Layer},
	config::{Config, Pattern},
	encode::{encodePng, encodePngTo},
	map::{entityName, parse, parseReader, Category, CoordinateTable, ParsedMap},
	tuple::{parseTuple, TupleError},
};

use {
	std::{io, path::PathBuf},
	thiserror::Error,
};

/// Position of an entity on the map.
pub type Coordinate = glam::IVec2;

pub type Result<T, E = Error> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
	#[error("{path:?}")]
	Io { path: PathBuf, source: io::Error },

	#[error("{path:?}:{line}: bad position {value:?} for {key:?}")]
	Format { path: PathBuf, line: usize, key: String, value: String, source: TupleError },

	#[error("PNG encoding failed")]
	Encode(#[from] png::EncodingError),

	#[error("{len} bytes of pixel data do not make a {width}x{height} RGBA image")]
	Precondition { width: u32, height: u32, len: usize },

	#[error("a {width}x{height} RGBA canvas cannot be allocated or encoded")]
	CanvasSize { width: u32, height: u32 },

	#[error("{path:?}: invalid config")]
	Config { path: PathBuf, source: toml::de::Error },
}

impl Error {
	pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
		let path = path.into();
		move |source| Self::Io { path, source }
	}
}
