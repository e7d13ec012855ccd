use {
	crate::{canvas::rgbaLen, Error, Result},
	log::info,
	png::{BitDepth, ColorType},
	std::{
		fs::File,
		io::{self, Write},
		path::Path,
	},
	tempfile::NamedTempFile,
};

fn checkDimensions(width: u32, height: u32, pixels: &[u8]) -> Result<()> {
	match rgbaLen(width, height) {
		Some(expectedLen) if expectedLen == pixels.len() => Ok(()),
		_ => Err(Error::Precondition { width, height, len: pixels.len() }),
	}
}

/// Streams `pixels` (RGBA8, row-major) to `writer` as an 8-bit, non-interlaced RGBA PNG.
pub fn encodePngTo(writer: impl Write, width: u32, height: u32, pixels: &[u8]) -> Result<()> {
	checkDimensions(width, height, pixels)?;
	let mut png = png::Encoder::new(writer, width, height);
	png.set_color(ColorType::Rgba);
	png.set_depth(BitDepth::Eight);
	let mut writer = png.write_header()?;
	writer.write_image_data(pixels)?;
	writer.finish()?;
	Ok(())
}

/// Writes `pixels` to `path` as a PNG, replacing any existing file.
///
/// Dimensions are validated and the image is encoded in memory before the destination is
/// touched. The bytes go to a temporary file next to `path` that is renamed over it only once
/// complete, so a failed write leaves the previous file, if any, as it was.
pub fn encodePng(path: impl AsRef<Path>, width: u32, height: u32, pixels: &[u8]) -> Result<()> {
	let path = path.as_ref();
	let mut encoded = Vec::new();
	encodePngTo(&mut encoded, width, height, pixels)?;
	replaceFile(path, |file| file.write_all(&encoded))?;
	info!("{path:?}: {width}x{height} RGBA, {} bytes", encoded.len());
	Ok(())
}

/// Lets `write` fill a temporary sibling of `path`, then moves it onto `path`. On any error the
/// temporary file is deleted and `path` is not touched.
pub(crate) fn replaceFile(path: &Path, write: impl FnOnce(&mut File) -> io::Result<()>) -> Result<()> {
	let dir = match path.parent() {
		Some(parent) if !parent.as_os_str().is_empty() => parent,
		_ => Path::new("."),
	};
	let mut temp = NamedTempFile::new_in(dir).map_err(Error::io(path))?;
	write(temp.as_file_mut()).and_then(|()| temp.as_file().sync_all()).map_err(Error::io(path))?;
	temp.persist(path).map_err(|err| Error::Io { path: path.to_owned(), source: err.error })?;
	Ok(())
}
