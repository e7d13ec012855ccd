use {
	crate::{entityName, Config, Coordinate, CoordinateTable, Error, ParsedMap, Pattern, Result, Rgba},
	core::ops::Range,
	log::debug,
};

pub const RGBA_SIZE: usize = 4;

/// Largest edge length the PNG format allows.
pub const MAX_SIDE: u32 = i32::MAX as u32;

/// Byte length of a `width`x`height` RGBA8 image, `None` for an empty, oversized or unaddressable one.
pub fn rgbaLen(width: u32, height: u32) -> Option<usize> {
	if width == 0 || height == 0 || width > MAX_SIDE || height > MAX_SIDE {
		return None;
	}
	usize::try_from(width).ok()?.checked_mul(usize::try_from(height).ok()?)?.checked_mul(RGBA_SIZE)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
	Textures,
	Colliders,
	Triggers,
}

impl Layer {
	/// Drawing order.
	pub const ALL: [Self; 3] = [Self::Textures, Self::Colliders, Self::Triggers];

	pub fn name(self) -> &'static str {
		match self {
			Self::Textures => "textures",
			Self::Colliders => "colliders",
			Self::Triggers => "triggers",
		}
	}
}

/// RGBA8 pixels, row-major, origin top-left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
	pub width: u32,
	pub height: u32,
	pub data: Vec<u8>,
}

impl Canvas {
	/// Fully transparent canvas. Fails without allocating when the size cannot become a PNG, and
	/// when the allocator refuses the buffer.
	pub fn fromWidthHeight(width: u32, height: u32) -> Result<Self> {
		let sizeError = || Error::CanvasSize { width, height };
		let len = rgbaLen(width, height).ok_or_else(sizeError)?;
		let mut data = Vec::new();
		data.try_reserve_exact(len).map_err(|_| sizeError())?;
		data.resize(len, 0);
		Ok(Self { width, height, data })
	}

	/// Placeholder image: red follows x, green follows y (both modulo 256), opaque.
	pub fn gradient(width: u32, height: u32) -> Result<Self> {
		let mut canvas = Self::fromWidthHeight(width, height)?;
		for (i, pixel) in canvas.data.chunks_exact_mut(RGBA_SIZE).enumerate() {
			let (y, x) = (i / width as usize, i % width as usize);
			pixel.copy_from_slice(&[x as u8, y as u8, 0, 0xFF]);
		}
		Ok(canvas)
	}

	/// One `tileSize`-square marker per entity over a transparent background. Triggers are drawn
	/// last, so they end up on top of colliders, which end up on top of textures.
	pub fn renderEntities(parsedMap: &ParsedMap, config: &Config) -> Result<Self> {
		Self::renderLayers(parsedMap, config, &Layer::ALL)
	}

	pub fn renderLayers(parsedMap: &ParsedMap, config: &Config, layers: &[Layer]) -> Result<Self> {
		let (mut canvas, binding) = (Self::fromWidthHeight(config.width, config.height)?, &parsedMap.binding);
		for layer in layers {
			match layer {
				Layer::Textures => canvas.drawLayer(&parsedMap.textures, config.tileSize, |_| config.textureColor),
				Layer::Colliders => canvas.drawLayer(&parsedMap.colliders, config.tileSize, |name| {
					binding.colliderRgbaOr(name, config.colliderColor)
				}),
				Layer::Triggers => canvas.drawLayer(&parsedMap.triggers, config.tileSize, |name| {
					binding.triggerRgbaOr(name, config.triggerColor)
				}),
			}
		}
		Ok(canvas)
	}

	pub fn render(parsedMap: &ParsedMap, config: &Config) -> Result<Self> {
		match config.pattern {
			Pattern::Gradient => Self::gradient(config.width, config.height),
			Pattern::Entities => Self::renderEntities(parsedMap, config),
		}
	}

	/// Draws every entity of `table` with the color `colorOf` picks for its name.
	pub fn drawLayer(&mut self, table: &CoordinateTable, tileSize: u32, colorOf: impl Fn(&str) -> Rgba) {
		for (key, &position) in table {
			if !self.fillTile(position, tileSize, colorOf(entityName(key))) {
				debug!("{key:?} at {position} lies outside the {}x{} canvas", self.width, self.height);
			}
		}
	}

	/// Fills the tile at `position` (in tile units), clipped to the canvas. Returns whether any
	/// pixel was written.
	pub fn fillTile(&mut self, position: Coordinate, tileSize: u32, color: Rgba) -> bool {
		let clip = |start: i32, limit: u32| -> Range<usize> {
			let start = i64::from(start) * i64::from(tileSize);
			let limit = i64::from(limit);
			let end = (start + i64::from(tileSize)).min(limit);
			start.clamp(0, limit) as usize..end.max(0) as usize
		};
		let (columns, rows) = (clip(position.x, self.width), clip(position.y, self.height));
		if columns.is_empty() || rows.is_empty() {
			return false;
		}
		let rowLen = self.width as usize * RGBA_SIZE;
		for y in rows {
			let row = &mut self.data[y * rowLen..][columns.start * RGBA_SIZE..columns.end * RGBA_SIZE];
			for pixel in row.chunks_exact_mut(RGBA_SIZE) {
				pixel.copy_from_slice(&color);
			}
		}
		true
	}

	#[cfg(test)]
	pub(crate) fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
		if x >= self.width || y >= self.height {
			return None;
		}
		let i = (y as usize * self.width as usize + x as usize) * RGBA_SIZE;
		self.data[i..i + RGBA_SIZE].try_into().ok()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn gradient_pattern() {
		let canvas = Canvas::gradient(300, 2).unwrap();
		assert_eq!(canvas.data.len(), 300 * 2 * RGBA_SIZE);
		assert_eq!(canvas.pixel(0, 0), Some([0, 0, 0, 255]));
		assert_eq!(canvas.pixel(17, 1), Some([17, 1, 0, 255]));
		assert_eq!(canvas.pixel(299, 1), Some([(299 % 256) as u8, 1, 0, 255]));
		assert!(canvas.data.chunks_exact(RGBA_SIZE).all(|pixel| pixel[3] == 255));
	}

	#[test]
	fn tiles_are_clipped() {
		let mut canvas = Canvas::fromWidthHeight(10, 10).unwrap();
		assert!(canvas.fillTile(Coordinate::new(2, 2), 4, [1, 2, 3, 4]));
		assert_eq!(canvas.pixel(8, 8), Some([1, 2, 3, 4]));
		assert_eq!(canvas.pixel(9, 9), Some([1, 2, 3, 4]));
		assert_eq!(canvas.pixel(7, 8), Some([0; 4]));
		assert!(!canvas.fillTile(Coordinate::new(-1, 0), 3, [9; 4]));
		assert!(!canvas.fillTile(Coordinate::new(3, 0), 4, [9; 4]));
		assert!(!canvas.fillTile(Coordinate::new(i32::MIN, i32::MAX), 4, [9; 4]));
		assert_eq!(canvas.pixel(0, 0), Some([0; 4]));
	}

	#[test]
	fn entities_use_bindings_then_configured_colors() {
		let mut parsedMap = ParsedMap::default();
		parsedMap.textures.insert("Texture:wall1".into(), Coordinate::new(0, 0));
		parsedMap.colliders.insert("Collider:floor".into(), Coordinate::new(1, 0));
		parsedMap.colliders.insert("Collider:bare".into(), Coordinate::new(2, 0));
		parsedMap.triggers.insert("Trigger:door".into(), Coordinate::new(3, 0));
		parsedMap.triggers.insert("Trigger:over".into(), Coordinate::new(1, 0));
		parsedMap.binding.colliderBindings.insert("floor".into(), "10,20,30,40".into());
		parsedMap.binding.triggerBindings.insert("door".into(), "#0000FF".into());
		let config =
			Config { width: 4, height: 1, pattern: Pattern::Entities, colliderColor: [7; 4], ..Config::default() };

		let canvas = Canvas::render(&parsedMap, &config).unwrap();
		assert_eq!(canvas.pixel(0, 0), Some(config.textureColor));
		assert_eq!(canvas.pixel(1, 0), Some(config.triggerColor));
		assert_eq!(canvas.pixel(2, 0), Some([7; 4]));
		assert_eq!(canvas.pixel(3, 0), Some([0, 0, 255, 255]));

		let colliders = Canvas::renderLayers(&parsedMap, &config, &[Layer::Colliders]).unwrap();
		assert_eq!(colliders.pixel(0, 0), Some([0; 4]));
		assert_eq!(colliders.pixel(1, 0), Some([10, 20, 30, 40]));
		assert_eq!(colliders.pixel(3, 0), Some([0; 4]));
	}

	#[test]
	fn unrepresentable_sizes_are_rejected_before_allocating() {
		for (width, height) in [(0, 5), (5, 0), (u32::MAX, u32::MAX), (MAX_SIDE + 1, 1), (1, MAX_SIDE + 1)] {
			assert!(matches!(
				Canvas::fromWidthHeight(width, height),
				Err(Error::CanvasSize { width: w, height: h }) if (w, h) == (width, height)
			));
			assert!(Canvas::gradient(width, height).is_err());
		}
		assert_eq!(rgbaLen(3, 2), Some(24));
		assert_eq!(rgbaLen(MAX_SIDE, 1), Some(MAX_SIDE as usize * RGBA_SIZE));
	}
}
