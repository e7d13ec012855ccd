use {core::str::FromStr, std::collections::HashMap};

pub type Rgba = [u8; 4];

pub const OPAQUE_BLACK: Rgba = [0, 0, 0, 0xFF];

/// Style values keyed by entity name, one map per category.
///
/// Values are kept exactly as they appeared in the map file (trimmed). Lookups never fail: a
/// missing name yields `""`, or [`OPAQUE_BLACK`] from the color resolvers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Binding {
	pub textureBindings: HashMap<String, String>,
	pub colliderBindings: HashMap<String, String>,
	pub triggerBindings: HashMap<String, String>,
}

impl Binding {
	pub fn getTexturePath(&self, textureName: &str) -> &str {
		lookup(&self.textureBindings, textureName)
	}

	pub fn getColliderColor(&self, colliderName: &str) -> &str {
		lookup(&self.colliderBindings, colliderName)
	}

	pub fn getTriggerColor(&self, triggerName: &str) -> &str {
		lookup(&self.triggerBindings, triggerName)
	}

	pub fn colliderRgba(&self, colliderName: &str) -> Rgba {
		parseRgba(self.getColliderColor(colliderName)).unwrap_or(OPAQUE_BLACK)
	}

	pub fn triggerRgba(&self, triggerName: &str) -> Rgba {
		parseRgba(self.getTriggerColor(triggerName)).unwrap_or(OPAQUE_BLACK)
	}

	/// Bound collider color, `fallback` when `colliderName` has no binding at all.
	pub fn colliderRgbaOr(&self, colliderName: &str, fallback: Rgba) -> Rgba {
		resolve(self.getColliderColor(colliderName), fallback)
	}

	pub fn triggerRgbaOr(&self, triggerName: &str, fallback: Rgba) -> Rgba {
		resolve(self.getTriggerColor(triggerName), fallback)
	}
}

#[inline]
fn lookup<'a>(bindings: &'a HashMap<String, String>, name: &str) -> &'a str {
	bindings.get(name).map_or("", String::as_str)
}

fn resolve(token: &str, fallback: Rgba) -> Rgba {
	if token.is_empty() {
		fallback
	} else {
		parseRgba(token).unwrap_or(OPAQUE_BLACK)
	}
}

/// Reads a color token: `r,g,b,a`, `r,g,b` (opaque), `#RRGGBB` or `#RRGGBBAA`.
pub fn parseRgba(token: &str) -> Option<Rgba> {
	let mut rgba = OPAQUE_BLACK;
	if let Some(hex) = token.strip_prefix('#') {
		if !matches!(hex.len(), 6 | 8) || !hex.bytes().all(|byte| byte.is_ascii_hexdigit()) {
			return None;
		}
		for (i, channel) in rgba.iter_mut().take(hex.len() / 2).enumerate() {
			*channel = u8::from_str_radix(&hex[2 * i..2 * i + 2], 16).ok()?;
		}
		return Some(rgba);
	}
	let mut numChannels = 0;
	for component in token.split(',') {
		if numChannels == rgba.len() {
			return None;
		}
		rgba[numChannels] = u8::from_str(component.trim()).ok()?;
		numChannels += 1;
	}
	(numChannels >= 3).then_some(rgba)
}
