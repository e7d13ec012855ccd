use {
	crate::{parseTuple, Binding, Coordinate, Error, Result},
	log::{debug, info},
	memchr::memchr,
	std::{
		collections::BTreeMap,
		fs::File,
		io::{BufRead, BufReader},
		path::Path,
	},
};

/// Raw map key (e.g. `"Collider:floor"`) to position.
pub type CoordinateTable = BTreeMap<String, Coordinate>;

const BINDING_PREFIX: &str = "Binding:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
	Texture,
	Collider,
	Trigger,
	Binding,
	Unrecognized,
}

impl Category {
	/// First matching rule wins: an explicit `Binding:` prefix, then containment of `Texture`,
	/// `Collider`, `Trigger` and `Binding`, in that order.
	pub fn classify(key: &str) -> Self {
		if key.starts_with(BINDING_PREFIX) {
			return Self::Binding;
		}
		for (needle, category) in [
			("Texture", Self::Texture),
			("Collider", Self::Collider),
			("Trigger", Self::Trigger),
			("Binding", Self::Binding),
		] {
			if key.contains(needle) {
				return category;
			}
		}
		Self::Unrecognized
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedMap {
	pub binding: Binding,
	pub textures: CoordinateTable,
	pub colliders: CoordinateTable,
	pub triggers: CoordinateTable,
}

impl ParsedMap {
	pub fn numEntities(&self) -> usize {
		self.textures.len() + self.colliders.len() + self.triggers.len()
	}
}

/// Name an entity's binding is looked up under: the raw key past its first `:`, or the whole key.
pub fn entityName(key: &str) -> &str {
	key.split_once(':').map_or(key, |(_, name)| name)
}

pub fn parse(path: impl AsRef<Path>) -> Result<ParsedMap> {
	let path = path.as_ref();
	let file = File::open(path).map_err(Error::io(path))?;
	let parsedMap = parseReader(BufReader::new(file), path)?;
	info!(
		"{path:?}: {} textures, {} colliders, {} triggers",
		parsedMap.textures.len(),
		parsedMap.colliders.len(),
		parsedMap.triggers.len(),
	);
	Ok(parsedMap)
}

/// Parses map lines from `reader`; `origin` only labels errors.
///
/// Lines without `=`, with an unknown key, or with a malformed binding key are skipped. A
/// position value that is not a valid tuple aborts the parse.
pub fn parseReader(reader: impl BufRead, origin: &Path) -> Result<ParsedMap> {
	let mut parsedMap = ParsedMap::default();
	for (i, line) in reader.lines().enumerate() {
		let line = line.map_err(Error::io(origin))?;
		let lineNumber = i + 1;
		let Some(equalPos) = memchr(b'=', line.as_bytes()) else {
			debug!("{origin:?}:{lineNumber}: no '=', skipped");
			continue;
		};
		let (key, value) = (&line[..equalPos], line[equalPos + 1..].trim_matches([' ', '\t']));
		let table = match Category::classify(key) {
			Category::Texture => &mut parsedMap.textures,
			Category::Collider => &mut parsedMap.colliders,
			Category::Trigger => &mut parsedMap.triggers,
			Category::Binding => {
				if !parsedMap.binding.bind(key, value) {
					debug!("{origin:?}:{lineNumber}: unusable binding key {key:?}, skipped");
				}
				continue;
			}
			Category::Unrecognized => {
				debug!("{origin:?}:{lineNumber}: unrecognized key {key:?}, skipped");
				continue;
			}
		};
		let position = parseTuple(value).map_err(|source| Error::Format {
			path: origin.to_owned(),
			line: lineNumber,
			key: key.to_owned(),
			value: value.to_owned(),
			source,
		})?;
		table.insert(key.to_owned(), position);
	}
	Ok(parsedMap)
}

impl Binding {
	/// Stores `value` for a `[Binding:]<Type>:<Name>` key, reporting whether the key was usable.
	fn bind(&mut self, key: &str, value: &str) -> bool {
		let spec = key.strip_prefix(BINDING_PREFIX).unwrap_or(key);
		let Some((kind, name)) = spec.split_once(':') else {
			return false;
		};
		if memchr(b':', name.as_bytes()).is_some() {
			return false;
		}
		let bindings = match kind {
			"Texture" => &mut self.textureBindings,
			"Collider" => &mut self.colliderBindings,
			"Trigger" => &mut self.triggerBindings,
			_ => return false,
		};
		bindings.insert(name.to_owned(), value.to_owned());
		true
	}
}

#[cfg(test)]
mod tests {
	use {super::*, std::io};

	const SAMPLE: &str = "\
Texture:wall1=10,20
Collider:floor=0,0
Binding:Texture:wall1=textures/wall1.png
Binding:Collider:floor=255,0,0,255
garbage line with no equals
Unknown=5,5
";

	fn parseStr(text: &str) -> Result<ParsedMap> {
		parseReader(io::Cursor::new(text), Path::new("inline.hsgm"))
	}

	#[test]
	fn classify_follows_rule_order() {
		assert_eq!(Category::classify("Texture:wall1"), Category::Texture);
		assert_eq!(Category::classify("Collider:floor"), Category::Collider);
		assert_eq!(Category::classify("Trigger:door"), Category::Trigger);
		assert_eq!(Category::classify("Binding:Texture:wall1"), Category::Binding);
		assert_eq!(Category::classify("TextureCollider"), Category::Texture);
		assert_eq!(Category::classify("myColliderTrigger"), Category::Collider);
		assert_eq!(Category::classify("TriggerBinding"), Category::Trigger);
		assert_eq!(Category::classify("StyleBinding"), Category::Binding);
		assert_eq!(Category::classify("Unknown"), Category::Unrecognized);
		assert_eq!(Category::classify("texture"), Category::Unrecognized);
		assert_eq!(Category::classify(""), Category::Unrecognized);
	}

	#[test]
	fn sample_map() {
		let parsedMap = parseStr(SAMPLE).unwrap();
		assert_eq!(parsedMap.textures, CoordinateTable::from([("Texture:wall1".into(), Coordinate::new(10, 20))]));
		assert_eq!(parsedMap.colliders, CoordinateTable::from([("Collider:floor".into(), Coordinate::ZERO)]));
		assert!(parsedMap.triggers.is_empty());
		assert_eq!(parsedMap.binding.getTexturePath("wall1"), "textures/wall1.png");
		assert_eq!(parsedMap.binding.getColliderColor("floor"), "255,0,0,255");
		assert_eq!(parsedMap.binding.textureBindings.len(), 1);
		assert_eq!(parsedMap.binding.colliderBindings.len(), 1);
		assert!(parsedMap.binding.triggerBindings.is_empty());
		assert_eq!(parsedMap.numEntities(), 2);
	}

	#[test]
	fn key_is_kept_verbatim_and_value_is_trimmed() {
		let parsedMap = parseStr(" Trigger:door =\t 4,-2 \t\r\n").unwrap();
		assert_eq!(parsedMap.triggers.get(" Trigger:door "), Some(&Coordinate::new(4, -2)));
	}

	#[test]
	fn indented_binding_key_falls_through_to_position_rules() {
		assert_eq!(Category::classify(" Binding:Texture:a"), Category::Texture);
		assert_eq!(Category::classify("\tBinding:Style:a"), Category::Binding);
		match parseStr("Texture:a=1,1\n Binding:Texture:a=x.png\n").unwrap_err() {
			Error::Format { line, key, source, .. } => {
				assert_eq!((line, key.as_str()), (2, " Binding:Texture:a"));
				assert_eq!(source, crate::TupleError::MissingComma);
			}
			other => panic!("unexpected error: {other:?}"),
		}
	}

	#[test]
	fn value_may_contain_equals_signs() {
		let parsedMap = parseStr("Binding:Texture:odd=a=b.png\n").unwrap();
		assert_eq!(parsedMap.binding.getTexturePath("odd"), "a=b.png");
	}

	#[test]
	fn later_lines_overwrite_earlier_ones() {
		let parsedMap = parseStr("Texture:a=1,1\nTexture:a=2,2\nBinding:Trigger:t=red\nBinding:Trigger:t=blue\n").unwrap();
		assert_eq!(parsedMap.textures["Texture:a"], Coordinate::new(2, 2));
		assert_eq!(parsedMap.binding.getTriggerColor("t"), "blue");
	}

	#[test]
	fn malformed_binding_keys_are_dropped() {
		let parsedMap = parseStr(
			"Binding:Texture=x\nBinding:Texture:a:b=x\nBinding:Sprite:a=x\nBinding:texture:a=x\nBinding:Trigger:=x\n",
		)
		.unwrap();
		assert!(parsedMap.binding.textureBindings.is_empty());
		assert!(parsedMap.binding.colliderBindings.is_empty());
		assert_eq!(parsedMap.binding.triggerBindings.len(), 1);
		assert_eq!(parsedMap.binding.getTriggerColor(""), "x");
		assert_eq!(parsedMap.numEntities(), 0);
	}

	#[test]
	fn bad_position_is_fatal_with_line_number() {
		let err = parseStr("Texture:a=1,1\n\nCollider:b=1;2\n").unwrap_err();
		match err {
			Error::Format { line, key, value, source, .. } => {
				assert_eq!((line, key.as_str(), value.as_str()), (3, "Collider:b", "1;2"));
				assert_eq!(source, crate::TupleError::MissingComma);
			}
			other => panic!("unexpected error: {other:?}"),
		}
	}

	#[test]
	fn empty_input_yields_empty_map() {
		assert_eq!(parseStr("").unwrap(), ParsedMap::default());
	}

	#[test]
	fn entity_names() {
		assert_eq!(entityName("Collider:floor"), "floor");
		assert_eq!(entityName("Trigger:a:b"), "a:b");
		assert_eq!(entityName("TextureOnly"), "TextureOnly");
	}
}
