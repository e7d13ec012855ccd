use {
	crate::Coordinate,
	core::{num::ParseIntError, str::FromStr},
	thiserror::Error,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TupleError {
	#[error("missing ',' between the two components")]
	MissingComma,

	#[error("{component} component {text:?} is not a base-10 i32")]
	InvalidInteger { component: &'static str, text: String, source: ParseIntError },
}

/// Parses `"x,y"` into a [`Coordinate`].
///
/// The text is split at its first comma and each half must be a plain `i32` literal, so
/// `"1,2,3"`, `" 1,2"` and values outside the `i32` range are all rejected. Callers trim.
pub fn parseTuple(text: &str) -> Result<Coordinate, TupleError> {
	let (x, y) = text.split_once(',').ok_or(TupleError::MissingComma)?;
	let parseComponent = |component, text: &str| {
		i32::from_str(text).map_err(|source| TupleError::InvalidInteger {
			component,
			text: text.to_owned(),
			source,
		})
	};
	Ok(Coordinate::new(parseComponent("x", x)?, parseComponent("y", y)?))
}
