//! Field projections for `get_list` and `get_dict`.

use std::fmt;
use std::str::FromStr;

use optenum_primitives::Code;
use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::option::OptionEntry;

/// A projectable option field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
	Code,
	Name,
	Text,
}

impl Field {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Code => "code",
			Self::Name => "name",
			Self::Text => "text",
		}
	}

	/// Reads this field from `entry`.
	pub fn read(self, entry: &OptionEntry) -> FieldValue {
		match self {
			Self::Code => FieldValue::Code(entry.code().clone()),
			Self::Name => FieldValue::Name(entry.name().to_string()),
			Self::Text => FieldValue::Text(entry.text().map(str::to_string)),
		}
	}
}

impl fmt::Display for Field {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Field {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		match s {
			"code" => Ok(Self::Code),
			"name" => Ok(Self::Name),
			"text" => Ok(Self::Text),
			other => Err(Error::invalid_argument(
				"field",
				other,
				"expected one of \"code\", \"name\", \"text\"",
			)),
		}
	}
}

/// One projected field value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
	Code(Code),
	Name(String),
	Text(Option<String>),
}

/// A projected row: the bare value for one field, a tuple for several.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Projection {
	Single(FieldValue),
	Tuple(Vec<FieldValue>),
}

impl Projection {
	pub fn as_single(&self) -> Option<&FieldValue> {
		match self {
			Self::Single(value) => Some(value),
			Self::Tuple(_) => None,
		}
	}
}

/// Parses a non-empty list of distinct field names.
pub(super) fn parse_fields(fields: &[&str]) -> Result<Vec<Field>> {
	if fields.is_empty() {
		return Err(Error::invalid_argument("fields", "", "at least one field is required"));
	}
	let mut seen = FxHashSet::default();
	fields
		.iter()
		.map(|raw| {
			let field: Field = raw.parse()?;
			if !seen.insert(field) {
				return Err(Error::invalid_argument("field", *raw, "requested more than once"));
			}
			Ok(field)
		})
		.collect()
}

/// Parses the key field of `get_dict`, which must identify an option uniquely.
pub(super) fn parse_key_field(raw: &str) -> Result<Field> {
	match raw.parse()? {
		Field::Text => Err(Error::invalid_argument(
			"key_field",
			raw,
			"expected \"code\" or \"name\"",
		)),
		field => Ok(field),
	}
}

pub(super) fn project(entry: &OptionEntry, fields: &[Field]) -> Projection {
	match fields {
		[single] => Projection::Single(single.read(entry)),
		many => Projection::Tuple(many.iter().map(|f| f.read(entry)).collect()),
	}
}
