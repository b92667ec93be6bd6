//! A single validated option: code, name, optional text and tags.
//!
//! # Role
//!
//! [`OptionEntry`] behaves like its [`Code`] for equality, hashing and ordering
//! while carrying a name and classification tags. Two entries with the same code
//! are equal by value even when they come from different sets; identity is the
//! allocation itself (see [`OptionEntry::is`]).
//!
//! # Invariants
//!
//! - Names are non-empty uppercase identifiers starting with a letter.
//! - Tags follow the same rules as names.
//! - Float codes are never NaN.
//! - `hash(entry) == hash(entry.code())`, so entries and raw codes are
//!   interchangeable as hash keys (via [`Borrow<Code>`]).

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use optenum_primitives::{Code, validate_name, validate_tag};
use parking_lot::RwLock;
use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::error::{Error, Result};

mod compare;
mod sentinel;

pub use compare::{Comparand, Operand};
pub use sentinel::OptionRef;


/// Conversion into an optional display text.
pub trait IntoText {
	fn into_text(self) -> Option<String>;
}

impl IntoText for &str {
	fn into_text(self) -> Option<String> {
		Some(self.to_string())
	}
}

impl IntoText for String {
	fn into_text(self) -> Option<String> {
		Some(self)
	}
}

impl IntoText for &String {
	fn into_text(self) -> Option<String> {
		Some(self.clone())
	}
}

impl IntoText for Option<&str> {
	fn into_text(self) -> Option<String> {
		self.map(str::to_string)
	}
}

impl IntoText for Option<String> {
	fn into_text(self) -> Option<String> {
		self
	}
}

/// A validated option.
pub struct OptionEntry {
	code: Code,
	name: Box<str>,
	text: Option<Box<str>>,
	tags: RwLock<BTreeSet<Box<str>>>,
}

/// Builder for an [`OptionEntry`] with text and tags.
#[derive(Debug, Clone)]
pub struct OptionEntryBuilder {
	code: Code,
	name: String,
	text: Option<String>,
	tags: Vec<String>,
}

impl OptionEntryBuilder {
	/// Sets the display text.
	pub fn text(mut self, text: impl IntoText) -> Self {
		self.text = text.into_text();
		self
	}

	/// Adds one tag.
	pub fn tag(mut self, tag: impl Into<String>) -> Self {
		self.tags.push(tag.into());
		self
	}

	/// Adds several tags.
	pub fn tags<I, S>(mut self, tags: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.tags.extend(tags.into_iter().map(Into::into));
		self
	}

	/// Validates every field and produces the entry.
	pub fn build(self) -> Result<OptionEntry> {
		if self.code.is_nan() {
			return Err(Error::invalid_argument("code", self.code.to_string(), "NaN can never equal itself"));
		}
		validate_name(&self.name).map_err(|e| Error::invalid_ident("name", &self.name, e))?;

		let mut tags = BTreeSet::new();
		for tag in self.tags {
			validate_tag(&tag).map_err(|e| Error::invalid_ident("tag", &tag, e))?;
			tags.insert(tag.into_boxed_str());
		}

		Ok(OptionEntry {
			code: self.code,
			name: self.name.into_boxed_str(),
			text: self.text.map(String::into_boxed_str),
			tags: RwLock::new(tags),
		})
	}
}

impl OptionEntry {
	/// Creates an option with no text and no tags.
	pub fn new(code: impl Into<Code>, name: impl Into<String>) -> Result<Self> {
		Self::builder(code, name).build()
	}

	/// Starts a builder for an option with text or tags.
	pub fn builder(code: impl Into<Code>, name: impl Into<String>) -> OptionEntryBuilder {
		OptionEntryBuilder {
			code: code.into(),
			name: name.into(),
			text: None,
			tags: Vec::new(),
		}
	}

	/// The underlying value.
	pub fn code(&self) -> &Code {
		&self.code
	}

	/// The canonical uppercase name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// The display text, if one was declared.
	pub fn text(&self) -> Option<&str> {
		self.text.as_deref()
	}

	/// Returns the text, falling back to the lower-cased name.
	pub fn get_text(&self) -> String {
		match &self.text {
			Some(text) => text.to_string(),
			None => self.name.to_lowercase(),
		}
	}

	/// Returns a sorted snapshot of the current tags.
	pub fn tags(&self) -> Vec<String> {
		self.tags.read().iter().map(|t| t.to_string()).collect()
	}

	/// Returns true if the option currently carries `tag`.
	pub fn has_tag(&self, tag: &str) -> bool {
		self.tags.read().contains(tag)
	}

	/// Adds a tag to an option that is not shared with a set yet.
	///
	/// Returns false if the tag was already present. Registered options change
	/// tags through [`crate::OptionSet::add_tag`] so their groups stay in sync.
	pub fn add_tag(&mut self, tag: &str) -> Result<bool> {
		validate_tag(tag).map_err(|e| Error::invalid_ident("tag", tag, e))?;
		Ok(self.tags.get_mut().insert(Box::from(tag)))
	}

	/// Removes a tag from an option that is not shared with a set yet.
	pub fn remove_tag(&mut self, tag: &str) -> Result<()> {
		validate_tag(tag).map_err(|e| Error::invalid_ident("tag", tag, e))?;
		if self.tags.get_mut().remove(tag) {
			Ok(())
		} else {
			Err(self.missing_tag(tag))
		}
	}

	pub(crate) fn attach_tag(&self, tag: &str) -> bool {
		self.tags.write().insert(Box::from(tag))
	}

	pub(crate) fn detach_tag(&self, tag: &str) -> bool {
		self.tags.write().remove(tag)
	}

	pub(crate) fn missing_tag(&self, tag: &str) -> Error {
		Error::NotFound {
			what: "tag",
			key: tag.to_string(),
			context: Some(format!("option '{}'", self.name)),
		}
	}

	/// Returns true if both references point at the same option instance.
	pub fn is(&self, other: &OptionEntry) -> bool {
		std::ptr::eq(self, other)
	}

	/// Integer code, if this option has one.
	pub fn as_int(&self) -> Option<i64> {
		self.code.as_int()
	}

	/// Float code, if this option has one.
	pub fn as_float(&self) -> Option<f64> {
		self.code.as_float()
	}

	/// Numeric code widened to `f64`.
	pub fn as_number(&self) -> Option<f64> {
		self.code.as_number()
	}

	/// String code, if this option has one.
	pub fn as_str(&self) -> Option<&str> {
		self.code.as_str()
	}

	/// Equality against an option or raw value.
	///
	/// Options of a different kind are simply unequal; a raw value of an
	/// incompatible kind is a [`Error::TypeMismatch`].
	pub fn try_eq(&self, other: impl Comparand) -> Result<bool> {
		compare::eq_code(&self.code, other.operand())
	}

	/// Strict ordering against an option or raw value of the same family.
	pub fn try_cmp(&self, other: impl Comparand) -> Result<Ordering> {
		compare::cmp_code("cmp", &self.code, other.operand())
	}

	/// `self < other`, failing across families.
	pub fn try_lt(&self, other: impl Comparand) -> Result<bool> {
		compare::cmp_code("<", &self.code, other.operand()).map(Ordering::is_lt)
	}

	/// `self <= other`, failing across families.
	pub fn try_le(&self, other: impl Comparand) -> Result<bool> {
		compare::cmp_code("<=", &self.code, other.operand()).map(Ordering::is_le)
	}

	/// `self > other`, failing across families.
	pub fn try_gt(&self, other: impl Comparand) -> Result<bool> {
		compare::cmp_code(">", &self.code, other.operand()).map(Ordering::is_gt)
	}

	/// `self >= other`, failing across families.
	pub fn try_ge(&self, other: impl Comparand) -> Result<bool> {
		compare::cmp_code(">=", &self.code, other.operand()).map(Ordering::is_ge)
	}
}

impl Clone for OptionEntry {
	fn clone(&self) -> Self {
		Self {
			code: self.code.clone(),
			name: self.name.clone(),
			text: self.text.clone(),
			tags: RwLock::new(self.tags.read().clone()),
		}
	}
}

impl fmt::Debug for OptionEntry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("OptionEntry")
			.field("code", &self.code)
			.field("name", &self.name)
			.field("text", &self.text)
			.field("tags", &*self.tags.read())
			.finish()
	}
}

impl fmt::Display for OptionEntry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Display::fmt(&self.code, f)
	}
}

impl PartialEq for OptionEntry {
	fn eq(&self, other: &Self) -> bool {
		self.code == other.code
	}
}

impl Eq for OptionEntry {}

impl Hash for OptionEntry {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.code.hash(state);
	}
}

impl Borrow<Code> for OptionEntry {
	fn borrow(&self) -> &Code {
		&self.code
	}
}

impl PartialOrd for OptionEntry {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		self.code.try_cmp(&other.code).ok()
	}
}

impl PartialEq<Code> for OptionEntry {
	fn eq(&self, other: &Code) -> bool {
		self.code == *other
	}
}

impl PartialOrd<Code> for OptionEntry {
	fn partial_cmp(&self, other: &Code) -> Option<Ordering> {
		self.code.try_cmp(other).ok()
	}
}

impl PartialEq<i64> for OptionEntry {
	fn eq(&self, other: &i64) -> bool {
		self.code == *other
	}
}

impl PartialEq<f64> for OptionEntry {
	fn eq(&self, other: &f64) -> bool {
		self.code == *other
	}
}

impl PartialEq<str> for OptionEntry {
	fn eq(&self, other: &str) -> bool {
		self.code == *other
	}
}

impl PartialEq<&str> for OptionEntry {
	fn eq(&self, other: &&str) -> bool {
		self.code == **other
	}
}

macro_rules! impl_code_eq_mirror {
	($($ty:ty),* $(,)?) => {
		$(
			impl PartialEq<OptionEntry> for $ty {
				fn eq(&self, other: &OptionEntry) -> bool {
					*other == *self
				}
			}
		)*
	};
}

impl_code_eq_mirror!(Code, i64, f64, str, &str);

impl PartialOrd<OptionEntry> for Code {
	fn partial_cmp(&self, other: &OptionEntry) -> Option<Ordering> {
		self.try_cmp(&other.code).ok()
	}
}

impl Serialize for OptionEntry {
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		let mut state = serializer.serialize_struct("OptionEntry", 4)?;
		state.serialize_field("code", &self.code)?;
		state.serialize_field("name", &*self.name)?;
		state.serialize_field("text", &self.text.as_deref())?;
		state.serialize_field("tags", &self.tags())?;
		state.end()
	}
}
