use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use optenum_primitives::Code;

use super::{Comparand, OptionEntry, compare};
use crate::error::Result;

/// Result of a non-failing lookup: a registered option, or `NotDefined`.
///
/// `NotDefined` is never equal to anything, itself included, and cannot be
/// ordered. Its text is the literal `"None"`.
#[derive(Debug, Clone)]
pub enum OptionRef {
	Defined(Arc<OptionEntry>),
	NotDefined,
}

impl OptionRef {
	/// Returns true if the lookup found an option.
	pub fn is_defined(&self) -> bool {
		matches!(self, Self::Defined(_))
	}

	/// The registered option, if any.
	pub fn entry(&self) -> Option<&Arc<OptionEntry>> {
		match self {
			Self::Defined(entry) => Some(entry),
			Self::NotDefined => None,
		}
	}

	/// Consumes the reference, yielding the registered option if any.
	pub fn into_entry(self) -> Option<Arc<OptionEntry>> {
		match self {
			Self::Defined(entry) => Some(entry),
			Self::NotDefined => None,
		}
	}

	/// Code of the found option.
	pub fn code(&self) -> Option<&Code> {
		self.entry().map(|e| e.code())
	}

	/// Name of the found option.
	pub fn name(&self) -> Option<&str> {
		self.entry().map(|e| e.name())
	}

	/// Declared text of the found option, without the name fallback.
	pub fn text(&self) -> Option<&str> {
		self.entry().and_then(|e| e.text())
	}

	/// Display text; `"None"` for `NotDefined`.
	pub fn get_text(&self) -> String {
		match self {
			Self::Defined(entry) => entry.get_text(),
			Self::NotDefined => "None".to_string(),
		}
	}

	/// Returns true if this is the very same registered instance as `entry`.
	pub fn is(&self, entry: &OptionEntry) -> bool {
		self.entry().is_some_and(|e| e.is(entry))
	}

	/// Equality; always `Ok(false)` for `NotDefined`.
	pub fn try_eq(&self, other: impl Comparand) -> Result<bool> {
		match self {
			Self::Defined(entry) => entry.try_eq(other),
			Self::NotDefined => Ok(false),
		}
	}

	/// Ordering; always a [`crate::Error::TypeMismatch`] for `NotDefined`.
	pub fn try_cmp(&self, other: impl Comparand) -> Result<Ordering> {
		match self {
			Self::Defined(entry) => entry.try_cmp(other),
			Self::NotDefined => Err(crate::Error::TypeMismatch {
				op: "cmp",
				left: "NotDefined",
				right: compare::operand_kind(&other.operand()),
			}),
		}
	}
}

impl From<Arc<OptionEntry>> for OptionRef {
	fn from(entry: Arc<OptionEntry>) -> Self {
		Self::Defined(entry)
	}
}

impl From<Option<Arc<OptionEntry>>> for OptionRef {
	fn from(entry: Option<Arc<OptionEntry>>) -> Self {
		entry.map_or(Self::NotDefined, Self::Defined)
	}
}

impl PartialEq for OptionRef {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::Defined(a), Self::Defined(b)) => a == b,
			_ => false,
		}
	}
}

impl fmt::Display for OptionRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Defined(entry) => fmt::Display::fmt(entry, f),
			Self::NotDefined => f.write_str("None"),
		}
	}
}
