//! Typed option sets.
//!
//! An option pairs a [`Code`] with an uppercase name, optional display text and
//! classification tags. Options compare and hash as their code, so they can stand
//! in for raw values wherever those are used as keys.
//!
//! # Modules
//!
//! - [`option`] - [`OptionEntry`], the comparison protocol and the [`OptionRef`] sentinel
//! - [`group`] - [`OptionGroup`], ordered deduplicated option collections
//! - [`set`] - [`OptionSet`] registration, queries and live tag groups
//! - [`error`] - [`Error`] and [`ErrorKind`]
//!
//! Sets are declared with [`OptionSet::builder`] or the [`option_set!`] macro.

pub mod error;
pub mod group;
mod macros;
pub mod option;
pub mod set;

pub use error::{Error, ErrorKind, Result};
pub use group::OptionGroup;
pub use option::{Comparand, IntoText, Operand, OptionEntry, OptionEntryBuilder, OptionRef};
pub use optenum_primitives::{Code, CodeKind, IdentError};
pub use set::{
	Declared, Field, FieldValue, OptionSet, OptionSetBuilder, OrderBy, OrderedMap, Projection,
	SetPolicy, TagSnapshot, Target,
};

#[cfg(test)]
mod tests;
