//! Ordered, deduplicated collections of shared options.
//!
//! A group never owns its options; members are the same `Arc`s the set holds,
//! so identity checks against set entries hold for group members too.
//! Deduplication is by value equality (code), not identity.

use std::slice;
use std::sync::Arc;

use optenum_primitives::Code;

use crate::error::{Error, Result};
use crate::option::{Comparand, OptionEntry};


/// An ordered group of options, either declared or derived from a tag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionGroup {
	members: Vec<Arc<OptionEntry>>,
}

impl OptionGroup {
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends `entry` unless a value-equal member is already present.
	///
	/// Returns true if the group changed. With `std::ops::Add` in scope, a
	/// by-value receiver picks the operator instead; call
	/// `OptionGroup::add(&mut group, entry)` there.
	pub fn add(&mut self, entry: Arc<OptionEntry>) -> bool {
		if self.members.iter().any(|m| **m == *entry) {
			return false;
		}
		self.members.push(entry);
		true
	}

	/// Removes the member equal to `entry`.
	pub fn remove(&mut self, entry: &OptionEntry) -> Result<()> {
		match self.members.iter().position(|m| **m == *entry) {
			Some(pos) => {
				self.members.remove(pos);
				Ok(())
			}
			None => Err(Error::NotFound {
				what: "option",
				key: entry.name().to_string(),
				context: Some("group".to_string()),
			}),
		}
	}

	/// Returns true if any member equals `value`.
	///
	/// Raw values of an incompatible kind are never contained.
	pub fn contains(&self, value: impl Comparand) -> bool {
		let operand = &value;
		self.members
			.iter()
			.any(|m| m.try_eq(operand).unwrap_or(false))
	}

	pub fn iter(&self) -> slice::Iter<'_, Arc<OptionEntry>> {
		self.members.iter()
	}

	pub fn len(&self) -> usize {
		self.members.len()
	}

	pub fn is_empty(&self) -> bool {
		self.members.is_empty()
	}

	/// Member codes in group order.
	pub fn codes(&self) -> Vec<Code> {
		self.members.iter().map(|m| m.code().clone()).collect()
	}

	/// Member names in group order.
	pub fn names(&self) -> Vec<&str> {
		self.members.iter().map(|m| m.name()).collect()
	}
}

impl Extend<Arc<OptionEntry>> for OptionGroup {
	fn extend<I: IntoIterator<Item = Arc<OptionEntry>>>(&mut self, iter: I) {
		for entry in iter {
			self.add(entry);
		}
	}
}

impl FromIterator<Arc<OptionEntry>> for OptionGroup {
	fn from_iter<I: IntoIterator<Item = Arc<OptionEntry>>>(iter: I) -> Self {
		let mut group = Self::new();
		group.extend(iter);
		group
	}
}

impl std::ops::Add for OptionGroup {
	type Output = OptionGroup;

	fn add(mut self, rhs: OptionGroup) -> OptionGroup {
		self.extend(rhs.members);
		self
	}
}

impl std::ops::Add<Arc<OptionEntry>> for OptionGroup {
	type Output = OptionGroup;

	fn add(mut self, rhs: Arc<OptionEntry>) -> OptionGroup {
		OptionGroup::add(&mut self, rhs);
		self
	}
}

impl<'a> IntoIterator for &'a OptionGroup {
	type Item = &'a Arc<OptionEntry>;
	type IntoIter = slice::Iter<'a, Arc<OptionEntry>>;

	fn into_iter(self) -> Self::IntoIter {
		self.members.iter()
	}
}

impl IntoIterator for OptionGroup {
	type Item = Arc<OptionEntry>;
	type IntoIter = std::vec::IntoIter<Arc<OptionEntry>>;

	fn into_iter(self) -> Self::IntoIter {
		self.members.into_iter()
	}
}
