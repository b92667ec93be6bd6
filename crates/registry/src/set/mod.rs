//! Closed, registered collections of options.
//!
//! # Role
//!
//! An [`OptionSet`] owns the name and code indices built at registration plus
//! the live tag groups of its options. Indices never change after
//! [`OptionSetBuilder::build`]; only tag membership does, and only through
//! [`OptionSet::add_tag`] and [`OptionSet::remove_tag`].
//!
//! # Invariants
//!
//! - `by_name` and `by_code` hold the same `Arc`s in the same (registration)
//!   order.
//! - Lookups never fail; indexed access fails with [`Error::KeyNotFound`].
//! - Item insertion and removal always fail with [`Error::Unsupported`].

use std::sync::Arc;

use indexmap::IndexMap;
use optenum_primitives::Code;
use rustc_hash::FxBuildHasher;

use crate::error::{Error, Result};
use crate::group::OptionGroup;
use crate::option::{Comparand, Operand, OptionEntry, OptionRef};

mod builder;
mod policy;
mod project;
mod tags;

pub use builder::{Declared, OptionSetBuilder};
pub use policy::{OrderBy, SetPolicy};
pub use project::{Field, FieldValue, Projection};
pub use tags::TagSnapshot;


/// Insertion-ordered map used for every index.
pub type OrderedMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Selects a registered option for tag changes.
#[derive(Debug, Clone, Copy)]
pub enum Target<'a> {
	/// By option name.
	Name(&'a str),
	/// By the registered instance itself.
	Entry(&'a OptionEntry),
}

impl<'a> From<&'a str> for Target<'a> {
	fn from(name: &'a str) -> Self {
		Self::Name(name)
	}
}

impl<'a> From<&'a OptionEntry> for Target<'a> {
	fn from(entry: &'a OptionEntry) -> Self {
		Self::Entry(entry)
	}
}

impl<'a> From<&'a Arc<OptionEntry>> for Target<'a> {
	fn from(entry: &'a Arc<OptionEntry>) -> Self {
		Self::Entry(entry)
	}
}

/// A registered option set.
pub struct OptionSet {
	label: Box<str>,
	policy: SetPolicy,
	by_name: OrderedMap<Box<str>, Arc<OptionEntry>>,
	by_code: OrderedMap<Code, Arc<OptionEntry>>,
	declared_groups: Vec<Box<str>>,
	ignored_keys: Vec<Box<str>>,
	tags: tags::TagGroups,
}

impl std::fmt::Debug for OptionSet {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("OptionSet")
			.field("label", &self.label)
			.field("policy", &self.policy)
			.field("options", &self.by_name.values().collect::<Vec<_>>())
			.field("declared_groups", &self.declared_groups)
			.finish_non_exhaustive()
	}
}

impl OptionSet {
	/// Starts declaring a new set.
	pub fn builder(label: impl Into<String>) -> OptionSetBuilder {
		OptionSetBuilder::new(label)
	}

	pub fn label(&self) -> &str {
		&self.label
	}

	pub fn policy(&self) -> SetPolicy {
		self.policy
	}

	pub fn len(&self) -> usize {
		self.by_name.len()
	}

	pub fn is_empty(&self) -> bool {
		self.by_name.is_empty()
	}

	/// Registered sets never accept item insertion or removal.
	pub fn is_read_only(&self) -> bool {
		true
	}

	/// Keys of explicitly declared groups, in declaration order.
	pub fn declared_groups(&self) -> impl Iterator<Item = &str> {
		self.declared_groups.iter().map(|k| &**k)
	}

	/// Keys skipped under `ignore_invalid_name`, in declaration order.
	pub fn ignored_keys(&self) -> impl Iterator<Item = &str> {
		self.ignored_keys.iter().map(|k| &**k)
	}

	/// Finds the option registered under `code`.
	pub fn lookup_by_code(&self, code: impl Into<Code>) -> OptionRef {
		self.by_code.get(&code.into()).cloned().into()
	}

	/// Finds the option registered under `name`.
	pub fn lookup_by_name(&self, name: &str) -> OptionRef {
		self.get(name).into()
	}

	pub fn get(&self, name: &str) -> Option<Arc<OptionEntry>> {
		self.by_name.get(name).cloned()
	}

	/// Indexed access by name.
	pub fn index(&self, name: &str) -> Result<Arc<OptionEntry>> {
		self.get(name).ok_or_else(|| Error::KeyNotFound {
			set: self.label.to_string(),
			key: name.to_string(),
			suggestion: self.suggest_name(name),
		})
	}

	/// Suggests the closest registered name within edit distance 3.
	fn suggest_name(&self, name: &str) -> Option<String> {
		self.by_name
			.keys()
			.min_by_key(|k| strsim::levenshtein(name, k))
			.filter(|k| strsim::levenshtein(name, k) <= 3)
			.map(|k| k.to_string())
	}

	/// Returns true if `value` is a registered option or code.
	///
	/// An option from another set counts when its code is registered here.
	pub fn contains(&self, value: impl Comparand) -> bool {
		match value.operand() {
			Operand::Value(code) => self.by_code.contains_key(&*code),
			Operand::Option(code) => self.by_code.contains_key(code),
			Operand::NotDefined => false,
		}
	}

	/// Always fails: registered sets are closed.
	pub fn try_insert(&self, key: &str, _value: impl Into<Declared>) -> Result<()> {
		Err(self.unsupported("assignment", key))
	}

	/// Always fails: registered sets are closed.
	pub fn try_remove(&self, key: &str) -> Result<()> {
		Err(self.unsupported("deletion", key))
	}

	fn unsupported(&self, op: &'static str, key: &str) -> Error {
		tracing::trace!(set = %self.label, key, op, "rejected mutation of closed set");
		Error::Unsupported {
			set: self.label.to_string(),
			op,
		}
	}

	/// Options in registration order.
	pub fn iter(&self) -> impl Iterator<Item = &Arc<OptionEntry>> {
		self.by_name.values()
	}

	pub fn codes(&self) -> Vec<Code> {
		self.by_code.keys().cloned().collect()
	}

	pub fn names(&self) -> Vec<&str> {
		self.by_name.keys().map(|k| &**k).collect()
	}

	pub fn all(&self) -> Vec<Arc<OptionEntry>> {
		self.by_name.values().cloned().collect()
	}

	/// `(name, code, text)` per option.
	pub fn tuples(&self) -> Vec<(&str, &Code, Option<&str>)> {
		self.iter().map(|o| (o.name(), o.code(), o.text())).collect()
	}

	/// Name to option map.
	pub fn items(&self) -> OrderedMap<&str, Arc<OptionEntry>> {
		self.by_name
			.iter()
			.map(|(k, v)| (&**k, v.clone()))
			.collect()
	}

	fn ordered(&self, order_by: Option<OrderBy>, reverse: bool) -> Vec<&Arc<OptionEntry>> {
		let mut list: Vec<_> = self.iter().collect();
		match order_by.or(self.policy.order_by) {
			Some(OrderBy::Code) => list.sort_by(|a, b| a.code().sort_cmp(b.code())),
			Some(OrderBy::Name) => list.sort_by(|a, b| a.name().cmp(b.name())),
			None => {}
		}
		if reverse {
			list.reverse();
		}
		list
	}

	/// Options ordered by `order_by`, falling back to the policy, then to
	/// registration order.
	pub fn sorted(&self, order_by: Option<OrderBy>, reverse: bool) -> Vec<Arc<OptionEntry>> {
		self.ordered(order_by, reverse).into_iter().cloned().collect()
	}

	pub fn code_list(&self, order_by: Option<OrderBy>, reverse: bool) -> Vec<Code> {
		self.ordered(order_by, reverse)
			.into_iter()
			.map(|o| o.code().clone())
			.collect()
	}

	pub fn name_list(&self, order_by: Option<OrderBy>, reverse: bool) -> Vec<&str> {
		self.ordered(order_by, reverse)
			.into_iter()
			.map(|o| o.name())
			.collect()
	}

	pub fn code_name_pairs(&self, order_by: Option<OrderBy>, reverse: bool) -> Vec<(Code, &str)> {
		self.ordered(order_by, reverse)
			.into_iter()
			.map(|o| (o.code().clone(), o.name()))
			.collect()
	}

	pub fn name_code_pairs(&self, order_by: Option<OrderBy>, reverse: bool) -> Vec<(&str, Code)> {
		self.ordered(order_by, reverse)
			.into_iter()
			.map(|o| (o.name(), o.code().clone()))
			.collect()
	}

	/// `(code, text)` per option; text is `None` where none was declared.
	pub fn code_text_pairs(
		&self,
		order_by: Option<OrderBy>,
		reverse: bool,
	) -> Vec<(Code, Option<&str>)> {
		self.ordered(order_by, reverse)
			.into_iter()
			.map(|o| (o.code().clone(), o.text()))
			.collect()
	}

	/// Projects `fields` of every option, in registration order.
	pub fn get_list(&self, fields: &[&str]) -> Result<Vec<Projection>> {
		let fields = project::parse_fields(fields)?;
		Ok(self.iter().map(|o| project::project(o, &fields)).collect())
	}

	/// Projects `fields` of every option, keyed by `key_field`.
	pub fn get_dict(
		&self,
		key_field: &str,
		fields: &[&str],
	) -> Result<OrderedMap<FieldValue, Projection>> {
		let key = project::parse_key_field(key_field)?;
		let fields = project::parse_fields(fields)?;
		Ok(self
			.iter()
			.map(|o| (key.read(o), project::project(o, &fields)))
			.collect())
	}

	fn resolve(&self, target: Target<'_>) -> Result<&Arc<OptionEntry>> {
		match target {
			Target::Name(name) => self.by_name.get(name).ok_or_else(|| Error::NotFound {
				what: "option",
				key: name.to_string(),
				context: Some(format!("set '{}'", self.label)),
			}),
			Target::Entry(entry) => self
				.by_code
				.get(entry.code())
				.filter(|registered| registered.is(entry))
				.ok_or_else(|| Error::NotFound {
					what: "option",
					key: entry.name().to_string(),
					context: Some(format!("set '{}' (not a registered instance)", self.label)),
				}),
		}
	}

	/// Adds `tag` to a registered option and its tag group.
	///
	/// Returns false if the option already carried the tag.
	pub fn add_tag<'a>(&self, option: impl Into<Target<'a>>, tag: &str) -> Result<bool> {
		let entry = self.resolve(option.into())?;
		optenum_primitives::validate_tag(tag).map_err(|e| Error::invalid_ident("tag", tag, e))?;
		Ok(self.tags.add(entry, tag))
	}

	/// Removes `tag` from a registered option and its tag group.
	pub fn remove_tag<'a>(&self, option: impl Into<Target<'a>>, tag: &str) -> Result<()> {
		let entry = self.resolve(option.into())?;
		optenum_primitives::validate_tag(tag).map_err(|e| Error::invalid_ident("tag", tag, e))?;
		self.tags.remove(entry, tag)
	}

	/// Current members of the group named `tag`.
	pub fn group(&self, tag: &str) -> Option<OptionGroup> {
		self.tags.snapshot().get(tag).cloned()
	}

	/// Known tag names, in creation order.
	pub fn tags(&self) -> Vec<String> {
		self.tags.snapshot().tags().map(str::to_string).collect()
	}

	/// The current published view of every tag group.
	pub fn groups(&self) -> Arc<TagSnapshot> {
		self.tags.snapshot()
	}
}

impl<'a> IntoIterator for &'a OptionSet {
	type Item = &'a Arc<OptionEntry>;
	type IntoIter = indexmap::map::Values<'a, Box<str>, Arc<OptionEntry>>;

	fn into_iter(self) -> Self::IntoIter {
		self.by_name.values()
	}
}
