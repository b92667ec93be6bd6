//! Registration of option sets.
//!
//! # Role
//!
//! [`OptionSetBuilder`] collects declarations in source order and turns them
//! into an [`OptionSet`] in one pass. Nothing is published until every
//! declaration has been accepted.
//!
//! # Invariants
//!
//! - Option names and codes are unique within a set; group keys share the
//!   name namespace.
//! - Declared groups resolve against options only, after all options are in.
//! - A failed build leaves no observable set.

use std::sync::Arc;

use optenum_primitives::{Code, validate_name};
use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use super::tags::TagIndexBuilder;
use super::{OptionSet, OrderBy, OrderedMap, SetPolicy};
use crate::error::{Error, Result};
use crate::option::{IntoText, OptionEntry};

/// The value side of one declaration.
///
/// The name of the resulting option is always the declaration key.
#[derive(Debug, Clone)]
pub enum Declared {
	/// A prebuilt option; its name must equal the key.
	Entry(OptionEntry),
	/// A bare code.
	Code(Code),
	/// A code with display text.
	WithText(Code, Option<String>),
	/// A code with display text and tags.
	Tagged(Code, Option<String>, Vec<String>),
	/// A group of already declared options, referenced by code.
	Group(Vec<Code>),
}

impl From<OptionEntry> for Declared {
	fn from(entry: OptionEntry) -> Self {
		Self::Entry(entry)
	}
}

impl From<Code> for Declared {
	fn from(code: Code) -> Self {
		Self::Code(code)
	}
}

/// Builder for an [`OptionSet`].
#[derive(Debug, Clone)]
#[must_use]
pub struct OptionSetBuilder {
	label: String,
	policy: SetPolicy,
	decls: Vec<(String, Declared)>,
}

impl OptionSetBuilder {
	pub fn new(label: impl Into<String>) -> Self {
		Self {
			label: label.into(),
			policy: SetPolicy::default(),
			decls: Vec::new(),
		}
	}

	/// Replaces the whole policy.
	pub fn policy(mut self, policy: SetPolicy) -> Self {
		self.policy = policy;
		self
	}

	/// Skip invalid keys instead of failing the build.
	pub fn ignore_invalid_name(mut self, ignore: bool) -> Self {
		self.policy.ignore_invalid_name = ignore;
		self
	}

	/// Default order of sorted views.
	pub fn order_by(mut self, order_by: Option<OrderBy>) -> Self {
		self.policy.order_by = order_by;
		self
	}

	/// Appends a declaration.
	pub fn declare(mut self, key: impl Into<String>, decl: impl Into<Declared>) -> Self {
		self.decls.push((key.into(), decl.into()));
		self
	}

	/// Declares an option with only a code.
	pub fn code(self, key: impl Into<String>, code: impl Into<Code>) -> Self {
		self.declare(key, Declared::Code(code.into()))
	}

	/// Declares an option with a code and display text.
	pub fn text(self, key: impl Into<String>, code: impl Into<Code>, text: impl IntoText) -> Self {
		self.declare(key, Declared::WithText(code.into(), text.into_text()))
	}

	/// Declares an option with a code, display text and tags.
	pub fn tagged<I, S>(
		self,
		key: impl Into<String>,
		code: impl Into<Code>,
		text: impl IntoText,
		tags: I,
	) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let tags = tags.into_iter().map(Into::into).collect();
		self.declare(key, Declared::Tagged(code.into(), text.into_text(), tags))
	}

	/// Declares a prebuilt option under `key`.
	pub fn entry(self, key: impl Into<String>, entry: OptionEntry) -> Self {
		self.declare(key, Declared::Entry(entry))
	}

	/// Declares a group of options by code. Members are tagged with `key`.
	pub fn group<I, C>(self, key: impl Into<String>, codes: I) -> Self
	where
		I: IntoIterator<Item = C>,
		C: Into<Code>,
	{
		self.declare(key, Declared::Group(codes.into_iter().map(Into::into).collect()))
	}

	/// Validates every declaration and registers the set.
	pub fn build(self) -> Result<OptionSet> {
		let Self { label, policy, decls } = self;

		let mut by_name: OrderedMap<Box<str>, Arc<OptionEntry>> = OrderedMap::default();
		let mut by_code: OrderedMap<Code, Arc<OptionEntry>> = OrderedMap::default();
		let mut keys: FxHashSet<String> = FxHashSet::default();
		let mut groups: Vec<(String, Vec<Code>)> = Vec::new();
		let mut ignored_keys: Vec<Box<str>> = Vec::new();
		let mut tags = TagIndexBuilder::default();

		for (key, decl) in decls {
			if let Err(err) = validate_name(&key) {
				if policy.ignore_invalid_name {
					debug!(set = %label, key = %key, reason = %err, "ignoring invalid key");
					ignored_keys.push(key.into_boxed_str());
					continue;
				}
				return Err(Error::InvalidDeclaration {
					set: label,
					key,
					reason: format!("key {err}"),
				});
			}
			if !keys.insert(key.clone()) {
				return Err(Error::DuplicateName { set: label, name: key });
			}

			let entry = match decl {
				Declared::Group(codes) => {
					groups.push((key, codes));
					continue;
				}
				Declared::Entry(entry) if entry.name() != key => {
					return Err(Error::InvalidDeclaration {
						reason: format!("option is named '{}'", entry.name()),
						set: label,
						key,
					});
				}
				Declared::Entry(entry) => entry,
				Declared::Code(code) => OptionEntry::new(code, key.as_str())?,
				Declared::WithText(code, text) => {
					OptionEntry::builder(code, key.as_str()).text(text).build()?
				}
				Declared::Tagged(code, text, tag_list) => OptionEntry::builder(code, key.as_str())
					.text(text)
					.tags(tag_list)
					.build()?,
			};

			if let Some(existing) = by_code.get(entry.code()) {
				return Err(Error::DuplicateCode {
					code: entry.code().clone(),
					existing: existing.name().to_string(),
					set: label,
					key,
				});
			}

			let entry = Arc::new(entry);
			trace!(set = %label, name = entry.name(), code = %entry.code(), "registered option");
			tags.index_entry(&entry);
			by_code.insert(entry.code().clone(), entry.clone());
			by_name.insert(key.into_boxed_str(), entry);
		}

		let mut declared_groups = Vec::with_capacity(groups.len());
		for (key, codes) in groups {
			tags.declare_group(&key);
			for code in &codes {
				let Some(entry) = by_code.get(code) else {
					return Err(Error::InvalidDeclaration {
						reason: format!("code {code} is not a declared option"),
						set: label,
						key,
					});
				};
				tags.attach(entry, &key);
			}
			declared_groups.push(key.into_boxed_str());
		}

		let tags = tags.freeze(&label);
		debug!(
			set = %label,
			options = by_name.len(),
			groups = declared_groups.len(),
			tags = tags.snapshot().len(),
			ignored = ignored_keys.len(),
			"registered option set"
		);

		Ok(OptionSet {
			label: label.into_boxed_str(),
			policy,
			by_name,
			by_code,
			declared_groups,
			ignored_keys,
			tags,
		})
	}
}
