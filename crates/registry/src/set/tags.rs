//! Live tag groups owned by an option set.
//!
//! # Role
//!
//! Keeps one [`OptionGroup`] per tag name in sync with the tags carried by the
//! set's options. Readers see an immutable [`TagSnapshot`]; writers mutate a
//! working copy under a mutex and republish it.
//!
//! # Invariants
//!
//! - For every registered option `o` and tag `t`: `o.has_tag(t)` iff the group
//!   `t` contains `o`, as observed by any snapshot published after the change.
//! - Entry tags and group membership are only changed while the writer lock is
//!   held, so concurrent writers cannot interleave the two halves of an update.
//! - Groups are never dropped; an emptied group stays published.

use std::sync::Arc;

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use tracing::debug;

use super::OrderedMap;
use crate::error::Result;
use crate::group::OptionGroup;
use crate::option::OptionEntry;

/// Published view of every tag group, in tag creation order.
#[derive(Debug, Clone, Default)]
pub struct TagSnapshot {
	groups: OrderedMap<Box<str>, OptionGroup>,
}

impl TagSnapshot {
	pub fn get(&self, tag: &str) -> Option<&OptionGroup> {
		self.groups.get(tag)
	}

	pub fn tags(&self) -> impl Iterator<Item = &str> {
		self.groups.keys().map(|k| &**k)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionGroup)> {
		self.groups.iter().map(|(k, g)| (&**k, g))
	}

	pub fn len(&self) -> usize {
		self.groups.len()
	}

	pub fn is_empty(&self) -> bool {
		self.groups.is_empty()
	}
}

/// Builds the initial tag groups during registration.
#[derive(Debug, Default)]
pub(super) struct TagIndexBuilder {
	groups: OrderedMap<Box<str>, OptionGroup>,
}

impl TagIndexBuilder {
	/// Adds `entry` to the group of every tag it currently carries.
	pub(super) fn index_entry(&mut self, entry: &Arc<OptionEntry>) {
		for tag in entry.tags() {
			self.groups
				.entry(tag.into_boxed_str())
				.or_default()
				.add(entry.clone());
		}
	}

	/// Publishes `tag` even if no option ends up carrying it.
	pub(super) fn declare_group(&mut self, tag: &str) {
		self.groups.entry(Box::from(tag)).or_default();
	}

	/// Tags `entry` with `tag` and adds it to that group.
	pub(super) fn attach(&mut self, entry: &Arc<OptionEntry>, tag: &str) {
		entry.attach_tag(tag);
		self.groups.entry(Box::from(tag)).or_default().add(entry.clone());
	}

	pub(super) fn freeze(self, label: &str) -> TagGroups {
		TagGroups {
			label: label.into(),
			published: ArcSwap::from_pointee(TagSnapshot {
				groups: self.groups.clone(),
			}),
			writer: Mutex::new(self.groups),
		}
	}
}

/// Tag group state of one set: a mutex-guarded working copy plus the
/// snapshot readers load without locking.
pub(super) struct TagGroups {
	label: Box<str>,
	published: ArcSwap<TagSnapshot>,
	writer: Mutex<OrderedMap<Box<str>, OptionGroup>>,
}

impl TagGroups {
	pub(super) fn snapshot(&self) -> Arc<TagSnapshot> {
		self.published.load_full()
	}

	/// Adds `tag` to a registered entry. Returns false if it was already set.
	pub(super) fn add(&self, entry: &Arc<OptionEntry>, tag: &str) -> bool {
		let mut groups = self.writer.lock();
		let added = entry.attach_tag(tag);
		let joined = groups.entry(Box::from(tag)).or_default().add(entry.clone());
		if added || joined {
			debug!(set = %self.label, option = entry.name(), tag, "tag added");
			self.publish(&groups);
		}
		added
	}

	/// Removes `tag` from a registered entry.
	pub(super) fn remove(&self, entry: &Arc<OptionEntry>, tag: &str) -> Result<()> {
		let mut groups = self.writer.lock();
		if !entry.detach_tag(tag) {
			return Err(entry.missing_tag(tag));
		}
		if let Some(group) = groups.get_mut(tag) {
			// Membership mirrors the entry's tags.
			let _ = group.remove(entry);
		}
		debug!(set = %self.label, option = entry.name(), tag, "tag removed");
		self.publish(&groups);
		Ok(())
	}

	fn publish(&self, groups: &OrderedMap<Box<str>, OptionGroup>) {
		self.published.store(Arc::new(TagSnapshot {
			groups: groups.clone(),
		}));
	}
}
