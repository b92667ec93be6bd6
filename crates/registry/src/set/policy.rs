use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default ordering for a set's sorted views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum OrderBy {
	/// By code; mixed kinds put numbers before strings.
	Code,
	/// Lexicographic by name.
	Name,
}

impl OrderBy {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Code => "code",
			Self::Name => "name",
		}
	}
}

impl fmt::Display for OrderBy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for OrderBy {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		match s {
			"code" => Ok(Self::Code),
			"name" => Ok(Self::Name),
			other => Err(Error::invalid_argument(
				"order_by",
				other,
				"expected \"code\" or \"name\"",
			)),
		}
	}
}

impl TryFrom<String> for OrderBy {
	type Error = Error;

	fn try_from(value: String) -> Result<Self> {
		value.parse()
	}
}

impl From<OrderBy> for String {
	fn from(value: OrderBy) -> Self {
		value.as_str().to_string()
	}
}

/// Registration and ordering knobs of an option set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SetPolicy {
	/// Skip keys that are not valid option names instead of failing.
	pub ignore_invalid_name: bool,
	/// Default order for sorted views; `None` keeps registration order.
	pub order_by: Option<OrderBy>,
}

impl SetPolicy {
	/// Parses a policy from a TOML document.
	///
	/// ```
	/// use optenum::{OrderBy, SetPolicy};
	///
	/// let policy = SetPolicy::from_toml_str("ignore_invalid_name = true\norder_by = \"name\"").unwrap();
	/// assert!(policy.ignore_invalid_name);
	/// assert_eq!(policy.order_by, Some(OrderBy::Name));
	/// ```
	pub fn from_toml_str(src: &str) -> Result<Self> {
		toml::from_str(src).map_err(|e| Error::invalid_argument("policy", src.trim(), e.message()))
	}

	/// Renders the policy back to TOML.
	pub fn to_toml_string(&self) -> Result<String> {
		toml::to_string(self).map_err(|e| Error::invalid_argument("policy", format!("{self:?}"), e))
	}
}
