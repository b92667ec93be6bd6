use optenum_primitives::{Code, CodeKind, IdentError};

/// Closed set of failure categories, one per [`Error`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	InvalidArgument,
	InvalidDeclaration,
	DuplicateCode,
	DuplicateName,
	TypeMismatch,
	KeyNotFound,
	NotFound,
	Unsupported,
}

/// Errors raised while building, comparing, or querying options.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
	/// Malformed code, name, tag, field or policy value.
	#[error("invalid {field} {value:?}: {reason}")]
	InvalidArgument {
		field: &'static str,
		value: String,
		reason: String,
	},

	/// A declaration in an option set could not be registered.
	#[error("invalid declaration '{key}' in '{set}': {reason}")]
	InvalidDeclaration { set: String, key: String, reason: String },

	/// Two declarations share a code.
	#[error("duplicate code {code} in '{set}': '{key}' collides with '{existing}'")]
	DuplicateCode {
		set: String,
		code: Code,
		key: String,
		existing: String,
	},

	/// Two declarations share a name.
	#[error("duplicate name '{name}' in '{set}'")]
	DuplicateName { set: String, name: String },

	/// Comparison across incompatible code kinds, or ordering against `NotDefined`.
	#[error("'{op}' not supported between '{left}' and '{right}'")]
	TypeMismatch {
		op: &'static str,
		left: &'static str,
		right: &'static str,
	},

	/// Indexed access by a name that is not registered.
	#[error("'{set}' has no option '{key}'{}", suggestion_suffix(.suggestion))]
	KeyNotFound {
		set: String,
		key: String,
		suggestion: Option<String>,
	},

	/// A tag, group member or option that should be present is not.
	#[error("{what} '{key}' not found{}", context_suffix(.context))]
	NotFound {
		what: &'static str,
		key: String,
		context: Option<String>,
	},

	/// Mutation of a closed option set.
	#[error("'{set}' does not support item {op}")]
	Unsupported { set: String, op: &'static str },
}

fn suggestion_suffix(suggestion: &Option<String>) -> String {
	suggestion
		.as_ref()
		.map(|s| format!(" (did you mean '{s}'?)"))
		.unwrap_or_default()
}

fn context_suffix(context: &Option<String>) -> String {
	context.as_ref().map(|c| format!(" in {c}")).unwrap_or_default()
}

impl Error {
	/// Returns the category of this error.
	pub fn kind(&self) -> ErrorKind {
		match self {
			Error::InvalidArgument { .. } => ErrorKind::InvalidArgument,
			Error::InvalidDeclaration { .. } => ErrorKind::InvalidDeclaration,
			Error::DuplicateCode { .. } => ErrorKind::DuplicateCode,
			Error::DuplicateName { .. } => ErrorKind::DuplicateName,
			Error::TypeMismatch { .. } => ErrorKind::TypeMismatch,
			Error::KeyNotFound { .. } => ErrorKind::KeyNotFound,
			Error::NotFound { .. } => ErrorKind::NotFound,
			Error::Unsupported { .. } => ErrorKind::Unsupported,
		}
	}

	pub(crate) fn invalid_argument(
		field: &'static str,
		value: impl Into<String>,
		reason: impl ToString,
	) -> Self {
		Error::InvalidArgument {
			field,
			value: value.into(),
			reason: reason.to_string(),
		}
	}

	pub(crate) fn invalid_ident(field: &'static str, value: &str, err: IdentError) -> Self {
		Self::invalid_argument(field, value, err)
	}

	pub(crate) fn type_mismatch(op: &'static str, left: CodeKind, right: &'static str) -> Self {
		Error::TypeMismatch {
			op,
			left: left.type_name(),
			right,
		}
	}
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
