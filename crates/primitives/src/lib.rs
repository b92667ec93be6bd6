//! Value-level building blocks for option sets: codes and identifier rules.

/// Option code values, kinds and comparison rules.
pub mod code;
/// Identifier validation for option names and tags.
pub mod ident;

pub use code::{Code, CodeKind, KindMismatch};
pub use ident::{IdentError, is_identifier, is_upper, validate_name, validate_tag};
