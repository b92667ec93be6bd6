use std::borrow::Cow;
use std::cmp::Ordering;
use std::sync::Arc;

use optenum_primitives::Code;

use super::{OptionEntry, OptionRef};
use crate::error::{Error, Result};

/// Right-hand side of an option comparison.
#[derive(Debug, Clone)]
pub enum Operand<'a> {
	/// A raw code value. Incompatible kinds are a type error.
	Value(Cow<'a, Code>),
	/// Another option. Incompatible kinds are unequal.
	Option(&'a Code),
	/// The `NotDefined` sentinel.
	NotDefined,
}

/// Anything an option can be compared against.
pub trait Comparand {
	fn operand(&self) -> Operand<'_>;
}

impl<T: Comparand + ?Sized> Comparand for &T {
	fn operand(&self) -> Operand<'_> {
		(**self).operand()
	}
}

impl<T: Comparand + ?Sized> Comparand for Arc<T> {
	fn operand(&self) -> Operand<'_> {
		(**self).operand()
	}
}

impl Comparand for Code {
	fn operand(&self) -> Operand<'_> {
		Operand::Value(Cow::Borrowed(self))
	}
}

impl Comparand for OptionEntry {
	fn operand(&self) -> Operand<'_> {
		Operand::Option(self.code())
	}
}

impl Comparand for OptionRef {
	fn operand(&self) -> Operand<'_> {
		match self {
			OptionRef::Defined(entry) => Operand::Option(entry.code()),
			OptionRef::NotDefined => Operand::NotDefined,
		}
	}
}

impl Comparand for str {
	fn operand(&self) -> Operand<'_> {
		Operand::Value(Cow::Owned(Code::from(self)))
	}
}

impl Comparand for String {
	fn operand(&self) -> Operand<'_> {
		Operand::Value(Cow::Owned(Code::from(self)))
	}
}

macro_rules! comparand_by_value {
	($($ty:ty),* $(,)?) => {
		$(
			impl Comparand for $ty {
				fn operand(&self) -> Operand<'_> {
					Operand::Value(Cow::Owned(Code::from(*self)))
				}
			}
		)*
	};
}

comparand_by_value!(i32, i64, u32, f32, f64);

pub(super) fn operand_kind(operand: &Operand<'_>) -> &'static str {
	match operand {
		Operand::Value(code) => code.kind().type_name(),
		Operand::Option(code) => code.kind().type_name(),
		Operand::NotDefined => "NotDefined",
	}
}

pub(super) fn eq_code(code: &Code, other: Operand<'_>) -> Result<bool> {
	match other {
		Operand::Option(rhs) => Ok(code == rhs),
		Operand::Value(rhs) if code.is_compatible(&rhs) => Ok(*code == *rhs),
		Operand::Value(rhs) => Err(Error::type_mismatch("==", code.kind(), rhs.kind().type_name())),
		Operand::NotDefined => Ok(false),
	}
}

pub(super) fn cmp_code(op: &'static str, code: &Code, other: Operand<'_>) -> Result<Ordering> {
	let rhs = match &other {
		Operand::Value(rhs) => &**rhs,
		Operand::Option(rhs) => *rhs,
		Operand::NotDefined => return Err(Error::type_mismatch(op, code.kind(), operand_kind(&other))),
	};
	code.try_cmp(rhs)
		.map_err(|_| Error::type_mismatch(op, code.kind(), operand_kind(&other)))
}
