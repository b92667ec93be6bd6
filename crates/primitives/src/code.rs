use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// The underlying value of an option.
///
/// Integer and float codes form the numeric family and compare with each other
/// by value (`Int(1) == Float(1.0)`); string codes only compare with strings.
/// Hashing agrees with equality across the numeric family, so a map keyed by
/// [`Code`] treats `1` and `1.0` as the same key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Code {
	/// Integer code.
	Int(i64),
	/// Floating-point code.
	Float(f64),
	/// String code.
	Str(String),
}

/// Runtime kind of a [`Code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodeKind {
	/// `i64` code.
	Integer,
	/// `f64` code.
	Float,
	/// String code.
	String,
}

impl CodeKind {
	/// Returns true for the numeric family (integer and float).
	pub const fn is_numeric(self) -> bool {
		matches!(self, Self::Integer | Self::Float)
	}

	/// Returns true if values of both kinds can be ordered against each other.
	pub const fn is_compatible(self, other: CodeKind) -> bool {
		self.is_numeric() == other.is_numeric()
	}

	/// Short type name used in diagnostics.
	pub const fn type_name(self) -> &'static str {
		match self {
			Self::Integer => "int",
			Self::Float => "float",
			Self::String => "str",
		}
	}
}

impl fmt::Display for CodeKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.type_name())
	}
}

/// Two codes from different families were ordered against each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("codes of kind '{left}' and '{right}' are not comparable")]
pub struct KindMismatch {
	pub left: CodeKind,
	pub right: CodeKind,
}

impl Code {
	/// Returns the runtime kind of this code.
	pub const fn kind(&self) -> CodeKind {
		match self {
			Code::Int(_) => CodeKind::Integer,
			Code::Float(_) => CodeKind::Float,
			Code::Str(_) => CodeKind::String,
		}
	}

	/// Returns true if `other` belongs to the same family as this code.
	pub fn is_compatible(&self, other: &Code) -> bool {
		self.kind().is_compatible(other.kind())
	}

	/// Returns true for a float code holding NaN.
	pub fn is_nan(&self) -> bool {
		matches!(self, Code::Float(v) if v.is_nan())
	}

	/// Returns the integer value if this is an `Int` code.
	pub fn as_int(&self) -> Option<i64> {
		match self {
			Code::Int(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the float value if this is a `Float` code.
	pub fn as_float(&self) -> Option<f64> {
		match self {
			Code::Float(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns any numeric code widened to `f64`.
	pub fn as_number(&self) -> Option<f64> {
		match self {
			Code::Int(v) => Some(*v as f64),
			Code::Float(v) => Some(*v),
			Code::Str(_) => None,
		}
	}

	/// Returns the string value if this is a `Str` code.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Code::Str(v) => Some(v),
			_ => None,
		}
	}

	/// Orders two codes of the same family.
	pub fn try_cmp(&self, other: &Code) -> Result<Ordering, KindMismatch> {
		match (self, other) {
			(Code::Int(a), Code::Int(b)) => Ok(a.cmp(b)),
			(Code::Str(a), Code::Str(b)) => Ok(a.cmp(b)),
			(Code::Float(a), Code::Float(b)) => Ok(a.partial_cmp(b).unwrap_or_else(|| a.total_cmp(b))),
			(Code::Int(a), Code::Float(b)) => Ok(cmp_int_float(*a, *b)),
			(Code::Float(a), Code::Int(b)) => Ok(cmp_int_float(*b, *a).reverse()),
			_ => Err(KindMismatch {
				left: self.kind(),
				right: other.kind(),
			}),
		}
	}

	/// Total order over every code: numbers first, then strings.
	///
	/// Within a family this matches [`Code::try_cmp`].
	pub fn sort_cmp(&self, other: &Code) -> Ordering {
		self.try_cmp(other)
			.unwrap_or_else(|_| family_rank(self).cmp(&family_rank(other)))
	}
}

fn family_rank(code: &Code) -> u8 {
	if code.kind().is_numeric() { 0 } else { 1 }
}

/// Returns the exact `i64` value of an integral float, if it has one.
fn integral(v: f64) -> Option<i64> {
	// i64::MAX as f64 rounds up to 2^63, which is already out of range.
	if v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 {
		Some(v as i64)
	} else {
		None
	}
}

/// 2^63, the first float above every `i64`.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

fn cmp_int_float(a: i64, b: f64) -> Ordering {
	match integral(b) {
		Some(b) => a.cmp(&b),
		// `a as f64` may round onto an out-of-range bound.
		None if b >= I64_BOUND => Ordering::Less,
		None if b < -I64_BOUND => Ordering::Greater,
		None => (a as f64).partial_cmp(&b).unwrap_or_else(|| (a as f64).total_cmp(&b)),
	}
}

impl PartialEq for Code {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Code::Int(a), Code::Int(b)) => a == b,
			(Code::Str(a), Code::Str(b)) => a == b,
			// NaN equals NaN here so that `Eq` stays reflexive.
			(Code::Float(a), Code::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
			(Code::Int(a), Code::Float(b)) | (Code::Float(b), Code::Int(a)) => integral(*b) == Some(*a),
			_ => false,
		}
	}
}

impl Eq for Code {}

impl Hash for Code {
	fn hash<H: Hasher>(&self, state: &mut H) {
		match self {
			Code::Int(v) => {
				0u8.hash(state);
				v.hash(state);
			}
			Code::Float(v) => match integral(*v) {
				Some(i) => {
					0u8.hash(state);
					i.hash(state);
				}
				None => {
					1u8.hash(state);
					let bits = if v.is_nan() { f64::NAN.to_bits() } else { v.to_bits() };
					bits.hash(state);
				}
			},
			Code::Str(s) => {
				2u8.hash(state);
				s.hash(state);
			}
		}
	}
}

impl fmt::Display for Code {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Code::Int(v) => write!(f, "{v}"),
			Code::Float(v) => write!(f, "{v:?}"),
			Code::Str(v) => f.write_str(v),
		}
	}
}

macro_rules! code_from_int {
	($($ty:ty),* $(,)?) => {
		$(
			impl From<$ty> for Code {
				fn from(v: $ty) -> Self {
					Code::Int(i64::from(v))
				}
			}
		)*
	};
}

code_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f64> for Code {
	fn from(v: f64) -> Self {
		Code::Float(v)
	}
}

impl From<f32> for Code {
	fn from(v: f32) -> Self {
		Code::Float(f64::from(v))
	}
}

impl From<&str> for Code {
	fn from(v: &str) -> Self {
		Code::Str(v.to_string())
	}
}

impl From<String> for Code {
	fn from(v: String) -> Self {
		Code::Str(v)
	}
}

impl From<&String> for Code {
	fn from(v: &String) -> Self {
		Code::Str(v.clone())
	}
}

impl From<&Code> for Code {
	fn from(v: &Code) -> Self {
		v.clone()
	}
}

impl PartialEq<i64> for Code {
	fn eq(&self, other: &i64) -> bool {
		*self == Code::Int(*other)
	}
}

impl PartialEq<f64> for Code {
	fn eq(&self, other: &f64) -> bool {
		*self == Code::Float(*other)
	}
}

impl PartialEq<str> for Code {
	fn eq(&self, other: &str) -> bool {
		self.as_str() == Some(other)
	}
}

impl PartialEq<&str> for Code {
	fn eq(&self, other: &&str) -> bool {
		self.as_str() == Some(*other)
	}
}

#[cfg(test)]
mod tests {
	use std::collections::{HashMap, HashSet};
	use std::hash::{BuildHasher, DefaultHasher};

	use proptest::prelude::*;
	use rstest::rstest;

	use super::*;

	fn hash_of(code: &Code) -> u64 {
		let mut hasher = DefaultHasher::new();
		code.hash(&mut hasher);
		hasher.finish()
	}

	#[test]
	fn int_and_integral_float_are_one_key() {
		let state = std::collections::hash_map::RandomState::new();
		assert_eq!(Code::Int(1), Code::Float(1.0));
		assert_eq!(state.hash_one(Code::Int(1)), state.hash_one(Code::Float(1.0)));

		let mut map = HashMap::new();
		map.insert(Code::Int(2), "two");
		map.insert(Code::Float(2.0), "deux");
		assert_eq!(map.len(), 1);
		assert_eq!(map[&Code::Int(2)], "deux");
	}

	#[test]
	fn families_never_compare_equal() {
		assert_ne!(Code::Int(1), Code::from("1"));
		assert_ne!(Code::from("1.5"), Code::Float(1.5));
	}

	#[test]
	fn non_integral_float_is_not_an_int() {
		assert_ne!(Code::Float(1.5), Code::Int(1));
		assert_ne!(Code::Float(1.5), Code::Int(2));
	}

	#[test]
	fn nan_is_reflexive_for_eq() {
		let nan = Code::Float(f64::NAN);
		assert_eq!(nan, nan.clone());
		assert!(nan.is_nan());
		let set: HashSet<Code> = [nan.clone(), Code::Float(-f64::NAN)].into_iter().collect();
		assert_eq!(set.len(), 1);
	}

	#[rstest]
	#[case(Code::Int(1), Code::Int(2), Ordering::Less)]
	#[case(Code::Int(3), Code::Float(2.5), Ordering::Greater)]
	#[case(Code::Float(1.5), Code::Int(2), Ordering::Less)]
	#[case(Code::Float(2.0), Code::Int(2), Ordering::Equal)]
	#[case(Code::from("B"), Code::from("T"), Ordering::Less)]
	#[case(Code::from("P"), Code::from("Jump"), Ordering::Greater)]
	fn orders_within_family(#[case] a: Code, #[case] b: Code, #[case] expected: Ordering) {
		assert_eq!(a.try_cmp(&b), Ok(expected));
	}

	#[rstest]
	#[case(Code::from("F"), Code::Int(3))]
	#[case(Code::from("F"), Code::Float(2.1))]
	#[case(Code::Int(2), Code::from("B"))]
	fn ordering_across_families_fails(#[case] a: Code, #[case] b: Code) {
		let err = a.try_cmp(&b).unwrap_err();
		assert_eq!(err.left, a.kind());
		assert_eq!(err.right, b.kind());
	}

	#[test]
	fn out_of_range_floats_order_past_every_int() {
		let max = Code::Int(i64::MAX);
		let above = Code::Float(I64_BOUND);
		assert!(max != above);
		assert_eq!(max.try_cmp(&above), Ok(Ordering::Less));
		assert_eq!(above.try_cmp(&max), Ok(Ordering::Greater));
		assert_eq!(Code::Int(i64::MIN).try_cmp(&Code::Float(-I64_BOUND)), Ok(Ordering::Equal));
		assert_eq!(
			Code::Int(i64::MIN).try_cmp(&Code::Float(f64::NEG_INFINITY)),
			Ok(Ordering::Greater)
		);
		assert_eq!(max.sort_cmp(&Code::Float(f64::INFINITY)), Ordering::Less);
	}

	#[test]
	fn sort_cmp_puts_numbers_first() {
		let mut codes = vec![Code::from("C"), Code::Int(2), Code::from("A"), Code::Float(1.5)];
		codes.sort_by(Code::sort_cmp);
		assert_eq!(codes, vec![Code::Float(1.5), Code::Int(2), Code::from("A"), Code::from("C")]);
	}

	#[test]
	fn accessors_follow_kind() {
		assert_eq!(Code::Int(-1).as_int(), Some(-1));
		assert_eq!(Code::Int(-1).as_number(), Some(-1.0));
		assert_eq!(Code::Float(-2.1).as_float(), Some(-2.1));
		assert_eq!(Code::Float(-2.1).as_int(), None);
		assert_eq!(Code::from("O").as_str(), Some("O"));
		assert_eq!(Code::from("O").as_number(), None);
	}

	#[test]
	fn display_prints_bare_value() {
		assert_eq!(Code::Int(1).to_string(), "1");
		assert_eq!(Code::Float(-2.1).to_string(), "-2.1");
		assert_eq!(Code::from("O").to_string(), "O");
	}

	#[test]
	fn deserializes_untagged() {
		let codes: Vec<Code> = serde_json::from_str(r#"[1, 2.5, "O"]"#).unwrap();
		assert_eq!(codes, vec![Code::Int(1), Code::Float(2.5), Code::from("O")]);
		assert_eq!(serde_json::to_string(&Code::from("C")).unwrap(), r#""C""#);
	}

	proptest! {
		#[test]
		fn int_float_equality_agrees_with_hash(v in -1_000_000i64..1_000_000) {
			let a = Code::Int(v);
			let b = Code::Float(v as f64);
			prop_assert_eq!(&a, &b);
			prop_assert_eq!(hash_of(&a), hash_of(&b));
		}

		#[test]
		fn equal_codes_hash_equal(a in any::<i64>(), s in "[A-Z]{1,4}") {
			let x = Code::Int(a);
			prop_assert_eq!(hash_of(&x), hash_of(&x.clone()));
			let y = Code::Str(s.clone());
			prop_assert_eq!(hash_of(&y), hash_of(&Code::from(s.as_str())));
		}

		#[test]
		fn sort_cmp_is_antisymmetric(a in any::<i32>(), b in -1e6f64..1e6) {
			let x = Code::from(a);
			let y = Code::Float(b);
			prop_assert_eq!(x.sort_cmp(&y), y.sort_cmp(&x).reverse());
		}
	}
}
