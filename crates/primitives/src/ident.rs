/// Why a name or tag failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IdentError {
	#[error("must not be empty")]
	Empty,
	#[error("must start with an alphabetic character")]
	LeadingChar,
	#[error("must contain only alphanumeric characters or '_'")]
	NotIdentifier,
	#[error("must be uppercase")]
	NotUppercase,
}

/// Returns true if `s` is a plain identifier: a letter or `_` followed by
/// letters, digits or `_`.
pub fn is_identifier(s: &str) -> bool {
	let mut chars = s.chars();
	match chars.next() {
		Some(first) if first.is_alphabetic() || first == '_' => {}
		_ => return false,
	}
	chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Returns true if `s` has at least one cased character and no lowercase ones.
pub fn is_upper(s: &str) -> bool {
	s.chars().any(char::is_uppercase) && !s.chars().any(char::is_lowercase)
}

/// Validates an option name: alphabetic first character, identifier, uppercase.
pub fn validate_name(name: &str) -> Result<(), IdentError> {
	let first = name.chars().next().ok_or(IdentError::Empty)?;
	if !first.is_alphabetic() {
		return Err(IdentError::LeadingChar);
	}
	if !is_identifier(name) {
		return Err(IdentError::NotIdentifier);
	}
	if !is_upper(name) {
		return Err(IdentError::NotUppercase);
	}
	Ok(())
}

/// Validates a tag. Tags share the naming rules; the `_` prefix is reserved.
pub fn validate_tag(tag: &str) -> Result<(), IdentError> {
	validate_name(tag)
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case("1a")]
	#[case("a-b")]
	#[case(" a")]
	#[case("a b")]
	#[case("a\tb")]
	#[case("\tab")]
	#[case("ab\t")]
	#[case("ab ")]
	#[case("ab\n")]
	#[case("\nab")]
	#[case("a\nb")]
	#[case("a\\b")]
	#[case("a/b")]
	#[case("a\"")]
	#[case("a.b")]
	#[case("")]
	fn rejects_non_identifiers(#[case] s: &str) {
		assert!(!is_identifier(s), "{s:?} should not be an identifier");
	}

	#[test]
	fn accepts_identifiers() {
		assert!(is_identifier("_private"));
		assert!(is_identifier("BAR_1"));
		assert!(is_identifier("a1"));
	}

	#[test]
	fn upper_needs_a_cased_char() {
		assert!(is_upper("A1_"));
		assert!(!is_upper("1_"));
		assert!(!is_upper("FOO_1a"));
	}

	#[rstest]
	#[case("_FOO", IdentError::LeadingChar)]
	#[case("1Foo", IdentError::LeadingChar)]
	#[case("Foo", IdentError::NotUppercase)]
	#[case("FOO_1a", IdentError::NotUppercase)]
	#[case("Fo.o", IdentError::NotIdentifier)]
	#[case("", IdentError::Empty)]
	fn rejects_invalid_names(#[case] name: &str, #[case] expected: IdentError) {
		assert_eq!(validate_name(name), Err(expected));
	}

	#[test]
	fn accepts_valid_names_and_tags() {
		assert_eq!(validate_name("IN_OPENING"), Ok(()));
		assert_eq!(validate_tag("BA1Z"), Ok(()));
		assert_eq!(validate_tag("_HIDDEN"), Err(IdentError::LeadingChar));
	}
}
