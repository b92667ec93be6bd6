//! Declaration macro for option sets.

/// Declares and registers an [`OptionSet`](crate::OptionSet).
///
/// Each entry is `KEY = value` where value is one of:
///
/// - `code`
/// - `(code, text)` (text may be `None`)
/// - `(code, text, [TAG, ...])`
/// - `option(entry)` for a prebuilt [`OptionEntry`](crate::OptionEntry)
/// - `group[code, ...]` for a declared group
///
/// Any other shape fails to compile. Expands to a `Result<OptionSet, Error>`.
///
/// # Example
///
/// ```
/// let doors = optenum::option_set!(DoorStates {
///     OPEN = ("O", "Door is opened"),
///     CLOSED = ("C", "Door is closed"),
///     IN_OPENING = "IO",
///     IN_CLOSING = "IC",
///     IN_PROGRESS_STATUS = group["IO", "IC"],
/// })
/// .unwrap();
///
/// assert_eq!(doors.lookup_by_code("O").name(), Some("OPEN"));
/// assert_eq!(doors.group("IN_PROGRESS_STATUS").unwrap().len(), 2);
/// ```
///
/// A policy goes in parentheses after the label:
///
/// ```
/// use optenum::{OrderBy, SetPolicy};
///
/// let policy = SetPolicy { order_by: Some(OrderBy::Name), ..SetPolicy::default() };
/// let fruits = optenum::option_set!(Fruits(policy) { APPLE = 1, ORANGE = 2, BANANA = 3 }).unwrap();
/// assert_eq!(fruits.name_list(None, false), ["APPLE", "BANANA", "ORANGE"]);
/// ```
#[macro_export]
macro_rules! option_set {
	($label:ident { $($body:tt)* }) => {
		$crate::__option_set_decls!(
			$crate::OptionSet::builder(stringify!($label));
			$($body)*
		)
		.build()
	};
	($label:ident ($policy:expr) { $($body:tt)* }) => {
		$crate::__option_set_decls!(
			$crate::OptionSet::builder(stringify!($label)).policy($policy);
			$($body)*
		)
		.build()
	};
}

/// Folds `KEY = value` entries onto a builder expression.
#[doc(hidden)]
#[macro_export]
macro_rules! __option_set_decls {
	($b:expr;) => {
		$b
	};
	($b:expr; $key:ident = group [$($code:expr),* $(,)?] $(, $($rest:tt)*)?) => {
		$crate::__option_set_decls!(
			$b.group(stringify!($key), $crate::__option_set_codes!($($code),*));
			$($($rest)*)?
		)
	};
	($b:expr; $key:ident = option($entry:expr) $(, $($rest:tt)*)?) => {
		$crate::__option_set_decls!(
			$b.entry(stringify!($key), $entry);
			$($($rest)*)?
		)
	};
	($b:expr; $key:ident = ($code:expr, None, [$($tag:expr),* $(,)?]) $(, $($rest:tt)*)?) => {
		$crate::__option_set_decls!(
			$b.tagged(
				stringify!($key),
				$code,
				::std::option::Option::<::std::string::String>::None,
				$crate::__option_set_tags!($($tag),*),
			);
			$($($rest)*)?
		)
	};
	($b:expr; $key:ident = ($code:expr, $text:expr, [$($tag:expr),* $(,)?]) $(, $($rest:tt)*)?) => {
		$crate::__option_set_decls!(
			$b.tagged(stringify!($key), $code, $text, $crate::__option_set_tags!($($tag),*));
			$($($rest)*)?
		)
	};
	($b:expr; $key:ident = ($code:expr, None) $(, $($rest:tt)*)?) => {
		$crate::__option_set_decls!(
			$b.text(
				stringify!($key),
				$code,
				::std::option::Option::<::std::string::String>::None,
			);
			$($($rest)*)?
		)
	};
	($b:expr; $key:ident = ($code:expr, $text:expr) $(, $($rest:tt)*)?) => {
		$crate::__option_set_decls!(
			$b.text(stringify!($key), $code, $text);
			$($($rest)*)?
		)
	};
	($b:expr; $key:ident = $code:expr $(, $($rest:tt)*)?) => {
		$crate::__option_set_decls!(
			$b.code(stringify!($key), $code);
			$($($rest)*)?
		)
	};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __option_set_codes {
	($($code:expr),*) => {{
		let codes: ::std::vec::Vec<$crate::Code> = ::std::vec![$($crate::Code::from($code)),*];
		codes
	}};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __option_set_tags {
	($($tag:expr),*) => {{
		let tags: ::std::vec::Vec<::std::string::String> =
			::std::vec![$(::std::string::String::from($tag)),*];
		tags
	}};
}
