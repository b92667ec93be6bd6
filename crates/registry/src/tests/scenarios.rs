use std::collections::HashMap;
use std::sync::Arc;

use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::{Code, ErrorKind, OptionEntry, OptionRef, OptionSet, OrderBy, option_set};

#[test]
fn door_states_lookup() {
	let doors = option_set!(DoorStates {
		OPEN = ("O", "Door is opened"),
		CLOSED = ("C", "Door is closed"),
	})
	.unwrap();

	assert_eq!(doors.lookup_by_code("O").name(), Some("OPEN"));
	assert_eq!(doors.lookup_by_name("CLOSED").code(), Some(&Code::from("C")));
	let missing = doors.lookup_by_code("X");
	assert!(matches!(missing, OptionRef::NotDefined));
	assert_eq!(missing.get_text(), "None");
}

#[test]
fn tag_groups_follow_removal() {
	let set = option_set!(Tagged {
		A = (1, None, ["BAR"]),
		B = (2, "B is 2", ["FOO"]),
		C = ("C", "C is letter", ["FOO", "BAR"]),
	})
	.unwrap();

	let foo: Vec<_> = set.group("FOO").unwrap().names().into_iter().map(String::from).collect();
	assert_eq!(foo, vec!["B".to_string(), "C".to_string()]);

	let c = set.index("C").unwrap();
	set.remove_tag(&c, "FOO").unwrap();
	assert_eq!(set.group("FOO").unwrap().names(), vec!["B"]);
	assert_eq!(c.tags(), vec!["BAR".to_string()]);
	assert_eq!(set.index("A").unwrap().get_text(), "a");
}

#[test]
fn same_code_across_sets_is_equal_not_identical() {
	let fruits = option_set!(Fruits { APPLE = 1, ORANGE = 2, BANANA = 3 }).unwrap();
	let phones = option_set!(CellPhones {
		APPLE = 1,
		SAMSUNG = option(OptionEntry::new(2, "SAMSUNG").unwrap()),
		HUAWEI = (3, "Huawei cellphone"),
	})
	.unwrap();

	let fruit = fruits.index("APPLE").unwrap();
	let phone = phones.index("APPLE").unwrap();
	assert_eq!(fruit, phone);
	assert!(!Arc::ptr_eq(&fruit, &phone));
	assert!(!fruit.is(&phone));
	assert!(fruits.index("ORANGE").unwrap().try_lt(&*fruits.index("BANANA").unwrap()).unwrap());
	assert_eq!(*phones.index("SAMSUNG").unwrap(), 2i64);
	assert_eq!(phones.index("HUAWEI").unwrap().text(), Some("Huawei cellphone"));
}

#[test]
fn string_option_against_integer_is_a_type_error() {
	let set = option_set!(Names { NAME = "A" }).unwrap();
	let err = set.index("NAME").unwrap().try_eq(2).unwrap_err();
	assert_eq!(err.kind(), ErrorKind::TypeMismatch);
}

#[test]
fn options_and_codes_share_hash_map_slots() {
	let set = option_set!(Fruits { APPLE = 1, ORANGE = 2 }).unwrap();
	let apple = set.index("APPLE").unwrap();

	let mut counts: HashMap<Code, u32> = HashMap::new();
	*counts.entry(apple.code().clone()).or_default() += 1;
	*counts.entry(Code::Int(1)).or_default() += 1;
	*counts.entry(Code::Float(1.0)).or_default() += 1;
	assert_eq!(counts.len(), 1);
	assert_eq!(counts[&Code::Int(1)], 3);

	let by_option: HashMap<OptionEntry, &str> = set
		.iter()
		.map(|o| ((**o).clone(), o.name()))
		.collect();
	assert_eq!(by_option.get(&Code::Int(2)), Some(&"ORANGE"));
}

#[test]
fn sorting_scenario() {
	let set = option_set!(Numbers { THREE = 3, ONE = 1, TWO = 2 }).unwrap();
	assert_eq!(
		set.code_list(Some(OrderBy::Code), false),
		vec![Code::Int(1), Code::Int(2), Code::Int(3)]
	);
	assert_eq!(set.name_list(Some(OrderBy::Name), false), vec!["ONE", "THREE", "TWO"]);
}

#[test]
fn declared_group_tags_its_members() {
	let doors = option_set!(DoorStates {
		OPEN = ("O", "Door is opened"),
		CLOSED = ("C", "Door is closed"),
		IN_OPENING = "IO",
		IN_CLOSING = "IC",
		IN_PROGRESS_STATUS = group["IO", "IC"],
	})
	.unwrap();

	let group = doors.group("IN_PROGRESS_STATUS").unwrap();
	assert_eq!(group.codes(), vec![Code::from("IO"), Code::from("IC")]);
	assert!(doors.index("IN_OPENING").unwrap().has_tag("IN_PROGRESS_STATUS"));
	assert!(!doors.index("OPEN").unwrap().has_tag("IN_PROGRESS_STATUS"));
	assert_eq!(doors.len(), 4);
	assert!(doors.get("IN_PROGRESS_STATUS").is_none());
}

#[rstest]
#[case("foo")]
#[case("Bar")]
#[case("1ABC")]
#[case("_ABC")]
fn invalid_names_reject_the_whole_set(#[case] key: &str) {
	let err = OptionSet::builder("Invalid")
		.code("FOO", 1)
		.code(key, 2)
		.code("BAZ_1", 3)
		.build()
		.unwrap_err();
	assert_eq!(err.kind(), ErrorKind::InvalidDeclaration);
}

#[test]
fn ignored_names_keep_the_rest() {
	let policy = crate::SetPolicy::from_toml_str("ignore_invalid_name = true").unwrap();
	let set = option_set!(Mixed(policy) { foo = 1, Bar = 2, BAZ_1 = 3 }).unwrap();
	assert_eq!(set.names(), vec!["BAZ_1"]);
	assert_eq!(set.ignored_keys().collect::<Vec<_>>(), vec!["foo", "Bar"]);
}

#[test]
fn macro_reports_duplicates() {
	let err = option_set!(Dup { FOO = 1, BAR = 1 }).unwrap_err();
	assert_eq!(err.kind(), ErrorKind::DuplicateCode);
	let err = option_set!(Dup { FOO = 1, FOO = 2 }).unwrap_err();
	assert_eq!(err.kind(), ErrorKind::DuplicateName);
}
