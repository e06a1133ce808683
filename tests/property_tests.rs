//! Property-based tests for the parse/serialize round-trip guarantee.
//!
//! Every generated value must come back unchanged from its canonical string,
//! including values full of separators, escapes and edge whitespace.

use easyconfig_convert::{
    Convert, ConvertMap, Dependency, DictOfStrings, DictSchema, DictSpec, FieldSpec, FieldType,
    ListOfStrings, Patch, Patches, Value,
};
use proptest::prelude::*;

const TAGGED_FIELDS: &[FieldSpec] = &[
    FieldSpec::string("name").keyless().required(),
    FieldSpec::new("tags", FieldType::convert::<ListOfStrings<String>>()),
];

struct Tagged;

impl DictSchema for Tagged {
    const SPEC: DictSpec = DictSpec::new(TAGGED_FIELDS);
}

type TaggedDict = DictOfStrings<Tagged>;

fn tagged(name: String, tags: Vec<String>) -> TaggedDict {
    let mut map = ConvertMap::new();
    map.insert("name".to_string(), Value::from(name));
    map.insert(
        "tags".to_string(),
        Value::Sequence(tags.into_iter().map(Value::from).collect()),
    );
    TaggedDict::from_value(Value::Mapping(map)).unwrap()
}

fn roundtrip<T: Convert + PartialEq + std::fmt::Debug>(value: &T) -> bool {
    let serialized = value.serialize();
    match T::parse(&serialized) {
        Ok(parsed) => *value == parsed,
        Err(e) => {
            eprintln!("Parse failed: {}", e);
            eprintln!("Serialized was: {}", serialized);
            false
        }
    }
}

fn text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ._:;,/\\\\-]{1,20}"
}

fn patch() -> impl Strategy<Value = Patch> {
    (
        text(),
        proptest::option::of(any::<i64>()),
        proptest::option::of(text()),
    )
        .prop_map(|(filename, level, dest)| Patch {
            filename,
            level,
            dest,
        })
}

fn versop() -> impl Strategy<Value = String> {
    (
        prop::sample::select(vec!["", "==", "!=", ">", ">=", "<", "<="]),
        "[0-9]{1,3}(\\.[0-9]{1,3}){0,3}[a-z]?",
    )
        .prop_map(|(op, version)| format!("{}{}", op, version))
}

fn dependency_text() -> impl Strategy<Value = String> {
    (
        versop(),
        proptest::option::of(("[A-Z][a-zA-Z]{0,7}", proptest::option::of(versop()))),
    )
        .prop_map(|(versop, toolchain)| match toolchain {
            None => versop,
            Some((name, None)) => format!("{};{}", versop, name),
            Some((name, Some(tc_versop))) => format!("{};{} {}", versop, name, tc_versop),
        })
}

proptest! {
    #[test]
    fn prop_string(s in text()) {
        prop_assert!(roundtrip(&s));
    }

    #[test]
    fn prop_patch(p in patch()) {
        prop_assert!(roundtrip(&p));
    }

    #[test]
    fn prop_patches(v in prop::collection::vec(patch(), 0..8)) {
        let patches = Patches::from(v);
        prop_assert!(roundtrip(&patches));
    }

    #[test]
    fn prop_list_of_strings(v in prop::collection::vec(text(), 0..10)) {
        let list = ListOfStrings::from(v);
        prop_assert!(roundtrip(&list));
    }

    #[test]
    fn prop_lists_nested_in_list_elements(
        entries in prop::collection::vec((text(), prop::collection::vec(text(), 0..4)), 0..5)
    ) {
        let list: ListOfStrings<TaggedDict> = entries
            .into_iter()
            .map(|(name, tags)| tagged(name, tags))
            .collect();
        prop_assert!(roundtrip(&list));
    }

    #[test]
    fn prop_dependency(s in dependency_text()) {
        let dep = <Dependency>::parse(&s).unwrap();
        prop_assert!(roundtrip(&dep));
    }

    #[test]
    fn prop_value_roundtrip(v in prop::collection::vec(patch(), 0..8)) {
        let patches = Patches::from(v);
        let back = Patches::from_value(patches.to_value()).unwrap();
        prop_assert_eq!(back, patches);
    }

    #[test]
    fn prop_parse_never_panics(s in "\\PC{0,40}") {
        let _ = Patches::parse(&s);
        let _ = <Dependency>::parse(&s);
        let _ = ListOfStrings::<String>::parse(&s);
    }

    #[test]
    fn prop_canonical_is_fixed_point(p in patch()) {
        let once = p.serialize();
        let twice = Patch::parse(&once).unwrap().serialize();
        prop_assert_eq!(once, twice);
    }
}
