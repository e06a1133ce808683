use easyconfig_convert::{
    parse, to_string, Convert, Dependency, Error, ErrorKind, ListOfStrings, Operator, Patch,
    Patches, ToolchainVersionOperator, VersionOperator,
};

#[test]
fn test_positional_and_keyed_filename_agree() {
    let positional: Patch = parse("fix.patch;level:1").unwrap();
    let keyed: Patch = parse("filename:fix.patch;level:1").unwrap();
    assert_eq!(positional, keyed);
    assert_eq!(to_string(&keyed), "fix.patch;level:1");
}

#[test]
fn test_keys_in_any_order() {
    let patch: Patch = parse("dest:src;level:2;filename:fix.patch").unwrap();
    assert_eq!(patch, Patch::new("fix.patch").with_level(2).with_dest("src"));
    assert_eq!(to_string(&patch), "fix.patch;level:2;dest:src");
}

#[test]
fn test_level_is_integer() {
    let patch: Patch = parse("fix.patch;level:0").unwrap();
    assert_eq!(patch.level, Some(0));

    for bad in ["fix.patch;level:one", "fix.patch;level:1.5", "fix.patch;level:"] {
        let err = Patch::parse(bad).unwrap_err();
        assert!(matches!(err, Error::InvalidInteger { .. }), "{}", bad);
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}

#[test]
fn test_unknown_key() {
    let err = Patch::parse("fix.patch;strip:1").unwrap_err();
    assert!(err.is_validation());
    let msg = err.to_string();
    println!("Unknown key: {}", msg);
    assert!(msg.contains("strip"));
    assert!(msg.contains("filename"));
}

#[test]
fn test_duplicate_keyless() {
    let err = Patch::parse("a.patch;filename:b.patch").unwrap_err();
    assert!(matches!(err, Error::DuplicateKey { ref key, .. } if key == "filename"));

    let err = Patch::parse("a.patch;b.patch").unwrap_err();
    assert!(err.is_parse());
}

#[test]
fn test_missing_filename() {
    let err = Patch::parse("level:1").unwrap_err();
    assert!(matches!(err, Error::MissingKey { ref key, .. } if key == "filename"));
}

#[test]
fn test_whitespace_around_separators() {
    let patches: Patches = parse("  a.patch , b.patch ; level : 1 ").unwrap();
    assert_eq!(to_string(&patches), "a.patch,b.patch;level:1");
}

#[test]
fn test_escaped_separators_in_values() {
    let patches: Patches = parse(r"we\,ird\;name.patch;dest:C\:\\src").unwrap();
    assert_eq!(patches.len(), 1);
    let patch = &patches.as_slice()[0];
    assert_eq!(patch.filename, "we,ird;name.patch");
    assert_eq!(patch.dest.as_deref(), Some(r"C:\src"));

    let written = to_string(&patches);
    assert_eq!(written, r"we\,ird\;name.patch;dest:C\:\\src");
    assert_eq!(Patches::parse(&written).unwrap(), patches);
}

#[test]
fn test_filename_with_colon() {
    let patch = Patch::new("http://example.org/fix.patch");
    let written = to_string(&patch);
    assert_eq!(written, r"http\://example.org/fix.patch");
    assert_eq!(Patch::parse(&written).unwrap(), patch);

    let keyed: Patch = parse("filename:http://example.org/fix.patch").unwrap();
    assert_eq!(keyed, patch);

    // an unescaped colon starts a key
    let err = Patch::parse("http://example.org/fix.patch").unwrap_err();
    assert!(matches!(err, Error::UnknownKey { ref key, .. } if key == "http"));
}

#[test]
fn test_escaped_edge_whitespace_is_kept() {
    let patch = Patch::new(" padded ");
    let written = to_string(&patch);
    assert_eq!(written, r"\ padded\ ");
    assert_eq!(Patch::parse(&written).unwrap().filename, " padded ");
}

#[test]
fn test_dangling_escape() {
    let err = Patches::parse(r"fix.patch\").unwrap_err();
    assert!(err.is_parse());
}

#[test]
fn test_patches_keep_order() {
    let patches: Patches = parse("3.patch,1.patch,2.patch").unwrap();
    let names: Vec<&str> = patches.iter().map(|p| p.filename.as_str()).collect();
    assert_eq!(names, ["3.patch", "1.patch", "2.patch"]);
}

#[test]
fn test_empty_list() {
    assert!(Patches::parse("").unwrap().is_empty());
    assert!(Patches::parse("   ").unwrap().is_empty());
    assert_eq!(Patches::default().serialize(), "");
}

#[test]
fn test_empty_list_element() {
    assert!(Patches::parse("a.patch,,b.patch").unwrap_err().is_parse());
    assert!(ListOfStrings::<String>::parse("a,").is_err());
}

#[test]
fn test_dependency_cardinality() {
    let dep = <Dependency>::parse("1.2.3").unwrap();
    assert_eq!(dep.versop, VersionOperator::new(Operator::Eq, "1.2.3"));
    assert!(dep.tc_versop.is_none());

    let dep = <Dependency>::parse("1.2.3;>=2020a").unwrap();
    let tc_versop = dep.tc_versop.unwrap();
    assert_eq!(tc_versop.toolchain, None);
    assert_eq!(
        tc_versop.versop,
        Some(VersionOperator::new(Operator::Ge, "2020a"))
    );

    for bad in ["", "a;b;c"] {
        let err = <Dependency>::parse(bad).unwrap_err();
        assert!(matches!(
            err,
            Error::SegmentCount {
                min: 1,
                max: 2,
                ..
            }
        ));
    }
}

#[test]
fn test_dependency_toolchain_forms() {
    let cases = [
        ("1.0;GCC", "1.0;GCC"),
        ("1.0;GCC>=4.6", "1.0;GCC >=4.6"),
        ("1.0 ; foss 2020a", "1.0;foss 2020a"),
        ("1.0;==2020a", "1.0;2020a"),
        ("1.0;==rc", "1.0;==rc"),
        ("!=1.0;<9", "!=1.0;<9"),
    ];
    for (input, canonical) in cases {
        let dep = <Dependency>::parse(input).unwrap();
        assert_eq!(dep.serialize(), canonical, "{}", input);
        assert_eq!(<Dependency>::parse(canonical).unwrap(), dep);
    }
}

#[test]
fn test_dependency_bad_constraints() {
    for bad in [">=", "1 2", "1.0;GCC 4 6", "1.0;GCC >"] {
        let err = <Dependency>::parse(bad).unwrap_err();
        assert!(matches!(err, Error::Version { .. }), "{}: {:?}", bad, err);
        assert!(err.is_parse());
    }
}

#[test]
fn test_toolchain_test() {
    let tc: ToolchainVersionOperator = "GCC >=4.6".parse().unwrap();
    assert!(tc.test("GCC", "4.6"));
    assert!(tc.test("GCC", "10.2.0"));
    assert!(!tc.test("GCC", "4.4.7"));
    assert!(!tc.test("iccifort", "4.6"));
}

#[test]
fn test_list_of_dependencies() {
    let deps = ListOfStrings::<Dependency>::parse("1.0;GCC, >=2").unwrap();
    assert_eq!(deps.len(), 2);
    assert!(deps.as_slice()[0].tc_versop.is_some());
    assert_eq!(deps.serialize(), "1.0;GCC,>=2");
}
