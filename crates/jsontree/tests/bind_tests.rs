use chrono::{NaiveDate, NaiveDateTime};
use jsontree::{bind, parse, record, Record, Value};
use rust_decimal::Decimal;

record! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct GlossaryData {
        pub glossary: Glossary,
    }
}

record! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct Glossary {
        pub title: String,
        pub test_int: i64 => "testInt",
        pub test_float: f32 => "testFloat",
        pub test_double: f64 => "testDouble",
        pub test_string: String => "testString",
        pub test_bool: bool => "testBool",
        pub test_date: NaiveDateTime => "testDate",
        pub dummy: String,
        pub gloss_div: GlossDiv => "GlossDiv",
    }
}

record! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct GlossDiv {
        pub title: String,
        pub gloss_list: GlossList => "GlossList",
    }
}

record! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct GlossList {
        pub gloss_entry: GlossEntry => "GlossEntry",
    }
}

record! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct GlossEntry {
        pub id: String => "ID",
        pub sort_as: String => "SortAs",
        pub gloss_term: String => "GlossTerm",
        pub acronym: String => "Acronym",
        pub abbrev: String => "Abbrev",
        pub gloss_def: GlossDef => "GlossDef",
        pub gloss_see: String => "GlossSee",
    }
}

record! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct GlossDef {
        pub para: String,
        pub gloss_see_also: Vec<String> => "GlossSeeAlso",
    }
}

fn glossary() -> Value {
    let text = std::fs::read_to_string(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/glossary.json"
    ))
    .expect("glossary.json fixture must exist");
    parse(&text).expect("glossary.json must parse")
}

// ============================================================================
// Full binding
// ============================================================================

#[test]
fn binds_whole_fixture() {
    let data: GlossaryData = glossary().bind();
    let g = &data.glossary;
    assert_eq!(g.title, "example glossary");
    assert_eq!(g.test_int, 1234);
    assert_eq!(g.test_float, 1.5);
    assert_eq!(g.test_double, 2.25);
    assert_eq!(g.test_string, "text");
    assert!(g.test_bool);
    assert_eq!(
        g.test_date,
        NaiveDate::from_ymd_opt(2016, 4, 1)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap()
    );
    assert_eq!(g.gloss_div.title, "S");

    let entry = &g.gloss_div.gloss_list.gloss_entry;
    assert_eq!(entry.id, "SGML");
    assert_eq!(entry.gloss_term, "Standard Generalized Markup Language");
    assert_eq!(entry.abbrev, "ISO 8879:1986");
    assert_eq!(entry.gloss_see, "markup");
    assert_eq!(entry.gloss_def.gloss_see_also, vec!["GML", "XML"]);
    assert!(entry.gloss_def.para.starts_with("A meta-markup language"));
}

#[test]
fn missing_fields_default() {
    let data: GlossaryData = glossary().bind();
    // `dummy` is not in the fixture.
    assert_eq!(data.glossary.dummy, "");
}

#[test]
fn extra_json_fields_are_ignored() {
    let tree = parse(r#"{"para":"p","GlossSeeAlso":["a"],"unrelated":{"x":1}}"#).unwrap();
    let def: GlossDef = tree.bind();
    assert_eq!(
        def,
        GlossDef {
            para: "p".into(),
            gloss_see_also: vec!["a".into()],
        }
    );
}

// ============================================================================
// Totality
// ============================================================================

#[test]
fn unrelated_tree_binds_to_defaults() {
    let tree = parse(r#"{"something":"else","n":[1,2]}"#).unwrap();
    let data: GlossaryData = bind(&tree);
    assert_eq!(data, GlossaryData::default());
}

#[test]
fn array_root_binds_to_defaults() {
    let tree = parse("[1,2,3]").unwrap();
    let entry: GlossEntry = tree.bind();
    assert_eq!(entry, GlossEntry::default());
}

#[test]
fn bad_scalars_fall_back_per_field() {
    let tree = parse(
        r#"{"glossary":{"title":"kept","testInt":"many","testFloat":[1],"testBool":"maybe","testDate":"soon"}}"#,
    )
    .unwrap();
    let data: GlossaryData = tree.bind();
    let g = data.glossary;
    assert_eq!(g.title, "kept");
    assert_eq!(g.test_int, 0);
    assert_eq!(g.test_float, 0.0);
    assert!(!g.test_bool);
    assert_eq!(g.test_date, NaiveDateTime::default());
}

#[test]
fn fractional_number_into_integer_defaults() {
    let tree = parse(r#"{"glossary":{"testInt":1.5}}"#).unwrap();
    let data: GlossaryData = tree.bind();
    assert_eq!(data.glossary.test_int, 0);
}

#[test]
fn string_list_from_non_array_is_empty() {
    let tree = parse(r#"{"GlossSeeAlso":"GML"}"#).unwrap();
    let def: GlossDef = tree.bind();
    assert!(def.gloss_see_also.is_empty());
}

// ============================================================================
// Other scalar kinds
// ============================================================================

record! {
    #[derive(Debug, Clone, PartialEq)]
    struct Widths {
        byte: u8,
        short: i16,
        int: i32,
        unsigned: u64,
        price: Decimal,
        day: NaiveDate,
        flags: Vec<bool>,
        counts: Vec<u32>,
    }
}

#[test]
fn scalar_widths_and_sequences() {
    let tree = parse(
        r#"{"byte":255,"short":-12,"int":7,"unsigned":9000000000,"price":19.99,
            "day":"2020/02/29","flags":[true,false,"x"],"counts":[1,2.5,3]}"#,
    )
    .unwrap();
    let w: Widths = tree.bind();
    assert_eq!(w.byte, 255);
    assert_eq!(w.short, -12);
    assert_eq!(w.int, 7);
    assert_eq!(w.unsigned, 9_000_000_000);
    assert_eq!(w.price, Decimal::new(1999, 2));
    assert_eq!(w.day, NaiveDate::from_ymd_opt(2020, 2, 29).unwrap());
    assert_eq!(w.flags, vec![true, false, false]);
    assert_eq!(w.counts, vec![1, 0, 3]);
}

#[test]
fn overflowing_width_defaults() {
    let tree = parse(r#"{"byte":256,"short":40000}"#).unwrap();
    let w: Widths = tree.bind();
    assert_eq!(w.byte, 0);
    assert_eq!(w.short, 0);
}

#[test]
fn record_field_keys_follow_declaration() {
    assert_eq!(
        Glossary::FIELDS,
        &[
            "title",
            "testInt",
            "testFloat",
            "testDouble",
            "testString",
            "testBool",
            "testDate",
            "dummy",
            "GlossDiv"
        ]
    );
    assert_eq!(GlossaryData::FIELDS, &["glossary"]);
}
