//! End-to-end cases through the public API: whole sources in, records out.

use xof_core::{parse_source, Child, Value};

#[test]
fn nested_template_round_trip() {
    let src = r#"
template Vec2D {
    <3D82AB5E-62DA-11cf-AB39-0020AF71E433>
    FLOAT x;
    FLOAT y;
}
template Vecs {
    <3D82AB5F-62DA-11cf-AB39-0020AF71E433>
    WORD n;
    array Vec2D items[n];
}
Vecs {
    2;
    0.0; 0.0;,
    1.0; 0.0;;
}
"#;
    let instances = parse_source(src, "vecs.x").expect("source should parse");
    assert_eq!(instances.len(), 1);
    let record = &instances[0].1;
    assert_eq!(record.type_name, "Vecs");
    assert_eq!(record.components.get("n"), Some(&Value::Int(2)));
    match record.components.get("items") {
        Some(Value::Array(items)) => {
            assert_eq!(items.len(), 2);
            match (&items[0], &items[1]) {
                (Value::Record(first), Value::Record(second)) => {
                    assert_eq!(first.type_name, "Vec2D");
                    assert_eq!(first.components.get("x"), Some(&Value::Float(0.0)));
                    assert_eq!(first.components.get("y"), Some(&Value::Float(0.0)));
                    assert_eq!(second.components.get("x"), Some(&Value::Float(1.0)));
                    assert_eq!(second.components.get("y"), Some(&Value::Float(0.0)));
                }
                other => panic!("expected two nested records, got {:?}", other),
            }
        }
        other => panic!("expected items array, got {:?}", other),
    }
}

#[test]
fn zero_length_array() {
    let src = r#"
template Seq {
    <3D82AB5E-62DA-11cf-AB39-0020AF71E433>
    WORD n;
    array WORD items[n];
}
Seq { 0; ; }
"#;
    let instances = parse_source(src, "seq.x").expect("source should parse");
    assert_eq!(
        instances[0].1.components.get("items"),
        Some(&Value::Array(vec![]))
    );
}

#[test]
fn open_restriction_accepts_heterogeneous_children() {
    let templates = r#"
template Data1 { <3D82AB5E-62DA-11cf-AB39-0020AF71E433> FLOAT x; }
template Data2 { <3D82AB5F-62DA-11cf-AB39-0020AF71E433> FLOAT y; }
template Scene { <3D82AB60-62DA-11cf-AB39-0020AF71E433> [ . . . ] }
"#;
    for (body, expected) in [
        ("", 0),
        ("Data1 { 1.0; }", 1),
        ("Data2 { 1.0; } Data1 { 2.0; } Data2 { 3.0; }", 3),
    ] {
        let src = format!("{}\nScene {{ {} }}", templates, body);
        let instances = parse_source(&src, "scene.x").expect("source should parse");
        assert_eq!(instances[0].1.children.len(), expected, "body: {:?}", body);
    }
}

#[test]
fn open_restriction_accepts_templates_declared_later() {
    // Scene is declared before Late exists; by data-parsing time the
    // registry is complete, so Late children match.
    let src = r#"
template Scene { <3D82AB5E-62DA-11cf-AB39-0020AF71E433> [ . . . ] }
template Late { <3D82AB5F-62DA-11cf-AB39-0020AF71E433> WORD n; }
Scene { Late { 7; } }
"#;
    let instances = parse_source(src, "scene.x").expect("source should parse");
    assert_eq!(instances[0].1.children.len(), 1);
}

#[test]
fn closed_restriction_rejects_other_templates() {
    let templates = r#"
template A { <3D82AB5E-62DA-11cf-AB39-0020AF71E433> FLOAT x; }
template B { <3D82AB5F-62DA-11cf-AB39-0020AF71E433> FLOAT y; }
template C { <3D82AB60-62DA-11cf-AB39-0020AF71E433> FLOAT z; }
template Holder { <3D82AB61-62DA-11cf-AB39-0020AF71E433> [ A, B ] }
"#;
    let ok = format!("{}\nHolder {{ A {{ 1.0; }} B {{ 2.0; }} }}", templates);
    let instances = parse_source(&ok, "holder.x").expect("allowed children should parse");
    assert_eq!(instances[0].1.children.len(), 2);

    // A C child ends the loop; the leftover tokens then fail the instance.
    let bad = format!("{}\nHolder {{ A {{ 1.0; }} C {{ 2.0; }} }}", templates);
    assert!(parse_source(&bad, "holder.x").is_err());
}

#[test]
fn restriction_bodies_may_hold_name_references() {
    let src = r#"
template A { <3D82AB5E-62DA-11cf-AB39-0020AF71E433> FLOAT x; }
template Holder { <3D82AB5F-62DA-11cf-AB39-0020AF71E433> [ . . . ] }
A shared { 1.0; }
Holder { A { 2.0; } { shared } }
"#;
    let instances = parse_source(src, "refs.x").expect("source should parse");
    let holder = &instances[1].1;
    assert_eq!(holder.children.len(), 2);
    assert_eq!(holder.children[1], Child::NameRef("shared".to_owned()));
}

#[test]
fn string_fields() {
    let src = r#"
template Named { <3D82AB5E-62DA-11cf-AB39-0020AF71E433> STRING name; DWORD id; }
Named { "left hip"; 44; }
"#;
    let instances = parse_source(src, "named.x").expect("source should parse");
    assert_eq!(
        instances[0].1.components.get("name"),
        Some(&Value::Str("left hip".to_owned()))
    );
    assert_eq!(instances[0].1.components.get("id"), Some(&Value::Int(44)));
}

#[test]
fn nested_record_field() {
    let src = r#"
template Vec2D { <3D82AB5E-62DA-11cf-AB39-0020AF71E433> FLOAT x; FLOAT y; }
template Segment {
    <3D82AB5F-62DA-11cf-AB39-0020AF71E433>
    Vec2D from;
    Vec2D to;
}
Segment { 0.0; 0.0;; 1.0; 2.0;; }
"#;
    let instances = parse_source(src, "segment.x").expect("source should parse");
    let segment = &instances[0].1;
    match segment.components.get("to") {
        Some(Value::Record(to)) => {
            assert_eq!(to.components.get("y"), Some(&Value::Float(2.0)));
        }
        other => panic!("expected nested record, got {:?}", other),
    }
}

#[test]
fn truncation_anywhere_fails() {
    let src = r#"template Pt { <3D82AB5E-62DA-11cf-AB39-0020AF71E433> FLOAT v; }
Pt { 1.0; }"#;
    parse_source(src, "full.x").expect("full source should parse");

    // Cut the source at every token-ish boundary; no prefix except the full
    // text may silently succeed with an instance missing.
    for cut in ["template Pt {", "template Pt { <3D82AB5E-62DA-11cf-AB39-0020AF71E433> FLOAT",
                "template Pt { <3D82AB5E-62DA-11cf-AB39-0020AF71E433> FLOAT v; } Pt {",
                "template Pt { <3D82AB5E-62DA-11cf-AB39-0020AF71E433> FLOAT v; } Pt { 1.0;"] {
        assert!(parse_source(cut, "cut.x").is_err(), "cut: {:?}", cut);
    }
}

#[test]
fn records_serialize_to_json() {
    let src = r#"
template Pt { <3D82AB5E-62DA-11cf-AB39-0020AF71E433> FLOAT v; }
Pt origin { 1.5; }
"#;
    let instances = parse_source(src, "pt.x").expect("source should parse");
    let json = serde_json::to_value(&instances[0].1).expect("record serializes");
    assert_eq!(json["type_name"], "Pt");
    assert_eq!(json["components"]["v"], 1.5);
}
