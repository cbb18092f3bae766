use moose_input::{
    fields, Entity, FieldMap, Namespace, Number, Quote, Reference, RenderOptions, Scalar, Value,
};

#[test]
fn test_fields_macro_empty() {
    let map = fields! {};
    assert!(map.is_empty());
    assert_eq!(map, FieldMap::new());
}

#[test]
fn test_fields_macro_scalars() {
    let map = fields! {
        "exodus" => true,
        "interval" => 10,
        "dt" => 0.5,
        "solve_type" => "NEWTON",
    };

    assert_eq!(map.get("exodus"), Some(&Value::Scalar(Scalar::Bool(true))));
    assert_eq!(
        map.get("interval"),
        Some(&Value::Scalar(Scalar::Number(Number::Integer(10))))
    );
    assert_eq!(
        map.get("dt"),
        Some(&Value::Scalar(Scalar::Number(Number::Float(0.5))))
    );
    assert_eq!(map.get("solve_type").and_then(Value::as_str), Some("NEWTON"));
}

#[test]
fn test_fields_macro_lists_and_references() {
    let map = fields! {
        "vector_value" => vec![0.01, 0.01, 0.01],
        "displacements" => Value::references(["disp_x", "disp_y"]),
        "input" => Reference::port("pipe", "in"),
    };

    assert!(map.get("vector_value").map_or(false, Value::is_list));
    let targets: Vec<_> = map
        .get("displacements")
        .map(|v| v.targets().collect())
        .unwrap_or_default();
    assert_eq!(targets, vec!["disp_x", "disp_y"]);
    assert!(map.get("input").map_or(false, Value::is_reference));
}

#[test]
fn test_fields_macro_trailing_comma_optional() {
    let with = fields! { "a" => 1, "b" => 2, };
    let without = fields! { "a" => 1, "b" => 2 };
    assert_eq!(with, without);
}

#[test]
fn test_fields_macro_later_key_overwrites_in_place() {
    let map = fields! {
        "order" => "FIRST",
        "family" => "LAGRANGE",
        "order" => "SECOND",
    };
    let keys: Vec<_> = map.keys().cloned().collect();
    assert_eq!(keys, vec!["order", "family"]);
    assert_eq!(map.get("order").and_then(Value::as_str), Some("SECOND"));
}

#[test]
fn test_fields_macro_quoting_renders() {
    let entity = Entity::new(
        "props",
        fields! {
            "prop_names" => vec!["k", "cp"]; Quote::Single,
            "block" => "1"; Quote::Double,
            "value" => 2,
        },
    )
    .unwrap();

    let lines = entity
        .render(&Namespace::new(), &RenderOptions::new())
        .unwrap();
    assert_eq!(
        lines,
        vec!["[props]", "prop_names = 'k cp'", "block = \"1\"", "value = 2", "[]"]
    );
}

#[test]
fn test_fields_macro_with_expressions() {
    let name = String::from("file");
    let base = 2;
    let map = fields! {
        name.clone() => format!("mesh_{}.e", base),
        "n_elems" => base * 5,
    };
    assert_eq!(map.get("file").and_then(Value::as_str), Some("mesh_2.e"));
    assert_eq!(map.get("n_elems"), Some(&Value::from(10)));
}
