//! Exact-output tests for the bracket format.
//!
//! Each test pins the complete rendered text for a small document.

use moose_input::indent::{check_balance, indent};
use moose_input::{
    fields, to_string, to_string_with_options, BalancePolicy, Collection, Document, Entity,
    Error, FieldMap, Quote, Reference, RenderOptions, Value,
};

fn entity(name: &str, fields: FieldMap) -> Entity {
    Entity::new(name, fields).unwrap()
}

#[test]
fn test_variables_block() {
    let mut variables = Collection::new("Variables").unwrap();
    variables
        .insert(entity("disp_x", fields! { "order" => "FIRST" }))
        .unwrap();
    variables
        .insert(entity("disp_y", fields! { "order" => "FIRST" }))
        .unwrap();

    let doc = Document::new().with(variables);
    assert_eq!(
        to_string(&doc).unwrap(),
        "\
[Variables]
  [disp_x]
    order = FIRST
  []
  [disp_y]
    order = FIRST
  []
[]
"
    );
}

fn reference_list_doc(with_b: bool) -> Document {
    let mut targets = Collection::new("Postprocessors").unwrap();
    targets.insert(entity("a", FieldMap::new())).unwrap();
    if with_b {
        targets.insert(entity("b", FieldMap::new())).unwrap();
    }

    let mut users = Collection::new("VectorPostprocessors").unwrap();
    users
        .insert(entity(
            "sampler",
            fields! { "field" => Value::references(["a", "b"]) },
        ))
        .unwrap();

    Document::new().with(targets).with(users)
}

#[test]
fn test_reference_list_renders_quoted() {
    let text = to_string(&reference_list_doc(true)).unwrap();
    assert!(text.contains("\n    field = \"a b\"\n"));
}

#[test]
fn test_reference_list_missing_target() {
    let err = to_string(&reference_list_doc(false)).unwrap_err();
    assert_eq!(err, Error::dangling_reference("sampler", "field", "b"));
    assert!(!err.is_recoverable());
}

#[test]
fn test_empty_collection() {
    let doc = Document::new().with(Collection::new("AuxKernels").unwrap());
    assert_eq!(to_string(&doc).unwrap(), "[AuxKernels]\n[]\n");
}

#[test]
fn test_empty_collection_between_others() {
    let mut vars = Collection::new("Variables").unwrap();
    vars.insert(entity("T", FieldMap::new())).unwrap();
    let doc = Document::new()
        .with(Collection::new("Mesh").unwrap())
        .with(vars);
    assert_eq!(
        to_string(&doc).unwrap(),
        "[Mesh]\n[]\n[Variables]\n  [T]\n  []\n[]\n"
    );
}

#[test]
fn test_scalar_forms() {
    let outputs = entity(
        "Outputs",
        fields! {
            "exodus" => true,
            "csv" => false,
            "interval" => 5,
            "start_time" => 0.25,
            "file_base" => "thermal_out",
        },
    );
    assert_eq!(
        to_string(&Document::new().with(outputs)).unwrap(),
        "\
[Outputs]
  exodus = true
  csv = false
  interval = 5
  start_time = 0.25
  file_base = thermal_out
[]
"
    );
}

#[test]
fn test_quote_rules() {
    let material = entity(
        "props",
        fields! {
            "type" => "ADGenericFunctionMaterial",
            "prop_names" => vec!["density", "specific_heat"]; Quote::Single,
            "prop_values" => vec![8960, 385]; Quote::Single,
            "block" => "hs:copper"; Quote::Double,
            "positions" => vec![0, 1]; Quote::Never,
        },
    );
    assert_eq!(
        to_string(&Document::new().with(material)).unwrap(),
        "\
[props]
  type = ADGenericFunctionMaterial
  prop_names = 'density specific_heat'
  prop_values = '8960 385'
  block = \"hs:copper\"
  positions = 0 1
[]
"
    );
}

#[test]
fn test_ports() {
    let mut components = Collection::new("Components").unwrap();
    components.insert(entity("pipe", FieldMap::new())).unwrap();
    components
        .insert(entity(
            "inlet",
            fields! { "input" => Reference::port("pipe", "in") },
        ))
        .unwrap();
    let text = to_string(&Document::new().with(components)).unwrap();
    assert!(text.contains("    input = pipe:in\n"));
}

#[test]
fn test_compact_separator() {
    let doc = Document::new().with(entity("Executioner", fields! { "type" => "Steady" }));
    assert_eq!(
        to_string_with_options(&doc, RenderOptions::compact()).unwrap(),
        "[Executioner]\n  type=Steady\n[]\n"
    );
}

#[test]
fn test_no_trailing_newline() {
    let doc = Document::new().with(entity("Outputs", fields! { "exodus" => true }));
    let options = RenderOptions::new().with_trailing_newline(false);
    assert_eq!(
        to_string_with_options(&doc, options).unwrap(),
        "[Outputs]\n  exodus = true\n[]"
    );
}

#[test]
fn test_indent_pass_on_handwritten_text() {
    let flat = "\
[Mesh]
[gen]
type = GeneratedMeshGenerator
dim = 2
[]
[]
[Executioner]
type = Steady
[]";
    let expected = "\
[Mesh]
  [gen]
    type = GeneratedMeshGenerator
    dim = 2
  []
[]
[Executioner]
  type = Steady
[]
";
    assert_eq!(indent(flat, &RenderOptions::new()).unwrap(), expected);
    assert_eq!(check_balance(expected).unwrap(), 2);
}

#[test]
fn test_legacy_subblock_markers() {
    let flat = "[Kernels]\n[./diff]\ntype = Diffusion\n[../]\n[]";
    assert_eq!(
        indent(flat, &RenderOptions::new()).unwrap(),
        "[Kernels]\n  [./diff]\n    type = Diffusion\n  [../]\n[]\n"
    );
}

#[test]
fn test_unbalanced_text_policies() {
    let flat = "[Mesh]\n[]\n[]\nfile = a.e";
    assert!(matches!(
        indent(flat, &RenderOptions::new()),
        Err(Error::MalformedDocument { line: 3, .. })
    ));

    let clamped = indent(
        flat,
        &RenderOptions::new().with_balance(BalancePolicy::Clamp),
    )
    .unwrap();
    assert_eq!(clamped, "[Mesh]\n[]\n[]\nfile = a.e\n");
}

#[test]
fn test_names_that_break_brackets_are_refused() {
    for name in ["a\n[]", "../", "./diff", "a]"] {
        let err = Entity::new(name, fields! {}).unwrap_err();
        assert!(matches!(err, Error::InvalidName { .. }), "{:?}", name);
        assert!(err.is_recoverable());
    }
    assert!(matches!(
        Collection::new("Mesh\n"),
        Err(Error::InvalidName { .. })
    ));
}

#[test]
fn test_multiline_expression_written_verbatim() {
    let mut functions = Collection::new("Functions").unwrap();
    functions
        .insert(entity(
            "f",
            fields! { "expression" => "a\n  b\n[]"; Quote::Single },
        ))
        .unwrap();
    let doc = Document::new().with(functions);

    assert_eq!(
        to_string(&doc).unwrap(),
        "[Functions]\n  [f]\n    expression = 'a\n  b\n[]'\n  []\n[]\n"
    );
}
