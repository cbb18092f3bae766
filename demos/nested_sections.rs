//! Sections inside sections, section-level fields, and duplicate handling.
//!
//! Run with: cargo run --example nested_sections

use moose_input::{
    fields, to_string, BalancePolicy, Collection, Document, DuplicatePolicy, Entity, Error,
    RenderOptions, Value,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let disp = ["disp_x", "disp_y", "disp_z"];

    let mut variables = Collection::new("Variables")?;
    for name in disp {
        variables.insert(Entity::new(name, fields! { "order" => "SECOND" })?)?;
    }

    // A second disp_x is reported and dropped; the first one stays.
    match variables.insert(Entity::new("disp_x", fields! { "order" => "FIRST" })?) {
        Err(Error::DuplicateName { name, .. }) => println!("kept the first '{}'", name),
        other => other?,
    }

    // [BCs] -> [Pressure] -> [inner]
    let mut pressure = Collection::new("Pressure")?;
    pressure.insert(Entity::new(
        "inner",
        fields! {
            "displacements" => Value::references(disp),
            "boundary" => "inner",
            "factor" => 1e6,
            "use_automatic_differentiation" => true,
        },
    )?)?;
    let mut bcs = Collection::new("BCs")?;
    bcs.insert_section(pressure)?;

    // Section fields are written after the children.
    let mut mesh = Collection::new("Mesh")?.with_field("second_order", true);
    mesh.insert(Entity::new(
        "filemesh",
        fields! { "type" => "FileMeshGenerator", "file" => "vessel.e" },
    )?)?;

    let mut functions = Collection::new("Functions")?.with_policy(DuplicatePolicy::Replace);
    functions.insert(Entity::new("k", fields! { "type" => "ConstantFunction", "value" => 10 })?)?;
    // Replace keeps the slot but takes the new fields.
    let _ = functions.insert(Entity::new("k", fields! { "type" => "ConstantFunction", "value" => 45 })?);

    let doc = Document::new()
        .with(mesh)
        .with(variables)
        .with(functions)
        .with(bcs);

    print!("{}", to_string(&doc)?);

    let clamped = RenderOptions::new()
        .with_indent(4)
        .with_balance(BalancePolicy::Clamp);
    print!("{}", moose_input::indent::indent("[a]\n[]\n[]\nx = 1", &clamped)?);
    Ok(())
}
