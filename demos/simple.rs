//! Building and rendering a small input file by hand.
//!
//! Run with: cargo run --example simple

use moose_input::{fields, to_string, Collection, Document, Entity, Reference};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    let mut mesh = Collection::new("Mesh")?;
    mesh.insert(Entity::new(
        "gen",
        fields! {
            "type" => "GeneratedMeshGenerator",
            "dim" => 2,
            "nx" => 10,
            "ny" => 10,
        },
    )?)?;

    let mut variables = Collection::new("Variables")?;
    variables.insert(Entity::new("u", fields! { "order" => "FIRST" })?)?;

    let mut kernels = Collection::new("Kernels")?;
    kernels.insert(Entity::new(
        "diff",
        fields! {
            "type" => "Diffusion",
            "variable" => Reference::to("u"),
        },
    )?)?;

    let mut bcs = Collection::new("BCs")?;
    for (name, boundary, value) in [("left", "left", 0), ("right", "right", 1)] {
        bcs.insert(Entity::new(
            name,
            fields! {
                "type" => "DirichletBC",
                "variable" => Reference::to("u"),
                "boundary" => boundary,
                "value" => value,
            },
        )?)?;
    }

    let executioner = Entity::new(
        "Executioner",
        fields! { "type" => "Steady", "solve_type" => "PJFNK" },
    )?;
    let outputs = Entity::new("Outputs", fields! { "exodus" => true })?;

    let doc = Document::new()
        .with(mesh)
        .with(variables)
        .with(kernels)
        .with(bcs)
        .with(executioner)
        .with(outputs);

    print!("{}", to_string(&doc)?);
    Ok(())
}
