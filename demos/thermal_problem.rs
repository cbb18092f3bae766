//! A transient heat conduction problem assembled from catalog schemas.
//!
//! Run with: cargo run --example thermal_problem

use moose_input::catalog::{
    Family, Order, Section, AD_CONVECTIVE_HEAT_FLUX_BC, AD_HEAT_CONDUCTION,
    AD_HEAT_CONDUCTION_MATERIAL, AD_HEAT_CONDUCTION_TIME_DERIVATIVE, FILE_MESH_GENERATOR,
    MOOSE_VARIABLE, NODAL_EXTREME_VALUE, PIECEWISE_LINEAR, TRANSFORM_GENERATOR,
};
use moose_input::{fields, to_writer, Collection, Document, Entity, Reference};
use std::error::Error;
use std::io;

fn section(label: &str, entities: Vec<Entity>) -> Result<Collection, Box<dyn Error>> {
    let mut collection = Collection::new(label)?;
    for entity in entities {
        collection.insert(entity)?;
    }
    Ok(collection)
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    let mesh = section(
        Section::MESH,
        vec![
            FILE_MESH_GENERATOR.build("filemesh", fields! { "file" => "block.e" })?,
            TRANSFORM_GENERATOR.build(
                "scale",
                fields! {
                    "input" => Reference::to("filemesh"),
                    "transform" => "SCALE",
                    "vector_value" => vec![0.001, 0.001, 0.001],
                },
            )?,
        ],
    )?;

    let variables = section(
        Section::VARIABLES,
        vec![MOOSE_VARIABLE.build(
            "T",
            fields! {
                "order" => Order::First,
                "family" => Family::Lagrange,
                "block" => "copper",
            },
        )?],
    )?;

    let kernels = section(
        Section::KERNELS,
        vec![
            AD_HEAT_CONDUCTION.build("conduction", fields! { "variable" => Reference::to("T") })?,
            AD_HEAT_CONDUCTION_TIME_DERIVATIVE.build(
                "time_derivative",
                fields! { "variable" => Reference::to("T") },
            )?,
        ],
    )?;

    let functions = section(
        Section::FUNCTIONS,
        vec![
            PIECEWISE_LINEAR.build(
                "k_copper",
                fields! { "x" => vec![300, 500, 700], "y" => vec![401, 386, 370] },
            )?,
            PIECEWISE_LINEAR.build(
                "cp_copper",
                fields! { "x" => vec![300, 500, 700], "y" => vec![385, 397, 417] },
            )?,
        ],
    )?;

    let bcs = section(
        Section::BCS,
        vec![AD_CONVECTIVE_HEAT_FLUX_BC.build(
            "cooling",
            fields! {
                "variable" => Reference::to("T"),
                "boundary" => "outer",
                "heat_transfer_coefficient" => 250,
                "T_infinity" => 300,
            },
        )?],
    )?;

    let materials = section(
        Section::MATERIALS,
        vec![AD_HEAT_CONDUCTION_MATERIAL.build(
            "copper",
            fields! {
                "temp" => Reference::to("T"),
                "block" => "copper",
                "specific_heat_temperature_function" => Reference::to("cp_copper"),
                "thermal_conductivity_temperature_function" => Reference::to("k_copper"),
            },
        )?],
    )?;

    let postprocessors = section(
        Section::POSTPROCESSORS,
        vec![NODAL_EXTREME_VALUE.build(
            "T_max",
            fields! { "variable" => Reference::to("T"), "value_type" => "max" },
        )?],
    )?;

    let executioner = Entity::new(
        Section::EXECUTIONER,
        fields! {
            "type" => "Transient",
            "solve_type" => "NEWTON",
            "end_time" => 3600,
            "dt" => 60,
        },
    )?;
    let outputs = Entity::new(Section::OUTPUTS, fields! { "exodus" => true, "csv" => true })?;

    let doc = Document::new()
        .with(mesh)
        .with(variables)
        .with(kernels)
        .with(functions)
        .with(bcs)
        .with(materials)
        .with(postprocessors)
        .with(executioner)
        .with(outputs);

    to_writer(io::stdout().lock(), &doc)?;
    Ok(())
}
