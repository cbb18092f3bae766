//! Describing entity kinds as plain structs and converting them with serde.
//!
//! Run with: cargo run --example serde_producers

use moose_input::catalog::{Section, OUTLET_1PHASE};
use moose_input::{to_fields, to_string, Collection, Document, Entity, Reference};
use serde::Serialize;
use std::error::Error;

#[derive(Serialize)]
struct FlowChannel1Phase {
    #[serde(rename = "type")]
    kind: &'static str,
    position: [f64; 3],
    orientation: [f64; 3],
    length: f64,
    n_elems: u32,
    #[serde(rename = "A")]
    area: f64,
}

#[derive(Serialize)]
struct InletMassFlowRateTemperature1Phase {
    #[serde(rename = "type")]
    kind: &'static str,
    input: Reference,
    m_dot: f64,
    #[serde(rename = "T")]
    temperature: f64,
}

#[derive(Serialize)]
struct Outlet {
    input: Reference,
    p: f64,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    let pipe = FlowChannel1Phase {
        kind: "FlowChannel1Phase",
        position: [0.0, 0.0, 0.0],
        orientation: [1.0, 0.0, 0.0],
        length: 2.5,
        n_elems: 50,
        area: 3.14e-4,
    };
    println!("pipe fields: {:?}", to_fields(&pipe)?.keys().collect::<Vec<_>>());

    let inlet = InletMassFlowRateTemperature1Phase {
        kind: "InletMassFlowRateTemperature1Phase",
        input: Reference::port("pipe", "in"),
        m_dot: 0.2,
        temperature: 300.0,
    };

    let mut components = Collection::new(Section::COMPONENTS)?;
    components.insert(Entity::from_serialize("pipe", &pipe)?)?;
    components.insert(Entity::from_serialize("inlet", &inlet)?)?;
    components.insert(OUTLET_1PHASE.build_from(
        "outlet",
        &Outlet {
            input: Reference::port("pipe", "out"),
            p: 1e5,
        },
    )?)?;

    // The same Reference serializes as plain data elsewhere.
    println!("as json: {}", serde_json::to_string(&inlet)?);

    print!("{}", to_string(&Document::new().with(components))?);
    Ok(())
}
