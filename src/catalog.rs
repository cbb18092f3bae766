//! Per-kind field tables.
//!
//! Each entity kind the solver understands has a fixed set of accepted fields,
//! some required, each written with a particular quoting convention. A
//! [`Schema`] captures that table as data, and [`Schema::build`] turns a plain
//! [`FieldMap`] into a checked [`Entity`] whose first field is `type = <kind>`.
//!
//! The tables below cover a representative slice of the solver's vocabulary:
//! variables, mesh generators, heat conduction and mechanics kernels, boundary
//! conditions, materials, functions, 1-D flow components, postprocessors and
//! multi-app transfers. Kinds not listed here can still be built directly with
//! [`Entity::new`].
//!
//! ## Examples
//!
//! ```rust
//! use moose_input::catalog::AD_DIRICHLET_BC;
//! use moose_input::{fields, Namespace, Reference, RenderOptions};
//!
//! let bc = AD_DIRICHLET_BC
//!     .build("fixed", fields! {
//!         "variable" => Reference::to("disp_x"),
//!         "boundary" => "bottom",
//!         "value" => 0,
//!     })
//!     .unwrap();
//!
//! let ns: Namespace = ["disp_x"].into_iter().collect();
//! let lines = bc.render(&ns, &RenderOptions::new()).unwrap();
//! assert_eq!(lines, vec![
//!     "[fixed]",
//!     "type = ADDirichletBC",
//!     "variable = disp_x",
//!     "boundary = \"bottom\"",
//!     "value = 0",
//!     "[]",
//! ]);
//! ```

use crate::entity::{check_name, Entity};
use crate::map::FieldMap;
use crate::value::{Field, Quote, Value};
use crate::{Error, Result};
use serde::Serialize;
use std::fmt;

/// Name of the field every catalog entity starts with.
pub const TYPE_FIELD: &str = "type";

/// One accepted field of a kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub required: bool,
    pub quote: Quote,
}

impl FieldSpec {
    #[must_use]
    pub const fn required(name: &'static str) -> Self {
        FieldSpec {
            name,
            required: true,
            quote: Quote::Auto,
        }
    }

    #[must_use]
    pub const fn optional(name: &'static str) -> Self {
        FieldSpec {
            name,
            required: false,
            quote: Quote::Auto,
        }
    }

    #[must_use]
    pub const fn quoted(mut self, quote: Quote) -> Self {
        self.quote = quote;
        self
    }
}

/// The field table of one entity kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Schema {
    pub kind: &'static str,
    pub fields: &'static [FieldSpec],
}

impl Schema {
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.name == name)
    }

    /// Builds a checked entity of this kind.
    ///
    /// The result holds `type = <kind>` first, then every supplied field in
    /// table order. A field's quoting comes from the table unless the caller
    /// gave it an explicit rule other than [`Quote::Auto`].
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidName`] for a name that cannot be a block header
    /// - [`Error::UnknownField`] when `values` holds a field the table lacks
    /// - [`Error::MissingField`] when a required field is absent
    pub fn build(&self, name: impl Into<String>, mut values: FieldMap) -> Result<Entity> {
        let name = name.into();
        check_name("entity", &name)?;

        if let Some(unknown) = values.keys().find(|key| self.field(key).is_none()) {
            return Err(Error::unknown_field(self.kind, &name, unknown));
        }

        let mut fields = FieldMap::with_capacity(self.fields.len() + 1);
        fields.insert(TYPE_FIELD, self.kind);

        for spec in self.fields {
            match values.remove(spec.name) {
                Some(field) => {
                    let quote = match field.quote {
                        Quote::Auto => spec.quote,
                        explicit => explicit,
                    };
                    fields.insert_field(spec.name, Field::new(field.value, quote));
                }
                None if spec.required => {
                    return Err(Error::missing_field(self.kind, &name, spec.name))
                }
                None => {}
            }
        }

        Entity::tagged(name, self.kind, fields)
    }

    /// Builds from a serializable producer struct.
    ///
    /// # Errors
    ///
    /// Anything [`to_fields`](crate::to_fields) or [`Schema::build`] returns.
    pub fn build_from<T>(&self, name: impl Into<String>, producer: &T) -> Result<Entity>
    where
        T: ?Sized + Serialize,
    {
        self.build(name, crate::to_fields(producer)?)
    }
}

const fn req(name: &'static str) -> FieldSpec {
    FieldSpec::required(name)
}

const fn opt(name: &'static str) -> FieldSpec {
    FieldSpec::optional(name)
}

/// `[Variables]` entries. MOOSE's default variable kind.
pub const MOOSE_VARIABLE: Schema = Schema {
    kind: "MooseVariable",
    fields: &[
        opt("order"),
        opt("family"),
        opt("block").quoted(Quote::Double),
    ],
};

pub const FILE_MESH_GENERATOR: Schema = Schema {
    kind: "FileMeshGenerator",
    fields: &[req("file"), opt("clear_spline_nodes"), opt("show_info")],
};

pub const TRANSFORM_GENERATOR: Schema = Schema {
    kind: "TransformGenerator",
    fields: &[
        req("input").quoted(Quote::Double),
        req("transform"),
        req("vector_value").quoted(Quote::Double),
    ],
};

pub const AD_HEAT_CONDUCTION: Schema = Schema {
    kind: "ADHeatConduction",
    fields: &[req("variable"), opt("block"), opt("thermal_conductivity")],
};

pub const AD_HEAT_CONDUCTION_TIME_DERIVATIVE: Schema = Schema {
    kind: "ADHeatConductionTimeDerivative",
    fields: &[
        req("variable"),
        opt("density_name"),
        opt("specific_heat"),
        opt("block"),
    ],
};

pub const AD_GRAVITY: Schema = Schema {
    kind: "ADGravity",
    fields: &[
        req("variable"),
        req("value").quoted(Quote::Double),
        opt("block"),
    ],
};

pub const AD_DIRICHLET_BC: Schema = Schema {
    kind: "ADDirichletBC",
    fields: &[
        req("variable"),
        req("boundary").quoted(Quote::Double),
        req("value"),
    ],
};

pub const AD_NEUMANN_BC: Schema = Schema {
    kind: "ADNeumannBC",
    fields: &[
        req("variable"),
        req("boundary").quoted(Quote::Double),
        req("value"),
    ],
};

pub const AD_CONVECTIVE_HEAT_FLUX_BC: Schema = Schema {
    kind: "ADConvectiveHeatFluxBC",
    fields: &[
        req("variable"),
        req("boundary").quoted(Quote::Double),
        req("heat_transfer_coefficient"),
        req("T_infinity"),
    ],
};

pub const AD_HEAT_CONDUCTION_MATERIAL: Schema = Schema {
    kind: "ADHeatConductionMaterial",
    fields: &[
        req("temp"),
        opt("block"),
        req("specific_heat_temperature_function"),
        req("thermal_conductivity_temperature_function"),
    ],
};

pub const AD_COMPUTE_SMALL_STRAIN: Schema = Schema {
    kind: "ADComputeSmallStrain",
    fields: &[
        req("displacements").quoted(Quote::Double),
        opt("eigenstrain_names"),
        opt("block"),
    ],
};

pub const AD_GENERIC_FUNCTION_MATERIAL: Schema = Schema {
    kind: "ADGenericFunctionMaterial",
    fields: &[
        req("prop_names").quoted(Quote::Single),
        req("prop_values").quoted(Quote::Single),
        opt("block").quoted(Quote::Double),
    ],
};

pub const PIECEWISE_LINEAR: Schema = Schema {
    kind: "PiecewiseLinear",
    fields: &[
        req("x").quoted(Quote::Double),
        req("y").quoted(Quote::Double),
        opt("scale_factor"),
    ],
};

pub const FLOW_CHANNEL_1PHASE: Schema = Schema {
    kind: "FlowChannel1Phase",
    fields: &[
        req("position").quoted(Quote::Double),
        req("orientation").quoted(Quote::Double),
        req("length").quoted(Quote::Double),
        req("n_elems").quoted(Quote::Double),
        req("A").quoted(Quote::Double),
        opt("closures").quoted(Quote::Double),
        opt("fp").quoted(Quote::Double),
    ],
};

pub const OUTLET_1PHASE: Schema = Schema {
    kind: "Outlet1Phase",
    fields: &[
        req("input").quoted(Quote::Double),
        req("p").quoted(Quote::Double),
    ],
};

pub const NODAL_EXTREME_VALUE: Schema = Schema {
    kind: "NodalExtremeValue",
    fields: &[
        req("variable").quoted(Quote::Double),
        opt("block").quoted(Quote::Double),
        opt("value_type").quoted(Quote::Double),
    ],
};

pub const MULTI_APP_NEAREST_NODE_TRANSFER: Schema = Schema {
    kind: "MultiAppNearestNodeTransfer",
    fields: &[
        req("source_variable"),
        req("variable"),
        opt("from_multi_app").quoted(Quote::Double),
        opt("to_multi_app").quoted(Quote::Double),
    ],
};

/// Every schema in this module.
pub const SCHEMAS: &[Schema] = &[
    MOOSE_VARIABLE,
    FILE_MESH_GENERATOR,
    TRANSFORM_GENERATOR,
    AD_HEAT_CONDUCTION,
    AD_HEAT_CONDUCTION_TIME_DERIVATIVE,
    AD_GRAVITY,
    AD_DIRICHLET_BC,
    AD_NEUMANN_BC,
    AD_CONVECTIVE_HEAT_FLUX_BC,
    AD_HEAT_CONDUCTION_MATERIAL,
    AD_COMPUTE_SMALL_STRAIN,
    AD_GENERIC_FUNCTION_MATERIAL,
    PIECEWISE_LINEAR,
    FLOW_CHANNEL_1PHASE,
    OUTLET_1PHASE,
    NODAL_EXTREME_VALUE,
    MULTI_APP_NEAREST_NODE_TRANSFER,
];

/// Finds a schema by kind name.
///
/// ```rust
/// use moose_input::catalog;
///
/// assert_eq!(catalog::lookup("ADGravity").map(|s| s.fields.len()), Some(3));
/// assert!(catalog::lookup("NoSuchKind").is_none());
/// ```
#[must_use]
pub fn lookup(kind: &str) -> Option<&'static Schema> {
    SCHEMAS.iter().find(|schema| schema.kind == kind)
}

/// Shape-function order of a variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Order {
    Constant,
    First,
    Second,
    Third,
    Fourth,
}

impl Order {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Order::Constant => "CONSTANT",
            Order::First => "FIRST",
            Order::Second => "SECOND",
            Order::Third => "THIRD",
            Order::Fourth => "FOURTH",
        }
    }
}

/// Finite-element family of a variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Family {
    Lagrange,
    Monomial,
    Hermite,
    Scalar,
    Hierarchic,
    Clough,
    Xyz,
    Szabab,
    Bernstein,
    L2Lagrange,
    L2Hierarchic,
    NedelecOne,
    LagrangeVec,
    MonomialVec,
    RationalBernstein,
    SideHierarchic,
}

impl Family {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Family::Lagrange => "LAGRANGE",
            Family::Monomial => "MONOMIAL",
            Family::Hermite => "HERMITE",
            Family::Scalar => "SCALAR",
            Family::Hierarchic => "HIERARCHIC",
            Family::Clough => "CLOUGH",
            Family::Xyz => "XYZ",
            Family::Szabab => "SZABAB",
            Family::Bernstein => "BERNSTEIN",
            Family::L2Lagrange => "L2_LAGRANGE",
            Family::L2Hierarchic => "L2_HIERARCHIC",
            Family::NedelecOne => "NEDELEC_ONE",
            Family::LagrangeVec => "LAGRANGE_VEC",
            Family::MonomialVec => "MONOMIAL_VEC",
            Family::RationalBernstein => "RATIONAL_BERNSTEIN",
            Family::SideHierarchic => "SIDE_HIERARCHIC",
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Order> for Value {
    fn from(order: Order) -> Self {
        Value::from(order.as_str())
    }
}

impl From<Family> for Value {
    fn from(family: Family) -> Self {
        Value::from(family.as_str())
    }
}

/// Conventional top-level section labels.
pub struct Section;

impl Section {
    pub const MESH: &'static str = "Mesh";
    pub const GLOBAL_PARAMS: &'static str = "GlobalParams";
    pub const VARIABLES: &'static str = "Variables";
    pub const AUX_VARIABLES: &'static str = "AuxVariables";
    pub const CLOSURES: &'static str = "Closures";
    pub const COMPONENTS: &'static str = "Components";
    pub const KERNELS: &'static str = "Kernels";
    pub const AUX_KERNELS: &'static str = "AuxKernels";
    pub const FUNCTIONS: &'static str = "Functions";
    pub const BCS: &'static str = "BCs";
    pub const FLUID_PROPERTIES: &'static str = "FluidProperties";
    pub const MATERIALS: &'static str = "Materials";
    pub const MULTI_APPS: &'static str = "MultiApps";
    pub const TRANSFERS: &'static str = "Transfers";
    pub const POSTPROCESSORS: &'static str = "Postprocessors";
    pub const EXECUTIONER: &'static str = "Executioner";
    pub const OUTPUTS: &'static str = "Outputs";

    /// The order sections usually appear in a complete input file.
    pub const ORDER: [&'static str; 17] = [
        Self::MESH,
        Self::GLOBAL_PARAMS,
        Self::VARIABLES,
        Self::AUX_VARIABLES,
        Self::CLOSURES,
        Self::COMPONENTS,
        Self::KERNELS,
        Self::AUX_KERNELS,
        Self::FUNCTIONS,
        Self::BCS,
        Self::FLUID_PROPERTIES,
        Self::MATERIALS,
        Self::MULTI_APPS,
        Self::TRANSFERS,
        Self::POSTPROCESSORS,
        Self::EXECUTIONER,
        Self::OUTPUTS,
    ];

    /// Position of `label` in [`Section::ORDER`].
    #[must_use]
    pub fn rank(label: &str) -> Option<usize> {
        Self::ORDER.iter().position(|&l| l == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Reference;
    use crate::Namespace;
    use crate::RenderOptions;

    fn render(entity: &Entity, names: &[&str]) -> Vec<String> {
        let ns: Namespace = names.iter().copied().collect();
        entity.render(&ns, &RenderOptions::new()).unwrap()
    }

    #[test]
    fn test_type_first_then_table_order() {
        let mut values = FieldMap::new();
        values.insert("block", "hs:copper");
        values.insert("variable", Reference::to("T"));

        let kernel = AD_HEAT_CONDUCTION.build("heat", values).unwrap();
        assert_eq!(kernel.kind(), Some("ADHeatConduction"));
        assert_eq!(
            render(&kernel, &["T"]),
            vec![
                "[heat]",
                "type = ADHeatConduction",
                "variable = T",
                "block = hs:copper",
                "[]"
            ]
        );
    }

    #[test]
    fn test_missing_required_field() {
        let err = AD_GRAVITY.build("gravity", FieldMap::new()).unwrap_err();
        assert_eq!(err, Error::missing_field("ADGravity", "gravity", "variable"));
    }

    #[test]
    fn test_unknown_field() {
        let mut values = FieldMap::new();
        values.insert("variable", Reference::to("disp_z"));
        values.insert("value", -9.81);
        values.insert("valeu", 1);

        let err = AD_GRAVITY.build("gravity", values).unwrap_err();
        assert_eq!(err, Error::unknown_field("ADGravity", "gravity", "valeu"));
    }

    #[test]
    fn test_table_quoting_applied() {
        let mut values = FieldMap::new();
        values.insert("variable", Reference::to("disp_z"));
        values.insert("value", -9.81);
        let gravity = AD_GRAVITY.build("gravity", values).unwrap();
        assert_eq!(render(&gravity, &["disp_z"])[3], "value = \"-9.81\"");
    }

    #[test]
    fn test_explicit_quote_wins() {
        let mut values = FieldMap::new();
        values.insert_quoted("file", "mesh.e", Quote::Double);
        let mesh = FILE_MESH_GENERATOR.build("filemesh", values).unwrap();
        assert_eq!(render(&mesh, &[])[2], "file = \"mesh.e\"");
    }

    #[test]
    fn test_single_quoted_lists() {
        let mut values = FieldMap::new();
        values.insert("prop_names", vec!["density", "specific_heat"]);
        values.insert("prop_values", vec![8960, 385]);
        let material = AD_GENERIC_FUNCTION_MATERIAL.build("copper", values).unwrap();
        let lines = render(&material, &[]);
        assert_eq!(lines[2], "prop_names = 'density specific_heat'");
        assert_eq!(lines[3], "prop_values = '8960 385'");
    }

    #[test]
    fn test_port_reference() {
        let mut values = FieldMap::new();
        values.insert("input", Reference::port("pipe", "out"));
        values.insert("p", 1e5);
        let outlet = OUTLET_1PHASE.build("outlet", values).unwrap();
        assert_eq!(render(&outlet, &["pipe"])[2], "input = \"pipe:out\"");
    }

    #[test]
    fn test_build_from_producer() {
        #[derive(Serialize)]
        struct Variable {
            order: Order,
            family: Family,
        }

        let var = MOOSE_VARIABLE
            .build_from(
                "T",
                &Variable {
                    order: Order::Second,
                    family: Family::L2Lagrange,
                },
            )
            .unwrap();
        assert_eq!(var.get("order"), Some(&Value::from("SECOND")));
        assert_eq!(var.get("family"), Some(&Value::from("L2_LAGRANGE")));
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(matches!(
            AD_HEAT_CONDUCTION.build("", FieldMap::new()),
            Err(Error::InvalidName { .. })
        ));
        assert!(matches!(
            AD_HEAT_CONDUCTION.build("heat\n[]", FieldMap::new()),
            Err(Error::InvalidName { .. })
        ));
    }

    #[test]
    fn test_lookup_and_kinds_unique() {
        for schema in SCHEMAS {
            assert_eq!(lookup(schema.kind), Some(schema));
        }
    }

    #[test]
    fn test_section_rank() {
        assert_eq!(Section::rank(Section::MESH), Some(0));
        assert!(Section::rank(Section::VARIABLES) < Section::rank(Section::KERNELS));
        assert_eq!(Section::rank(Section::OUTPUTS), Some(16));
        assert_eq!(Section::rank("Debug"), None);
    }

    #[test]
    fn test_enum_names() {
        assert_eq!(Order::First.to_string(), "FIRST");
        assert_eq!(Family::SideHierarchic.as_str(), "SIDE_HIERARCHIC");
        assert_eq!(Value::from(Family::Lagrange), Value::from("LAGRANGE"));
    }
}
