//! The bracket input format
//!
//! This module documents the text format produced by this library. It is the
//! hierarchical block syntax read by MOOSE-based solvers.
//!
//! # Blocks
//!
//! A block opens with its name in square brackets and closes with an empty pair:
//!
//! ```text
//! [Executioner]
//!   type = Transient
//!   end_time = 100
//! []
//! ```
//!
//! Blocks nest. A top-level block is usually a *section* (`[Mesh]`,
//! `[Variables]`, `[Kernels]`, ...) holding named child blocks, one per
//! configured object:
//!
//! ```text
//! [Variables]
//!   [disp_x]
//!     order = FIRST
//!   []
//! []
//! ```
//!
//! Sections may themselves hold sub-sections, as pressure boundary conditions
//! do:
//!
//! ```text
//! [BCs]
//!   [Pressure]
//!     [inner_surface]
//!       boundary = "inner"
//!       factor = 1e6
//!     []
//!   []
//! []
//! ```
//!
//! Fields that belong to a section itself are written after its children:
//!
//! ```text
//! [Mesh]
//!   [filemesh]
//!     type = FileMeshGenerator
//!     file = mesh.e
//!   []
//!   second_order = true
//! []
//! ```
//!
//! # Fields
//!
//! One field per line, `name = value`. [`RenderOptions::compact`] writes
//! `name=value` instead; the solver accepts both.
//!
//! | Value | Written as |
//! |-------|------------|
//! | boolean | `true` / `false` |
//! | integer | `42` |
//! | float | `-9.81`, `0.01` |
//! | text | verbatim |
//! | list | space-separated, double-quoted: `"0.01 0.01 0.01"` |
//! | reference | target name, or `target:port` |
//! | reference list | `"disp_x disp_y disp_z"` |
//!
//! Individual fields may force quoting with [`Quote`]; property lists for
//! generic materials are conventionally single-quoted
//! (`prop_names = 'density specific_heat'`).
//!
//! # References
//!
//! Many fields name another block (`variable = temperature`). A reference must
//! name an entity defined somewhere in the same document, at any depth; section
//! labels are not referenceable. Rendering fails with
//! [`Error::DanglingReference`] otherwise. The same name may be used in
//! different sections (a variable `T` and a postprocessor `T`); a reference to
//! `T` is satisfied by either.
//!
//! # Names
//!
//! Names must be non-empty, fit on one line, hold no `[` or `]`, and not start
//! with `./` or `../`. Within one block, child names are unique: the first
//! block inserted under a name wins and later ones are reported as
//! [`Error::DuplicateName`] (see [`DuplicatePolicy`] for the alternative).
//!
//! # Indentation
//!
//! Indentation is derived from the bracket markers alone, two spaces per level
//! by default. Any line whose trimmed content is `[]` closes a block; any other
//! `[...]` line opens one. See [`indent`](crate::indent) for the exact rules and
//! [`BalancePolicy`] for how unbalanced input is treated.
//!
//! Blank lines are kept empty. Every line, including the last, ends in `\n`
//! unless [`RenderOptions::with_trailing_newline`] turns that off.
//!
//! [`RenderOptions::compact`]: crate::RenderOptions::compact
//! [`RenderOptions::with_trailing_newline`]: crate::RenderOptions::with_trailing_newline
//! [`Quote`]: crate::Quote
//! [`Error::DanglingReference`]: crate::Error::DanglingReference
//! [`Error::DuplicateName`]: crate::Error::DuplicateName
//! [`DuplicatePolicy`]: crate::DuplicatePolicy
//! [`BalancePolicy`]: crate::BalancePolicy
