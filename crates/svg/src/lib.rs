#![deny(missing_docs)]
//! Elements SVG: static conversion of parameterized JSX logo components
//! into standalone SVG files.

/// `COLORS` table resolution.
pub mod colors;
/// Color expression evaluation.
pub mod expr;
/// Balanced JSX fragment extraction.
pub mod jsx;
/// Object literal views.
pub mod literal;
/// Batch driver over registry record files.
pub mod pipeline;
/// Prop default extraction.
pub mod props;
/// JSX to SVG serialization.
pub mod serialize;
/// Local color variable resolution.
pub mod variables;

pub use colors::{ColorLookup, ColorTable, resolve_colors};
pub use jsx::{extract_jsx_object_entries, extract_jsx_variable, find_last_svg_return, find_svg_returns};
pub use pipeline::{
    PipelineError, PipelineOptions, PipelineReport, SvgIndexEntry, convert_source, process_record,
    run,
};
pub use props::{PropDefaults, Selection, extract_prop_defaults};
pub use serialize::{RenderContext, SvgRender, render_svg, unresolved_expressions};
pub use variables::{LocalVariables, resolve_local_variables};
