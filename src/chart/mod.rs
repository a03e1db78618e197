/// Chart layer: options, declarative spec, and its Vega-Lite lowering.
///
/// Architecture:
/// ```text
///   Vec<Measurement> + ChartOptions
///        │
///        ▼
///   ┌──────────────────┐
///   │ ChartSpecBuilder  │  validate, label wrap, category order,
///   └──────────────────┘  colour scale, callouts, threshold rule
///        │
///        ▼
///   ChartSpec ──► vega::to_vega_lite  /  ui::plot
/// ```

pub mod annotations;
pub mod builder;
pub mod options;
pub mod spec;
pub mod vega;

pub use builder::{ChartSpecBuilder, build_chart};
pub use options::{ChartOptions, Preset};
pub use spec::ChartSpec;
