// File: crates/plan-core/src/lib.rs
// Summary: Core library entry point; exports the plan model, row layout engine and chart renderers.

pub mod error;
pub mod model;
pub mod layout;
pub mod types;
pub mod geometry;
pub mod grid;
pub mod scale;
pub mod view;
pub mod theme;
pub mod text;
pub mod render;
pub mod gantt;
pub mod milestone;
pub mod config;

pub use error::{PlanError, Result};
pub use model::{Milestone, Phase, Plan, Task};
pub use layout::{
    compose_label, format_weight, max_overlap, pack_by_role, pack_role, truncate_to_width, LabelFit,
    LabelPlacement, RoleBlock, Row, RowLayoutEngine, TextMetrics,
};
pub use render::{ChartRender, RenderOptions};
pub use gantt::{GanttChart, GanttLayout};
pub use milestone::{MilestoneChart, MilestoneLayout};
pub use config::ChartConfig;
pub use theme::Theme;
pub use text::TextShaper;
pub use view::WeekRange;
