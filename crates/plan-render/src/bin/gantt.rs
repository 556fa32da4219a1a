// File: crates/plan-render/src/bin/gantt.rs
// Summary: Renders the built-in plan as a Gantt chart (SVG) and prints the output path.

use anyhow::{Context, Result};
use plan_core::{ChartRender, GanttChart};

fn main() -> Result<()> {
    plan_render::init_tracing();
    let config = plan_render::load_config()?;
    let plan = plan_render::coupon_issue_plan()?;

    let fit = config.labels.label_fit(&plan.weight_unit);
    let chart = GanttChart::new(&plan, config.gantt_options(), fit)
        .with_title(format!("{} — 메인 타임라인 (4~5월)", plan.title));

    let out = config.gantt_path();
    chart
        .render_to_svg(&out)
        .with_context(|| format!("rendering Gantt chart to {}", out.display()))?;
    println!("OK: {}", out.display());
    Ok(())
}
