// File: crates/plan-render/src/bin/milestones.rs
// Summary: Renders the built-in plan's milestone timeline (SVG) and prints the output path.

use anyhow::{Context, Result};
use plan_core::{ChartRender, MilestoneChart};

fn main() -> Result<()> {
    plan_render::init_tracing();
    let config = plan_render::load_config()?;
    let plan = plan_render::coupon_issue_plan()?;

    let chart = MilestoneChart::new(&plan, config.milestone_options(), config.labels.metrics())
        .with_title(format!("{} — 마일스톤 & Exit Criteria", plan.title));

    let out = config.milestone_path();
    chart
        .render_to_svg(&out)
        .with_context(|| format!("rendering milestone timeline to {}", out.display()))?;
    println!("OK: {}", out.display());
    Ok(())
}
