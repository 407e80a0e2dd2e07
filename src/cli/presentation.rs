//! CLI presentation: text and json formatters for a dry-run plan.

use crate::error::Result;
use crate::reconcile::ReconcilePlan;
use serde_json::json;

/// One line per planned change, in the order they would be applied.
pub fn format_plan_text(plan: &ReconcilePlan) -> String {
    if plan.is_noop() {
        return "Nothing to change.".to_string();
    }

    let mut lines = Vec::new();
    for path in &plan.create {
        lines.push(format!("create  {}", path.display()));
    }
    for path in &plan.delete {
        lines.push(format!("delete  {}", path.display()));
    }
    let summary = plan.summary();
    lines.push(format!(
        "{} to create, {} to delete, {} unchanged",
        summary.created, summary.deleted, summary.kept
    ));
    lines.join("\n")
}

pub fn format_plan_json(plan: &ReconcilePlan) -> Result<String> {
    let value = json!({
        "plan": plan,
        "summary": plan.summary(),
    });
    Ok(serde_json::to_string_pretty(&value)?)
}
