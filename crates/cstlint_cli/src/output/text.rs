//! Text output formatter

use cstlint_core::{LintResult, LintSummary};

pub fn output_text(results: &[LintResult]) {
    for result in results {
        if result.violations.is_empty() {
            continue;
        }

        println!("\n{}:", result.path.display());
        for violation in &result.violations {
            let check = violation.check_id.as_deref().unwrap_or(violation.check_name);
            println!(
                "  {}:{} {} [{}]: {}",
                violation.line,
                violation.column,
                violation.severity,
                check,
                violation.message()
            );
        }
    }

    let summary = LintSummary::from_results(results);

    println!();
    println!(
        "Checked {} files, found {} issues ({} errors)",
        summary.files_checked, summary.total_violations, summary.errors
    );
}
