//! JSON output formatter

use cstlint_core::LintResult;
use miette::{IntoDiagnostic, Result};

pub fn output_json(results: &[LintResult]) -> Result<()> {
    let output: Vec<_> = results
        .iter()
        .map(|r| {
            let violations: Vec<_> = r
                .violations
                .iter()
                .map(|v| {
                    serde_json::json!({
                        "line": v.line,
                        "column": v.column,
                        "severity": v.severity,
                        "check": v.check_name,
                        "id": v.check_id,
                        "token": v.token,
                        "key": v.key,
                        "args": v.args,
                        "message": v.message(),
                    })
                })
                .collect();
            serde_json::json!({
                "path": r.path.display().to_string(),
                "violations": violations,
            })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
    Ok(())
}
