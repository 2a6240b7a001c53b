//! Normalization of recovered output into the response report

use crate::model::{AnalysisReport, ContractRiskReport, ExtractedClause, RiskClause};
use crate::service::analysis::recovery::RecoveredReport;

/// Convert recovered output into the canonical report shape.
///
/// A missing or null `risky_clauses` becomes an empty list. Clause values,
/// severity included, are passed through as the model wrote them.
pub fn assemble(recovered: RecoveredReport) -> AnalysisReport {
    match recovered {
        RecoveredReport::Structured { report, .. } => {
            AnalysisReport::Structured(ContractRiskReport {
                contract_summary: report.contract_summary,
                risky_clauses: report
                    .risky_clauses
                    .unwrap_or_default()
                    .into_iter()
                    .map(convert_clause)
                    .collect(),
            })
        }
        RecoveredReport::Unparsed(raw_output) => AnalysisReport::degraded(raw_output),
    }
}

fn convert_clause(extracted: ExtractedClause) -> RiskClause {
    RiskClause {
        category: extracted.category.unwrap_or_default(),
        clause_text: extracted.clause_text.unwrap_or_default(),
        risk_explanation: extracted.risk_explanation.unwrap_or_default(),
        severity: extracted.severity.unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::analysis::recovery::recover;

    #[test]
    fn test_missing_clauses_become_empty() {
        let report = assemble(recover(r#"{"contract_summary": "No risks found."}"#));

        assert_eq!(
            report,
            AnalysisReport::Structured(ContractRiskReport {
                contract_summary: "No risks found.".to_string(),
                risky_clauses: vec![],
            })
        );
    }

    #[test]
    fn test_null_clauses_become_empty() {
        let report = assemble(recover(
            r#"{"contract_summary": "x", "risky_clauses": null}"#,
        ));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["risky_clauses"], serde_json::json!([]));
    }

    #[test]
    fn test_unknown_severity_passed_through() {
        let report = assemble(recover(
            r#"{"contract_summary": "x", "risky_clauses": [{"category": "Payment Terms", "clause_text": "Net 120.", "risk_explanation": "Slow payment.", "severity": "Critical"}]}"#,
        ));

        let AnalysisReport::Structured(report) = report else {
            panic!("expected structured report");
        };
        assert_eq!(report.risky_clauses[0].severity, "Critical");
        assert_eq!(report.risky_clauses[0].severity_level(), None);
    }

    #[test]
    fn test_missing_clause_fields_default_to_empty() {
        let report = assemble(recover(
            r#"{"contract_summary": "x", "risky_clauses": [{"clause_text": "Licensee assigns all IP."}]}"#,
        ));

        let AnalysisReport::Structured(report) = report else {
            panic!("expected structured report");
        };
        let clause = &report.risky_clauses[0];
        assert_eq!(clause.clause_text, "Licensee assigns all IP.");
        assert_eq!(clause.category, "");
        assert_eq!(clause.severity, "");
    }

    #[test]
    fn test_non_string_clause_values_kept_per_clause() {
        let report = assemble(recover(
            r#"{"contract_summary": "x", "risky_clauses": [{"category": "Payment Terms", "clause_text": "Net 120.", "severity": 3}, {"clause_text": "Auto-renews.", "severity": "Low", "risk_explanation": ["nested"]}]}"#,
        ));

        let AnalysisReport::Structured(report) = report else {
            panic!("expected structured report");
        };
        assert_eq!(report.risky_clauses.len(), 2);
        assert_eq!(report.risky_clauses[0].severity, "3");
        assert_eq!(report.risky_clauses[0].clause_text, "Net 120.");
        assert_eq!(report.risky_clauses[1].severity, "Low");
        assert_eq!(report.risky_clauses[1].risk_explanation, "");
    }

    #[test]
    fn test_clause_order_preserved() {
        let report = assemble(recover(
            r#"{"contract_summary": "x", "risky_clauses": [{"clause_text": "first"}, {"clause_text": "second"}, {"clause_text": "third"}]}"#,
        ));

        let AnalysisReport::Structured(report) = report else {
            panic!("expected structured report");
        };
        let texts: Vec<&str> = report
            .risky_clauses
            .iter()
            .map(|c| c.clause_text.as_str())
            .collect();
        assert_eq!(texts, ["first", "second", "third"]);
    }

    #[test]
    fn test_unparsed_becomes_degraded() {
        let report = assemble(recover("not json at all"));

        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            serde_json::json!({ "raw_output": "not json at all" })
        );
    }
}
