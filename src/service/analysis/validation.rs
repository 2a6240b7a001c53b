//! Quality checks for assembled risk reports
//!
//! The model is asked to quote clauses verbatim, use the fixed categories and
//! severities, and keep explanations short. None of that is guaranteed, so
//! deviations are reported as warnings. The report itself is never changed.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::ContractRiskReport;

/// Explanations longer than this are flagged
const MAX_EXPLANATION_SENTENCES: usize = 3;

static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+(\s|$)").expect("valid sentence regex"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Result of report validation
#[derive(Debug, Default)]
pub struct ReportValidationResult {
    /// Warnings that indicate potential quality issues
    pub warnings: Vec<String>,
}

impl ReportValidationResult {
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    #[cfg(test)]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Validate a report against the contract text it was produced from
///
/// Checks:
/// 1. The summary is not empty
/// 2. Each clause quote appears in the contract (case and whitespace insensitive)
/// 3. Each category is one of the seven offered categories
/// 4. Each severity is Low, Medium or High
/// 5. Each explanation has at most three sentences
pub fn validate_report(
    report: &ContractRiskReport,
    contract_text: &str,
) -> ReportValidationResult {
    let mut result = ReportValidationResult::default();

    if report.contract_summary.trim().is_empty() {
        result.add_warning("Report has an empty contract summary".to_string());
    }

    let normalized_contract = normalize(contract_text);

    for (i, clause) in report.risky_clauses.iter().enumerate() {
        let n = i + 1;

        let quote = trim_quote(&clause.clause_text);
        if quote.is_empty() {
            result.add_warning(format!("Clause {} has no quoted text", n));
        } else if !normalized_contract.contains(&normalize(quote)) {
            result.add_warning(format!(
                "Clause {} text not found in contract: '{}'",
                n,
                quote.chars().take(80).collect::<String>()
            ));
        }

        if clause.risk_category().is_none() {
            result.add_warning(format!(
                "Clause {} has unrecognized category '{}'",
                n, clause.category
            ));
        }

        if clause.severity_level().is_none() {
            result.add_warning(format!(
                "Clause {} has unrecognized severity '{}'",
                n, clause.severity
            ));
        }

        let sentences = count_sentences(&clause.risk_explanation);
        if sentences > MAX_EXPLANATION_SENTENCES {
            result.add_warning(format!(
                "Clause {} explanation has {} sentences (max {})",
                n, sentences, MAX_EXPLANATION_SENTENCES
            ));
        }
    }

    result
}

/// Strip the quote marks and ellipses models wrap excerpts in
fn trim_quote(text: &str) -> &str {
    text.trim()
        .trim_matches(|c| matches!(c, '"' | '\'' | '“' | '”' | '…'))
        .trim_start_matches("...")
        .trim_end_matches("...")
        .trim()
}

fn normalize(text: &str) -> String {
    WHITESPACE.replace_all(text.trim(), " ").to_lowercase()
}

fn count_sentences(text: &str) -> usize {
    let text = text.trim();
    if text.is_empty() {
        return 0;
    }
    let terminated = SENTENCE_END.find_iter(text).count();
    // a trailing fragment without punctuation still counts
    if text.ends_with(['.', '!', '?']) {
        terminated
    } else {
        terminated + 1
    }
}
