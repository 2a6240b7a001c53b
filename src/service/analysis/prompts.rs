//! Prompts for contract risk analysis

use crate::model::{RiskCategory, Severity};

/// System prompt for contract risk analysis
pub const ANALYSIS_SYSTEM_PROMPT: &str = r#"You are an expert contract analyst trained in legal risk spotting.
Your role is NOT to give legal advice but to highlight potential risks in contracts
and explain them in clear, plain English so a non-lawyer can understand.
Always respond with structured JSON so the results can be parsed by software."#;

/// Output structure declared to the model. Changing it breaks report recovery.
pub const REPORT_SCHEMA: &str = r#"{
  "contract_summary": "One-paragraph plain English summary of overall contract tone and risk level.",
  "risky_clauses": [
    {
      "category": "Liability",
      "clause_text": "...",
      "risk_explanation": "...",
      "severity": "High"
    }
  ]
}"#;

/// System and user instructions for one analysis call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedPrompt {
    pub system: &'static str,
    pub user: String,
}

/// Build the analysis prompt for a contract.
///
/// Pure and deterministic: the same text always yields the same prompt.
pub fn compose(contract_text: &str) -> ComposedPrompt {
    ComposedPrompt {
        system: ANALYSIS_SYSTEM_PROMPT,
        user: build_analysis_prompt(contract_text),
    }
}

fn build_analysis_prompt(contract_text: &str) -> String {
    let categories = RiskCategory::ALL
        .iter()
        .map(|c| format!("- {}", c.label()))
        .collect::<Vec<_>>()
        .join("\n");

    let severities = Severity::ALL
        .iter()
        .map(Severity::as_str)
        .collect::<Vec<_>>()
        .join(" / ");

    format!(
        r#"Analyze the following contract.
Identify clauses that may create risks for the user in the following categories:

{categories}

For each risky clause you find:
1. Quote the exact clause text.
2. Label which category it belongs to.
3. Explain in plain English why this clause could be risky (max 3 sentences).
4. Rate the severity as: {severities}.

Return your results in JSON with this structure:

{schema}

Contract Text:
"""{contract_text}""""#,
        categories = categories,
        severities = severities,
        schema = REPORT_SCHEMA,
        contract_text = contract_text
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTRACT: &str = "The Supplier may terminate this Agreement at any time without notice.";

    #[test]
    fn test_compose_is_deterministic() {
        assert_eq!(compose(CONTRACT), compose(CONTRACT));
        assert_eq!(compose(CONTRACT).user.as_bytes(), compose(CONTRACT).user.as_bytes());
    }

    #[test]
    fn test_lists_all_categories_in_order() {
        let prompt = compose(CONTRACT).user;

        let positions: Vec<usize> = RiskCategory::ALL
            .iter()
            .map(|c| prompt.find(&format!("- {}\n", c.label())).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(prompt.contains("- Governing Law / Dispute Resolution"));
    }

    #[test]
    fn test_embeds_schema_and_rules() {
        let prompt = compose(CONTRACT).user;

        assert!(prompt.contains(REPORT_SCHEMA));
        assert!(prompt.contains("max 3 sentences"));
        assert!(prompt.contains("Rate the severity as: Low / Medium / High."));
    }

    #[test]
    fn test_contract_text_is_fenced_last() {
        let prompt = compose(CONTRACT).user;

        assert!(prompt.ends_with(&format!("Contract Text:\n\"\"\"{CONTRACT}\"\"\"")));
    }

    #[test]
    fn test_system_prompt_disclaims_legal_advice() {
        let prompt = compose(CONTRACT);

        assert!(prompt.system.contains("NOT to give legal advice"));
        assert!(prompt.system.contains("structured JSON"));
    }
}
