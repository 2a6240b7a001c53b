//! Risk report returned by the analyze endpoint

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Result of a contract analysis.
///
/// Exactly one shape is produced per request: a structured report, or the
/// raw model output when it could not be recovered as a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum AnalysisReport {
    Structured(ContractRiskReport),
    Degraded(DegradedReport),
}

impl AnalysisReport {
    pub fn degraded(raw_output: impl Into<String>) -> Self {
        AnalysisReport::Degraded(DegradedReport {
            raw_output: raw_output.into(),
        })
    }
}

/// Well-formed risk report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ContractRiskReport {
    /// Plain-English summary of overall contract tone and risk level
    pub contract_summary: String,
    /// Identified clauses in the order the model reported them
    pub risky_clauses: Vec<RiskClause>,
}

/// A clause flagged as risky
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RiskClause {
    pub category: String,
    /// Verbatim excerpt from the contract
    pub clause_text: String,
    pub risk_explanation: String,
    /// Expected to be Low, Medium or High; other values are passed through
    pub severity: String,
}

impl RiskClause {
    /// Severity as a known level, if the model used one
    pub fn severity_level(&self) -> Option<Severity> {
        Severity::parse(&self.severity)
    }

    pub fn risk_category(&self) -> Option<RiskCategory> {
        RiskCategory::from_label(&self.category)
    }
}

/// Report shape used when the model output could not be recovered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DegradedReport {
    pub raw_output: String,
}

/// Three-level risk rating attached to each clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Low, Severity::Medium, Severity::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
        }
    }

    /// Exact match against the rating names
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

/// Closed set of risk categories offered to the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskCategory {
    Termination,
    LiabilityIndemnification,
    IntellectualProperty,
    PaymentTerms,
    ConfidentialityNonCompete,
    GoverningLawDisputeResolution,
    OtherUnusualClauses,
}

impl RiskCategory {
    pub const ALL: [RiskCategory; 7] = [
        RiskCategory::Termination,
        RiskCategory::LiabilityIndemnification,
        RiskCategory::IntellectualProperty,
        RiskCategory::PaymentTerms,
        RiskCategory::ConfidentialityNonCompete,
        RiskCategory::GoverningLawDisputeResolution,
        RiskCategory::OtherUnusualClauses,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RiskCategory::Termination => "Termination",
            RiskCategory::LiabilityIndemnification => "Liability / Indemnification",
            RiskCategory::IntellectualProperty => "Intellectual Property",
            RiskCategory::PaymentTerms => "Payment Terms",
            RiskCategory::ConfidentialityNonCompete => "Confidentiality / Non-Compete",
            RiskCategory::GoverningLawDisputeResolution => "Governing Law / Dispute Resolution",
            RiskCategory::OtherUnusualClauses => "Other Unusual Clauses",
        }
    }

    /// Match a category name as the model tends to write it.
    ///
    /// Case, spacing and punctuation are ignored, and either half of a
    /// combined label is accepted ("Liability" matches "Liability / Indemnification").
    pub fn from_label(value: &str) -> Option<Self> {
        let wanted = squash(value);
        if wanted.is_empty() {
            return None;
        }

        Self::ALL.into_iter().find(|category| {
            let label = category.label();
            squash(label) == wanted || label.split('/').any(|part| squash(part) == wanted)
        })
    }
}

fn squash(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}
