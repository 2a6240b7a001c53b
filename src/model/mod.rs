pub mod config;
pub mod document;
pub mod extracted;
pub mod report;

pub use config::{Config, UploadConfig};
pub use document::{Document, DocumentFormat, ExtractedText};
pub use extracted::{ExtractedClause, ExtractedReport};
pub use report::{
    AnalysisReport, ContractRiskReport, DegradedReport, RiskCategory, RiskClause, Severity,
};
