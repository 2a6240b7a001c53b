pub mod analysis;
pub mod extraction;
pub mod llm;

pub use analysis::ContractAnalysisService;
pub use llm::{LlmClient, OpenAiOracle};
