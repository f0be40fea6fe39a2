//! The analysis pipeline: normalize, transcribe, summarize, extract, assemble.

pub mod analyzer;
pub mod result;

pub use analyzer::AnalysisPipeline;
pub use result::AnalysisResult;
