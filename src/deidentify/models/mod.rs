//! Data models shared by every stage of the pipeline

pub mod detection;

pub use detection::{
    normalize, ContextCategory, Detection, DetectionMethod, PiiType, ProcessOptions,
    ProcessResult,
};
