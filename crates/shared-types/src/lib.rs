pub mod types;

pub use types::{
    AnalysisReport, Observation, Severity, DEFAULT_AREA, DEFAULT_DESCRIPTION,
    DEFAULT_RECOMMENDATION, MAX_AREA_CHARS, MAX_DESCRIPTION_CHARS, MAX_RECOMMENDATION_CHARS,
};
