//! Core analysis engine: prompt construction, reply parsing, and the
//! fallback observations used when the model yields nothing usable.
//!
//! Everything here is a pure function of its inputs; no I/O, no shared state.

pub mod fallback;
pub mod parser;
pub mod prompt;

pub use fallback::fallback_observations;
pub use parser::{parse_records, parse_reply, FieldSource, FieldSources, ParsedRecord};
pub use prompt::{build_prompt, build_prompt_with_budget, PROMPT_TEXT_BUDGET_CHARS, SYSTEM_PROMPT};
