//! Gapscope generates ISO 27001 policy gap-analysis reports.
//!
//! The pipeline extracts the text of an ISMS policy PDF, combines it with
//! an ISO 27001 excerpt into a fixed instruction prompt, and hands the
//! prompt to a generation backend (either a hosted chat-completion API or
//! a locally running model) which produces the report text.

pub mod config;
pub mod pipeline;
