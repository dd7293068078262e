//! Daily health check for three hosted inference endpoints (text, audio transcription,
//! image OCR), producing one JSON report per calendar day.

pub mod cli;
pub mod core;
pub mod error;
