//! Terminal presentation layer.
//!
//! Consumes display directives from the orchestrator: renders the
//! bot's Markdown conventions for the terminal and runs the
//! interactive session loop.

pub mod chat;
pub mod render;
