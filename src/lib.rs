//! Brújula: a phase-driven vocational-guidance chat.
//!
//! The conversation controller walks a student through a fixed script
//! of phases, composing a fresh prompt per turn from a persona
//! preamble, the session state and the current phase's instruction
//! block, and delegating text generation to the Gemini API behind a
//! credential-holding proxy.

pub mod config;
pub mod errors;
pub mod gateway;
pub mod interpreter;
pub mod orchestrator;
pub mod phase;
pub mod prompt;
pub mod registry;
pub mod session;
pub mod transition;
pub mod ui;
