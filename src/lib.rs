//! AI Relay - routes chat, code-assist and image requests to interchangeable
//! AI providers behind one normalized interface.
//!
//! Five text providers (Groq, Gemini, HuggingFace, OpenAI, Anthropic) and one
//! image adapter sit behind ports; a dispatcher resolves the provider per
//! request and keeps per-session conversation history.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
