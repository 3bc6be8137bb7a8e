//! Prompt assembly and the text-generation backend

pub mod gemini;
pub mod prompts;
