pub mod base;
pub mod gemini;
