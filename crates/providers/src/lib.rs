//! LLM endpoint implementations for Tata.
//!
//! All providers implement the `tata_core::Provider` trait.

pub mod openai_compat;

pub use openai_compat::OpenAiCompatProvider;
