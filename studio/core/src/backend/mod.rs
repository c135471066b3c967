//! AI Backend Integration
//!
//! Abstracted access to the generation backend through the
//! [`CampaignBackend`] trait. The production implementation talks to the
//! hosted Gemini generateContent API; tests substitute mocks at the trait
//! seam.
//!
//! # Usage
//!
//! ```ignore
//! use studio_core::backend::{CampaignBackend, GeminiBackend};
//!
//! let backend = GeminiBackend::from_env();
//! let campaign = backend.generate_campaign("https://example.com").await?;
//! ```

mod gemini;
mod traits;

pub use gemini::GeminiBackend;
pub use traits::CampaignBackend;
