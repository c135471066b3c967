//! Studio Core - Headless Campaign Generation for adforge
//!
//! This crate provides the core campaign-generation logic for adforge,
//! completely independent of any UI framework. It can drive a TUI, web UI,
//! native GUI, or run headless for testing/automation.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        UI Surfaces                              │
//! │  ┌─────────┐  ┌─────────┐  ┌─────────────────────────────────┐  │
//! │  │   TUI   │  │  WebUI  │  │        Headless / Tests         │  │
//! │  │(ratatui)│  │         │  │                                 │  │
//! │  └────┬────┘  └────┬────┘  └────────────────┬────────────────┘  │
//! │       │            │                        │                   │
//! │       └────────────┴────────────────────────┘                   │
//! │                           │                                     │
//! │            submit / request_variations (down)                   │
//! │                  StudioMessage (up)                             │
//! │                           │                                     │
//! └───────────────────────────┼─────────────────────────────────────┘
//!                             │
//! ┌───────────────────────────┼─────────────────────────────────────┐
//! │                      STUDIO CORE                                │
//! │  ┌────────────────────────┴───────────────────────────────────┐ │
//! │  │                    CampaignStudio                          │ │
//! │  │  ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌────────────┐  │ │
//! │  │  │ Campaign │  │  Prompt  │  │  Config  │  │  Backend   │  │ │
//! │  │  │  State   │  │ Builder  │  │          │  │  (Gemini)  │  │ │
//! │  │  └──────────┘  └──────────┘  └──────────┘  └────────────┘  │ │
//! │  └────────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`CampaignStudio`]: The state machine that owns the campaign lifecycle
//! - [`CampaignSuggestion`]: A generated campaign (summary, creatives, keywords, audiences)
//! - [`CampaignBackend`]: Generation backend abstraction (Gemini, mocks)
//! - [`StudioMessage`]: Messages sent from the studio to UI surfaces
//! - [`CampaignError`]: Classified, display-ready submission errors
//! - [`StudioConfig`]: Resolved configuration (env > file > defaults)
//!
//! # Quick Start
//!
//! ```ignore
//! use studio_core::{CampaignStudio, GeminiBackend, StudioConfig};
//! use tokio::sync::mpsc;
//!
//! #[tokio::main]
//! async fn main() {
//!     // Create a channel for messages to the UI surface
//!     let (tx, mut rx) = mpsc::channel(100);
//!
//!     let config = StudioConfig::load().unwrap_or_default();
//!     let backend = GeminiBackend::new(&config);
//!     let mut studio = CampaignStudio::new(backend, config, tx);
//!
//!     studio.start().await;
//!     studio.submit("https://example.com").await;
//!
//!     // Main loop: apply finished work and render
//!     loop {
//!         studio.poll_completions().await;
//!         while let Ok(msg) = rx.try_recv() {
//!             // Render message to UI
//!         }
//!         // Handle user input, call submit / request_variations
//!     }
//! }
//! ```
//!
//! # Module Overview
//!
//! - [`studio`]: The main `CampaignStudio` state machine
//! - [`campaign`]: Campaign data model (creatives, keywords, audiences)
//! - [`backend`]: Generation backend abstraction (Gemini REST, mocks)
//! - [`prompt`]: Prompt text and response-schema construction
//! - [`messages`]: Messages from the studio to UI surfaces
//! - [`error`]: Gateway and campaign error taxonomies
//! - [`config`]: Configuration loading (env > file > defaults)
//!
//! # No TUI Dependencies
//!
//! This crate has **zero** dependencies on ratatui, crossterm, or any other
//! UI framework. It's pure business logic that can be used anywhere.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod backend;
pub mod campaign;
pub mod config;
pub mod error;
pub mod messages;
pub mod prompt;
pub mod studio;

// Re-exports for convenience
pub use backend::{CampaignBackend, GeminiBackend};
pub use campaign::{
    AdCreative, CampaignSuggestion, KeywordSuggestion, MatchType, DESCRIPTION_SOFT_LIMIT,
    EXPORT_FILE_NAME, HEADLINE_SOFT_LIMIT,
};
pub use error::{CampaignError, GatewayError, GatewayResult};
pub use messages::{NotifyLevel, StudioMessage, StudioState};
pub use studio::{
    CampaignStudio, IDLE_HINT, LOADING_PHASES, LOADING_PHASE_INTERVAL_MS,
};

// Config exports
pub use config::{default_config_path, ConfigError, ConfigSource, StudioConfig, StudioToml};
