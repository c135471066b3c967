//! AdForge TUI - Terminal interface for the campaign studio
//!
//! This crate provides a full-screen terminal UI for generating Google Ads
//! campaign assets from a website URL.
//!
//! # Architecture
//!
//! - **App**: Event loop, key handling, and rendering
//! - **StudioClient**: Embedded campaign studio plus its message channel
//! - **Display**: Lifecycle mirror and transient notices
//! - **Theme**: Dark/light palettes with a persisted choice

pub mod app;
pub mod display;
pub mod studio_client;
pub mod theme;

pub use app::App;
