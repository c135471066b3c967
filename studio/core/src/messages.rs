//! Studio Messages
//!
//! Messages sent from the `CampaignStudio` to UI surfaces. These represent all
//! the ways the generation layer can communicate with any connected UI (TUI,
//! `WebUI`, GUI, etc.).
//!
//! # Design Philosophy
//!
//! The studio is the "brain" that owns campaign state and drives generation.
//! UI surfaces are pure renderers that display what the studio tells them to.
//! Surfaces read campaign data through studio accessors; these messages carry
//! the moments a surface cannot derive by polling, such as transient notices
//! about a variation request that failed.

use serde::{Deserialize, Serialize};

/// Messages from the studio to a UI surface.
///
/// These messages tell the UI what changed and what to surface to the user.
/// The UI should not have any business logic - just render what it's told.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum StudioMessage {
    // ============================================
    // Lifecycle Messages
    // ============================================
    /// Studio state change
    State {
        /// The new state
        state: StudioState,
    },

    // ============================================
    // System Messages
    // ============================================
    /// Transient notification
    Notify {
        /// Notification level
        level: NotifyLevel,
        /// Title (optional)
        title: Option<String>,
        /// Message content
        message: String,
    },
}

/// Notification levels
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotifyLevel {
    /// Informational
    Info,
    /// Warning
    Warning,
    /// Error
    Error,
    /// Success
    Success,
}

/// Studio operational states
///
/// One generation lifecycle at a time: a submission moves the studio to
/// `Loading`, and the outcome lands it on `Success` or `Error`. Variation
/// requests refine an existing `Success` without leaving it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StudioState {
    /// No campaign yet, waiting for a URL
    Idle,
    /// A campaign request is in flight
    Loading,
    /// A campaign is available
    Success,
    /// The last submission failed
    Error,
}

impl StudioState {
    /// Human-readable description
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Idle => "Ready",
            Self::Loading => "Generating...",
            Self::Success => "Campaign ready",
            Self::Error => "Error",
        }
    }
}
