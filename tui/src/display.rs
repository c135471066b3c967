//! Display State Types
//!
//! Surface-local state for the TUI, derived from `StudioMessage`s and used
//! for rendering.
//!
//! # Design Philosophy
//!
//! The TUI is a "thin client" - it renders what the studio tells it to.
//! Campaign content and errors are read straight off the studio's accessors
//! each frame; what lives here is only what the surface itself owns:
//!
//! - The last reported lifecycle state
//! - Transient notices (variation failures, export confirmations) that
//!   expire on their own after a few seconds

use std::time::{Duration, Instant};

use studio_core::{NotifyLevel, StudioMessage, StudioState};

/// How long a notice stays on screen before it expires.
pub const NOTICE_TTL: Duration = Duration::from_secs(5);

/// A transient notice line shown beneath the main panel.
#[derive(Clone, Debug)]
pub struct Notice {
    /// Severity of the notice
    pub level: NotifyLevel,
    /// Optional short heading
    pub title: Option<String>,
    /// Message content
    pub message: String,
    /// When the notice was posted
    pub posted: Instant,
}

impl Notice {
    /// Create a notice posted now.
    pub fn new(level: NotifyLevel, title: Option<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            title,
            message: message.into(),
            posted: Instant::now(),
        }
    }

    /// Heading to render: the title when present, a level default otherwise.
    #[must_use]
    pub fn label(&self) -> &str {
        match self.title {
            Some(ref title) => title,
            None => match self.level {
                NotifyLevel::Info => "Notice",
                NotifyLevel::Warning => "Warning",
                NotifyLevel::Error => "Error",
                NotifyLevel::Success => "Success",
            },
        }
    }
}

/// The full display state for the TUI
#[derive(Debug)]
pub struct DisplayState {
    /// Studio lifecycle state as last reported
    pub studio_state: StudioState,
    /// Notices still on screen, oldest first
    pub notices: Vec<Notice>,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            studio_state: StudioState::Idle,
            notices: Vec::new(),
        }
    }
}

impl DisplayState {
    /// Create a new display state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a `StudioMessage` to update display state
    pub fn apply_message(&mut self, msg: StudioMessage) {
        match msg {
            StudioMessage::State { state } => {
                self.studio_state = state;
            }
            StudioMessage::Notify {
                level,
                title,
                message,
            } => {
                self.notices.push(Notice::new(level, title, message));
            }
        }
    }

    /// Post a notice on the surface's own behalf (export confirmations,
    /// local validation nudges). Studio notices arrive via
    /// [`Self::apply_message`] instead.
    pub fn push_notice(
        &mut self,
        level: NotifyLevel,
        title: Option<String>,
        message: impl Into<String>,
    ) {
        self.notices.push(Notice::new(level, title, message));
    }

    /// Drop notices older than [`NOTICE_TTL`]. Call once per frame.
    pub fn update(&mut self) {
        self.notices
            .retain(|notice| notice.posted.elapsed() < NOTICE_TTL);
    }

    /// The most recently posted notice still on screen.
    #[must_use]
    pub fn latest_notice(&self) -> Option<&Notice> {
        self.notices.last()
    }
}
