//! Studio Client
//!
//! Thin wrapper around the Campaign Studio for TUI integration.
//! This client embeds the studio directly (no network) and provides
//! a convenient interface for driving it and receiving messages.
//!
//! # Architecture
//!
//! The TUI is a "thin client" - it contains no generation logic.
//! All campaign work happens in the studio. The TUI's job is:
//! 1. Convert key presses to studio calls (`submit`, `request_variations`)
//! 2. Pump `poll_completions` every frame so finished work lands
//! 3. Receive `StudioMessage`s and update display state
//! 4. Render from the studio's read accessors

use tokio::sync::mpsc;

use studio_core::{
    CampaignError, CampaignStudio, CampaignSuggestion, GeminiBackend, StudioConfig, StudioMessage,
    StudioState,
};

/// Client for driving the embedded Campaign Studio
pub struct StudioClient {
    /// The embedded studio instance
    studio: CampaignStudio<GeminiBackend>,
    /// Receiver for messages from the studio
    rx: mpsc::Receiver<StudioMessage>,
}

impl StudioClient {
    /// Create a client with configuration resolved from the config file and
    /// environment.
    pub fn new() -> anyhow::Result<Self> {
        let config = StudioConfig::load()?;
        Ok(Self::with_config(config))
    }

    /// Create a client from an already resolved configuration.
    #[must_use]
    pub fn with_config(config: StudioConfig) -> Self {
        // Channel for studio -> TUI messages
        let (tx, rx) = mpsc::channel(100);

        let backend = GeminiBackend::new(&config);
        let studio = CampaignStudio::new(backend, config, tx);

        Self { studio, rx }
    }

    /// Announce the studio to the surface (sends the initial state).
    pub async fn start(&mut self) {
        self.studio.start().await;
    }

    /// Submit a URL for campaign generation
    pub async fn submit(&mut self, url: &str) {
        self.studio.submit(url).await;
    }

    /// Request variations for one creative; returns whether a request was
    /// spawned
    pub async fn request_variations(&mut self, index: usize) -> bool {
        self.studio.request_variations(index).await
    }

    /// Discard the current campaign or error and return to idle
    pub async fn reset(&mut self) {
        self.studio.reset().await;
    }

    /// Apply finished generation work (must be called regularly)
    pub async fn poll_completions(&mut self) -> bool {
        self.studio.poll_completions().await
    }

    /// Step the rotating loading status line
    pub fn advance_loading_phase(&mut self) {
        self.studio.advance_loading_phase();
    }

    /// Try to receive a message from the studio (non-blocking)
    pub fn try_recv(&mut self) -> Option<StudioMessage> {
        self.rx.try_recv().ok()
    }

    /// Receive all pending messages from the studio (non-blocking)
    pub fn recv_all(&mut self) -> Vec<StudioMessage> {
        let mut messages = Vec::new();
        while let Ok(msg) = self.rx.try_recv() {
            messages.push(msg);
        }
        messages
    }

    /// Get the current studio state
    pub fn state(&self) -> StudioState {
        self.studio.state()
    }

    /// The latest generated campaign, if any
    pub fn campaign(&self) -> Option<&CampaignSuggestion> {
        self.studio.campaign()
    }

    /// The latest submission error, if any
    pub fn error(&self) -> Option<&CampaignError> {
        self.studio.error()
    }

    /// The creative index with a variation request in flight
    pub fn iterating_index(&self) -> Option<usize> {
        self.studio.iterating_index()
    }

    /// The current loading status line, present only while loading
    pub fn loading_message(&self) -> Option<&'static str> {
        self.studio.loading_message()
    }

    /// The configured model name, for the status bar
    pub fn model(&self) -> &str {
        &self.studio.config().model
    }
}
