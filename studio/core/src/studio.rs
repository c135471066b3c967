//! Campaign Studio - The Generation Core
//!
//! The studio is the "brain" of adforge. It owns:
//! - The campaign lifecycle (idle, loading, success, error)
//! - Backend communication for campaign and variation generation
//! - Supersession of in-flight work when a new URL is submitted
//! - Communication with UI surfaces
//!
//! # Design Philosophy
//!
//! The studio is UI-agnostic. It doesn't know or care whether it's talking to
//! a TUI, `WebUI`, or test harness. Surfaces call `submit` and
//! `request_variations`, render from the read accessors, and receive
//! `StudioMessage`s for the moments polling cannot derive.
//!
//! All state lives on the owner's task. Generation runs on spawned tasks that
//! report back through an internal completion channel; `poll_completions`
//! (or `await_completion` in headless use) applies those results on the
//! caller's schedule, so there is no shared mutable state and no locking.
//!
//! Every submission bumps a generation counter and every spawned request
//! carries the counter value it was born under. A completion whose counter no
//! longer matches is discarded, which is what makes re-submission supersede
//! whatever was still in flight.

use std::sync::Arc;

use tokio::sync::mpsc;
use url::Url;

use crate::backend::CampaignBackend;
use crate::campaign::{AdCreative, CampaignSuggestion};
use crate::config::StudioConfig;
use crate::error::{CampaignError, GatewayError};
use crate::messages::{NotifyLevel, StudioMessage, StudioState};

/// Rotating status lines surfaces show while a campaign request is in
/// flight. Purely cosmetic; generation does not report real progress.
pub const LOADING_PHASES: [&str; 5] = [
    "Analyzing website content...",
    "Identifying target audience...",
    "Crafting compelling ad copy...",
    "Brainstorming keywords...",
    "Assembling your campaign...",
];

/// Suggested cadence for cycling through [`LOADING_PHASES`].
pub const LOADING_PHASE_INTERVAL_MS: u64 = 2000;

/// Prompt surfaces show while the studio is idle.
pub const IDLE_HINT: &str = "Enter a URL above to generate your Google Ads campaign assets.";

/// Outcome of a spawned generation task, tagged with the generation counter
/// it was born under.
enum Completion {
    /// A full campaign request finished.
    Campaign {
        generation: u64,
        outcome: Result<CampaignSuggestion, GatewayError>,
    },
    /// A variation request for one creative finished.
    Variations {
        generation: u64,
        index: usize,
        outcome: Result<Vec<AdCreative>, GatewayError>,
    },
}

/// The Campaign Studio - headless generation core
pub struct CampaignStudio<B: CampaignBackend> {
    /// Configuration
    config: StudioConfig,
    /// Generation backend
    backend: Arc<B>,
    /// Current lifecycle state
    state: StudioState,
    /// Latest generated campaign, if any
    campaign: Option<CampaignSuggestion>,
    /// Latest submission error, if any
    error: Option<CampaignError>,
    /// Creative index with a variation request in flight
    iterating: Option<usize>,
    /// Current index into [`LOADING_PHASES`]
    loading_phase: usize,
    /// Monotonic counter stamped onto every spawned request
    generation: u64,
    /// Channel to send messages to the UI surface
    tx: mpsc::Sender<StudioMessage>,
    /// Spawned tasks report back through this channel
    completion_tx: mpsc::Sender<Completion>,
    completion_rx: mpsc::Receiver<Completion>,
}

impl<B: CampaignBackend + 'static> CampaignStudio<B> {
    /// Create a new studio with the given backend.
    pub fn new(backend: B, config: StudioConfig, tx: mpsc::Sender<StudioMessage>) -> Self {
        let (completion_tx, completion_rx) = mpsc::channel(16);

        Self {
            config,
            backend: Arc::new(backend),
            state: StudioState::Idle,
            campaign: None,
            error: None,
            iterating: None,
            loading_phase: 0,
            generation: 0,
            tx,
            completion_tx,
            completion_rx,
        }
    }

    /// Get current lifecycle state
    #[must_use]
    pub fn state(&self) -> StudioState {
        self.state
    }

    /// Get the resolved configuration
    #[must_use]
    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    /// The latest generated campaign, if one is available
    #[must_use]
    pub fn campaign(&self) -> Option<&CampaignSuggestion> {
        self.campaign.as_ref()
    }

    /// The latest submission error, if one is set
    #[must_use]
    pub fn error(&self) -> Option<&CampaignError> {
        self.error.as_ref()
    }

    /// The creative index with a variation request currently in flight
    #[must_use]
    pub fn iterating_index(&self) -> Option<usize> {
        self.iterating
    }

    /// The current loading status line, present only while loading
    #[must_use]
    pub fn loading_message(&self) -> Option<&'static str> {
        match self.state {
            StudioState::Loading => Some(LOADING_PHASES[self.loading_phase]),
            _ => None,
        }
    }

    /// Step to the next loading status line. Surfaces call this on their own
    /// cadence (see [`LOADING_PHASE_INTERVAL_MS`]); a no-op outside loading.
    pub fn advance_loading_phase(&mut self) {
        if self.state == StudioState::Loading {
            self.loading_phase = (self.loading_phase + 1) % LOADING_PHASES.len();
        }
    }

    /// Announce the studio to a freshly connected surface.
    pub async fn start(&mut self) {
        tracing::info!(model = %self.config.model, "Campaign studio ready");
        self.send(StudioMessage::State { state: self.state }).await;
    }

    /// Submit a URL for campaign generation.
    ///
    /// Any in-flight work is superseded, valid input or not. A malformed URL
    /// transitions straight to the error state without a remote call; a
    /// well-formed one clears the prior campaign, enters loading, and spawns
    /// the backend request.
    pub async fn submit(&mut self, url: &str) {
        self.generation += 1;
        self.iterating = None;

        let target = url.trim();
        if Url::parse(target).is_err() {
            tracing::debug!(url = %target, "Rejected malformed URL");
            self.error = Some(CampaignError::invalid_url());
            self.set_state(StudioState::Error).await;
            return;
        }

        self.campaign = None;
        self.error = None;
        self.loading_phase = 0;
        self.set_state(StudioState::Loading).await;

        tracing::info!(url = %target, "Submitting campaign request");

        let generation = self.generation;
        let target = target.to_string();
        let backend = Arc::clone(&self.backend);
        let completion_tx = self.completion_tx.clone();
        tokio::spawn(async move {
            let outcome = backend.generate_campaign(&target).await;
            let _ = completion_tx
                .send(Completion::Campaign {
                    generation,
                    outcome,
                })
                .await;
        });
    }

    /// Request variations for one creative of the current campaign.
    ///
    /// Preconditions: the studio is in the success state and `index` names an
    /// existing creative. Returns whether a request was spawned. Concurrent
    /// requests for different indices are tolerated; the iterating slot
    /// tracks the most recent one.
    pub async fn request_variations(&mut self, index: usize) -> bool {
        let (summary, original) = match self.campaign {
            Some(ref campaign) if self.state == StudioState::Success => {
                match campaign.ad_creatives.get(index) {
                    Some(creative) => (campaign.business_summary.clone(), creative.clone()),
                    None => {
                        tracing::warn!(index, "Variation request for a creative that does not exist");
                        return false;
                    }
                }
            }
            _ => {
                tracing::warn!(state = ?self.state, "Variation request without a campaign on screen");
                return false;
            }
        };

        self.iterating = Some(index);
        tracing::info!(index, "Requesting ad variations");

        let generation = self.generation;
        let backend = Arc::clone(&self.backend);
        let completion_tx = self.completion_tx.clone();
        tokio::spawn(async move {
            let outcome = backend.generate_variations(&summary, &original).await;
            let _ = completion_tx
                .send(Completion::Variations {
                    generation,
                    index,
                    outcome,
                })
                .await;
        });

        true
    }

    /// Apply any finished generation work.
    ///
    /// Call this regularly (e.g. once per frame). Returns true if there was
    /// activity.
    pub async fn poll_completions(&mut self) -> bool {
        // Collect first so applying can borrow self again.
        let mut completions = Vec::new();
        while let Ok(completion) = self.completion_rx.try_recv() {
            completions.push(completion);
        }

        if completions.is_empty() {
            return false;
        }

        for completion in completions {
            self.apply_completion(completion).await;
        }

        true
    }

    /// Suspend until the next completion arrives, then apply it.
    ///
    /// Returns true once a completion was processed, even one that turned out
    /// to be stale. Intended for headless use; frame loops should prefer
    /// [`Self::poll_completions`].
    pub async fn await_completion(&mut self) -> bool {
        match self.completion_rx.recv().await {
            Some(completion) => {
                self.apply_completion(completion).await;
                true
            }
            None => false,
        }
    }

    /// Discard the current campaign or error and return to idle.
    pub async fn reset(&mut self) {
        self.generation += 1;
        self.campaign = None;
        self.error = None;
        self.iterating = None;
        self.loading_phase = 0;
        self.set_state(StudioState::Idle).await;
    }

    /// Apply one finished generation task to studio state.
    async fn apply_completion(&mut self, completion: Completion) {
        match completion {
            Completion::Campaign {
                generation,
                outcome,
            } => {
                if generation != self.generation {
                    tracing::debug!(
                        generation,
                        current = self.generation,
                        "Discarding superseded campaign result"
                    );
                    return;
                }

                match outcome {
                    Ok(campaign) => {
                        tracing::info!(
                            creatives = campaign.ad_creatives.len(),
                            keywords = campaign.keywords.len(),
                            "Campaign generated"
                        );
                        self.campaign = Some(campaign);
                        self.error = None;
                        self.set_state(StudioState::Success).await;
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Campaign generation failed");
                        self.campaign = None;
                        self.error = Some(CampaignError::from_campaign_flow(&e));
                        self.set_state(StudioState::Error).await;
                    }
                }
            }

            Completion::Variations {
                generation,
                index,
                outcome,
            } => {
                if generation != self.generation {
                    tracing::debug!(
                        generation,
                        current = self.generation,
                        index,
                        "Discarding superseded variation result"
                    );
                    return;
                }

                match outcome {
                    Ok(variations) => {
                        let count = variations.len();
                        let applied = match self.campaign {
                            Some(ref mut campaign) => campaign.set_variations(index, variations),
                            None => false,
                        };
                        if applied {
                            tracing::info!(index, count, "Variations attached");
                            self.notify(
                                NotifyLevel::Success,
                                &format!("Added {} variations to ad creative {}", count, index + 1),
                            )
                            .await;
                        } else {
                            tracing::warn!(index, "Variation result had no matching creative");
                        }
                    }
                    Err(e) => {
                        let error = CampaignError::from_variation_flow(&e);
                        tracing::warn!(error = %e, index, "Variation generation failed");
                        self.send(StudioMessage::Notify {
                            level: NotifyLevel::Warning,
                            title: Some(error.title().to_string()),
                            message: error.to_string(),
                        })
                        .await;
                    }
                }

                // A different index in the slot means a newer request owns it.
                if self.iterating == Some(index) {
                    self.iterating = None;
                }
            }
        }
    }

    /// Set state and notify the surface
    async fn set_state(&mut self, state: StudioState) {
        self.state = state;
        self.send(StudioMessage::State { state }).await;
    }

    /// Send a notification
    async fn notify(&self, level: NotifyLevel, message: &str) {
        self.send(StudioMessage::Notify {
            level,
            title: None,
            message: message.to_string(),
        })
        .await;
    }

    /// Send a message to the UI surface
    async fn send(&self, msg: StudioMessage) {
        if let Err(e) = self.tx.send(msg).await {
            tracing::warn!("Failed to send message to surface: {}", e);
        }
    }
}
