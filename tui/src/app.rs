//! Main Application
//!
//! The App struct manages the TUI lifecycle as a thin display client:
//! - Event loop (keyboard, mouse, resize)
//! - StudioClient for campaign generation
//! - DisplayState for notices and the lifecycle mirror
//!
//! # Architecture
//!
//! The App is a thin client that:
//! 1. Converts key presses to studio calls
//! 2. Pumps the studio's completion queue every frame
//! 3. Receives `StudioMessage`s and updates DisplayState
//! 4. Renders from the studio's read accessors
//!
//! The screen is four bands: the URL field, the main panel (hint, loading
//! line, campaign, or error - whichever the lifecycle state calls for), a
//! transient notice line, and a status bar. Tab moves focus between the URL
//! field and the results panel; generation finishing moves it for you.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, EventStream, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind,
};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Terminal;

use studio_core::{
    NotifyLevel, StudioMessage, StudioState, EXPORT_FILE_NAME, IDLE_HINT, LOADING_PHASES,
    LOADING_PHASE_INTERVAL_MS,
};

use crate::display::DisplayState;
use crate::studio_client::StudioClient;
use crate::theme::{self, Theme};

/// URL field height (single line plus borders)
const INPUT_HEIGHT: u16 = 3;

/// Notice line height
const NOTICE_HEIGHT: u16 = 1;

/// Status bar height
const STATUS_HEIGHT: u16 = 1;

/// File the `c` key writes all ad creatives to as plain text
const CREATIVES_FILE_NAME: &str = "ad-creatives.txt";

/// File the `k` key writes all keywords to as plain text
const KEYWORDS_FILE_NAME: &str = "keywords.txt";

/// Which band receives non-global key input
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Focus {
    /// Keystrokes edit the URL field
    Input,
    /// Keystrokes drive the results panel
    Results,
}

/// Main application state
pub struct App {
    // === Core State ===
    /// Is the app still running?
    running: bool,

    // === Studio Integration ===
    /// Client for driving the embedded studio
    studio: StudioClient,
    /// Display state derived from StudioMessages
    display: DisplayState,

    // === UI State ===
    /// Active color palette
    theme: Theme,
    /// Which band has focus
    focus: Focus,
    /// URL being typed
    input_buffer: String,
    /// Results scroll position (lines from the top, 0 = top)
    scroll_offset: usize,
    /// Total wrapped lines in the main panel (for scroll bounds)
    total_lines: usize,

    // === Timing ===
    /// Last frame time
    last_frame: Instant,
    /// Time accumulated towards the next loading phase step
    loading_ticker: Duration,

    // === Misc State ===
    /// Terminal size
    size: (u16, u16),
}

impl App {
    /// Create a new App instance
    pub fn new() -> anyhow::Result<Self> {
        let size = crossterm::terminal::size()?;
        let studio = StudioClient::new()?;

        Ok(Self {
            running: true,
            studio,
            display: DisplayState::new(),
            theme: Theme::load(),
            focus: Focus::Input,
            input_buffer: String::new(),
            scroll_offset: 0,
            total_lines: 0,
            last_frame: Instant::now(),
            loading_ticker: Duration::ZERO,
            size,
        })
    }

    /// Main event loop
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        // Target ~10 FPS; plenty for text panels and the loading ticker
        let frame_duration = Duration::from_millis(100);

        // Create async event stream for non-blocking terminal events
        let mut event_stream = EventStream::new();

        self.studio.start().await;

        // Render initial frame immediately so user sees UI
        self.render(terminal)?;

        while self.running {
            let frame_start = Instant::now();

            tokio::select! {
                biased;

                // Check for terminal events - highest priority
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        match event {
                            // Only handle Press events (not Release or Repeat)
                            Event::Key(key) if key.kind == KeyEventKind::Press => {
                                self.handle_key(key).await
                            }
                            Event::Mouse(mouse) => self.handle_mouse(mouse),
                            Event::Resize(w, h) => self.size = (w, h),
                            _ => {}
                        }
                    }
                }

                // Frame tick
                _ = tokio::time::sleep(Duration::from_millis(16)) => {}
            }

            // Apply finished generation work
            self.studio.poll_completions().await;

            // Receive and process messages from the studio
            self.process_studio_messages();

            // Update notice expiry and the loading ticker
            self.update();

            // Render
            self.render(terminal)?;

            // Frame rate limiting
            let elapsed = frame_start.elapsed();
            if elapsed < frame_duration {
                tokio::time::sleep(frame_duration - elapsed).await;
            }
        }

        Ok(())
    }

    /// Process all pending messages from the studio
    fn process_studio_messages(&mut self) {
        for msg in self.studio.recv_all() {
            // React to lifecycle transitions before the mirror moves
            if let StudioMessage::State { state } = &msg {
                self.on_state_change(*state);
            }

            self.display.apply_message(msg);
        }
    }

    /// Move focus and scroll for a lifecycle transition
    fn on_state_change(&mut self, state: StudioState) {
        if state == self.display.studio_state {
            return;
        }
        match state {
            // Fresh results: put the keyboard on the results panel, from the top
            StudioState::Success => {
                self.focus = Focus::Results;
                self.scroll_offset = 0;
            }
            // Errors are fixed by editing the URL
            StudioState::Error => {
                self.focus = Focus::Input;
            }
            StudioState::Idle | StudioState::Loading => {}
        }
    }

    /// Update timers: notice expiry and the loading phase rotation
    fn update(&mut self) {
        let now = Instant::now();
        let delta = now - self.last_frame;
        self.last_frame = now;

        self.display.update();

        if self.studio.state() == StudioState::Loading {
            self.loading_ticker += delta;
            let interval = Duration::from_millis(LOADING_PHASE_INTERVAL_MS);
            while self.loading_ticker >= interval {
                self.loading_ticker -= interval;
                self.studio.advance_loading_phase();
            }
        } else {
            self.loading_ticker = Duration::ZERO;
        }
    }

    /// Handle keyboard input
    async fn handle_key(&mut self, key: event::KeyEvent) {
        // Global bindings first
        match key.code {
            KeyCode::Esc => {
                self.running = false;
                return;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.running = false;
                return;
            }
            KeyCode::Char('t') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.toggle_theme();
                return;
            }
            KeyCode::Tab => {
                self.focus = match self.focus {
                    Focus::Input => Focus::Results,
                    Focus::Results => Focus::Input,
                };
                return;
            }
            _ => {}
        }

        match self.focus {
            Focus::Input => self.handle_input_key(key).await,
            Focus::Results => self.handle_results_key(key).await,
        }
    }

    /// Keys while the URL field has focus
    async fn handle_input_key(&mut self, key: event::KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                // An empty field is a no-op, like a disabled submit button
                if !self.input_buffer.trim().is_empty() {
                    let url = self.input_buffer.clone();
                    self.studio.submit(&url).await;
                }
            }
            KeyCode::Char(c) => self.input_buffer.push(c),
            KeyCode::Backspace => {
                self.input_buffer.pop();
            }
            _ => {}
        }
    }

    /// Keys while the results panel has focus
    async fn handle_results_key(&mut self, key: event::KeyEvent) {
        match key.code {
            KeyCode::Up => self.scroll_up(1),
            KeyCode::Down => self.scroll_down(1),
            KeyCode::PageUp => self.scroll_up(self.page_size()),
            KeyCode::PageDown => self.scroll_down(self.page_size()),

            KeyCode::Char('q') => self.running = false,

            KeyCode::Char('r') => {
                self.studio.reset().await;
                self.input_buffer.clear();
                self.focus = Focus::Input;
                self.scroll_offset = 0;
            }

            KeyCode::Char('e') => self.export_campaign(),
            KeyCode::Char('c') => self.copy_creatives(),
            KeyCode::Char('k') => self.copy_keywords(),

            // Digits map to creatives, 1-based like the on-screen numbering
            KeyCode::Char(c @ '1'..='9') => {
                let index = (c as usize) - ('1' as usize);
                self.request_variations(index).await;
            }

            _ => {}
        }
    }

    /// Handle mouse input
    fn handle_mouse(&mut self, mouse: event::MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollUp => self.scroll_up(3),
            MouseEventKind::ScrollDown => self.scroll_down(3),
            _ => {}
        }
    }

    /// Ask the studio for variations, with surface-level nudges for the
    /// cases that never reach it
    async fn request_variations(&mut self, index: usize) {
        if self.studio.iterating_index().is_some() {
            self.display.push_notice(
                NotifyLevel::Info,
                None,
                "A variation request is already running",
            );
            return;
        }

        if !self.studio.request_variations(index).await {
            self.display.push_notice(
                NotifyLevel::Info,
                None,
                format!("No ad creative {} to expand", index + 1),
            );
        }
    }

    /// Write the campaign as pretty JSON next to the process
    fn export_campaign(&mut self) {
        let Some(campaign) = self.studio.campaign() else {
            self.display
                .push_notice(NotifyLevel::Info, None, "Nothing to export yet");
            return;
        };

        match campaign.to_pretty_json() {
            Ok(json) => self.write_artifact(EXPORT_FILE_NAME, &json, "Campaign plan"),
            Err(e) => {
                tracing::warn!(error = %e, "Export serialization failed");
                self.display.push_notice(
                    NotifyLevel::Error,
                    Some("Export Failed".to_string()),
                    e.to_string(),
                );
            }
        }
    }

    /// Write all creatives as plain text
    fn copy_creatives(&mut self) {
        let Some(campaign) = self.studio.campaign() else {
            self.display
                .push_notice(NotifyLevel::Info, None, "Nothing to copy yet");
            return;
        };

        let text = campaign.creatives_as_text();
        self.write_artifact(CREATIVES_FILE_NAME, &text, "Ad creatives");
    }

    /// Write all keywords as plain text
    fn copy_keywords(&mut self) {
        let Some(campaign) = self.studio.campaign() else {
            self.display
                .push_notice(NotifyLevel::Info, None, "Nothing to copy yet");
            return;
        };

        let text = campaign.keywords_as_text();
        self.write_artifact(KEYWORDS_FILE_NAME, &text, "Keywords");
    }

    /// Write text to the working directory and confirm with a timestamped
    /// notice
    fn write_artifact(&mut self, file_name: &str, contents: &str, what: &str) {
        match std::fs::write(file_name, contents) {
            Ok(()) => {
                let stamp = chrono::Local::now().format("%H:%M:%S");
                tracing::info!(file = file_name, "{what} written");
                self.display.push_notice(
                    NotifyLevel::Success,
                    None,
                    format!("{what} saved to {file_name} at {stamp}"),
                );
            }
            Err(e) => {
                tracing::warn!(error = %e, file = file_name, "Artifact write failed");
                self.display.push_notice(
                    NotifyLevel::Error,
                    Some("Save Failed".to_string()),
                    format!("Could not write {file_name}: {e}"),
                );
            }
        }
    }

    /// Flip between the dark and light palettes and remember the choice
    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        theme::persist(self.theme.kind);
    }

    // ========================================================================
    // Scrolling
    // ========================================================================

    fn scroll_up(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    fn scroll_down(&mut self, lines: usize) {
        let max_scroll = self.total_lines.saturating_sub(self.viewport_height());
        self.scroll_offset = (self.scroll_offset + lines).min(max_scroll);
    }

    /// Inner height of the main panel
    fn viewport_height(&self) -> usize {
        self.size
            .1
            .saturating_sub(INPUT_HEIGHT + NOTICE_HEIGHT + STATUS_HEIGHT + 2) as usize
    }

    fn page_size(&self) -> usize {
        (self.viewport_height() / 2).max(1)
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Render the UI
    fn render(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        // Wrap width tracks the terminal, so lines are rebuilt every frame
        let lines = self.main_lines();
        self.total_lines = lines.len();

        let max_scroll = self.total_lines.saturating_sub(self.viewport_height());
        if self.scroll_offset > max_scroll {
            self.scroll_offset = max_scroll;
        }

        terminal.draw(|frame| {
            let area = frame.area();
            frame.render_widget(
                Block::default().style(
                    Style::default()
                        .bg(self.theme.background)
                        .fg(self.theme.text),
                ),
                area,
            );

            let bands = Layout::default()
                .direction(Direction::Vertical)
                .constraints(vec![
                    Constraint::Length(INPUT_HEIGHT),
                    Constraint::Min(1),
                    Constraint::Length(NOTICE_HEIGHT),
                    Constraint::Length(STATUS_HEIGHT),
                ])
                .split(area);

            self.draw_input(frame, bands[0]);
            self.draw_main(frame, bands[1], &lines);
            self.draw_notice(frame, bands[2]);
            self.draw_status(frame, bands[3]);
        })?;

        Ok(())
    }

    /// Draw the URL field
    fn draw_input(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let theme = &self.theme;
        let focused = self.focus == Focus::Input;
        let border = if focused { theme.accent } else { theme.border };

        // Keep the tail visible once the URL outgrows the field
        let width = area.width.saturating_sub(3) as usize;
        let typed = self.input_buffer.chars().count();
        let mut shown: String = self
            .input_buffer
            .chars()
            .skip(typed.saturating_sub(width))
            .collect();
        if focused {
            shown.push('_');
        }

        let input = Paragraph::new(Line::styled(shown, Style::default().fg(theme.text))).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(" Website URL ")
                .title_style(Style::default().fg(theme.accent)),
        );
        frame.render_widget(input, area);
    }

    /// Draw the main panel: the visible slice of the pre-wrapped lines
    fn draw_main(&self, frame: &mut ratatui::Frame<'_>, area: Rect, lines: &[Line<'static>]) {
        let theme = &self.theme;
        let state = self.display.studio_state;

        let (title, border) = match state {
            StudioState::Idle => (" AdForge ".to_string(), theme.border),
            StudioState::Loading => (" Generating ".to_string(), theme.accent),
            StudioState::Success => (
                " Campaign Plan ".to_string(),
                if self.focus == Focus::Results {
                    theme.accent
                } else {
                    theme.border
                },
            ),
            StudioState::Error => (
                match self.studio.error() {
                    Some(error) => format!(" {} ", error.title()),
                    None => " Error ".to_string(),
                },
                theme.error,
            ),
        };
        let title_color = if state == StudioState::Error {
            theme.error
        } else {
            theme.accent
        };

        let height = area.height.saturating_sub(2) as usize;
        let visible: Vec<Line<'static>> = lines
            .iter()
            .skip(self.scroll_offset)
            .take(height)
            .cloned()
            .collect();

        let panel = Paragraph::new(visible).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(title)
                .title_style(Style::default().fg(title_color).add_modifier(Modifier::BOLD)),
        );
        frame.render_widget(panel, area);
    }

    /// Draw the transient notice line
    fn draw_notice(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let Some(notice) = self.display.latest_notice() else {
            return;
        };
        let theme = &self.theme;

        let color = match notice.level {
            NotifyLevel::Info => theme.text_dim,
            NotifyLevel::Warning => theme.warning,
            NotifyLevel::Error => theme.error,
            NotifyLevel::Success => theme.success,
        };

        let line = Line::from(vec![
            Span::styled(
                format!(" {}: ", notice.label()),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(notice.message.clone(), Style::default().fg(color)),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    /// Draw the status bar
    fn draw_status(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let theme = &self.theme;
        let state = self.display.studio_state;
        let focus = match self.focus {
            Focus::Input => "input",
            Focus::Results => "results",
        };

        let mut spans = vec![
            Span::styled(
                format!(" {} ", state.description()),
                Style::default().fg(theme.background).bg(theme.accent),
            ),
            Span::raw(" "),
            Span::styled(
                self.studio.model().to_string(),
                Style::default().fg(theme.text_dim),
            ),
            Span::raw("  "),
            Span::styled(format!("focus: {focus}"), Style::default().fg(theme.text_dim)),
        ];

        if self.total_lines > self.viewport_height() {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                format!("line {}/{}", self.scroll_offset + 1, self.total_lines),
                Style::default().fg(theme.text_dim),
            ));
        }

        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            "Tab focus | Ctrl+T theme | Esc quit",
            Style::default().fg(theme.text_dim),
        ));

        frame.render_widget(
            Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.panel)),
            area,
        );
    }

    // ========================================================================
    // Main Panel Content
    // ========================================================================

    /// Build the main panel's wrapped lines for the current lifecycle state
    fn main_lines(&self) -> Vec<Line<'static>> {
        let width = (self.size.0.saturating_sub(4) as usize).max(20);

        match self.display.studio_state {
            StudioState::Idle => self.idle_lines(width),
            StudioState::Loading => self.loading_lines(),
            StudioState::Success => self.campaign_lines(width),
            StudioState::Error => self.error_lines(width),
        }
    }

    fn idle_lines(&self, width: usize) -> Vec<Line<'static>> {
        let dim = Style::default().fg(self.theme.text_dim);

        let mut lines = vec![Line::default()];
        for part in textwrap::wrap(IDLE_HINT, width) {
            lines.push(Line::styled(part.to_string(), dim));
        }
        lines.push(Line::default());
        lines.push(Line::styled(
            "Type a full URL (https://...) and press Enter.".to_string(),
            dim,
        ));
        lines
    }

    fn loading_lines(&self) -> Vec<Line<'static>> {
        let message = self.studio.loading_message().unwrap_or(LOADING_PHASES[0]);

        vec![
            Line::default(),
            Line::styled(
                message.to_string(),
                Style::default().fg(self.theme.accent),
            ),
            Line::default(),
            Line::styled(
                "This usually takes a few seconds.".to_string(),
                Style::default().fg(self.theme.text_dim),
            ),
        ]
    }

    fn error_lines(&self, width: usize) -> Vec<Line<'static>> {
        let Some(error) = self.studio.error() else {
            return Vec::new();
        };
        let theme = &self.theme;

        let mut lines = vec![Line::default()];
        for part in textwrap::wrap(error.detail(), width) {
            lines.push(Line::styled(
                part.to_string(),
                Style::default().fg(theme.text),
            ));
        }
        lines.push(Line::default());

        let hint = if error.recoverable_by_resubmit() {
            "Fix the URL above and press Enter to retry."
        } else {
            "Set GEMINI_API_KEY and restart adforge."
        };
        lines.push(Line::styled(
            hint.to_string(),
            Style::default().fg(theme.text_dim),
        ));
        lines
    }

    fn campaign_lines(&self, width: usize) -> Vec<Line<'static>> {
        let Some(campaign) = self.studio.campaign() else {
            return Vec::new();
        };
        let theme = &self.theme;

        let heading = Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD);
        let body = Style::default().fg(theme.text);
        let dim = Style::default().fg(theme.text_dim);

        let mut lines = Vec::new();

        lines.push(Line::styled("Business Summary".to_string(), heading));
        for part in textwrap::wrap(&campaign.business_summary, width) {
            lines.push(Line::styled(part.to_string(), body));
        }
        lines.push(Line::default());

        lines.push(Line::styled("Ad Creatives".to_string(), heading));
        for (index, creative) in campaign.ad_creatives.iter().enumerate() {
            lines.push(Line::default());

            let mut header = vec![Span::styled(
                format!("{}. {}", index + 1, creative.headline),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            )];
            if !creative.within_soft_limits() {
                header.push(Span::styled(
                    "  [over limit]".to_string(),
                    Style::default().fg(theme.warning),
                ));
            }
            if self.studio.iterating_index() == Some(index) {
                header.push(Span::styled(
                    "  (generating variations...)".to_string(),
                    Style::default().fg(theme.accent),
                ));
            }
            lines.push(Line::from(header));

            for part in textwrap::wrap(&creative.description, width.saturating_sub(3)) {
                lines.push(Line::styled(format!("   {part}"), body));
            }

            if let Some(variations) = &creative.variations {
                for (v_index, variation) in variations.iter().enumerate() {
                    lines.push(Line::styled(
                        format!("   Variation {}: {}", v_index + 1, variation.headline),
                        Style::default().fg(theme.accent),
                    ));
                    for part in textwrap::wrap(&variation.description, width.saturating_sub(6)) {
                        lines.push(Line::styled(format!("      {part}"), dim));
                    }
                }
            }
        }
        lines.push(Line::default());

        lines.push(Line::styled("Keywords".to_string(), heading));
        for keyword in &campaign.keywords {
            lines.push(Line::from(vec![
                Span::styled(format!("• {}", keyword.keyword), body),
                Span::styled(
                    format!("  ({}, Volume: {})", keyword.match_type, keyword.search_volume),
                    dim,
                ),
            ]));
        }
        lines.push(Line::default());

        lines.push(Line::styled("Target Audiences".to_string(), heading));
        for audience in &campaign.audience_suggestions {
            let opts = textwrap::Options::new(width)
                .initial_indent("• ")
                .subsequent_indent("  ");
            for part in textwrap::wrap(audience, opts) {
                lines.push(Line::styled(part.to_string(), body));
            }
        }

        lines.push(Line::default());
        lines.push(Line::styled(
            "1-9 variations | e export | c copy ads | k copy keywords | r new search | q quit"
                .to_string(),
            dim,
        ));

        lines
    }
}
