//! Ratatui-based portal dashboard.
//!
//! Four panels in a 2×2 grid: spiral view (with filter readout), document
//! search, chat, and overview. One logical thread services key events and
//! completions of outstanding requests; the network itself runs on worker
//! threads that report back over an mpsc channel drained each tick.

pub mod widgets;
pub mod worker;

use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use miette::IntoDiagnostic;

use crate::api::{DocHit, Overview, PortalClient, SearchMode};
use crate::config::PortalConfig;
use crate::message::ChatEntry;
use crate::spiral::FilterState;
use crate::view::{PanelState, SpiralViewModel};
use worker::Update;

/// Which panel receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Spiral,
    Docs,
    Chat,
    Overview,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Self::Spiral => Self::Docs,
            Self::Docs => Self::Chat,
            Self::Chat => Self::Overview,
            Self::Overview => Self::Spiral,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Spiral => Self::Overview,
            Self::Docs => Self::Spiral,
            Self::Chat => Self::Docs,
            Self::Overview => Self::Chat,
        }
    }
}

/// TUI application state.
pub struct PortalTui {
    client: PortalClient,
    well_id: String,
    spiral_stage: String,
    tx: Sender<Update>,
    rx: Receiver<Update>,

    pub(crate) spiral: SpiralViewModel,
    pub(crate) overview: PanelState<Overview>,
    pub(crate) docs: PanelState<Vec<DocHit>>,
    pub(crate) docs_input: String,
    pub(crate) docs_mode: SearchMode,
    pub(crate) chat: PanelState<()>,
    pub(crate) chat_log: Vec<ChatEntry>,
    pub(crate) chat_input: String,
    pub(crate) focus: Focus,

    should_quit: bool,
}

impl PortalTui {
    pub fn new(config: &PortalConfig) -> Self {
        let (tx, rx) = mpsc::channel();
        let mut spiral = SpiralViewModel::new();
        spiral.filter = FilterState {
            tag_case: config.tag_case,
            ..FilterState::default()
        };
        Self {
            client: PortalClient::new(&config.base_url, config.timeout()),
            well_id: config.well_id.clone(),
            spiral_stage: config.spiral_stage.clone(),
            tx,
            rx,
            spiral,
            overview: PanelState::new(),
            docs: PanelState::new(),
            docs_input: String::new(),
            docs_mode: SearchMode::default(),
            chat: PanelState::new(),
            chat_log: vec![ChatEntry::notice(
                "Tab switches panels. Type to edit the focused input. Esc quits.",
            )],
            chat_input: String::new(),
            focus: Focus::Spiral,
            should_quit: false,
        }
    }

    pub(crate) fn well_id(&self) -> &str {
        &self.well_id
    }

    /// Run the event loop until quit.
    pub fn run(&mut self) -> miette::Result<()> {
        let mut terminal = ratatui::init();

        self.refresh_spiral();
        self.refresh_overview();

        loop {
            self.drain_updates();

            terminal
                .draw(|frame| widgets::render(frame, self))
                .into_diagnostic()?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(100)).into_diagnostic()? {
                if let Event::Key(key) = event::read().into_diagnostic()? {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    self.handle_key(key.code, key.modifiers);
                }
            }
        }

        ratatui::restore();
        Ok(())
    }

    /// Apply all pending worker completions.
    fn drain_updates(&mut self) {
        while let Ok(update) = self.rx.try_recv() {
            self.apply_update(update);
        }
    }

    fn apply_update(&mut self, update: Update) {
        match update {
            Update::Spiral { seq, result } => {
                self.spiral.complete_fetch(seq, result);
            }
            Update::Overview { seq, result } => {
                self.overview.complete_fetch(seq, result);
            }
            Update::Docs { seq, result } => {
                self.docs.complete_fetch(seq, result);
            }
            Update::Answer { seq, result } => {
                let applied = self.chat.complete_fetch(seq, result.clone().map(|_| ()));
                if applied {
                    match result {
                        Ok(answer) => self.chat_log.push(ChatEntry::well(answer)),
                        Err(e) => self
                            .chat_log
                            .push(ChatEntry::notice(format!("failed to load: {e}"))),
                    }
                }
            }
        }
    }

    // -- request dispatch --

    fn refresh_spiral(&mut self) {
        let seq = self.spiral.begin_fetch();
        worker::spawn_spiral(
            self.client.clone(),
            self.tx.clone(),
            seq,
            self.well_id.clone(),
            self.spiral_stage.clone(),
        );
    }

    fn refresh_overview(&mut self) {
        let seq = self.overview.begin_fetch();
        worker::spawn_overview(self.client.clone(), self.tx.clone(), seq, self.well_id.clone());
    }

    fn run_doc_search(&mut self) {
        if self.docs_input.is_empty() {
            return;
        }
        let seq = self.docs.begin_fetch();
        worker::spawn_docs(
            self.client.clone(),
            self.tx.clone(),
            seq,
            self.well_id.clone(),
            self.docs_input.clone(),
            self.docs_mode,
        );
    }

    fn send_question(&mut self) {
        let question = self.chat_input.trim().to_string();
        self.chat_input.clear();
        if question.is_empty() {
            return;
        }
        self.chat_log.push(ChatEntry::user(&question));
        let seq = self.chat.begin_fetch();
        worker::spawn_query(
            self.client.clone(),
            self.tx.clone(),
            seq,
            self.well_id.clone(),
            question,
        );
    }

    // -- key handling --

    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        match code {
            KeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('r') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.refresh_spiral();
                self.refresh_overview();
                return;
            }
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return;
            }
            KeyCode::BackTab => {
                self.focus = self.focus.prev();
                return;
            }
            _ => {}
        }

        match self.focus {
            Focus::Spiral => self.handle_spiral_key(code),
            Focus::Docs => self.handle_docs_key(code),
            Focus::Chat => self.handle_chat_key(code),
            Focus::Overview => {
                if code == KeyCode::Enter {
                    self.refresh_overview();
                }
            }
        }
    }

    fn handle_spiral_key(&mut self, code: KeyCode) {
        match code {
            // Filter edits replace the state wholesale.
            KeyCode::Char(c) => {
                let mut filter = self.spiral.filter.clone();
                filter.tag.push(c);
                self.spiral.set_filter(filter);
            }
            KeyCode::Backspace => {
                let mut filter = self.spiral.filter.clone();
                filter.tag.pop();
                self.spiral.set_filter(filter);
            }
            KeyCode::Up => {
                let mut filter = self.spiral.filter.clone();
                filter.stage = filter.stage.cycle();
                self.spiral.set_filter(filter);
            }
            KeyCode::Down => {
                let mut filter = self.spiral.filter.clone();
                filter.layer = filter.layer.cycle();
                self.spiral.set_filter(filter);
            }
            KeyCode::Right => self.spiral.move_selection(1),
            KeyCode::Left => self.spiral.move_selection(-1),
            KeyCode::Enter => self.refresh_spiral(),
            _ => {}
        }
    }

    fn handle_docs_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(c) => self.docs_input.push(c),
            KeyCode::Backspace => {
                self.docs_input.pop();
            }
            KeyCode::Up | KeyCode::Down => {
                self.docs_mode = match self.docs_mode {
                    SearchMode::Literal => SearchMode::Semantic,
                    SearchMode::Semantic => SearchMode::Literal,
                };
            }
            KeyCode::Enter => self.run_doc_search(),
            _ => {}
        }
    }

    fn handle_chat_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(c) => self.chat_input.push(c),
            KeyCode::Backspace => {
                self.chat_input.pop();
            }
            KeyCode::Enter => self.send_question(),
            _ => {}
        }
    }
}

/// Launch the dashboard for the configured well.
pub fn launch(config: &PortalConfig) -> miette::Result<()> {
    let mut tui = PortalTui::new(config);
    tui.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::{Layer, MemoryPoint, PointMeta, Stage};
    use chrono::{TimeZone, Utc};

    fn tui() -> PortalTui {
        PortalTui::new(&PortalConfig::default())
    }

    fn point(id: &str) -> MemoryPoint {
        MemoryPoint {
            id: id.into(),
            summary: String::new(),
            timestamp: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
            gravity_score: 1.0,
            stage: Stage::Interpret,
            layer: Layer::Raw,
            meta: PointMeta::default(),
        }
    }

    #[test]
    fn focus_cycles_through_all_panels() {
        let mut f = Focus::Spiral;
        for _ in 0..4 {
            f = f.next();
        }
        assert_eq!(f, Focus::Spiral);
        assert_eq!(Focus::Spiral.prev(), Focus::Overview);
    }

    #[test]
    fn typing_on_spiral_panel_edits_tag_filter() {
        let mut app = tui();
        app.handle_key(KeyCode::Char('a'), KeyModifiers::NONE);
        app.handle_key(KeyCode::Char('l'), KeyModifiers::NONE);
        assert_eq!(app.spiral.filter.tag, "al");
        app.handle_key(KeyCode::Backspace, KeyModifiers::NONE);
        assert_eq!(app.spiral.filter.tag, "a");
    }

    #[test]
    fn stale_spiral_update_is_ignored() {
        let mut app = tui();
        let first = app.spiral.begin_fetch();
        let _second = app.spiral.begin_fetch();
        app.apply_update(Update::Spiral {
            seq: first,
            result: Ok(vec![point("stale")]),
        });
        assert!(app.spiral.panel.is_loading());
        assert!(app.spiral.panel.data.is_empty());
    }

    #[test]
    fn failed_answer_becomes_chat_notice() {
        let mut app = tui();
        let baseline = app.chat_log.len();
        let seq = app.chat.begin_fetch();
        app.apply_update(Update::Answer {
            seq,
            result: Err("boom".into()),
        });
        assert_eq!(app.chat_log.len(), baseline + 1);
        assert!(app.chat_log.last().unwrap().text().contains("boom"));
    }

    #[test]
    fn superseded_answer_is_dropped() {
        let mut app = tui();
        let baseline = app.chat_log.len();
        let first = app.chat.begin_fetch();
        let second = app.chat.begin_fetch();
        app.apply_update(Update::Answer {
            seq: first,
            result: Ok("old answer".into()),
        });
        assert_eq!(app.chat_log.len(), baseline);
        app.apply_update(Update::Answer {
            seq: second,
            result: Ok("new answer".into()),
        });
        assert_eq!(app.chat_log.last().unwrap().text(), "new answer");
    }
}
