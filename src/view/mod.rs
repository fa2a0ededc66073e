//! TUI rendering and terminal management (impure shell).
//!
//! Owns the terminal, the event loop, and the wiring between application
//! state and the sticky preview engine. The engine reads scroll geometry
//! through closures over shared state and writes previews into an
//! [`OverlaySurface`] the draw pass reads back.

pub mod overlay_host;
pub mod rows;

pub use overlay_host::{OverlaySurface, TextOverlayHost};

use crate::config::{KeyBindings, ResolvedConfig};
use crate::model::{ChatEntry, KeyAction};
use crate::state::{handle_scroll_action, AppState};
use crate::sticky::{RowSnapshot, StickyEngine};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Clear, Paragraph};
use ratatui::{Frame, Terminal};
use std::cell::{Cell, RefCell};
use std::io::{self, Stdout};
use std::rc::Rc;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during TUI operations.
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations.
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),
}

/// Main TUI application.
///
/// Generic over backend to support testing with TestBackend.
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    state: Rc<RefCell<AppState>>,
    engine: StickyEngine<TextOverlayHost>,
    surface: Rc<RefCell<OverlaySurface>>,
    /// Width rows are rendered at; shared with the engine's snapshot provider.
    render_width: Rc<Cell<u16>>,
    key_bindings: KeyBindings,
    tick_rate: Duration,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application.
    ///
    /// Sets up the terminal in raw mode with an alternate screen.
    pub fn new(entries: Vec<ChatEntry>, config: &ResolvedConfig) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self::with_terminal(terminal, entries, config))
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Build an application over an existing terminal. Performs no terminal
    /// mode changes; used directly by tests with a TestBackend.
    pub fn with_terminal(
        terminal: Terminal<B>,
        entries: Vec<ChatEntry>,
        config: &ResolvedConfig,
    ) -> Self {
        let state = Rc::new(RefCell::new(AppState::new(entries)));
        let surface = Rc::new(RefCell::new(OverlaySurface::default()));
        let render_width = Rc::new(Cell::new(80u16));

        let host = TextOverlayHost::new(Rc::clone(&surface), config.preview_max_lines);
        let scroll_state = Rc::clone(&state);
        let viewport_state = Rc::clone(&state);
        let snapshot_state = Rc::clone(&state);
        let snapshot_width = Rc::clone(&render_width);
        let engine = StickyEngine::new(
            host,
            Box::new(move || scroll_state.borrow().scroll_offset() as f64),
            Box::new(move || viewport_state.borrow().viewport_lines() as f64),
            Some(Box::new(move || {
                pinned_snapshot(&snapshot_state.borrow(), snapshot_width.get())
            })),
        );

        Self {
            terminal,
            state,
            engine,
            surface,
            render_width,
            key_bindings: KeyBindings::default(),
            tick_rate: Duration::from_millis(config.tick_rate_ms),
        }
    }

    /// Run the main event loop. Returns when the user quits.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.sync_viewport()?;
        self.draw()?;

        loop {
            if event::poll(self.tick_rate)? {
                match event::read()? {
                    Event::Key(key) => {
                        if self.handle_key(key) {
                            return Ok(());
                        }
                        self.draw()?;
                    }
                    Event::Resize(width, height) => {
                        self.handle_resize(width, height);
                        self.draw()?;
                    }
                    _ => {}
                }
            }
        }
    }

    /// Handle a single keyboard event. Returns true if the app should quit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Ctrl+C always quits, even if rebound.
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };
        debug!(?action, "key action");

        match action {
            KeyAction::Quit => true,
            action if action.is_scroll() => {
                handle_scroll_action(&mut self.state.borrow_mut(), action);
                self.engine.update();
                false
            }
            _ => false,
        }
    }

    /// Record new terminal dimensions and re-evaluate the pinned preview.
    fn handle_resize(&mut self, width: u16, height: u16) {
        self.render_width.set(width.max(1));
        self.state
            .borrow_mut()
            .set_viewport_lines(usize::from(height.saturating_sub(STATUS_BAR_LINES)));
        self.engine.update();
    }

    /// Pull the current terminal size into the state and engine.
    fn sync_viewport(&mut self) -> Result<(), TuiError> {
        let size = self.terminal.size()?;
        self.handle_resize(size.width, size.height);
        Ok(())
    }

    /// Render one frame: transcript, pinned preview strip, status bar.
    fn draw(&mut self) -> Result<(), TuiError> {
        let state = Rc::clone(&self.state);
        let surface = Rc::clone(&self.surface);

        self.terminal.draw(|frame| {
            let [transcript_area, status_area] = Layout::vertical([
                Constraint::Min(1),
                Constraint::Length(STATUS_BAR_LINES),
            ])
            .areas(frame.area());

            let state = state.borrow();
            render_transcript(frame, transcript_area, &state);
            render_overlay(frame, transcript_area, &surface.borrow());
            render_status_bar(frame, status_area, &state);
        })?;

        Ok(())
    }
}

/// Lines reserved at the bottom of the screen for the status bar.
const STATUS_BAR_LINES: u16 = 1;

/// Snapshot of the most recent user request for the engine.
///
/// The rendered source is only supplied while the row sits near the visible
/// window; once it scrolls far away the engine must fall back to its clone
/// cache, the same as a virtualized list dropping offscreen rows.
fn pinned_snapshot(state: &AppState, width: u16) -> Option<RowSnapshot<Text<'static>>> {
    let (index, top, height) = state.latest_request_geometry()?;
    let entry = state.entry(index)?;

    let source = row_near_window(state, top, height)
        .then(|| rows::render_entry(entry, width));

    Some(RowSnapshot {
        id: entry.id().clone(),
        top: top as f64,
        height: height as f64,
        source,
    })
}

/// True when the row overlaps the visible window extended by one viewport of
/// overscan in each direction.
fn row_near_window(state: &AppState, top: usize, height: usize) -> bool {
    let viewport = state.viewport_lines();
    let start = state.scroll_offset().saturating_sub(viewport);
    let end = state
        .scroll_offset()
        .saturating_add(viewport.saturating_mul(2));
    top < end && top + height > start
}

/// Render the visible slice of the transcript.
fn render_transcript(frame: &mut Frame, area: Rect, state: &AppState) {
    if area.height == 0 {
        return;
    }
    if state.entries().is_empty() {
        let placeholder = Paragraph::new(Line::from(Span::styled(
            "no entries",
            Style::default().fg(Color::DarkGray),
        )));
        frame.render_widget(placeholder, area);
        return;
    }

    let geometry = state.rows();
    let scroll = state.scroll_offset();
    let Some(first) = geometry.row_at(scroll) else {
        return;
    };

    let capacity = area.height as usize;
    let mut lines: Vec<Line<'static>> = Vec::with_capacity(capacity);
    let mut skip = scroll - geometry.top_of(first);
    let mut row = first;
    while lines.len() < capacity && row < geometry.len() {
        if let Some(entry) = state.entry(row) {
            let rendered = rows::render_entry(entry, area.width);
            for line in rendered.lines.into_iter().skip(skip) {
                if lines.len() == capacity {
                    break;
                }
                lines.push(line);
            }
        }
        skip = 0;
        row += 1;
    }

    frame.render_widget(Paragraph::new(Text::from(lines)), area);
}

/// Draw the pinned preview strip over the top of the transcript area.
fn render_overlay(frame: &mut Frame, area: Rect, surface: &OverlaySurface) {
    if !surface.is_visible() || surface.height() == 0 || area.height == 0 {
        return;
    }

    let strip = Rect {
        x: area.x,
        y: area.y,
        width: area.width,
        height: surface.height().min(area.height),
    };
    frame.render_widget(Clear, strip);

    let preview = Paragraph::new(Text::from(surface.lines().to_vec()))
        .style(Style::default().bg(Color::Indexed(236)));
    frame.render_widget(preview, strip);
}

/// One-line status bar: scroll position and key hints.
fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    if area.height == 0 {
        return;
    }

    let percent = scroll_percent(state.scroll_offset(), state.max_scroll_offset());

    // Hints stay terse so the whole bar fits a narrow terminal.
    let bar = Line::from(vec![
        Span::styled(
            format!(" {} entries ", state.entries().len()),
            Style::default().fg(Color::Black).bg(Color::Cyan),
        ),
        Span::raw(" j/k g/G q quit"),
        Span::styled(
            format!("  {percent:>3}% "),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(bar), area);
}

/// Scroll position as a percentage of the scrollable range. Widened
/// arithmetic so huge transcripts cannot overflow.
fn scroll_percent(offset: usize, max_scroll: usize) -> u64 {
    if max_scroll == 0 {
        100
    } else {
        (offset as u128 * 100 / max_scroll as u128) as u64
    }
}

/// Restore the terminal to its normal state.
///
/// Disables raw mode and leaves the alternate screen.
pub fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Initialize the TUI, run it to completion, and restore the terminal even
/// when the loop errors.
pub fn run_app(entries: Vec<ChatEntry>, config: &ResolvedConfig) -> Result<(), TuiError> {
    let mut app = TuiApp::new(entries, config)?;
    let result = app.run();
    restore_terminal()?;
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Role;
    use chrono::{TimeZone, Utc};
    use ratatui::backend::TestBackend;

    fn entry(id: &str, role: Role, lines: usize) -> ChatEntry {
        let text = (0..lines)
            .map(|i| format!("line {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        ChatEntry::new(
            crate::model::RequestId::new(id).unwrap(),
            role,
            text,
            Utc.with_ymd_and_hms(2026, 1, 5, 10, 0, 0).unwrap(),
        )
    }

    /// A short user request followed by a long assistant answer, so the
    /// request scrolls off the top well before the bottom is reached.
    fn long_transcript() -> Vec<ChatEntry> {
        vec![
            entry("req-1", Role::User, 1),
            entry("resp-1", Role::Assistant, 30),
        ]
    }

    fn app(entries: Vec<ChatEntry>, width: u16, height: u16) -> TuiApp<TestBackend> {
        let terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let config = ResolvedConfig::default();
        let mut app = TuiApp::with_terminal(terminal, entries, &config);
        app.handle_resize(width, height);
        app
    }

    fn press(app: &mut TuiApp<TestBackend>, code: KeyCode) -> bool {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn press_shift_g(app: &mut TuiApp<TestBackend>) -> bool {
        app.handle_key(KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT))
    }

    #[test]
    fn q_quits() {
        let mut app = app(long_transcript(), 40, 12);
        assert!(press(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn ctrl_c_always_quits() {
        let mut app = app(long_transcript(), 40, 12);
        assert!(app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn unbound_key_is_ignored() {
        let mut app = app(long_transcript(), 40, 12);
        assert!(!press(&mut app, KeyCode::Char('z')));
        assert_eq!(app.state.borrow().scroll_offset(), 0);
    }

    #[test]
    fn preview_hidden_while_request_on_screen() {
        let app = app(long_transcript(), 40, 12);
        assert!(!app.surface.borrow().is_visible());
    }

    #[test]
    fn scrolling_past_request_pins_it() {
        let mut app = app(long_transcript(), 40, 12);
        press_shift_g(&mut app);

        let surface = app.surface.borrow();
        assert!(surface.is_visible());
        let header: String = surface.lines()[0]
            .spans
            .iter()
            .map(|span| span.content.as_ref())
            .collect();
        assert!(header.contains("req-1"), "header: {header}");
    }

    #[test]
    fn scrolling_back_to_top_unpins() {
        let mut app = app(long_transcript(), 40, 12);
        press_shift_g(&mut app);
        press(&mut app, KeyCode::Char('g'));
        assert!(!app.surface.borrow().is_visible());
    }

    #[test]
    fn preview_survives_request_leaving_render_window() {
        // 1 + 100-line answer: at the bottom the request row is far outside
        // the overscan window, so the preview must come from the cache.
        let entries = vec![
            entry("req-1", Role::User, 1),
            entry("resp-1", Role::Assistant, 100),
        ];
        let mut app = app(entries, 40, 12);
        press_shift_g(&mut app);
        assert!(app.surface.borrow().is_visible());
    }

    #[test]
    fn transcript_without_user_entries_never_pins() {
        let entries = vec![entry("resp-1", Role::Assistant, 40)];
        let mut app = app(entries, 40, 12);
        press_shift_g(&mut app);
        assert!(!app.surface.borrow().is_visible());
    }

    #[test]
    fn latest_request_wins_over_earlier_ones() {
        let entries = vec![
            entry("req-1", Role::User, 1),
            entry("resp-1", Role::Assistant, 10),
            entry("req-2", Role::User, 1),
            entry("resp-2", Role::Assistant, 30),
        ];
        let mut app = app(entries, 40, 12);
        press_shift_g(&mut app);

        let surface = app.surface.borrow();
        assert!(surface.is_visible());
        let header: String = surface.lines()[0]
            .spans
            .iter()
            .map(|span| span.content.as_ref())
            .collect();
        assert!(header.contains("req-2"), "header: {header}");
    }

    #[test]
    fn resize_reclamps_scroll_and_updates_engine() {
        let mut app = app(long_transcript(), 40, 12);
        press_shift_g(&mut app);
        assert!(app.surface.borrow().is_visible());

        // Tall enough that everything fits: nothing left to pin.
        app.handle_resize(40, 60);
        assert_eq!(app.state.borrow().scroll_offset(), 0);
        assert!(!app.surface.borrow().is_visible());
    }

    #[test]
    fn draw_renders_preview_and_status_bar() {
        let mut app = app(long_transcript(), 40, 12);
        press_shift_g(&mut app);
        app.draw().unwrap();

        let buffer = app.terminal.backend().buffer().clone();
        let screen: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        assert!(screen.contains("req-1"));
        // The whole bar, percent included, must fit the 40-column backend.
        assert!(screen.contains("q quit"));
        assert!(screen.contains("100%"));
    }

    #[test]
    fn scroll_percent_is_overflow_safe() {
        assert_eq!(scroll_percent(0, 10), 0);
        assert_eq!(scroll_percent(5, 10), 50);
        assert_eq!(scroll_percent(usize::MAX, usize::MAX), 100);
        assert_eq!(scroll_percent(usize::MAX / 2, usize::MAX), 49);
        assert_eq!(scroll_percent(3, 0), 100);
    }

    #[test]
    fn draw_on_empty_transcript_shows_placeholder() {
        let mut app = app(Vec::new(), 40, 12);
        app.draw().unwrap();

        let buffer = app.terminal.backend().buffer().clone();
        let screen: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        assert!(screen.contains("no entries"));
    }
}
