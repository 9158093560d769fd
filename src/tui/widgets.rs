//! Panel rendering for the portal dashboard.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Circle};
use ratatui::widgets::{Block, Borders, Paragraph, Sparkline, Wrap};

use crate::message::ChatEntry;
use crate::point::{Layer, Stage};
use crate::view::FetchState;

use super::{Focus, PortalTui};

// Marker radii, from the original portal rendering.
const MARKER_RADIUS: f64 = 6.0;
const SELECTED_RADIUS: f64 = 8.0;
const TRUTH_RING_RADIUS: f64 = 12.0;

fn stage_color(stage: Stage) -> Color {
    match stage {
        Stage::Interpret => Color::LightBlue,
        Stage::Reflect => Color::Yellow,
    }
}

fn panel_block(title: &str, focused: bool) -> Block<'_> {
    let style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(format!(" {title} "))
}

/// The fixed "panel unavailable" line for a non-ready fetch state, or `None`
/// when the panel should show its content.
fn unavailable_line(state: &FetchState, idle_hint: &str) -> Option<Line<'static>> {
    match state {
        FetchState::Idle => Some(Line::from(Span::styled(
            idle_hint.to_string(),
            Style::default().fg(Color::DarkGray),
        ))),
        FetchState::Loading => Some(Line::from(Span::styled(
            "Loading...",
            Style::default().fg(Color::DarkGray),
        ))),
        FetchState::Failed(msg) => Some(Line::from(Span::styled(
            format!("failed to load: {msg}"),
            Style::default().fg(Color::Red),
        ))),
        FetchState::Ready => None,
    }
}

/// Main dashboard layout: header, 2×2 panel grid, status bar.
pub fn render(frame: &mut Frame, app: &PortalTui) {
    let [header_area, body_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_header(frame, app, header_area);

    let [left, right] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .areas(body_area);
    let [spiral_area, docs_area] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(12)]).areas(left);
    let [chat_area, overview_area] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(14)]).areas(right);

    render_spiral(frame, app, spiral_area);
    render_docs(frame, app, docs_area);
    render_chat(frame, app, chat_area);
    render_overview(frame, app, overview_area);
    render_status(frame, app, status_area);
}

fn render_header(frame: &mut Frame, app: &PortalTui, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " well-portal ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" :: well: {} ", app.well_id())),
    ]));
    frame.render_widget(header, area);
}

fn render_spiral(frame: &mut Frame, app: &PortalTui, area: Rect) {
    let filter = &app.spiral.filter;
    let title = format!(
        "Spiral  stage:{}  layer:{}  tag:\"{}\"",
        filter.stage, filter.layer, filter.tag
    );
    let block = panel_block(&title, app.focus == Focus::Spiral);

    if let Some(line) = unavailable_line(&app.spiral.panel.state, "Loading...") {
        frame.render_widget(Paragraph::new(line).block(block), area);
        return;
    }

    let positioned = app.spiral.positioned();
    let size = app.spiral.layout.canvas_size;
    let selection = &app.spiral.selection;

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([0.0, size])
        .y_bounds([0.0, size])
        .paint(|ctx| {
            for p in &positioned {
                let color = stage_color(p.point.stage);
                // Canvas y grows upward; the layout's y grows downward.
                let y = size - p.y;
                let radius = if selection.is_selected(&p.point.id) {
                    SELECTED_RADIUS
                } else {
                    MARKER_RADIUS
                };
                ctx.draw(&Circle {
                    x: p.x,
                    y,
                    radius,
                    color,
                });
                if p.point.layer == Layer::Truth {
                    ctx.draw(&Circle {
                        x: p.x,
                        y,
                        radius: TRUTH_RING_RADIUS,
                        color,
                    });
                }
            }
        });
    frame.render_widget(canvas, area);
}

fn render_docs(frame: &mut Frame, app: &PortalTui, area: Rect) {
    let title = format!("Documents  mode:{}", app.docs_mode);
    let block = panel_block(&title, app.focus == Focus::Docs);

    let [input_area, results_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Fill(1)])
            .areas(block.inner(area));
    frame.render_widget(block, area);

    let input = Paragraph::new(Line::from(vec![
        Span::styled("search> ", Style::default().fg(Color::Green)),
        Span::raw(app.docs_input.clone()),
    ]));
    frame.render_widget(input, input_area);

    let lines: Vec<Line> = match unavailable_line(&app.docs.state, "Type a query and press Enter.")
    {
        Some(line) => vec![line],
        None => app
            .docs
            .data
            .iter()
            .flat_map(|hit| {
                vec![
                    Line::from(Span::raw(hit.snippet.clone())),
                    Line::from(Span::styled(
                        hit.date.clone(),
                        Style::default().fg(Color::DarkGray),
                    )),
                ]
            })
            .collect(),
    };
    let results = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(results, results_area);
}

fn chat_line(entry: &ChatEntry) -> Line<'static> {
    match entry {
        ChatEntry::User { text } => Line::from(vec![
            Span::styled("? ", Style::default().fg(Color::Green)),
            Span::raw(text.clone()),
        ]),
        ChatEntry::Well { text } => Line::from(vec![
            Span::styled("[well] ", Style::default().fg(Color::Yellow)),
            Span::raw(text.clone()),
        ]),
        ChatEntry::Notice { text } => Line::from(Span::styled(
            text.clone(),
            Style::default().fg(Color::DarkGray),
        )),
    }
}

fn render_chat(frame: &mut Frame, app: &PortalTui, area: Rect) {
    let block = panel_block("Talk to the Well", app.focus == Focus::Chat);

    let [log_area, input_area] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(block.inner(area));
    frame.render_widget(block, area);

    // Keep the tail of the transcript visible.
    let mut lines: Vec<Line> = app.chat_log.iter().map(chat_line).collect();
    if app.chat.is_loading() {
        lines.push(Line::from(Span::styled(
            "...",
            Style::default().fg(Color::DarkGray),
        )));
    }
    let visible = log_area.height as usize;
    let skip = lines.len().saturating_sub(visible);
    let log = Paragraph::new(lines[skip..].to_vec()).wrap(Wrap { trim: false });
    frame.render_widget(log, log_area);

    let input = Paragraph::new(Line::from(vec![
        Span::styled("ask> ", Style::default().fg(Color::Green)),
        Span::raw(app.chat_input.clone()),
    ]));
    frame.render_widget(input, input_area);
}

fn render_overview(frame: &mut Frame, app: &PortalTui, area: Rect) {
    let block = panel_block("Well Overview", app.focus == Focus::Overview);

    if let Some(line) = unavailable_line(&app.overview.state, "Loading...") {
        frame.render_widget(Paragraph::new(line).block(block), area);
        return;
    }

    let data = &app.overview.data;
    let [spark_area, text_area] =
        Layout::vertical([Constraint::Length(3), Constraint::Fill(1)]).areas(block.inner(area));
    frame.render_widget(block, area);

    let production: Vec<u64> = data
        .production
        .iter()
        .map(|v| v.max(0.0).round() as u64)
        .collect();
    let spark = Sparkline::default()
        .data(&production)
        .style(Style::default().fg(Color::LightBlue));
    frame.render_widget(spark, spark_area);

    let lines = vec![
        Line::from(format!(
            "operator: {}   district: {}   field: {}",
            data.operator, data.district, data.field
        )),
        Line::from(format!(
            "uptime: {:.1}%   downtime: {:.1}%",
            data.uptime, data.downtime
        )),
        Line::from(format!("tags: {}", data.tags.join(", "))),
        Line::from(vec![
            Span::styled("reflection: ", Style::default().fg(Color::DarkGray)),
            Span::raw(data.reflection.clone()),
        ]),
    ];
    let text = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(text, text_area);
}

fn render_status(frame: &mut Frame, app: &PortalTui, area: Rect) {
    let shown = app.spiral.positioned().len();
    let total = app.spiral.panel.data.len();
    let status = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" points: {shown}/{total} "),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw("| "),
        Span::styled(
            "Tab: focus  ↑↓: stage/layer  ←→: select  Enter: refresh/send  Esc: quit ",
            Style::default().fg(Color::DarkGray),
        ),
    ]));
    frame.render_widget(status, area);
}
