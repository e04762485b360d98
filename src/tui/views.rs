//! TUI views and rendering
//!
//! All rendering logic is contained here. The views module draws the UI
//! based on AppState, but never transitions the session - the only state it
//! touches is the result view's max scroll, which needs viewport awareness.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use tracing::trace;

use super::state::{AppState, Focus};
use crate::api::PlanResult;
use crate::draft::{Field, Preference};
use crate::session::SessionState;

/// UI colors
mod colors {
    use ratatui::style::Color;

    pub const HEADER: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const FOCUS: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const LABEL: Color = Color::Gray;
    pub const ERROR: Color = Color::Rgb(220, 20, 60); // Crimson
    pub const ACCENT: Color = Color::Rgb(0, 255, 127); // Spring green
    pub const PRICE: Color = Color::Rgb(255, 215, 0); // Gold
    pub const DIM: Color = Color::DarkGray;
}

/// Main render function
pub fn render(state: &mut AppState, frame: &mut Frame) {
    trace!("render: called");
    // Create main layout: header, content, footer
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    render_header(state, frame, chunks[0]);

    // Failure banner takes the top of the content area when present
    let content = if state.failure_message().is_some() {
        let split = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0)])
            .split(chunks[1]);
        render_error_banner(state, frame, split[0]);
        split[1]
    } else {
        chunks[1]
    };

    match state.session.state() {
        SessionState::Success(result) => {
            let result = result.clone();
            render_result_view(state, &result, frame, content);
        }
        _ => render_form_view(state, frame, content),
    }

    render_footer(state, frame, chunks[2]);

    if state.is_submitting() {
        render_submitting_overlay(state, frame, frame.area());
    }
}

/// Render header bar
fn render_header(state: &AppState, frame: &mut Frame, area: Rect) {
    trace!("render_header: called");
    let subtitle = match state.session.state() {
        SessionState::Success(_) => "Your vacation plan",
        SessionState::Submitting(_) => "Contacting the planner",
        _ => "Plan your perfect getaway",
    };

    let line = Line::from(vec![
        Span::styled(" Vacation Planner", Style::default().fg(colors::HEADER).add_modifier(Modifier::BOLD)),
        Span::raw(" │ "),
        Span::styled(subtitle, Style::default().fg(colors::DIM)),
    ]);

    let header = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

/// Render the dismissible failure banner
fn render_error_banner(state: &AppState, frame: &mut Frame, area: Rect) {
    trace!("render_error_banner: called");
    let message = state.failure_message().unwrap_or_default();
    let lines = vec![
        Line::from(Span::styled(
            "Something went wrong",
            Style::default().fg(colors::ERROR).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::raw(message.to_string()),
            Span::styled("  (Esc to dismiss)", Style::default().fg(colors::DIM)),
        ]),
    ];

    let banner = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(colors::ERROR)));
    frame.render_widget(banner, area);
}

/// Render the form view
fn render_form_view(state: &AppState, frame: &mut Frame, area: Rect) {
    trace!("render_form_view: called");
    let lines = form_lines(state);
    let form = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Trip details "));
    frame.render_widget(form, area);
}

/// Build the form as styled lines (kept widget-free so it can be tested)
fn form_lines(state: &AppState) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    push_text_field(&mut lines, state, Focus::Origin, "Origin City *", &state.draft.origin, Field::Origin);
    push_text_field(&mut lines, state, Focus::StartDate, "Start Date *", &state.draft.start_date, Field::StartDate);
    push_text_field(&mut lines, state, Focus::EndDate, "End Date *", &state.draft.end_date, Field::EndDate);

    // Preference checkboxes on one row, aggregate error beneath
    let mut spans = vec![field_label(state, Focus::Preference(Preference::Beach), "Preferences *")];
    spans.push(Span::raw("  "));
    for pref in Preference::ALL {
        let mark = if state.draft.preference(pref) { "[x] " } else { "[ ] " };
        let style = if state.focus == Focus::Preference(pref) {
            Style::default().fg(colors::FOCUS).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        spans.push(Span::styled(format!("{}{}", mark, pref.label()), style));
        spans.push(Span::raw("  "));
    }
    lines.push(Line::from(spans));
    push_field_error(&mut lines, state, Field::Preferences);
    lines.push(Line::default());

    push_text_field(&mut lines, state, Focus::Budget, "Budget ($) *", &state.draft.budget, Field::Budget);

    // Simulation toggle
    let toggle_mark = if state.draft.allow_booking_simulation { "(on) " } else { "(off)" };
    let toggle_style = if state.focus == Focus::Simulation {
        Style::default().fg(colors::FOCUS).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    lines.push(Line::from(vec![
        Span::styled(format!("{} {}", focus_marker(state, Focus::Simulation), toggle_mark), toggle_style),
        Span::raw(" Allow Booking Simulation"),
    ]));
    lines.push(Line::default());

    // Payment token only rendered while the toggle is on; its value is
    // retained either way
    if state.draft.allow_booking_simulation {
        let masked = "*".repeat(state.draft.payment_token.chars().count());
        push_text_field(&mut lines, state, Focus::PaymentToken, "Payment Token *", &masked, Field::PaymentToken);
    }

    // Submit row
    let submit_label = if state.is_submitting() {
        "[ Planning Vacation... ]"
    } else {
        "[ Plan My Vacation ]"
    };
    let submit_style = if state.focus == Focus::Submit {
        Style::default().fg(colors::ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(colors::ACCENT)
    };
    lines.push(Line::from(vec![
        Span::raw(format!("{} ", focus_marker(state, Focus::Submit))),
        Span::styled(submit_label, submit_style),
    ]));

    lines
}

/// Focus marker for the left gutter
fn focus_marker(state: &AppState, focus: Focus) -> &'static str {
    if state.focus == focus { ">" } else { " " }
}

/// Styled label span for a field
fn field_label(state: &AppState, focus: Focus, label: &'static str) -> Span<'static> {
    let style = if state.focus == focus {
        Style::default().fg(colors::FOCUS).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(colors::LABEL)
    };
    Span::styled(format!("{} {:<16}", focus_marker(state, focus), label), style)
}

/// Push one text field line plus its error line
fn push_text_field(
    lines: &mut Vec<Line<'static>>,
    state: &AppState,
    focus: Focus,
    label: &'static str,
    value: &str,
    field: Field,
) {
    let cursor = if state.focus == focus && !state.is_submitting() { "▏" } else { "" };
    lines.push(Line::from(vec![
        field_label(state, focus, label),
        Span::raw(format!("{}{}", value, cursor)),
    ]));
    push_field_error(lines, state, field);
    lines.push(Line::default());
}

/// Push the inline error line for a field, if it has one
fn push_field_error(lines: &mut Vec<Line<'static>>, state: &AppState, field: Field) {
    if let Some(message) = state.errors.get(field) {
        lines.push(Line::from(Span::styled(
            format!("    {}", message),
            Style::default().fg(colors::ERROR),
        )));
    }
}

/// Render the result view
fn render_result_view(state: &mut AppState, result: &PlanResult, frame: &mut Frame, area: Rect) {
    trace!("render_result_view: called");
    let lines = result_lines(result);

    // Viewport-aware max scroll, consumed by the key handler
    let viewport = area.height.saturating_sub(2) as usize; // borders
    state.result_max_scroll = lines.len().saturating_sub(viewport);
    state.result_scroll = state.result_scroll.min(state.result_max_scroll);

    let view = Paragraph::new(lines)
        .scroll((state.result_scroll as u16, 0))
        .block(Block::default().borders(Borders::ALL).title(" Your Vacation Plan "));
    frame.render_widget(view, area);
}

/// Build the result view as styled lines
///
/// Defensive throughout: every optional field that is absent silently omits
/// its block. Never a placeholder for missing data.
fn result_lines(result: &PlanResult) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if let Some(destination) = result.destination.as_deref()
        && !destination.is_empty()
    {
        lines.push(Line::from(Span::styled(
            "Destination",
            Style::default().fg(colors::HEADER).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            format!("  {}", destination),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::default());
    }

    let days = result.days();
    if !days.is_empty() {
        lines.push(Line::from(Span::styled(
            "Day-by-Day Itinerary",
            Style::default().fg(colors::HEADER).add_modifier(Modifier::BOLD),
        )));
        for (index, day) in days.iter().enumerate() {
            // Missing day number falls back to 1-based position
            let number = day.day.unwrap_or(index as u32 + 1);
            lines.push(Line::from(vec![
                Span::styled(format!("  Day {}", number), Style::default().fg(colors::ACCENT).add_modifier(Modifier::BOLD)),
                Span::raw(format!("  {}", day.title)),
            ]));
            if !day.description.is_empty() {
                lines.push(Line::from(format!("         {}", day.description)));
            }
            if let Some(activities) = &day.activities
                && !activities.is_empty()
            {
                for activity in activities {
                    lines.push(Line::from(Span::styled(
                        format!("         • {}", activity),
                        Style::default().fg(colors::DIM),
                    )));
                }
            }
        }
        lines.push(Line::default());
    }

    if let Some(booking) = &result.booking_simulation {
        let mut section = Vec::new();

        if let Some(hotel) = &booking.hotel {
            section.push(Line::from(Span::styled("  Hotel", Style::default().add_modifier(Modifier::BOLD))));
            section.push(Line::from(format!("    {}", hotel.name)));
            if let Some(price) = hotel.price {
                section.push(Line::from(Span::styled(
                    format!("    ${:.2}", price),
                    Style::default().fg(colors::PRICE),
                )));
            }
            if let Some(nights) = hotel.nights {
                section.push(Line::from(Span::styled(
                    format!("    {} nights", nights),
                    Style::default().fg(colors::DIM),
                )));
            }
        }

        if let Some(flight) = &booking.flight {
            section.push(Line::from(Span::styled("  Flight", Style::default().add_modifier(Modifier::BOLD))));
            section.push(Line::from(format!("    {}", flight.airline)));
            if let Some(price) = flight.price {
                section.push(Line::from(Span::styled(
                    format!("    ${:.2}", price),
                    Style::default().fg(colors::PRICE),
                )));
            }
            if let Some(route) = &flight.route {
                section.push(Line::from(Span::styled(
                    format!("    {}", route),
                    Style::default().fg(colors::DIM),
                )));
            }
        }

        if !section.is_empty() {
            lines.push(Line::from(Span::styled(
                "Booking Simulation Results",
                Style::default().fg(colors::HEADER).add_modifier(Modifier::BOLD),
            )));
            lines.append(&mut section);
            lines.push(Line::default());
        }
    }

    // total_estimated_cost is deliberately not surfaced

    lines
}

/// Render context-sensitive keybind hints
fn render_footer(state: &AppState, frame: &mut Frame, area: Rect) {
    trace!("render_footer: called");
    let hints = match state.session.state() {
        SessionState::Success(_) => " n/Enter new plan │ j/k scroll │ q quit",
        SessionState::Submitting(_) => " Ctrl+C quit",
        SessionState::Failed(_) => " Esc dismiss │ Enter retry │ Tab next field │ Ctrl+C quit",
        SessionState::Idle => " Tab/Shift+Tab move │ Space toggle │ Enter submit │ Esc quit",
    };

    let footer = Paragraph::new(Line::from(Span::styled(hints, Style::default().fg(colors::DIM))))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

/// Render the in-flight overlay (centered, on top of the form)
fn render_submitting_overlay(state: &AppState, frame: &mut Frame, area: Rect) {
    trace!("render_submitting_overlay: called");
    let elapsed = state.submit_started.map(|t| t.elapsed().as_secs()).unwrap_or(0);
    let message = format!(" {} your vacation… ({}s) ", state.planning_word, elapsed);

    let popup = centered_rect(message.chars().count() as u16 + 4, 3, area);
    frame.render_widget(Clear, popup);
    let overlay = Paragraph::new(Line::from(Span::styled(
        message,
        Style::default().fg(colors::ACCENT).add_modifier(Modifier::BOLD),
    )))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(overlay, popup);
}

/// Centered rect of fixed size within an area
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}
