//! Help overlay for the flight browser
//!
//! Lists the browser's keys by task, with a legend for the status colours.
//! The overlay is sized to its content and centered on the current view.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::flight_list::status_color;
use crate::data::FlightStatus;

/// Key groups shown in the overlay, in display order
const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Moving around",
        &[
            ("↑/k ↓/j", "Select a flight on this page"),
            ("←/p →/n", "Previous or next page"),
            ("Enter", "Show or hide flight details"),
        ],
    ),
    (
        "Narrowing the list",
        &[
            ("/", "Flight number contains"),
            ("s", "Status contains"),
            ("d", "Departure date is exactly"),
            ("a", "Aircraft contains"),
            ("c", "Clear every filter"),
        ],
    ),
    (
        "Session",
        &[
            ("r", "Drop cached flights and reload"),
            ("q, Esc", "Quit"),
        ],
    ),
];

const KEY_COLUMN: usize = 10;

/// Renders the help overlay on top of the current view
pub fn render(frame: &mut Frame) {
    let lines = help_lines();
    let width = lines.iter().map(Line::width).max().unwrap_or(0) + 4;
    let area = overlay_area(frame.area(), width, lines.len() + 2);

    frame.render_widget(Clear, area);
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(" Keys ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(paragraph, area);
}

fn help_lines() -> Vec<Line<'static>> {
    let heading = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let mut lines = Vec::new();

    for (title, keys) in SECTIONS {
        lines.push(Line::from(Span::styled(*title, heading)));
        for (key, action) in *keys {
            lines.push(Line::from(vec![
                Span::styled(
                    format!(" {:<width$}", key, width = KEY_COLUMN),
                    Style::default().fg(Color::Yellow),
                ),
                Span::raw(*action),
            ]));
        }
        lines.push(Line::default());
    }

    lines.push(Line::from(Span::styled("Status colours", heading)));
    let mut legend = vec![Span::raw(" ")];
    for status in [
        FlightStatus::OnTime,
        FlightStatus::Boarding,
        FlightStatus::Delayed,
        FlightStatus::Cancelled,
    ] {
        legend.push(Span::styled(
            format!("{}  ", status.label()),
            Style::default().fg(status_color(status)),
        ));
    }
    lines.push(Line::from(legend));
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "? or Esc closes this overlay",
        Style::default().fg(Color::DarkGray),
    )));

    lines
}

/// Centers a `width` x `height` box in `area`, shrinking it to fit
fn overlay_area(area: Rect, width: usize, height: usize) -> Rect {
    let width = u16::try_from(width).unwrap_or(u16::MAX).min(area.width);
    let height = u16::try_from(height).unwrap_or(u16::MAX).min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
