//! Flight list screen rendering
//!
//! Renders the filter bar, the current page of flights, an optional detail
//! panel for the selected flight, and a footer with the page indicator and any
//! load error.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::app::{App, AppState, FilterField};
use crate::data::{Flight, FlightStatus};

/// Color for a flight status bucket
pub(crate) fn status_color(status: FlightStatus) -> Color {
    match status {
        FlightStatus::OnTime => Color::Green,
        FlightStatus::Boarding => Color::Cyan,
        FlightStatus::Delayed => Color::Yellow,
        FlightStatus::Cancelled => Color::Red,
    }
}

/// Renders the flight list view
pub fn render(frame: &mut Frame, app: &App) {
    let selected = app.show_details.then(|| app.selected_flight()).flatten();
    let details_height = if selected.is_some() { 4 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(details_height),
            Constraint::Length(3),
        ])
        .split(frame.area());

    render_filter_bar(frame, app, chunks[0]);
    render_table(frame, app, chunks[1]);
    if let Some(flight) = selected {
        render_details(frame, &flight, chunks[2]);
    }
    render_footer(frame, app, chunks[3]);
}

fn render_details(frame: &mut Frame, flight: &Flight, area: Rect) {
    let kind = flight.status_kind();
    let label = Style::default().fg(Color::DarkGray);
    let lines = vec![
        Line::from(vec![
            Span::styled("Gate ", label),
            Span::styled(
                flight.gate.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled("   Flight ID ", label),
            Span::raw(flight.id.to_string()),
            Span::styled("   Departs ", label),
            Span::raw(format!("{} {}", flight.departure_date, flight.departure_time)),
        ]),
        Line::from(vec![
            Span::styled("Aircraft ", label),
            Span::raw(flight.aircraft.clone()),
            Span::styled("   Status ", label),
            Span::styled(kind.label(), Style::default().fg(status_color(kind))),
        ]),
    ];

    let title = format!(" {} ", flight.flight_number);
    let paragraph =
        Paragraph::new(lines).block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn render_filter_bar(frame: &mut Frame, app: &App, area: Rect) {
    let editing = match app.state {
        AppState::EditingFilter(field) => Some(field),
        _ => None,
    };

    let mut spans = Vec::new();
    for field in [
        FilterField::Search,
        FilterField::Status,
        FilterField::Date,
        FilterField::Aircraft,
    ] {
        let value = app.filter_value(field);
        let style = if editing == Some(field) {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::White)
        };
        let shown = if editing == Some(field) {
            format!("{}_", value)
        } else if value.is_empty() {
            "any".to_string()
        } else {
            value.to_string()
        };
        spans.push(Span::styled(format!("{}: ", field.label()), style));
        spans.push(Span::styled(shown, style));
        spans.push(Span::raw("   "));
    }

    let title = if app.filters.is_active() {
        " Filters (c to clear) "
    } else {
        " Filters "
    };
    let paragraph = Paragraph::new(Line::from(spans))
        .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(["Flight", "Date", "Time", "Aircraft", "Gate", "Status"])
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

    let flights = app.visible_flights();
    let rows: Vec<Row> = flights
        .iter()
        .enumerate()
        .map(|(i, flight)| {
            let row_style = if i == app.selected_index {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(flight.flight_number.clone()),
                Cell::from(flight.departure_date.clone()),
                Cell::from(flight.departure_time.clone()),
                Cell::from(flight.aircraft.clone()),
                Cell::from(flight.gate.clone()),
                Cell::from(flight.status.clone())
                    .style(Style::default().fg(status_color(flight.status_kind()))),
            ])
            .style(row_style)
        })
        .collect();

    let widths = [
        Constraint::Length(10),
        Constraint::Length(12),
        Constraint::Length(7),
        Constraint::Min(14),
        Constraint::Length(6),
        Constraint::Min(12),
    ];

    let block = Block::default().title(" Flights ").borders(Borders::ALL);

    if rows.is_empty() {
        let message = if app.flights.is_empty() {
            "No flights loaded"
        } else {
            "No flights match the current filters"
        };
        let paragraph = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let pages = app.total_pages();
    let mut spans = vec![Span::styled(
        format!(
            "Page {} of {}  ({} flights)",
            if pages == 0 { 0 } else { app.current_page },
            pages,
            app.filtered_flights().len()
        ),
        Style::default().fg(Color::White),
    )];

    if let Some(ref error) = app.error {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(error.clone(), Style::default().fg(Color::Red)));
    } else if let Some(refreshed) = app.last_refresh {
        spans.push(Span::styled(
            format!("  updated {}", refreshed.format("%H:%M:%S")),
            Style::default().fg(Color::DarkGray),
        ));
    }

    spans.push(Span::styled(
        "  ←/→ page  Enter details  / s d a filter  r reload  ? help  q quit",
        Style::default().fg(Color::DarkGray),
    ));

    let paragraph = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}
