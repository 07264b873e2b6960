//! Application state management for the flight browser
//!
//! This module contains the browser state, keyboard handling, and the
//! transitions between loading, browsing, and editing a filter.

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent};

use crate::api::{ApiClient, FLIGHTS_PATH};
use crate::data::{filter_flights, paginate, total_pages, Flight, FlightFilters, DEFAULT_PAGE_SIZE};

/// Application state enum representing the current view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// Waiting for the flight list
    Loading,
    /// Table of flights
    FlightList,
    /// Typing into one of the filter fields
    EditingFilter(FilterField),
}

/// The filter field being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Search,
    Status,
    Date,
    Aircraft,
}

impl FilterField {
    pub fn label(self) -> &'static str {
        match self {
            FilterField::Search => "Flight",
            FilterField::Status => "Status",
            FilterField::Date => "Date",
            FilterField::Aircraft => "Aircraft",
        }
    }
}

/// Main application struct managing state and data
pub struct App {
    /// Current application state/view
    pub state: AppState,
    /// Every flight returned by the last load
    pub flights: Vec<Flight>,
    /// Active filter criteria
    pub filters: FlightFilters,
    /// Current page, starting at 1
    pub current_page: usize,
    /// Flights per page
    pub page_size: usize,
    /// Index of the selected row within the current page
    pub selected_index: usize,
    /// Message from the last failed load
    pub error: Option<String>,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Flag indicating a reload has been requested
    pub reload_requested: bool,
    /// Flag to show help overlay
    pub show_help: bool,
    /// Flag to show the detail panel for the selected flight
    pub show_details: bool,
    /// Timestamp of last successful load
    pub last_refresh: Option<DateTime<Local>>,
    client: ApiClient,
}

impl App {
    /// Creates a new App in the loading state
    pub fn new(client: ApiClient) -> Self {
        Self {
            state: AppState::Loading,
            flights: Vec::new(),
            filters: FlightFilters::default(),
            current_page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            selected_index: 0,
            error: None,
            should_quit: false,
            reload_requested: false,
            show_help: false,
            show_details: false,
            last_refresh: None,
            client,
        }
    }

    /// Loads the flight list and switches to the list view
    ///
    /// A failed load keeps the previous flights and records a message for the user.
    pub async fn load_flights(&mut self) {
        match self.client.list_flights().await {
            Ok(flights) => {
                tracing::info!(count = flights.len(), "loaded flights");
                self.flights = flights;
                self.error = None;
                self.current_page = 1;
                self.selected_index = 0;
                self.last_refresh = Some(Local::now());
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to load flights");
                self.error = Some(err.user_message());
            }
        }
        self.state = AppState::FlightList;
    }

    /// Drops the cached flight list and loads it again
    pub async fn reload(&mut self) {
        self.reload_requested = false;
        self.client.invalidate(Some(FLIGHTS_PATH));
        self.load_flights().await;
    }

    /// Flights that pass the current filters
    pub fn filtered_flights(&self) -> Vec<Flight> {
        filter_flights(&self.flights, &self.filters)
    }

    /// Number of pages for the filtered list
    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered_flights().len(), self.page_size)
    }

    /// Flights on the current page
    pub fn visible_flights(&self) -> Vec<Flight> {
        paginate(&self.filtered_flights(), self.current_page, self.page_size).to_vec()
    }

    /// The highlighted flight, if the page has any
    pub fn selected_flight(&self) -> Option<Flight> {
        self.visible_flights().get(self.selected_index).cloned()
    }

    /// Current text of a filter field
    pub fn filter_value(&self, field: FilterField) -> &str {
        match field {
            FilterField::Search => &self.filters.search_term,
            FilterField::Status => &self.filters.status,
            FilterField::Date => &self.filters.date,
            FilterField::Aircraft => &self.filters.aircraft,
        }
    }

    fn filter_value_mut(&mut self, field: FilterField) -> &mut String {
        match field {
            FilterField::Search => &mut self.filters.search_term,
            FilterField::Status => &mut self.filters.status,
            FilterField::Date => &mut self.filters.date,
            FilterField::Aircraft => &mut self.filters.aircraft,
        }
    }

    /// Handles keyboard input based on current state
    ///
    /// - `q` or `Esc`: Quit
    /// - `Up`/`k`, `Down`/`j`: Move selection within the page
    /// - `Right`/`n`, `Left`/`p`: Next or previous page
    /// - `Enter`: Show or hide details of the selected flight
    /// - `/`, `s`, `d`, `a`: Edit flight number, status, date, or aircraft filter
    /// - `c`: Clear all filters
    /// - `r`: Reload from the service
    /// - `?`: Toggle help
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        // Handle help overlay - intercepts all keys when shown
        if self.show_help {
            if matches!(
                key_event.code,
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')
            ) {
                self.show_help = false;
            }
            return;
        }

        match self.state {
            AppState::Loading => {
                // Only quit is allowed during loading
                if key_event.code == KeyCode::Char('q') {
                    self.should_quit = true;
                }
            }
            AppState::FlightList => match key_event.code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.should_quit = true;
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    self.move_selection_up();
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.move_selection_down();
                }
                KeyCode::Right | KeyCode::Char('n') => {
                    self.next_page();
                }
                KeyCode::Left | KeyCode::Char('p') => {
                    self.previous_page();
                }
                KeyCode::Enter => {
                    self.show_details = !self.show_details && self.selected_flight().is_some();
                }
                KeyCode::Char('/') => {
                    self.state = AppState::EditingFilter(FilterField::Search);
                }
                KeyCode::Char('s') => {
                    self.state = AppState::EditingFilter(FilterField::Status);
                }
                KeyCode::Char('d') => {
                    self.state = AppState::EditingFilter(FilterField::Date);
                }
                KeyCode::Char('a') => {
                    self.state = AppState::EditingFilter(FilterField::Aircraft);
                }
                KeyCode::Char('c') => {
                    self.filters.clear();
                    self.reset_paging();
                }
                KeyCode::Char('r') => {
                    self.reload_requested = true;
                }
                KeyCode::Char('?') => {
                    self.show_help = true;
                }
                _ => {}
            },
            AppState::EditingFilter(field) => match key_event.code {
                KeyCode::Enter | KeyCode::Esc => {
                    self.state = AppState::FlightList;
                }
                KeyCode::Backspace => {
                    if self.filter_value_mut(field).pop().is_some() {
                        self.reset_paging();
                    }
                }
                KeyCode::Char(c) => {
                    self.filter_value_mut(field).push(c);
                    self.reset_paging();
                }
                _ => {}
            },
        }
    }

    /// Any filter change starts again from the first page
    fn reset_paging(&mut self) {
        self.current_page = 1;
        self.selected_index = 0;
    }

    fn next_page(&mut self) {
        if self.current_page < self.total_pages() {
            self.current_page += 1;
            self.selected_index = 0;
        }
    }

    fn previous_page(&mut self) {
        if self.current_page > 1 {
            self.current_page -= 1;
            self.selected_index = 0;
        }
    }

    /// Moves the selection up, wrapping to the bottom of the page
    fn move_selection_up(&mut self) {
        let count = self.visible_flights().len();
        if count == 0 {
            return;
        }
        self.selected_index = if self.selected_index == 0 {
            count - 1
        } else {
            self.selected_index - 1
        };
    }

    /// Moves the selection down, wrapping to the top of the page
    fn move_selection_down(&mut self) {
        let count = self.visible_flights().len();
        if count == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % count;
    }
}
