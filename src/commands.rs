//! Non-interactive subcommands
//!
//! Each subcommand performs at most one request and prints a plain-text
//! report. Failures end the command; nothing is retried.

use std::io::{self, Write};

use thiserror::Error;

use crate::api::{ApiClient, ApiError, FLIGHTS_PATH};
use crate::cli::{CacheAction, CheckinArgs, Command, FlightsArgs, ReserveArgs};
use crate::data::forms::parse_passenger_id;
use crate::data::{
    filter_flights, filter_reservations_by_status, paginate, total_pages, total_weight,
    CheckInForm, Flight, FlightFilters, LuggageItem, Reservation, ReservationForm,
    ValidationError,
};

/// Errors that end a subcommand
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("{0}")]
    Invalid(#[from] ValidationError),

    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),

    /// The command drives the terminal itself and has no plain-text report
    #[error("'{0}' is interactive and must be started from a terminal")]
    Interactive(&'static str),
}

impl CommandError {
    /// Message suitable for showing to the user
    pub fn user_message(&self) -> String {
        match self {
            CommandError::Api(err) => err.user_message(),
            other => other.to_string(),
        }
    }
}

/// Runs a non-interactive subcommand, writing its report to `out`
///
/// `Browse` drives the terminal and is refused with [`CommandError::Interactive`].
pub async fn run<W: Write>(
    command: &Command,
    client: &ApiClient,
    out: &mut W,
) -> Result<(), CommandError> {
    match command {
        Command::Flights(args) => flights(args, client, out).await,
        Command::Reservations {
            passenger_id,
            status,
        } => {
            let passenger_id = parse_passenger_id(passenger_id)?;
            let mut reservations = client.reservations_for(passenger_id).await?;
            if let Some(status) = status {
                reservations = filter_reservations_by_status(&reservations, status);
            }
            write!(out, "{}", format_reservations(&reservations))?;
            Ok(())
        }
        Command::Reserve(args) => reserve(args, client, out).await,
        Command::Luggage { passenger_id } => {
            let passenger_id = parse_passenger_id(passenger_id)?;
            let items = client.luggage_for(passenger_id).await?;
            write!(out, "{}", format_luggage(&items))?;
            Ok(())
        }
        Command::Checkin(args) => checkin(args, client, out).await,
        Command::Cache {
            action: CacheAction::Clear { path },
        } => {
            client.invalidate(path.as_deref());
            match path {
                Some(path) => writeln!(out, "Cleared cached response for {}", path)?,
                None => writeln!(out, "Cleared all cached responses")?,
            }
            Ok(())
        }
        Command::Browse => Err(CommandError::Interactive("browse")),
    }
}

async fn flights<W: Write>(
    args: &FlightsArgs,
    client: &ApiClient,
    out: &mut W,
) -> Result<(), CommandError> {
    if args.refresh {
        client.invalidate(Some(FLIGHTS_PATH));
    }

    let flights = client.list_flights().await?;
    let filters = FlightFilters {
        search_term: args.search.clone().unwrap_or_default(),
        status: args.status.clone().unwrap_or_default(),
        date: args.date.clone().unwrap_or_default(),
        aircraft: args.aircraft.clone().unwrap_or_default(),
    };

    let filtered = filter_flights(&flights, &filters);
    let pages = total_pages(filtered.len(), args.page_size);
    let page = paginate(&filtered, args.page, args.page_size);

    write!(out, "{}", format_flights(page))?;
    writeln!(
        out,
        "Page {} of {} ({} of {} flights match)",
        args.page,
        pages,
        filtered.len(),
        flights.len()
    )?;
    Ok(())
}

async fn reserve<W: Write>(
    args: &ReserveArgs,
    client: &ApiClient,
    out: &mut W,
) -> Result<(), CommandError> {
    let form = ReservationForm {
        passenger_id: args.passenger.clone(),
        flight_id: args.flight.clone(),
        reservation_code: args.code.clone(),
        status: args.status.clone(),
        price: args.price.clone(),
    };
    let reservation = form.validate()?;

    client.create_reservation(&reservation).await?;
    writeln!(
        out,
        "Reservation {} created for passenger {}",
        reservation.reservation_code, reservation.passenger_id
    )?;
    Ok(())
}

async fn checkin<W: Write>(
    args: &CheckinArgs,
    client: &ApiClient,
    out: &mut W,
) -> Result<(), CommandError> {
    let form = CheckInForm {
        reservation_id: args.reservation.clone(),
        seat_id: args.seat.clone(),
        gate_id: args.gate.clone(),
        date: args.date.clone(),
        time: args.time.clone(),
    };
    let request = form.validate()?;

    let receipt = client.check_in(&request).await?;
    writeln!(out, "Check-in completed for reservation {}", request.reservation_id)?;
    if !receipt.is_null() {
        writeln!(out, "{}", serde_json::to_string_pretty(&receipt).unwrap_or_default())?;
    }
    Ok(())
}

/// Renders flights as a fixed-width table
pub fn format_flights(flights: &[Flight]) -> String {
    if flights.is_empty() {
        return "No flights match the current filters.\n".to_string();
    }

    let mut table = format!(
        "{:<10} {:<12} {:<6} {:<16} {:<6} {}\n",
        "FLIGHT", "DATE", "TIME", "AIRCRAFT", "GATE", "STATUS"
    );
    for flight in flights {
        let marker = if flight.status_kind().is_disrupted() { " !" } else { "" };
        table.push_str(&format!(
            "{:<10} {:<12} {:<6} {:<16} {:<6} {}{}\n",
            flight.flight_number,
            flight.departure_date,
            flight.departure_time,
            flight.aircraft,
            flight.gate,
            flight.status,
            marker
        ));
    }
    table
}

/// Renders a passenger's reservations
pub fn format_reservations(reservations: &[Reservation]) -> String {
    if reservations.is_empty() {
        return "No reservations found for this passenger.\n".to_string();
    }

    let mut table = format!("{:<10} {:<8} {:<12} {:>10}\n", "CODE", "FLIGHT", "STATUS", "PRICE");
    for reservation in reservations {
        table.push_str(&format!(
            "{:<10} {:<8} {:<12} {:>10.2}\n",
            reservation.reservation_code, reservation.flight_id, reservation.status, reservation.price
        ));
    }
    table
}

/// Renders a passenger's luggage with the total weight
pub fn format_luggage(items: &[LuggageItem]) -> String {
    if items.is_empty() {
        return "No luggage found for this passenger.\n".to_string();
    }

    let mut table = format!("{:<6} {:<24} {:>8} {}\n", "ID", "DESCRIPTION", "KG", "STATUS");
    for item in items {
        table.push_str(&format!(
            "{:<6} {:<24} {:>8.2} {}\n",
            item.id, item.description, item.weight, item.status
        ));
    }
    table.push_str(&format!(
        "{} item(s), total weight {:.2} kg\n",
        items.len(),
        total_weight(items)
    ));
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ResponseCache;

    fn flight(number: &str, status: &str) -> Flight {
        Flight {
            id: 1,
            flight_number: number.to_string(),
            departure_date: "2025-01-01".to_string(),
            departure_time: "08:30".to_string(),
            status: status.to_string(),
            aircraft: "Boeing 737".to_string(),
            gate: "A1".to_string(),
        }
    }

    #[test]
    fn test_format_flights_marks_disruptions() {
        let table = format_flights(&[flight("AA100", "confirmado"), flight("BB200", "retraso")]);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("FLIGHT"));
        assert!(lines[1].contains("AA100") && !lines[1].ends_with('!'));
        assert!(lines[2].contains("BB200") && lines[2].ends_with('!'));
    }

    #[test]
    fn test_format_flights_empty() {
        assert!(format_flights(&[]).contains("No flights"));
    }

    #[test]
    fn test_format_luggage_includes_total() {
        let items = vec![
            LuggageItem {
                id: 1,
                passenger_id: 5,
                description: "Suitcase".to_string(),
                weight: 20.0,
                status: "registrado".to_string(),
            },
            LuggageItem {
                id: 2,
                passenger_id: 5,
                description: "Backpack".to_string(),
                weight: 7.5,
                status: "registrado".to_string(),
            },
        ];

        let report = format_luggage(&items);

        assert!(report.contains("Suitcase"));
        assert!(report.contains("2 item(s), total weight 27.50 kg"));
    }

    #[test]
    fn test_format_reservations() {
        let report = format_reservations(&[Reservation {
            id: 1,
            passenger_id: 2,
            flight_id: 3,
            reservation_code: "XYZ".to_string(),
            status: "confirmada".to_string(),
            price: 99.0,
        }]);
        assert!(report.contains("XYZ"));
        assert!(report.contains("99.00"));
        assert!(format_reservations(&[]).contains("No reservations"));
    }

    #[tokio::test]
    async fn test_validation_fails_before_any_request() {
        // Nothing listens on port 9; a request would surface as ApiError::Http
        let client = ApiClient::new("http://127.0.0.1:9", ResponseCache::in_memory());
        let command = Command::Luggage {
            passenger_id: "   ".to_string(),
        };
        let mut out = Vec::new();

        let err = run(&command, &client, &mut out).await.unwrap_err();

        assert!(matches!(err, CommandError::Invalid(ValidationError::Required(_))));
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_reservations_status_option_narrows_report() {
        let cache = ResponseCache::in_memory();
        cache.set(
            "/reservations/7",
            &serde_json::json!([
                {"id": 1, "passengerId": 7, "flightId": 2, "reservationCode": "KEEP01",
                 "status": "Cancelada", "price": 80.0},
                {"id": 2, "passengerId": 7, "flightId": 3, "reservationCode": "DROP02",
                 "status": "confirmada", "price": 120.0}
            ]),
        );
        // Served from the cache, so nothing needs to listen on port 9
        let client = ApiClient::new("http://127.0.0.1:9", cache);
        let command = Command::Reservations {
            passenger_id: "7".to_string(),
            status: Some("CANCEL".to_string()),
        };
        let mut out = Vec::new();

        run(&command, &client, &mut out).await.unwrap();

        let report = String::from_utf8(out).unwrap();
        assert!(report.contains("KEEP01"));
        assert!(!report.contains("DROP02"));
    }

    #[tokio::test]
    async fn test_browse_is_rejected_outside_the_terminal() {
        let client = ApiClient::new("http://127.0.0.1:9", ResponseCache::in_memory());
        let mut out = Vec::new();

        let err = run(&Command::Browse, &client, &mut out).await.unwrap_err();

        assert!(matches!(err, CommandError::Interactive("browse")));
        assert!(err.user_message().contains("interactive"));
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_cache_clear_reports_path() {
        let cache = ResponseCache::in_memory();
        cache.set("/flights", &serde_json::json!([]));
        let client = ApiClient::new("http://127.0.0.1:9", cache.clone());
        let command = Command::Cache {
            action: CacheAction::Clear {
                path: Some("/flights".to_string()),
            },
        };
        let mut out = Vec::new();

        run(&command, &client, &mut out).await.unwrap();

        assert!(cache.get("/flights").is_none());
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Cleared cached response for /flights\n"
        );
    }
}
