//! Core data models for airops
//!
//! This module contains the records exchanged with the airline operations
//! service: flights, reservations, luggage, and check-in requests.
//!
//! Records serialize with camelCase field names. Each field also accepts the
//! name used by the upstream service's legacy schema when deserializing.

pub mod filters;
pub mod forms;
pub mod status;

pub use filters::{
    filter_flights, filter_reservations_by_status, paginate, total_pages, FlightFilters,
    DEFAULT_PAGE_SIZE,
};
pub use forms::{CheckInForm, ReservationForm, ValidationError};
pub use status::FlightStatus;

use serde::{Deserialize, Serialize};

/// A scheduled flight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    #[serde(alias = "id_vuelo")]
    pub id: i64,
    #[serde(alias = "numero_vuelo")]
    pub flight_number: String,
    /// Departure date as `YYYY-MM-DD`
    #[serde(alias = "fecha_salida")]
    pub departure_date: String,
    #[serde(alias = "hora_salida")]
    pub departure_time: String,
    /// Free-form status text as reported by the service
    #[serde(alias = "estado")]
    pub status: String,
    #[serde(alias = "aeronave")]
    pub aircraft: String,
    #[serde(alias = "puerta_embarque")]
    pub gate: String,
}

impl Flight {
    /// Classifies the free-form status text
    pub fn status_kind(&self) -> FlightStatus {
        FlightStatus::classify(&self.status)
    }
}

/// A reservation held by a passenger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    #[serde(alias = "id_reserva")]
    pub id: i64,
    #[serde(alias = "id_pasajero")]
    pub passenger_id: i64,
    #[serde(alias = "id_vuelo")]
    pub flight_id: i64,
    #[serde(alias = "codigo_reserva")]
    pub reservation_code: String,
    #[serde(alias = "estado")]
    pub status: String,
    #[serde(alias = "precio")]
    pub price: f64,
}

/// Body of a reservation creation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReservation {
    pub passenger_id: i64,
    pub flight_id: i64,
    pub reservation_code: String,
    pub status: String,
    pub price: f64,
}

/// A piece of checked luggage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LuggageItem {
    #[serde(alias = "id_equipaje")]
    pub id: i64,
    #[serde(alias = "id_pasajero")]
    pub passenger_id: i64,
    #[serde(alias = "descripcion")]
    pub description: String,
    /// Weight in kilograms
    #[serde(alias = "peso")]
    pub weight: f64,
    #[serde(alias = "estado")]
    pub status: String,
}

/// Sum of the weights of all items
pub fn total_weight(items: &[LuggageItem]) -> f64 {
    items.iter().map(|item| item.weight).sum()
}

/// Body of a check-in request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInRequest {
    pub reservation_id: String,
    pub seat_id: String,
    pub gate_id: String,
    pub checkin_date: String,
    pub checkin_time: String,
}

/// Acknowledgement returned by the check-in endpoint
///
/// The service does not publish a schema for it, so it is kept as raw JSON.
pub type CheckInReceipt = serde_json::Value;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flight_deserializes_camel_case() {
        let flight: Flight = serde_json::from_value(json!({
            "id": 1,
            "flightNumber": "AA100",
            "departureDate": "2025-01-01",
            "departureTime": "08:30",
            "status": "confirmado",
            "aircraft": "Boeing 737",
            "gate": "A1"
        }))
        .expect("Failed to deserialize Flight");

        assert_eq!(flight.id, 1);
        assert_eq!(flight.flight_number, "AA100");
        assert_eq!(flight.gate, "A1");
    }

    #[test]
    fn test_flight_accepts_legacy_field_names() {
        let flight: Flight = serde_json::from_value(json!({
            "id_vuelo": 9,
            "numero_vuelo": "BB200",
            "fecha_salida": "2025-01-02",
            "hora_salida": "14:00",
            "estado": "retraso",
            "aeronave": "Airbus A320",
            "puerta_embarque": "B4"
        }))
        .expect("Failed to deserialize legacy Flight");

        assert_eq!(flight.id, 9);
        assert_eq!(flight.flight_number, "BB200");
        assert_eq!(flight.status_kind(), FlightStatus::Delayed);
    }

    #[test]
    fn test_new_reservation_serializes_camel_case() {
        let body = NewReservation {
            passenger_id: 3,
            flight_id: 5,
            reservation_code: "XYZ123".to_string(),
            status: "confirmada".to_string(),
            price: 199.5,
        };

        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(value["passengerId"], json!(3));
        assert_eq!(value["reservationCode"], json!("XYZ123"));
        assert_eq!(value["price"], json!(199.5));
    }

    #[test]
    fn test_reservation_accepts_legacy_field_names() {
        let reservation: Reservation = serde_json::from_value(json!({
            "id_reserva": 1,
            "id_pasajero": 2,
            "id_vuelo": 3,
            "codigo_reserva": "ABC",
            "estado": "confirmada",
            "precio": 120.0
        }))
        .unwrap();

        assert_eq!(reservation.passenger_id, 2);
        assert!((reservation.price - 120.0).abs() < 0.01);
    }

    #[test]
    fn test_total_weight() {
        let item = |id, weight| LuggageItem {
            id,
            passenger_id: 1,
            description: "Suitcase".to_string(),
            weight,
            status: "registrado".to_string(),
        };

        assert!((total_weight(&[item(1, 23.5), item(2, 8.25)]) - 31.75).abs() < 0.001);
        assert_eq!(total_weight(&[]), 0.0);
    }
}
