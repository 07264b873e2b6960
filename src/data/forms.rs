//! Validation of user-entered forms
//!
//! Forms hold raw text as typed. Validation runs before any request is made
//! and turns the text into the typed request body.

use thiserror::Error;

use super::{CheckInRequest, NewReservation};

/// Status given to reservations unless the user picks another
pub const DEFAULT_RESERVATION_STATUS: &str = "confirmada";

/// A form field is missing or malformed
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("{field} must be a number, got '{value}'")]
    NotANumber { field: &'static str, value: String },

    #[error("price must be greater than 0")]
    NonPositivePrice,
}

/// Raw input for a new reservation
#[derive(Debug, Clone, Default)]
pub struct ReservationForm {
    pub passenger_id: String,
    pub flight_id: String,
    pub reservation_code: String,
    /// Empty means [`DEFAULT_RESERVATION_STATUS`]
    pub status: String,
    pub price: String,
}

impl ReservationForm {
    pub fn validate(&self) -> Result<NewReservation, ValidationError> {
        let passenger_id = parse_id("passenger id", &self.passenger_id)?;
        let flight_id = parse_id("flight id", &self.flight_id)?;
        let reservation_code = required("reservation code", &self.reservation_code)?;

        let price_text = required("price", &self.price)?;
        let price: f64 = price_text.parse().map_err(|_| ValidationError::NotANumber {
            field: "price",
            value: price_text.clone(),
        })?;
        if price.is_nan() || price <= 0.0 {
            return Err(ValidationError::NonPositivePrice);
        }

        let status = match self.status.trim() {
            "" => DEFAULT_RESERVATION_STATUS.to_string(),
            status => status.to_string(),
        };

        Ok(NewReservation {
            passenger_id,
            flight_id,
            reservation_code,
            status,
            price,
        })
    }
}

/// Raw input for a check-in
#[derive(Debug, Clone, Default)]
pub struct CheckInForm {
    pub reservation_id: String,
    pub seat_id: String,
    pub gate_id: String,
    pub date: String,
    pub time: String,
}

impl CheckInForm {
    /// All five fields are required
    pub fn validate(&self) -> Result<CheckInRequest, ValidationError> {
        Ok(CheckInRequest {
            reservation_id: required("reservation id", &self.reservation_id)?,
            seat_id: required("seat id", &self.seat_id)?,
            gate_id: required("gate id", &self.gate_id)?,
            checkin_date: required("check-in date", &self.date)?,
            checkin_time: required("check-in time", &self.time)?,
        })
    }
}

/// Validates a passenger id entered for a lookup
pub fn parse_passenger_id(value: &str) -> Result<i64, ValidationError> {
    parse_id("passenger id", value)
}

fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(value.to_string())
}

fn parse_id(field: &'static str, value: &str) -> Result<i64, ValidationError> {
    let value = required(field, value)?;
    value
        .parse()
        .map_err(|_| ValidationError::NotANumber { field, value })
}
