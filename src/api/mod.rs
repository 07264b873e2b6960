//! Access to the airline operations service

mod client;

pub use client::{
    luggage_path, reservations_path, ApiClient, ApiError, RequestOptions, CHECKIN_PATH,
    DEFAULT_BASE_URL, FLIGHTS_PATH, LUGGAGE_PATH, RESERVATIONS_PATH,
};
