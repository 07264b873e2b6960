//! Airline operations API client
//!
//! Wraps JSON requests to the operations service with a read-through
//! [`ResponseCache`]. Reads (GET) are answered from the cache while the stored
//! response is fresh; writes always go to the network and leave invalidation of
//! affected read paths to the caller.

use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::cache::ResponseCache;
use crate::data::{CheckInReceipt, CheckInRequest, Flight, LuggageItem, NewReservation, Reservation};

/// Origin of the operations service when none is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

pub const FLIGHTS_PATH: &str = "/flights";
pub const RESERVATIONS_PATH: &str = "/reservations";
pub const LUGGAGE_PATH: &str = "/luggage";
pub const CHECKIN_PATH: &str = "/checkin";

/// Errors that can occur when talking to the operations service
#[derive(Debug, Error)]
pub enum ApiError {
    /// The service answered with a non-success status
    #[error("API error: {status}")]
    RequestFailed { status: u16 },

    /// The request could not be completed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not the expected JSON
    #[error("Failed to parse JSON response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Message suitable for showing to the user
    pub fn user_message(&self) -> String {
        match self {
            ApiError::RequestFailed { status: 404 } => {
                "Nothing was found for that request.".to_string()
            }
            ApiError::RequestFailed { status } => {
                format!("The service rejected the request (status {}).", status)
            }
            ApiError::Http(_) => {
                "Could not reach the service. Check that the server is available.".to_string()
            }
            ApiError::Decode(_) => "The service sent a response that could not be read.".to_string(),
        }
    }
}

/// Method and optional JSON body of a request
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<Value>,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self {
            method: Method::GET,
            body: None,
        }
    }

    /// A POST carrying `body` as JSON
    pub fn post(body: Value) -> Self {
        Self {
            method: Method::POST,
            body: Some(body),
        }
    }

    /// Whether the request may be served from and stored in the cache
    pub fn is_read(&self) -> bool {
        self.method == Method::GET
    }
}

/// Client for the airline operations service
#[derive(Debug, Clone)]
pub struct ApiClient {
    http_client: Client,
    base_url: String,
    cache: ResponseCache,
}

impl ApiClient {
    /// Creates a client for `base_url` using the given cache
    pub fn new(base_url: impl Into<String>, cache: ResponseCache) -> Self {
        Self::with_client(Client::new(), base_url, cache)
    }

    /// Creates a client with a custom HTTP client
    pub fn with_client(http_client: Client, base_url: impl Into<String>, cache: ResponseCache) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http_client,
            base_url,
            cache,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// Performs a request against `path` and decodes the JSON response
    ///
    /// With no `options`, or a GET, a fresh cached response is returned without
    /// touching the network, and a successful network response is cached.
    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        path: &str,
        options: Option<&RequestOptions>,
    ) -> Result<T, ApiError> {
        let is_read = options.map_or(true, RequestOptions::is_read);

        if is_read {
            if let Some(cached) = self.cache.get(path) {
                match serde_json::from_value(cached) {
                    Ok(data) => return Ok(data),
                    Err(err) => tracing::debug!(path, error = %err, "cached response has unexpected shape"),
                }
            }
        }

        let method = options.map_or(Method::GET, |o| o.method.clone());
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%method, %url, "sending request");

        let mut request = self.http_client.request(method.clone(), &url);
        if let Some(body) = options.and_then(|o| o.body.as_ref()) {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%method, path, status = status.as_u16(), "request failed");
            return Err(ApiError::RequestFailed {
                status: status.as_u16(),
            });
        }

        let text = response.text().await?;
        let value: Value = serde_json::from_str(&text)?;
        // Only bodies that decode as T are worth keeping
        let data: T = serde_json::from_value(value.clone())?;

        if is_read {
            self.cache.set(path, &value);
        }

        Ok(data)
    }

    /// Drops the cached response for `path`, or every cached response
    pub fn invalidate(&self, path: Option<&str>) {
        self.cache.invalidate(path);
    }

    /// Fetches the full flight list
    pub async fn list_flights(&self) -> Result<Vec<Flight>, ApiError> {
        self.fetch_json(FLIGHTS_PATH, None).await
    }

    /// Fetches the reservations held by a passenger
    pub async fn reservations_for(&self, passenger_id: i64) -> Result<Vec<Reservation>, ApiError> {
        self.fetch_json(&reservations_path(passenger_id), None).await
    }

    /// Creates a reservation and invalidates the reservation reads it affects
    pub async fn create_reservation(&self, reservation: &NewReservation) -> Result<Value, ApiError> {
        let options = RequestOptions::post(serde_json::to_value(reservation)?);
        let created = self.fetch_json(RESERVATIONS_PATH, Some(&options)).await?;

        self.invalidate(Some(RESERVATIONS_PATH));
        self.invalidate(Some(&reservations_path(reservation.passenger_id)));

        Ok(created)
    }

    /// Fetches the luggage registered to a passenger
    pub async fn luggage_for(&self, passenger_id: i64) -> Result<Vec<LuggageItem>, ApiError> {
        self.fetch_json(&luggage_path(passenger_id), None).await
    }

    /// Checks a passenger in for a reserved flight
    pub async fn check_in(&self, request: &CheckInRequest) -> Result<CheckInReceipt, ApiError> {
        let options = RequestOptions::post(serde_json::to_value(request)?);
        self.fetch_json(CHECKIN_PATH, Some(&options)).await
    }
}

pub fn reservations_path(passenger_id: i64) -> String {
    format!("{}/{}", RESERVATIONS_PATH, passenger_id)
}

pub fn luggage_path(passenger_id: i64) -> String {
    format!("{}/{}", LUGGAGE_PATH, passenger_id)
}
