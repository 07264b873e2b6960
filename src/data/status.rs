//! Flight status classification
//!
//! The service reports status as free text ("confirmado", "retraso",
//! "embarque", ...). Views only need to know which bucket a status falls in.

/// Coarse status bucket used for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightStatus {
    OnTime,
    Boarding,
    Delayed,
    Cancelled,
}

impl FlightStatus {
    /// Classifies free-form status text, case-insensitively
    ///
    /// Anything that does not mention a delay, cancellation, or boarding is
    /// treated as on time.
    pub fn classify(status: &str) -> Self {
        let status = status.to_lowercase();
        if status.contains("retraso") || status.contains("delay") {
            FlightStatus::Delayed
        } else if status.contains("cancelado") || status.contains("cancel") {
            FlightStatus::Cancelled
        } else if status.contains("embarque") || status.contains("board") {
            FlightStatus::Boarding
        } else {
            FlightStatus::OnTime
        }
    }

    /// Short name of the bucket
    pub fn label(self) -> &'static str {
        match self {
            FlightStatus::OnTime => "On time",
            FlightStatus::Boarding => "Boarding",
            FlightStatus::Delayed => "Delayed",
            FlightStatus::Cancelled => "Cancelled",
        }
    }

    /// Whether the status needs the passenger's attention
    pub fn is_disrupted(self) -> bool {
        matches!(self, FlightStatus::Delayed | FlightStatus::Cancelled)
    }
}
