use chrono::{DateTime, Utc};
use serde::Serialize;
use strum::{AsRefStr, Display};
use utoipa::ToSchema;

/// Which end of a visit a reservation books.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum ReservationKind {
    Arrival,
    Departure,
}

impl ReservationKind {
    pub fn table(&self) -> &'static str {
        match self {
            ReservationKind::Arrival => "arrivals",
            ReservationKind::Departure => "departures",
        }
    }
}

/// An arrival or departure row. Both tables share this layout.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
pub struct Reservation {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = 1)]
    pub user_id: u64,
    #[schema(example = 10)]
    pub time_slot_id: u64,
    #[schema(example = "2026-01-01T00:00:00Z", format = "date-time", value_type = String)]
    pub created_at: DateTime<Utc>,
}
