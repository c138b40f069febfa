use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(example = json!({
    "id": 10,
    "location_id": 1,
    "start_time": "2026-01-05T08:00:00",
    "end_time": "2026-01-05T08:30:00",
    "is_open": true
}))]
pub struct TimeSlot {
    pub id: u64,
    pub location_id: u64,
    #[schema(value_type = String, format = "date-time")]
    pub start_time: NaiveDateTime,
    #[schema(value_type = String, format = "date-time")]
    pub end_time: NaiveDateTime,
    pub is_open: bool,
}
