use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct SignupReq {
    #[schema(example = "a@x.com", format = "email")]
    pub email: String,
    #[schema(example = "p1")]
    pub password: String,
    #[schema(example = 1, nullable = true)]
    pub location_id: Option<u64>,
}

/// Only the password is honoured; any other user fields are ignored.
#[derive(Deserialize, ToSchema)]
pub struct EditUserReq {
    #[schema(example = "new-secret")]
    pub password: String,
}

/// The user a reservation is made for, as sent by the client.
#[derive(Deserialize, ToSchema)]
pub struct ReserveReq {
    #[schema(example = 1)]
    pub id: u64,
}

#[derive(Deserialize, ToSchema)]
pub struct MarkAttendanceReq {
    #[schema(example = true)]
    pub is_attending: bool,
    #[schema(example = "2026-01-05", format = "date", value_type = String)]
    pub date: NaiveDate,
}
