use async_trait::async_trait;
use chrono::NaiveDate;

use crate::{
    error::AppResult,
    model::{
        attendance::Attendance,
        location::Location,
        reservation::{Reservation, ReservationKind},
        time_slot::TimeSlot,
        user::User,
    },
};

#[cfg(test)]
pub mod memory;
pub mod mysql;

/// A user row about to be inserted. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub location_id: Option<u64>,
}

/// Data access used by the service layer.
///
/// Implementations return `AppError::Conflict` when an insert would break the
/// unique email constraint; every other backend failure is `AppError::Database`.
#[async_trait]
pub trait Store: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>>;

    async fn insert_user(&self, user: NewUser) -> AppResult<User>;

    async fn update_password(&self, user_id: u64, password_hash: &str) -> AppResult<Option<User>>;

    async fn users_by_location(&self, location_id: u64) -> AppResult<Vec<User>>;

    async fn find_location(&self, id: u64) -> AppResult<Option<Location>>;

    /// Slots of `location_id` with the open flag set, earliest first.
    async fn open_time_slots_by_location(&self, location_id: u64) -> AppResult<Vec<TimeSlot>>;

    async fn find_time_slot(&self, id: u64) -> AppResult<Option<TimeSlot>>;

    async fn insert_reservation(
        &self,
        kind: ReservationKind,
        user_id: u64,
        time_slot_id: u64,
    ) -> AppResult<Reservation>;

    /// Insert or overwrite the record for `(user_id, date)`.
    async fn upsert_attendance(
        &self,
        user_id: u64,
        date: NaiveDate,
        is_attending: bool,
    ) -> AppResult<Attendance>;
}
