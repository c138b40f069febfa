use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::MySqlPool;
use tracing::debug;

use super::{NewUser, Store};
use crate::{
    error::{AppError, AppResult},
    model::{
        attendance::Attendance,
        location::Location,
        reservation::{Reservation, ReservationKind},
        time_slot::TimeSlot,
        user::User,
    },
};

const USER_COLUMNS: &str = "id, email, password_hash, location_id";
const TIME_SLOT_COLUMNS: &str = "id, location_id, start_time, end_time, is_open";

#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn fetch_user(&self, id: u64) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

#[async_trait]
impl Store for MySqlStore {
    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = ?"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn insert_user(&self, user: NewUser) -> AppResult<User> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (email, password_hash, location_id)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.location_id)
        .execute(&self.pool)
        .await;

        let id = match result {
            Ok(done) => done.last_insert_id(),
            Err(e) => {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_unique_violation() {
                        return Err(AppError::Conflict("Email already registered".into()));
                    }
                }
                return Err(e.into());
            }
        };

        debug!(user_id = id, "User inserted");

        self.fetch_user(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {id}")))
    }

    async fn update_password(&self, user_id: u64, password_hash: &str) -> AppResult<Option<User>> {
        sqlx::query("UPDATE users SET password_hash = ? WHERE id = ?")
            .bind(password_hash)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        self.fetch_user(user_id).await
    }

    async fn users_by_location(&self, location_id: u64) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE location_id = ? ORDER BY id"
        ))
        .bind(location_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn find_location(&self, id: u64) -> AppResult<Option<Location>> {
        let location = sqlx::query_as::<_, Location>("SELECT id, name FROM locations WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(location)
    }

    async fn open_time_slots_by_location(&self, location_id: u64) -> AppResult<Vec<TimeSlot>> {
        let slots = sqlx::query_as::<_, TimeSlot>(&format!(
            r#"
            SELECT {TIME_SLOT_COLUMNS}
            FROM time_slots
            WHERE location_id = ?
            AND is_open = TRUE
            ORDER BY start_time, id
            "#
        ))
        .bind(location_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(slots)
    }

    async fn find_time_slot(&self, id: u64) -> AppResult<Option<TimeSlot>> {
        let slot = sqlx::query_as::<_, TimeSlot>(&format!(
            "SELECT {TIME_SLOT_COLUMNS} FROM time_slots WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(slot)
    }

    async fn insert_reservation(
        &self,
        kind: ReservationKind,
        user_id: u64,
        time_slot_id: u64,
    ) -> AppResult<Reservation> {
        let table = kind.table();

        let id = sqlx::query(&format!(
            "INSERT INTO {table} (user_id, time_slot_id) VALUES (?, ?)"
        ))
        .bind(user_id)
        .bind(time_slot_id)
        .execute(&self.pool)
        .await?
        .last_insert_id();

        let reservation = sqlx::query_as::<_, Reservation>(&format!(
            "SELECT id, user_id, time_slot_id, created_at FROM {table} WHERE id = ?"
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(reservation)
    }

    async fn upsert_attendance(
        &self,
        user_id: u64,
        date: NaiveDate,
        is_attending: bool,
    ) -> AppResult<Attendance> {
        sqlx::query(
            r#"
            INSERT INTO attendance (user_id, date, is_attending)
            VALUES (?, ?, ?)
            ON DUPLICATE KEY UPDATE is_attending = VALUES(is_attending)
            "#,
        )
        .bind(user_id)
        .bind(date)
        .bind(is_attending)
        .execute(&self.pool)
        .await?;

        let attendance = sqlx::query_as::<_, Attendance>(
            r#"
            SELECT id, user_id, date, is_attending
            FROM attendance
            WHERE user_id = ?
            AND date = ?
            "#,
        )
        .bind(user_id)
        .bind(date)
        .fetch_one(&self.pool)
        .await?;

        Ok(attendance)
    }
}
