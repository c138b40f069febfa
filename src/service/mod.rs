use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, error, info, instrument};

use crate::{
    auth::{
        credentials::Credentials,
        password::{hash_password, verify_password},
    },
    error::{AppError, AppResult},
    model::{
        attendance::Attendance,
        reservation::{Reservation, ReservationKind},
        time_slot::TimeSlot,
        user::User,
    },
    models::SignupReq,
    store::{NewUser, Store},
    utils::email_cache::EmailCache,
};

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Passwords travel in a raw header on every call, so they must survive
/// header parsing unchanged: no surrounding whitespace and no control characters.
fn validate_password(password: &str) -> AppResult<()> {
    if password.is_empty() {
        return Err(AppError::BadRequest("Password must not be empty".into()));
    }
    if password.trim() != password || password.chars().any(char::is_control) {
        return Err(AppError::BadRequest(
            "Password must not have surrounding whitespace or control characters".into(),
        ));
    }
    Ok(())
}

/// Business rules between the HTTP handlers and the store.
pub struct ServiceLayer {
    store: Arc<dyn Store>,
    email_cache: EmailCache,
    // Verified against on unknown emails so both login failures cost one argon2 run.
    dummy_hash: String,
}

impl ServiceLayer {
    pub fn new(store: Arc<dyn Store>, email_cache: EmailCache) -> AppResult<Self> {
        Ok(Self {
            store,
            email_cache,
            dummy_hash: hash_password("slotbook-unknown-user")?,
        })
    }

    /// Returns the stored user when `password` matches, `None` otherwise.
    #[instrument(name = "check_user", skip(self, password))]
    pub async fn check_user(&self, email: &str, password: &str) -> AppResult<Option<User>> {
        let email = normalize_email(email);
        if email.is_empty() || password.is_empty() {
            debug!("Empty credentials");
            return Ok(None);
        }

        let Some(user) = self.store.find_user_by_email(&email).await? else {
            let _ = verify_password(password, &self.dummy_hash);
            info!("Invalid credentials: user not found");
            return Ok(None);
        };

        match verify_password(password, &user.password_hash) {
            Ok(true) => Ok(Some(user)),
            Ok(false) => {
                info!(user_id = user.id, "Invalid credentials: password mismatch");
                Ok(None)
            }
            Err(e) => {
                error!(error = %e, user_id = user.id, "Stored password hash is unreadable");
                Err(e.into())
            }
        }
    }

    pub async fn require_user(&self, credentials: &Credentials) -> AppResult<User> {
        self.check_user(&credentials.email, &credentials.password)
            .await?
            .ok_or(AppError::Unauthorized)
    }

    pub async fn open_time_slots(&self, location_id: u64) -> AppResult<Vec<TimeSlot>> {
        self.store.open_time_slots_by_location(location_id).await
    }

    /// Books `time_slot_id` for `user_id`. The slot stays open afterwards and
    /// several users may hold the same slot.
    #[instrument(name = "reserve", skip(self))]
    pub async fn reserve(
        &self,
        kind: ReservationKind,
        user_id: u64,
        time_slot_id: u64,
    ) -> AppResult<Reservation> {
        let slot = self
            .store
            .find_time_slot(time_slot_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Time slot {time_slot_id} not found")))?;

        if !slot.is_open {
            return Err(AppError::Conflict(format!(
                "Time slot {time_slot_id} is not open"
            )));
        }

        let reservation = self
            .store
            .insert_reservation(kind, user_id, time_slot_id)
            .await?;

        info!(reservation_id = reservation.id, %kind, "Reservation created");
        Ok(reservation)
    }

    #[instrument(name = "mark_attendance", skip(self))]
    pub async fn mark_attendance(
        &self,
        user_id: u64,
        date: NaiveDate,
        is_attending: bool,
    ) -> AppResult<Attendance> {
        self.store
            .upsert_attendance(user_id, date, is_attending)
            .await
    }

    /// Replaces the password of `user`; email and location are never touched.
    #[instrument(name = "edit_password", skip(self, user, new_password), fields(user_id = user.id))]
    pub async fn edit_password(&self, user: &User, new_password: &str) -> AppResult<User> {
        validate_password(new_password)?;

        let hashed = hash_password(new_password)?;

        let updated = self
            .store
            .update_password(user.id, &hashed)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user.id)))?;

        info!("Password updated");
        Ok(updated)
    }

    #[instrument(name = "signup", skip(self, req), fields(email = %req.email))]
    pub async fn signup(&self, req: SignupReq) -> AppResult<User> {
        let email = normalize_email(&req.email);

        if email.is_empty() || req.password.is_empty() {
            return Err(AppError::BadRequest(
                "Email and password must not be empty".into(),
            ));
        }

        if !email.contains('@') {
            return Err(AppError::BadRequest("Email is not valid".into()));
        }

        validate_password(&req.password)?;

        if self.email_cache.is_taken(&email).await {
            return Err(AppError::Conflict("Email already registered".into()));
        }

        if let Some(location_id) = req.location_id {
            if self.store.find_location(location_id).await?.is_none() {
                return Err(AppError::BadRequest(format!(
                    "Location {location_id} does not exist"
                )));
            }
        }

        let user = self
            .store
            .insert_user(NewUser {
                email,
                password_hash: hash_password(&req.password)?,
                location_id: req.location_id,
            })
            .await?;

        self.email_cache.mark_taken(&user.email).await;

        info!(user_id = user.id, "User registered");
        Ok(user)
    }

    pub async fn users_by_location(&self, location_id: u64) -> AppResult<Vec<User>> {
        self.store.users_by_location(location_id).await
    }
}
