//! In-process `Store` used by the test-suite.

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};

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

#[derive(Default)]
struct Tables {
    locations: Vec<Location>,
    users: Vec<User>,
    time_slots: Vec<TimeSlot>,
    arrivals: Vec<Reservation>,
    departures: Vec<Reservation>,
    attendance: Vec<Attendance>,
    next_id: u64,
}

impl Tables {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn reservations_mut(&mut self, kind: ReservationKind) -> &mut Vec<Reservation> {
        match kind {
            ReservationKind::Arrival => &mut self.arrivals,
            ReservationKind::Departure => &mut self.departures,
        }
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_location(&self, id: u64, name: &str) -> Location {
        let location = Location {
            id,
            name: name.to_string(),
        };
        self.tables
            .write()
            .expect("store lock poisoned")
            .locations
            .push(location.clone());
        location
    }

    pub fn add_time_slot(&self, slot: TimeSlot) {
        self.tables
            .write()
            .expect("store lock poisoned")
            .time_slots
            .push(slot);
    }

    pub fn reservations(&self, kind: ReservationKind) -> Vec<Reservation> {
        let tables = self.tables.read().expect("store lock poisoned");
        match kind {
            ReservationKind::Arrival => tables.arrivals.clone(),
            ReservationKind::Departure => tables.departures.clone(),
        }
    }

    pub fn attendance_rows(&self) -> Vec<Attendance> {
        self.tables
            .read()
            .expect("store lock poisoned")
            .attendance
            .clone()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let tables = self.tables.read().expect("store lock poisoned");
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn insert_user(&self, user: NewUser) -> AppResult<User> {
        let mut tables = self.tables.write().expect("store lock poisoned");
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(AppError::Conflict("Email already registered".into()));
        }

        let user = User {
            id: tables.next_id(),
            email: user.email,
            password_hash: user.password_hash,
            location_id: user.location_id,
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn update_password(&self, user_id: u64, password_hash: &str) -> AppResult<Option<User>> {
        let mut tables = self.tables.write().expect("store lock poisoned");
        Ok(tables.users.iter_mut().find(|u| u.id == user_id).map(|u| {
            u.password_hash = password_hash.to_string();
            u.clone()
        }))
    }

    async fn users_by_location(&self, location_id: u64) -> AppResult<Vec<User>> {
        let tables = self.tables.read().expect("store lock poisoned");
        Ok(tables
            .users
            .iter()
            .filter(|u| u.location_id == Some(location_id))
            .cloned()
            .collect())
    }

    async fn find_location(&self, id: u64) -> AppResult<Option<Location>> {
        let tables = self.tables.read().expect("store lock poisoned");
        Ok(tables.locations.iter().find(|l| l.id == id).cloned())
    }

    async fn open_time_slots_by_location(&self, location_id: u64) -> AppResult<Vec<TimeSlot>> {
        let tables = self.tables.read().expect("store lock poisoned");
        let mut slots: Vec<TimeSlot> = tables
            .time_slots
            .iter()
            .filter(|s| s.location_id == location_id && s.is_open)
            .cloned()
            .collect();
        slots.sort_by_key(|s| (s.start_time, s.id));
        Ok(slots)
    }

    async fn find_time_slot(&self, id: u64) -> AppResult<Option<TimeSlot>> {
        let tables = self.tables.read().expect("store lock poisoned");
        Ok(tables.time_slots.iter().find(|s| s.id == id).cloned())
    }

    async fn insert_reservation(
        &self,
        kind: ReservationKind,
        user_id: u64,
        time_slot_id: u64,
    ) -> AppResult<Reservation> {
        let mut tables = self.tables.write().expect("store lock poisoned");
        let reservation = Reservation {
            id: tables.next_id(),
            user_id,
            time_slot_id,
            created_at: Utc::now(),
        };
        tables.reservations_mut(kind).push(reservation.clone());
        Ok(reservation)
    }

    async fn upsert_attendance(
        &self,
        user_id: u64,
        date: NaiveDate,
        is_attending: bool,
    ) -> AppResult<Attendance> {
        let mut tables = self.tables.write().expect("store lock poisoned");
        if let Some(row) = tables
            .attendance
            .iter_mut()
            .find(|a| a.user_id == user_id && a.date == date)
        {
            row.is_attending = is_attending;
            return Ok(row.clone());
        }

        let row = Attendance {
            id: tables.next_id(),
            user_id,
            date,
            is_attending,
        };
        tables.attendance.push(row.clone());
        Ok(row)
    }
}
