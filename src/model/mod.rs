pub mod attendance;
pub mod location;
pub mod reservation;
pub mod time_slot;
pub mod user;
