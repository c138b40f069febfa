pub mod attendance;
pub mod reservation;
pub mod time_slot;
pub mod user;
