pub mod credentials;
pub mod handlers;
pub mod password;
