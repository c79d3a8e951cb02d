pub mod auth;
pub mod params;
pub mod session;
