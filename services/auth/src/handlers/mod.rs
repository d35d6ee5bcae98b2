pub mod auth;
pub mod health;
pub mod response;
pub mod task;
pub mod user;
