pub mod login;
pub mod otp;
pub mod profile;
pub mod task;
pub mod token;
pub mod verify;
