//! sea-orm entities for the auth service database.

pub mod otps;
pub mod sms_outbox;
pub mod tasks;
pub mod users;
