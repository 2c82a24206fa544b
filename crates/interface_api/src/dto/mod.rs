//! Request/Response data transfer objects

pub mod cases;
pub mod engagement;
pub mod notifications;
