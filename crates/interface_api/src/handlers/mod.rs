//! Request handlers

pub mod applications;
pub mod cases;
pub mod health;
pub mod messages;
pub mod notifications;
