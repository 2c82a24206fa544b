//! Core Kernel - Foundational types and utilities for the legal matching system
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Strongly-typed identifiers for cases, parties, and engagement entities
//! - Money types with precise decimal arithmetic for case budgets
//! - Actor identity (who is calling, and in which role)
//! - Port abstractions for swappable persistence and collaborator adapters

pub mod actor;
pub mod identifiers;
pub mod money;
pub mod ports;

pub use actor::{ActorContext, ActorRole};
pub use identifiers::{
    ApplicationId, AttachmentId, CaseId, MessageId, NotificationId, PartyId, TimelineEventId,
};
pub use money::{Currency, Money, MoneyError};
pub use ports::{
    AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, OperationMetadata, PortError,
};
