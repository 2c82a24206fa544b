//! Actor identity
//!
//! The identity collaborator (session layer, JWT middleware, test harness)
//! supplies the current actor's id and role. Domain services never look up
//! identity themselves; they receive an `ActorContext` with each call.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::identifiers::PartyId;

/// The role an actor holds in the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    /// A client seeking legal representation
    Client,
    /// A lawyer seeking cases
    Lawyer,
}

impl ActorRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActorRole::Client => "client",
            ActorRole::Lawyer => "lawyer",
        }
    }
}

impl fmt::Display for ActorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ActorRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "client" => Ok(ActorRole::Client),
            "lawyer" => Ok(ActorRole::Lawyer),
            other => Err(format!("unknown actor role: {other}")),
        }
    }
}

/// The authenticated actor making a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActorContext {
    pub actor_id: PartyId,
    pub role: ActorRole,
}

impl ActorContext {
    pub fn new(actor_id: PartyId, role: ActorRole) -> Self {
        Self { actor_id, role }
    }

    /// Convenience constructor for a client actor
    pub fn client(actor_id: PartyId) -> Self {
        Self::new(actor_id, ActorRole::Client)
    }

    /// Convenience constructor for a lawyer actor
    pub fn lawyer(actor_id: PartyId) -> Self {
        Self::new(actor_id, ActorRole::Lawyer)
    }

    pub fn is_client(&self) -> bool {
        self.role == ActorRole::Client
    }

    pub fn is_lawyer(&self) -> bool {
        self.role == ActorRole::Lawyer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        let role: ActorRole = "lawyer".parse().unwrap();
        assert_eq!(role, ActorRole::Lawyer);
        assert_eq!(role.to_string(), "lawyer");
    }

    #[test]
    fn test_role_rejects_unknown() {
        assert!("paralegal".parse::<ActorRole>().is_err());
    }

    #[test]
    fn test_actor_context_constructors() {
        let id = PartyId::new();
        assert!(ActorContext::client(id).is_client());
        assert!(ActorContext::lawyer(id).is_lawyer());
    }
}
