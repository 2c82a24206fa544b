//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for common entities across the legal
//! match system. These fixtures are designed to be consistent and
//! predictable for unit tests.

use core_kernel::{ActorContext, Currency, Money, PartyId};
use domain_case::CaseType;
use domain_engagement::LawyerProfile;
use rust_decimal_macros::dec;

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// A typical small-matter budget
    pub fn usd_budget() -> Money {
        Money::new(dec!(1500.00), Currency::USD)
    }

    /// A large budget for corporate matters
    pub fn usd_large_budget() -> Money {
        Money::new(dec!(50000.00), Currency::USD)
    }

    /// A zero amount; passes budget validation but buys nothing
    pub fn usd_zero() -> Money {
        Money::zero(Currency::USD)
    }

    /// A EUR amount for currency mismatch tests
    pub fn eur_budget() -> Money {
        Money::new(dec!(1200.00), Currency::EUR)
    }

    /// A negative amount, rejected as a budget
    pub fn usd_negative() -> Money {
        Money::new(dec!(-10.00), Currency::USD)
    }
}

/// Fixture for actors
pub struct ActorFixtures;

impl ActorFixtures {
    /// A fresh client context
    pub fn client() -> ActorContext {
        ActorContext::client(PartyId::new())
    }

    /// A fresh lawyer context
    pub fn lawyer() -> ActorContext {
        ActorContext::lawyer(PartyId::new())
    }
}

/// Fixture for case intake strings
pub struct CaseFixtures;

impl CaseFixtures {
    pub fn title() -> &'static str {
        "Security deposit dispute"
    }

    pub fn case_type() -> CaseType {
        CaseType::Property
    }

    pub fn client_role() -> &'static str {
        "tenant"
    }

    pub fn cover_letter() -> &'static str {
        "I have ten years of landlord-tenant experience"
    }
}

/// Fixture for lawyer profiles
pub struct ProfileFixtures;

impl ProfileFixtures {
    pub fn lawyer_profile(party_id: PartyId) -> LawyerProfile {
        LawyerProfile {
            party_id,
            display_name: "Jordan Blake".to_string(),
            firm: Some("Blake & Associates".to_string()),
            practice_areas: vec!["property".to_string(), "civil".to_string()],
        }
    }

    pub fn solo_profile(party_id: PartyId) -> LawyerProfile {
        LawyerProfile {
            party_id,
            display_name: "Priya Nair".to_string(),
            firm: None,
            practice_areas: vec!["family".to_string()],
        }
    }
}
