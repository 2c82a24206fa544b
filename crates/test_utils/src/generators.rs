//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use core_kernel::{Currency, Money, PartyId};
use domain_case::CaseType;
use proptest::prelude::*;

/// Strategy for generating valid Currency values
pub fn currency_strategy() -> impl Strategy<Value = Currency> {
    prop_oneof![
        Just(Currency::USD),
        Just(Currency::EUR),
        Just(Currency::GBP),
        Just(Currency::CAD),
        Just(Currency::AUD),
        Just(Currency::INR),
    ]
}

/// Strategy for generating valid positive amounts in minor units
pub fn positive_amount_minor_strategy() -> impl Strategy<Value = i64> {
    1i64..1_000_000_000i64
}

/// Strategy for generating budgets that pass intake validation
pub fn budget_strategy() -> impl Strategy<Value = Money> {
    (positive_amount_minor_strategy(), currency_strategy())
        .prop_map(|(amount, currency)| Money::from_minor(amount, currency))
}

/// Strategy for generating case types
pub fn case_type_strategy() -> impl Strategy<Value = CaseType> {
    prop_oneof![
        Just(CaseType::Family),
        Just(CaseType::Criminal),
        Just(CaseType::Corporate),
        Just(CaseType::Immigration),
        Just(CaseType::Property),
        Just(CaseType::Employment),
        Just(CaseType::Civil),
        Just(CaseType::Other),
    ]
}

/// Strategy for generating non-empty case titles
pub fn title_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9 ]{0,60}".prop_map(|s| s.trim().to_string()).prop_filter(
        "titles must survive trimming",
        |s| !s.is_empty(),
    )
}

/// Strategy for generating distinct sets of lawyer ids
pub fn lawyer_ids_strategy(max: usize) -> impl Strategy<Value = Vec<PartyId>> {
    (1..=max).prop_map(|n| (0..n).map(|_| PartyId::new()).collect())
}
