pub mod calculator;
pub mod rule_store;
pub mod schedule;
pub mod tariff;

pub use crate::domain::model::{Breakdown, Discount, FareField, FareRule, RuleSet};
pub use crate::domain::ports::PreferenceStorage;
pub use crate::utils::error::Result;
