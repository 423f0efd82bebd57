pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{FilePreferences, MemoryPreferences};
pub use config::FareConfig;
pub use crate::core::{
    calculator::{estimate, quote},
    rule_store::RuleStore,
    schedule::TierSchedule,
    tariff::Revision,
};
pub use domain::model::{Breakdown, Discount, FareField, FareRule, RuleSet};
pub use utils::error::{FareError, Result};
