use crate::core::schedule::TierSchedule;
use crate::domain::model::{FareRule, RuleSet};
use crate::utils::error::FareError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 儲存格式版本；每個版本有自己的儲存鍵、預設價格表與時段邊界
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Revision {
    /// 早期價格表，沒有折扣
    V1,
    #[default]
    V2,
}

impl Revision {
    pub fn rules_key(self) -> &'static str {
        match self {
            Revision::V1 => "FareRules.v1",
            Revision::V2 => "FareRules.v2",
        }
    }

    /// V1 沒有折扣設定
    pub fn discount_key(self) -> Option<&'static str> {
        match self {
            Revision::V1 => None,
            Revision::V2 => Some("FareDiscount.v2"),
        }
    }

    pub fn schedule(self) -> TierSchedule {
        match self {
            Revision::V1 => TierSchedule::LEGACY,
            Revision::V2 => TierSchedule::CURRENT,
        }
    }

    pub fn default_rules(self) -> RuleSet {
        let rules = match self {
            Revision::V1 => vec![
                FareRule::new("before19", "19点前", 20.0, 5.0, 3.0, 30.0, 0.0, 160.0),
                FareRule::new("before24", "24点前", 25.0, 5.0, 3.5, 30.0, 0.0, 160.0),
                FareRule::new("after24", "24点后", 30.0, 5.0, 4.0, 30.0, 0.8, 160.0),
            ],
            Revision::V2 => vec![
                FareRule::new("day", "白天", 22.0, 5.0, 4.5, 30.0, 1.0, 200.0),
                FareRule::new("evening", "晚上", 27.0, 5.0, 5.0, 30.0, 1.0, 200.0),
                FareRule::new("night", "深夜", 32.0, 5.0, 5.5, 30.0, 1.2, 200.0),
            ],
        };
        RuleSet::from_defaults(rules)
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Revision::V1 => f.write_str("v1"),
            Revision::V2 => f.write_str("v2"),
        }
    }
}

impl FromStr for Revision {
    type Err = FareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "v1" | "1" => Ok(Revision::V1),
            "v2" | "2" => Ok(Revision::V2),
            other => Err(FareError::InvalidConfigValueError {
                field: "storage.revision".to_string(),
                value: other.to_string(),
                reason: "Supported revisions: v1, v2".to_string(),
            }),
        }
    }
}
