use crate::utils::error::{FareError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_non_negative, validate_range, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// 一個時段的計價規則
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FareRule {
    pub id: String,
    pub name: String,
    /// 起步價
    pub base_fare: f64,
    /// 起步里程
    pub base_distance: f64,
    /// 超出起步里程後每公里價格
    pub unit_price: f64,
    /// 遠途費起算公里數
    pub long_distance_threshold: f64,
    /// 遠途費每公里加價
    pub long_distance_surcharge: f64,
    /// 遠途費封頂金額
    pub long_distance_cap: f64,
}

impl FareRule {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: &str,
        name: &str,
        base_fare: f64,
        base_distance: f64,
        unit_price: f64,
        long_distance_threshold: f64,
        long_distance_surcharge: f64,
        long_distance_cap: f64,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            base_fare,
            base_distance,
            unit_price,
            long_distance_threshold,
            long_distance_surcharge,
            long_distance_cap,
        }
    }

    pub fn field(&self, field: FareField) -> f64 {
        match field {
            FareField::BaseFare => self.base_fare,
            FareField::BaseDistance => self.base_distance,
            FareField::UnitPrice => self.unit_price,
            FareField::LongDistanceThreshold => self.long_distance_threshold,
            FareField::LongDistanceSurcharge => self.long_distance_surcharge,
            FareField::LongDistanceCap => self.long_distance_cap,
        }
    }

    /// 修改單一數值欄位，負數會被拒絕且不修改原值
    pub fn set_field(&mut self, field: FareField, value: f64) -> Result<()> {
        validate_non_negative(field.key(), value)?;
        let slot = match field {
            FareField::BaseFare => &mut self.base_fare,
            FareField::BaseDistance => &mut self.base_distance,
            FareField::UnitPrice => &mut self.unit_price,
            FareField::LongDistanceThreshold => &mut self.long_distance_threshold,
            FareField::LongDistanceSurcharge => &mut self.long_distance_surcharge,
            FareField::LongDistanceCap => &mut self.long_distance_cap,
        };
        *slot = value;
        Ok(())
    }
}

impl Validate for FareRule {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("id", &self.id)?;
        for field in FareField::ALL {
            validate_non_negative(field.key(), self.field(field))?;
        }
        Ok(())
    }
}

/// FareRule 中可編輯的數值欄位
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FareField {
    BaseFare,
    BaseDistance,
    UnitPrice,
    LongDistanceThreshold,
    LongDistanceSurcharge,
    LongDistanceCap,
}

impl FareField {
    pub const ALL: [FareField; 6] = [
        FareField::BaseFare,
        FareField::BaseDistance,
        FareField::UnitPrice,
        FareField::LongDistanceThreshold,
        FareField::LongDistanceSurcharge,
        FareField::LongDistanceCap,
    ];

    /// 序列化時使用的欄位名稱
    pub fn key(self) -> &'static str {
        match self {
            FareField::BaseFare => "baseFare",
            FareField::BaseDistance => "baseDistance",
            FareField::UnitPrice => "unitPrice",
            FareField::LongDistanceThreshold => "longDistanceThreshold",
            FareField::LongDistanceSurcharge => "longDistanceSurcharge",
            FareField::LongDistanceCap => "longDistanceCap",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FareField::BaseFare => "起步价 (元)",
            FareField::BaseDistance => "起步里程 (公里)",
            FareField::UnitPrice => "超起步单价 (元/公里)",
            FareField::LongDistanceThreshold => "远途起算 (公里)",
            FareField::LongDistanceSurcharge => "远途附加 (元/公里)",
            FareField::LongDistanceCap => "远途费封顶 (元)",
        }
    }
}

impl FromStr for FareField {
    type Err = FareError;

    /// 同時接受 camelCase 與 snake_case
    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();

        FareField::ALL
            .into_iter()
            .find(|field| field.key().to_lowercase() == normalized)
            .ok_or_else(|| FareError::UnknownField {
                name: s.to_string(),
            })
    }
}

impl fmt::Display for FareField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// 有序、非空且 id 唯一的計價規則列表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<FareRule>", into = "Vec<FareRule>")]
pub struct RuleSet {
    rules: Vec<FareRule>,
}

impl RuleSet {
    pub fn new(rules: Vec<FareRule>) -> Result<Self> {
        let set = Self { rules };
        set.validate()?;
        Ok(set)
    }

    /// 內建價格表直接建立，不重複驗證
    pub(crate) fn from_defaults(rules: Vec<FareRule>) -> Self {
        debug_assert!(!rules.is_empty());
        Self { rules }
    }

    pub fn rules(&self) -> &[FareRule] {
        &self.rules
    }

    pub fn get(&self, index: usize) -> Option<&FareRule> {
        self.rules.get(index)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// 經過驗證的 RuleSet 一律回傳 false
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FareRule> {
        self.rules.iter()
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.rules.iter().position(|rule| rule.id == id)
    }

    /// 取代指定位置的規則；失敗時列表保持原樣
    pub fn replace(&mut self, index: usize, rule: FareRule) -> Result<()> {
        let len = self.rules.len();
        if index >= len {
            return Err(FareError::TierNotFound { index, len });
        }

        rule.validate()?;

        let collides = self
            .rules
            .iter()
            .enumerate()
            .any(|(i, other)| i != index && other.id == rule.id);
        if collides {
            return Err(FareError::DuplicateRuleId { id: rule.id });
        }

        self.rules[index] = rule;
        Ok(())
    }
}

impl Validate for RuleSet {
    fn validate(&self) -> Result<()> {
        if self.rules.is_empty() {
            return Err(FareError::ConfigError {
                message: "Rule set must contain at least one tier".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for rule in &self.rules {
            rule.validate()?;
            if !seen.insert(rule.id.as_str()) {
                return Err(FareError::DuplicateRuleId {
                    id: rule.id.clone(),
                });
            }
        }
        Ok(())
    }
}

impl TryFrom<Vec<FareRule>> for RuleSet {
    type Error = FareError;

    fn try_from(rules: Vec<FareRule>) -> Result<Self> {
        RuleSet::new(rules)
    }
}

impl From<RuleSet> for Vec<FareRule> {
    fn from(set: RuleSet) -> Self {
        set.rules
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a FareRule;
    type IntoIter = std::slice::Iter<'a, FareRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

/// 全域折扣倍率，範圍 [0.01, 1.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Discount(f64);

impl Discount {
    pub const MIN: f64 = 0.01;
    pub const MAX: f64 = 1.0;
    pub const NONE: Discount = Discount(1.0);

    pub fn new(value: f64) -> Result<Self> {
        validate_range("discount", value, Self::MIN, Self::MAX)?;
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn is_none(self) -> bool {
        self.0 >= Self::MAX
    }
}

impl Default for Discount {
    fn default() -> Self {
        Self::NONE
    }
}

impl TryFrom<f64> for Discount {
    type Error = FareError;

    fn try_from(value: f64) -> Result<Self> {
        Discount::new(value)
    }
}

impl From<Discount> for f64 {
    fn from(discount: Discount) -> Self {
        discount.0
    }
}

impl fmt::Display for Discount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 一次估價的明細
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakdown {
    pub total: f64,
    /// 無條件進位後的計費里程
    pub distance: f64,
    pub distance_cost: f64,
    pub long_distance_cost: f64,
    pub discount: Discount,
    pub rule: FareRule,
}

impl Breakdown {
    /// 套用折扣前的金額
    pub fn subtotal(&self) -> f64 {
        self.rule.base_fare + self.distance_cost + self.long_distance_cost
    }

    pub fn extra_distance(&self) -> f64 {
        (self.distance - self.rule.base_distance).max(0.0)
    }

    pub fn long_distance(&self) -> f64 {
        (self.distance - self.rule.long_distance_threshold).max(0.0)
    }

    pub fn shows_long_distance(&self) -> bool {
        self.distance > self.rule.long_distance_threshold || self.long_distance_cost > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rule(id: &str) -> FareRule {
        FareRule::new(id, "白天", 22.0, 5.0, 4.5, 30.0, 1.0, 200.0)
    }

    #[test]
    fn test_rule_serializes_camel_case() {
        let json = serde_json::to_value(sample_rule("day")).unwrap();
        assert_eq!(json["baseFare"], 22.0);
        assert_eq!(json["longDistanceCap"], 200.0);
        assert!(json.get("base_fare").is_none());
    }

    #[test]
    fn test_field_parsing_accepts_both_cases() {
        assert_eq!("baseFare".parse::<FareField>().unwrap(), FareField::BaseFare);
        assert_eq!("base_fare".parse::<FareField>().unwrap(), FareField::BaseFare);
        assert_eq!(
            "long-distance-cap".parse::<FareField>().unwrap(),
            FareField::LongDistanceCap
        );
        assert!(matches!(
            "price".parse::<FareField>(),
            Err(FareError::UnknownField { .. })
        ));
    }

    #[test]
    fn test_set_field_rejects_negative() {
        let mut rule = sample_rule("day");
        assert!(rule.set_field(FareField::UnitPrice, -1.0).is_err());
        assert_eq!(rule.unit_price, 4.5);

        rule.set_field(FareField::UnitPrice, 5.0).unwrap();
        assert_eq!(rule.unit_price, 5.0);
    }

    #[test]
    fn test_threshold_below_base_distance_is_allowed() {
        let mut rule = sample_rule("day");
        rule.set_field(FareField::LongDistanceThreshold, 2.0).unwrap();
        assert!(rule.validate().is_ok());
    }

    #[test]
    fn test_rule_set_rejects_empty_and_duplicates() {
        assert!(RuleSet::new(vec![]).is_err());
        assert!(matches!(
            RuleSet::new(vec![sample_rule("day"), sample_rule("day")]),
            Err(FareError::DuplicateRuleId { .. })
        ));
    }

    #[test]
    fn test_replace_keeps_ids_unique() {
        let mut set = RuleSet::new(vec![sample_rule("day"), sample_rule("night")]).unwrap();

        assert!(matches!(
            set.replace(1, sample_rule("day")),
            Err(FareError::DuplicateRuleId { .. })
        ));
        assert!(matches!(
            set.replace(5, sample_rule("late")),
            Err(FareError::TierNotFound { index: 5, len: 2 })
        ));

        set.replace(1, sample_rule("late")).unwrap();
        assert_eq!(set.position("late"), Some(1));
    }

    #[test]
    fn test_rule_set_deserialize_validates() {
        let json = r#"[{"id":"a","name":"A","baseFare":-1,"baseDistance":0,"unitPrice":0,
            "longDistanceThreshold":0,"longDistanceSurcharge":0,"longDistanceCap":0}]"#;
        assert!(serde_json::from_str::<RuleSet>(json).is_err());
        assert!(serde_json::from_str::<RuleSet>("[]").is_err());
    }

    #[test]
    fn test_discount_bounds() {
        assert!(Discount::new(0.9).is_ok());
        assert!(Discount::new(0.01).is_ok());
        assert!(Discount::new(0.0).is_err());
        assert!(Discount::new(1.01).is_err());
        assert!(Discount::default().is_none());
        assert!(serde_json::from_str::<Discount>("2.0").is_err());
    }
}
