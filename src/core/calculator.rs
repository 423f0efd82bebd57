use crate::domain::model::{Breakdown, Discount, FareRule, RuleSet};

/// 解析使用者輸入的里程；空白、非數字或非有限值都視為沒有輸入
pub fn parse_distance(input: &str) -> Option<f64> {
    let value: f64 = input.trim().parse().ok()?;
    value.is_finite().then_some(value)
}

/// 依規則估算價格
///
/// 計費里程無條件進位到整數公里，費用由三部分組成：
/// 1. 起步價
/// 2. 超出起步里程的部分 × 單價
/// 3. 超出遠途門檻的部分 × 遠途附加費，最多收到封頂金額
///
/// 合計後再乘上折扣。輸入無法解析時回傳 `None`。
pub fn estimate(distance_input: &str, rule: &FareRule, discount: Discount) -> Option<Breakdown> {
    let distance = parse_distance(distance_input)?.ceil();
    Some(estimate_distance(distance, rule, discount))
}

/// 以已進位的里程計價
pub fn estimate_distance(distance: f64, rule: &FareRule, discount: Discount) -> Breakdown {
    let distance_cost = (distance - rule.base_distance).max(0.0) * rule.unit_price;
    let raw_long_distance_cost =
        (distance - rule.long_distance_threshold).max(0.0) * rule.long_distance_surcharge;
    let long_distance_cost = raw_long_distance_cost.min(rule.long_distance_cap);

    let total = (rule.base_fare + distance_cost + long_distance_cost) * discount.value();

    tracing::debug!(
        "Estimated {} km on tier '{}': distance_cost={}, long_distance_cost={}, total={}",
        distance,
        rule.id,
        distance_cost,
        long_distance_cost,
        total
    );

    Breakdown {
        total,
        distance,
        distance_cost,
        long_distance_cost,
        discount,
        rule: rule.clone(),
    }
}

/// 以時段索引估價；索引超出範圍或輸入無效時不計價
pub fn quote(
    rules: &RuleSet,
    tier_index: usize,
    distance_input: &str,
    discount: Discount,
) -> Option<Breakdown> {
    let Some(rule) = rules.get(tier_index) else {
        tracing::debug!(
            "Tier index {} out of range ({} tiers), no price",
            tier_index,
            rules.len()
        );
        return None;
    };
    estimate(distance_input, rule, discount)
}

/// 沒有估價結果時顯示為 0
pub fn total_or_zero(breakdown: Option<&Breakdown>) -> f64 {
    breakdown.map(|b| b.total).unwrap_or(0.0)
}
