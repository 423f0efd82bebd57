use crate::domain::model::{Breakdown, FareField, RuleSet};
use std::fmt::Write;

pub fn format_money(symbol: &str, amount: f64) -> String {
    format!("{}{:.2}", symbol, amount)
}

/// 明細各行：起步價、里程費、遠途費 (有超過門檻才顯示)、折扣 (小於 1 才顯示)
pub fn breakdown_lines(breakdown: &Breakdown, symbol: &str) -> Vec<String> {
    let rule = &breakdown.rule;
    let mut lines = vec![format!(
        "起步价 {} (含 {} 公里)",
        format_money(symbol, rule.base_fare),
        rule.base_distance
    )];

    if breakdown.distance_cost > 0.0 {
        lines.push(format!(
            "里程费 {} 公里 × {} = {}",
            breakdown.extra_distance(),
            format_money(symbol, rule.unit_price),
            format_money(symbol, breakdown.distance_cost)
        ));
    }

    if breakdown.shows_long_distance() {
        let mut line = format!(
            "远途费 {} 公里 × {} = {}",
            breakdown.long_distance(),
            format_money(symbol, rule.long_distance_surcharge),
            format_money(symbol, breakdown.long_distance_cost)
        );
        if breakdown.long_distance_cost >= rule.long_distance_cap && rule.long_distance_cap > 0.0 {
            line.push_str(" (已封顶)");
        }
        lines.push(line);
    }

    if !breakdown.discount.is_none() {
        lines.push(format!(
            "折扣 × {} (原价 {})",
            breakdown.discount,
            format_money(symbol, breakdown.subtotal())
        ));
    }

    lines
}

/// 沒有估價結果時顯示 0 元
pub fn render_quote(breakdown: Option<&Breakdown>, symbol: &str) -> String {
    let mut out = String::new();
    match breakdown {
        Some(b) => {
            let _ = writeln!(out, "{} · 计费里程 {} 公里", b.rule.name, b.distance);
            for line in breakdown_lines(b, symbol) {
                let _ = writeln!(out, "  {}", line);
            }
            let _ = write!(out, "预估价格 {}", format_money(symbol, b.total));
        }
        None => {
            let _ = write!(out, "预估价格 {}", format_money(symbol, 0.0));
        }
    }
    out
}

pub fn render_rules(rules: &RuleSet, active: Option<usize>) -> String {
    let mut out = String::new();
    for (index, rule) in rules.iter().enumerate() {
        let marker = if Some(index) == active { "*" } else { " " };
        let _ = writeln!(out, "{}[{}] {} ({})", marker, index, rule.name, rule.id);
        for field in FareField::ALL {
            let _ = writeln!(
                out,
                "      {:<24} {}",
                format!("{}:", field.key()),
                rule.field(field)
            );
        }
    }
    out
}
