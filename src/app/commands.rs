use crate::app::render;
use crate::config::cli::Command;
use crate::core::rule_store::RuleStore;
use crate::domain::model::{Discount, FareField};
use crate::domain::ports::PreferenceStorage;
use crate::utils::error::{FareError, Result};
use crate::utils::validation::validate_non_empty_string;

/// 執行一個子命令，回傳要印出的文字
///
/// `current_hour` 由呼叫端提供，沒有指定 `--hour` 時用來挑選預設時段。
pub fn execute<S: PreferenceStorage>(
    command: &Command,
    store: &mut RuleStore<S>,
    currency_symbol: &str,
    current_hour: u32,
) -> Result<String> {
    match command {
        Command::Quote {
            distance,
            tier,
            hour,
        } => {
            let index = tier.unwrap_or_else(|| {
                store.default_tier_for_hour(hour.unwrap_or(current_hour))
            });
            let breakdown = store.quote(index, distance);
            if breakdown.is_none() {
                tracing::info!(
                    "No price for tier {} and distance '{}'",
                    index,
                    distance
                );
            }
            Ok(render::render_quote(breakdown.as_ref(), currency_symbol))
        }

        Command::Rules => {
            let active = store.default_tier_for_hour(current_hour);
            let mut out = render::render_rules(store.rules(), Some(active));
            out.push_str(&format!("discount: {}", store.discount()));
            Ok(out)
        }

        Command::Edit {
            index,
            field,
            value,
        } => {
            let rule = if field.trim() == "name" {
                let name = value.trim().to_string();
                validate_non_empty_string("name", &name)?;
                store.update(*index, |rule| {
                    rule.name = name;
                    Ok(())
                })?
            } else {
                let field: FareField = field.parse()?;
                let parsed: f64 = value.trim().parse().map_err(|_| {
                    FareError::InvalidConfigValueError {
                        field: field.key().to_string(),
                        value: value.clone(),
                        reason: "Value must be a number".to_string(),
                    }
                })?;
                store.update(*index, |rule| rule.set_field(field, parsed))?
            };
            tracing::info!("✅ Updated tier {} ({})", index, rule.id);
            Ok(format!("✅ {} {} = {}", rule.name, field, value.trim()))
        }

        Command::Discount { value } => {
            if let Some(value) = value {
                store.set_discount(Discount::new(*value)?)?;
                tracing::info!("✅ Discount set to {}", value);
            }
            Ok(format!("discount: {}", store.discount()))
        }

        Command::Tier { hour } => {
            let hour = hour.unwrap_or(current_hour);
            let index = store.default_tier_for_hour(hour);
            let name = store
                .get(index)
                .map(|rule| rule.name.as_str())
                .unwrap_or("-");
            Ok(format!("{:02}:00 -> [{}] {}", hour, index, name))
        }

        Command::Reset => {
            store.reset()?;
            Ok(format!(
                "✅ Restored default fare table ({})",
                store.revision()
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryPreferences;
    use crate::core::tariff::Revision;

    fn store() -> RuleStore<MemoryPreferences> {
        RuleStore::open(MemoryPreferences::new(), Revision::V2)
    }

    #[test]
    fn test_quote_uses_hour_schedule() {
        let mut store = store();
        let command = Command::Quote {
            distance: "3".to_string(),
            tier: None,
            hour: Some(22),
        };
        let out = execute(&command, &mut store, "¥", 12).unwrap();
        assert!(out.starts_with("晚上"));
        assert!(out.ends_with("预估价格 ¥27.00"));
    }

    #[test]
    fn test_quote_out_of_range_tier_is_zero() {
        let mut store = store();
        let command = Command::Quote {
            distance: "10".to_string(),
            tier: Some(7),
            hour: None,
        };
        assert_eq!(execute(&command, &mut store, "¥", 12).unwrap(), "预估价格 ¥0.00");
    }

    #[test]
    fn test_edit_field_and_name() {
        let mut store = store();
        let edit = Command::Edit {
            index: 0,
            field: "unit_price".to_string(),
            value: "6".to_string(),
        };
        execute(&edit, &mut store, "¥", 12).unwrap();
        assert_eq!(store.get(0).unwrap().unit_price, 6.0);

        let rename = Command::Edit {
            index: 0,
            field: "name".to_string(),
            value: "日间".to_string(),
        };
        execute(&rename, &mut store, "¥", 12).unwrap();
        assert_eq!(store.get(0).unwrap().name, "日间");
    }

    #[test]
    fn test_edit_rejects_bad_input() {
        let mut store = store();
        for (field, value) in [("unitPrice", "abc"), ("unitPrice", "-1"), ("bogus", "1"), ("name", " ")] {
            let edit = Command::Edit {
                index: 0,
                field: field.to_string(),
                value: value.to_string(),
            };
            assert!(execute(&edit, &mut store, "¥", 12).is_err(), "{} = {}", field, value);
        }
        assert_eq!(store.rules(), &Revision::V2.default_rules());
    }

    #[test]
    fn test_discount_then_reset() {
        let mut store = store();
        let out = execute(&Command::Discount { value: Some(0.8) }, &mut store, "¥", 12).unwrap();
        assert_eq!(out, "discount: 0.8");

        execute(&Command::Reset, &mut store, "¥", 12).unwrap();
        assert!(store.discount().is_none());
    }

    #[test]
    fn test_tier_command() {
        let mut store = store();
        let out = execute(&Command::Tier { hour: Some(3) }, &mut store, "¥", 12).unwrap();
        assert_eq!(out, "03:00 -> [2] 深夜");
    }
}
