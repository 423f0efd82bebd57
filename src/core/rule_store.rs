use crate::core::calculator;
use crate::core::tariff::Revision;
use crate::domain::model::{Breakdown, Discount, FareRule, RuleSet};
use crate::domain::ports::PreferenceStorage;
use crate::utils::error::{FareError, Result};

/// 持有目前的價格表與折扣；每次修改都立即整份寫回儲存
pub struct RuleStore<S: PreferenceStorage> {
    storage: S,
    revision: Revision,
    rules: RuleSet,
    discount: Discount,
}

impl<S: PreferenceStorage> RuleStore<S> {
    /// 從儲存載入；讀不到或無法解析時改用該版本的內建價格表
    pub fn open(storage: S, revision: Revision) -> Self {
        let rules = load_rules(&storage, revision);
        let discount = load_discount(&storage, revision);

        tracing::debug!(
            "Rule store opened (revision {}, {} tiers, discount {})",
            revision,
            rules.len(),
            discount
        );

        Self {
            storage,
            revision,
            rules,
            discount,
        }
    }

    /// 重新從儲存讀取，捨棄記憶體中的狀態
    pub fn load(&mut self) -> &RuleSet {
        self.rules = load_rules(&self.storage, self.revision);
        self.discount = load_discount(&self.storage, self.revision);
        &self.rules
    }

    /// 以新的列表取代並寫回
    pub fn save(&mut self, rules: RuleSet) -> Result<()> {
        let encoded = serde_json::to_string(&rules)?;
        self.storage.write(self.revision.rules_key(), &encoded)?;
        self.rules = rules;
        tracing::debug!("Saved {} tiers under {}", self.rules.len(), self.revision.rules_key());
        Ok(())
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn get(&self, index: usize) -> Option<&FareRule> {
        self.rules.get(index)
    }

    pub fn set(&mut self, index: usize, rule: FareRule) -> Result<()> {
        let mut updated = self.rules.clone();
        updated.replace(index, rule)?;
        self.save(updated)
    }

    /// 對指定時段套用修改後寫回；修改失敗時不會儲存任何東西
    pub fn update<F>(&mut self, index: usize, edit: F) -> Result<&FareRule>
    where
        F: FnOnce(&mut FareRule) -> Result<()>,
    {
        let mut rule = self
            .get(index)
            .cloned()
            .ok_or(FareError::TierNotFound {
                index,
                len: self.rules.len(),
            })?;
        edit(&mut rule)?;
        self.set(index, rule)?;
        Ok(&self.rules.rules()[index])
    }

    pub fn discount(&self) -> Discount {
        self.discount
    }

    pub fn set_discount(&mut self, discount: Discount) -> Result<()> {
        let key = self.revision.discount_key().ok_or_else(|| FareError::ConfigError {
            message: format!("Revision {} does not support discounts", self.revision),
        })?;

        let encoded = serde_json::to_string(&discount)?;
        self.storage.write(key, &encoded)?;
        self.discount = discount;
        tracing::debug!("Saved discount {} under {}", discount, key);
        Ok(())
    }

    /// 回到內建價格表並清除折扣
    pub fn reset(&mut self) -> Result<()> {
        self.save(self.revision.default_rules())?;
        if let Some(key) = self.revision.discount_key() {
            self.storage.remove(key)?;
        }
        self.discount = Discount::NONE;
        tracing::info!("Restored default fare table for revision {}", self.revision);
        Ok(())
    }

    pub fn revision(&self) -> Revision {
        self.revision
    }

    /// 依目前價格表與折扣估價
    pub fn quote(&self, tier_index: usize, distance_input: &str) -> Option<Breakdown> {
        calculator::quote(&self.rules, tier_index, distance_input, self.discount)
    }

    pub fn default_tier_for_hour(&self, hour: u32) -> usize {
        self.revision.schedule().tier_for_hour(hour)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }
}

fn load_rules<S: PreferenceStorage>(storage: &S, revision: Revision) -> RuleSet {
    let key = revision.rules_key();
    match storage.read(key) {
        Ok(Some(encoded)) => match serde_json::from_str::<RuleSet>(&encoded) {
            Ok(rules) => return rules,
            Err(e) => tracing::warn!("⚠️ Stored fare rules under {} are invalid ({}), using defaults", key, e),
        },
        Ok(None) => tracing::debug!("No fare rules stored under {}, using defaults", key),
        Err(e) => tracing::warn!("⚠️ Failed to read fare rules ({}), using defaults", e),
    }
    revision.default_rules()
}

fn load_discount<S: PreferenceStorage>(storage: &S, revision: Revision) -> Discount {
    let Some(key) = revision.discount_key() else {
        return Discount::NONE;
    };
    match storage.read(key) {
        Ok(Some(encoded)) => match serde_json::from_str::<Discount>(&encoded) {
            Ok(discount) => return discount,
            Err(e) => tracing::warn!("⚠️ Stored discount under {} is invalid ({}), using 1.0", key, e),
        },
        Ok(None) => {}
        Err(e) => tracing::warn!("⚠️ Failed to read discount ({}), using 1.0", e),
    }
    Discount::NONE
}
