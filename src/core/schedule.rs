use chrono::Timelike;

pub const DAY_TIER: usize = 0;
pub const EVENING_TIER: usize = 1;
pub const NIGHT_TIER: usize = 2;

/// 依時刻挑選預設時段的邊界
///
/// 兩組邊界都以「白天 / 晚上 / 深夜」三段對應到時段索引 0 / 1 / 2。
/// 早期版本白天是 10:00–18:59、晚上 19:00–23:59、深夜 00:00–09:59；
/// 目前版本白天是 07:00–19:59、晚上 20:00–23:59、深夜 00:00–06:59。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierSchedule {
    /// 白天時段開始的小時 (含)
    pub day_start: u32,
    /// 晚上時段開始的小時 (含)，也是白天時段的結束
    pub evening_start: u32,
}

impl TierSchedule {
    pub const LEGACY: TierSchedule = TierSchedule {
        day_start: 10,
        evening_start: 19,
    };

    pub const CURRENT: TierSchedule = TierSchedule {
        day_start: 7,
        evening_start: 20,
    };

    /// 超過 23 的小時視為隔天，取 24 的餘數
    pub fn tier_for_hour(&self, hour: u32) -> usize {
        let hour = hour % 24;
        if hour >= self.day_start && hour < self.evening_start {
            DAY_TIER
        } else if hour >= self.evening_start {
            EVENING_TIER
        } else {
            NIGHT_TIER
        }
    }

    pub fn tier_at<T: Timelike>(&self, time: &T) -> usize {
        self.tier_for_hour(time.hour())
    }
}

impl Default for TierSchedule {
    fn default() -> Self {
        Self::CURRENT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn test_current_boundaries() {
        let schedule = TierSchedule::CURRENT;
        for hour in 0..=6 {
            assert_eq!(schedule.tier_for_hour(hour), NIGHT_TIER, "hour {}", hour);
        }
        for hour in 7..=19 {
            assert_eq!(schedule.tier_for_hour(hour), DAY_TIER, "hour {}", hour);
        }
        for hour in 20..=23 {
            assert_eq!(schedule.tier_for_hour(hour), EVENING_TIER, "hour {}", hour);
        }
    }

    #[test]
    fn test_legacy_boundaries() {
        let schedule = TierSchedule::LEGACY;
        assert_eq!(schedule.tier_for_hour(0), NIGHT_TIER);
        assert_eq!(schedule.tier_for_hour(9), NIGHT_TIER);
        assert_eq!(schedule.tier_for_hour(10), DAY_TIER);
        assert_eq!(schedule.tier_for_hour(18), DAY_TIER);
        assert_eq!(schedule.tier_for_hour(19), EVENING_TIER);
        assert_eq!(schedule.tier_for_hour(23), EVENING_TIER);
    }

    #[test]
    fn test_tier_at_uses_hour_only() {
        let schedule = TierSchedule::CURRENT;
        let late = NaiveTime::from_hms_opt(19, 59, 59).unwrap();
        let evening = NaiveTime::from_hms_opt(20, 0, 0).unwrap();
        assert_eq!(schedule.tier_at(&late), DAY_TIER);
        assert_eq!(schedule.tier_at(&evening), EVENING_TIER);
    }

    #[test]
    fn test_hour_wraps() {
        assert_eq!(TierSchedule::CURRENT.tier_for_hour(24), NIGHT_TIER);
        assert_eq!(TierSchedule::CURRENT.tier_for_hour(31), DAY_TIER);
    }
}
