use thiserror::Error;

#[derive(Error, Debug)]
pub enum FareError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Tier index {index} out of range (have {len} tiers)")]
    TierNotFound { index: usize, len: usize },

    #[error("Duplicate rule id: {id}")]
    DuplicateRuleId { id: String },

    #[error("Unknown fare field: {name}")]
    UnknownField { name: String },
}

impl FareError {
    /// 給終端使用者看的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            FareError::IoError(e) => format!("無法讀寫偏好設定檔: {}", e),
            FareError::SerializationError(e) => format!("資料格式錯誤: {}", e),
            FareError::TomlError(e) => format!("設定檔格式錯誤: {}", e),
            FareError::ConfigError { message } => format!("設定錯誤: {}", message),
            FareError::InvalidConfigValueError {
                field,
                value,
                reason,
            } => format!("{} 的值 '{}' 無效: {}", field, value, reason),
            FareError::TierNotFound { index, len } => {
                format!("時段 {} 不存在 (共 {} 個時段)", index, len)
            }
            FareError::DuplicateRuleId { id } => format!("時段代號 '{}' 重複", id),
            FareError::UnknownField { name } => format!("未知的價格欄位: {}", name),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            FareError::IoError(_) => "檢查偏好設定檔路徑是否存在且可寫入",
            FareError::SerializationError(_) => "執行 `ride-fare reset` 重建預設價格表",
            FareError::TomlError(_) | FareError::ConfigError { .. } => {
                "檢查 ride-fare.toml 的內容是否正確"
            }
            FareError::InvalidConfigValueError { .. } => "輸入不小於 0 的數值；折扣需介於 0.01 與 1.0 之間",
            FareError::TierNotFound { .. } => "執行 `ride-fare rules` 查看可用的時段編號",
            FareError::DuplicateRuleId { .. } => "每個時段的代號必須唯一",
            FareError::UnknownField { .. } => {
                "可用欄位: baseFare, baseDistance, unitPrice, longDistanceThreshold, longDistanceSurcharge, longDistanceCap, name"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, FareError>;
