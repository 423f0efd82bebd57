use crate::utils::error::Result;

/// 裝置端的鍵值偏好設定儲存
pub trait PreferenceStorage {
    /// 讀取鍵值；鍵不存在時回傳 `Ok(None)`
    fn read(&self, key: &str) -> Result<Option<String>>;

    fn write(&mut self, key: &str, value: &str) -> Result<()>;

    fn remove(&mut self, key: &str) -> Result<()>;
}
