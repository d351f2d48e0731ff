//! 验证辅助函数
//!
//! - ensure_hotel：验证酒店 ID 非空
//! - ensure_same_hotel：验证写入记录归属当前酒店

use crate::error::StorageError;
use domain::HotelContext;

/// 验证酒店 ID 非空
///
/// 确保所有数据访问都有有效的酒店上下文。
pub fn ensure_hotel(ctx: &HotelContext) -> Result<(), StorageError> {
    if ctx.hotel_id.is_empty() {
        return Err(StorageError::new("hotel_id required"));
    }
    Ok(())
}

/// 验证记录归属当前酒店
pub fn ensure_same_hotel(ctx: &HotelContext, hotel_id: &str) -> Result<(), StorageError> {
    ensure_hotel(ctx)?;
    if ctx.hotel_id != hotel_id {
        return Err(StorageError::new("hotel mismatch"));
    }
    Ok(())
}
