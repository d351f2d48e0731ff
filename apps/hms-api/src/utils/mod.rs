//! Handler 共用的响应构造、DTO 转换与输入校验。

pub mod dto;
pub mod response;
pub mod validation;
