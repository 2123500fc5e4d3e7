// ==========================================
// 游泳比赛选手分配系统 - API 层
// ==========================================
// 职责: 提供 JSON 请求/响应接口, 供 CLI 与嵌入方调用
// ==========================================

pub mod dto;
pub mod error;
pub mod optimize_api;

// 重导出核心类型
pub use dto::OptimizeRequest;
pub use error::{ApiError, ApiResult};
pub use optimize_api::OptimizeApi;
