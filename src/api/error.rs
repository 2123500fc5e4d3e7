// ==========================================
// 游泳比赛选手分配系统 - API层错误类型
// ==========================================
// 职责: 汇总请求解析、配置、引擎三类错误, 转换为用户可读消息
// ==========================================

use crate::config::ConfigError;
use crate::engine::error::OptimizeError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Optimize(#[from] OptimizeError),
}

impl ApiError {
    /// 是否属于引擎致命错误 (输出显式错误文档)
    pub fn is_fatal(&self) -> bool {
        matches!(self, ApiError::Optimize(_))
    }
}

// 请求 JSON 解析失败视为输入错误
impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::InvalidInput(format!("请求解析失败: {}", err))
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
