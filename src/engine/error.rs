// ==========================================
// 游泳比赛选手分配系统 - 引擎层错误类型
// ==========================================
// 职责: 致命错误 (整次运行失败, 不输出部分结果)
// 可恢复情况一律走 Diagnostic, 不进入此枚举
// ==========================================

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptimizeError {
    /// 花名册为空 (或全部不可用)
    #[error("No eligible swimmers found")]
    NoEligibleAthletes,

    #[error("配置无效: {0}")]
    InvalidConfig(String),
}

pub type OptimizeResult<T> = Result<T, OptimizeError>;
