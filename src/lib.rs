// ==========================================
// 游泳比赛选手分配系统 - 核心库
// ==========================================
// 功能: 个人项目名额分配 + 接力队组建
// 系统定位: 决策支持 (教练可通过预分配保留最终控制权)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 分配规则
pub mod engine;

// 配置层 - 优化参数与比赛预设
pub mod config;

// 日志系统
pub mod logging;

// API 层 - JSON 接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{AgeCategory, Course, Gender, RelayKind, Stroke, TimeStatus};

// 领域实体
pub use domain::{
    Athlete, AthleteId, CatalogEvent, Diagnostic, OptimizationResult, OptimizationStats,
    PreAssignments, QualifyingTimeTable, Roster, SlotKey, StrokeDistance,
};

// 引擎
pub use engine::{GalaOptimizer, OptimizationInput, OptimizeError};

// 配置
pub use config::{CompetitionType, OptimizationConfig};

// API
pub use api::{ApiError, OptimizeApi, OptimizeRequest};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "游泳比赛选手分配系统";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
