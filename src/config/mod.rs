// ==========================================
// 游泳比赛选手分配系统 - 配置层
// ==========================================
// 职责: 优化参数与比赛类型预设
// 存储: JSON 文件 / 请求体内嵌
// ==========================================

pub mod competition;
pub mod optimization_config;

// 重导出核心配置
pub use competition::CompetitionType;
pub use optimization_config::{defaults, ConfigError, OptimizationConfig};
