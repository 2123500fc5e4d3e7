// ==========================================
// 游泳比赛选手分配系统 - 输出文档
// ==========================================
// 职责: 定义一次优化运行的输出结构 (JSON, camelCase)
// ==========================================

use crate::domain::diagnostic::Diagnostic;
use crate::domain::types::TimeStatus;
use serde::{Deserialize, Serialize};

// ==========================================
// IndividualResult - 个人项目分配结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndividualResult {
    pub event: String,
    pub swimmer: String,
    pub time: Option<String>,   // 预分配运动员无该项成绩时为空
    pub index: Option<f64>,
    pub status: TimeStatus,
}

// ==========================================
// RelayResult - 接力队结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayResult {
    pub relay: String,
    pub total_time: String, // MM:SS.ss
    pub swimmers: Vec<RelayLegResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayLegResult {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    pub time: String,
}

// ==========================================
// OptimizationStats - 汇总统计
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationStats {
    pub qualifying_times: usize, // QT 个人项目数
    pub average_index: f64,
    pub relay_teams: usize,
    pub total_events: usize,
}

// ==========================================
// OptimizationResult - 输出文档
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationResult {
    pub individual: Vec<IndividualResult>,
    pub relay: Vec<RelayResult>,
    pub stats: OptimizationStats,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OptimizationResult {
    /// 致命错误时的显式错误文档 (统计归零, 无部分结果)
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}
