// ==========================================
// 游泳比赛选手分配系统 - 请求 DTO
// ==========================================
// 职责: 定义外部请求的 JSON 结构 (camelCase)
// 响应结构即 domain::result::OptimizationResult
// ==========================================

use crate::config::OptimizationConfig;
use crate::domain::assignment::{IndividualPreAssignment, PreAssignments};
use crate::domain::athlete::RosterRecord;
use crate::domain::event::CatalogEvent;
use crate::domain::qualifying::QualifyingTimeRecord;
use serde::{Deserialize, Serialize};

/// 优化请求
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeRequest {
    /// 花名册 (每行一条成绩)
    pub roster: Vec<RosterRecord>,

    #[serde(default)]
    pub qualifying_times: Vec<QualifyingTimeRecord>,

    /// 项目目录; 缺省时使用比赛类型预设目录
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<CatalogEvent>>,

    #[serde(default)]
    pub pre_assignments: PreAssignments,

    /// 上一轮分配状态
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub current_assignments: Vec<IndividualPreAssignment>,

    #[serde(default)]
    pub config: OptimizationConfig,
}
