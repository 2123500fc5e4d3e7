// ==========================================
// 游泳比赛选手分配系统 - 人工预分配
// ==========================================
// 职责: 定义个人项目 / 接力棒次的人工指定输入
// 红线: 预分配成功后目标名额受保护,自动分配不得覆盖
// ==========================================

use crate::domain::athlete::AthleteId;
use crate::domain::types::{AgeCategory, Gender, Stroke};
use serde::{Deserialize, Serialize};

// ==========================================
// IndividualPreAssignment - 个人项目预分配
// ==========================================
// 同时复用为 "既有分配" (上一轮结果) 的输入格式
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndividualPreAssignment {
    pub swimmer_id: AthleteId,
    pub event: String,
    pub age_category: AgeCategory,
    pub gender: Gender,
}

// ==========================================
// RelayPreAssignment - 接力棒次预分配
// ==========================================
// position: 1 起编号; 混合泳接力可用 stroke 指定棒次
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayPreAssignment {
    pub relay_name: String,
    pub age_category: AgeCategory,
    pub gender: Gender,
    pub position: u32,
    #[serde(default)]
    pub stroke: Option<Stroke>,
    pub swimmer_id: AthleteId,
}

// ==========================================
// PreAssignments - 预分配集合
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreAssignments {
    #[serde(default)]
    pub individual: Vec<IndividualPreAssignment>,
    #[serde(default)]
    pub relay: Vec<RelayPreAssignment>,
}

impl PreAssignments {
    pub fn is_empty(&self) -> bool {
        self.individual.is_empty() && self.relay.is_empty()
    }
}
