// ==========================================
// 游泳比赛选手分配系统 - 成绩指数计分
// ==========================================
// 职责: 计算 diff = time - baseline, index = diff / baseline
// 排序键: (无指数, index) 升序; 同分保持原顺序 (稳定排序)
// ==========================================

use crate::domain::athlete::AthleteId;
use crate::domain::event::SlotKey;
use crate::domain::time::round_to;
use crate::domain::types::{Course, TimeStatus};
use std::cmp::Ordering;

/// diff 保留小数位
pub const DIFF_DECIMALS: i32 = 2;
/// index 保留小数位
pub const INDEX_DECIMALS: i32 = 3;

// ==========================================
// PerformanceEntry - (运动员, 可参赛名额) 条目
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceEntry {
    pub slot: SlotKey,
    pub athlete_id: AthleteId,
    pub athlete_name: String,
    pub course: Course,
    pub time: f64,
    pub baseline: Option<f64>,
    pub diff: Option<f64>,
    /// None 表示无基准, 排在所有有指数条目之后
    pub index: Option<f64>,
}

impl PerformanceEntry {
    pub fn status(&self) -> TimeStatus {
        TimeStatus::from_index(self.index)
    }
}

/// 计算 (diff, index)
///
/// # 参数
/// - `time`: 运动员成绩 (秒)
/// - `baseline`: 资格基准 (秒)
/// - `round_before_sort`: 是否先舍入 (diff 2 位, index 基于已舍入 diff 取 3 位)
pub fn compute_score(time: f64, baseline: f64, round_before_sort: bool) -> (f64, f64) {
    let diff = time - baseline;
    if round_before_sort {
        let diff = round_to(diff, DIFF_DECIMALS);
        (diff, round_to(diff / baseline, INDEX_DECIMALS))
    } else {
        (diff, diff / baseline)
    }
}

/// 条目比较: 有指数在前, 指数升序
pub fn compare_entries(a: &PerformanceEntry, b: &PerformanceEntry) -> Ordering {
    match (a.index, b.index) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// 稳定排序 (同分保持目录顺序 → 花名册顺序)
pub fn rank_entries(entries: &mut [PerformanceEntry]) {
    entries.sort_by(compare_entries);
}
