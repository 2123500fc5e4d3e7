// ==========================================
// 游泳比赛选手分配系统 - 个人项目分配引擎
// ==========================================
// 红线: 受保护名额 (人工预分配) 不得被自动分配覆盖
// ==========================================
// 职责: 预分配写入 + 全局排名单遍贪心填充
// 输入: 排名条目 + 名额状态表 + 预分配 + 个人项目上限
// 输出: 更新后的名额状态表
// 说明: 首个可用名额优先 (first-fit), 不保证全局最优匹配
// ==========================================

use crate::domain::assignment::IndividualPreAssignment;
use crate::domain::athlete::{AthleteId, Roster};
use crate::domain::diagnostic::Diagnostic;
use crate::domain::event::{SlotKey, StrokeDistance};
use crate::engine::scoring::PerformanceEntry;
use crate::engine::slot_table::{SlotError, SlotTable};
use std::collections::HashMap;
use tracing::{debug, info, instrument, warn};

// ==========================================
// AssignmentCounter - 运动员个人项目计数
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct AssignmentCounter {
    counts: HashMap<AthleteId, u32>,
}

impl AssignmentCounter {
    pub fn get(&self, athlete: &AthleteId) -> u32 {
        self.counts.get(athlete).copied().unwrap_or(0)
    }

    pub fn increment(&mut self, athlete: &AthleteId) {
        *self.counts.entry(athlete.clone()).or_insert(0) += 1;
    }
}

/// 单次分配汇总
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllocationSummary {
    pub pre_assigned: usize,
    pub auto_assigned: usize,
}

// ==========================================
// IndividualAllocator - 个人项目分配引擎
// ==========================================
pub struct IndividualAllocator {
    max_individual_events: u32,
}

impl IndividualAllocator {
    /// 构造函数
    ///
    /// # 参数
    /// - `max_individual_events`: 每名运动员个人项目上限
    pub fn new(max_individual_events: u32) -> Self {
        Self {
            max_individual_events,
        }
    }

    pub fn max_individual_events(&self) -> u32 {
        self.max_individual_events
    }

    // ==========================================
    // 既有分配 (上一轮状态)
    // ==========================================

    /// 写入既有分配 (不受保护, 不计入预分配计数)
    ///
    /// 既有分配通过名额状态表的实时计数参与上限判断
    pub fn seed_existing(
        &self,
        slots: &mut SlotTable,
        roster: &Roster,
        existing: &[IndividualPreAssignment],
        diagnostics: &mut Vec<Diagnostic>,
    ) -> usize {
        let mut seeded = 0;
        for assignment in existing {
            let key = match self.resolve(slots, roster, assignment, diagnostics) {
                Some(key) => key,
                None => continue,
            };
            match slots.assign(&key, &assignment.swimmer_id, false) {
                Ok(()) => seeded += 1,
                Err(e) => debug!(error = %e, "既有分配写入失败, 忽略"),
            }
        }
        seeded
    }

    // ==========================================
    // 阶段1: 预分配
    // ==========================================

    /// 按提交顺序写入人工预分配
    ///
    /// 规则:
    /// 1) 运动员或名额无法解析 → UnresolvedPreAssignment, 跳过
    /// 2) 运动员不符合年龄组/性别, 或已达上限 → RejectedPreAssignment, 跳过
    /// 3) 名额已占用 → ConflictingPreAssignment, 不覆盖
    /// 4) 否则写入并标记受保护, 计数 +1
    #[instrument(skip_all, fields(count = pre_assignments.len()))]
    pub fn apply_pre_assignments(
        &self,
        slots: &mut SlotTable,
        roster: &Roster,
        pre_assignments: &[IndividualPreAssignment],
        counter: &mut AssignmentCounter,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> usize {
        let mut applied = 0;

        for assignment in pre_assignments {
            let key = match self.resolve(slots, roster, assignment, diagnostics) {
                Some(key) => key,
                None => continue,
            };
            let athlete_id = &assignment.swimmer_id;

            if let Some(athlete) = roster.get(athlete_id) {
                if athlete.gender != key.gender || !key.age_category.admits(athlete.age) {
                    warn!(swimmer = %athlete_id, slot = %key, "预分配运动员不符合年龄组/性别");
                    diagnostics.push(Diagnostic::RejectedPreAssignment {
                        swimmer_id: athlete_id.clone(),
                        event: key.label(),
                        reason: format!(
                            "运动员 {} 岁 {} 不符合 {}",
                            athlete.age, athlete.gender, key.label()
                        ),
                    });
                    continue;
                }
            }

            if self.current_count(slots, counter, athlete_id) >= self.max_individual_events {
                warn!(swimmer = %athlete_id, slot = %key, "预分配超过个人项目上限");
                diagnostics.push(Diagnostic::RejectedPreAssignment {
                    swimmer_id: athlete_id.clone(),
                    event: key.label(),
                    reason: format!("已达个人项目上限 {}", self.max_individual_events),
                });
                continue;
            }

            match slots.assign(&key, athlete_id, true) {
                Ok(()) => {
                    counter.increment(athlete_id);
                    applied += 1;
                    info!(swimmer = %athlete_id, slot = %key, "预分配成功");
                }
                Err(SlotError::AlreadyAssigned { athlete, .. }) => {
                    warn!(swimmer = %athlete_id, slot = %key, assigned_to = %athlete, "预分配冲突: 名额已占用");
                    diagnostics.push(Diagnostic::ConflictingPreAssignment {
                        swimmer_id: athlete_id.clone(),
                        event: key.label(),
                        assigned_to: athlete,
                    });
                }
                Err(SlotError::Protected(_)) => {
                    let holder = slots
                        .get(&key)
                        .and_then(|s| s.state.athlete().cloned())
                        .unwrap_or_else(|| athlete_id.clone());
                    warn!(swimmer = %athlete_id, slot = %key, assigned_to = %holder, "预分配冲突: 名额受保护");
                    diagnostics.push(Diagnostic::ConflictingPreAssignment {
                        swimmer_id: athlete_id.clone(),
                        event: key.label(),
                        assigned_to: holder,
                    });
                }
                Err(SlotError::UnknownSlot(_)) => {
                    diagnostics.push(Diagnostic::UnresolvedPreAssignment {
                        swimmer_id: athlete_id.clone(),
                        event: key.label(),
                        reason: "名额不存在".to_string(),
                    });
                }
            }
        }

        info!(applied, protected = slots.protected_count(), "预分配阶段完成");
        applied
    }

    // ==========================================
    // 阶段2: 贪心分配
    // ==========================================

    /// 按全局排名单遍贪心填充
    ///
    /// 对每个条目:
    /// 1) 当前计数 = max(预分配计数, 名额表实时计数), 达上限则跳过 (不中断遍历)
    /// 2) 名额受保护 → 跳过
    /// 3) 名额已分配 → 跳过
    /// 4) 否则写入, 计数 +1
    #[instrument(skip_all, fields(entries = ranking.len(), slots = slots.len()))]
    pub fn allocate(
        &self,
        slots: &mut SlotTable,
        ranking: &[PerformanceEntry],
        counter: &mut AssignmentCounter,
    ) -> usize {
        let mut auto_assigned = 0;

        for entry in ranking {
            if self.current_count(slots, counter, &entry.athlete_id) >= self.max_individual_events {
                continue;
            }

            let slot = match slots.get(&entry.slot) {
                Some(slot) => slot,
                None => continue,
            };
            if slot.protected {
                debug!(slot = %entry.slot, swimmer = %entry.athlete_id, "PROTECTION: 名额受保护, 跳过");
                continue;
            }
            if slot.state.is_assigned() {
                continue;
            }

            if slots.assign(&entry.slot, &entry.athlete_id, false).is_ok() {
                counter.increment(&entry.athlete_id);
                auto_assigned += 1;
                debug!(
                    slot = %entry.slot,
                    swimmer = %entry.athlete_id,
                    index = ?entry.index,
                    "AUTO-ASSIGNED"
                );
            }
        }

        info!(auto_assigned, "贪心分配阶段完成");
        auto_assigned
    }

    /// 完整个人项目分配 (既有分配 → 预分配 → 贪心)
    pub fn run(
        &self,
        slots: &mut SlotTable,
        roster: &Roster,
        ranking: &[PerformanceEntry],
        existing: &[IndividualPreAssignment],
        pre_assignments: &[IndividualPreAssignment],
        diagnostics: &mut Vec<Diagnostic>,
    ) -> AllocationSummary {
        let mut counter = AssignmentCounter::default();
        self.seed_existing(slots, roster, existing, diagnostics);
        let pre_assigned =
            self.apply_pre_assignments(slots, roster, pre_assignments, &mut counter, diagnostics);
        let auto_assigned = self.allocate(slots, ranking, &mut counter);

        AllocationSummary {
            pre_assigned,
            auto_assigned,
        }
    }

    // ==========================================
    // 辅助方法
    // ==========================================

    fn current_count(&self, slots: &SlotTable, counter: &AssignmentCounter, athlete: &AthleteId) -> u32 {
        counter.get(athlete).max(slots.count_assigned_to(athlete))
    }

    /// 解析预分配的运动员与名额
    fn resolve(
        &self,
        slots: &SlotTable,
        roster: &Roster,
        assignment: &IndividualPreAssignment,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<SlotKey> {
        let label = format!(
            "{} {} {}",
            assignment.age_category, assignment.gender, assignment.event
        );

        if roster.get(&assignment.swimmer_id).is_none() {
            warn!(swimmer = %assignment.swimmer_id, "预分配运动员不存在");
            diagnostics.push(Diagnostic::UnresolvedPreAssignment {
                swimmer_id: assignment.swimmer_id.clone(),
                event: label,
                reason: "运动员不存在或不可用".to_string(),
            });
            return None;
        }

        let key = assignment
            .event
            .parse::<StrokeDistance>()
            .ok()
            .map(|event| SlotKey::new(event, assignment.age_category, assignment.gender))
            .filter(|key| slots.get(key).is_some());

        if key.is_none() {
            warn!(event = %label, "预分配名额不存在");
            diagnostics.push(Diagnostic::UnresolvedPreAssignment {
                swimmer_id: assignment.swimmer_id.clone(),
                event: label,
                reason: "项目名额不存在".to_string(),
            });
        }
        key
    }
}
