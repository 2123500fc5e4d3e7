// ==========================================
// 游泳比赛选手分配系统 - 名额状态表
// ==========================================
// 职责: 个人项目名额的显式状态表, 按 (项目, 年龄组, 性别) 索引
// 红线: 已分配名额不可覆盖; 受保护名额不可被自动分配写入
// ==========================================

use crate::domain::athlete::AthleteId;
use crate::domain::diagnostic::Diagnostic;
use crate::domain::event::{AssignmentState, CatalogEvent, EventSlot, SlotKey, StrokeDistance};
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, warn};

/// 名额写入失败原因
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    #[error("名额不存在: {0}")]
    UnknownSlot(SlotKey),

    #[error("名额已分配: {key} -> {athlete}")]
    AlreadyAssigned { key: SlotKey, athlete: AthleteId },

    #[error("名额受保护: {0}")]
    Protected(SlotKey),
}

// ==========================================
// SlotTable - 名额状态表
// ==========================================
// 名额顺序 = 项目目录顺序
#[derive(Debug, Clone, Default)]
pub struct SlotTable {
    slots: Vec<EventSlot>,
    index: HashMap<SlotKey, usize>,
}

impl SlotTable {
    /// 从项目目录构建个人项目名额
    ///
    /// # 规则
    /// - 接力条目跳过 (由接力引擎处理)
    /// - 无法解析为 "泳姿+距离" 的条目记录诊断后跳过
    /// - 重复键只保留第一条
    pub fn from_catalog(catalog: &[CatalogEvent], diagnostics: &mut Vec<Diagnostic>) -> Self {
        let mut table = SlotTable::default();

        for entry in catalog.iter().filter(|e| !e.is_relay_event()) {
            let event: StrokeDistance = match entry.event.parse() {
                Ok(event) => event,
                Err(reason) => {
                    warn!(event = %entry.event, %reason, "无法识别的个人项目, 跳过");
                    diagnostics.push(Diagnostic::UnrecognizedEvent {
                        event: entry.label(),
                    });
                    continue;
                }
            };

            let key = SlotKey::new(event, entry.age_category, entry.gender);
            if !table.insert(key) {
                debug!(slot = %key, "重复名额, 忽略");
            }
        }

        table
    }

    pub fn from_keys<I: IntoIterator<Item = SlotKey>>(keys: I) -> Self {
        let mut table = SlotTable::default();
        for key in keys {
            table.insert(key);
        }
        table
    }

    fn insert(&mut self, key: SlotKey) -> bool {
        if self.index.contains_key(&key) {
            return false;
        }
        self.index.insert(key, self.slots.len());
        self.slots.push(EventSlot::new(key));
        true
    }

    pub fn get(&self, key: &SlotKey) -> Option<&EventSlot> {
        self.index.get(key).map(|&i| &self.slots[i])
    }

    pub fn slots(&self) -> &[EventSlot] {
        &self.slots
    }

    pub fn keys(&self) -> impl Iterator<Item = SlotKey> + '_ {
        self.slots.iter().map(|s| s.key)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// 当前绑定到该运动员的名额数
    pub fn count_assigned_to(&self, athlete: &AthleteId) -> u32 {
        self.slots
            .iter()
            .filter(|s| s.state.athlete() == Some(athlete))
            .count() as u32
    }

    pub fn assigned_count(&self) -> usize {
        self.slots.iter().filter(|s| s.state.is_assigned()).count()
    }

    pub fn protected_count(&self) -> usize {
        self.slots.iter().filter(|s| s.protected).count()
    }

    /// 写入名额
    ///
    /// # 参数
    /// - `key`: 名额键
    /// - `athlete`: 运动员
    /// - `protect`: 是否标记为受保护 (人工预分配)
    ///
    /// # 返回
    /// - Ok(()): 写入成功
    /// - Err(SlotError): 名额不存在 / 已受保护 / 已分配
    pub fn assign(
        &mut self,
        key: &SlotKey,
        athlete: &AthleteId,
        protect: bool,
    ) -> Result<(), SlotError> {
        let position = *self.index.get(key).ok_or(SlotError::UnknownSlot(*key))?;
        let slot = &mut self.slots[position];

        if slot.protected {
            return Err(SlotError::Protected(*key));
        }
        if let AssignmentState::Assigned(existing) = &slot.state {
            return Err(SlotError::AlreadyAssigned {
                key: *key,
                athlete: existing.clone(),
            });
        }

        slot.state = AssignmentState::Assigned(athlete.clone());
        slot.protected = protect;
        Ok(())
    }
}
