// ==========================================
// 游泳比赛选手分配系统 - 可恢复诊断
// ==========================================
// 职责: 记录不影响整体运行的异常情况 (可解释性)
// 红线: 诊断只记录,不中断分配流程
// ==========================================

use crate::domain::athlete::AthleteId;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Diagnostic - 诊断条目
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Diagnostic {
    /// 名额无资格基准 (含回退), 该名额所有条目排在末尾
    MissingBaseline { event: String, entries: usize },

    /// 项目目录条目无法识别 (既非个人项目也非接力)
    UnrecognizedEvent { event: String },

    /// 预分配引用的运动员或名额不存在
    #[serde(rename_all = "camelCase")]
    UnresolvedPreAssignment {
        swimmer_id: AthleteId,
        event: String,
        reason: String,
    },

    /// 预分配目标名额已被占用
    #[serde(rename_all = "camelCase")]
    ConflictingPreAssignment {
        swimmer_id: AthleteId,
        event: String,
        assigned_to: AthleteId,
    },

    /// 预分配违反年龄组/性别/个人项目上限
    #[serde(rename_all = "camelCase")]
    RejectedPreAssignment {
        swimmer_id: AthleteId,
        event: String,
        reason: String,
    },

    /// 接力预分配校验失败, 该接力全部预分配作废
    InvalidRelayPreAssignment { relay: String, reason: String },

    /// 接力人数不足, 不组队
    IncompleteRelayTeam { relay: String, reason: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MissingBaseline { event, entries } => {
                write!(f, "MISSING_BASELINE: event={}, entries={}", event, entries)
            }
            Diagnostic::UnrecognizedEvent { event } => {
                write!(f, "UNRECOGNIZED_EVENT: event={}", event)
            }
            Diagnostic::UnresolvedPreAssignment {
                swimmer_id,
                event,
                reason,
            } => write!(
                f,
                "UNRESOLVED_PRE_ASSIGNMENT: swimmer={}, event={}, reason={}",
                swimmer_id, event, reason
            ),
            Diagnostic::ConflictingPreAssignment {
                swimmer_id,
                event,
                assigned_to,
            } => write!(
                f,
                "CONFLICTING_PRE_ASSIGNMENT: swimmer={}, event={}, assigned_to={}",
                swimmer_id, event, assigned_to
            ),
            Diagnostic::RejectedPreAssignment {
                swimmer_id,
                event,
                reason,
            } => write!(
                f,
                "REJECTED_PRE_ASSIGNMENT: swimmer={}, event={}, reason={}",
                swimmer_id, event, reason
            ),
            Diagnostic::InvalidRelayPreAssignment { relay, reason } => {
                write!(f, "INVALID_RELAY_PRE_ASSIGNMENT: relay={}, reason={}", relay, reason)
            }
            Diagnostic::IncompleteRelayTeam { relay, reason } => {
                write!(f, "INCOMPLETE_RELAY_TEAM: relay={}, reason={}", relay, reason)
            }
        }
    }
}
