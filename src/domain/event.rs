// ==========================================
// 游泳比赛选手分配系统 - 比赛项目领域模型
// ==========================================
// 职责: 项目描述解析、项目名额 (EventSlot) 与分配状态
// 红线: 名额只能被写入一次,受保护名额不参与自动分配
// ==========================================

use crate::domain::athlete::AthleteId;
use crate::domain::types::{AgeCategory, Gender, RelayKind, Stroke};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// StrokeDistance - 泳姿 + 距离
// ==========================================
// 例: "50m Freestyle" / "200m Individual Medley"
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StrokeDistance {
    pub distance_m: u32,
    pub stroke: Stroke,
}

impl StrokeDistance {
    pub fn new(distance_m: u32, stroke: Stroke) -> Self {
        Self { distance_m, stroke }
    }
}

impl fmt::Display for StrokeDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}m {}", self.distance_m, self.stroke)
    }
}

impl FromStr for StrokeDistance {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (distance_part, stroke_part) = trimmed
            .split_once(char::is_whitespace)
            .ok_or_else(|| format!("项目格式非法: {}", s))?;

        let distance_m = distance_part
            .trim_end_matches(|c| c == 'm' || c == 'M')
            .parse::<u32>()
            .map_err(|_| format!("项目距离非法: {}", s))?;
        let stroke = stroke_part.parse::<Stroke>()?;

        Ok(Self { distance_m, stroke })
    }
}

impl Serialize for StrokeDistance {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for StrokeDistance {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// ==========================================
// CatalogEvent - 项目目录条目 (外部输入)
// ==========================================
// 目录顺序决定同分时的排名先后,必须原样保留
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEvent {
    pub event: String,
    pub age_category: AgeCategory,
    pub gender: Gender,
    #[serde(default)]
    pub is_relay: bool,
}

impl CatalogEvent {
    pub fn individual(event: &str, age_category: u32, gender: Gender) -> Self {
        Self {
            event: event.to_string(),
            age_category: AgeCategory(age_category),
            gender,
            is_relay: false,
        }
    }

    pub fn relay(event: &str, age_category: u32, gender: Gender) -> Self {
        Self {
            event: event.to_string(),
            age_category: AgeCategory(age_category),
            gender,
            is_relay: true,
        }
    }

    /// 是否为接力项目
    ///
    /// 显式标记优先；未标记时按命名识别 ("Relay" / "4x50m" / "Squadrun")
    pub fn is_relay_event(&self) -> bool {
        self.is_relay || looks_like_relay(&self.event)
    }

    /// 输出用项目标签: "{年龄组} {性别} {项目}"
    pub fn label(&self) -> String {
        format!("{} {} {}", self.age_category, self.gender, self.event)
    }
}

fn looks_like_relay(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower.contains("relay") || lower.contains("squad") || parse_leg_spec(&lower).is_some()
}

/// 解析 "4x50m" / "4 x 100m" 形式的棒数与每棒距离
fn parse_leg_spec(name: &str) -> Option<(usize, u32)> {
    let compact: String = name.chars().filter(|c| !c.is_whitespace()).collect();
    let lower = compact.to_lowercase();

    lower.match_indices('x').find_map(|(x_pos, _)| {
        let legs: String = lower[..x_pos]
            .chars()
            .rev()
            .take_while(|c| c.is_ascii_digit())
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        let distance: String = lower[x_pos + 1..]
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();

        if legs.is_empty() || distance.is_empty() {
            return None;
        }
        if !lower[x_pos + 1 + distance.len()..].starts_with('m') {
            return None;
        }

        Some((legs.parse().ok()?, distance.parse().ok()?))
    })
}

// ==========================================
// SlotKey - 名额主键
// ==========================================
// (泳姿+距离, 年龄组, 性别) 唯一确定一个个人项目名额
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotKey {
    pub event: StrokeDistance,
    pub age_category: AgeCategory,
    pub gender: Gender,
}

impl SlotKey {
    pub fn new(event: StrokeDistance, age_category: AgeCategory, gender: Gender) -> Self {
        Self {
            event,
            age_category,
            gender,
        }
    }

    /// 输出用项目标签
    pub fn label(&self) -> String {
        format!("{} {} {}", self.age_category, self.gender, self.event)
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

// ==========================================
// AssignmentState - 名额分配状态
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignmentState {
    Unassigned,
    Assigned(AthleteId),
}

impl AssignmentState {
    pub fn is_assigned(&self) -> bool {
        matches!(self, AssignmentState::Assigned(_))
    }

    pub fn athlete(&self) -> Option<&AthleteId> {
        match self {
            AssignmentState::Assigned(id) => Some(id),
            AssignmentState::Unassigned => None,
        }
    }
}

// ==========================================
// EventSlot - 个人项目名额
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct EventSlot {
    pub key: SlotKey,
    pub state: AssignmentState,
    pub protected: bool, // 人工预分配写入后为 true
}

impl EventSlot {
    pub fn new(key: SlotKey) -> Self {
        Self {
            key,
            state: AssignmentState::Unassigned,
            protected: false,
        }
    }
}

// ==========================================
// RelayDescriptor - 接力项目描述
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct RelayDescriptor {
    pub name: String,
    pub kind: RelayKind,
    pub legs: usize,
    pub leg_distance_m: u32,
    pub leg_stroke: Stroke, // 混合泳接力时仅代表末棒泳姿
}

impl RelayDescriptor {
    pub const DEFAULT_LEGS: usize = 4;
    pub const DEFAULT_LEG_DISTANCE_M: u32 = 50;
    pub const SQUAD_LEGS: usize = 8;

    /// 从目录条目解析接力描述
    ///
    /// # 规则
    /// - 名称含 "squad" 或性别为 Mixed → 8 棒混合组接力 (默认 50m 自由泳)
    /// - 名称含 "medley" → 4 棒混合泳接力
    /// - 名称含 "freestyle" → N 棒自由泳接力 (N 由 "NxDm" 解析,默认 4)
    /// - 其他 → None (无法识别)
    pub fn parse(entry: &CatalogEvent) -> Option<Self> {
        let lower = entry.event.to_lowercase();
        let leg_spec = parse_leg_spec(&lower);
        let leg_distance_m = leg_spec
            .map(|(_, d)| d)
            .unwrap_or(Self::DEFAULT_LEG_DISTANCE_M);

        let (kind, legs, leg_stroke) = if lower.contains("squad") || entry.gender == Gender::Mixed {
            let stroke = detect_stroke(&lower).unwrap_or(Stroke::Freestyle);
            (RelayKind::Squad, Self::SQUAD_LEGS, stroke)
        } else if lower.contains("medley") {
            (RelayKind::Medley, Stroke::MEDLEY_ORDER.len(), Stroke::Freestyle)
        } else if lower.contains("freestyle") {
            let legs = leg_spec.map(|(n, _)| n).unwrap_or(Self::DEFAULT_LEGS);
            (RelayKind::Freestyle, legs, Stroke::Freestyle)
        } else {
            return None;
        };

        if legs == 0 {
            return None;
        }

        Some(Self {
            name: entry.event.clone(),
            kind,
            legs,
            leg_distance_m,
            leg_stroke,
        })
    }

    /// 单一泳姿接力的每棒项目
    pub fn leg_event(&self) -> StrokeDistance {
        StrokeDistance::new(self.leg_distance_m, self.leg_stroke)
    }
}

fn detect_stroke(lower: &str) -> Option<Stroke> {
    [
        ("freestyle", Stroke::Freestyle),
        ("backstroke", Stroke::Backstroke),
        ("breaststroke", Stroke::Breaststroke),
        ("butterfly", Stroke::Butterfly),
    ]
    .iter()
    .find(|(name, _)| lower.contains(name))
    .map(|(_, stroke)| *stroke)
}

/// 接力名称归一化比较 ("4 x 50m Freestyle" == "4x50m freestyle")
pub fn relay_names_match(a: &str, b: &str) -> bool {
    let normalize = |s: &str| -> String {
        s.chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase()
    };
    normalize(a) == normalize(b)
}
