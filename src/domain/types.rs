// ==========================================
// 游泳比赛选手分配系统 - 领域类型定义
// ==========================================
// 职责: 性别、泳姿、泳池长度、年龄组、成绩状态等值类型
// 红线: 纯值类型,不含分配逻辑
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 性别 (Gender)
// ==========================================
// 输入兼容: "M"/"F"/"Male"/"Female"/"Mixed"
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(alias = "M", alias = "male")]
    Male,
    #[serde(alias = "F", alias = "female")]
    Female,
    #[serde(alias = "X", alias = "mixed")]
    Mixed, // 仅用于混合接力 (Squadrun)
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
            Gender::Mixed => write!(f, "Mixed"),
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "M" | "Male" | "male" => Ok(Gender::Male),
            "F" | "Female" | "female" => Ok(Gender::Female),
            "X" | "Mixed" | "mixed" => Ok(Gender::Mixed),
            other => Err(format!("未知性别: {}", other)),
        }
    }
}

// ==========================================
// 泳姿 (Stroke)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stroke {
    Freestyle,
    Backstroke,
    Breaststroke,
    Butterfly,
    #[serde(rename = "Individual Medley", alias = "IndividualMedley")]
    IndividualMedley,
}

impl Stroke {
    /// 混合泳接力的固定棒次顺序: 仰 → 蛙 → 蝶 → 自
    pub const MEDLEY_ORDER: [Stroke; 4] = [
        Stroke::Backstroke,
        Stroke::Breaststroke,
        Stroke::Butterfly,
        Stroke::Freestyle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stroke::Freestyle => "Freestyle",
            Stroke::Backstroke => "Backstroke",
            Stroke::Breaststroke => "Breaststroke",
            Stroke::Butterfly => "Butterfly",
            Stroke::IndividualMedley => "Individual Medley",
        }
    }
}

impl fmt::Display for Stroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stroke {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "freestyle" | "free" => Ok(Stroke::Freestyle),
            "backstroke" | "back" => Ok(Stroke::Backstroke),
            "breaststroke" | "breast" => Ok(Stroke::Breaststroke),
            "butterfly" | "fly" => Ok(Stroke::Butterfly),
            "individualmedley" | "im" => Ok(Stroke::IndividualMedley),
            _ => Err(format!("未知泳姿: {}", s)),
        }
    }
}

// ==========================================
// 泳池长度 (Course)
// ==========================================
// SC = 短池(25m), LC = 长池(50m)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Course {
    Sc,
    Lc,
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Course::Sc => write!(f, "SC"),
            Course::Lc => write!(f, "LC"),
        }
    }
}

// ==========================================
// 年龄组 (Age Category)
// ==========================================
// 数值即年龄上限 (age <= ceiling 即可参赛)
// 特殊值: 99 = Open (无上限), 998 = 混合接力组
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgeCategory(pub u32);

impl AgeCategory {
    pub const OPEN: AgeCategory = AgeCategory(99);
    pub const MIXED: AgeCategory = AgeCategory(998);

    /// Open 组基准时间借用的年龄组
    pub const OPEN_BASELINE_AGE: u32 = 17;

    pub fn ceiling(&self) -> u32 {
        self.0
    }

    pub fn is_open(&self) -> bool {
        *self == Self::OPEN || *self == Self::MIXED
    }

    /// 年龄准入判定
    ///
    /// # 规则
    /// - Open/混合组: 任意年龄
    /// - 否则: age <= ceiling
    pub fn admits(&self, age: u32) -> bool {
        self.is_open() || age <= self.0
    }
}

impl fmt::Display for AgeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            AgeCategory::OPEN => write!(f, "Open"),
            AgeCategory::MIXED => write!(f, "Mixed"),
            AgeCategory(age) => write!(f, "{}U", age),
        }
    }
}

impl From<u32> for AgeCategory {
    fn from(value: u32) -> Self {
        AgeCategory(value)
    }
}

// ==========================================
// 成绩状态 (Time Status)
// ==========================================
// QT = 快于资格线 (index < 0), CT = 其他
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeStatus {
    #[serde(rename = "QT")]
    Qualifying,
    #[serde(rename = "CT")]
    Consideration,
}

impl TimeStatus {
    pub fn from_index(index: Option<f64>) -> Self {
        match index {
            Some(value) if value < 0.0 => TimeStatus::Qualifying,
            _ => TimeStatus::Consideration,
        }
    }
}

impl fmt::Display for TimeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeStatus::Qualifying => write!(f, "QT"),
            TimeStatus::Consideration => write!(f, "CT"),
        }
    }
}

// ==========================================
// 接力类型 (Relay Kind)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelayKind {
    Freestyle, // 自由泳接力: 最快 N 人
    Medley,    // 混合泳接力: 每棒一种泳姿
    Squad,     // 混合组接力: 8 棒固定年龄组/性别
}

impl fmt::Display for RelayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelayKind::Freestyle => write!(f, "FREESTYLE"),
            RelayKind::Medley => write!(f, "MEDLEY"),
            RelayKind::Squad => write!(f, "SQUAD"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_category_admits() {
        assert!(AgeCategory(13).admits(13));
        assert!(AgeCategory(13).admits(9));
        assert!(!AgeCategory(13).admits(14));
        assert!(AgeCategory::OPEN.admits(40));
        assert!(AgeCategory::MIXED.admits(40));
    }

    #[test]
    fn test_age_category_display() {
        assert_eq!(AgeCategory(11).to_string(), "11U");
        assert_eq!(AgeCategory::OPEN.to_string(), "Open");
    }

    #[test]
    fn test_gender_accepts_short_codes() {
        let g: Gender = serde_json::from_str("\"M\"").unwrap();
        assert_eq!(g, Gender::Male);
        let g: Gender = serde_json::from_str("\"Female\"").unwrap();
        assert_eq!(g, Gender::Female);
        assert_eq!("F".parse::<Gender>().unwrap(), Gender::Female);
        assert!("Q".parse::<Gender>().is_err());
    }

    #[test]
    fn test_stroke_from_str() {
        assert_eq!("Individual Medley".parse::<Stroke>().unwrap(), Stroke::IndividualMedley);
        assert_eq!("back".parse::<Stroke>().unwrap(), Stroke::Backstroke);
        assert!("Doggy".parse::<Stroke>().is_err());
    }

    #[test]
    fn test_time_status_from_index() {
        assert_eq!(TimeStatus::from_index(Some(-0.01)), TimeStatus::Qualifying);
        assert_eq!(TimeStatus::from_index(Some(0.0)), TimeStatus::Consideration);
        assert_eq!(TimeStatus::from_index(None), TimeStatus::Consideration);
    }
}
