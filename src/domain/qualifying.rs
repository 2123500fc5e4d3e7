// ==========================================
// 游泳比赛选手分配系统 - 资格时间表
// ==========================================
// 职责: (项目, 年龄组, 性别) → 资格基准时间 (QT)
// 回退规则:
//   1) 精确匹配年龄组
//   2) Open 组 → 借用 17 岁组基准
//   3) 年龄组低于已定义最小年龄组 → 借用最小年龄组基准
// ==========================================

use crate::domain::event::StrokeDistance;
use crate::domain::time::deserialize_seconds;
use crate::domain::types::{AgeCategory, Course, Gender};
use serde::{Deserialize, Serialize};

/// 仅 kind == "QT" 的记录参与计分
pub const QUALIFYING_KIND: &str = "QT";

// ==========================================
// QualifyingTimeRecord - 资格时间 (外部输入)
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualifyingTimeRecord {
    pub event: StrokeDistance,
    pub age_category: u32,
    pub course: Course,
    #[serde(default = "default_kind")]
    pub kind: String,
    pub gender: Gender,
    #[serde(deserialize_with = "deserialize_seconds")]
    pub time: f64,
}

fn default_kind() -> String {
    QUALIFYING_KIND.to_string()
}

// ==========================================
// QualifyingTime - 资格基准
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualifyingTime {
    pub event: StrokeDistance,
    pub age: u32,
    pub course: Course,
    pub gender: Gender,
    pub seconds: f64,
}

// ==========================================
// QualifyingTimeTable - 资格时间表
// ==========================================
// 保留输入顺序: 同键多行时取第一条
#[derive(Debug, Clone, Default)]
pub struct QualifyingTimeTable {
    rows: Vec<QualifyingTime>,
}

impl QualifyingTimeTable {
    /// 从外部记录构建 (过滤非 QT 记录与非正时间)
    pub fn from_records(records: Vec<QualifyingTimeRecord>) -> Self {
        let rows = records
            .into_iter()
            .filter(|r| r.kind.trim().eq_ignore_ascii_case(QUALIFYING_KIND))
            .filter(|r| r.time.is_finite() && r.time > 0.0)
            .map(|r| QualifyingTime {
                event: r.event,
                age: r.age_category,
                course: r.course,
                gender: r.gender,
                seconds: r.time,
            })
            .collect();

        Self { rows }
    }

    pub fn from_rows(rows: Vec<QualifyingTime>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 解析基准时间
    ///
    /// # 参数
    /// - `event`: 泳姿+距离
    /// - `category`: 项目年龄组
    /// - `gender`: 性别
    /// - `course`: 限定泳池长度 (None 表示不限定)
    ///
    /// # 返回
    /// - Some(seconds): 命中 (含回退)
    /// - None: 无任何可用基准
    pub fn resolve(
        &self,
        event: StrokeDistance,
        category: AgeCategory,
        gender: Gender,
        course: Option<Course>,
    ) -> Option<f64> {
        if let Some(seconds) = self.lookup(event, category.ceiling(), gender, course) {
            return Some(seconds);
        }

        if category == AgeCategory::OPEN {
            return self.lookup(event, AgeCategory::OPEN_BASELINE_AGE, gender, course);
        }

        let youngest = self
            .candidates(event, gender, course)
            .map(|row| row.age)
            .min()?;
        if category.ceiling() < youngest {
            return self.lookup(event, youngest, gender, course);
        }

        None
    }

    fn lookup(
        &self,
        event: StrokeDistance,
        age: u32,
        gender: Gender,
        course: Option<Course>,
    ) -> Option<f64> {
        self.candidates(event, gender, course)
            .find(|row| row.age == age)
            .map(|row| row.seconds)
    }

    fn candidates(
        &self,
        event: StrokeDistance,
        gender: Gender,
        course: Option<Course>,
    ) -> impl Iterator<Item = &QualifyingTime> {
        self.rows.iter().filter(move |row| {
            row.event == event
                && row.gender == gender
                && course.map_or(true, |c| row.course == c)
        })
    }
}
