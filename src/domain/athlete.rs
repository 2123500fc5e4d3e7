// ==========================================
// 游泳比赛选手分配系统 - 运动员领域模型
// ==========================================
// 职责: 花名册记录 (外部输入) → 运动员实体 (个人最好成绩集合)
// 红线: 只接收 available=true 的记录; 构建后不可变
// ==========================================

use crate::domain::event::StrokeDistance;
use crate::domain::time::deserialize_seconds;
use crate::domain::types::{Course, Gender, Stroke};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

// ==========================================
// AthleteId - 注册号 (ASA 编号)
// ==========================================
// 输入兼容数字与字符串两种形式
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct AthleteId(pub String);

impl AthleteId {
    pub fn new(id: impl Into<String>) -> Self {
        AthleteId(id.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AthleteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for AthleteId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(u64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => AthleteId(n.to_string()),
            RawId::Text(s) => AthleteId::new(s),
        })
    }
}

// ==========================================
// RosterRecord - 花名册单行 (一名运动员的一项成绩)
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterRecord {
    pub first_name: String,
    pub last_name: String,
    #[serde(alias = "asaNo", alias = "swimmerId")]
    pub id: AthleteId,
    pub gender: Gender,
    pub age: u32,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    pub stroke: Stroke,
    pub distance: u32,
    pub course: Course,
    #[serde(deserialize_with = "deserialize_seconds")]
    pub time: f64,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

// ==========================================
// RecordedTime - 个人最好成绩
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordedTime {
    pub event: StrokeDistance,
    pub course: Course,
    pub seconds: f64,
    /// 在原始花名册记录中的位置 (同分排序依据)
    pub seq: usize,
}

// ==========================================
// Athlete - 运动员
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct Athlete {
    pub id: AthleteId,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub age: u32,
    /// 按 (泳姿+距离, 泳池) 去重,保留输入顺序
    pub times: Vec<RecordedTime>,
}

impl Athlete {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// 某项目的所有成绩 (各泳池长度), 保留输入顺序
    pub fn times_for(&self, event: StrokeDistance) -> impl Iterator<Item = &RecordedTime> {
        self.times.iter().filter(move |t| t.event == event)
    }

    /// 接力用成绩: 各泳池长度中最快者
    pub fn best_time(&self, event: StrokeDistance) -> Option<f64> {
        self.times_for(event)
            .map(|t| t.seconds)
            .fold(None, |best, t| match best {
                Some(b) if b <= t => Some(b),
                _ => Some(t),
            })
    }

    fn record_time(&mut self, time: RecordedTime) {
        match self
            .times
            .iter_mut()
            .find(|t| t.event == time.event && t.course == time.course)
        {
            Some(existing) => {
                if time.seconds < existing.seconds {
                    existing.seconds = time.seconds;
                    existing.seq = time.seq;
                }
            }
            None => self.times.push(time),
        }
    }
}

/// 计算指定日期时的周岁年龄
pub fn age_on(date_of_birth: NaiveDate, reference: NaiveDate) -> u32 {
    let mut years = reference.year() - date_of_birth.year();
    if (reference.month(), reference.day()) < (date_of_birth.month(), date_of_birth.day()) {
        years -= 1;
    }
    years.max(0) as u32
}

// ==========================================
// Roster - 可用运动员花名册
// ==========================================
// 运动员顺序 = 在输入记录中首次出现的顺序; 成绩另记原始记录位置
#[derive(Debug, Clone, Default)]
pub struct Roster {
    athletes: Vec<Athlete>,
    index: HashMap<AthleteId, usize>,
}

impl Roster {
    /// 从花名册记录构建
    ///
    /// # 参数
    /// - `records`: 原始记录 (每行一项成绩)
    /// - `age_reference_date`: 若提供且记录带出生日期,按该日期重算年龄
    ///
    /// # 规则
    /// - available=false 的记录丢弃
    /// - 非正成绩视为无成绩
    /// - 同一 (项目, 泳池) 多条成绩取最快
    pub fn from_records(records: Vec<RosterRecord>, age_reference_date: Option<NaiveDate>) -> Self {
        let mut roster = Roster::default();

        for (seq, record) in records.into_iter().enumerate() {
            if !record.available {
                debug!(athlete_id = %record.id, "运动员不可用, 跳过");
                continue;
            }

            let position = match roster.index.get(&record.id) {
                Some(&position) => position,
                None => {
                    let age = match (record.date_of_birth, age_reference_date) {
                        (Some(dob), Some(reference)) => age_on(dob, reference),
                        _ => record.age,
                    };
                    roster.athletes.push(Athlete {
                        id: record.id.clone(),
                        first_name: record.first_name.trim().to_string(),
                        last_name: record.last_name.trim().to_string(),
                        gender: record.gender,
                        age,
                        times: Vec::new(),
                    });
                    let position = roster.athletes.len() - 1;
                    roster.index.insert(record.id.clone(), position);
                    position
                }
            };

            if !(record.time.is_finite() && record.time > 0.0) {
                continue;
            }

            roster.athletes[position].record_time(RecordedTime {
                event: StrokeDistance::new(record.distance, record.stroke),
                course: record.course,
                seconds: record.time,
                seq,
            });
        }

        roster
    }

    pub fn from_athletes(athletes: Vec<Athlete>) -> Self {
        let index = athletes
            .iter()
            .enumerate()
            .map(|(i, a)| (a.id.clone(), i))
            .collect();
        Self { athletes, index }
    }

    pub fn get(&self, id: &AthleteId) -> Option<&Athlete> {
        self.index.get(id).map(|&i| &self.athletes[i])
    }

    pub fn athletes(&self) -> &[Athlete] {
        &self.athletes
    }

    pub fn len(&self) -> usize {
        self.athletes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.athletes.is_empty()
    }
}
