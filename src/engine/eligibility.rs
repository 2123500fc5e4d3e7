// ==========================================
// 游泳比赛选手分配系统 - 参赛资格与排名构建
// ==========================================
// 职责: 运动员成绩 × 项目名额 交叉匹配 → 计分 → 全局排名
// 输入: 名额表 (目录顺序) + 花名册 (输入顺序) + 资格时间表
// 输出: 稳定排序后的条目列表
// 红线: 排名必须确定 (同分按目录顺序、再按原始记录顺序)
// ==========================================

use crate::config::OptimizationConfig;
use crate::domain::athlete::{Athlete, RecordedTime, Roster};
use crate::domain::diagnostic::Diagnostic;
use crate::domain::qualifying::QualifyingTimeTable;
use crate::domain::types::Course;
use crate::engine::scoring::{compute_score, rank_entries, PerformanceEntry};
use crate::engine::slot_table::SlotTable;
use tracing::{info, instrument, warn};

// ==========================================
// EligibilityBuilder - 排名构建器
// ==========================================
pub struct EligibilityBuilder {
    round_before_sort: bool,
    baseline_course: Option<Course>,
}

impl EligibilityBuilder {
    pub fn new(round_before_sort: bool, baseline_course: Option<Course>) -> Self {
        Self {
            round_before_sort,
            baseline_course,
        }
    }

    pub fn from_config(config: &OptimizationConfig) -> Self {
        Self::new(config.round_before_sort, config.baseline_course)
    }

    /// 构建全局排名
    ///
    /// 准入条件 (全部满足):
    /// 1) 性别完全一致
    /// 2) 泳姿+距离完全一致
    /// 3) 年龄 <= 年龄组上限 (Open 不限)
    ///
    /// 每条成绩记录 (各泳池长度) 生成一个条目; 无基准时 index = None, 排在末尾
    #[instrument(skip_all, fields(slots = slots.len(), athletes = roster.len()))]
    pub fn build(
        &self,
        slots: &SlotTable,
        roster: &Roster,
        qualifying_times: &QualifyingTimeTable,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Vec<PerformanceEntry> {
        let mut entries = Vec::new();

        for key in slots.keys() {
            let baseline =
                qualifying_times.resolve(key.event, key.age_category, key.gender, self.baseline_course);
            let before = entries.len();

            // 按原始记录顺序展开, 而非按运动员分组
            let mut candidates: Vec<(&Athlete, &RecordedTime)> = roster
                .athletes()
                .iter()
                .filter(|a| a.gender == key.gender && key.age_category.admits(a.age))
                .flat_map(|a| a.times_for(key.event).map(move |t| (a, t)))
                .collect();
            candidates.sort_by_key(|(_, recorded)| recorded.seq);

            for (athlete, recorded) in candidates {
                let (diff, index) = match baseline {
                    Some(qt) => {
                        let (diff, index) = compute_score(recorded.seconds, qt, self.round_before_sort);
                        (Some(diff), Some(index))
                    }
                    None => (None, None),
                };

                entries.push(PerformanceEntry {
                    slot: key,
                    athlete_id: athlete.id.clone(),
                    athlete_name: athlete.full_name(),
                    course: recorded.course,
                    time: recorded.seconds,
                    baseline,
                    diff,
                    index,
                });
            }

            let added = entries.len() - before;
            if baseline.is_none() && added > 0 {
                warn!(slot = %key, entries = added, "名额无资格基准, 条目排在末尾");
                diagnostics.push(Diagnostic::MissingBaseline {
                    event: key.label(),
                    entries: added,
                });
            }
        }

        rank_entries(&mut entries);
        info!(entries = entries.len(), "排名构建完成");
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::athlete::{AthleteId, RosterRecord};
    use crate::domain::event::{SlotKey, StrokeDistance};
    use crate::domain::qualifying::QualifyingTime;
    use crate::domain::types::{AgeCategory, Gender, Stroke};

    fn record(id: &str, gender: Gender, age: u32, distance: u32, time: f64) -> RosterRecord {
        RosterRecord {
            first_name: id.to_string(),
            last_name: "Swimmer".to_string(),
            id: AthleteId::new(id),
            gender,
            age,
            date_of_birth: None,
            stroke: Stroke::Freestyle,
            distance,
            course: Course::Sc,
            time,
            available: true,
        }
    }

    fn free(distance: u32, age: u32) -> SlotKey {
        SlotKey::new(
            StrokeDistance::new(distance, Stroke::Freestyle),
            AgeCategory(age),
            Gender::Male,
        )
    }

    fn qt(distance: u32, age: u32, seconds: f64) -> QualifyingTime {
        QualifyingTime {
            event: StrokeDistance::new(distance, Stroke::Freestyle),
            age,
            course: Course::Sc,
            gender: Gender::Male,
            seconds,
        }
    }

    #[test]
    fn test_filters_gender_age_and_event() {
        let roster = Roster::from_records(
            vec![
                record("young", Gender::Male, 12, 100, 62.0),
                record("old", Gender::Male, 15, 100, 58.0),
                record("girl", Gender::Female, 12, 100, 61.0),
                record("sprinter", Gender::Male, 12, 50, 28.0),
            ],
            None,
        );
        let slots = SlotTable::from_keys([free(100, 13)]);
        let table = QualifyingTimeTable::from_rows(vec![qt(100, 13, 65.0)]);
        let mut diagnostics = Vec::new();

        let entries = EligibilityBuilder::new(true, None).build(&slots, &roster, &table, &mut diagnostics);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].athlete_id, AthleteId::new("young"));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_missing_baseline_sorts_last_and_is_reported() {
        let roster = Roster::from_records(
            vec![
                record("a", Gender::Male, 12, 100, 70.0),
                record("a", Gender::Male, 12, 50, 20.0),
            ],
            None,
        );
        let slots = SlotTable::from_keys([free(50, 13), free(100, 13)]);
        let table = QualifyingTimeTable::from_rows(vec![qt(100, 13, 65.0)]);
        let mut diagnostics = Vec::new();

        let entries = EligibilityBuilder::new(true, None).build(&slots, &roster, &table, &mut diagnostics);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].slot, free(100, 13));
        assert_eq!(entries[1].index, None);
        assert_eq!(
            diagnostics,
            vec![Diagnostic::MissingBaseline {
                event: "13U Male 50m Freestyle".to_string(),
                entries: 1
            }]
        );
    }

    #[test]
    fn test_equal_index_keeps_catalog_then_roster_order() {
        let roster = Roster::from_records(
            vec![
                record("first", Gender::Male, 12, 100, 60.0),
                record("second", Gender::Male, 12, 100, 60.0),
            ],
            None,
        );
        let slots = SlotTable::from_keys([free(100, 13)]);
        let table = QualifyingTimeTable::from_rows(vec![qt(100, 13, 65.0)]);
        let mut diagnostics = Vec::new();

        let entries = EligibilityBuilder::new(true, None).build(&slots, &roster, &table, &mut diagnostics);

        assert_eq!(entries[0].athlete_id, AthleteId::new("first"));
        assert_eq!(entries[1].athlete_id, AthleteId::new("second"));
    }

    #[test]
    fn test_equal_index_follows_raw_record_order_across_athletes() {
        let mut lc = record("a", Gender::Male, 12, 100, 60.0);
        lc.course = Course::Lc;
        let roster = Roster::from_records(
            vec![
                record("a", Gender::Male, 12, 100, 62.0),
                record("b", Gender::Male, 12, 100, 60.0),
                lc,
            ],
            None,
        );
        let slots = SlotTable::from_keys([free(100, 13)]);
        let table = QualifyingTimeTable::from_rows(vec![qt(100, 13, 65.0)]);
        let mut diagnostics = Vec::new();

        let entries = EligibilityBuilder::new(true, None).build(&slots, &roster, &table, &mut diagnostics);

        let order: Vec<(&str, Course)> = entries
            .iter()
            .map(|e| (e.athlete_id.as_str(), e.course))
            .collect();
        assert_eq!(order, vec![("b", Course::Sc), ("a", Course::Lc), ("a", Course::Sc)]);
    }
}
