// ==========================================
// 游泳比赛选手分配系统 - 结果组装
// ==========================================
// 职责: 名额状态表 + 接力队 → 输出文档
// 输出顺序: 个人项目按目录顺序; 接力按组建顺序
// ==========================================

use crate::domain::athlete::Roster;
use crate::domain::diagnostic::Diagnostic;
use crate::domain::result::{
    IndividualResult, OptimizationResult, OptimizationStats, RelayLegResult, RelayResult,
};
use crate::domain::time::{format_leg_time, format_total_time, round_to};
use crate::domain::types::TimeStatus;
use crate::engine::relay::RelayTeam;
use crate::engine::scoring::PerformanceEntry;
use crate::engine::slot_table::SlotTable;

pub struct ResultAssembler;

impl ResultAssembler {
    /// 个人项目结果
    ///
    /// 成绩与指数取排名中该 (名额, 运动员) 的首个条目;
    /// 预分配运动员无成绩时 time/index 为空, 状态为 CT
    pub fn individual_results(
        slots: &SlotTable,
        roster: &Roster,
        ranking: &[PerformanceEntry],
    ) -> Vec<IndividualResult> {
        slots
            .slots()
            .iter()
            .filter_map(|slot| {
                let athlete_id = slot.state.athlete()?;
                let entry = ranking
                    .iter()
                    .find(|e| e.slot == slot.key && &e.athlete_id == athlete_id);
                let swimmer = roster
                    .get(athlete_id)
                    .map(|a| a.full_name())
                    .unwrap_or_else(|| athlete_id.to_string());
                let index = entry.and_then(|e| e.index);

                Some(IndividualResult {
                    event: slot.key.label(),
                    swimmer,
                    time: entry.map(|e| format_leg_time(e.time)),
                    index,
                    status: TimeStatus::from_index(index),
                })
            })
            .collect()
    }

    pub fn relay_results(teams: &[RelayTeam]) -> Vec<RelayResult> {
        teams
            .iter()
            .map(|team| RelayResult {
                relay: team.label.clone(),
                total_time: format_total_time(team.total_time),
                swimmers: team
                    .legs
                    .iter()
                    .map(|leg| RelayLegResult {
                        name: leg.name.clone(),
                        stroke: team.leg_stroke(leg).map(|s| s.to_string()),
                        time: format_leg_time(leg.time),
                    })
                    .collect(),
            })
            .collect()
    }

    /// 汇总统计
    pub fn stats(individual: &[IndividualResult], relay: &[RelayResult]) -> OptimizationStats {
        let indexes: Vec<f64> = individual.iter().filter_map(|r| r.index).collect();
        let average_index = if indexes.is_empty() {
            0.0
        } else {
            round_to(indexes.iter().sum::<f64>() / indexes.len() as f64, 3)
        };

        OptimizationStats {
            qualifying_times: individual
                .iter()
                .filter(|r| r.status == TimeStatus::Qualifying)
                .count(),
            average_index,
            relay_teams: relay.len(),
            total_events: individual.len(),
        }
    }

    pub fn assemble(
        slots: &SlotTable,
        roster: &Roster,
        ranking: &[PerformanceEntry],
        teams: &[RelayTeam],
        diagnostics: Vec<Diagnostic>,
    ) -> OptimizationResult {
        let individual = Self::individual_results(slots, roster, ranking);
        let relay = Self::relay_results(teams);
        let stats = Self::stats(&individual, &relay);

        OptimizationResult {
            individual,
            relay,
            stats,
            diagnostics,
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(index: Option<f64>) -> IndividualResult {
        IndividualResult {
            event: "13U Male 100m Freestyle".to_string(),
            swimmer: "Alice Smith".to_string(),
            time: Some("60.00s".to_string()),
            index,
            status: TimeStatus::from_index(index),
        }
    }

    #[test]
    fn test_stats() {
        let individual = vec![result(Some(-0.077)), result(Some(0.033)), result(None)];
        let stats = ResultAssembler::stats(&individual, &[]);

        assert_eq!(stats.qualifying_times, 1);
        assert_eq!(stats.total_events, 3);
        assert_eq!(stats.relay_teams, 0);
        assert_eq!(stats.average_index, -0.022);
    }

    #[test]
    fn test_stats_without_indexes() {
        let stats = ResultAssembler::stats(&[result(None)], &[]);
        assert_eq!(stats.average_index, 0.0);
        assert_eq!(stats.qualifying_times, 0);
    }
}
