// ==========================================
// 混合泳接力 - 有界组合搜索
// ==========================================
// 棒次固定: 仰 → 蛙 → 蝶 → 自
// 搜索范围: 每棒取最快 pool_width 人, 枚举至多 combination_cap 个有效组合
// 注意: 结果是有界搜索内的最优, 不保证全局最优
// ==========================================

use super::{
    incomplete, place_or_fallback, place_pre_assignments, PlacedLegs, RelayContext,
    RelayFormation, RelayLeg, RelayTeam,
};
use crate::config::defaults;
use crate::domain::assignment::RelayPreAssignment;
use crate::domain::athlete::{Athlete, AthleteId};
use crate::domain::diagnostic::Diagnostic;
use crate::domain::event::StrokeDistance;
use crate::domain::time::round_to;
use crate::domain::types::{RelayKind, Stroke};
use tracing::debug;

/// 搜索上限
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MedleySearchLimits {
    pub pool_width: usize,
    pub combination_cap: usize,
}

impl Default for MedleySearchLimits {
    fn default() -> Self {
        Self {
            pool_width: defaults::MEDLEY_POOL_WIDTH,
            combination_cap: defaults::MEDLEY_COMBINATION_CAP,
        }
    }
}

pub struct MedleyRelayBuilder {
    limits: MedleySearchLimits,
}

impl MedleyRelayBuilder {
    pub fn new(limits: MedleySearchLimits) -> Self {
        Self { limits }
    }

    /// 预分配 → 棒次索引: 优先按泳姿, 否则按 position (1..=4)
    fn position_of(pre: &RelayPreAssignment) -> Option<usize> {
        match pre.stroke {
            Some(stroke) => Stroke::MEDLEY_ORDER.iter().position(|s| *s == stroke),
            None => (pre.position as usize).checked_sub(1),
        }
    }

    /// 构建每棒候选池
    ///
    /// 已预分配的棒次只含该运动员; 其余棒次排除全部预分配运动员后取最快 pool_width 人
    fn build_pools<'a>(
        &self,
        ctx: &RelayContext<'a>,
        placed: &PlacedLegs<'a>,
        leg_events: &[StrokeDistance],
    ) -> Vec<Vec<(&'a Athlete, f64)>> {
        let taken: Vec<&AthleteId> = placed.iter().flatten().map(|(a, _)| &a.id).collect();

        leg_events
            .iter()
            .zip(placed.iter())
            .map(|(event, fixed)| match fixed {
                Some(entry) => vec![*entry],
                None => {
                    let mut pool = ctx.ranked_by_time(*event, &taken);
                    pool.truncate(self.limits.pool_width);
                    pool
                }
            })
            .collect()
    }
}

impl RelayFormation for MedleyRelayBuilder {
    fn form(&self, ctx: &RelayContext<'_>, diagnostics: &mut Vec<Diagnostic>) -> Option<RelayTeam> {
        let distance = ctx.descriptor.leg_distance_m;
        let leg_events: Vec<StrokeDistance> = Stroke::MEDLEY_ORDER
            .iter()
            .map(|stroke| StrokeDistance::new(distance, *stroke))
            .collect();
        let positions = leg_events.len();

        let placement = place_pre_assignments(
            ctx,
            positions,
            Self::position_of,
            |position| leg_events[position],
            |_, _| true,
        );
        let placed = place_or_fallback(ctx, placement, positions, diagnostics);

        let pools = self.build_pools(ctx, &placed, &leg_events);
        if let Some(empty) = pools.iter().position(|pool| pool.is_empty()) {
            incomplete(
                ctx,
                format!("无人有 {} 成绩", leg_events[empty]),
                diagnostics,
            );
            return None;
        }

        let mut search = MedleySearch::new(&pools, self.limits.combination_cap);
        search.run();
        debug!(
            relay = %ctx.label,
            examined = search.examined,
            pool_sizes = ?pools.iter().map(|p| p.len()).collect::<Vec<_>>(),
            "混合泳接力搜索完成"
        );

        let best = match search.best {
            Some((_, choice)) => choice,
            None => {
                incomplete(ctx, "候选池内无 4 名不同运动员的组合".to_string(), diagnostics);
                return None;
            }
        };

        let legs: Vec<RelayLeg> = best
            .iter()
            .zip(pools.iter())
            .zip(leg_events.iter())
            .map(|((&pick, pool), event)| {
                let (athlete, time) = pool[pick];
                RelayLeg {
                    athlete_id: athlete.id.clone(),
                    name: athlete.full_name(),
                    event: *event,
                    time,
                }
            })
            .collect();

        Some(RelayTeam::new(ctx.label.clone(), RelayKind::Medley, legs))
    }
}

// ==========================================
// MedleySearch - 深度优先枚举
// ==========================================
// 顺序: 仰泳池 → 蛙泳池 → 蝶泳池 → 自由泳池, 各池内按成绩升序
// 计数: 只统计 4 人互不相同的完整组合, 达到上限立即停止
// 择优: 总成绩 (两位小数) 严格更小才替换, 同分保留先找到者
struct MedleySearch<'p, 'a> {
    pools: &'p [Vec<(&'a Athlete, f64)>],
    cap: usize,
    examined: usize,
    best: Option<(f64, Vec<usize>)>,
    chosen: Vec<usize>,
}

impl<'p, 'a> MedleySearch<'p, 'a> {
    fn new(pools: &'p [Vec<(&'a Athlete, f64)>], cap: usize) -> Self {
        Self {
            pools,
            cap,
            examined: 0,
            best: None,
            chosen: Vec::with_capacity(pools.len()),
        }
    }

    fn run(&mut self) {
        self.descend(0);
    }

    fn descend(&mut self, leg: usize) {
        if self.examined >= self.cap {
            return;
        }

        if leg == self.pools.len() {
            self.examined += 1;
            let total = self
                .chosen
                .iter()
                .zip(self.pools.iter())
                .fold(0.0, |acc, (&pick, pool)| acc + pool[pick].1);
            let total = round_to(total, 2);

            let improved = match &self.best {
                Some((best_total, _)) => total < *best_total,
                None => true,
            };
            if improved {
                self.best = Some((total, self.chosen.clone()));
            }
            return;
        }

        for pick in 0..self.pools[leg].len() {
            let athlete = &self.pools[leg][pick].0.id;
            let reused = self
                .chosen
                .iter()
                .enumerate()
                .any(|(l, &p)| &self.pools[l][p].0.id == athlete);
            if reused {
                continue;
            }

            self.chosen.push(pick);
            self.descend(leg + 1);
            self.chosen.pop();

            if self.examined >= self.cap {
                break;
            }
        }
    }
}
