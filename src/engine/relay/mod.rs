// ==========================================
// 游泳比赛选手分配系统 - 接力队组建引擎
// ==========================================
// 职责: 按 (年龄组, 性别) 分桶, 组建自由泳/混合泳/混合组接力
// 红线: 人数不足只省略该队, 不报致命错误
// ==========================================
// 预分配策略: 任一预分配校验失败 → 该接力全部预分配作废, 回退全自动选人
// ==========================================

pub mod freestyle;
pub mod medley;
pub mod squad;

pub use freestyle::FreestyleRelayBuilder;
pub use medley::{MedleyRelayBuilder, MedleySearchLimits};
pub use squad::SquadRelayBuilder;

use crate::config::OptimizationConfig;
use crate::domain::assignment::RelayPreAssignment;
use crate::domain::athlete::{Athlete, AthleteId, Roster};
use crate::domain::diagnostic::Diagnostic;
use crate::domain::event::{relay_names_match, CatalogEvent, RelayDescriptor, StrokeDistance};
use crate::domain::time::round_to;
use crate::domain::types::{AgeCategory, Gender, RelayKind, Stroke};
use tracing::{debug, info, instrument, warn};

// ==========================================
// RelayTeam - 接力队
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct RelayLeg {
    pub athlete_id: AthleteId,
    pub name: String,
    pub event: StrokeDistance,
    pub time: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RelayTeam {
    pub label: String,
    pub kind: RelayKind,
    pub legs: Vec<RelayLeg>, // 按棒次顺序
    pub total_time: f64,
}

impl RelayTeam {
    pub fn new(label: String, kind: RelayKind, legs: Vec<RelayLeg>) -> Self {
        let total = legs.iter().fold(0.0, |acc, leg| acc + leg.time);
        Self {
            label,
            kind,
            legs,
            total_time: round_to(total, 2),
        }
    }

    /// 混合泳接力输出每棒泳姿
    pub fn leg_stroke(&self, leg: &RelayLeg) -> Option<Stroke> {
        match self.kind {
            RelayKind::Medley => Some(leg.event.stroke),
            _ => None,
        }
    }
}

// ==========================================
// RelayContext - 单个接力项目的组队上下文
// ==========================================
pub struct RelayContext<'a> {
    pub descriptor: RelayDescriptor,
    pub label: String,
    pub age_category: AgeCategory,
    pub gender: Gender,
    /// 分桶后的候选运动员 (花名册顺序)
    pub group: Vec<&'a Athlete>,
    pub pre_assignments: Vec<&'a RelayPreAssignment>,
}

impl<'a> RelayContext<'a> {
    pub fn new(
        entry: &CatalogEvent,
        descriptor: RelayDescriptor,
        roster: &'a Roster,
        pre_assignments: Vec<&'a RelayPreAssignment>,
    ) -> Self {
        let group = match descriptor.kind {
            // 混合组接力按棒次筛选, 此处保留全部运动员
            RelayKind::Squad => roster.athletes().iter().collect(),
            _ => roster
                .athletes()
                .iter()
                .filter(|a| a.gender == entry.gender && entry.age_category.admits(a.age))
                .collect(),
        };
        let label = match descriptor.kind {
            RelayKind::Squad => entry.event.clone(),
            _ => entry.label(),
        };

        Self {
            descriptor,
            label,
            age_category: entry.age_category,
            gender: entry.gender,
            group,
            pre_assignments,
        }
    }

    pub fn find(&self, id: &AthleteId) -> Option<&'a Athlete> {
        self.group.iter().copied().find(|a| &a.id == id)
    }

    /// 某项目有成绩的候选人, 按成绩升序 (同成绩保持花名册顺序)
    pub fn ranked_by_time(
        &self,
        event: StrokeDistance,
        exclude: &[&AthleteId],
    ) -> Vec<(&'a Athlete, f64)> {
        let mut ranked: Vec<(&'a Athlete, f64)> = self
            .group
            .iter()
            .copied()
            .filter(|a| !exclude.contains(&&a.id))
            .filter_map(|a| a.best_time(event).map(|t| (a, t)))
            .collect();
        ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
        ranked
    }
}

/// 已放置的棒次 (棒次索引 → (运动员, 成绩))
pub type PlacedLegs<'a> = Vec<Option<(&'a Athlete, f64)>>;

/// 校验并放置预分配
///
/// # 参数
/// - `ctx`: 组队上下文
/// - `positions`: 棒次数
/// - `position_of`: 预分配 → 棒次索引 (从 0 起)
/// - `leg_event`: 棒次索引 → 该棒项目
/// - `admits`: 棒次索引 + 运动员 → 是否可游该棒
///
/// # 返回
/// - Ok(placed): 全部预分配有效
/// - Err(reason): 任一无效 (调用方作废全部预分配)
pub fn place_pre_assignments<'a>(
    ctx: &RelayContext<'a>,
    positions: usize,
    position_of: impl Fn(&RelayPreAssignment) -> Option<usize>,
    leg_event: impl Fn(usize) -> StrokeDistance,
    admits: impl Fn(usize, &Athlete) -> bool,
) -> Result<PlacedLegs<'a>, String> {
    let mut placed: PlacedLegs<'a> = vec![None; positions];

    for &pre in &ctx.pre_assignments {
        let position = position_of(pre)
            .filter(|&p| p < positions)
            .ok_or_else(|| format!("棒次非法: position={}", pre.position))?;

        let athlete = ctx
            .find(&pre.swimmer_id)
            .ok_or_else(|| format!("运动员 {} 不在该组", pre.swimmer_id))?;

        if !admits(position, athlete) {
            return Err(format!(
                "运动员 {} 不符合第 {} 棒条件",
                pre.swimmer_id,
                position + 1
            ));
        }

        let event = leg_event(position);
        let time = athlete
            .best_time(event)
            .ok_or_else(|| format!("运动员 {} 无 {} 成绩", pre.swimmer_id, event))?;

        if placed[position].is_some() {
            return Err(format!("第 {} 棒重复指定", position + 1));
        }
        if placed.iter().flatten().any(|(a, _)| a.id == athlete.id) {
            return Err(format!("运动员 {} 重复指定", pre.swimmer_id));
        }

        placed[position] = Some((athlete, time));
    }

    Ok(placed)
}

/// 预分配放置, 失败时记录诊断并回退为空
pub fn place_or_fallback<'a>(
    ctx: &RelayContext<'a>,
    result: Result<PlacedLegs<'a>, String>,
    positions: usize,
    diagnostics: &mut Vec<Diagnostic>,
) -> PlacedLegs<'a> {
    match result {
        Ok(placed) => placed,
        Err(reason) => {
            warn!(relay = %ctx.label, %reason, "接力预分配无效, 回退全自动选人");
            diagnostics.push(Diagnostic::InvalidRelayPreAssignment {
                relay: ctx.label.clone(),
                reason,
            });
            vec![None; positions]
        }
    }
}

/// 记录人数不足
pub fn incomplete(ctx: &RelayContext<'_>, reason: String, diagnostics: &mut Vec<Diagnostic>) {
    info!(relay = %ctx.label, %reason, "接力人数不足, 不组队");
    diagnostics.push(Diagnostic::IncompleteRelayTeam {
        relay: ctx.label.clone(),
        reason,
    });
}

// ==========================================
// Trait: RelayFormation
// ==========================================
// 用途: 各类接力组队策略的统一接口
pub trait RelayFormation {
    /// 组建接力队
    ///
    /// # 返回
    /// - Some(team): 全部棒次均已填满
    /// - None: 人数不足 (已记录诊断)
    fn form(&self, ctx: &RelayContext<'_>, diagnostics: &mut Vec<Diagnostic>) -> Option<RelayTeam>;
}

// ==========================================
// RelayBuilder - 接力总调度
// ==========================================
pub struct RelayBuilder {
    freestyle: FreestyleRelayBuilder,
    medley: MedleyRelayBuilder,
    squad: SquadRelayBuilder,
}

impl RelayBuilder {
    pub fn new(limits: MedleySearchLimits) -> Self {
        Self {
            freestyle: FreestyleRelayBuilder,
            medley: MedleyRelayBuilder::new(limits),
            squad: SquadRelayBuilder,
        }
    }

    pub fn from_config(config: &OptimizationConfig) -> Self {
        Self::new(MedleySearchLimits {
            pool_width: config.medley_pool_width,
            combination_cap: config.medley_combination_cap,
        })
    }

    /// 组建目录中全部接力
    ///
    /// 输出顺序: 自由泳接力 → 混合泳接力 → 混合组接力,
    /// 各类内部按 (年龄组, 性别) 桶首次出现顺序、再按目录顺序
    #[instrument(skip_all, fields(relay_pre_assignments = pre_assignments.len()))]
    pub fn build_all(
        &self,
        catalog: &[CatalogEvent],
        roster: &Roster,
        pre_assignments: &[RelayPreAssignment],
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Vec<RelayTeam> {
        let relay_events = bucket_relay_events(catalog);
        let mut matched = vec![false; pre_assignments.len()];
        let mut freestyle_teams = Vec::new();
        let mut medley_teams = Vec::new();
        let mut squad_teams = Vec::new();

        for entry in relay_events {
            let descriptor = match RelayDescriptor::parse(entry) {
                Some(descriptor) => descriptor,
                None => {
                    warn!(event = %entry.event, "无法识别的接力项目, 跳过");
                    diagnostics.push(Diagnostic::UnrecognizedEvent {
                        event: entry.label(),
                    });
                    continue;
                }
            };

            let relay_pre: Vec<&RelayPreAssignment> = pre_assignments
                .iter()
                .enumerate()
                .filter(|(_, p)| {
                    relay_names_match(&p.relay_name, &entry.event)
                        && p.age_category == entry.age_category
                        && p.gender == entry.gender
                })
                .map(|(i, p)| {
                    matched[i] = true;
                    p
                })
                .collect();

            let ctx = RelayContext::new(entry, descriptor, roster, relay_pre);
            debug!(
                relay = %ctx.label,
                kind = %ctx.descriptor.kind,
                candidates = ctx.group.len(),
                "开始组建接力"
            );

            let formed = match ctx.descriptor.kind {
                RelayKind::Freestyle => self.freestyle.form(&ctx, diagnostics),
                RelayKind::Medley => self.medley.form(&ctx, diagnostics),
                RelayKind::Squad => self.squad.form(&ctx, diagnostics),
            };
            match formed {
                Some(team) if team.kind == RelayKind::Freestyle => freestyle_teams.push(team),
                Some(team) if team.kind == RelayKind::Medley => medley_teams.push(team),
                Some(team) => squad_teams.push(team),
                None => {}
            }
        }

        for (pre, _) in pre_assignments
            .iter()
            .zip(matched.iter())
            .filter(|(_, &m)| !m)
        {
            warn!(relay = %pre.relay_name, swimmer = %pre.swimmer_id, "接力预分配无对应项目");
            diagnostics.push(Diagnostic::UnresolvedPreAssignment {
                swimmer_id: pre.swimmer_id.clone(),
                event: format!("{} {} {}", pre.age_category, pre.gender, pre.relay_name),
                reason: "接力项目不存在".to_string(),
            });
        }

        let mut teams = freestyle_teams;
        teams.append(&mut medley_teams);
        teams.append(&mut squad_teams);
        info!(teams = teams.len(), "接力组建完成");
        teams
    }
}

/// 接力条目按 (年龄组, 性别) 桶首次出现顺序排列, 去除重复条目
fn bucket_relay_events(catalog: &[CatalogEvent]) -> Vec<&CatalogEvent> {
    let mut buckets: Vec<((AgeCategory, Gender), Vec<&CatalogEvent>)> = Vec::new();

    for entry in catalog.iter().filter(|e| e.is_relay_event()) {
        let key = (entry.age_category, entry.gender);
        let position = match buckets.iter().position(|(k, _)| *k == key) {
            Some(position) => position,
            None => {
                buckets.push((key, Vec::new()));
                buckets.len() - 1
            }
        };

        let events = &mut buckets[position].1;
        if events.iter().any(|e| relay_names_match(&e.event, &entry.event)) {
            debug!(event = %entry.label(), "重复接力项目, 忽略");
            continue;
        }
        events.push(entry);
    }

    buckets.into_iter().flat_map(|(_, events)| events).collect()
}
