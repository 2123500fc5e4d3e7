// ==========================================
// 混合组接力 (Squadrun) - 8 棒固定年龄组/性别
// ==========================================
// 棒次: 11U男 11U女 13U男 13U女 15U男 15U女 Open男 Open女
// 规则: 按棒次顺序, 每棒取符合条件且未上场的最快运动员
// ==========================================

use super::{
    incomplete, place_or_fallback, place_pre_assignments, RelayContext, RelayFormation, RelayLeg,
    RelayTeam,
};
use crate::domain::athlete::{Athlete, AthleteId};
use crate::domain::diagnostic::Diagnostic;
use crate::domain::types::{AgeCategory, Gender, RelayKind};
use tracing::debug;

/// 棒次条件 (年龄组, 性别)
pub const SQUAD_POSITIONS: [(AgeCategory, Gender); 8] = [
    (AgeCategory(11), Gender::Male),
    (AgeCategory(11), Gender::Female),
    (AgeCategory(13), Gender::Male),
    (AgeCategory(13), Gender::Female),
    (AgeCategory(15), Gender::Male),
    (AgeCategory(15), Gender::Female),
    (AgeCategory::OPEN, Gender::Male),
    (AgeCategory::OPEN, Gender::Female),
];

fn admits(position: usize, athlete: &Athlete) -> bool {
    SQUAD_POSITIONS
        .get(position)
        .map(|(band, gender)| athlete.gender == *gender && band.admits(athlete.age))
        .unwrap_or(false)
}

pub struct SquadRelayBuilder;

impl RelayFormation for SquadRelayBuilder {
    fn form(&self, ctx: &RelayContext<'_>, diagnostics: &mut Vec<Diagnostic>) -> Option<RelayTeam> {
        let positions = SQUAD_POSITIONS.len();
        let event = ctx.descriptor.leg_event();

        let placement = place_pre_assignments(
            ctx,
            positions,
            |pre| (pre.position as usize).checked_sub(1),
            |_| event,
            admits,
        );
        let mut placed = place_or_fallback(ctx, placement, positions, diagnostics);

        let mut used: Vec<AthleteId> = placed
            .iter()
            .flatten()
            .map(|(a, _)| a.id.clone())
            .collect();

        for position in 0..positions {
            if placed[position].is_some() {
                continue;
            }

            let excluded: Vec<&AthleteId> = used.iter().collect();
            let pick = ctx
                .ranked_by_time(event, &excluded)
                .into_iter()
                .find(|(athlete, _)| admits(position, athlete));

            match pick {
                Some((athlete, time)) => {
                    used.push(athlete.id.clone());
                    placed[position] = Some((athlete, time));
                }
                None => {
                    let (band, gender) = SQUAD_POSITIONS[position];
                    incomplete(
                        ctx,
                        format!("第 {} 棒 ({} {}) 无可用运动员", position + 1, band, gender),
                        diagnostics,
                    );
                    return None;
                }
            }
        }

        let legs: Vec<RelayLeg> = placed
            .into_iter()
            .flatten()
            .map(|(athlete, time)| RelayLeg {
                athlete_id: athlete.id.clone(),
                name: athlete.full_name(),
                event,
                time,
            })
            .collect();

        let team = RelayTeam::new(ctx.label.clone(), RelayKind::Squad, legs);
        debug!(relay = %team.label, total = team.total_time, "混合组接力组队完成");
        Some(team)
    }
}
