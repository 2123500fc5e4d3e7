// ==========================================
// 自由泳接力 - 最快 N 人
// ==========================================
// 棒次 = 预分配棒次 + 其余按成绩升序依次补位
// ==========================================

use super::{
    incomplete, place_or_fallback, place_pre_assignments, RelayContext, RelayFormation, RelayLeg,
    RelayTeam,
};
use crate::domain::athlete::AthleteId;
use crate::domain::diagnostic::Diagnostic;
use crate::domain::types::RelayKind;
use tracing::debug;

pub struct FreestyleRelayBuilder;

impl RelayFormation for FreestyleRelayBuilder {
    fn form(&self, ctx: &RelayContext<'_>, diagnostics: &mut Vec<Diagnostic>) -> Option<RelayTeam> {
        let legs = ctx.descriptor.legs;
        let event = ctx.descriptor.leg_event();

        let placement = place_pre_assignments(
            ctx,
            legs,
            |pre| (pre.position as usize).checked_sub(1),
            |_| event,
            |_, _| true,
        );
        let mut placed = place_or_fallback(ctx, placement, legs, diagnostics);

        let taken: Vec<&AthleteId> = placed.iter().flatten().map(|(a, _)| &a.id).collect();
        let mut candidates = ctx.ranked_by_time(event, &taken).into_iter();

        for leg in placed.iter_mut().filter(|leg| leg.is_none()) {
            *leg = candidates.next();
        }

        let filled = placed.iter().filter(|leg| leg.is_some()).count();
        if filled < legs {
            incomplete(
                ctx,
                format!("需要 {} 人, 仅 {} 人有 {} 成绩", legs, filled, event),
                diagnostics,
            );
            return None;
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

        let team = RelayTeam::new(ctx.label.clone(), RelayKind::Freestyle, legs);
        debug!(relay = %team.label, total = team.total_time, "自由泳接力组队完成");
        Some(team)
    }
}
