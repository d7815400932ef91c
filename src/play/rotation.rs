//! In-game pitching changes and pitchers of record.

use tracing::{debug, warn};

use crate::core::{GameState, PlayerId, SimConfig, SimResult};
use crate::gamelog::{LogEvent, SwapReason};
use crate::league::Position;
use crate::ratings::RatingsEngine;

/// Innings from which a lead can be saved.
const SAVE_INNING: u32 = 7;

pub struct PitcherRotation;

impl PitcherRotation {
    /// Pull the pitcher if they are hurt or spent.
    ///
    /// Healthy pitchers are only changed between batters (0-0 count). The
    /// replacement is the bench pitcher with the highest modified attribute
    /// sum; ties go to the lower player id. Players in the batting order or
    /// the position chart are not on the bench. Returns whether a swap
    /// happened.
    pub fn consider_swap_pitcher(
        state: &mut GameState,
        ratings: &RatingsEngine,
        config: &SimConfig,
    ) -> SimResult<bool> {
        let current = state.current_pitcher()?;
        let (injured, stamina) = {
            let pitcher = state.player(current)?;
            (pitcher.is_injured(), pitcher.stamina)
        };

        let reason = if injured {
            SwapReason::Injury
        } else if state.count.is_fresh() && stamina < config.swap_stamina_threshold {
            SwapReason::Fatigue
        } else {
            return Ok(false);
        };

        let mut best: Option<(f64, PlayerId)> = None;
        let team = state.pitching();
        for &candidate in &team.roster {
            let player = state.player(candidate)?;
            let eligible = player.can_play(Position::Pitcher)
                && team.is_on_bench(candidate)
                && !team.has_pitched(candidate)
                && player.stamina >= config.reliever_min_stamina
                && !player.is_injured();
            if !eligible {
                continue;
            }

            let score = ratings.profile(state, candidate, None)?.attributes.sum();
            let better = match best {
                None => true,
                Some((top, id)) => score > top || (score == top && candidate < id),
            };
            if better {
                best = Some((score, candidate));
            }
        }

        match best {
            Some((_, incoming)) => {
                Self::swap_pitcher(state, incoming, reason)?;
                Ok(true)
            }
            None => {
                warn!(
                    team = %state.pitching().team,
                    pitcher = %current,
                    ?reason,
                    "no eligible reliever"
                );
                Ok(false)
            }
        }
    }

    /// Bring in a new pitcher for the fielding side.
    ///
    /// The incoming pitcher takes the outgoing one's batting-order slot and
    /// the pitcher entry of the position chart.
    pub fn swap_pitcher(state: &mut GameState, incoming: PlayerId, reason: SwapReason) -> SimResult<()> {
        let outgoing = state.current_pitcher()?;
        let side = state.pitching_side();
        let team = state.team_mut(side);

        team.pitchers.push(incoming);
        for slot in team.batting_order.iter_mut() {
            if *slot == outgoing {
                *slot = incoming;
            }
        }
        team.position_chart.insert(Position::Pitcher, incoming);
        let team_id = team.team;

        let stats = state.stats_mut(incoming);
        stats.games_played = stats.games_played.max(1);

        state.log(LogEvent::PitcherChange {
            team: team_id,
            outgoing,
            incoming,
            reason,
        });
        debug!(team = %team_id, %outgoing, %incoming, ?reason, "pitching change");

        Self::update_save_eligibility(state);
        Ok(())
    }

    /// Is the fielding side's lead saveable right now?
    ///
    /// The lead must be positive, the game in the seventh inning or later,
    /// and either at most three runs or within reach of the tying run
    /// (runners on base plus batter plus on-deck).
    #[must_use]
    pub fn is_save_situation(state: &GameState) -> bool {
        let lead = state.lead(state.pitching_side());
        let reach = state.runner_count() as i64 + 2;
        lead > 0 && state.game_inning() >= SAVE_INNING && (lead <= 3 || lead <= reach)
    }

    /// Record whether the pitcher now on the mound could earn a save.
    pub fn update_save_eligibility(state: &mut GameState) {
        let eligible = Self::is_save_situation(state);
        let side = state.pitching_side();
        let current = state.team(side).pitchers.last().copied();
        state.team_mut(side).save_candidate = if eligible { current } else { None };
    }

    /// Re-assign the pitchers in line for the win and the loss when the
    /// lead changes hands. A tie clears both.
    pub fn update_pitchers_of_record(state: &mut GameState) -> SimResult<()> {
        let leader = state.leader();
        if leader == state.record.leader {
            return Ok(());
        }

        match leader {
            Some(side) => {
                state.record.winning = Some(state.team(side).current_pitcher()?);
                state.record.losing = Some(state.team(side.opposite()).current_pitcher()?);
            }
            None => {
                state.record.winning = None;
                state.record.losing = None;
            }
        }
        state.record.leader = leader;
        Ok(())
    }
}
