//! Runner movement: forced advances, hit advances and steals.
//!
//! Bases are indexed 0 (first) to 2 (third). Every movement is an explicit
//! loop that processes the highest base first, so a runner is always moved
//! out of the way before the runner behind them arrives.

use tracing::trace;

use super::rotation::PitcherRotation;
use crate::core::{GameState, PlayerId, SimError, SimResult};
use crate::gamelog::LogEvent;
use crate::league::Position;
use crate::ratings::RatingsEngine;
use crate::stats::heat;
use crate::triggers::{PlayEvent, TriggerEvent, TriggerSystem};

/// Ceiling on the per-pitch steal attempt probability.
const MAX_ATTEMPT: f64 = 0.35;

pub struct BaseRunning;

impl BaseRunning {
    /// Score a run for the batting side.
    ///
    /// The runner is credited a run, the batter an RBI unless they are the
    /// runner, and the current pitcher an earned run.
    pub fn score_run(state: &mut GameState, runner: PlayerId) -> SimResult<()> {
        let batter = state.current_batter()?;
        let pitcher = state.current_pitcher()?;

        state.add_run();
        state.stats_mut(runner).runs += 1;
        state.streaks.record(runner, heat::RUN);
        if runner != batter {
            state.stats_mut(batter).runs_batted_in += 1;
        }
        state.stats_mut(pitcher).earned_runs += 1;
        state.streaks.record(pitcher, heat::EARNED_RUN);

        state.log(LogEvent::Run {
            runner,
            home_score: state.home.score,
            away_score: state.away.score,
        });
        PitcherRotation::update_pitchers_of_record(state)
    }

    /// Move the runner on `base` up one, forcing any runners ahead of them.
    ///
    /// An empty `base` is a no-op. A runner forced past third scores.
    pub fn advance_runner_forced(state: &mut GameState, base: usize) -> SimResult<()> {
        if base > 2 {
            return Err(SimError::InvariantViolation("no base beyond third"));
        }

        // First empty base at or ahead of `base`; 3 means the bases are full
        let open = (base..3).find(|&b| state.bases[b].is_none()).unwrap_or(3);
        let mut top = open;
        if open == 3 {
            if let Some(runner) = state.bases[2].take() {
                Self::score_run(state, runner)?;
            }
            top = 2;
        }
        for b in (base..top).rev() {
            state.bases[b + 1] = state.bases[b].take();
        }
        Ok(())
    }

    /// Advance every runner `count` bases, third first on each step.
    pub fn advance_all_runners(state: &mut GameState, count: usize) -> SimResult<()> {
        for _ in 0..count {
            for base in (0..3).rev() {
                let Some(runner) = state.bases[base].take() else {
                    continue;
                };
                if base == 2 {
                    Self::score_run(state, runner)?;
                } else {
                    state.bases[base + 1] = Some(runner);
                }
            }
        }
        Ok(())
    }

    /// Put the batter on base after a walk, forcing runners as needed.
    pub fn walk_batter(state: &mut GameState, batter: PlayerId) -> SimResult<()> {
        Self::advance_runner_forced(state, 0)?;
        state.bases[0] = Some(batter);
        Ok(())
    }

    /// Probability a runner tries to steal on this pitch.
    #[must_use]
    pub fn attempt_chance(stealing: f64, catcher_fielding: f64, to_third: bool) -> f64 {
        let p = (0.08 + (stealing - catcher_fielding) / 40.0).clamp(0.0, MAX_ATTEMPT);
        if to_third {
            p / 2.0
        } else {
            p
        }
    }

    /// Probability an attempted steal succeeds.
    #[must_use]
    pub fn success_chance(stealing: f64, catcher_fielding: f64, to_third: bool) -> f64 {
        let baseline = if to_third { 0.62 } else { 0.72 };
        (baseline + (stealing - catcher_fielding) / 50.0).clamp(0.2, 0.95)
    }

    /// Steal opportunities before a pitch: second to third, then first to
    /// second. A runner never steals into an occupied base, and nothing
    /// happens once the half-inning is over.
    pub fn determine_steal(
        state: &mut GameState,
        ratings: &RatingsEngine,
        triggers: &TriggerSystem,
    ) -> SimResult<()> {
        for from in [1, 0] {
            if state.outs >= 3 {
                break;
            }
            let Some(runner) = state.bases[from] else {
                continue;
            };
            if state.bases[from + 1].is_some() {
                continue;
            }

            let catcher = state.pitching().fielder(Position::Catcher)?;
            let stealing = ratings.profile(state, runner, None)?.batting().stealing;
            let fielding = ratings.profile(state, catcher, None)?.batting().fielding;
            let to_third = from == 1;

            if !state.rng.chance(Self::attempt_chance(stealing, fielding, to_third)) {
                continue;
            }
            let success = state.rng.chance(Self::success_chance(stealing, fielding, to_third));

            let batter = state.current_batter()?;
            let pitcher = state.current_pitcher()?;
            state.bases[from] = None;
            state.log(LogEvent::Steal {
                runner,
                base: from as u8 + 2,
                success,
            });
            trace!(runner = %runner, base = from + 2, success, "steal attempt");

            if success {
                state.bases[from + 1] = Some(runner);
                state.stats_mut(runner).stolen_bases += 1;
                state.streaks.record(runner, heat::STOLEN_BASE);
                let event = PlayEvent::new(TriggerEvent::Steal, batter, pitcher).with_runner(runner);
                triggers.fire(state, &event)?;
            } else {
                state.outs += 1;
                state.stats_mut(runner).caught_stealing += 1;
                state.streaks.record(runner, heat::CAUGHT_STEALING);
                state.stats_mut(pitcher).outs_recorded += 1;
                state.stats_mut(catcher).defensive_outs += 1;
                let event = PlayEvent::new(TriggerEvent::DefensiveOut, batter, pitcher)
                    .with_runner(runner)
                    .with_defender(catcher);
                triggers.fire(state, &event)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SimConfig;
    use crate::game::InningData;
    use crate::league::fixtures;

    fn state() -> GameState {
        let registry = crate::content::standard_registry();
        fixtures::demo_state(&registry, 5)
    }

    /// Three players from the batting side who are not due up.
    fn runners(state: &GameState) -> [PlayerId; 3] {
        let order = &state.batting().batting_order;
        [order[1], order[2], order[3]]
    }

    #[test]
    fn test_forced_advance_cascades() {
        let mut state = state();
        let [a, b, _] = runners(&state);
        state.bases = [Some(a), Some(b), None];

        BaseRunning::advance_runner_forced(&mut state, 0).unwrap();
        assert_eq!(state.bases, [None, Some(a), Some(b)]);
        assert_eq!(state.away.score, 0);
    }

    #[test]
    fn test_forced_advance_stops_at_gap() {
        let mut state = state();
        let [a, _, c] = runners(&state);
        state.bases = [Some(a), None, Some(c)];

        BaseRunning::advance_runner_forced(&mut state, 0).unwrap();
        // The runner on third is not forced
        assert_eq!(state.bases, [None, Some(a), Some(c)]);
        assert_eq!(state.away.score, 0);
    }

    #[test]
    fn test_forced_advance_with_bases_loaded_scores() {
        let mut state = state();
        let entry = InningData::new(&state);
        state.inning_data.push(entry);
        let [a, b, c] = runners(&state);
        state.bases = [Some(a), Some(b), Some(c)];
        let batter = state.current_batter().unwrap();
        let pitcher = state.current_pitcher().unwrap();

        BaseRunning::walk_batter(&mut state, batter).unwrap();
        assert_eq!(state.bases, [Some(batter), Some(a), Some(b)]);
        assert_eq!(state.away.score, 1);
        assert_eq!(state.inning_data[0].runs, 1);
        assert_eq!(state.stats[&c].runs, 1);
        assert_eq!(state.stats[&batter].runs_batted_in, 1);
        assert_eq!(state.stats[&pitcher].earned_runs, 1);
    }

    #[test]
    fn test_advance_all_runners() {
        let mut state = state();
        let entry = InningData::new(&state);
        state.inning_data.push(entry);
        let [a, b, _] = runners(&state);
        state.bases = [Some(a), None, Some(b)];

        BaseRunning::advance_all_runners(&mut state, 2).unwrap();
        assert_eq!(state.bases, [None, None, None]);
        assert_eq!(state.away.score, 2);
        assert!(state.log.iter().any(|e| matches!(e, LogEvent::Run { runner, .. } if *runner == a)));
    }

    #[test]
    fn test_first_run_sets_pitchers_of_record() {
        let mut state = state();
        let entry = InningData::new(&state);
        state.inning_data.push(entry);
        let [a, _, _] = runners(&state);
        state.bases = [None, None, Some(a)];

        BaseRunning::advance_all_runners(&mut state, 1).unwrap();
        assert_eq!(state.record.winning, Some(state.away.current_pitcher().unwrap()));
        assert_eq!(state.record.losing, Some(state.home.current_pitcher().unwrap()));
    }

    #[test]
    fn test_steal_probabilities() {
        assert_eq!(BaseRunning::attempt_chance(0.0, 20.0, false), 0.0);
        assert_eq!(BaseRunning::attempt_chance(30.0, 0.0, false), MAX_ATTEMPT);
        assert!(
            BaseRunning::attempt_chance(12.0, 10.0, true)
                < BaseRunning::attempt_chance(12.0, 10.0, false)
        );
        assert!(
            BaseRunning::success_chance(10.0, 10.0, true)
                < BaseRunning::success_chance(10.0, 10.0, false)
        );
        assert_eq!(BaseRunning::success_chance(100.0, 0.0, false), 0.95);
    }

    #[test]
    fn test_no_steal_into_occupied_base() {
        let registry = crate::content::standard_registry();
        let config = SimConfig::default();
        let ratings = RatingsEngine::new(&registry);
        let triggers = TriggerSystem::new(&registry, &config);

        for seed in 0..40 {
            let mut state = fixtures::demo_state(&registry, seed);
            let [a, b, c] = runners(&state);
            state.bases = [Some(a), Some(b), Some(c)];
            BaseRunning::determine_steal(&mut state, &ratings, &triggers).unwrap();
            assert_eq!(state.bases, [Some(a), Some(b), Some(c)]);
            assert_eq!(state.outs, 0);
        }
    }

    #[test]
    fn test_steals_keep_bases_consistent() {
        let registry = crate::content::standard_registry();
        let config = SimConfig::default();
        let ratings = RatingsEngine::new(&registry);
        let triggers = TriggerSystem::new(&registry, &config);

        for seed in 0..60 {
            let mut state = fixtures::demo_state(&registry, seed);
            let [a, _, _] = runners(&state);
            state.bases = [Some(a), None, None];
            BaseRunning::determine_steal(&mut state, &ratings, &triggers).unwrap();

            let stats = state.stats.get(&a).cloned().unwrap_or_default();
            match (state.bases, state.outs) {
                ([Some(_), None, None], 0) => assert_eq!(stats.stolen_bases, 0),
                ([None, Some(r), None], 0) => {
                    assert_eq!(r, a);
                    assert_eq!(stats.stolen_bases, 1);
                }
                ([None, None, None], 1) => assert_eq!(stats.caught_stealing, 1),
                other => panic!("unexpected steal result {other:?}"),
            }
            state.check_invariants().unwrap();
        }
    }
}
