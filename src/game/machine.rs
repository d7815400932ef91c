//! The game state machine.
//!
//! ```text
//! prepare_game
//!   └─ half-inning loop
//!        └─ pitch loop (until three outs)
//!             consider pitching change → steals → pitch → swing → ball in play
//!             → apply outcome → fatigue and injuries → invariant check
//!   └─ finalize → GameResult
//! ```
//!
//! ## Ending a game
//!
//! - after the top of the ninth or later, if the home team leads
//! - after the bottom of the ninth or later, if the score is not tied
//! - past `max_half_innings`, whatever the score

use std::collections::BTreeMap;

use tracing::{debug, trace, warn};

use super::result::{GameResult, InningData, TeamGameData};
use super::setup::prepare_game;
use crate::core::{Count, GameRng, GameState, SimConfig, SimError, SimResult};
use crate::effects::EffectRegistry;
use crate::gamelog::LogEvent;
use crate::league::{League, Player, ScheduledGame};
use crate::play::{
    BaseRunning, HitResolver, PitchGenerator, PitchOutcome, PitcherRotation, PlayResult,
    StaminaModel, SwingResolver,
};
use crate::ratings::RatingsEngine;
use crate::stats::heat;
use crate::triggers::{PlayEvent, TriggerEvent, TriggerSystem};

/// A finished game before it is committed to the league.
#[derive(Clone, Debug)]
pub struct GameOutcome {
    pub result: GameResult,

    /// Working copies of every player on both rosters, with this game's
    /// durable effects applied.
    pub players: Vec<Player>,
}

/// Plays games with one configuration and one set of effect tables.
///
/// ## Example
///
/// ```
/// use rust_ballgame::core::GameRng;
/// use rust_ballgame::game::MatchEngine;
/// use rust_ballgame::league::fixtures;
///
/// let engine = MatchEngine::default();
/// let mut league = fixtures::demo_league();
/// let result = engine
///     .simulate_game(&GameRng::new(42), &mut league, &fixtures::demo_game(1))
///     .unwrap();
///
/// assert!(result.half_innings >= 17);
/// ```
#[derive(Clone, Debug)]
pub struct MatchEngine {
    config: SimConfig,
    registry: EffectRegistry,
}

impl Default for MatchEngine {
    /// Default rules with the standard content tables.
    fn default() -> Self {
        Self::new(SimConfig::default(), crate::content::standard_registry())
    }
}

impl MatchEngine {
    #[must_use]
    pub fn new(config: SimConfig, registry: EffectRegistry) -> Self {
        Self { config, registry }
    }

    #[must_use]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    #[must_use]
    pub fn registry(&self) -> &EffectRegistry {
        &self.registry
    }

    /// Play one game and write its durable effects back to the league.
    ///
    /// The game draws from `rng.for_game(game.id)`, so the result does not
    /// depend on what else `rng` was used for.
    pub fn simulate_game(
        &self,
        rng: &GameRng,
        league: &mut League,
        game: &ScheduledGame,
    ) -> SimResult<GameResult> {
        let outcome = self.play_game(rng, league, game)?;
        self.commit(league, outcome)
    }

    /// Play one game without touching the league.
    pub fn play_game(
        &self,
        rng: &GameRng,
        league: &League,
        game: &ScheduledGame,
    ) -> SimResult<GameOutcome> {
        let state = prepare_game(league, &self.registry, game, rng.for_game(game.id))?;
        self.run(state)
    }

    /// Write a played game's players back and rotate both starters.
    pub(crate) fn commit(&self, league: &mut League, outcome: GameOutcome) -> SimResult<GameResult> {
        league.commit_players(outcome.players)?;
        league.team_mut(outcome.result.home)?.advance_rotation();
        league.team_mut(outcome.result.away)?.advance_rotation();
        Ok(outcome.result)
    }

    /// Play a prepared game to the end.
    pub fn run(&self, mut state: GameState) -> SimResult<GameOutcome> {
        let ratings = RatingsEngine::new(&self.registry);
        let triggers = TriggerSystem::new(&self.registry, &self.config);

        loop {
            self.start_half_inning(&mut state)?;

            while state.outs < 3 {
                self.pitch(&mut state, &ratings, &triggers)?;
            }

            if self.is_game_over(&state) {
                break;
            }
            if state.inning >= self.config.max_half_innings {
                warn!(
                    game = %state.game_id,
                    half_innings = state.inning,
                    "half-inning limit reached, ending game"
                );
                break;
            }
            state.inning += 1;
        }

        self.finalize(state)
    }

    fn start_half_inning(&self, state: &mut GameState) -> SimResult<()> {
        state.reset_half_inning();
        let entry = InningData::new(state);
        state.inning_data.push(entry);

        let pitcher = state.current_pitcher()?;
        state.log(LogEvent::HalfInningStart {
            inning: state.inning,
            batting_team: state.batting().team,
            pitcher,
        });
        debug!(
            game = %state.game_id,
            inning = state.inning,
            home = state.home.score,
            away = state.away.score,
            "half-inning start"
        );
        Ok(())
    }

    /// Called once a half-inning is complete.
    fn is_game_over(&self, state: &GameState) -> bool {
        let regulation = self.config.regulation_half_innings;
        if state.is_top() {
            state.inning + 1 >= regulation && state.home.score > state.away.score
        } else {
            state.inning >= regulation && state.home.score != state.away.score
        }
    }

    /// One pitch, from the pre-pitch checks to the invariant check.
    fn pitch(
        &self,
        state: &mut GameState,
        ratings: &RatingsEngine,
        triggers: &TriggerSystem,
    ) -> SimResult<()> {
        PitcherRotation::consider_swap_pitcher(state, ratings, &self.config)?;
        BaseRunning::determine_steal(state, ratings, triggers)?;
        if state.outs >= 3 {
            // Caught stealing for the third out; the batter leads off next time
            return state.check_invariants();
        }

        let pitcher = state.current_pitcher()?;
        let batter = state.current_batter()?;
        let count = state.count;

        let pitch = PitchGenerator::generate(state, ratings, &self.config)?;
        let batting = ratings.profile(state, batter, Some(pitch.kind))?.batting();
        let swing = SwingResolver::resolve(&mut state.rng, &pitch, &batting);

        let play = if !swing.swung {
            PlayResult::pitch(if pitch.is_strike {
                PitchOutcome::CalledStrike
            } else {
                PitchOutcome::Ball
            })
        } else if !swing.contact {
            PlayResult::pitch(PitchOutcome::SwingingStrike)
        } else {
            PlayResult::batted(HitResolver::resolve(state, ratings, &self.config, &pitch)?)
        };

        state.stats_mut(pitcher).pitches_thrown += 1;
        state.log(LogEvent::Pitch {
            pitcher,
            batter,
            kind: pitch.kind,
            quality: pitch.quality,
            outcome: play.outcome,
            count,
        });
        if let Some(ball) = &play.batted_ball {
            state.log(LogEvent::BattedBall {
                batter,
                area: ball.area,
                power: ball.power,
                hit_type: ball.hit_type,
                defender: ball.defender,
                outcome: ball.outcome,
            });
        }
        trace!(
            %pitcher,
            %batter,
            kind = ?pitch.kind,
            quality = pitch.quality,
            outcome = ?play.outcome,
            "pitch"
        );

        self.apply_outcome(state, &play)?;

        let report = StaminaModel::apply(state, ratings, &self.config, pitcher, batter, play.outcome)?;
        if report.pitcher_injured {
            PitcherRotation::consider_swap_pitcher(state, ratings, &self.config)?;
        }

        state.check_invariants()
    }

    /// Apply a resolved pitch to the count, bases, score and stats.
    ///
    /// Draws nothing from the generator, so a given state and play always
    /// produce the same result.
    pub fn apply_outcome(&self, state: &mut GameState, play: &PlayResult) -> SimResult<()> {
        let batter = state.current_batter()?;
        let pitcher = state.current_pitcher()?;
        let triggers = TriggerSystem::new(&self.registry, &self.config);

        match play.outcome {
            PitchOutcome::Ball => {
                state.count.balls += 1;
                if state.count.balls >= 4 {
                    let stats = state.stats_mut(batter);
                    stats.plate_appearances += 1;
                    stats.walks += 1;
                    state.stats_mut(pitcher).walks_allowed += 1;
                    state.streaks.record(batter, heat::WALK);
                    state.streaks.record(pitcher, heat::WALK_ALLOWED);
                    state.log(LogEvent::Walk { batter, pitcher });

                    BaseRunning::walk_batter(state, batter)?;
                    Self::end_at_bat(state);
                }
            }
            PitchOutcome::CalledStrike | PitchOutcome::SwingingStrike => {
                state.count.strikes += 1;
                if state.count.strikes >= 3 {
                    state.outs += 1;
                    let stats = state.stats_mut(batter);
                    stats.plate_appearances += 1;
                    stats.at_bats += 1;
                    stats.strikeouts += 1;
                    let stats = state.stats_mut(pitcher);
                    stats.strikeouts_pitched += 1;
                    stats.outs_recorded += 1;
                    state.streaks.record(batter, heat::STRUCK_OUT);
                    state.streaks.record(pitcher, heat::STRIKEOUT_PITCHED);
                    state.log(LogEvent::Strikeout { batter, pitcher });

                    triggers.fire(state, &PlayEvent::new(TriggerEvent::Strikeout, batter, pitcher))?;
                    Self::end_at_bat(state);
                }
            }
            PitchOutcome::Foul => {
                if state.count.strikes < 2 {
                    state.count.strikes += 1;
                }
            }
            PitchOutcome::Out => {
                let ball = play
                    .batted_ball
                    .as_ref()
                    .ok_or(SimError::InvariantViolation("out recorded without a batted ball"))?;
                let defender = ball.defender;

                state.outs += 1;
                let stats = state.stats_mut(batter);
                stats.plate_appearances += 1;
                stats.at_bats += 1;
                state.stats_mut(pitcher).outs_recorded += 1;
                state.stats_mut(defender).defensive_outs += 1;
                state.streaks.record(batter, heat::OUT);

                let runner = state.bases[0];
                match runner {
                    Some(runner) if ball.double_play && state.outs < 3 => {
                        state.bases[0] = None;
                        state.outs += 1;
                        state.stats_mut(batter).double_plays += 1;
                        let stats = state.stats_mut(pitcher);
                        stats.double_plays += 1;
                        stats.outs_recorded += 1;
                        state.stats_mut(defender).defensive_outs += 1;
                        state.streaks.record(batter, heat::DOUBLE_PLAY);
                        state.log(LogEvent::DoublePlay {
                            batter,
                            runner,
                            defender,
                        });
                    }
                    _ => state.log(LogEvent::Out { batter, defender }),
                }

                let event = PlayEvent::new(TriggerEvent::DefensiveOut, batter, pitcher)
                    .with_defender(defender);
                triggers.fire(state, &event)?;
                Self::end_at_bat(state);
            }
            PitchOutcome::Single | PitchOutcome::Double | PitchOutcome::Triple | PitchOutcome::HomeRun => {
                let bases = play.outcome.bases();

                let stats = state.stats_mut(batter);
                stats.plate_appearances += 1;
                stats.at_bats += 1;
                stats.hits += 1;
                match play.outcome {
                    PitchOutcome::Double => stats.doubles += 1,
                    PitchOutcome::Triple => stats.triples += 1,
                    PitchOutcome::HomeRun => stats.home_runs += 1,
                    _ => {}
                }
                let stats = state.stats_mut(pitcher);
                stats.hits_allowed += 1;
                state.streaks.record(batter, heat::for_hit(bases));
                state.streaks.record(pitcher, heat::HIT_ALLOWED);
                if play.outcome == PitchOutcome::HomeRun {
                    state.stats_mut(pitcher).home_runs_allowed += 1;
                    state.streaks.record(pitcher, heat::HOME_RUN_ALLOWED);
                }
                state.log(LogEvent::Hit {
                    batter,
                    bases: bases as u8,
                });

                BaseRunning::advance_all_runners(state, bases)?;
                if bases >= 4 {
                    BaseRunning::score_run(state, batter)?;
                } else {
                    state.bases[bases - 1] = Some(batter);
                }

                let mut event = PlayEvent::new(TriggerEvent::Hit, batter, pitcher);
                if let Some(ball) = &play.batted_ball {
                    event = event.with_defender(ball.defender);
                }
                triggers.fire(state, &event)?;
                Self::end_at_bat(state);
            }
        }
        Ok(())
    }

    fn end_at_bat(state: &mut GameState) {
        state.count = Count::default();
        let side = state.batting_side();
        state.team_mut(side).advance_batter();
    }

    /// Decide the game, credit the pitchers of record, award experience and
    /// streaks, and snapshot the result.
    fn finalize(&self, mut state: GameState) -> SimResult<GameOutcome> {
        let (home, away) = (state.home.team, state.away.team);
        let (home_score, away_score) = (state.home.score, state.away.score);

        let winning_side = state.leader();
        let (winner, loser) = match winning_side {
            Some(side) => (
                Some(state.team(side).team),
                Some(state.team(side.opposite()).team),
            ),
            None => (None, None),
        };

        let (winning_pitcher, losing_pitcher) = match winning_side {
            Some(_) => (state.record.winning, state.record.losing),
            None => (None, None),
        };
        let save_pitcher = winning_side.and_then(|side| {
            let team = state.team(side);
            team.save_candidate
                .filter(|&p| team.pitchers.last() == Some(&p) && Some(p) != winning_pitcher)
        });

        if let Some(p) = winning_pitcher {
            state.stats_mut(p).wins += 1;
        }
        if let Some(p) = losing_pitcher {
            state.stats_mut(p).losses += 1;
        }
        if let Some(p) = save_pitcher {
            state.stats_mut(p).saves += 1;
        }

        for (&id, stats) in &state.stats {
            let player = state
                .players
                .get_mut(&id)
                .ok_or(SimError::UnknownPlayer(id))?;
            player.xp = player.xp.saturating_add(stats.experience());
        }
        let streak_changes = state.streaks.apply(&mut state.players, &self.config);

        state.log(LogEvent::GameEnd {
            home_score,
            away_score,
            half_innings: state.inning,
        });
        debug!(
            game = %state.game_id,
            home_score,
            away_score,
            half_innings = state.inning,
            streak_changes = streak_changes.len(),
            "game over"
        );

        let team_data = [&state.home, &state.away]
            .into_iter()
            .map(|team| {
                (
                    team.team,
                    TeamGameData {
                        batting_order: team.batting_order.clone(),
                        pitchers_used: team.pitchers.clone(),
                    },
                )
            })
            .collect();

        let result = GameResult {
            game_id: state.game_id,
            home,
            away,
            weather: state.weather,
            ballpark: state.ballpark,
            winner,
            loser,
            score: BTreeMap::from([(home, home_score), (away, away_score)]),
            inning_data: state.inning_data,
            player_stats: state.stats,
            team_data,
            winning_pitcher,
            losing_pitcher,
            save_pitcher,
            half_innings: state.inning,
            game_log: state.log,
        };

        Ok(GameOutcome {
            result,
            players: state.players.into_values().collect(),
        })
    }
}
