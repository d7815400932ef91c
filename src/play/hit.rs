//! Batted-ball resolution.
//!
//! A ball in play is drawn in four steps: where it goes ([`HitArea`]), how
//! hard ([`HitPower`]), its trajectory ([`HitType`]), then the result
//! ([`HitOutcome`]) from a table keyed by trajectory and power. Every
//! table is weighted by ratings and multiplied by the pitch's and the
//! batter's active hit-table modifiers before it is drawn from.

use serde::{Deserialize, Serialize};

use super::pitch::ActualPitch;
use crate::core::{GameState, PlayerId, SimConfig, SimError, SimResult};
use crate::league::Position;
use crate::ratings::RatingsEngine;

/// Field direction, left to right from home plate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HitArea {
    LeftLine,
    LeftCenter,
    Center,
    RightCenter,
    RightLine,
}

impl HitArea {
    pub const ALL: [HitArea; 5] = [
        HitArea::LeftLine,
        HitArea::LeftCenter,
        HitArea::Center,
        HitArea::RightCenter,
        HitArea::RightLine,
    ];

    const WEIGHTS: [f64; 5] = [0.15, 0.2, 0.3, 0.2, 0.15];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HitPower {
    Weak,
    Normal,
    Strong,
}

impl HitPower {
    pub const ALL: [HitPower; 3] = [HitPower::Weak, HitPower::Normal, HitPower::Strong];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HitType {
    Grounder,
    FlyBall,
    LineDrive,
    PopUp,
}

impl HitType {
    pub const ALL: [HitType; 4] = [
        HitType::Grounder,
        HitType::FlyBall,
        HitType::LineDrive,
        HitType::PopUp,
    ];
}

/// Result of a batted ball.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HitOutcome {
    Single,
    Double,
    Triple,
    HomeRun,
    Out,
    Foul,
}

impl HitOutcome {
    /// Outcomes of the weighting table, in index order.
    pub const TABLE: [HitOutcome; 5] = [
        HitOutcome::Single,
        HitOutcome::Double,
        HitOutcome::Triple,
        HitOutcome::HomeRun,
        HitOutcome::Out,
    ];

    /// Bases the batter takes on a hit (0 for outs and fouls).
    #[must_use]
    pub const fn bases(self) -> usize {
        match self {
            HitOutcome::Single => 1,
            HitOutcome::Double => 2,
            HitOutcome::Triple => 3,
            HitOutcome::HomeRun => 4,
            HitOutcome::Out | HitOutcome::Foul => 0,
        }
    }
}

/// Base outcome weights by trajectory and power: single, double, triple,
/// home run, out.
fn base_outcome_weights(hit_type: HitType, power: HitPower) -> [f64; 5] {
    use HitPower::*;
    use HitType::*;
    match (hit_type, power) {
        (Grounder, Weak) => [0.15, 0.01, 0.0, 0.0, 0.84],
        (Grounder, Normal) => [0.25, 0.03, 0.005, 0.0, 0.715],
        (Grounder, Strong) => [0.35, 0.06, 0.01, 0.0, 0.58],
        (FlyBall, Weak) => [0.05, 0.02, 0.0, 0.0, 0.93],
        (FlyBall, Normal) => [0.08, 0.08, 0.01, 0.06, 0.77],
        (FlyBall, Strong) => [0.06, 0.15, 0.03, 0.3, 0.46],
        (LineDrive, Weak) => [0.45, 0.05, 0.0, 0.0, 0.5],
        (LineDrive, Normal) => [0.5, 0.15, 0.02, 0.02, 0.31],
        (LineDrive, Strong) => [0.4, 0.25, 0.05, 0.08, 0.22],
        (PopUp, Weak) => [0.02, 0.0, 0.0, 0.0, 0.98],
        (PopUp, Normal) => [0.03, 0.0, 0.0, 0.0, 0.97],
        (PopUp, Strong) => [0.05, 0.01, 0.0, 0.0, 0.94],
    }
}

/// Infielder covering a ground ball or short liner in an area.
fn infield_position(area: HitArea, middle_draw: f64) -> Position {
    match area {
        HitArea::LeftLine => Position::ThirdBase,
        HitArea::LeftCenter => Position::Shortstop,
        HitArea::Center if middle_draw < 0.5 => Position::Shortstop,
        HitArea::Center => Position::SecondBase,
        HitArea::RightCenter => Position::SecondBase,
        HitArea::RightLine => Position::FirstBase,
    }
}

fn outfield_position(area: HitArea) -> Position {
    match area {
        HitArea::LeftLine | HitArea::LeftCenter => Position::LeftField,
        HitArea::Center => Position::CenterField,
        HitArea::RightCenter | HitArea::RightLine => Position::RightField,
    }
}

fn multiply<const N: usize>(weights: [f64; N], by: [f64; N]) -> [f64; N] {
    let mut out = weights;
    for (w, m) in out.iter_mut().zip(by) {
        *w *= m;
    }
    out
}

/// A resolved ball in play.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BattedBall {
    pub area: HitArea,
    pub power: HitPower,
    pub hit_type: HitType,
    pub defender: PlayerId,
    pub defender_position: Position,
    pub defender_fielding: f64,
    pub outcome: HitOutcome,

    /// The out turned into a double play.
    pub double_play: bool,
}

pub struct HitResolver;

impl HitResolver {
    /// Resolve a ball the current batter put in play.
    pub fn resolve(
        state: &mut GameState,
        ratings: &RatingsEngine,
        config: &SimConfig,
        pitch: &ActualPitch,
    ) -> SimResult<BattedBall> {
        let batter = ratings.profile(state, state.current_batter()?, Some(pitch.kind))?;
        let batting = batter.batting();
        let table = pitch.hit_modifier.combine(&batter.hit_table());

        let area_weights = multiply(HitArea::WEIGHTS, table.area);
        let area = HitArea::ALL[draw(state, &area_weights)?];

        let zone = if pitch.is_strike { 1.2 } else { 0.8 };
        let power_weights = multiply(
            [
                (20.0 - batting.power).max(0.0) / 10.0,
                1.5,
                0.8 * batting.power.max(0.0) / 10.0 * zone,
            ],
            table.power,
        );
        let power = HitPower::ALL[draw(state, &power_weights)?];

        let angle = batting.hit_angle.clamp(0.0, 20.0);
        let type_weights = multiply(
            [
                1.2 * (20.0 - angle) / 10.0,
                1.0 * angle / 10.0,
                0.9,
                0.4 * (20.0 - angle) / 10.0,
            ],
            table.hit_type,
        );
        let hit_type = HitType::ALL[draw(state, &type_weights)?];

        let position = Self::defender_position(state, hit_type, area);
        let defender = state
            .pitching()
            .position_chart
            .get(&position)
            .copied()
            .ok_or(SimError::UnresolvedDefender)?;
        let defender_profile = ratings.profile(state, defender, Some(pitch.kind))?;
        let defender_fielding = defender_profile.batting().fielding;

        let [single, double, triple, home_run, out] = base_outcome_weights(hit_type, power);
        let extra = batting.extra_base.max(0.0) / 10.0;
        let outcome_weights = multiply(
            [
                single,
                double * extra,
                triple * extra,
                home_run * batting.home_run.max(0.0) / 10.0,
                out * defender_fielding.max(0.0) / 10.0,
            ],
            table.outcome,
        );

        let outcome = if state.rng.chance(config.foul_ball_chance) {
            HitOutcome::Foul
        } else {
            HitOutcome::TABLE[draw(state, &outcome_weights)?]
        };

        let double_play = outcome == HitOutcome::Out
            && hit_type == HitType::Grounder
            && matches!(position, Position::Shortstop | Position::SecondBase)
            && state.bases[0].is_some()
            && state.outs < 2
            && state
                .rng
                .chance((0.35 + (defender_fielding - 10.0) / 40.0).clamp(0.05, 0.9));

        Ok(BattedBall {
            area,
            power,
            hit_type,
            defender,
            defender_position: position,
            defender_fielding,
            outcome,
            double_play,
        })
    }

    /// Position fielding a batted ball. Pop-ups always go to the catcher.
    fn defender_position(state: &mut GameState, hit_type: HitType, area: HitArea) -> Position {
        let infield_share = match hit_type {
            HitType::PopUp => return Position::Catcher,
            HitType::Grounder => 0.9,
            HitType::LineDrive => 0.6,
            HitType::FlyBall => 0.15,
        };
        if state.rng.chance(infield_share) {
            let middle_draw = state.rng.unit();
            infield_position(area, middle_draw)
        } else {
            outfield_position(area)
        }
    }
}

fn draw(state: &mut GameState, weights: &[f64]) -> SimResult<usize> {
    state
        .rng
        .choose_weighted(weights)
        .ok_or(SimError::InvariantViolation("batted-ball weights sum to zero"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::league::fixtures;
    use crate::play::PitchGenerator;

    #[test]
    fn test_outcome_tables_are_normalized() {
        for hit_type in HitType::ALL {
            for power in HitPower::ALL {
                let total: f64 = base_outcome_weights(hit_type, power).iter().sum();
                assert!((total - 1.0).abs() < 1e-9, "{hit_type:?}/{power:?}");
            }
        }
    }

    #[test]
    fn test_defender_mapping() {
        assert_eq!(infield_position(HitArea::LeftLine, 0.0), Position::ThirdBase);
        assert_eq!(infield_position(HitArea::RightLine, 0.0), Position::FirstBase);
        assert_eq!(infield_position(HitArea::Center, 0.1), Position::Shortstop);
        assert_eq!(infield_position(HitArea::Center, 0.5), Position::SecondBase);
        assert_eq!(infield_position(HitArea::Center, 0.99), Position::SecondBase);
        assert_eq!(outfield_position(HitArea::LeftCenter), Position::LeftField);
        assert_eq!(outfield_position(HitArea::RightLine), Position::RightField);
    }

    #[test]
    fn test_popups_go_to_catcher() {
        let registry = crate::content::standard_registry();
        let mut state = fixtures::demo_state(&registry, 9);
        for area in HitArea::ALL {
            assert_eq!(
                HitResolver::defender_position(&mut state, HitType::PopUp, area),
                Position::Catcher
            );
        }
    }

    #[test]
    fn test_foul_override() {
        let registry = crate::content::standard_registry();
        let ratings = RatingsEngine::new(&registry);
        let mut state = fixtures::demo_state(&registry, 21);
        let config = SimConfig::default().with_foul_ball_chance(1.0);

        let pitch = PitchGenerator::generate(&mut state, &ratings, &config).unwrap();
        let ball = HitResolver::resolve(&mut state, &ratings, &config, &pitch).unwrap();
        assert_eq!(ball.outcome, HitOutcome::Foul);
        assert!(!ball.double_play);
    }

    #[test]
    fn test_never_foul_resolves_defender() {
        let registry = crate::content::standard_registry();
        let ratings = RatingsEngine::new(&registry);
        let mut state = fixtures::demo_state(&registry, 4);
        let config = SimConfig::default().with_foul_ball_chance(0.0);

        for _ in 0..100 {
            let pitch = PitchGenerator::generate(&mut state, &ratings, &config).unwrap();
            let ball = HitResolver::resolve(&mut state, &ratings, &config, &pitch).unwrap();
            assert_ne!(ball.outcome, HitOutcome::Foul);
            assert_eq!(
                state.pitching().fielder(ball.defender_position).unwrap(),
                ball.defender
            );
        }
    }

    #[test]
    fn test_missing_defender() {
        let registry = crate::content::standard_registry();
        let ratings = RatingsEngine::new(&registry);
        let mut state = fixtures::demo_state(&registry, 4);
        let config = SimConfig::default().with_foul_ball_chance(0.0);
        let side = state.pitching_side();
        for position in crate::league::Position::ALL {
            if position != Position::Pitcher {
                state.team_mut(side).position_chart.remove(&position);
            }
        }
        let pitch = PitchGenerator::generate(&mut state, &ratings, &config).unwrap();

        // Only the mound is still staffed, and the pitcher never fields a ball
        let mut errors = 0;
        for _ in 0..20 {
            if let Err(err) = HitResolver::resolve(&mut state, &ratings, &config, &pitch) {
                assert_eq!(err, SimError::UnresolvedDefender);
                errors += 1;
            }
        }
        assert!(errors > 0);
    }
}
