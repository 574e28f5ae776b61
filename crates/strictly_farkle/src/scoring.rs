//! Farkle scoring rules.
//!
//! Rules are tried in priority order and the first whole-roll pattern wins.
//! Only when no whole-roll pattern matches are sets and single dice summed.

use crate::dice::Roll;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Six dice showing the same face.
pub const SIX_OF_A_KIND_POINTS: u32 = 10_000;

/// One of each face, 1 through 6.
pub const STRAIGHT_POINTS: u32 = 1_500;

/// Three different faces, two of each.
pub const THREE_PAIRS_POINTS: u32 = 750;

/// Three 1s. Other triples score face × 100.
pub const TRIPLE_ONES_POINTS: u32 = 1_000;

/// A 1 not used in a set.
pub const SINGLE_ONE_POINTS: u32 = 100;

/// A 5 not used in a set.
pub const SINGLE_FIVE_POINTS: u32 = 50;

/// The rule that produced a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum ScoringCombo {
    /// All six dice match.
    #[display("six of a kind")]
    SixOfAKind,
    /// 1-2-3-4-5-6.
    #[display("straight")]
    Straight,
    /// Three distinct pairs.
    #[display("three pairs")]
    ThreePairs,
    /// Triples (or better) and/or single 1s and 5s.
    #[display("sets and singles")]
    SetsAndSingles,
    /// Nothing scored.
    #[display("farkle")]
    Farkle,
}

/// Result of scoring one roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScoreOutcome {
    /// Points the roll is worth.
    pub points: u32,
    /// True when the roll scored nothing.
    pub busted: bool,
    /// Rule that produced the points.
    pub combo: ScoringCombo,
}

impl ScoreOutcome {
    fn new(points: u32, combo: ScoringCombo) -> Self {
        Self {
            points,
            busted: points == 0,
            combo,
        }
    }
}

/// Scores a roll.
///
/// Total over every possible roll and free of side effects.
#[instrument(skip(roll), fields(roll = %roll))]
pub fn score(roll: &Roll) -> ScoreOutcome {
    let counts = roll.histogram();

    if counts.iter().any(|&c| c == 6) {
        return ScoreOutcome::new(SIX_OF_A_KIND_POINTS, ScoringCombo::SixOfAKind);
    }
    if counts.iter().all(|&c| c == 1) {
        return ScoreOutcome::new(STRAIGHT_POINTS, ScoringCombo::Straight);
    }
    if counts.iter().filter(|&&c| c == 2).count() == 3 {
        return ScoreOutcome::new(THREE_PAIRS_POINTS, ScoringCombo::ThreePairs);
    }

    let points: u32 = counts
        .iter()
        .zip(1u32..)
        .map(|(&count, face)| face_points(face, u32::from(count)))
        .sum();

    if points == 0 {
        ScoreOutcome::new(0, ScoringCombo::Farkle)
    } else {
        ScoreOutcome::new(points, ScoringCombo::SetsAndSingles)
    }
}

/// Points contributed by `count` dice showing `face`.
fn face_points(face: u32, count: u32) -> u32 {
    if count >= 3 {
        return set_base(face) << (count - 3);
    }
    match face {
        1 => count * SINGLE_ONE_POINTS,
        5 => count * SINGLE_FIVE_POINTS,
        _ => 0,
    }
}

fn set_base(face: u32) -> u32 {
    if face == 1 {
        TRIPLE_ONES_POINTS
    } else {
        face * 100
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roll(faces: [u8; 6]) -> Roll {
        Roll::new(faces).unwrap()
    }

    #[test]
    fn test_single_one_scores_one_hundred() {
        let outcome = score(&roll([1, 2, 2, 3, 3, 4]));
        assert_eq!(outcome.points, 100);
        assert!(!outcome.busted);
        assert_eq!(outcome.combo, ScoringCombo::SetsAndSingles);
    }

    #[test]
    fn test_single_fives() {
        assert_eq!(score(&roll([5, 5, 2, 3, 4, 6])).points, 100);
    }

    #[test]
    fn test_farkle() {
        let outcome = score(&roll([2, 2, 3, 3, 4, 6]));
        assert_eq!(outcome.points, 0);
        assert!(outcome.busted);
        assert_eq!(outcome.combo, ScoringCombo::Farkle);
    }

    #[test]
    fn test_triples() {
        assert_eq!(score(&roll([1, 1, 1, 2, 3, 4])).points, 1_000);
        assert_eq!(score(&roll([2, 2, 2, 3, 4, 6])).points, 200);
        assert_eq!(score(&roll([6, 6, 6, 2, 3, 4])).points, 600);
    }

    #[test]
    fn test_extra_dice_double_the_set() {
        assert_eq!(score(&roll([4, 4, 4, 4, 2, 3])).points, 800);
        assert_eq!(score(&roll([4, 4, 4, 4, 4, 3])).points, 1_600);
        assert_eq!(score(&roll([1, 1, 1, 1, 1, 3])).points, 4_000);
    }

    #[test]
    fn test_set_plus_singles() {
        // 300 for the threes, 100 + 50 for the singles
        assert_eq!(score(&roll([3, 3, 3, 1, 5, 2])).points, 450);
    }

    #[test]
    fn test_two_triples() {
        assert_eq!(score(&roll([2, 2, 2, 5, 5, 5])).points, 700);
    }

    #[test]
    fn test_four_of_a_kind_and_a_pair_is_not_three_pairs() {
        assert_eq!(score(&roll([2, 2, 2, 2, 3, 3])).points, 400);
    }

    #[test]
    fn test_whole_roll_patterns() {
        assert_eq!(score(&roll([6, 5, 4, 3, 2, 1])).combo, ScoringCombo::Straight);
        assert_eq!(score(&roll([6, 5, 4, 3, 2, 1])).points, STRAIGHT_POINTS);
        assert_eq!(score(&roll([2, 2, 4, 4, 6, 6])).points, THREE_PAIRS_POINTS);
        // Pairs of 1s and 5s still count as three pairs, not singles
        assert_eq!(score(&roll([1, 1, 5, 5, 6, 6])).points, THREE_PAIRS_POINTS);
    }

    #[test]
    fn test_six_of_a_kind_outranks_everything() {
        for face in 1..=6 {
            let outcome = score(&roll([face; 6]));
            assert_eq!(outcome.points, SIX_OF_A_KIND_POINTS);
            assert_eq!(outcome.combo, ScoringCombo::SixOfAKind);
        }
    }

    #[test]
    fn test_order_does_not_matter() {
        assert_eq!(score(&roll([4, 3, 3, 2, 2, 1])), score(&roll([1, 2, 2, 3, 3, 4])));
    }

    #[test]
    fn test_total_over_every_roll() {
        for n in 0..6u32.pow(6) {
            let mut faces = [1u8; 6];
            let mut rest = n;
            for face in &mut faces {
                *face = (rest % 6) as u8 + 1;
                rest /= 6;
            }
            let outcome = score(&roll(faces));
            assert_eq!(outcome.busted, outcome.points == 0);
        }
    }
}
