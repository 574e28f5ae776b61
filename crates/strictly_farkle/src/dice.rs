//! Dice rolls and the pluggable roll source.
//!
//! A [`Roll`] is always six faces in `1..=6`; the constructor rejects anything
//! else, so the scoring engine never sees an invalid face. Rollers are the
//! capability a game calls to produce rolls.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Number of dice thrown on every roll.
pub const DICE_PER_ROLL: usize = 6;

/// Lowest face on a die.
pub const MIN_FACE: u8 = 1;

/// Highest face on a die.
pub const MAX_FACE: u8 = 6;

/// Six die faces, each in `1..=6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[u8; 6]", into = "[u8; 6]")]
pub struct Roll([u8; DICE_PER_ROLL]);

impl Roll {
    /// Creates a roll, validating every face.
    ///
    /// # Errors
    ///
    /// Returns [`RollError::FaceOutOfRange`] for the first face outside `1..=6`.
    pub fn new(faces: [u8; DICE_PER_ROLL]) -> Result<Self, RollError> {
        match faces
            .iter()
            .find(|face| !(MIN_FACE..=MAX_FACE).contains(*face))
        {
            Some(face) => Err(RollError::FaceOutOfRange(*face)),
            None => Ok(Self(faces)),
        }
    }

    /// Creates a roll from a slice, which must hold exactly six faces.
    ///
    /// # Errors
    ///
    /// Returns [`RollError::WrongDiceCount`] or [`RollError::FaceOutOfRange`].
    pub fn from_slice(faces: &[u8]) -> Result<Self, RollError> {
        let faces: [u8; DICE_PER_ROLL] = faces
            .try_into()
            .map_err(|_| RollError::WrongDiceCount(faces.len()))?;
        Self::new(faces)
    }

    /// Throws six fair dice using the given random source.
    pub fn throw<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut faces = [MIN_FACE; DICE_PER_ROLL];
        for face in &mut faces {
            *face = rng.gen_range(MIN_FACE..=MAX_FACE);
        }
        Self(faces)
    }

    /// Returns the faces in the order they were thrown.
    pub fn faces(&self) -> &[u8; DICE_PER_ROLL] {
        &self.0
    }

    /// Counts how many dice show each face. Index 0 is face 1.
    pub fn histogram(&self) -> [u8; MAX_FACE as usize] {
        let mut counts = [0u8; MAX_FACE as usize];
        for face in self.0 {
            counts[usize::from(face - MIN_FACE)] += 1;
        }
        counts
    }
}

impl TryFrom<[u8; DICE_PER_ROLL]> for Roll {
    type Error = RollError;

    fn try_from(faces: [u8; DICE_PER_ROLL]) -> Result<Self, Self::Error> {
        Self::new(faces)
    }
}

impl From<Roll> for [u8; DICE_PER_ROLL] {
    fn from(roll: Roll) -> Self {
        roll.0
    }
}

impl std::fmt::Display for Roll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "[{a} {b} {c} {d} {e} {g}]")
    }
}

/// Error building a [`Roll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum RollError {
    /// A face was outside `1..=6`.
    #[display("Die face {} is outside 1..=6", _0)]
    FaceOutOfRange(u8),

    /// The wrong number of faces was supplied.
    #[display("Expected 6 dice but got {}", _0)]
    WrongDiceCount(usize),
}

impl std::error::Error for RollError {}

/// Source of dice rolls injected into every game.
///
/// Implementations must be synchronous and return promptly; the game calls
/// [`Roller::roll`] while the manager is locked.
pub trait Roller: Send + std::fmt::Debug {
    /// Throws six dice.
    fn roll(&mut self) -> Roll;
}

/// Fair dice backed by an entropy-seeded generator.
#[derive(Debug)]
pub struct RandomRoller {
    rng: StdRng,
}

impl RandomRoller {
    /// Creates a roller seeded from operating-system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Default for RandomRoller {
    fn default() -> Self {
        Self::new()
    }
}

impl Roller for RandomRoller {
    #[instrument(skip(self))]
    fn roll(&mut self) -> Roll {
        let roll = Roll::throw(&mut self.rng);
        debug!(%roll, "Rolled dice");
        roll
    }
}

/// Fair dice that replay the same sequence for the same seed.
#[derive(Debug)]
pub struct SeededRoller {
    seed: u64,
    rng: StdRng,
}

impl SeededRoller {
    /// Creates a reproducible roller.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Returns the seed this roller started from.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Roller for SeededRoller {
    #[instrument(skip(self), fields(seed = self.seed))]
    fn roll(&mut self) -> Roll {
        let roll = Roll::throw(&mut self.rng);
        debug!(%roll, "Rolled seeded dice");
        roll
    }
}

/// Loaded dice: every roll comes up the same.
#[derive(Debug, Clone, Copy)]
pub struct LoadedRoller {
    roll: Roll,
}

impl LoadedRoller {
    /// Creates a roller that always returns `roll`.
    pub fn new(roll: Roll) -> Self {
        Self { roll }
    }
}

impl Roller for LoadedRoller {
    fn roll(&mut self) -> Roll {
        self.roll
    }
}

/// Replays a fixed script of rolls, wrapping around at the end.
#[derive(Debug, Clone)]
pub struct ScriptedRoller {
    script: Vec<Roll>,
    next: usize,
}

impl ScriptedRoller {
    /// Creates a scripted roller, or `None` when the script is empty.
    pub fn new(script: Vec<Roll>) -> Option<Self> {
        if script.is_empty() {
            return None;
        }
        Some(Self { script, next: 0 })
    }
}

impl Roller for ScriptedRoller {
    fn roll(&mut self) -> Roll {
        let roll = self.script[self.next];
        self.next = (self.next + 1) % self.script.len();
        roll
    }
}
