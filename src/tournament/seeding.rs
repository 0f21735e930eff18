//! First-round seeding, random or manual.

use rand::Rng;
use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;

use super::errors::{BracketError, BracketResult};
use super::models::{Entrant, MatchId, Round, Side, Tournament, Transition};
use super::registry::{EntrantRegistry, validate_entrant};

/// Permutation source used by random seeding
pub trait Shuffler {
    /// Reorder entrants in place
    fn shuffle(&mut self, entrants: &mut [Entrant]);
}

/// Uniform shuffle backed by any `rand` generator
pub struct RandomShuffler<R: Rng> {
    rng: R,
}

impl RandomShuffler<ThreadRng> {
    /// Create a shuffler over the thread-local generator
    pub fn new() -> Self {
        Self { rng: rand::rng() }
    }
}

impl Default for RandomShuffler<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomShuffler<R> {
    /// Create a shuffler over a caller-supplied generator (e.g. a seeded `StdRng`)
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Shuffler for RandomShuffler<R> {
    fn shuffle(&mut self, entrants: &mut [Entrant]) {
        entrants.shuffle(&mut self.rng);
    }
}

/// Keeps entrants in the given order (seeded draws)
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityShuffler;

impl Shuffler for IdentityShuffler {
    fn shuffle(&mut self, _entrants: &mut [Entrant]) {}
}

/// Fill a first round from a shuffled entrant list
///
/// Any previous assignment is discarded. Entrants fill matches in order,
/// alternating side A and side B; leftover slots stay empty.
pub fn seed_random(
    round0: &Round,
    entrants: &[Entrant],
    shuffler: &mut dyn Shuffler,
) -> BracketResult<Round> {
    let capacity = round0.capacity();
    if entrants.len() > capacity {
        return Err(BracketError::TooManyEntrants {
            count: entrants.len(),
            capacity,
        });
    }

    let mut registry = EntrantRegistry::new(capacity);
    for entrant in entrants {
        let mut entrant = entrant.clone();
        entrant.carried_annotation = None;
        registry.register(entrant)?;
    }

    let mut order = registry.into_entrants();
    shuffler.shuffle(&mut order);

    let mut seeded = round0.clone();
    for m in &mut seeded.matches {
        m.entrant_a = None;
        m.entrant_b = None;
    }
    for (i, entrant) in order.into_iter().enumerate() {
        *seeded.matches[i / 2].slot_mut(Side::for_index(i)) = Some(entrant);
    }

    log::debug!(
        "Seeded {} entrants into {} first-round slots",
        seeded.seated_count(),
        capacity
    );

    Ok(seeded)
}

/// Place a single entrant at an explicit first-round slot
pub fn seed_manual(
    round0: &Round,
    match_id: MatchId,
    side: Side,
    entrant: Entrant,
) -> BracketResult<Round> {
    validate_entrant(&entrant)?;

    let index = round0
        .matches
        .iter()
        .position(|m| m.id == match_id)
        .ok_or(BracketError::MatchNotFound(match_id))?;

    if round0.matches[index].slot(side).is_some() {
        return Err(BracketError::SlotOccupied { match_id, side });
    }

    if round0.contains(&entrant.id) {
        return Err(BracketError::DuplicateEntrant(entrant.id));
    }

    let mut seeded = round0.clone();
    *seeded.matches[index].slot_mut(side) = Some(Entrant {
        carried_annotation: None,
        ..entrant
    });
    Ok(seeded)
}

/// Empty a first-round slot
pub fn clear_slot(round0: &Round, match_id: MatchId, side: Side) -> BracketResult<Round> {
    let index = round0
        .matches
        .iter()
        .position(|m| m.id == match_id)
        .ok_or(BracketError::MatchNotFound(match_id))?;

    let mut seeded = round0.clone();
    *seeded.matches[index].slot_mut(side) = None;
    Ok(seeded)
}

impl Tournament {
    /// Randomly draw the first round (draft only, re-seedable)
    pub fn seed_random(
        &self,
        entrants: &[Entrant],
        shuffler: &mut dyn Shuffler,
    ) -> BracketResult<Transition> {
        self.validate()?;
        self.ensure_draft()?;
        let round0 = seed_random(self.first_round()?, entrants, shuffler)?;
        Ok(self.with_first_round(round0))
    }

    /// Place one entrant by hand (draft only)
    pub fn seed_manual(
        &self,
        match_id: MatchId,
        side: Side,
        entrant: Entrant,
    ) -> BracketResult<Transition> {
        self.validate()?;
        self.ensure_draft()?;
        let round0 = seed_manual(self.first_round()?, match_id, side, entrant)?;
        Ok(self.with_first_round(round0))
    }

    /// Remove whoever sits in a first-round slot (draft only)
    pub fn clear_slot(&self, match_id: MatchId, side: Side) -> BracketResult<Transition> {
        self.validate()?;
        self.ensure_draft()?;
        let round0 = clear_slot(self.first_round()?, match_id, side)?;
        Ok(self.with_first_round(round0))
    }

    fn first_round(&self) -> BracketResult<&Round> {
        self.rounds
            .first()
            .ok_or_else(|| BracketError::MalformedBracket("bracket has no rounds".to_string()))
    }

    fn with_first_round(&self, round0: Round) -> Transition {
        let mut next = self.successor();
        next.rounds[0] = round0;
        Transition::quiet(next)
    }
}
