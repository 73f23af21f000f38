use crate::bag::Bag;
use crate::board::Board;
use crate::error::Error;
use crate::generator::{Generator, Solution};
use crate::lexicon::Lexicon;
use crate::line::CENTER;
use crate::tiles::{Rack, Tile, RACK_SIZE};
use crate::word::{BlankTile, Word};
use rand::Rng;
use std::collections::BTreeSet;

/// Lifecycle of a single move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing happened yet.
    Idle,
    /// Mask built, candidates enumerated.
    Analysing,
    /// A solution was selected and scored.
    Scored,
    /// The solution was placed and the move counter advanced.
    Committed,
    /// A precondition failed; the board is unchanged.
    Rejected,
}

/// What a turn resolved to.
#[derive(Debug)]
pub enum TurnOutcome {
    /// A word was placed; `used` are the rack tiles it consumed.
    Played {
        solution: Solution,
        used: Vec<Tile>,
    },
    /// The whole rack was swapped against the bag.
    Exchanged,
    /// No move was made.
    Passed,
}

/// A caller-proposed action for a manual turn.
#[derive(Debug)]
pub enum Proposal {
    Play {
        word: Word,
        blanks: BTreeSet<BlankTile>,
    },
    Exchange,
    Pass,
}

/// Drives one move request through its phases.
///
/// The driver owns no board or rack; it borrows them per call, so the
/// surrounding session keeps full control of the game state.
pub struct Turn<'a> {
    generator: Generator<'a>,
    phase: Phase,
}

impl<'a> Turn<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Turn<'a> {
        Turn {
            generator: Generator::new(lexicon),
            phase: Phase::Idle,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    fn reject(&mut self, error: Error) -> Error {
        self.phase = Phase::Rejected;
        error
    }

    /// Play the best solution for the rack; exchange when none exists
    /// and the rules allow it, pass otherwise.
    pub fn auto<R: Rng>(
        &mut self,
        board: &mut Board,
        rack: &mut Rack,
        bag: &mut Bag,
        rng: &mut R,
    ) -> Result<TurnOutcome, Error> {
        self.phase = Phase::Analysing;
        let best = self.generator.best_solution(board, rack);
        let best = best.map_err(|e| self.reject(e))?;
        match best {
            Some(solution) => {
                self.phase = Phase::Scored;
                self.commit(board, rack, bag, solution, rng)
            }
            None if rack.len() == RACK_SIZE && bag.len() >= RACK_SIZE => {
                log::info!("no word found for rack {}, exchanging tiles", rack);
                exchange(rack, bag, rng)?;
                self.phase = Phase::Idle;
                Ok(TurnOutcome::Exchanged)
            }
            None => {
                log::info!("no word found for rack {}, passing", rack);
                self.phase = Phase::Idle;
                Ok(TurnOutcome::Passed)
            }
        }
    }

    /// Resolve a caller-proposed action, validating it against the
    /// board, the lexicon and the cross checks.
    pub fn manual<R: Rng>(
        &mut self,
        board: &mut Board,
        rack: &mut Rack,
        bag: &mut Bag,
        proposal: Proposal,
        rng: &mut R,
    ) -> Result<TurnOutcome, Error> {
        match proposal {
            Proposal::Play { word, blanks } => {
                self.phase = Phase::Analysing;
                let solution = self.generator.solution_for_word(board, word, blanks);
                let solution = solution.map_err(|e| self.reject(e))?;
                self.phase = Phase::Scored;
                self.commit(board, rack, bag, solution, rng)
            }
            Proposal::Exchange => {
                exchange(rack, bag, rng).map_err(|e| self.reject(e))?;
                self.phase = Phase::Idle;
                Ok(TurnOutcome::Exchanged)
            }
            Proposal::Pass => {
                self.phase = Phase::Idle;
                Ok(TurnOutcome::Passed)
            }
        }
    }

    fn commit<R: Rng>(
        &mut self,
        board: &mut Board,
        rack: &mut Rack,
        bag: &mut Bag,
        solution: Solution,
        rng: &mut R,
    ) -> Result<TurnOutcome, Error> {
        if board.moves() == 0 && !solution.word().covers(CENTER) {
            return Err(self.reject(Error::FirstMoveMustCoverCenter));
        }
        let used = board.apply_solution(&solution);
        let used = used.map_err(|e| self.reject(e))?;
        for &tile in &used {
            rack.remove(tile);
        }
        rack.fill_from(bag, rng);
        self.phase = Phase::Committed;
        Ok(TurnOutcome::Played { solution, used })
    }
}

/// Swap all 7 rack tiles against fresh ones. Allowed only with a full
/// rack and at least 7 tiles left in the bag.
/// ## Errors
/// [`Error::ExchangeNotAllowed`] otherwise; rack and bag unchanged.
pub fn exchange<R: Rng>(rack: &mut Rack, bag: &mut Bag, rng: &mut R) -> Result<(), Error> {
    if rack.len() != RACK_SIZE || bag.len() < RACK_SIZE {
        return Err(Error::ExchangeNotAllowed {
            rack: rack.len(),
            bag: bag.len(),
        });
    }
    for tile in rack.take_all() {
        bag.put_back(tile);
    }
    rack.fill_from(bag, rng);
    Ok(())
}
