use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use scrabble_engine::{Bag, Board, Language, Lexicon, Rack, Turn, TurnOutcome};
use std::time::Instant;

const WORDS: &[&str] = &[
    "LE", "LA", "LES", "CES", "TES", "SEL", "ET", "TE", "ASSIS", "SOS", "TIC", "TICS", "DESK",
    "EXPIRA", "SALINE", "ANIMES", "LIMASSE", "MINASSE", "ZORRO", "ETIOLENT", "VERMET", "FLOUTAS",
];

fn main() -> Result<()> {
    let t0 = Instant::now();
    let lexicon = Lexicon::from_words(WORDS)?;
    println!("built {} in {:?}", lexicon, t0.elapsed());

    let mut rng = StdRng::seed_from_u64(123);
    let mut board = Board::new(Language::Fr);
    let mut bag = Bag::full(Language::Fr);
    let mut rack = Rack::new();
    rack.fill_from(&mut bag, &mut rng);

    let mut total = 0;
    for round in 1..=20 {
        let mut turn = Turn::new(&lexicon);
        match turn.auto(&mut board, &mut rack, &mut bag, &mut rng)? {
            TurnOutcome::Played { solution, used } => {
                total += solution.value();
                println!(
                    "{:2}: {} (used {} tiles, {} in bag, total {})",
                    round,
                    solution,
                    used.len(),
                    bag.len(),
                    total
                );
            }
            TurnOutcome::Exchanged => println!("{:2}: exchanged the rack", round),
            TurnOutcome::Passed => {
                println!("{:2}: no move left, passing", round);
                break;
            }
        }
    }

    println!("{}", board);
    println!("final score {}", total);
    Ok(())
}
