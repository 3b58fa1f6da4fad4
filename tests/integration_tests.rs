//! Integration tests for the hackterm generator, tokenizer and terminal.
//!
//! These tests run the whole pipeline: a word list and palette go in, a message
//! is generated, chunked into rows and tokenized, and a terminal is played.

use std::collections::HashSet;

use hackterm::config::{Action, TerminalConfig};
use hackterm::generator::{Message, generate};
use hackterm::grid::{GridShape, chunk_rows};
use hackterm::palette::Palette;
use hackterm::terminal::{Selection, Status, Terminal, likeness};
use hackterm::tokenizer::{BracketChannels, BracketRole, RegionExtent, Tokenized, TokenizerOptions, tokenize};
use hackterm::word_list::{WordList, WordPool};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::rngs::mock::StepRng;

/// Generate and tokenize one message.
fn deal(words: &WordList, palette: &Palette, shape: GridShape, min_gap: usize, seed: u64) -> (Message, Tokenized) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut pool = WordPool::from_list(words);
    let message = generate(&mut pool, palette, shape.total_length(), min_gap, &mut rng).unwrap();
    let rows = chunk_rows(message.text(), shape.chars_per_row);
    let tokens = tokenize(&rows, &BracketChannels::default(), &message.placed_words(), TokenizerOptions::default());
    (message, tokens)
}

#[cfg(test)]
mod end_to_end {
    use super::*;

    #[test]
    fn test_two_word_scenario() {
        let words = WordList::new(["abode", "blaze"]).unwrap();
        let palette: Palette = ".w".parse().unwrap();
        let shape = GridShape { columns: 1, rows_per_column: 2, chars_per_row: 10 };

        for seed in 0..100 {
            let (message, tokens) = deal(&words, &palette, shape, 3, seed);
            let text = message.text();
            assert_eq!(text.len(), 20);
            assert!(text.chars().all(|c| c == '.' || c.is_ascii_uppercase()));

            let placed = message.placed_words();
            assert!(placed.len() <= 2);
            for word in &placed {
                assert_eq!(text.matches(word.as_str()).count(), 1);
            }
            for pair in message.placements().windows(2) {
                assert!(pair[1].offset - (pair[0].offset + 5) > 3);
            }
            if !placed.is_empty() {
                assert!(placed.iter().any(|w| w == message.solution().unwrap()));
            }

            let rows = chunk_rows(text, 10);
            assert_eq!(rows.len(), 2);
            assert!(rows.iter().all(|r| r.len() == 10));
            assert_eq!(tokens.spans().len(), 20);
            assert_eq!(tokens.words().iter().map(|w| w.text.clone()).collect::<Vec<_>>(), placed);
        }
    }

    #[test]
    fn test_scripted_two_word_scenario() {
        // a source that always returns zero picks the first allowed entry every time:
        // the marker first, then '.' whenever words are skipped
        let words = WordList::new(["abode", "blaze"]).unwrap();
        let palette: Palette = "w.".parse().unwrap();
        let mut pool = WordPool::from_list(&words);
        let mut rng = StepRng::new(0, 0);
        let message = generate(&mut pool, &palette, 20, 3, &mut rng).unwrap();

        assert_eq!(message.text(), "ABODE....BLAZE......");
        assert_eq!(message.placements()[1].offset, 9);
        assert_eq!(message.solution().unwrap(), "ABODE");
        assert!(pool.is_empty());
    }

    #[test]
    fn test_bracket_regions_scenario() {
        let rows = chunk_rows("<AB>{CD}", 8);
        let options = TokenizerOptions { words_break_regions: false, extent: RegionExtent::Endpoints };
        let tokens = tokenize(&rows, &BracketChannels::default(), &[], options);
        let spans = tokens.spans();

        assert_eq!(spans[0].region_ordinal, Some(0));
        assert_eq!(spans[3].region_ordinal, Some(0));
        assert_eq!(spans[4].region_ordinal, Some(1));
        assert_eq!(spans[7].region_ordinal, Some(1));
        assert!([0, 3, 4, 7].iter().all(|&i| spans[i].region_active));
        assert!([1, 2, 5, 6].iter().all(|&i| spans[i].role == BracketRole::None && !spans[i].region_active));
    }

    #[test]
    fn test_likeness_examples() {
        assert_eq!(likeness("FROST", "FROZE").unwrap(), 3);
        assert_eq!(likeness("FROST", "FROST").unwrap(), 5);
        assert!(likeness("AB", "ABC").is_err());
    }

    #[test]
    fn test_default_terminal_layout() {
        let (message, tokens) = deal(&WordList::default(), &Palette::default(), GridShape::default(), 3, 2024);
        assert_eq!(message.text().chars().count(), 384);
        let rows = chunk_rows(message.text(), 12);
        assert_eq!(rows.len(), 32);
        assert_eq!(tokens.text(), message.text());
        assert!(tokens.spans().iter().enumerate().all(|(i, s)| s.index == i));
    }

    #[test]
    fn test_load_word_list_fixture() {
        let list = WordList::load_from_path("tests/fixtures/words.txt").unwrap();
        assert_eq!(list.words(), ["FROST", "GHOST", "FROZE", "GLAZE"]);
    }

    #[test]
    fn test_load_missing_file() {
        let err = WordList::load_from_path("tests/fixtures/no_such_file.txt").unwrap_err();
        assert!(err.to_string().contains("no_such_file"));
    }
}

#[cfg(test)]
mod gameplay {
    use super::*;

    #[test]
    fn test_play_until_unlocked() {
        let config = TerminalConfig { max_tries: 30, ..TerminalConfig::default() };
        let mut rng = StdRng::seed_from_u64(99);
        let mut terminal = Terminal::new(config, WordList::default(), &mut rng).unwrap();

        // guess every word in order; the solution must eventually unlock
        let words: Vec<String> = terminal.tokens().words().iter().map(|w| w.text.clone()).collect();
        let mut unlocked = false;
        for word in &words {
            match terminal.select_word(word, &mut rng).unwrap() {
                Selection::Unlocked { word: w } => {
                    assert_eq!(w, terminal.solution());
                    unlocked = true;
                    break;
                }
                Selection::Denied { likeness: l, .. } => {
                    assert_eq!(l, likeness(word, terminal.solution()).unwrap());
                }
                other => panic!("unexpected {other:?}"),
            }
        }
        assert!(unlocked);
        assert_eq!(terminal.status(), Status::Unlocked);
        assert!(terminal.render().contains(">UNLOCKED!!"));
    }

    #[test]
    fn test_commands_and_lockout() {
        let config = TerminalConfig {
            palette: "<>[].ww".parse().unwrap(),
            max_tries: 1,
            actions: vec![Action::RemoveDud],
            ..TerminalConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(5);
        let mut terminal = Terminal::new(config, WordList::default(), &mut rng).unwrap();

        let command = terminal.tokens().regions()[0].closer;
        let selection = terminal.select(command, &mut rng).unwrap();
        assert!(matches!(selection, Selection::Command { action: Action::RemoveDud, applied: true, .. }));

        let wrong = terminal
            .tokens()
            .words()
            .iter()
            .find(|w| w.text != terminal.solution() && !terminal.duds().contains(&w.ordinal))
            .map(|w| w.start)
            .unwrap();
        assert!(matches!(terminal.select(wrong, &mut rng).unwrap(), Selection::LockedOut { .. }));
        assert_eq!(terminal.status(), Status::LockedOut);
        assert!(terminal.select(0, &mut rng).unwrap().is_ignored());
    }

    #[test]
    fn test_same_seed_same_terminal() {
        let make = || {
            let mut rng = StdRng::seed_from_u64(31);
            Terminal::new(TerminalConfig::default(), WordList::default(), &mut rng).unwrap().render()
        };
        assert_eq!(make(), make());
    }
}

#[cfg(test)]
mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_message_invariants(seed in any::<u64>(), min_gap in 0usize..6, columns in 1usize..3, rows in 2usize..12, width in 5usize..16) {
            let shape = GridShape::new(columns, rows, width).unwrap();
            let (message, tokens) = deal(&WordList::default(), &Palette::default(), shape, min_gap, seed);
            let text = message.text();

            prop_assert_eq!(text.chars().count(), shape.total_length());

            let placed = message.placed_words();
            let unique: HashSet<&String> = placed.iter().collect();
            prop_assert_eq!(unique.len(), placed.len());
            for pair in message.placements().windows(2) {
                prop_assert!(pair[1].offset - (pair[0].offset + pair[0].word.len()) > min_gap);
            }
            if let Ok(solution) = message.solution() {
                prop_assert!(placed.iter().any(|w| w == solution));
            } else {
                prop_assert!(placed.is_empty());
            }

            // tokens agree with the generator
            prop_assert_eq!(tokens.text(), text);
            prop_assert_eq!(tokens.words().len(), placed.len());
            for (occurrence, placement) in tokens.words().iter().zip(message.placements()) {
                prop_assert_eq!(occurrence.start, placement.offset);
                prop_assert_eq!(&occurrence.text, &placement.word);
            }

            for region in tokens.regions() {
                prop_assert!(!region.openers.is_empty());
                prop_assert_eq!(tokens.spans()[region.closer].role, BracketRole::Closes);
                for &o in &region.openers {
                    prop_assert!(o < region.closer);
                    prop_assert_eq!(o / width, region.closer / width);
                    prop_assert_eq!(tokens.spans()[o].role, BracketRole::Opens);
                    prop_assert_eq!(tokens.spans()[o].region_ordinal, Some(region.ordinal));
                }

                // with a single opener, active opens and closes balance per ordinal
                if region.openers.len() == 1 {
                    let in_region = |role: BracketRole| {
                        tokens
                            .spans()
                            .iter()
                            .filter(|s| s.role == role && s.region_active && s.region_ordinal == Some(region.ordinal))
                            .count()
                    };
                    prop_assert_eq!(in_region(BracketRole::Opens), 1);
                    prop_assert_eq!(in_region(BracketRole::Closes), 1);
                }
            }
            let closers = tokens.spans().iter().filter(|s| s.role == BracketRole::Closes).count();
            prop_assert_eq!(closers, tokens.regions().len());
        }

        #[test]
        fn prop_chunk_rejoins(text in "[A-Z<>{}.:;]{0,80}", width in 1usize..20) {
            let rows = chunk_rows(&text, width);
            let joined: String = rows.iter().map(|r| r.text).collect();
            prop_assert_eq!(joined, text.clone());
            if let Some((last, full)) = rows.split_last() {
                prop_assert!(full.iter().all(|r| r.len() == width));
                prop_assert!(last.len() >= 1 && last.len() <= width);
            }
        }

        #[test]
        fn prop_tokenize_idempotent(text in "[A-Z<>{}()\\[\\].]{0,60}", width in 1usize..12) {
            let rows = chunk_rows(&text, width);
            let a = tokenize(&rows, &BracketChannels::default(), &[], TokenizerOptions::default());
            let b = tokenize(&rows, &BracketChannels::default(), &[], TokenizerOptions::default());
            prop_assert_eq!(&a, &b);
            prop_assert_eq!(a.spans().len(), text.chars().count());
        }

        #[test]
        fn prop_likeness_symmetric(a in "[A-Z]{5}", b in "[A-Z]{5}") {
            let ab = likeness(&a, &b).unwrap();
            prop_assert_eq!(ab, likeness(&b, &a).unwrap());
            prop_assert!(ab <= 5);
            prop_assert_eq!(likeness(&a, &a).unwrap(), 5);
        }
    }
}
