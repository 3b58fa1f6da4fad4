//! Uniform random selection with optional exclusion predicates.
//!
//! Every function takes the random source explicitly, so a seeded
//! [`rand::rngs::StdRng`] makes a whole terminal reproducible.
//!
//! ```
//! use hackterm::random::{pick, pick_excluding};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let glyphs = ['.', ':', 'w'];
//! let any = pick(&glyphs, &mut rng);
//! assert!(any.is_some());
//! let noise = pick_excluding(&glyphs, &mut rng, |&c| c == 'w');
//! assert_ne!(noise, Some(&'w'));
//! ```

use rand::Rng;

/// Pick any item uniformly. `None` when `items` is empty.
pub fn pick<'a, T, R: Rng + ?Sized>(items: &'a [T], rng: &mut R) -> Option<&'a T> {
    pick_index_excluding(items, rng, |_| false).map(|i| &items[i])
}

/// Pick uniformly among the items for which `exclude` returns `false`.
///
/// Returns `None` when every item is excluded (or `items` is empty).
pub fn pick_excluding<'a, T, R, F>(items: &'a [T], rng: &mut R, exclude: F) -> Option<&'a T>
where
    R: Rng + ?Sized,
    F: Fn(&T) -> bool,
{
    pick_index_excluding(items, rng, exclude).map(|i| &items[i])
}

/// Like [`pick_excluding`], but returns the position of the chosen item.
pub fn pick_index_excluding<T, R, F>(items: &[T], rng: &mut R, exclude: F) -> Option<usize>
where
    R: Rng + ?Sized,
    F: Fn(&T) -> bool,
{
    let allowed: Vec<usize> = items
        .iter()
        .enumerate()
        .filter(|(_, item)| !exclude(item))
        .map(|(i, _)| i)
        .collect();

    match allowed.len() {
        0 => None,
        1 => Some(allowed[0]),
        n => Some(allowed[rng.gen_range(0..n)]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn test_pick_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        let empty: [char; 0] = [];
        assert_eq!(pick(&empty, &mut rng), None);
    }

    #[test]
    fn test_pick_single() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(pick(&['x'], &mut rng), Some(&'x'));
    }

    #[test]
    fn test_pick_excluding_never_returns_excluded() {
        let mut rng = StdRng::seed_from_u64(42);
        let items = ['.', 'w', ':', 'w', ';'];
        for _ in 0..500 {
            let c = pick_excluding(&items, &mut rng, |&c| c == 'w').unwrap();
            assert_ne!(*c, 'w');
        }
    }

    #[test]
    fn test_pick_excluding_everything() {
        let mut rng = StdRng::seed_from_u64(3);
        let items = ['w', 'w'];
        assert_eq!(pick_excluding(&items, &mut rng, |&c| c == 'w'), None);
    }

    #[test]
    fn test_single_survivor_ignores_rng() {
        // a lone allowed item is returned even though the input has several entries
        let mut rng = StdRng::seed_from_u64(9);
        let items = ['w', '.', 'w'];
        assert_eq!(pick_index_excluding(&items, &mut rng, |&c| c == 'w'), Some(1));
    }

    #[test]
    fn test_pick_reaches_every_item() {
        let mut rng = StdRng::seed_from_u64(5);
        let items = [1, 2, 3, 4];
        let seen: HashSet<i32> = (0..400).filter_map(|_| pick(&items, &mut rng).copied()).collect();
        assert_eq!(seen, HashSet::from([1, 2, 3, 4]));
    }

    #[test]
    fn test_same_seed_same_choices() {
        let items: Vec<usize> = (0..50).collect();
        let run = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..20).map(|_| *pick(&items, &mut rng).unwrap()).collect::<Vec<_>>()
        };
        assert_eq!(run(11), run(11));
    }
}
