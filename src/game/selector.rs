use std::collections::HashSet;

use rand::{seq::SliceRandom, Rng};

use crate::{
    models::{Difficulty, Verb},
    verbs::GRID_CELLS,
};

pub struct VerbSelector;

impl VerbSelector {
    /// Pick 25 verbs with the regular/irregular ratio of the given level.
    ///
    /// Each subset is shuffled before taking from it, and a present form is
    /// never picked twice. When a subset is too small the result is padded
    /// from the whole pool, so it comes back shorter than 25 only when the
    /// pool has fewer than 25 unique verbs.
    pub fn select_for_difficulty<R: Rng + ?Sized>(
        difficulty: Difficulty,
        pool: &[Verb],
        rng: &mut R,
    ) -> Vec<Verb> {
        let (regular_target, irregular_target) = difficulty.targets();

        let (mut regular, mut irregular): (Vec<&Verb>, Vec<&Verb>) =
            pool.iter().partition(|verb| verb.is_regular);
        regular.shuffle(rng);
        irregular.shuffle(rng);

        let mut seen = HashSet::new();
        let mut selected = Vec::with_capacity(GRID_CELLS);
        Self::take_unique(&mut selected, &mut seen, regular, regular_target);
        Self::take_unique(&mut selected, &mut seen, irregular, irregular_target);

        if selected.len() < GRID_CELLS {
            Self::pad(&mut selected, &mut seen, pool, rng);
        }

        selected.shuffle(rng);
        selected
    }

    /// Uniform shuffle-and-take
    #[allow(dead_code)]
    pub fn select_random<R: Rng + ?Sized>(count: usize, pool: &[Verb], rng: &mut R) -> Vec<Verb> {
        let mut shuffled = pool.to_vec();
        shuffled.shuffle(rng);
        shuffled.truncate(count);
        shuffled
    }

    /// Append up to `count` verbs whose present form is not yet in `seen`
    fn take_unique<'a>(
        selected: &mut Vec<Verb>,
        seen: &mut HashSet<&'a str>,
        candidates: Vec<&'a Verb>,
        count: usize,
    ) {
        let mut taken = 0;
        for verb in candidates {
            if taken == count {
                break;
            }
            if seen.insert(verb.present.as_str()) {
                selected.push(verb.clone());
                taken += 1;
            }
        }
    }

    fn pad<'a, R: Rng + ?Sized>(
        selected: &mut Vec<Verb>,
        seen: &mut HashSet<&'a str>,
        pool: &'a [Verb],
        rng: &mut R,
    ) {
        let mut fill: Vec<&Verb> = pool.iter().collect();
        fill.shuffle(rng);

        let remaining = GRID_CELLS - selected.len();
        Self::take_unique(selected, seen, fill, remaining);

        if selected.len() < GRID_CELLS {
            tracing::warn!(
                "Verb pool only has {} unique verbs, grid needs {}",
                selected.len(),
                GRID_CELLS
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn pool_with(regular: usize, irregular: usize) -> Vec<Verb> {
        let regular_verbs =
            (0..regular).map(|i| Verb::new(&format!("reg{}", i), &format!("reg{}ed", i), true));
        let irregular_verbs =
            (0..irregular).map(|i| Verb::new(&format!("irr{}", i), &format!("irr{}t", i), false));
        regular_verbs.chain(irregular_verbs).collect()
    }

    fn regular_count(verbs: &[Verb]) -> usize {
        verbs.iter().filter(|v| v.is_regular).count()
    }

    fn unique_presents(verbs: &[Verb]) -> usize {
        verbs.iter().map(|v| v.present.as_str()).collect::<HashSet<_>>().len()
    }

    #[test]
    fn test_level_ratios_with_ample_pool() {
        let pool = pool_with(30, 30);
        let mut rng = StdRng::seed_from_u64(7);

        for (difficulty, expected_regular) in [
            (Difficulty::Easy, 20),
            (Difficulty::Medium, 13),
            (Difficulty::Hard, 5),
        ] {
            for _ in 0..20 {
                let selected = VerbSelector::select_for_difficulty(difficulty, &pool, &mut rng);
                assert_eq!(selected.len(), 25);
                assert_eq!(regular_count(&selected), expected_regular, "{:?}", difficulty);
                assert_eq!(unique_presents(&selected), 25);
            }
        }
    }

    #[test]
    fn test_easy_with_exact_minimum_pool() {
        let pool = pool_with(20, 5);
        let mut rng = StdRng::seed_from_u64(1);
        let selected = VerbSelector::select_for_difficulty(Difficulty::Easy, &pool, &mut rng);
        assert_eq!(selected.len(), 25);
        assert_eq!(regular_count(&selected), 20);
    }

    #[test]
    fn test_padding_fills_from_other_subset() {
        // Only 10 regular verbs for a level that wants 20
        let pool = pool_with(10, 40);
        let mut rng = StdRng::seed_from_u64(3);
        let selected = VerbSelector::select_for_difficulty(Difficulty::Easy, &pool, &mut rng);
        assert_eq!(selected.len(), 25);
        assert_eq!(regular_count(&selected), 10);
        assert_eq!(unique_presents(&selected), 25);
    }

    #[test]
    fn test_padding_skips_duplicate_present_forms() {
        let mut pool = pool_with(5, 22);
        // Same present form twice in the source data
        pool.push(Verb::new("irr0", "irr0t", false));
        let mut rng = StdRng::seed_from_u64(11);
        let selected = VerbSelector::select_for_difficulty(Difficulty::Easy, &pool, &mut rng);
        assert_eq!(selected.len(), 25);
        assert_eq!(unique_presents(&selected), 25);
    }

    #[test]
    fn test_small_pool_returns_what_is_available() {
        let pool = pool_with(8, 8);
        let mut rng = StdRng::seed_from_u64(5);
        let selected = VerbSelector::select_for_difficulty(Difficulty::Medium, &pool, &mut rng);
        assert_eq!(selected.len(), 16);
        assert_eq!(unique_presents(&selected), 16);
    }

    #[test]
    fn test_fixed_seed_is_deterministic() {
        let pool = pool_with(30, 30);
        let first = VerbSelector::select_for_difficulty(
            Difficulty::Medium,
            &pool,
            &mut StdRng::seed_from_u64(42),
        );
        let second = VerbSelector::select_for_difficulty(
            Difficulty::Medium,
            &pool,
            &mut StdRng::seed_from_u64(42),
        );
        assert_eq!(first, second);
    }

    #[test]
    fn test_select_random() {
        let pool = pool_with(15, 15);
        let mut rng = StdRng::seed_from_u64(9);
        let selected = VerbSelector::select_random(25, &pool, &mut rng);
        assert_eq!(selected.len(), 25);
        assert_eq!(unique_presents(&selected), 25);

        let everything = VerbSelector::select_random(100, &pool, &mut rng);
        assert_eq!(everything.len(), 30);
    }
}
