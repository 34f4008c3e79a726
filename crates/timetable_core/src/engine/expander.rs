//! Requirement expansion into a shuffled occurrence list.

use crate::model::catalog::Subject;
use rand::seq::SliceRandom;
use rand::Rng;

/// Repeats each subject `periods` times and shuffles the result.
///
/// Shuffling spreads priority for scarce slots across runs instead of always
/// favouring the first declared requirement. Pass a seeded generator to pin
/// the order.
pub fn expand_requirements<'a, R: Rng + ?Sized>(
    requirements: &'a [(Subject, u32)],
    rng: &mut R,
) -> Vec<&'a Subject> {
    let mut occurrences: Vec<&Subject> = requirements
        .iter()
        .flat_map(|(subject, periods)| std::iter::repeat(subject).take(*periods as usize))
        .collect();
    occurrences.shuffle(rng);
    occurrences
}

#[cfg(test)]
mod tests {
    use super::expand_requirements;
    use crate::engine::test_support::subject;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    #[test]
    fn expansion_repeats_each_subject_by_periods() {
        let requirements = vec![(subject(1, 10), 5), (subject(2, 20), 2), (subject(3, 30), 1)];
        let mut rng = StdRng::seed_from_u64(7);

        let occurrences = expand_requirements(&requirements, &mut rng);

        let mut counts: HashMap<i64, usize> = HashMap::new();
        for occurrence in &occurrences {
            *counts.entry(occurrence.id).or_default() += 1;
        }
        assert_eq!(occurrences.len(), 8);
        assert_eq!(counts[&1], 5);
        assert_eq!(counts[&2], 2);
        assert_eq!(counts[&3], 1);
    }

    #[test]
    fn same_seed_gives_same_order() {
        let requirements = vec![(subject(1, 10), 4), (subject(2, 20), 4), (subject(3, 30), 4)];

        let first: Vec<i64> = expand_requirements(&requirements, &mut StdRng::seed_from_u64(42))
            .iter()
            .map(|subject| subject.id)
            .collect();
        let second: Vec<i64> = expand_requirements(&requirements, &mut StdRng::seed_from_u64(42))
            .iter()
            .map(|subject| subject.id)
            .collect();

        assert_eq!(first, second);
    }

    #[test]
    fn empty_requirements_expand_to_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(expand_requirements(&[], &mut rng).is_empty());
    }
}
