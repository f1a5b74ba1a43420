//! Picks the next quiz question a player has not seen yet.
//!
//! Players keep their own history and resend it with every request, so
//! selection carries no state between calls.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::db::Question;

/// Which questions take part in a quiz. Category id `0` stands for all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Category(i64),
}

impl From<i64> for CategoryFilter {
    fn from(id: i64) -> Self {
        match id {
            0 => CategoryFilter::All,
            id => CategoryFilter::Category(id),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Selection<'a> {
    Next(&'a Question),
    /// Every candidate was already asked, or there were none.
    Exhausted,
}

/// Draws uniformly from the candidates whose id is not in `previous`.
pub fn select_next<'a, R>(
    candidates: &'a [Question],
    previous: &HashSet<i64>,
    rng: &mut R,
) -> Selection<'a>
where
    R: Rng + ?Sized,
{
    let remaining: Vec<&Question> = candidates
        .iter()
        .filter(|q| !previous.contains(&q.id))
        .collect();

    match remaining.choose(rng) {
        Some(question) => Selection::Next(*question),
        None => Selection::Exhausted,
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn question(id: i64) -> Question {
        Question {
            id,
            question: format!("Question {id}?"),
            answer: format!("Answer {id}"),
            category: 1,
            difficulty: 1,
        }
    }

    fn pool(ids: impl IntoIterator<Item = i64>) -> Vec<Question> {
        ids.into_iter().map(question).collect()
    }

    #[test]
    fn last_unseen_question_is_returned() {
        let candidates = pool(1..=5);
        let previous = HashSet::from([1, 2, 3, 4]);
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            match select_next(&candidates, &previous, &mut rng) {
                Selection::Next(q) => assert_eq!(q.id, 5),
                Selection::Exhausted => panic!("question 5 was still available"),
            }
        }
    }

    #[test]
    fn all_seen_is_exhausted() {
        let candidates = pool(1..=3);
        let previous = HashSet::from([1, 2, 3]);
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(
            select_next(&candidates, &previous, &mut rng),
            Selection::Exhausted
        );
    }

    #[test]
    fn empty_pool_is_exhausted() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(
            select_next(&[], &HashSet::new(), &mut rng),
            Selection::Exhausted
        );
    }

    #[test]
    fn never_returns_a_previous_question() {
        let candidates = pool(1..=20);
        let previous: HashSet<i64> = (1..=20).filter(|id| id % 3 != 0).collect();
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = HashSet::new();
        for _ in 0..200 {
            let Selection::Next(q) = select_next(&candidates, &previous, &mut rng) else {
                panic!("unexpected exhaustion");
            };
            assert!(!previous.contains(&q.id));
            seen.insert(q.id);
        }
        assert_eq!(seen, HashSet::from([3, 6, 9, 12, 15, 18]));
    }

    #[test]
    fn ids_outside_the_pool_are_ignored() {
        let candidates = pool([10, 11]);
        let previous = HashSet::from([1, 2, 10]);
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(
            select_next(&candidates, &previous, &mut rng),
            Selection::Next(&candidates[1])
        );
    }

    #[test]
    fn category_zero_means_all() {
        assert_eq!(CategoryFilter::from(0), CategoryFilter::All);
        assert_eq!(CategoryFilter::from(4), CategoryFilter::Category(4));
    }
}
