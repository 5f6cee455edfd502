//! Match validation capability boundary.
//!
//! The rule deciding whether three cards go together is deliberately
//! outside this crate. The core only needs two questions answered: "do
//! these three cards match?" and "does this pool still contain a match?"
//! Both are bundled in [`MatchValidator`].

use crate::core::CardId;

/// Decides which card triples are valid.
///
/// Implementations must be pure with respect to card identity: the same
/// three cards always give the same answer, in any order.
pub trait MatchValidator: Send + Sync {
    /// Test whether three cards form a valid triple.
    fn is_valid_triple(&self, a: CardId, b: CardId, c: CardId) -> bool;

    /// Enumerate up to `max` valid triples in `pool`.
    ///
    /// Used for end-of-round hints (`max` large) and for the termination
    /// check (`max == 1`). The default enumerates combinations via
    /// [`is_valid_triple`](Self::is_valid_triple); implementations with a
    /// faster search may override it.
    fn find_triples(&self, pool: &[CardId], max: usize) -> Vec<[CardId; 3]> {
        let mut found = Vec::new();
        for i in 0..pool.len() {
            for j in i + 1..pool.len() {
                for k in j + 1..pool.len() {
                    if found.len() >= max {
                        return found;
                    }
                    if self.is_valid_triple(pool[i], pool[j], pool[k]) {
                        found.push([pool[i], pool[j], pool[k]]);
                    }
                }
            }
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Validator that accepts triples summing to a multiple of 3.
    struct ModSum;

    impl MatchValidator for ModSum {
        fn is_valid_triple(&self, a: CardId, b: CardId, c: CardId) -> bool {
            (a.raw() + b.raw() + c.raw()) % 3 == 0
        }
    }

    #[test]
    fn test_default_find_triples_respects_max() {
        let pool: Vec<CardId> = (0..9).map(CardId::new).collect();
        let all = ModSum.find_triples(&pool, usize::MAX);
        assert!(all.len() > 2);

        let capped = ModSum.find_triples(&pool, 2);
        assert_eq!(capped.len(), 2);
        assert_eq!(capped, all[..2]);
    }

    #[test]
    fn test_default_find_triples_empty_pool() {
        assert!(ModSum.find_triples(&[], usize::MAX).is_empty());
        assert!(ModSum.find_triples(&[CardId::new(0), CardId::new(1)], 1).is_empty());
    }

    #[test]
    fn test_found_triples_are_valid() {
        let pool: Vec<CardId> = (0..12).map(CardId::new).collect();
        for [a, b, c] in ModSum.find_triples(&pool, usize::MAX) {
            assert!(ModSum.is_valid_triple(a, b, c));
        }
    }
}
