//! Response-space representations for each query kind.
//!
//! A query's response set is fully determined by its kind and slate size, and
//! is computed once when the query is constructed. The three shapes are kept
//! as distinct variants so each carries its own strongly-typed form instead
//! of a loosely-typed grab bag.

use serde::{Deserialize, Serialize};

/// The set of all legal responses for a query instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseSet {
    /// The contiguous integers `[0, k)`: one choice per slate item.
    Choice { k: usize },
    /// The fixed set `{-1, 0, 1}`: -1 for "about equal", 0/1 for the
    /// preferred item of a pair.
    Weak,
    /// Every permutation of `[0, k)`, most-preferred index first.
    Ranking { permutations: Vec<Vec<usize>> },
}

impl ResponseSet {
    /// Build the choice set for a slate of `k` items.
    pub fn choice(k: usize) -> Self {
        Self::Choice { k }
    }

    /// Build the ranking set for a slate of `k` items.
    ///
    /// This materializes all k! permutations eagerly, so it is only suitable
    /// for small slates. Kept eager to make membership checks and inspection
    /// trivial; a lazy enumeration would have to preserve the same membership
    /// semantics.
    pub fn ranking(k: usize) -> Self {
        Self::Ranking {
            permutations: permutations(k),
        }
    }

    /// Number of legal responses in the set.
    pub fn len(&self) -> usize {
        match self {
            Self::Choice { k } => *k,
            Self::Weak => 3,
            Self::Ranking { permutations } => permutations.len(),
        }
    }

    /// Whether the set is empty (only possible for a zero-item choice set).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `choice` is a legal best-of-slate selection.
    pub fn contains_choice(&self, choice: usize) -> bool {
        matches!(self, Self::Choice { k } if choice < *k)
    }

    /// Whether `response` is a legal weak comparison answer.
    pub fn contains_comparison(&self, response: i32) -> bool {
        matches!(self, Self::Weak) && (-1..=1).contains(&response)
    }

    /// Whether `ranking` is exactly one of the enumerated permutations.
    pub fn contains_ranking(&self, ranking: &[usize]) -> bool {
        matches!(self, Self::Ranking { permutations } if permutations.iter().any(|p| p == ranking))
    }

    /// The enumerated rankings, when this is a ranking set.
    pub fn rankings(&self) -> Option<&[Vec<usize>]> {
        match self {
            Self::Ranking { permutations } => Some(permutations),
            _ => None,
        }
    }
}

/// All permutations of `0..k` in lexicographic order.
fn permutations(k: usize) -> Vec<Vec<usize>> {
    let mut rows = Vec::new();
    let mut prefix = Vec::with_capacity(k);
    let mut used = vec![false; k];
    extend(k, &mut prefix, &mut used, &mut rows);
    rows
}

fn extend(k: usize, prefix: &mut Vec<usize>, used: &mut [bool], rows: &mut Vec<Vec<usize>>) {
    if prefix.len() == k {
        rows.push(prefix.clone());
        return;
    }
    for i in 0..k {
        if !used[i] {
            used[i] = true;
            prefix.push(i);
            extend(k, prefix, used, rows);
            prefix.pop();
            used[i] = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn choice_set_covers_exactly_zero_to_k() {
        let set = ResponseSet::choice(3);
        assert_eq!(set.len(), 3);
        for i in 0..3 {
            assert!(set.contains_choice(i));
        }
        assert!(!set.contains_choice(3));
    }

    #[test]
    fn weak_set_is_minus_one_zero_one() {
        let set = ResponseSet::Weak;
        assert_eq!(set.len(), 3);
        for r in [-1, 0, 1] {
            assert!(set.contains_comparison(r));
        }
        assert!(!set.contains_comparison(2));
        assert!(!set.contains_comparison(-2));
    }

    #[test]
    fn ranking_set_enumerates_k_factorial_distinct_rows() {
        let set = ResponseSet::ranking(4);
        let rows = set.rankings().unwrap();
        assert_eq!(rows.len(), 24);
        let distinct: HashSet<_> = rows.iter().collect();
        assert_eq!(distinct.len(), 24);
        for row in rows {
            let mut sorted = row.clone();
            sorted.sort_unstable();
            assert_eq!(sorted, vec![0, 1, 2, 3]);
        }
    }

    #[test]
    fn pairwise_rankings_in_lexicographic_order() {
        let set = ResponseSet::ranking(2);
        assert_eq!(set.rankings().unwrap(), &[vec![0, 1], vec![1, 0]]);
    }

    #[test]
    fn ranking_membership_rejects_non_permutations() {
        let set = ResponseSet::ranking(2);
        assert!(set.contains_ranking(&[0, 1]));
        assert!(set.contains_ranking(&[1, 0]));
        assert!(!set.contains_ranking(&[1, 1]));
        assert!(!set.contains_ranking(&[0]));
        assert!(!set.contains_ranking(&[0, 1, 2]));
    }

    #[test]
    fn shape_mismatches_are_not_members() {
        assert!(!ResponseSet::choice(3).contains_comparison(0));
        assert!(!ResponseSet::Weak.contains_choice(0));
        assert!(!ResponseSet::choice(3).contains_ranking(&[0, 1, 2]));
    }
}
