//! Enumeration of unordered group triples

use crate::error::{CoreError, Result};

/// Number of groups in one combination
pub const GROUPS_PER_COMBINATION: usize = 3;

/// C(n, 3)
pub fn triple_count(n: usize) -> usize {
    if n < GROUPS_PER_COMBINATION {
        return 0;
    }
    n * (n - 1) * (n - 2) / 6
}

/// Iterator over index triples `[i, j, k]` with `i < j < k < n`,
/// in lexicographic order
#[derive(Debug, Clone)]
pub struct Triples {
    n: usize,
    next: Option<[usize; 3]>,
    remaining: usize,
}

impl Triples {
    /// Fails when fewer than three groups are available.
    pub fn new(n: usize) -> Result<Self> {
        if n < GROUPS_PER_COMBINATION {
            return Err(CoreError::NotEnoughGroups {
                found: n,
                required: GROUPS_PER_COMBINATION,
            });
        }
        Ok(Self {
            n,
            next: Some([0, 1, 2]),
            remaining: triple_count(n),
        })
    }

    fn advance(&self, [i, j, k]: [usize; 3]) -> Option<[usize; 3]> {
        let n = self.n;
        if k + 1 < n {
            Some([i, j, k + 1])
        } else if j + 2 < n {
            Some([i, j + 1, j + 2])
        } else if i + 3 < n {
            Some([i + 1, i + 2, i + 3])
        } else {
            None
        }
    }
}

impl Iterator for Triples {
    type Item = [usize; 3];

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.advance(current);
        self.remaining -= 1;
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Triples {}

/// Every combination of three distinct elements of `items`, generator order.
pub fn combinations_of_three<T>(items: &[T]) -> Result<Vec<[&T; 3]>> {
    Ok(Triples::new(items.len())?
        .map(|[i, j, k]| [&items[i], &items[j], &items[k]])
        .collect())
}
