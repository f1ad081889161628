//! Lazy combination and permutation iterators over `0..n`.
//!
//! Both iterators produce index vectors in lexicographic order and allocate
//! only the vector they yield, so huge successor sets are never
//! materialized up front.

/// All `r`-element combinations of `0..n` in lexicographic order.
///
/// # Examples
///
/// ```
/// use u_delivery::transition::Combinations;
///
/// let all: Vec<_> = Combinations::new(4, 2).collect();
/// assert_eq!(all.len(), 6);
/// assert_eq!(all[0], vec![0, 1]);
/// assert_eq!(all[5], vec![2, 3]);
/// ```
#[derive(Debug, Clone)]
pub struct Combinations {
    indices: Vec<usize>,
    n: usize,
    first: bool,
    done: bool,
}

impl Combinations {
    /// Creates the iterator; yields nothing if `r > n`.
    pub fn new(n: usize, r: usize) -> Self {
        Self {
            indices: (0..r).collect(),
            n,
            first: true,
            done: r > n,
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.done {
            return None;
        }
        if self.first {
            self.first = false;
            return Some(self.indices.clone());
        }

        let r = self.indices.len();
        // Rightmost index that can still advance.
        let Some(i) = (0..r).rev().find(|&i| self.indices[i] < self.n - r + i) else {
            self.done = true;
            return None;
        };
        self.indices[i] += 1;
        for j in (i + 1)..r {
            self.indices[j] = self.indices[j - 1] + 1;
        }
        Some(self.indices.clone())
    }
}

/// All ordered `r`-element arrangements of `0..n` in lexicographic order.
///
/// # Examples
///
/// ```
/// use u_delivery::transition::Permutations;
///
/// let all: Vec<_> = Permutations::new(3, 2).collect();
/// assert_eq!(all, vec![
///     vec![0, 1], vec![0, 2], vec![1, 0],
///     vec![1, 2], vec![2, 0], vec![2, 1],
/// ]);
/// ```
#[derive(Debug, Clone)]
pub struct Permutations {
    indices: Vec<usize>,
    cycles: Vec<usize>,
    r: usize,
    first: bool,
    done: bool,
}

impl Permutations {
    /// Creates the iterator; yields nothing if `r > n`.
    pub fn new(n: usize, r: usize) -> Self {
        Self {
            indices: (0..n).collect(),
            cycles: (0..r.min(n)).map(|i| n - i).collect(),
            r,
            first: true,
            done: r > n,
        }
    }
}

impl Iterator for Permutations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.done {
            return None;
        }
        if self.first {
            self.first = false;
            return Some(self.indices[..self.r].to_vec());
        }

        let n = self.indices.len();
        for i in (0..self.r).rev() {
            self.cycles[i] -= 1;
            if self.cycles[i] == 0 {
                self.indices[i..].rotate_left(1);
                self.cycles[i] = n - i;
            } else {
                let j = self.cycles[i];
                self.indices.swap(i, n - j);
                return Some(self.indices[..self.r].to_vec());
            }
        }
        self.done = true;
        None
    }
}
