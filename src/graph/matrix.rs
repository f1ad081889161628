//! Dense distance matrix.

/// A dense n×n cost matrix stored in row-major order.
///
/// Used both for the full-map all-pairs costs and for the reduced map over
/// important vertices.
///
/// # Examples
///
/// ```
/// use u_delivery::graph::DistanceMatrix;
///
/// let mut dm = DistanceMatrix::filled(3, f64::INFINITY);
/// dm.set(0, 1, 5.0);
/// assert_eq!(dm.get(0, 1), 5.0);
/// assert!(dm.get(1, 2).is_infinite());
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self::filled(size, 0.0)
    }

    /// Creates a matrix with every off-diagonal entry set to `value` and a
    /// zero diagonal.
    pub fn filled(size: usize, value: f64) -> Self {
        let mut data = vec![value; size * size];
        for i in 0..size {
            data[i * size + i] = 0.0;
        }
        Self { data, size }
    }

    /// Returns the cost from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the cost from `from` to `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    ///
    /// Infinite entries compare equal to each other.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                let (a, b) = (self.get(i, j), self.get(j, i));
                if a == b {
                    continue;
                }
                if (a - b).abs() > tol {
                    return false;
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filled_has_zero_diagonal() {
        let dm = DistanceMatrix::filled(3, f64::INFINITY);
        assert_eq!(dm.get(1, 1), 0.0);
        assert!(dm.get(0, 2).is_infinite());
        assert!(dm.is_symmetric(1e-10));
    }

    #[test]
    fn test_set_is_directional() {
        let mut dm = DistanceMatrix::new(3);
        dm.set(2, 0, 7.0);
        assert_eq!(dm.get(2, 0), 7.0);
        assert_eq!(dm.get(0, 2), 0.0);
    }

    #[test]
    fn test_asymmetric_matrix() {
        let mut dm = DistanceMatrix::new(2);
        dm.set(0, 1, 10.0);
        dm.set(1, 0, 15.0);
        assert!(!dm.is_symmetric(1e-10));
    }
}
