use crate::cases::Case;

/// Pairwise case-to-case distances, stored row-major.
///
/// Each pair is computed once and mirrored, so the matrix is exactly symmetric and
/// its diagonal is exactly zero.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    n: usize,
    values: Vec<f64>,
}

impl DistanceMatrix {
    pub fn from_cases(cases: &[Case]) -> Self {
        let n = cases.len();
        let mut values = vec![0.0; n * n];
        for (i, a) in cases.iter().enumerate() {
            for (j, b) in cases.iter().enumerate().skip(i + 1) {
                let d = a.distance_to(b);
                values[i * n + j] = d;
                values[j * n + i] = d;
            }
        }
        DistanceMatrix { n, values }
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.n + j]
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.n..(i + 1) * self.n]
    }

    /// Largest pairwise distance, zero for fewer than two cases.
    pub fn max(&self) -> f64 {
        self.argmax().map(|(i, j)| self.get(i, j)).unwrap_or(0.0)
    }

    /// Index pair of the largest entry.
    ///
    /// Ties resolve to the first maximum in row-major order (lowest row, then lowest
    /// column). The choice carries no epidemiological meaning; it only makes the
    /// selected centre deterministic.
    pub fn argmax(&self) -> Option<(usize, usize)> {
        let mut best: Option<(usize, f64)> = None;
        for (k, &value) in self.values.iter().enumerate() {
            match best {
                Some((_, current)) if value <= current => {}
                _ => best = Some((k, value)),
            }
        }
        best.map(|(k, _)| (k / self.n, k % self.n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Vec<Case> {
        vec![
            Case::new(1.0, 0.0, 0.0),
            Case::new(2.0, 300.0, 0.0),
            Case::new(3.0, 0.0, 400.0),
        ]
    }

    #[test]
    fn test_triangle_distances() {
        let matrix = DistanceMatrix::from_cases(&triangle());
        assert_eq!(matrix.len(), 3);
        assert_eq!(matrix.get(0, 1), 300.0);
        assert_eq!(matrix.get(0, 2), 400.0);
        assert_eq!(matrix.get(1, 2), 500.0);
        assert_eq!(matrix.max(), 500.0);
        assert_eq!(matrix.argmax(), Some((1, 2)));
    }

    #[test]
    fn test_symmetric_with_zero_diagonal() {
        let cases = vec![
            Case::new(1.0, 12.5, -3.0),
            Case::new(2.0, 810.0, 77.7),
            Case::new(3.0, -45.0, 1020.0),
            Case::new(4.0, 333.3, 333.3),
        ];
        let matrix = DistanceMatrix::from_cases(&cases);
        for i in 0..cases.len() {
            assert_eq!(matrix.get(i, i), 0.0);
            for j in 0..cases.len() {
                assert_eq!(matrix.get(i, j), matrix.get(j, i));
                assert!(matrix.get(i, j) >= 0.0);
            }
        }
    }

    #[test]
    fn test_ties_resolve_row_major() {
        // Square corners: both diagonals are the maximum.
        let cases = vec![
            Case::new(1.0, 0.0, 0.0),
            Case::new(2.0, 100.0, 0.0),
            Case::new(3.0, 100.0, 100.0),
            Case::new(4.0, 0.0, 100.0),
        ];
        let matrix = DistanceMatrix::from_cases(&cases);
        assert_eq!(matrix.argmax(), Some((0, 2)));
    }

    #[test]
    fn test_single_and_empty() {
        let single = DistanceMatrix::from_cases(&[Case::new(7.0, 5.0, 5.0)]);
        assert_eq!(single.row(0), &[0.0]);
        assert_eq!(single.max(), 0.0);
        assert_eq!(single.argmax(), Some((0, 0)));

        let empty = DistanceMatrix::from_cases(&[]);
        assert!(empty.is_empty());
        assert_eq!(empty.max(), 0.0);
        assert_eq!(empty.argmax(), None);
    }
}
