use nalgebra::Matrix3;
use ndarray::{ArrayBase, Data, Ix2};

/// Determinant of a 3x3 matrix.
pub fn det3<S: Data<Elem = f64>>(m: &ArrayBase<S, Ix2>) -> f64 {
    m[[0, 0]] * (m[[1, 1]] * m[[2, 2]] - m[[1, 2]] * m[[2, 1]])
        - m[[0, 1]] * (m[[1, 0]] * m[[2, 2]] - m[[1, 2]] * m[[2, 0]])
        + m[[0, 2]] * (m[[1, 0]] * m[[2, 1]] - m[[1, 1]] * m[[2, 0]])
}

/// Copies a 3x3 `ndarray` matrix into a `nalgebra` [`Matrix3`].
pub fn matrix3<S: Data<Elem = f64>>(m: &ArrayBase<S, Ix2>) -> Matrix3<f64> {
    Matrix3::from_fn(|i, j| m[[i, j]])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use nalgebra::Vector3;
    use ndarray::{Array2, arr2};

    #[test]
    fn test_det3() {
        assert_abs_diff_eq!(det3(&Array2::<f64>::eye(3)), 1.0, epsilon = 1e-12);
        let m = arr2(&[[2.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
        assert_abs_diff_eq!(det3(&m), 2.0, epsilon = 1e-12);
        let m = arr2(&[[1.0, 1.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
        assert_abs_diff_eq!(det3(&m), 1.0, epsilon = 1e-12);
        let m = arr2(&[[0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]]);
        assert_abs_diff_eq!(det3(&m), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_matrix3() {
        let m = arr2(&[[0.0, 2.0, 1.0], [1.0, 1.0, 0.0], [3.0, 0.0, 1.0]]);
        let n = matrix3(&m);
        assert_eq!(n[(0, 1)], 2.0);
        assert_eq!(n[(2, 0)], 3.0);
        assert_abs_diff_eq!(n.determinant(), det3(&m), epsilon = 1e-12);
        let x = Vector3::new(0.25, -0.5, 1.5);
        let y = n.lu().solve(&(n * x)).unwrap();
        for i in 0..3 {
            assert_abs_diff_eq!(y[i], x[i], epsilon = 1e-12);
        }
        let singular = arr2(&[[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [0.0, 0.0, 1.0]]);
        assert!(matrix3(&singular).lu().solve(&x).is_none());
    }
}
