//! 求解能带, 需要打开一个 LAPACK 后端 (openblas-static, netlib-system, intel-mkl-static 等 feature).
use crate::Model;
use crate::error::{Result, TbError};
use ndarray::prelude::*;
use ndarray::*;
use ndarray_linalg::{EigValsh, UPLO};
use rayon::prelude::*;

impl Model {
    /// 求解单个k点的能带值, 从小到大排列
    #[inline(always)]
    pub fn solve_band_onek<S: Data<Elem = f64>>(&self, kvec: &ArrayBase<S, Ix1>) -> Result<Array1<f64>> {
        let hamk = self.hamilton(kvec)?;
        Ok(hamk.eigvalsh(UPLO::Lower)?)
    }

    /// 并行求解多个k点的能带值, 每一行是一个 k 点.
    pub fn solve_band_all<S: Data<Elem = f64>>(&self, kvec: &ArrayBase<S, Ix2>) -> Result<Array2<f64>> {
        if kvec.ncols() != 3 {
            return Err(TbError::DimensionMismatch {
                context: "k-vector".to_string(),
                expected: 3,
                found: kvec.ncols(),
            });
        }
        let bands: Vec<Array1<f64>> = kvec
            .outer_iter()
            .into_par_iter()
            .map(|k| self.solve_band_onek(&k))
            .collect::<Result<Vec<_>>>()?;
        let mut band = Array2::<f64>::zeros((kvec.nrows(), self.norb()));
        for (mut row, eval) in band.outer_iter_mut().zip(bands.iter()) {
            row.assign(eval);
        }
        Ok(band)
    }

    /// The direct gap between the highest occupied and the lowest unoccupied band at `kvec`,
    /// `None` if all or no states are occupied.
    pub fn gap_onek<S: Data<Elem = f64>>(&self, kvec: &ArrayBase<S, Ix1>) -> Result<Option<f64>> {
        let occ = self.occ();
        if occ == 0 || occ >= self.norb() {
            return Ok(None);
        }
        let eval = self.solve_band_onek(kvec)?;
        Ok(Some(eval[occ] - eval[occ - 1]))
    }
}
