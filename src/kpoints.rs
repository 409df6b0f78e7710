use crate::error::{Result, TbError};
use crate::generics::ToFloat;
use ndarray::{Array2, Axis, arr1};

/// Generates a uniform mesh of $n_x\times n_y\times n_z$ k-points in reduced coordinates.
///
/// Each row is one k-point $(i/n_x, j/n_y, l/n_z)$, the x index runs slowest.
#[inline(always)]
pub fn gen_kmesh(k_mesh: &[usize; 3]) -> Result<Array2<f64>> {
    if k_mesh.contains(&0) {
        return Err(TbError::Configuration(format!(
            "k_mesh {:?} needs at least one k-point along every direction",
            k_mesh
        )));
    }
    let nk: usize = k_mesh.iter().product();
    let mut kvec = Array2::<f64>::zeros((0, 3));
    for i in 0..k_mesh[0] {
        for j in 0..k_mesh[1] {
            for l in 0..k_mesh[2] {
                let k = arr1(&[
                    i.to_float() / k_mesh[0].to_float(),
                    j.to_float() / k_mesh[1].to_float(),
                    l.to_float() / k_mesh[2].to_float(),
                ]);
                kvec.push(Axis(0), k.view()).map_err(|_| {
                    TbError::InternalInvariant("k-point of wrong length".to_string())
                })?;
            }
        }
    }
    debug_assert_eq!(kvec.nrows(), nk);
    Ok(kvec)
}
