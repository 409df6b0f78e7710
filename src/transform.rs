//! 这个模块从一个模型构造新的模型: 扩胞 (supercell), 时间反演配对 (trs), 以及更换原胞 (change_uc).
//! 所有的函数都返回一个新的 Model, 不会改变原来的模型.
use crate::error::{Result, TbError};
use crate::math::{det3, matrix3};
use crate::utils::{edge_detect_pos, pos_to_idx};
use crate::{Hopping, Model};
use log::{debug, warn};
use nalgebra::Vector3;
use ndarray::concatenate;
use ndarray::prelude::*;
use ndarray::*;

/// Extra on-site energy for the orbitals of one sub-cell of a supercell.
///
/// The three arguments are `[bottom, top]` flags telling whether the sub-cell touches the
/// lower and upper face of the supercell along x, y and z. The returned vector must have
/// one entry per orbital of the original model.
pub type Passivation<'a> = &'a dyn Fn([bool; 2], [bool; 2], [bool; 2]) -> Array1<f64>;

/// Allowed deviation of `det(uc)` from one in [`Model::change_uc`].
pub const DET_TOL: f64 = 1e-8;

impl Model {
    /// 构造一个 dim[0]$\times$dim[1]$\times$dim[2] 的超胞.
    ///
    /// - dim: the number of unit cells along each lattice vector
    ///
    /// - periodic: if `false` along a direction, the hoppings crossing the supercell border in that direction are cut
    ///
    /// - passivation: extra on-site energies for the surface cells, see [`Passivation`]
    ///
    /// The orbital $n$ of the sub-cell $(i,j,k)$ gets the index $((i\cdot d_y+j)\cdot d_z+k)\cdot$norb$+n$.
    ///
    /// The new occupation is `occ * (dim[0] + dim[1] + dim[2])`, a warning is logged
    /// when it differs from `occ * dim[0] * dim[1] * dim[2]`.
    #[allow(non_snake_case)]
    pub fn supercell(
        &self,
        dim: [usize; 3],
        periodic: [bool; 3],
        passivation: Option<Passivation<'_>>,
    ) -> Result<Model> {
        if let Some(&d) = dim.iter().find(|&&d| d == 0) {
            return Err(TbError::InvalidSupercellSize(d));
        }
        let norb = self.norb();
        let ncell: usize = dim.iter().product();
        let new_norb = norb * ncell;
        let new_occ = dim.iter().sum::<usize>() * self.occ;
        if new_occ != ncell * self.occ {
            warn!(
                "supercell {:?}: occupation set to {} (occ * sum(dim)), a filled supercell would have {}",
                dim,
                new_occ,
                ncell * self.occ
            );
        }
        let dim_f = arr1(&[dim[0] as f64, dim[1] as f64, dim[2] as f64]);
        let new_uc = self.uc.as_ref().map(|uc| uc * &dim_f);
        let reduced_orb = &self.orb / &dim_f;

        let mut new_orb = Array2::<f64>::zeros((new_norb, 3));
        let mut new_on_site = Array1::<f64>::zeros(new_norb);
        let mut new_hop: Vec<Hopping> = Vec::with_capacity(self.hop.len() * ncell);
        for i in 0..dim[0] {
            for j in 0..dim[1] {
                for k in 0..dim[2] {
                    let cell = [i, j, k];
                    let start = pos_to_idx(cell, dim) * norb;
                    let offset = arr1(&[i as f64, j as f64, k as f64]) / &dim_f;
                    new_orb
                        .slice_mut(s![start..start + norb, ..])
                        .assign(&(&reduced_orb + &offset));

                    let mut on_site = self.on_site.to_owned();
                    if let Some(passivation) = passivation {
                        let [x, y, z] = edge_detect_pos(cell, dim);
                        let extra = passivation(x, y, z);
                        if extra.len() != norb {
                            return Err(TbError::DimensionMismatch {
                                context: "passivation".to_string(),
                                expected: norb,
                                found: extra.len(),
                            });
                        }
                        on_site += &extra;
                    }
                    new_on_site.slice_mut(s![start..start + norb]).assign(&on_site);

                    'hop: for h in self.hop.iter() {
                        let mut cell1 = [0usize; 3];
                        let mut R = [0isize; 3];
                        for a in 0..3 {
                            let full = cell[a] as isize + h.R[a];
                            let d = dim[a] as isize;
                            if !periodic[a] && (full < 0 || full >= d) {
                                continue 'hop;
                            }
                            R[a] = full.div_euclid(d);
                            cell1[a] = full.rem_euclid(d) as usize;
                        }
                        new_hop.push(Hopping {
                            ind_i: start + h.ind_i,
                            ind_j: pos_to_idx(cell1, dim) * norb + h.ind_j,
                            R,
                            t: h.t,
                        });
                    }
                }
            }
        }
        debug!(
            "supercell {:?} (periodic {:?}): {} orbitals, {} hoppings",
            dim,
            periodic,
            new_norb,
            new_hop.len()
        );
        Ok(Model::from_parts(new_on_site, new_orb, new_uc, new_hop, new_occ))
    }

    /// 构造模型和它的时间反演像的直和.
    ///
    /// The orbitals, positions and on-site energies are doubled, `occ` is doubled, and for
    /// every hopping $(i, j, \bm R, t)$ the partner $(j+$norb$, i+$norb$, -\bm R, t)$ is added.
    pub fn trs(&self) -> Model {
        let norb = self.norb();
        let new_orb = concatenate![Axis(0), self.orb, self.orb];
        let new_on_site = concatenate![Axis(0), self.on_site, self.on_site];
        let partner = self.hop.iter().map(|h| Hopping {
            ind_i: h.ind_j + norb,
            ind_j: h.ind_i + norb,
            R: [-h.R[0], -h.R[1], -h.R[2]],
            t: h.t,
        });
        let new_hop: Vec<Hopping> = self.hop.iter().copied().chain(partner).collect();
        debug!("trs: {} orbitals, {} hoppings", 2 * norb, new_hop.len());
        Model::from_parts(
            new_on_site,
            new_orb,
            self.uc.clone(),
            new_hop,
            self.occ * 2,
        )
    }

    /// 更换原胞. `uc` 的列是新的晶格矢量, 用旧的晶格矢量表示.
    ///
    /// The volume and the handedness of the cell must be kept, i.e. $\det U=1$ (within [`DET_TOL`]).
    /// Every orbital is mapped back into the new home cell and the hoppings are shifted by the
    /// lattice vector the orbitals moved by. The lattice vectors $\bm R$ themselves are kept as
    /// they are.
    #[allow(non_snake_case)]
    pub fn change_uc<S: Data<Elem = f64>>(&self, uc: &ArrayBase<S, Ix2>) -> Result<Model> {
        if uc.shape() != [3, 3] {
            return Err(TbError::Configuration(format!(
                "uc must be a 3x3 matrix, got {:?}",
                uc.shape()
            )));
        }
        let det = det3(uc);
        if !det.is_finite() || (det - 1.0).abs() > DET_TOL {
            return Err(TbError::Configuration(format!(
                "The determinant of uc is {}, but should be 1",
                det
            )));
        }
        let new_uc = self.uc.as_ref().map(|old| old.dot(uc));

        let norb = self.norb();
        let mut new_orb = Array2::<f64>::zeros((norb, 3));
        let mut pos_offset: Vec<[isize; 3]> = Vec::with_capacity(norb);
        let lu = matrix3(uc).lu();
        for (mut new_pos, pos) in new_orb.outer_iter_mut().zip(self.orb.outer_iter()) {
            let full_pos = lu
                .solve(&Vector3::new(pos[0], pos[1], pos[2]))
                .ok_or_else(|| TbError::Configuration("uc is singular".to_string()))?;
            let mut offset = [0isize; 3];
            for a in 0..3 {
                let f = full_pos[a].floor();
                offset[a] = f as isize;
                new_pos[a] = full_pos[a] - f;
            }
            pos_offset.push(offset);
        }

        let mut new_hop: Vec<Hopping> = Vec::with_capacity(self.hop.len());
        for h in self.hop.iter() {
            let (Some(o0), Some(o1)) = (pos_offset.get(h.ind_i), pos_offset.get(h.ind_j)) else {
                return Err(TbError::OrbitalIndexOutOfRange {
                    index: h.ind_i.max(h.ind_j),
                    norb,
                });
            };
            let mut R = h.R;
            for a in 0..3 {
                R[a] += o1[a] - o0[a];
            }
            new_hop.push(Hopping { R, ..*h });
        }
        debug!("change_uc: det(uc) = {}", det);
        Ok(Model::from_parts(
            self.on_site.clone(),
            new_orb,
            new_uc,
            new_hop,
            self.occ,
        ))
    }
}
