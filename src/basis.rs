//! 这个 impl 是给 tight-binding 模型提供基础的函数: 构造模型, 添加 hopping, 以及生成 Bloch 哈密顿量.
use crate::error::{Result, TbError};
use crate::generics::ToFloat;
use crate::utils::find_R;
use crate::{Hopping, Model};
use log::debug;
use ndarray::prelude::*;
use ndarray::*;
use num_complex::Complex;
use rayon::prelude::*;
use std::f64::consts::PI;
use std::sync::OnceLock;

/// The Bloch Hamiltonian split into one matrix per distinct lattice vector.
///
/// $$H(\bm k)=D+\sum_{\bm R} H_{\bm R}e^{2\pi i\bm R\cdot\bm k}$$
#[allow(non_snake_case)]
#[derive(Debug, Clone)]
pub struct BlochTerms {
    /// The on-site part $D$.
    pub diag: Array2<Complex<f64>>,
    /// The distinct lattice vectors, one per row.
    pub hamR: Array2<isize>,
    /// $H_{\bm R}$, an n_R$\times$norb$\times$norb tensor in the order of `hamR`.
    pub ham: Array3<Complex<f64>>,
}

impl BlochTerms {
    #[allow(non_snake_case)]
    #[inline(always)]
    pub fn gen_ham<S: Data<Elem = f64>>(&self, kvec: &ArrayBase<S, Ix1>) -> Array2<Complex<f64>> {
        let Us = self
            .hamR
            .mapv(|x| x.to_float())
            .dot(kvec)
            .mapv(|x| Complex::new(0.0, 2.0 * PI * x).exp());
        let Us = Us.insert_axis(Axis(1)).insert_axis(Axis(2));
        let hamk: Array2<Complex<f64>> = (&self.ham * &Us).sum_axis(Axis(0));
        &self.diag + &hamk
    }
}

impl Model {
    /// This function is used to initialize a Model. The variables that need to be input are as follows:
    ///
    /// - on_site: the on-site energies, its length fixes the number of orbitals norb
    ///
    /// - hop: the hopping terms $(i, j, \bm R, t)$
    ///
    /// - pos: the orbital positions in reduced coordinates, an norb$\times$3 matrix. `None` puts every orbital at the origin
    ///
    /// - occ: the number of occupied states. `None` means norb/2
    ///
    /// - add_cc: whether the Hermitian partner $(j, i, -\bm R, t^*)$ of every hopping is added
    ///
    /// - uc: the unit cell with the lattice vectors as columns, can be `None`
    ///
    /// # Examples
    /// ```
    /// use z2tb::{Hopping, Model};
    /// let hop = vec![Hopping::new(0, 1, [0, 0, 0], 1.0)];
    /// let model = Model::tb_model(vec![0.0, 0.0], hop, None, None, true, None).unwrap();
    /// assert_eq!(model.size().hop, 2);
    /// ```
    pub fn tb_model<O, H>(
        on_site: O,
        hop: H,
        pos: Option<Array2<f64>>,
        occ: Option<usize>,
        add_cc: bool,
        uc: Option<Array2<f64>>,
    ) -> Result<Model>
    where
        O: Into<Array1<f64>>,
        H: IntoIterator,
        H::Item: Into<Hopping>,
    {
        let on_site: Array1<f64> = on_site.into();
        let norb = on_site.len();
        let orb = match pos {
            None => Array2::<f64>::zeros((norb, 3)),
            Some(pos) if pos.nrows() == norb && pos.ncols() == 3 => pos,
            Some(pos) => {
                return Err(TbError::Configuration(format!(
                    "invalid length for pos: expected {} positions of length 3, got a {}x{} matrix",
                    norb,
                    pos.nrows(),
                    pos.ncols()
                )));
            }
        };
        if let Some(uc) = uc.as_ref() {
            if uc.shape() != [3, 3] {
                return Err(TbError::Configuration(format!(
                    "the unit cell must be a 3x3 matrix, got {:?}",
                    uc.shape()
                )));
            }
        }
        let mut new_hop: Vec<Hopping> = hop.into_iter().map(Into::into).collect();
        if add_cc {
            let conj: Vec<Hopping> = new_hop.iter().map(Hopping::conj).collect();
            new_hop.extend(conj);
        }
        Ok(Model::from_parts(on_site, orb, uc, new_hop, occ.unwrap_or(norb / 2)))
    }

    /// Assembles a model from already consistent parts, the hoppings are taken as they are.
    pub(crate) fn from_parts(
        on_site: Array1<f64>,
        orb: Array2<f64>,
        uc: Option<Array2<f64>>,
        hop: Vec<Hopping>,
        occ: usize,
    ) -> Model {
        Model {
            on_site,
            orb,
            uc,
            hop,
            occ,
            bloch: OnceLock::new(),
        }
    }

    /// Appends hopping terms. No Hermitian partner is added and the orbital
    /// indices are only checked when the Hamiltonian is built.
    pub fn add_hop<H>(&mut self, hop: H)
    where
        H: IntoIterator,
        H::Item: Into<Hopping>,
    {
        self.hop.extend(hop.into_iter().map(Into::into));
        self.bloch = OnceLock::new();
    }

    /// The cached Bloch terms, built on first use after a change of the hoppings.
    pub fn bloch_terms(&self) -> Result<&BlochTerms> {
        match self.bloch.get() {
            Some(terms) => Ok(terms),
            None => {
                let terms = self.precompute()?;
                Ok(self.bloch.get_or_init(|| terms))
            }
        }
    }

    #[allow(non_snake_case)]
    fn precompute(&self) -> Result<BlochTerms> {
        let norb = self.norb();
        let diag = Array2::from_diag(&self.on_site.mapv(|x| Complex::new(x, 0.0)));
        let mut R_list: Vec<[isize; 3]> = Vec::new();
        for h in self.hop.iter() {
            if !R_list.contains(&h.R) {
                R_list.push(h.R);
            }
        }
        let hamR = Array2::from(R_list);
        let mut ham = Array3::<Complex<f64>>::zeros((hamR.nrows(), norb, norb));
        for h in self.hop.iter() {
            for index in [h.ind_i, h.ind_j] {
                if index >= norb {
                    return Err(TbError::OrbitalIndexOutOfRange { index, norb });
                }
            }
            let Some(r) = find_R(&hamR, &aview1(&h.R)) else {
                return Err(TbError::InternalInvariant(format!(
                    "R={:?} not found in the list of hopping vectors",
                    h.R
                )));
            };
            ham[[r, h.ind_i, h.ind_j]] += h.t;
        }
        debug!(
            "built Bloch terms: {} orbitals, {} hoppings, {} distinct R",
            norb,
            self.hop.len(),
            hamR.nrows()
        );
        Ok(BlochTerms { diag, hamR, ham })
    }

    /// 这个是做傅里叶变换, 将实空间的 hopping 变换到倒空间的哈密顿量
    ///
    /// $$H_{mn}(\bm k)=\delta_{mn}\epsilon_m+\sum_{\bm R}\bra{m\bm 0}\hat H\ket{n\bm R}e^{2\pi i\bm R\cdot\bm k}$$
    ///
    /// `kvec` is given in reduced reciprocal coordinates. The orbital positions do not enter the phase.
    pub fn hamilton<S: Data<Elem = f64>>(
        &self,
        kvec: &ArrayBase<S, Ix1>,
    ) -> Result<Array2<Complex<f64>>> {
        if kvec.len() != 3 {
            return Err(TbError::DimensionMismatch {
                context: "k-vector".to_string(),
                expected: 3,
                found: kvec.len(),
            });
        }
        Ok(self.bloch_terms()?.gen_ham(kvec))
    }

    /// 并行求解多个k点的哈密顿量, 每一行是一个 k 点.
    pub fn hamilton_all<S: Data<Elem = f64>>(
        &self,
        kvec: &ArrayBase<S, Ix2>,
    ) -> Result<Array3<Complex<f64>>> {
        if kvec.ncols() != 3 {
            return Err(TbError::DimensionMismatch {
                context: "k-vector".to_string(),
                expected: 3,
                found: kvec.ncols(),
            });
        }
        let terms = self.bloch_terms()?;
        let norb = self.norb();
        let mut hamk = Array3::<Complex<f64>>::zeros((kvec.nrows(), norb, norb));
        Zip::from(hamk.outer_iter_mut())
            .and(kvec.outer_iter())
            .into_par_iter()
            .for_each(|(mut h, k)| h.assign(&terms.gen_ham(&k)));
        Ok(hamk)
    }

    /// Whether $H(\bm k)$ equals its conjugate transpose within `tol`.
    pub fn is_hermitian<S: Data<Elem = f64>>(&self, kvec: &ArrayBase<S, Ix1>, tol: f64) -> Result<bool> {
        let hamk = self.hamilton(kvec)?;
        let dagger = hamk.t().mapv(|x| x.conj());
        Ok(hamk
            .iter()
            .zip(dagger.iter())
            .all(|(a, b)| (a - b).norm() <= tol))
    }
}
