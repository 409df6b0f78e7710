use crate::{Hopping, Model};
use ndarray::*;
use serde::{Deserialize, Serialize};

/// The size of a model as reported by [`Model::size`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Size {
    /// Number of orbitals.
    pub orbitals: usize,
    /// Number of stored hopping terms.
    pub hop: usize,
    /// Number of occupied states.
    pub occ: usize,
}

impl Model {
    /// Number of orbitals.
    #[inline(always)]
    pub fn norb(&self) -> usize {
        self.on_site.len()
    }
    /// Number of stored hopping terms, Hermitian partners included.
    #[inline(always)]
    pub fn nhop(&self) -> usize {
        self.hop.len()
    }
    /// Number of occupied states.
    #[inline(always)]
    pub fn occ(&self) -> usize {
        self.occ
    }
    /// On-site energies, one per orbital.
    #[inline(always)]
    pub fn on_site(&self) -> ArrayView1<'_, f64> {
        self.on_site.view()
    }
    /// Orbital positions in reduced coordinates, one row per orbital.
    #[inline(always)]
    pub fn orb(&self) -> ArrayView2<'_, f64> {
        self.orb.view()
    }
    /// The unit cell with the lattice vectors as columns, `None` if undefined.
    #[inline(always)]
    pub fn uc(&self) -> Option<ArrayView2<'_, f64>> {
        self.uc.as_ref().map(|uc| uc.view())
    }
    /// All hopping terms in insertion order.
    #[inline(always)]
    pub fn hoppings(&self) -> &[Hopping] {
        &self.hop
    }
    /// Orbital, hopping and occupation counts.
    pub fn size(&self) -> Size {
        Size {
            orbitals: self.norb(),
            hop: self.nhop(),
            occ: self.occ,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn accessors() {
        let pos = arr2(&[[0.0, 0.0, 0.0], [0.5, 0.5, 0.0], [0.5, 0.0, 0.5]]);
        let uc = arr2(&[[2.0, 0.0, 0.0], [0.0, 2.0, 0.0], [0.0, 0.0, 3.0]]);
        let model = Model::tb_model(
            vec![1.0, 2.0, 3.0],
            vec![Hopping::new(0, 1, [0, 0, 1], 0.3)],
            Some(pos.clone()),
            None,
            true,
            Some(uc.clone()),
        )
        .unwrap();
        assert_eq!(model.norb(), 3);
        assert_eq!(model.occ(), 1);
        assert_eq!(model.orb(), pos);
        assert_eq!(model.uc(), Some(uc.view()));
        assert_eq!(model.on_site(), arr1(&[1.0, 2.0, 3.0]));
        assert_eq!(model.hoppings()[1], Hopping::new(1, 0, [0, 0, -1], 0.3));
        assert_eq!(
            model.size(),
            Size {
                orbitals: 3,
                hop: 2,
                occ: 1
            }
        );
    }

    #[test]
    fn serde_round_trip() {
        let model = Model::tb_model(
            vec![0.1, -0.1],
            vec![Hopping::new(0, 1, [1, 0, 0], 0.4)],
            None,
            None,
            true,
            None,
        )
        .unwrap();
        let k = arr1(&[0.3, 0.1, 0.0]);
        let before = model.hamilton(&k).unwrap();
        let text = serde_json::to_string(&model).unwrap();
        let back: Model = serde_json::from_str(&text).unwrap();
        assert_eq!(back.size(), model.size());
        assert_eq!(back.hoppings(), model.hoppings());
        let after = back.hamilton(&k).unwrap();
        for (a, b) in after.iter().zip(before.iter()) {
            assert_abs_diff_eq!(a.re, b.re, epsilon = 1e-12);
            assert_abs_diff_eq!(a.im, b.im, epsilon = 1e-12);
        }
    }
}
