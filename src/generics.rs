//!这个是给程序提供泛型支持的模块
use num_complex::Complex64;
use num_traits::identities::Zero;

pub trait ToFloat {
    fn to_float(self) -> f64;
}
impl ToFloat for usize {
    fn to_float(self) -> f64 {
        self as f64
    }
}

impl ToFloat for isize {
    fn to_float(self) -> f64 {
        self as f64
    }
}

//这里的trait是为了让 Hopping::new 可以同时接受 f64 和 Complex64
pub trait HopAmplitude: Copy + Clone + Zero {
    fn to_complex(&self) -> Complex64;
}
impl HopAmplitude for f64 {
    fn to_complex(&self) -> Complex64 {
        Complex64::new(*self, 0.0)
    }
}

impl HopAmplitude for Complex64 {
    fn to_complex(&self) -> Complex64 {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn real_amplitude_is_promoted() {
        assert_eq!(0.5_f64.to_complex(), Complex64::new(0.5, 0.0));
        assert_eq!(Complex64::new(0.0, -1.0).to_complex(), Complex64::new(0.0, -1.0));
        assert_eq!(3usize.to_float(), 3.0);
        assert_eq!((-2isize).to_float(), -2.0);
    }
}
