use crate::primitive_ops::PrimitiveOps;

// Inherent methods are called in path form: with `&self` receivers, plain
// `self.exp()` resolves to the trait method being defined, not to `f64::exp`.

impl PrimitiveOps for f64 {
    fn neg(&self) -> Self {
        -self
    }

    fn recip(&self) -> Self {
        f64::recip(*self)
    }

    fn exp(&self) -> Self {
        f64::exp(*self)
    }

    fn log(&self) -> Self {
        f64::log(*self, std::f64::consts::E)
    }

    fn sqrt(&self) -> Self {
        f64::sqrt(*self)
    }

    fn square(&self) -> Self {
        self * self
    }

    fn tanh(&self) -> Self {
        f64::tanh(*self)
    }

    fn atanh(&self) -> Self {
        f64::atanh(*self)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn powi(&self, exponent: i64) -> Self {
        f64::powi(*self, exponent as i32)
    }

    fn add(&self, rhs: &Self) -> Self {
        self + rhs
    }

    fn sub(&self, rhs: &Self) -> Self {
        self - rhs
    }

    fn mul(&self, rhs: &Self) -> Self {
        self * rhs
    }

    fn div(&self, rhs: &Self) -> Self {
        self / rhs
    }

    fn pow(&self, rhs: &Self) -> Self {
        f64::powf(*self, *rhs)
    }
}

impl PrimitiveOps for f32 {
    fn neg(&self) -> Self {
        -self
    }

    fn recip(&self) -> Self {
        f32::recip(*self)
    }

    fn exp(&self) -> Self {
        f32::exp(*self)
    }

    fn log(&self) -> Self {
        f32::log(*self, std::f32::consts::E)
    }

    fn sqrt(&self) -> Self {
        f32::sqrt(*self)
    }

    fn square(&self) -> Self {
        self * self
    }

    fn tanh(&self) -> Self {
        f32::tanh(*self)
    }

    fn atanh(&self) -> Self {
        f32::atanh(*self)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn powi(&self, exponent: i64) -> Self {
        f32::powi(*self, exponent as i32)
    }

    fn add(&self, rhs: &Self) -> Self {
        self + rhs
    }

    fn sub(&self, rhs: &Self) -> Self {
        self - rhs
    }

    fn mul(&self, rhs: &Self) -> Self {
        self * rhs
    }

    fn div(&self, rhs: &Self) -> Self {
        self / rhs
    }

    fn pow(&self, rhs: &Self) -> Self {
        f32::powf(*self, *rhs)
    }
}
