/// Trait that defines common math constants
pub trait MathConsts {
    /// pi
    const PI : Self;
    /// 2 * pi
    const TWO_PI : Self;
    /// pi / 2
    const HALF_PI : Self;
    /// pi / 4
    const QUARTER_PI : Self;
    /// 1 / pi
    const ONE_OVER_PI : Self;

    /// sqrt(2)
    const ROOT_TWO : Self;
    /// 1 / sqrt(2)
    const ONE_OVER_ROOT_TWO : Self;

    /// Multiplier to convert degrees to radians
    const DEG_TO_RAD : Self;
    /// Multiplier to convert radians to degrees
    const RAD_TO_DEG : Self;
}

macro_rules! impl_math_consts {
    {$ty:ident} => {
        impl MathConsts for $ty {
            const PI                : Self = core::$ty::consts::PI;
            const TWO_PI            : Self = core::$ty::consts::TAU;
            const HALF_PI           : Self = core::$ty::consts::FRAC_PI_2;
            const QUARTER_PI        : Self = core::$ty::consts::FRAC_PI_4;
            const ONE_OVER_PI       : Self = core::$ty::consts::FRAC_1_PI;
            const ROOT_TWO          : Self = core::$ty::consts::SQRT_2;
            const ONE_OVER_ROOT_TWO : Self = core::$ty::consts::FRAC_1_SQRT_2;
            const DEG_TO_RAD        : Self = core::$ty::consts::PI / 180.0;
            const RAD_TO_DEG        : Self = 180.0 / core::$ty::consts::PI;
        }
    };
}
impl_math_consts!{ f32 }
impl_math_consts!{ f64 }
