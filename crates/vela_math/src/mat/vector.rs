use crate::*;

macro_rules! vector_common {
    {$n:literal; $($comp:ident, $set:ident, $unit:ident => $idx:literal),*} => {
        impl<T: Copy> Vector<T, $n> {
            /// Create a new column vector
            #[inline(always)]
            #[must_use]
            pub const fn new($($comp: T),*) -> Self {
                Self::from_rows([$([$comp]),*])
            }

            /// Create a column vector from an array
            #[inline(always)]
            #[must_use]
            pub const fn from_array(arr: [T; $n]) -> Self {
                Self::from_rows([$([arr[$idx]]),*])
            }

            /// Get the components of the vector as an array
            #[inline(always)]
            #[must_use]
            pub fn to_array(self) -> [T; $n] {
                [$(self[$idx]),*]
            }

            $(
                #[inline(always)]
                #[must_use]
                pub fn $comp(&self) -> T {
                    self[$idx]
                }

                #[inline(always)]
                pub fn $set(&mut self, val: T) {
                    self[$idx] = val;
                }
            )*
        }

        impl<T: Copy> RowVector<T, $n> {
            /// Create a new row vector
            #[inline(always)]
            #[must_use]
            pub const fn new($($comp: T),*) -> Self {
                Self::from_rows([[$($comp),*]])
            }

            /// Create a row vector from an array
            #[inline(always)]
            #[must_use]
            pub const fn from_array(arr: [T; $n]) -> Self {
                Self::from_rows([arr])
            }

            /// Get the components of the vector as an array
            #[inline(always)]
            #[must_use]
            pub fn to_array(self) -> [T; $n] {
                [$(self[$idx]),*]
            }

            $(
                #[inline(always)]
                #[must_use]
                pub fn $comp(&self) -> T {
                    self[$idx]
                }

                #[inline(always)]
                pub fn $set(&mut self, val: T) {
                    self[$idx] = val;
                }
            )*
        }

        impl<T: Numeric> Vector<T, $n> {
            $(
                /// Unit vector along this axis
                #[inline]
                #[must_use]
                pub fn $unit() -> Self {
                    let mut res = Self::zero();
                    res[$idx] = T::one();
                    res
                }
            )*
        }
    };
}
vector_common!{ 2; x, set_x, unit_x => 0, y, set_y, unit_y => 1 }
vector_common!{ 3; x, set_x, unit_x => 0, y, set_y, unit_y => 1, z, set_z, unit_z => 2 }
vector_common!{ 4; x, set_x, unit_x => 0, y, set_y, unit_y => 1, z, set_z, unit_z => 2, w, set_w, unit_w => 3 }

impl<T: Numeric> Vec3<T> {
    /// Calculate the cross product of 2 vectors
    #[inline]
    #[must_use]
    pub fn cross(self, rhs: Self) -> Self {
        Self::new(self.y() * rhs.z() - self.z() * rhs.y(),
                  self.z() * rhs.x() - self.x() * rhs.z(),
                  self.x() * rhs.y() - self.y() * rhs.x())
    }
}

impl<T: Numeric> RowVec3<T> {
    /// Calculate the cross product of 2 vectors
    #[inline]
    #[must_use]
    pub fn cross(self, rhs: Self) -> Self {
        self.transpose().cross(rhs.transpose()).transpose()
    }
}

//------------------------------------------------------------------------------------------------------------------------------

macro_rules! vector_resize {
    {$($n:literal => $larger:literal),*} => {
        $(
            impl<T: Copy> Vector<T, $n> {
                /// Append a component to the vector
                #[inline]
                #[must_use]
                pub fn extend(self, val: T) -> Vector<T, $larger> {
                    Vector::from_fn(|row, _| if row < $n { self[row] } else { val })
                }
            }

            impl<T: Copy> Vector<T, $larger> {
                /// Drop the last component of the vector
                #[inline]
                #[must_use]
                pub fn truncate(self) -> Vector<T, $n> {
                    Vector::from_fn(|row, _| self[row])
                }
            }
        )*
    };
}
vector_resize!{ 2 => 3, 3 => 4 }

/// Build a larger vector by appending another vector
pub trait Concat<Rhs> {
    type Output;

    /// Create a vector containing the components of `self` followed by the components of `rhs`
    fn concat(self, rhs: Rhs) -> Self::Output;
}

macro_rules! vector_concat {
    {$($a:literal + $b:literal => $res:literal),*} => {
        $(
            impl<T: Copy> Concat<Vector<T, $b>> for Vector<T, $a> {
                type Output = Vector<T, $res>;

                fn concat(self, rhs: Vector<T, $b>) -> Self::Output {
                    Vector::from_fn(|row, _| if row < $a { self[row] } else { rhs[row - $a] })
                }
            }
        )*
    };
}
vector_concat!{ 1 + 1 => 2, 1 + 2 => 3, 2 + 1 => 3, 1 + 3 => 4, 3 + 1 => 4, 2 + 2 => 4 }
