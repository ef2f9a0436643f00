pub use crate::{
    alloc::{AllocError, UPLOAD_ALIGN},
    collections::{AlignedArray, ReserveStrategy, DoubleOrMinReserveStrategy, Pow2ReserveStrategy},
};
