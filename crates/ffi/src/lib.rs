//! C ABI for the volume calculator
//!
//! Every fallible function returns a [`VolumeCalcErrorCode`] (0 = success) and
//! writes its result through an out-pointer. The message for the last failure
//! on the calling thread is available from `volume_calc_get_last_error`.
//!
//! Handles are immutable once created, so they can be queried from any thread
//! without locking. The C header is generated into `VolumeCalcFFI.h` at build
//! time.

mod error;
mod helpers;
mod instance;
mod queries;

pub use error::{volume_calc_get_last_error, volume_calc_get_last_error_code, VolumeCalcErrorCode};
pub use instance::{
    volume_calc_destroy, volume_calc_new, volume_calc_new_from_array, VolumeHandle, VolumeUnit,
};
pub use queries::{
    volume_calc_cubic, volume_calc_dimension, volume_calc_floor_meters, volume_calc_format,
    volume_calc_loading_meters, volume_calc_string_free, volume_calc_summary, VolumeAxis,
    VolumeSummary, VOLUME_CALC_MAX_DECIMALS,
};
