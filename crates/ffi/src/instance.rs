use std::ptr;

use volume_calc_core::{DimensionCollection, DimensionInput, LengthUnit, Volume};

use crate::error::{DefaultVolumeCalcError, VolumeCalcErrorCode};
use crate::helpers::{track_error, track_result};

/// Length unit selector for C callers.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeUnit {
    Centimeters = 0,
    Decimeters = 1,
    Meters = 2,
}

impl From<VolumeUnit> for LengthUnit {
    fn from(unit: VolumeUnit) -> Self {
        match unit {
            VolumeUnit::Centimeters => LengthUnit::Centimeters,
            VolumeUnit::Decimeters => LengthUnit::Decimeters,
            VolumeUnit::Meters => LengthUnit::Meters,
        }
    }
}

/// Opaque handle to a validated box volume.
///
/// The wrapped volume is immutable, so a handle may be read from any number of
/// threads at once. It must be released exactly once with `volume_calc_destroy`.
pub struct VolumeHandle {
    pub(crate) volume: Volume,
}

impl VolumeHandle {
    pub(crate) fn new(
        input: &DimensionInput,
        unit: VolumeUnit,
    ) -> Result<Self, DefaultVolumeCalcError> {
        let volume = Volume::from_input(input, unit.into())?;
        Ok(Self { volume })
    }
}

/// Store a freshly built handle in `out_handle`, or null it on failure.
///
/// # Safety
/// `out_handle` must be non-null and writable.
unsafe fn publish(
    result: Result<VolumeHandle, DefaultVolumeCalcError>,
    out_handle: *mut *mut VolumeHandle,
) -> VolumeCalcErrorCode {
    match track_result(result) {
        Ok(handle) => {
            unsafe {
                *out_handle = Box::into_raw(Box::new(handle));
            }
            VolumeCalcErrorCode::Ok
        }
        Err(code) => {
            unsafe {
                // Set to null on error (per documentation contract)
                *out_handle = ptr::null_mut();
            }
            code
        }
    }
}

/// Create a volume from three named dimensions in `unit`.
///
/// Returns
/// - `VolumeCalcErrorCode::Ok` (0): success, `out_handle` contains a valid pointer
/// - `VolumeCalcErrorCode::NullPointer`: `out_handle` is null
/// - `VolumeCalcErrorCode::NonPositiveDimension`: any dimension is not a positive finite number
///
/// Call `volume_calc_get_last_error()` for the message.
///
/// # Safety
///
/// - `out_handle` must be a valid, non-null pointer to writable memory.
/// - The caller owns the returned handle and MUST call `volume_calc_destroy` exactly once.
///
/// Example (C)
/// ```c
/// VolumeHandle* pallet = NULL;
/// if (volume_calc_new(120.0, 80.0, 100.0, Centimeters, &pallet) != Ok) {
///     fprintf(stderr, "%s\n", volume_calc_get_last_error());
///     return;
/// }
/// double m3 = 0.0;
/// volume_calc_cubic(pallet, Meters, &m3); // 0.96
/// volume_calc_destroy(pallet);
/// ```
#[no_mangle]
pub unsafe extern "C" fn volume_calc_new(
    length: f64,
    width: f64,
    height: f64,
    unit: VolumeUnit,
    out_handle: *mut *mut VolumeHandle,
) -> VolumeCalcErrorCode {
    if out_handle.is_null() {
        return track_error(&DefaultVolumeCalcError::null_pointer("out_handle"));
    }

    let input = DimensionInput::Collection(DimensionCollection::from([length, width, height]));
    unsafe { publish(VolumeHandle::new(&input, unit), out_handle) }
}

/// Create a volume from a positional `[length, width, height]` array.
///
/// `values_len` must be 3; any other count fails with
/// `VolumeCalcErrorCode::ArrayShape` and the received count in the message.
///
/// # Safety
///
/// - `values` must point to `values_len` readable `double`s (it may be null only when
///   `values_len` is 0).
/// - `out_handle` must be a valid, non-null pointer to writable memory.
/// - The caller owns the returned handle and MUST call `volume_calc_destroy` exactly once.
#[no_mangle]
pub unsafe extern "C" fn volume_calc_new_from_array(
    values: *const f64,
    values_len: usize,
    unit: VolumeUnit,
    out_handle: *mut *mut VolumeHandle,
) -> VolumeCalcErrorCode {
    if out_handle.is_null() {
        return track_error(&DefaultVolumeCalcError::null_pointer("out_handle"));
    }
    if values.is_null() && values_len > 0 {
        unsafe {
            *out_handle = ptr::null_mut();
        }
        return track_error(&DefaultVolumeCalcError::null_pointer("values"));
    }

    let slice: &[f64] = if values_len == 0 {
        &[]
    } else {
        // SAFETY: non-null and caller guarantees `values_len` readable elements
        unsafe { std::slice::from_raw_parts(values, values_len) }
    };
    let input = DimensionInput::Collection(DimensionCollection::from(slice));
    unsafe { publish(VolumeHandle::new(&input, unit), out_handle) }
}

/// Destroys a handle previously created by `volume_calc_new` or `volume_calc_new_from_array`.
///
/// If `handle` is null, this function is a no-op.
///
/// # Safety
/// - The pointer MUST have been created by this library and not freed already.
/// - After calling this function, the caller must not use the pointer again.
#[no_mangle]
pub unsafe extern "C" fn volume_calc_destroy(handle: *mut VolumeHandle) {
    if handle.is_null() {
        return;
    }

    // SAFETY: created by `Box::into_raw` in `publish` and not freed yet
    unsafe {
        drop(Box::from_raw(handle));
    }
}
