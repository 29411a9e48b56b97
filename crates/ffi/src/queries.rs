use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

use volume_calc_core::{format_number, LengthUnit, LoadingParams, NumberFormat, Volume};

use crate::error::{DefaultVolumeCalcError, VolumeCalcErrorCode};
use crate::helpers::{track_error, track_result, write_out};
use crate::instance::{VolumeHandle, VolumeUnit};

/// Which edge of the box a dimension query refers to.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeAxis {
    Length = 0,
    Width = 1,
    Height = 2,
}

#[repr(C)]
/// FFI-friendly snapshot of every measurement derived from a handle.
/// Keep this layout stable for C/C++/C# consumers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeSummary {
    /// Volume in cm³.
    pub cubic_centimeters: f64,

    /// Volume in dm³.
    pub cubic_decimeters: f64,

    /// Volume in m³.
    pub cubic_meters: f64,

    /// Footprint in m².
    pub floor_meters: f64,

    /// Length (m).
    pub length: f64,

    /// Width (m).
    pub width: f64,

    /// Height (m).
    pub height: f64,
}

impl From<&Volume> for VolumeSummary {
    fn from(volume: &Volume) -> Self {
        Self {
            cubic_centimeters: volume.centimeters().value(),
            cubic_decimeters: volume.decimeters().value(),
            cubic_meters: volume.meters().value(),
            floor_meters: volume.floor_meters().value(),
            length: volume.length(LengthUnit::Meters),
            width: volume.width(LengthUnit::Meters),
            height: volume.height(LengthUnit::Meters),
        }
    }
}

/// Borrow the volume behind a handle, reporting null handles.
///
/// # Safety
/// `handle` must be null or a live pointer from `volume_calc_new*`.
unsafe fn volume_from_ptr<'a>(
    handle: *const VolumeHandle,
) -> Result<&'a Volume, VolumeCalcErrorCode> {
    if handle.is_null() {
        return Err(track_error(&DefaultVolumeCalcError::null_pointer("handle")));
    }
    // SAFETY: non-null and caller guarantees it is live
    Ok(unsafe { &(*handle).volume })
}

/// Cubic volume of the box in `unit`³, written to `out_value`.
///
/// # Safety
/// - `handle` must be a live pointer returned by `volume_calc_new*`.
/// - `out_value` must be a valid, non-null pointer to writable memory.
#[no_mangle]
pub unsafe extern "C" fn volume_calc_cubic(
    handle: *const VolumeHandle,
    unit: VolumeUnit,
    out_value: *mut f64,
) -> VolumeCalcErrorCode {
    let volume = match unsafe { volume_from_ptr(handle) } {
        Ok(volume) => volume,
        Err(code) => return code,
    };
    let value = match LengthUnit::from(unit) {
        LengthUnit::Centimeters => volume.centimeters().value(),
        LengthUnit::Decimeters => volume.decimeters().value(),
        LengthUnit::Meters => volume.meters().value(),
    };
    unsafe { write_out(out_value, "out_value", value) }
}

/// Floor area (length × width) in m², written to `out_value`.
///
/// # Safety
/// Same contract as `volume_calc_cubic`.
#[no_mangle]
pub unsafe extern "C" fn volume_calc_floor_meters(
    handle: *const VolumeHandle,
    out_value: *mut f64,
) -> VolumeCalcErrorCode {
    let volume = match unsafe { volume_from_ptr(handle) } {
        Ok(volume) => volume,
        Err(code) => return code,
    };
    unsafe { write_out(out_value, "out_value", volume.floor_meters().value()) }
}

/// One dimension of the box converted to `unit`, written to `out_value`.
///
/// # Safety
/// Same contract as `volume_calc_cubic`.
#[no_mangle]
pub unsafe extern "C" fn volume_calc_dimension(
    handle: *const VolumeHandle,
    axis: VolumeAxis,
    unit: VolumeUnit,
    out_value: *mut f64,
) -> VolumeCalcErrorCode {
    let volume = match unsafe { volume_from_ptr(handle) } {
        Ok(volume) => volume,
        Err(code) => return code,
    };
    let unit = LengthUnit::from(unit);
    let value = match axis {
        VolumeAxis::Length => volume.length(unit),
        VolumeAxis::Width => volume.width(unit),
        VolumeAxis::Height => volume.height(unit),
    };
    unsafe { write_out(out_value, "out_value", value) }
}

/// Loading meters for `quantity` boxes, written to `out_value`.
///
/// Pass `quantity = 1`, `stacking_factor = 1.0`, `truck_width = 2.4` for the defaults.
///
/// Returns
/// - `VolumeCalcErrorCode::InvalidQuantity`: `quantity` is 0
/// - `VolumeCalcErrorCode::InvalidStackingFactor`: `stacking_factor` is not greater than 0
/// - `VolumeCalcErrorCode::InvalidTruckWidth`: `truck_width` is not greater than 0
///
/// # Safety
/// Same contract as `volume_calc_cubic`.
#[no_mangle]
pub unsafe extern "C" fn volume_calc_loading_meters(
    handle: *const VolumeHandle,
    quantity: u32,
    stacking_factor: f64,
    truck_width: f64,
    out_value: *mut f64,
) -> VolumeCalcErrorCode {
    let volume = match unsafe { volume_from_ptr(handle) } {
        Ok(volume) => volume,
        Err(code) => return code,
    };
    let params = LoadingParams::new(quantity, stacking_factor, truck_width);
    let result = volume
        .loading_meters(params)
        .map_err(DefaultVolumeCalcError::from);
    match track_result(result) {
        Ok(ldm) => unsafe { write_out(out_value, "out_value", ldm.value()) },
        Err(code) => code,
    }
}

/// Fill `out_summary` with every derived measurement at once.
///
/// # Safety
/// - `handle` must be a live pointer returned by `volume_calc_new*`.
/// - `out_summary` must be a valid, non-null pointer to writable memory.
#[no_mangle]
pub unsafe extern "C" fn volume_calc_summary(
    handle: *const VolumeHandle,
    out_summary: *mut VolumeSummary,
) -> VolumeCalcErrorCode {
    let volume = match unsafe { volume_from_ptr(handle) } {
        Ok(volume) => volume,
        Err(code) => return code,
    };
    unsafe { write_out(out_summary, "out_summary", VolumeSummary::from(volume)) }
}

/// Upper bound on `decimals` in `volume_calc_format`; an f64 has no
/// significant digits past the 17th.
pub const VOLUME_CALC_MAX_DECIMALS: u32 = 17;

/// Format `value` with `decimals` fixed places and `,` thousands grouping
/// (e.g. `960000.0`, 2 → `"960,000.00"`), rounding half away from zero.
///
/// `decimals` above `VOLUME_CALC_MAX_DECIMALS` (17) is clamped to it.
///
/// Returns an owned C string that MUST be released with `volume_calc_string_free`.
#[no_mangle]
pub extern "C" fn volume_calc_format(value: f64, decimals: u32) -> *mut c_char {
    let decimals = decimals.min(VOLUME_CALC_MAX_DECIMALS) as usize;
    let text = format_number(value, decimals, &NumberFormat::default());
    // Formatted numbers never contain interior NUL bytes
    CString::new(text).map_or(ptr::null_mut(), CString::into_raw)
}

/// Release a string returned by `volume_calc_format`. Null is a no-op.
///
/// # Safety
/// `text` must come from `volume_calc_format` and not have been freed already.
#[no_mangle]
pub unsafe extern "C" fn volume_calc_string_free(text: *mut c_char) {
    if text.is_null() {
        return;
    }
    // SAFETY: produced by `CString::into_raw` in `volume_calc_format`
    unsafe {
        drop(CString::from_raw(text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::{volume_calc_destroy, volume_calc_new};
    use std::ffi::CStr;

    fn pallet() -> *mut VolumeHandle {
        let mut handle = ptr::null_mut();
        let code =
            unsafe { volume_calc_new(120.0, 80.0, 100.0, VolumeUnit::Centimeters, &mut handle) };
        assert_eq!(code, VolumeCalcErrorCode::Ok);
        handle
    }

    #[test]
    fn test_cubic_and_floor() {
        let handle = pallet();
        let mut m3 = 0.0;
        let mut floor = 0.0;
        unsafe {
            assert_eq!(
                volume_calc_cubic(handle, VolumeUnit::Meters, &mut m3),
                VolumeCalcErrorCode::Ok
            );
            assert_eq!(volume_calc_floor_meters(handle, &mut floor), VolumeCalcErrorCode::Ok);
            volume_calc_destroy(handle);
        }
        assert!((m3 - 0.96).abs() < 1e-12);
        assert!((floor - 0.96).abs() < 1e-12);
    }

    #[test]
    fn test_dimension_in_decimeters() {
        let handle = pallet();
        let mut width = 0.0;
        unsafe {
            let code = volume_calc_dimension(
                handle,
                VolumeAxis::Width,
                VolumeUnit::Decimeters,
                &mut width,
            );
            assert_eq!(code, VolumeCalcErrorCode::Ok);
            volume_calc_destroy(handle);
        }
        assert!((width - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_loading_meters_and_errors() {
        let handle = pallet();
        let mut ldm = 0.0;
        unsafe {
            assert_eq!(
                volume_calc_loading_meters(handle, 6, 3.0, 2.5, &mut ldm),
                VolumeCalcErrorCode::Ok
            );
            assert!((ldm - 0.768).abs() < 1e-12);

            assert_eq!(
                volume_calc_loading_meters(handle, 0, 1.0, 2.4, &mut ldm),
                VolumeCalcErrorCode::InvalidQuantity
            );
            assert_eq!(
                volume_calc_loading_meters(handle, 1, 0.0, 2.4, &mut ldm),
                VolumeCalcErrorCode::InvalidStackingFactor
            );
            assert_eq!(
                volume_calc_loading_meters(handle, 1, 1.0, 0.0, &mut ldm),
                VolumeCalcErrorCode::InvalidTruckWidth
            );
            let msg = CStr::from_ptr(crate::error::volume_calc_get_last_error());
            assert!(msg.to_str().unwrap().starts_with("Truck width"));
            volume_calc_destroy(handle);
        }
    }

    #[test]
    fn test_summary() {
        let handle = pallet();
        let mut summary = VolumeSummary {
            cubic_centimeters: 0.0,
            cubic_decimeters: 0.0,
            cubic_meters: 0.0,
            floor_meters: 0.0,
            length: 0.0,
            width: 0.0,
            height: 0.0,
        };
        unsafe {
            assert_eq!(volume_calc_summary(handle, &mut summary), VolumeCalcErrorCode::Ok);
            volume_calc_destroy(handle);
        }
        assert!((summary.cubic_centimeters - 960_000.0).abs() < 1e-6);
        assert!((summary.cubic_decimeters - 960.0).abs() < 1e-9);
        assert!((summary.length - 1.2).abs() < 1e-12);
    }

    #[test]
    fn test_null_handle() {
        let mut value = 0.0;
        let code = unsafe { volume_calc_floor_meters(ptr::null(), &mut value) };
        assert_eq!(code, VolumeCalcErrorCode::NullPointer);
    }

    #[test]
    fn test_format_round_trip_through_c_string() {
        let raw = volume_calc_format(960_000.0, 2);
        assert!(!raw.is_null());
        let text = unsafe { CStr::from_ptr(raw) }.to_str().unwrap().to_owned();
        unsafe { volume_calc_string_free(raw) };
        assert_eq!(text, "960,000.00");
    }

    #[test]
    fn test_format_clamps_decimals() {
        let raw = volume_calc_format(1.5, u32::MAX);
        assert!(!raw.is_null());
        let text = unsafe { CStr::from_ptr(raw) }.to_str().unwrap().to_owned();
        unsafe { volume_calc_string_free(raw) };
        let (_, fraction) = text.split_once('.').unwrap();
        assert_eq!(fraction.len(), VOLUME_CALC_MAX_DECIMALS as usize);
        assert!(text.starts_with("1.5"));
    }
}
