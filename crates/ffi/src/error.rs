use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

use volume_calc_core::VolumeError;

/// Common interface for FFI error types.
///
/// This trait provides a unified way to handle errors across the FFI boundary,
/// allowing both simple error codes and custom error messages.
///
/// # Design
/// - `code()` - Returns the error code to be passed across FFI boundary
/// - `msg()` - Returns the error message for diagnostic purposes
pub(crate) trait VolumeCalcError {
    /// Returns the error code to be returned across the FFI boundary.
    fn code(&self) -> VolumeCalcErrorCode;

    /// Returns the human-readable error message.
    fn msg(&self) -> &str;
}

/// Default implementation of `VolumeCalcError` for FFI error scenarios.
///
/// Wraps a `VolumeCalcErrorCode` together with the message that
/// `volume_calc_get_last_error` hands back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefaultVolumeCalcError {
    code: VolumeCalcErrorCode,
    msg: String,
}

impl DefaultVolumeCalcError {
    /// Create error for null pointer passed where non-null required.
    ///
    /// # Arguments
    /// * `param_name` - The name of the parameter that was null (e.g., `"out_handle"`, `"values"`)
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: VolumeCalcErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }
}

impl From<VolumeError> for DefaultVolumeCalcError {
    fn from(error: VolumeError) -> Self {
        let code = match &error {
            VolumeError::MissingDimensions { .. } => VolumeCalcErrorCode::MissingDimensions,
            VolumeError::ArrayShape { .. } => VolumeCalcErrorCode::ArrayShape,
            VolumeError::ArrayKeys { .. } => VolumeCalcErrorCode::ArrayKeys,
            VolumeError::NonPositiveDimension => VolumeCalcErrorCode::NonPositiveDimension,
            VolumeError::DimensionOutOfRange => VolumeCalcErrorCode::DimensionOutOfRange,
            VolumeError::InvalidQuantity { .. } => VolumeCalcErrorCode::InvalidQuantity,
            VolumeError::InvalidStackingFactor { .. } => VolumeCalcErrorCode::InvalidStackingFactor,
            VolumeError::InvalidTruckWidth { .. } => VolumeCalcErrorCode::InvalidTruckWidth,
        };
        Self {
            code,
            msg: error.to_string(),
        }
    }
}

impl VolumeCalcError for DefaultVolumeCalcError {
    fn code(&self) -> VolumeCalcErrorCode {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

/// FFI error codes returned by volume calculator functions.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeCalcErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Invalid pointer: null pointer passed where non-null required.
    NullPointer = 1,

    /// One or more of length, width, height was not supplied.
    MissingDimensions = 2,

    /// A dimension array did not contain exactly 3 values.
    ArrayShape = 3,

    /// A keyed dimension collection used keys other than length, width, height.
    ArrayKeys = 4,

    /// A dimension was zero, negative, NaN or infinite.
    NonPositiveDimension = 5,

    /// Loading-meter quantity was below 1.
    InvalidQuantity = 6,

    /// Loading-meter stacking factor was not greater than 0.
    InvalidStackingFactor = 7,

    /// Loading-meter truck width was not greater than 0.
    InvalidTruckWidth = 8,

    /// A positive dimension became zero or infinite when converted between cm, dm and m.
    DimensionOutOfRange = 9,
}

impl From<DefaultVolumeCalcError> for VolumeCalcErrorCode {
    fn from(error: DefaultVolumeCalcError) -> Self {
        error.code
    }
}

thread_local! {
    /// Thread-local storage for the most recent FFI error (C string, error code).
    /// Allows callers to retrieve diagnostic information after a failed call.
    /// The `CString` is stored to prevent memory leaks when returning raw pointers via FFI.
    static LAST_ERROR: RefCell<(Option<CString>, VolumeCalcErrorCode)> =
        const { RefCell::new((None, VolumeCalcErrorCode::Ok)) };
}

/// Internal helper to read `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&(Option<CString>, VolumeCalcErrorCode)) -> R,
{
    LAST_ERROR.with_borrow(f)
}

/// Internal helper to mutate `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut (Option<CString>, VolumeCalcErrorCode)) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Retrieve the most recent FFI error message as a null-terminated C string.
///
/// Returns:
/// - A borrowed pointer to the error message if the last call on this thread failed.
/// - `null` if the last call succeeded or no call has been made.
///
/// # Thread Safety
/// Error messages are stored per-thread (thread-local storage), so this is thread-safe.
///
/// # Lifetime
/// The returned pointer is valid until the next FFI call on this thread.
///
/// **DO NOT FREE THIS POINTER** - it is managed internally.
///
/// Example:
/// ```cpp
/// VolumeHandle* box = nullptr;
/// VolumeCalcErrorCode err = volume_calc_new(120.0, 80.0, 0.0, VolumeUnit::Centimeters, &box);
/// if (err != VolumeCalcErrorCode::Ok) {
///     printf("Volume rejected: %s\n", volume_calc_get_last_error());
/// }
/// ```
#[no_mangle]
pub extern "C" fn volume_calc_get_last_error() -> *const c_char {
    with_last_error(|(cstring, _code)| cstring.as_ref().map_or(ptr::null(), |cs| cs.as_ptr()))
}

/// Retrieve the most recent FFI error code.
///
/// Returns `VolumeCalcErrorCode::Ok` (0) if the last call on this thread succeeded.
#[no_mangle]
pub extern "C" fn volume_calc_get_last_error_code() -> VolumeCalcErrorCode {
    with_last_error(|(_cstring, code)| *code)
}
