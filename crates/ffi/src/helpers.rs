use crate::error::{with_last_error_mut, VolumeCalcError, VolumeCalcErrorCode};
use std::ffi::CString;

/// Set the thread-local error message and code.
/// Internal helper for FFI functions to record failure details.
/// Accepts any type implementing `VolumeCalcError` trait.
pub(crate) fn set_last_error(error: &impl VolumeCalcError) {
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
}

/// Track an error by setting it in thread-local storage and returning its code.
/// More efficient than handling results for immediate errors.
#[inline]
pub(crate) fn track_error(error: &impl VolumeCalcError) -> VolumeCalcErrorCode {
    set_last_error(error);
    error.code()
}

/// Record the outcome of a fallible operation.
/// Success clears the last error; failure stores it and yields its code.
pub(crate) fn track_result<T, E>(result: Result<T, E>) -> Result<T, VolumeCalcErrorCode>
where
    E: VolumeCalcError,
{
    match result {
        Ok(value) => {
            clear_last_error();
            Ok(value)
        }
        Err(error) => Err(track_error(&error)),
    }
}

/// Clear the thread-local error message and code.
/// Internal helper called on successful operations.
pub(crate) fn clear_last_error() {
    with_last_error_mut(|(cstring, code)| {
        *cstring = None;
        *code = VolumeCalcErrorCode::Ok;
    });
}

/// Write `value` through a caller-supplied out-pointer, or report it null.
///
/// # Safety
/// `out` must be null or valid for a single `T` write.
pub(crate) unsafe fn write_out<T>(out: *mut T, param_name: &str, value: T) -> VolumeCalcErrorCode {
    if out.is_null() {
        return track_error(&crate::error::DefaultVolumeCalcError::null_pointer(param_name));
    }
    unsafe {
        *out = value;
    }
    clear_last_error();
    VolumeCalcErrorCode::Ok
}
