use crate::error::{with_last_error_mut, DefaultForestError, ForestErrorCode, ForestFfiError};
use crate::instance::ForestInstance;
use forest_fire_core::GridAutomaton;
use std::ffi::CString;

/// Set the thread-local error message and code.
pub(crate) fn set_last_error(error: &impl ForestFfiError) {
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
}

/// Clear the thread-local error message and code.
/// Called on successful operations.
pub(crate) fn clear_last_error() {
    with_last_error_mut(|(cstring, code)| {
        *cstring = None;
        *code = ForestErrorCode::Ok;
    });
}

/// Track an error by setting it in thread-local storage and returning its code.
#[inline]
pub(crate) fn track_error(error: &impl ForestFfiError) -> ForestErrorCode {
    tracing::debug!("FFI call failed: {}", error.msg());
    set_last_error(error);
    error.code()
}

/// Record the error of a failed result, clearing the last error on success.
pub(crate) fn track_result<T>(result: Result<T, DefaultForestError>) -> Result<T, ForestErrorCode> {
    match result {
        Ok(value) => {
            clear_last_error();
            Ok(value)
        }
        Err(error) => Err(track_error(&error)),
    }
}

/// Run an FFI body and collapse its outcome into an error code.
pub(crate) fn handle_ffi_result_error<F>(f: F) -> ForestErrorCode
where
    F: FnOnce() -> Result<(), DefaultForestError>,
{
    match track_result(f()) {
        Ok(()) => ForestErrorCode::Ok,
        Err(code) => code,
    }
}

/// Borrow the instance behind an opaque handle.
///
/// # Safety
/// `ptr` must be null or a pointer returned by `forest_new`/`forest_new_seeded`
/// that has not been destroyed.
pub(crate) unsafe fn instance_from_ptr<'a>(
    ptr: *const ForestInstance,
) -> Result<&'a ForestInstance, DefaultForestError> {
    unsafe { ptr.as_ref() }.ok_or_else(|| DefaultForestError::null_pointer("ptr"))
}

/// Run `f` under the read lock.
pub(crate) fn with_forest<F, T>(instance: &ForestInstance, f: F) -> Result<T, DefaultForestError>
where
    F: FnOnce(&GridAutomaton) -> T,
{
    let forest = instance
        .forest
        .read()
        .map_err(|_| DefaultForestError::lock_poisoned("RwLock"))?;
    Ok(f(&forest))
}

/// Run `f` under the write lock.
pub(crate) fn with_forest_mut<F, T>(instance: &ForestInstance, f: F) -> Result<T, DefaultForestError>
where
    F: FnOnce(&mut GridAutomaton) -> T,
{
    let mut forest = instance
        .forest
        .write()
        .map_err(|_| DefaultForestError::lock_poisoned("RwLock"))?;
    Ok(f(&mut forest))
}

/// Write `value` through an out-pointer, rejecting null.
///
/// # Safety
/// `out` must be null or valid for a write of `T`.
pub(crate) unsafe fn write_out<T>(out: *mut T, name: &str, value: T) -> Result<(), DefaultForestError> {
    if out.is_null() {
        return Err(DefaultForestError::null_pointer(name));
    }
    unsafe {
        out.write(value);
    }
    Ok(())
}
