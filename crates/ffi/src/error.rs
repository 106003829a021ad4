use forest_fire_core::ForestError;
use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

/// Common interface for FFI error types.
///
/// - `code()` - Returns the error code to be passed across FFI boundary
/// - `msg()` - Returns the error message for diagnostic purposes
pub(crate) trait ForestFfiError {
    /// Returns the error code to be returned across the FFI boundary.
    fn code(&self) -> ForestErrorCode;

    /// Returns the human-readable error message.
    fn msg(&self) -> &str;
}

/// Default implementation of `ForestFfiError` for the FFI error scenarios.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefaultForestError {
    code: ForestErrorCode,
    msg: String,
}

impl DefaultForestError {
    /// Create error for null pointer passed where non-null required.
    ///
    /// # Arguments
    /// * `param_name` - The name of the parameter that was null (e.g., `"out_instance"`, `"ptr"`)
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: ForestErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    /// Create error for poisoned lock.
    pub fn lock_poisoned(lock_name: &str) -> Self {
        Self {
            code: ForestErrorCode::LockPoisoned,
            msg: format!("Lock '{lock_name}' was poisoned by a panic in another thread"),
        }
    }

    /// Create error for a caller buffer that cannot hold the requested data.
    pub fn buffer_too_small(param_name: &str, required: usize, provided: usize) -> Self {
        Self {
            code: ForestErrorCode::BufferTooSmall,
            msg: format!("Buffer '{param_name}' holds {provided} cells, {required} required"),
        }
    }

    /// Create error for invalid parameter.
    pub fn invalid_parameter(message: String) -> Self {
        Self {
            code: ForestErrorCode::InvalidParameter,
            msg: message,
        }
    }
}

impl From<ForestError> for DefaultForestError {
    fn from(error: ForestError) -> Self {
        // Construction is the only core call that can fail across the boundary
        Self::invalid_parameter(error.to_string())
    }
}

impl ForestFfiError for DefaultForestError {
    fn code(&self) -> ForestErrorCode {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

/// FFI error codes returned by forest functions.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForestErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Invalid pointer: null pointer passed where non-null required.
    NullPointer = 1,

    /// Lock poisoned: internal synchronization primitive was poisoned by a panic.
    LockPoisoned = 2,

    /// Invalid parameter: a dimension is non-positive or a probability is outside [0, 1].
    InvalidParameter = 3,

    /// Caller-supplied buffer is shorter than the grid.
    BufferTooSmall = 4,
}

impl From<DefaultForestError> for ForestErrorCode {
    fn from(error: DefaultForestError) -> Self {
        error.code
    }
}

thread_local! {
    /// Thread-local storage for the most recent FFI error (C string, error code).
    /// The CString is stored so the pointer handed out stays valid.
    static LAST_ERROR: RefCell<(Option<CString>, ForestErrorCode)> = const { RefCell::new((None, ForestErrorCode::Ok)) };
}

/// Internal helper to read `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&(Option<CString>, ForestErrorCode)) -> R,
{
    LAST_ERROR.with_borrow(f)
}

/// Internal helper to mutate `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut (Option<CString>, ForestErrorCode)) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Retrieve the most recent FFI error message as a null-terminated C string.
///
/// Returns:
/// - A borrowed pointer to the error message if the last call on this thread failed.
/// - `null` if the last call succeeded.
///
/// # Lifetime
/// The returned pointer is valid until the next FFI call on this thread.
///
/// **DO NOT FREE THIS POINTER** - it is managed internally.
///
/// Example:
/// ```c
/// ForestInstance* forest = NULL;
/// if (forest_new(150, 150, 0.0025, 5e-6, &forest) != Ok) {
///     const char* error = forest_get_last_error();
///     if (error) {
///         printf("Forest creation failed: %s\n", error);
///     }
/// }
/// ```
#[no_mangle]
pub extern "C" fn forest_get_last_error() -> *const c_char {
    with_last_error(|(cstring, _code)| cstring.as_ref().map_or(ptr::null(), |cs| cs.as_ptr()))
}

/// Retrieve the most recent FFI error code for this thread.
///
/// Returns `ForestErrorCode::Ok` (0) if the last call succeeded.
#[no_mangle]
pub extern "C" fn forest_get_last_error_code() -> ForestErrorCode {
    with_last_error(|(_cstring, code)| *code)
}
