use forest_fire_core::{ForestParams, GridAutomaton};
use std::ptr;
use std::sync::RwLock;

use crate::error::{DefaultForestError, ForestErrorCode};
use crate::helpers::{track_error, track_result};

/// Opaque handle to a forest automaton.
///
/// # Thread Safety
/// The automaton is protected by an `RwLock`:
/// - **Multiple concurrent readers** (fractions, grid copies): `.read()` lock
/// - **Exclusive writer** (`forest_step`): `.write()` lock
///
/// A host may step the forest on one thread while a render thread copies
/// the grids out on another.
pub struct ForestInstance {
    pub(crate) forest: RwLock<GridAutomaton>,
}

impl ForestInstance {
    /// Validate parameters and build the automaton.
    ///
    /// # Errors
    /// Returns `ForestErrorCode::InvalidParameter` if a dimension is not
    /// positive or a probability is outside [0, 1].
    pub(crate) fn new(params: &ForestParams, seed: Option<u64>) -> Result<Box<Self>, DefaultForestError> {
        let forest = match seed {
            Some(seed) => GridAutomaton::with_seed(params, seed)?,
            None => GridAutomaton::from_params(params)?,
        };

        Ok(Box::new(Self {
            forest: RwLock::new(forest),
        }))
    }
}

/// Shared body of `forest_new` and `forest_new_seeded`.
unsafe fn create(
    params: &ForestParams,
    seed: Option<u64>,
    out_instance: *mut *mut ForestInstance,
) -> ForestErrorCode {
    if out_instance.is_null() {
        return track_error(&DefaultForestError::null_pointer("out_instance"));
    }

    match track_result(ForestInstance::new(params, seed)) {
        Ok(instance) => {
            unsafe {
                *out_instance = Box::into_raw(instance);
            }
            ForestErrorCode::Ok
        }
        Err(code) => {
            unsafe {
                // Set to null on error (per documentation contract)
                *out_instance = ptr::null_mut();
            }
            code
        }
    }
}

/// Create a new forest seeded from the operating system.
///
/// All cells start empty and not burning.
///
/// Returns
/// - `ForestErrorCode::Ok` (0) - success, `out_instance` contains valid pointer
/// - `ForestErrorCode::NullPointer` - `out_instance` is null
/// - `ForestErrorCode::InvalidParameter` - a dimension is not positive or a
///   probability is outside [0, 1]; `out_instance` is set to null
///
/// Call `forest_get_last_error()` to retrieve a human-readable description.
///
/// # Safety
///
/// - `out_instance` must be a valid, non-null pointer to writable memory.
/// - The caller takes ownership of the returned instance and MUST call
///   `forest_destroy` exactly once.
///
/// Example (C)
/// ```c
/// ForestInstance* forest = NULL;
/// if (forest_new(150, 150, 0.0025, 5e-6, &forest) != Ok) {
///     fprintf(stderr, "Failed to create forest: %s\n", forest_get_last_error());
///     return;
/// }
/// forest_step_n(forest, 500);
/// forest_destroy(forest);
/// ```
#[no_mangle]
pub unsafe extern "C" fn forest_new(
    rows: i64,
    columns: i64,
    growth_probability: f64,
    ignition_probability: f64,
    out_instance: *mut *mut ForestInstance,
) -> ForestErrorCode {
    let params = ForestParams::new(rows, columns, growth_probability, ignition_probability);
    unsafe { create(&params, None, out_instance) }
}

/// Create a new forest whose random draws are fully determined by `seed`.
///
/// Same contract as `forest_new`.
///
/// # Safety
/// See `forest_new`.
#[no_mangle]
pub unsafe extern "C" fn forest_new_seeded(
    rows: i64,
    columns: i64,
    growth_probability: f64,
    ignition_probability: f64,
    seed: u64,
    out_instance: *mut *mut ForestInstance,
) -> ForestErrorCode {
    let params = ForestParams::new(rows, columns, growth_probability, ignition_probability);
    unsafe { create(&params, Some(seed), out_instance) }
}

/// Destroys a forest previously created by `forest_new` or `forest_new_seeded`.
///
/// If `ptr` is null, this function is a no-op.
///
/// # Safety
/// - The pointer MUST have been created by `forest_new`/`forest_new_seeded`.
/// - The pointer MUST NOT have been freed already.
/// - After calling this function, the caller must not use the pointer again.
#[no_mangle]
pub unsafe extern "C" fn forest_destroy(ptr: *mut ForestInstance) {
    if ptr.is_null() {
        return;
    }

    // SAFETY: The pointer was created by `Box::into_raw` in `create` and
    // has not been freed. Reclaiming the Box drops the automaton.
    unsafe {
        drop(Box::from_raw(ptr));
    }
}
