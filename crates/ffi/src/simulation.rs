use crate::error::ForestErrorCode;
use crate::helpers::{handle_ffi_result_error, instance_from_ptr, with_forest_mut};
use crate::instance::ForestInstance;

/// Advance the forest by one tick (grow, ignite, spread and extinguish).
///
/// Thread-safe: acquires the `RwLock` write lock for the update.
///
/// Returns
/// - `ForestErrorCode::Ok` on success
/// - `ForestErrorCode::NullPointer` if `ptr` is null
/// - `ForestErrorCode::LockPoisoned` if the internal lock is poisoned
///
/// # Safety
/// `ptr` must be null or a live pointer returned by `forest_new`/`forest_new_seeded`.
#[no_mangle]
pub unsafe extern "C" fn forest_step(ptr: *const ForestInstance) -> ForestErrorCode {
    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        with_forest_mut(instance, |forest| {
            forest.step();
        })
    })
}

/// Advance the forest by `ticks` ticks under a single write lock.
///
/// Same return codes as `forest_step`. `ticks == 0` is a successful no-op.
///
/// # Safety
/// `ptr` must be null or a live pointer returned by `forest_new`/`forest_new_seeded`.
#[no_mangle]
pub unsafe extern "C" fn forest_step_n(ptr: *const ForestInstance, ticks: u64) -> ForestErrorCode {
    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        with_forest_mut(instance, |forest| forest.step_n(ticks))
    })
}
