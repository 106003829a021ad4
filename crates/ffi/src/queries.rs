use forest_fire_core::CellGrid;
use std::slice;

use crate::error::{DefaultForestError, ForestErrorCode};
use crate::helpers::{handle_ffi_result_error, instance_from_ptr, with_forest, write_out};
use crate::instance::ForestInstance;

/// Fraction of cells holding a tree, written to `out_fraction`.
///
/// Thread-safe: acquires the `RwLock` read lock.
///
/// # Safety
/// - `ptr` must be null or a live pointer returned by `forest_new`/`forest_new_seeded`.
/// - `out_fraction` must be null or valid for a write of `double`.
#[no_mangle]
pub unsafe extern "C" fn forest_occupied_fraction(
    ptr: *const ForestInstance,
    out_fraction: *mut f64,
) -> ForestErrorCode {
    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        let fraction = with_forest(instance, |forest| forest.occupied_fraction())?;
        unsafe { write_out(out_fraction, "out_fraction", fraction) }
    })
}

/// Fraction of cells on fire, written to `out_fraction`.
///
/// # Safety
/// Same as `forest_occupied_fraction`.
#[no_mangle]
pub unsafe extern "C" fn forest_active_fraction(
    ptr: *const ForestInstance,
    out_fraction: *mut f64,
) -> ForestErrorCode {
    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        let fraction = with_forest(instance, |forest| forest.active_fraction())?;
        unsafe { write_out(out_fraction, "out_fraction", fraction) }
    })
}

/// Total number of cells (rows × columns). Size grid buffers with this.
///
/// # Safety
/// - `ptr` must be null or a live pointer returned by `forest_new`/`forest_new_seeded`.
/// - `out_count` must be null or valid for a write of `uintptr_t`.
#[no_mangle]
pub unsafe extern "C" fn forest_cell_count(
    ptr: *const ForestInstance,
    out_count: *mut usize,
) -> ForestErrorCode {
    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        let count = with_forest(instance, |forest| forest.cell_count())?;
        unsafe { write_out(out_count, "out_count", count) }
    })
}

/// Grid extent in cells.
///
/// # Safety
/// - `ptr` must be null or a live pointer returned by `forest_new`/`forest_new_seeded`.
/// - `out_rows` and `out_columns` must be null or valid for a write of `uintptr_t`.
#[no_mangle]
pub unsafe extern "C" fn forest_dimensions(
    ptr: *const ForestInstance,
    out_rows: *mut usize,
    out_columns: *mut usize,
) -> ForestErrorCode {
    handle_ffi_result_error(|| {
        // Checked up front so a null `out_columns` leaves `out_rows` unwritten
        if out_columns.is_null() {
            return Err(DefaultForestError::null_pointer("out_columns"));
        }
        let instance = unsafe { instance_from_ptr(ptr) }?;
        let dims = with_forest(instance, |forest| forest.dimensions())?;
        unsafe {
            write_out(out_rows, "out_rows", dims.rows())?;
            write_out(out_columns, "out_columns", dims.columns())
        }
    })
}

/// Number of completed ticks.
///
/// # Safety
/// - `ptr` must be null or a live pointer returned by `forest_new`/`forest_new_seeded`.
/// - `out_tick` must be null or valid for a write of `uint64_t`.
#[no_mangle]
pub unsafe extern "C" fn forest_tick(ptr: *const ForestInstance, out_tick: *mut u64) -> ForestErrorCode {
    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        let tick = with_forest(instance, |forest| forest.tick())?;
        unsafe { write_out(out_tick, "out_tick", tick) }
    })
}

/// Copy a layer row-major into a caller-owned buffer.
unsafe fn copy_layer<F>(
    ptr: *const ForestInstance,
    buffer: *mut bool,
    len: usize,
    layer: F,
) -> ForestErrorCode
where
    F: FnOnce(&forest_fire_core::GridAutomaton) -> &CellGrid,
{
    handle_ffi_result_error(|| {
        if buffer.is_null() {
            return Err(DefaultForestError::null_pointer("buffer"));
        }
        let instance = unsafe { instance_from_ptr(ptr) }?;
        with_forest(instance, |forest| {
            let cells = layer(forest).as_slice();
            if len < cells.len() {
                return Err(DefaultForestError::buffer_too_small("buffer", cells.len(), len));
            }
            // SAFETY: caller guarantees `buffer` is valid for `len` writes
            let out = unsafe { slice::from_raw_parts_mut(buffer, cells.len()) };
            out.copy_from_slice(cells);
            Ok(())
        })?
    })
}

/// Copy the tree layer into `buffer` (row-major, `true` = tree present).
///
/// Returns
/// - `ForestErrorCode::Ok` on success
/// - `ForestErrorCode::NullPointer` if `ptr` or `buffer` is null
/// - `ForestErrorCode::BufferTooSmall` if `len < forest_cell_count()`
///
/// # Safety
/// - `ptr` must be null or a live pointer returned by `forest_new`/`forest_new_seeded`.
/// - `buffer` must be null or valid for `len` writes of `bool`.
///
/// # Example Usage (C)
/// ```c
/// uintptr_t count = 0;
/// forest_cell_count(forest, &count);
/// bool* trees = malloc(count * sizeof(bool));
/// if (forest_copy_occupancy(forest, trees, count) == Ok) {
///     // trees[row * columns + column]
/// }
/// free(trees);
/// ```
#[no_mangle]
pub unsafe extern "C" fn forest_copy_occupancy(
    ptr: *const ForestInstance,
    buffer: *mut bool,
    len: usize,
) -> ForestErrorCode {
    unsafe { copy_layer(ptr, buffer, len, |forest| forest.occupancy()) }
}

/// Copy the fire layer into `buffer` (row-major, `true` = burning).
///
/// Same contract as `forest_copy_occupancy`.
///
/// # Safety
/// See `forest_copy_occupancy`.
#[no_mangle]
pub unsafe extern "C" fn forest_copy_active(
    ptr: *const ForestInstance,
    buffer: *mut bool,
    len: usize,
) -> ForestErrorCode {
    unsafe { copy_layer(ptr, buffer, len, |forest| forest.active()) }
}
