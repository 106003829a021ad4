//! C ABI for the forest-fire automaton.
//!
//! Every entry point returns a [`ForestErrorCode`]; on failure the message
//! is available from `forest_get_last_error` on the same thread. Instances
//! are opaque heap handles created by `forest_new`/`forest_new_seeded` and
//! released with `forest_destroy`.

mod error;
mod helpers;
mod instance;
mod queries;
mod simulation;

pub use error::{forest_get_last_error, forest_get_last_error_code, ForestErrorCode};
pub use instance::{forest_destroy, forest_new, forest_new_seeded, ForestInstance};
pub use queries::{
    forest_active_fraction, forest_cell_count, forest_copy_active, forest_copy_occupancy,
    forest_dimensions, forest_occupied_fraction, forest_tick,
};
pub use simulation::{forest_step, forest_step_n};

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CStr;
    use std::ptr;

    fn seeded(rows: i64, columns: i64, growth: f64, ignition: f64) -> *mut ForestInstance {
        let mut forest = ptr::null_mut();
        let code = unsafe { forest_new_seeded(rows, columns, growth, ignition, 7, &mut forest) };
        assert_eq!(code, ForestErrorCode::Ok);
        assert!(!forest.is_null());
        forest
    }

    #[test]
    fn test_create_step_and_destroy() {
        let forest = seeded(20, 30, 0.05, 0.001);

        let mut rows = 0;
        let mut columns = 0;
        let mut count = 0;
        unsafe {
            assert_eq!(forest_dimensions(forest, &mut rows, &mut columns), ForestErrorCode::Ok);
            assert_eq!(forest_cell_count(forest, &mut count), ForestErrorCode::Ok);
        }
        assert_eq!((rows, columns, count), (20, 30, 600));

        let mut tick = 0;
        unsafe {
            assert_eq!(forest_step(forest), ForestErrorCode::Ok);
            assert_eq!(forest_step_n(forest, 9), ForestErrorCode::Ok);
            assert_eq!(forest_tick(forest, &mut tick), ForestErrorCode::Ok);
        }
        assert_eq!(tick, 10);

        let mut occupied = -1.0;
        let mut active = -1.0;
        unsafe {
            assert_eq!(forest_occupied_fraction(forest, &mut occupied), ForestErrorCode::Ok);
            assert_eq!(forest_active_fraction(forest, &mut active), ForestErrorCode::Ok);
        }
        assert!((0.0..=1.0).contains(&occupied));
        assert!((0.0..=1.0).contains(&active));

        unsafe { forest_destroy(forest) };
    }

    #[test]
    fn test_grid_copy_matches_fraction() {
        let forest = seeded(10, 10, 0.5, 0.0);
        unsafe { forest_step(forest) };

        let mut trees = vec![false; 100];
        let mut fires = vec![true; 100];
        let mut occupied = 0.0;
        unsafe {
            assert_eq!(
                forest_copy_occupancy(forest, trees.as_mut_ptr(), trees.len()),
                ForestErrorCode::Ok
            );
            assert_eq!(forest_copy_active(forest, fires.as_mut_ptr(), fires.len()), ForestErrorCode::Ok);
            forest_occupied_fraction(forest, &mut occupied);
        }

        let planted = trees.iter().filter(|&&tree| tree).count();
        assert!((occupied - planted as f64 / 100.0).abs() < 1e-12);
        assert!(fires.iter().all(|&fire| !fire));

        unsafe { forest_destroy(forest) };
    }

    #[test]
    fn test_short_buffer_is_rejected() {
        let forest = seeded(4, 4, 0.1, 0.0);
        let mut buffer = vec![false; 15];

        let code = unsafe { forest_copy_occupancy(forest, buffer.as_mut_ptr(), buffer.len()) };
        assert_eq!(code, ForestErrorCode::BufferTooSmall);
        assert_eq!(forest_get_last_error_code(), ForestErrorCode::BufferTooSmall);

        unsafe { forest_destroy(forest) };
    }

    #[test]
    fn test_invalid_parameters_null_the_handle() {
        let mut forest = ptr::NonNull::<ForestInstance>::dangling().as_ptr();
        let code = unsafe { forest_new(10, -5, 0.01, 0.001, &mut forest) };

        assert_eq!(code, ForestErrorCode::InvalidParameter);
        assert!(forest.is_null());

        let message = unsafe { CStr::from_ptr(forest_get_last_error()) };
        assert!(message.to_string_lossy().contains("columns"));
    }

    #[test]
    fn test_null_pointers_are_reported() {
        unsafe {
            assert_eq!(forest_step(ptr::null()), ForestErrorCode::NullPointer);
            assert_eq!(
                forest_new(5, 5, 0.1, 0.1, ptr::null_mut()),
                ForestErrorCode::NullPointer
            );
            forest_destroy(ptr::null_mut());
        }

        let forest = seeded(3, 3, 0.1, 0.1);
        unsafe {
            assert_eq!(
                forest_occupied_fraction(forest, ptr::null_mut()),
                ForestErrorCode::NullPointer
            );
        }

        // Neither extent is written when one out-pointer is null
        let mut rows = usize::MAX;
        unsafe {
            assert_eq!(
                forest_dimensions(forest, &mut rows, ptr::null_mut()),
                ForestErrorCode::NullPointer
            );
            forest_destroy(forest);
        }
        assert_eq!(rows, usize::MAX);

        // A later success clears the recorded error
        let forest = seeded(3, 3, 0.1, 0.1);
        assert!(forest_get_last_error().is_null());
        unsafe { forest_destroy(forest) };
    }
}
