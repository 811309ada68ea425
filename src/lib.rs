// THEORY:
// This file is the main entry point for the `pixel_delta` library crate.
// It follows the standard Rust convention of using `lib.rs` to define the public
// API that will be exposed to external consumers (test harnesses, codec
// benchmarks, CI image-regression checks).
//
// The primary goal is to export the comparator functions and their associated
// data structures (`PixelBuffer`, `Pixel`, `ComponentError`) as the clean,
// high-level interface for the whole engine. The low-level building blocks
// (`core_modules`) stay encapsulated behind that surface, providing a clean
// separation of concerns: callers hand over two equal-dimension RGBA8 buffers
// and receive scalar or small-struct results.

pub mod comparator;
pub mod core_modules;
pub mod error;
pub mod parallel;

// Re-export the key data structures for the public API.
pub use comparator::{
    ComponentError, byte_pairs, different_pixel_count, different_pixel_ratio, for_each_byte,
    for_each_pixel, maximum_absolute_error, mean_absolute_error,
    mean_absolute_error_by_component, pixel_pairs, root_mean_square_error,
};
pub use core_modules::buffer::PixelBuffer;
pub use core_modules::pixel::pixel::Pixel;
pub use error::{CompareError, Result};
pub use parallel::ParallelComparator;
