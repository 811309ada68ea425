// THEORY:
// The `comparator` module is the top-level API of the engine. It is built
// around one primitive: a single deterministic pass over two equal-sized
// buffers in lockstep, visiting the same linear offset in each. Every
// derived statistic (MAE, per-channel MAE, max error, RMSE, different-pixel
// count) is a fold over that pass with a different combining operation.
//
// Key architectural principles:
// 1.  **Traversal is the contract**: `for_each_byte` and `for_each_pixel`
//     guarantee strictly increasing offsets, exactly one visit per offset,
//     single pass. Callers can rely on this for external accumulation
//     (running sums, running maxima) without the comparator holding any
//     state of its own.
// 2.  **Pure functions only**: every operation is a function of its two
//     input buffers. No caching, no partial results, no retries — a call
//     either completes its full pass or fails the dimension precondition
//     before touching a single byte.
// 3.  **Two traversal idioms**: a callback form (the classic internal
//     iterator) and a lazy pair-iterator form (`byte_pairs`, `pixel_pairs`)
//     that callers fold over. Both walk the same offsets in the same order.

use crate::core_modules::buffer::PixelBuffer;
use crate::core_modules::pixel::pixel::{CHANNELS, Pixel};
use crate::error::Result;

/// Per-channel aggregate error values, one per RGBA component.
/// Channels are never mixed; each value is self-contained.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ComponentError {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

/// Invokes `combine(byte_a, byte_b)` for every linear offset of the two
/// buffers, in strictly increasing order, exactly once per offset.
/// Returns the total byte count (width * height * 4).
pub fn for_each_byte<F>(a: &PixelBuffer<'_>, b: &PixelBuffer<'_>, mut combine: F) -> Result<usize>
where
    F: FnMut(u8, u8),
{
    a.ensure_same_dimensions(b)?;
    for (&byte_a, &byte_b) in a.bytes().iter().zip(b.bytes()) {
        combine(byte_a, byte_b);
    }
    Ok(a.byte_count())
}

/// Invokes `combine(pixel_a, pixel_b)` for every pixel index of the two
/// buffers, in increasing row-major order. Returns the pixel count
/// (width * height).
pub fn for_each_pixel<F>(a: &PixelBuffer<'_>, b: &PixelBuffer<'_>, mut combine: F) -> Result<usize>
where
    F: FnMut(Pixel, Pixel),
{
    a.ensure_same_dimensions(b)?;
    let pairs = a
        .bytes()
        .chunks_exact(CHANNELS)
        .zip(b.bytes().chunks_exact(CHANNELS));
    for (chunk_a, chunk_b) in pairs {
        combine(Pixel::from(chunk_a), Pixel::from(chunk_b));
    }
    Ok(a.pixel_count())
}

/// A lazy iterator of same-offset byte pairs, in strictly increasing
/// offset order. The fold-based twin of `for_each_byte`.
pub fn byte_pairs<'a>(
    a: &PixelBuffer<'a>,
    b: &PixelBuffer<'a>,
) -> Result<impl Iterator<Item = (u8, u8)> + use<'a>> {
    a.ensure_same_dimensions(b)?;
    Ok(a.bytes().iter().copied().zip(b.bytes().iter().copied()))
}

/// A lazy iterator of same-index pixel pairs, in increasing row-major
/// order. The fold-based twin of `for_each_pixel`.
pub fn pixel_pairs<'a>(
    a: &PixelBuffer<'a>,
    b: &PixelBuffer<'a>,
) -> Result<impl Iterator<Item = (Pixel, Pixel)> + use<'a>> {
    a.ensure_same_dimensions(b)?;
    let pairs = a
        .bytes()
        .chunks_exact(CHANNELS)
        .zip(b.bytes().chunks_exact(CHANNELS))
        .map(|(chunk_a, chunk_b)| (Pixel::from(chunk_a), Pixel::from(chunk_b)));
    Ok(pairs)
}

/// Mean Absolute Error across every byte of every channel. The primary
/// single-number similarity measure; result is in [0, 255].
pub fn mean_absolute_error(a: &PixelBuffer<'_>, b: &PixelBuffer<'_>) -> Result<f64> {
    let mut sum = 0.0;
    let byte_count = for_each_byte(a, b, |byte_a, byte_b| {
        sum += (byte_a as f64 - byte_b as f64).abs();
    })?;
    if byte_count == 0 {
        return Ok(0.0);
    }
    Ok(sum / byte_count as f64)
}

/// Mean Absolute Error computed independently for each RGBA channel.
pub fn mean_absolute_error_by_component(
    a: &PixelBuffer<'_>,
    b: &PixelBuffer<'_>,
) -> Result<ComponentError> {
    let mut sums = [0.0f64; CHANNELS];
    let pixel_count = for_each_pixel(a, b, |pixel_a, pixel_b| {
        let channels_a = pixel_a.channels();
        let channels_b = pixel_b.channels();
        for channel in 0..CHANNELS {
            sums[channel] += (channels_a[channel] as f64 - channels_b[channel] as f64).abs();
        }
    })?;
    if pixel_count == 0 {
        return Ok(ComponentError::default());
    }
    let divisor = pixel_count as f64;
    Ok(ComponentError {
        red: sums[0] / divisor,
        green: sums[1] / divisor,
        blue: sums[2] / divisor,
        alpha: sums[3] / divisor,
    })
}

/// The largest absolute byte difference anywhere in the two buffers,
/// across all channels. Result is in [0, 255].
pub fn maximum_absolute_error(a: &PixelBuffer<'_>, b: &PixelBuffer<'_>) -> Result<f64> {
    // Absolute differences are non-negative, so 0 is a safe seed.
    let mut max = 0.0f64;
    for_each_byte(a, b, |byte_a, byte_b| {
        max = max.max((byte_a as f64 - byte_b as f64).abs());
    })?;
    Ok(max)
}

/// Root Mean Square Error across every byte. Weighs large deviations more
/// heavily than MAE by squaring before averaging.
pub fn root_mean_square_error(a: &PixelBuffer<'_>, b: &PixelBuffer<'_>) -> Result<f64> {
    let mut sum_of_squares = 0.0;
    let byte_count = for_each_byte(a, b, |byte_a, byte_b| {
        let delta = byte_a as f64 - byte_b as f64;
        sum_of_squares += delta * delta;
    })?;
    if byte_count == 0 {
        return Ok(0.0);
    }
    Ok((sum_of_squares / byte_count as f64).sqrt())
}

/// The number of pixels that differ in any channel. A pixel counts as
/// different when its whole 4-channel tuple is unequal; there is no
/// per-channel threshold.
pub fn different_pixel_count(a: &PixelBuffer<'_>, b: &PixelBuffer<'_>) -> Result<usize> {
    let mut count = 0usize;
    for_each_pixel(a, b, |pixel_a, pixel_b| {
        if pixel_a != pixel_b {
            count += 1;
        }
    })?;
    Ok(count)
}

/// The fraction of pixels that differ, in [0, 1]. 0 means the images are
/// pixel-identical; 1 means no pixel matches.
pub fn different_pixel_ratio(a: &PixelBuffer<'_>, b: &PixelBuffer<'_>) -> Result<f64> {
    let count = different_pixel_count(a, b)?;
    let pixel_count = a.pixel_count();
    if pixel_count == 0 {
        return Ok(0.0);
    }
    Ok(count as f64 / pixel_count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CompareError;

    fn buffer(width: u32, height: u32, data: &[u8]) -> PixelBuffer<'_> {
        PixelBuffer::new(width, height, data).unwrap()
    }

    #[test]
    fn single_pixel_scenario() {
        // Pixel A = (10,20,30,255), pixel B = (20,20,30,255).
        let a_data = [10u8, 20, 30, 255];
        let b_data = [20u8, 20, 30, 255];
        let a = buffer(1, 1, &a_data);
        let b = buffer(1, 1, &b_data);

        assert_eq!(mean_absolute_error(&a, &b).unwrap(), 2.5);
        assert_eq!(maximum_absolute_error(&a, &b).unwrap(), 10.0);
        assert_eq!(root_mean_square_error(&a, &b).unwrap(), 5.0);
        assert_eq!(different_pixel_count(&a, &b).unwrap(), 1);
        assert_eq!(different_pixel_ratio(&a, &b).unwrap(), 1.0);

        let components = mean_absolute_error_by_component(&a, &b).unwrap();
        assert_eq!(components.red, 10.0);
        assert_eq!(components.green, 0.0);
        assert_eq!(components.blue, 0.0);
        assert_eq!(components.alpha, 0.0);
    }

    #[test]
    fn identical_buffers_yield_identity_values() {
        let data = [1u8, 2, 3, 4, 5, 6, 7, 8];
        let a = buffer(2, 1, &data);
        let b = buffer(2, 1, &data);

        assert_eq!(mean_absolute_error(&a, &b).unwrap(), 0.0);
        assert_eq!(maximum_absolute_error(&a, &b).unwrap(), 0.0);
        assert_eq!(root_mean_square_error(&a, &b).unwrap(), 0.0);
        assert_eq!(different_pixel_count(&a, &b).unwrap(), 0);
        assert_eq!(different_pixel_ratio(&a, &b).unwrap(), 0.0);
        assert_eq!(
            mean_absolute_error_by_component(&a, &b).unwrap(),
            ComponentError::default()
        );
    }

    #[test]
    fn mismatched_dimensions_fail_before_traversal() {
        let a_data = vec![0u8; 2 * 2 * 4];
        let b_data = vec![0u8; 3 * 3 * 4];
        let a = buffer(2, 2, &a_data);
        let b = buffer(3, 3, &b_data);

        let mut visited = 0;
        let err = for_each_byte(&a, &b, |_, _| visited += 1).unwrap_err();
        assert!(matches!(err, CompareError::DimensionMismatch { .. }));
        assert_eq!(visited, 0);

        assert!(mean_absolute_error(&a, &b).is_err());
        assert!(mean_absolute_error_by_component(&a, &b).is_err());
        assert!(maximum_absolute_error(&a, &b).is_err());
        assert!(root_mean_square_error(&a, &b).is_err());
        assert!(different_pixel_count(&a, &b).is_err());
        assert!(different_pixel_ratio(&a, &b).is_err());
    }

    #[test]
    fn for_each_byte_visits_every_offset_in_order() {
        let a_data: Vec<u8> = (0..16).collect();
        let b_data = vec![0u8; 16];
        let a = buffer(2, 2, &a_data);
        let b = buffer(2, 2, &b_data);

        let mut seen = Vec::new();
        let byte_count = for_each_byte(&a, &b, |byte_a, _| seen.push(byte_a)).unwrap();
        assert_eq!(byte_count, 16);
        assert_eq!(seen, a_data);
    }

    #[test]
    fn for_each_pixel_groups_bytes_in_fixed_order() {
        let a_data = [1u8, 2, 3, 4, 5, 6, 7, 8];
        let b_data = [0u8; 8];
        let a = buffer(2, 1, &a_data);
        let b = buffer(2, 1, &b_data);

        let mut pixels = Vec::new();
        let pixel_count = for_each_pixel(&a, &b, |pixel_a, _| pixels.push(pixel_a)).unwrap();
        assert_eq!(pixel_count, 2);
        assert_eq!(pixels, vec![Pixel::new(1, 2, 3, 4), Pixel::new(5, 6, 7, 8)]);
    }

    #[test]
    fn byte_count_is_four_times_pixel_count() {
        let data = vec![0u8; 3 * 2 * 4];
        let a = buffer(3, 2, &data);
        let b = buffer(3, 2, &data);
        let byte_count = for_each_byte(&a, &b, |_, _| {}).unwrap();
        let pixel_count = for_each_pixel(&a, &b, |_, _| {}).unwrap();
        assert_eq!(byte_count, 4 * pixel_count);
    }

    #[test]
    fn pair_iterators_match_callback_traversal() {
        let a_data: Vec<u8> = (0..24).collect();
        let b_data: Vec<u8> = (0..24).rev().collect();
        let a = buffer(3, 2, &a_data);
        let b = buffer(3, 2, &b_data);

        let folded: f64 = byte_pairs(&a, &b)
            .unwrap()
            .map(|(byte_a, byte_b)| (byte_a as f64 - byte_b as f64).abs())
            .sum::<f64>()
            / a.byte_count() as f64;
        assert_eq!(folded, mean_absolute_error(&a, &b).unwrap());

        let count = pixel_pairs(&a, &b)
            .unwrap()
            .filter(|(pixel_a, pixel_b)| pixel_a != pixel_b)
            .count();
        assert_eq!(count, different_pixel_count(&a, &b).unwrap());
    }

    #[test]
    fn different_pixel_count_is_whole_tuple_not_per_channel() {
        // Second pixel differs in three channels but still counts once.
        let a_data = [0u8, 0, 0, 0, 1, 2, 3, 4];
        let b_data = [0u8, 0, 0, 0, 9, 9, 9, 4];
        let a = buffer(2, 1, &a_data);
        let b = buffer(2, 1, &b_data);
        assert_eq!(different_pixel_count(&a, &b).unwrap(), 1);
        assert_eq!(different_pixel_ratio(&a, &b).unwrap(), 0.5);
    }

    #[test]
    fn empty_buffers_yield_identity_values() {
        let a = buffer(0, 3, &[]);
        let b = buffer(0, 3, &[]);
        assert_eq!(mean_absolute_error(&a, &b).unwrap(), 0.0);
        assert_eq!(root_mean_square_error(&a, &b).unwrap(), 0.0);
        assert_eq!(different_pixel_ratio(&a, &b).unwrap(), 0.0);
    }
}
