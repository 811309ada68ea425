// THEORY:
// The `parallel` module provides multi-core counterparts of the serial
// metrics. Every metric is a fold with an associative and
// commutative combine (sum, max, count), so a pass can be partitioned:
// split the offset range into contiguous, pixel-aligned slices, compute a
// partial result per slice on its own worker task, and reduce the partials.
//
// Key architectural principles:
// 1.  **Owned snapshots**: worker tasks need `'static` data, so the
//     comparator copies both buffers into shared `Arc<[u8]>` storage once
//     at construction. The caller's buffers are released immediately; the
//     snapshot is immutable for the comparator's lifetime, so workers need
//     no locking.
// 2.  **Pixel-aligned partitions**: ranges are cut at pixel boundaries so
//     the same partitioning serves byte metrics and whole-pixel metrics.
// 3.  **Identical numerics**: each parallel metric reduces the exact same
//     per-offset terms as its serial twin, so results match bit-for-bit
//     for sums of small integers and exactly for max/count.

use std::ops::Range;
use std::sync::Arc;

use futures::future;

use crate::comparator::ComponentError;
use crate::core_modules::buffer::PixelBuffer;
use crate::core_modules::pixel::pixel::CHANNELS;
use crate::error::{CompareError, Result};

/// Runs the difference metrics across a pool of worker tasks.
pub struct ParallelComparator {
    data_a: Arc<[u8]>,
    data_b: Arc<[u8]>,
    workers: usize,
}

impl ParallelComparator {
    /// Snapshots both buffers for worker access. Fails fast if the two
    /// buffers do not share the same pixel dimensions. The worker count
    /// defaults to the number of available CPU cores.
    pub fn new(a: &PixelBuffer<'_>, b: &PixelBuffer<'_>) -> Result<Self> {
        Self::with_workers(a, b, num_cpus::get())
    }

    /// Same as `new` but with an explicit worker count.
    pub fn with_workers(a: &PixelBuffer<'_>, b: &PixelBuffer<'_>, workers: usize) -> Result<Self> {
        a.ensure_same_dimensions(b)?;
        Ok(Self {
            data_a: Arc::from(a.bytes()),
            data_b: Arc::from(b.bytes()),
            workers: workers.max(1),
        })
    }

    pub fn byte_count(&self) -> usize {
        self.data_a.len()
    }

    pub fn pixel_count(&self) -> usize {
        self.data_a.len() / CHANNELS
    }

    pub fn worker_count(&self) -> usize {
        self.workers
    }

    /// Cuts the byte range into at most `workers` contiguous slices, each
    /// aligned to a pixel boundary.
    fn partitions(&self) -> Vec<Range<usize>> {
        let pixel_count = self.pixel_count();
        if pixel_count == 0 {
            return Vec::new();
        }
        let workers = self.workers.min(pixel_count);
        let per_worker = pixel_count.div_ceil(workers);
        (0..workers)
            .map(|index| {
                let start = (index * per_worker).min(pixel_count);
                let end = ((index + 1) * per_worker).min(pixel_count);
                start * CHANNELS..end * CHANNELS
            })
            .filter(|range| !range.is_empty())
            .collect()
    }

    /// The map/reduce backbone: `map` turns one slice pair into a partial
    /// result on a worker task, `reduce` combines partials in partition
    /// order starting from `identity`.
    async fn reduce_partials<T, M, R>(&self, identity: T, map: M, reduce: R) -> Result<T>
    where
        T: Send + 'static,
        M: Fn(&[u8], &[u8]) -> T + Send + Sync + 'static,
        R: Fn(T, T) -> T,
    {
        let map = Arc::new(map);
        let mut tasks = Vec::new();
        for range in self.partitions() {
            let data_a = Arc::clone(&self.data_a);
            let data_b = Arc::clone(&self.data_b);
            let map = Arc::clone(&map);
            tasks.push(tokio::spawn(async move {
                map(&data_a[range.clone()], &data_b[range])
            }));
        }

        let mut total = identity;
        for partial in future::join_all(tasks).await {
            let partial = partial.map_err(|_| CompareError::WorkerFailed)?;
            total = reduce(total, partial);
        }
        Ok(total)
    }

    /// Parallel Mean Absolute Error over all bytes.
    pub async fn mean_absolute_error(&self) -> Result<f64> {
        let sum = self
            .reduce_partials(
                0.0,
                |slice_a: &[u8], slice_b: &[u8]| {
                    slice_a
                        .iter()
                        .zip(slice_b)
                        .map(|(&byte_a, &byte_b)| (byte_a as f64 - byte_b as f64).abs())
                        .sum::<f64>()
                },
                |left, right| left + right,
            )
            .await?;
        if self.byte_count() == 0 {
            return Ok(0.0);
        }
        Ok(sum / self.byte_count() as f64)
    }

    /// Parallel per-channel Mean Absolute Error.
    pub async fn mean_absolute_error_by_component(&self) -> Result<ComponentError> {
        let sums = self
            .reduce_partials(
                [0.0f64; CHANNELS],
                |slice_a: &[u8], slice_b: &[u8]| {
                    let mut sums = [0.0f64; CHANNELS];
                    let pairs = slice_a
                        .chunks_exact(CHANNELS)
                        .zip(slice_b.chunks_exact(CHANNELS));
                    for (chunk_a, chunk_b) in pairs {
                        for channel in 0..CHANNELS {
                            sums[channel] +=
                                (chunk_a[channel] as f64 - chunk_b[channel] as f64).abs();
                        }
                    }
                    sums
                },
                |mut left, right| {
                    for channel in 0..CHANNELS {
                        left[channel] += right[channel];
                    }
                    left
                },
            )
            .await?;
        if self.pixel_count() == 0 {
            return Ok(ComponentError::default());
        }
        let divisor = self.pixel_count() as f64;
        Ok(ComponentError {
            red: sums[0] / divisor,
            green: sums[1] / divisor,
            blue: sums[2] / divisor,
            alpha: sums[3] / divisor,
        })
    }

    /// Parallel global maximum absolute byte error.
    pub async fn maximum_absolute_error(&self) -> Result<f64> {
        self.reduce_partials(
            0.0f64,
            |slice_a: &[u8], slice_b: &[u8]| {
                slice_a
                    .iter()
                    .zip(slice_b)
                    .map(|(&byte_a, &byte_b)| (byte_a as f64 - byte_b as f64).abs())
                    .fold(0.0f64, f64::max)
            },
            f64::max,
        )
        .await
    }

    /// Parallel Root Mean Square Error over all bytes.
    pub async fn root_mean_square_error(&self) -> Result<f64> {
        let sum_of_squares = self
            .reduce_partials(
                0.0,
                |slice_a: &[u8], slice_b: &[u8]| {
                    slice_a
                        .iter()
                        .zip(slice_b)
                        .map(|(&byte_a, &byte_b)| {
                            let delta = byte_a as f64 - byte_b as f64;
                            delta * delta
                        })
                        .sum::<f64>()
                },
                |left, right| left + right,
            )
            .await?;
        if self.byte_count() == 0 {
            return Ok(0.0);
        }
        Ok((sum_of_squares / self.byte_count() as f64).sqrt())
    }

    /// Parallel count of pixels differing in any channel.
    pub async fn different_pixel_count(&self) -> Result<usize> {
        self.reduce_partials(
            0usize,
            |slice_a: &[u8], slice_b: &[u8]| {
                slice_a
                    .chunks_exact(CHANNELS)
                    .zip(slice_b.chunks_exact(CHANNELS))
                    .filter(|(chunk_a, chunk_b)| chunk_a != chunk_b)
                    .count()
            },
            |left, right| left + right,
        )
        .await
    }

    /// Parallel different-pixel ratio, in [0, 1].
    pub async fn different_pixel_ratio(&self) -> Result<f64> {
        let count = self.different_pixel_count().await?;
        if self.pixel_count() == 0 {
            return Ok(0.0);
        }
        Ok(count as f64 / self.pixel_count() as f64)
    }
}
