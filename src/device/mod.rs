//! Data-parallel execution of the update rules over device-resident buffers.
//!
//! A `Device` owns a pool of worker threads and the buffers it uploads. Its kernels apply the
//! same per-element formulas as the host rules, split in chunks across the pool. The scalars
//! that depend on the whole buffer (the passive-aggressive norm, Adam's bias corrections) are
//! resolved before a kernel starts and every kernel returns once all chunks are done.

mod buffer;
mod kernels;

use std::{
    num::NonZeroUsize,
    sync::atomic::{AtomicUsize, Ordering},
};

use log::info;
use ndarray::{ArrayBase, Data, Dimension};
use rayon::{ThreadPool, ThreadPoolBuilder};

pub use buffer::DeviceBuffer;

use crate::{OptErr, Result, Scalar};

static NEXT_DEVICE_ID: AtomicUsize = AtomicUsize::new(0);

const DEFAULT_CHUNK_SIZE: NonZeroUsize = NonZeroUsize::new(4096).unwrap();

/// An execution device for the update rules.
#[derive(Debug)]
pub struct Device {
    id: usize,
    pool: ThreadPool,
    chunk_size: NonZeroUsize,
}

impl Device {
    /// Creates a new `Device`.
    ///
    /// # Arguments
    /// * `threads` - The amount of worker threads, `0` picks one per logical core.
    ///
    /// # Returns
    /// A new `Device` instance or an error if the thread pool couldn't be spawned.
    pub fn new(threads: usize) -> Result<Self> {
        let id = NEXT_DEVICE_ID.fetch_add(1, Ordering::Relaxed);

        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(move |i| format!("opt-device-{id}-{i}"))
            .build()
            .map_err(|e| OptErr::Device(e.to_string()))?;

        info!(device = id, threads = pool.current_num_threads(); "device ready");

        Ok(Self {
            id,
            pool,
            chunk_size: DEFAULT_CHUNK_SIZE,
        })
    }

    /// Sets the amount of elements each parallel task processes.
    pub fn with_chunk_size(mut self, chunk_size: NonZeroUsize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Returns the amount of worker threads.
    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Copies a host buffer into a new one-dimensional device buffer.
    pub fn upload<T: Scalar>(&self, host: &[T]) -> DeviceBuffer<T> {
        DeviceBuffer::new(self.id, host.into(), Box::new([host.len()]))
    }

    /// Copies a host array of any layout into a new device buffer, in logical order.
    pub fn upload_array<T, S, D>(&self, host: &ArrayBase<S, D>) -> DeviceBuffer<T>
    where
        T: Scalar,
        S: Data<Elem = T>,
        D: Dimension,
    {
        let data = host.iter().copied().collect();
        DeviceBuffer::new(self.id, data, host.shape().into())
    }

    /// Allocates a new zeroed device buffer.
    ///
    /// # Arguments
    /// * `dims` - The dimensions of the buffer, its length is their product.
    pub fn zeros<T: Scalar>(&self, dims: &[usize]) -> DeviceBuffer<T> {
        let len = dims.iter().product();
        DeviceBuffer::new(self.id, vec![T::zero(); len].into_boxed_slice(), dims.into())
    }

    /// Checks that `buffer` lives in this device and has `len` elements.
    fn check<T: Scalar>(&self, len: usize, buffer: &DeviceBuffer<T>) -> Result<()> {
        if buffer.device != self.id {
            return Err(OptErr::Device(format!(
                "buffer belongs to device {}, not to device {}",
                buffer.device, self.id
            )));
        }

        crate::error::check_len(len, buffer.len())
    }
}
