use log::trace;
use rayon::prelude::*;

use super::{Device, DeviceBuffer};
use crate::{
    Result, Scalar,
    optimization::{NoopObserver, StepObserver, formula},
};

impl Device {
    /// Runs `kernel` on the device's pool, returning once every chunk has been processed.
    fn launch<F: FnOnce() + Send>(&self, name: &'static str, len: usize, kernel: F) {
        trace!(device = self.id, kernel = name, len = len; "launching kernel");
        self.pool.install(kernel);
    }

    /// Device counterpart of `optimization::const_step_update`.
    pub fn const_step_update<T: Scalar>(
        &self,
        theta: &mut DeviceBuffer<T>,
        grad: &DeviceBuffer<T>,
        step_size: T,
    ) -> Result<()> {
        let len = theta.len();
        self.check(len, theta)?;
        self.check(len, grad)?;

        let n = self.chunk_size.get();
        self.launch("const_step", len, || {
            theta
                .data
                .par_chunks_mut(n)
                .zip(grad.data.par_chunks(n))
                .for_each(|(p, g)| {
                    p.iter_mut()
                        .zip(g)
                        .for_each(|(p, &g)| formula::const_step(p, g, step_size));
                });
        });

        Ok(())
    }

    /// Device counterpart of `optimization::const_step_update_momentum`.
    pub fn const_step_update_momentum<T: Scalar>(
        &self,
        theta: &mut DeviceBuffer<T>,
        grad: &DeviceBuffer<T>,
        momentum_state: &mut DeviceBuffer<T>,
        momentum: T,
        step_size: T,
    ) -> Result<()> {
        let len = theta.len();
        self.check(len, theta)?;
        self.check(len, grad)?;
        self.check(len, momentum_state)?;

        let n = self.chunk_size.get();
        self.launch("const_step_momentum", len, || {
            theta
                .data
                .par_chunks_mut(n)
                .zip(grad.data.par_chunks(n))
                .zip(momentum_state.data.par_chunks_mut(n))
                .for_each(|((p, g), u)| {
                    p.iter_mut().zip(g).zip(u).for_each(|((p, &g), u)| {
                        formula::decay_momentum(u, momentum);
                        formula::add_momentum(u, g, momentum);
                        formula::const_step(p, *u, step_size);
                    });
                });
        });

        Ok(())
    }

    /// Device counterpart of `optimization::pa_update`.
    pub fn pa_update<T: Scalar>(
        &self,
        theta: &mut DeviceBuffer<T>,
        grad: &DeviceBuffer<T>,
        loss: T,
    ) -> Result<()> {
        self.pa_update_observed(theta, grad, loss, &mut NoopObserver)
    }

    /// Device counterpart of `optimization::pa_update_observed`.
    ///
    /// The gradient's squared norm is reduced in parallel, so it may differ from the host's
    /// sequential sum by floating point reassociation.
    pub fn pa_update_observed<T, O>(
        &self,
        theta: &mut DeviceBuffer<T>,
        grad: &DeviceBuffer<T>,
        loss: T,
        observer: &mut O,
    ) -> Result<()>
    where
        T: Scalar,
        O: StepObserver<T> + ?Sized,
    {
        let len = theta.len();
        self.check(len, theta)?;
        self.check(len, grad)?;

        if loss.is_nan() || loss <= T::zero() {
            return Ok(());
        }

        let n = self.chunk_size.get();
        let grad_norm_sq = self.pool.install(|| {
            grad.data
                .par_chunks(n)
                .map(|g| g.iter().fold(T::zero(), |acc, &g| acc + g * g))
                .reduce(T::zero, |a, b| a + b)
        });

        let Some(step_size) = formula::pa_step_size(loss, grad_norm_sq) else {
            return Ok(());
        };

        observer.on_step_size(step_size);
        self.launch("passive_aggressive", len, || {
            theta
                .data
                .par_chunks_mut(n)
                .zip(grad.data.par_chunks(n))
                .for_each(|(p, g)| {
                    p.iter_mut()
                        .zip(g)
                        .for_each(|(p, &g)| formula::const_step(p, g, step_size));
                });
        });

        Ok(())
    }

    /// Device counterpart of `optimization::adagrad_update`.
    pub fn adagrad_update<T: Scalar>(
        &self,
        theta: &mut DeviceBuffer<T>,
        grad: &DeviceBuffer<T>,
        accum_sq_grad: &mut DeviceBuffer<T>,
        step_size: T,
    ) -> Result<()> {
        let len = theta.len();
        self.check(len, theta)?;
        self.check(len, grad)?;
        self.check(len, accum_sq_grad)?;

        let n = self.chunk_size.get();
        self.launch("adagrad", len, || {
            theta
                .data
                .par_chunks_mut(n)
                .zip(grad.data.par_chunks(n))
                .zip(accum_sq_grad.data.par_chunks_mut(n))
                .for_each(|((p, g), acc)| {
                    p.iter_mut().zip(g).zip(acc).for_each(|((p, &g), acc)| {
                        formula::adagrad_accumulate(acc, g);
                        formula::guarded_step(p, g, *acc, step_size);
                    });
                });
        });

        Ok(())
    }

    /// Device counterpart of `optimization::rmsprop_update`.
    pub fn rmsprop_update<T: Scalar>(
        &self,
        theta: &mut DeviceBuffer<T>,
        grad: &DeviceBuffer<T>,
        accum_sq_grad: &mut DeviceBuffer<T>,
        decay: T,
        step_size: T,
    ) -> Result<()> {
        let len = theta.len();
        self.check(len, theta)?;
        self.check(len, grad)?;
        self.check(len, accum_sq_grad)?;

        let n = self.chunk_size.get();
        self.launch("rmsprop", len, || {
            theta
                .data
                .par_chunks_mut(n)
                .zip(grad.data.par_chunks(n))
                .zip(accum_sq_grad.data.par_chunks_mut(n))
                .for_each(|((p, g), acc)| {
                    p.iter_mut().zip(g).zip(acc).for_each(|((p, &g), acc)| {
                        formula::rmsprop_accumulate(acc, g, decay);
                        formula::guarded_step(p, g, *acc, step_size);
                    });
                });
        });

        Ok(())
    }

    /// Device counterpart of `optimization::adam_update`.
    ///
    /// The bias corrections only depend on `time`, they're computed once before launching and
    /// `time` advances after every element has been updated.
    #[allow(clippy::too_many_arguments)]
    pub fn adam_update<T: Scalar>(
        &self,
        theta: &mut DeviceBuffer<T>,
        grad: &DeviceBuffer<T>,
        first_moment: &mut DeviceBuffer<T>,
        second_moment: &mut DeviceBuffer<T>,
        time: &mut u64,
        alpha: T,
        beta1: T,
        beta2: T,
    ) -> Result<()> {
        let len = theta.len();
        self.check(len, theta)?;
        self.check(len, grad)?;
        self.check(len, first_moment)?;
        self.check(len, second_moment)?;

        let (bc1, bc2) = formula::bias_corrections(beta1, beta2, *time);

        let n = self.chunk_size.get();
        self.launch("adam", len, || {
            theta
                .data
                .par_chunks_mut(n)
                .zip(grad.data.par_chunks(n))
                .zip(first_moment.data.par_chunks_mut(n))
                .zip(second_moment.data.par_chunks_mut(n))
                .for_each(|(((p, g), m), v)| {
                    p.iter_mut().zip(g).zip(m).zip(v).for_each(|(((p, &g), m), v)| {
                        formula::adam_moments(m, v, g, beta1, beta2);
                        formula::adam_step(p, *m, *v, alpha, bc1, bc2);
                    });
                });
        });

        *time += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use super::*;
    use crate::{FnObserver, OptErr};

    fn device() -> Device {
        Device::new(2)
            .unwrap()
            .with_chunk_size(NonZeroUsize::new(3).unwrap())
    }

    #[test]
    fn const_step_spans_every_chunk() {
        let device = device();
        let mut theta = device.upload(&[1.0f64; 10]);
        let grad = device.upload(&[2.0; 10]);

        device.const_step_update(&mut theta, &grad, 0.5).unwrap();

        assert_eq!(theta.to_vec(), vec![0.; 10]);
    }

    #[test]
    fn mismatched_buffers_are_rejected_untouched() {
        let device = device();
        let mut theta = device.upload(&[1.0f64; 4]);
        let grad = device.upload(&[1.0; 4]);
        let mut accum = device.zeros(&[5]);

        let err = device
            .adagrad_update(&mut theta, &grad, &mut accum, 0.1)
            .unwrap_err();

        assert_eq!(err, OptErr::SizeMismatch { expected: 4, got: 5 });
        assert_eq!(theta.to_vec(), vec![1.; 4]);
    }

    #[test]
    fn pa_reports_step_and_skips_without_loss() {
        let device = device();
        let mut theta = device.upload(&[0.0f64, 0.]);
        let grad = device.upload(&[3.0, 4.]);
        let mut steps = Vec::new();
        let mut observer = FnObserver(|s: f64| steps.push(s));

        device
            .pa_update_observed(&mut theta, &grad, 0., &mut observer)
            .unwrap();
        device
            .pa_update_observed(&mut theta, &grad, 5., &mut observer)
            .unwrap();

        assert_eq!(steps, vec![0.2]);
        assert_eq!(theta.to_vec(), vec![-0.6000000000000001, -0.8]);
    }

    #[test]
    fn adam_advances_time_after_kernel() {
        let device = device();
        let mut theta = device.zeros(&[7]);
        let grad = device.upload(&[1.0f64; 7]);
        let mut m = device.zeros(&[7]);
        let mut v = device.zeros(&[7]);
        let mut time = 0;

        device
            .adam_update(&mut theta, &grad, &mut m, &mut v, &mut time, 0.001, 0.9, 0.999)
            .unwrap();

        assert_eq!(time, 1);
        assert!(theta.to_vec().iter().all(|&p| (p + 0.001).abs() < 1e-9));
    }
}
