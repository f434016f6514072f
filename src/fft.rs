//! Real-signal FFT with preallocated buffers and prebuilt plans.

use std::sync::Arc;

use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};

/// Errors that can occur when setting up an FFT.
#[derive(Debug, thiserror::Error)]
pub enum FftError {
    #[error("FFT size must be greater than zero")]
    ZeroSize,
}

/// Forward/backward transform pair for a fixed-size real signal.
///
/// Owns a time-domain buffer of `size` samples and a frequency-domain
/// buffer of `size / 2 + 1` bins (the non-redundant half of the spectrum of
/// a real signal). Both plans are built once in [`BasicFft::new`] and reused.
pub struct BasicFft {
    size: usize,
    time: Vec<f64>,
    freq: Vec<Complex<f64>>,
    forward_plan: Arc<dyn Fft<f64>>,
    inverse_plan: Arc<dyn Fft<f64>>,
    /// Full-length complex work buffer shared by both directions
    work: Vec<Complex<f64>>,
    scratch: Vec<Complex<f64>>,
}

impl BasicFft {
    pub fn new(size: usize) -> Result<Self, FftError> {
        if size == 0 {
            return Err(FftError::ZeroSize);
        }

        let mut planner = FftPlanner::<f64>::new();
        let forward_plan = planner.plan_fft_forward(size);
        let inverse_plan = planner.plan_fft_inverse(size);
        let scratch_len = forward_plan
            .get_inplace_scratch_len()
            .max(inverse_plan.get_inplace_scratch_len());

        log::debug!("planned {}-point FFT", size);

        Ok(Self {
            size,
            time: vec![0.0; size],
            freq: vec![Complex::default(); size / 2 + 1],
            forward_plan,
            inverse_plan,
            work: vec![Complex::default(); size],
            scratch: vec![Complex::default(); scratch_len],
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn time(&self) -> &[f64] {
        &self.time
    }

    pub fn time_mut(&mut self) -> &mut [f64] {
        &mut self.time
    }

    pub fn freq(&self) -> &[Complex<f64>] {
        &self.freq
    }

    pub fn freq_mut(&mut self) -> &mut [Complex<f64>] {
        &mut self.freq
    }

    /// Transform the time buffer into the frequency buffer (unnormalized).
    pub fn forward(&mut self) -> &[Complex<f64>] {
        for (w, &t) in self.work.iter_mut().zip(&self.time) {
            *w = Complex::new(t, 0.0);
        }
        self.forward_plan
            .process_with_scratch(&mut self.work, &mut self.scratch);
        let bins = self.freq.len();
        self.freq.copy_from_slice(&self.work[..bins]);
        &self.freq
    }

    /// Transform the frequency buffer back into the time buffer.
    ///
    /// The result is scaled by `1 / size`, so `forward` followed by
    /// `inverse` reproduces the original signal. Imaginary parts of the DC
    /// and Nyquist bins do not contribute to a real signal and are ignored.
    pub fn inverse(&mut self) -> &[f64] {
        let n = self.size;
        let bins = self.freq.len();
        self.work[..bins].copy_from_slice(&self.freq);
        // Rebuild the redundant half from Hermitian symmetry
        for k in bins..n {
            self.work[k] = self.freq[n - k].conj();
        }
        self.inverse_plan
            .process_with_scratch(&mut self.work, &mut self.scratch);

        let scale = 1.0 / n as f64;
        for (t, w) in self.time.iter_mut().zip(&self.work) {
            *t = w.re * scale;
        }
        &self.time
    }
}
