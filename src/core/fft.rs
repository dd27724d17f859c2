//! FFT-based FIR filtering for the HRTF stages. Causal convolution
//! truncated to the input length, i.e. y[n] = sum_k h[k] x[n-k] for
//! n < x.len(), matching an online FIR filterbank fed the same signal.

use rustfft::{num_complex::Complex32, FftPlanner};

/// Below this x.len()*h.len() product the direct form is faster than
/// planning FFTs.
const DIRECT_LIMIT: usize = 16_384;

/// Causal FIR filter: full linear convolution cropped to `x.len()` samples.
pub fn fir_filter(x: &[f32], h: &[f32]) -> Vec<f32> {
    let nx = x.len();
    let nh = h.len();
    if nx == 0 || nh == 0 {
        return vec![0.0; nx];
    }
    if nx.saturating_mul(nh) <= DIRECT_LIMIT {
        return fir_direct(x, h);
    }

    let n_fft = (nx + nh - 1).next_power_of_two();
    let mut xa = vec![Complex32::new(0.0, 0.0); n_fft];
    let mut hb = vec![Complex32::new(0.0, 0.0); n_fft];
    for (i, &v) in x.iter().enumerate() {
        xa[i].re = v;
    }
    for (i, &v) in h.iter().enumerate() {
        hb[i].re = v;
    }

    let mut planner = FftPlanner::<f32>::new();
    let fft = planner.plan_fft_forward(n_fft);
    let ifft = planner.plan_fft_inverse(n_fft);

    fft.process(&mut xa);
    fft.process(&mut hb);
    for i in 0..n_fft {
        xa[i] *= hb[i];
    }
    ifft.process(&mut xa);

    let scale = 1.0 / n_fft as f32;
    xa[..nx].iter().map(|z| z.re * scale).collect()
}

#[inline]
fn fir_direct(x: &[f32], h: &[f32]) -> Vec<f32> {
    let nx = x.len();
    let mut y = vec![0.0f32; nx];
    for (j, &hj) in h.iter().enumerate() {
        if hj == 0.0 {
            continue;
        }
        for i in j..nx {
            y[i] += hj * x[i - j];
        }
    }
    y
}
