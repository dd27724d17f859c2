pub mod erb;
pub mod fft;
pub mod gammatone;
pub mod noise;
pub mod timebase;
pub mod transduction;
