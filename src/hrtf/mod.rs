pub mod ircam;
pub mod set;
pub mod sphere;

pub use set::{Binaural, Direction, Hrtf, HrtfSet};
