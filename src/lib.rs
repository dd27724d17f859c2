//! Spike-timing sound-source localization over HRTF filterbanks.
//!
//! Implements the "ideal" localization model: a broadband stimulus is
//! filtered through the HRTF of its true location, the channels are swapped,
//! and every candidate HRTF in the set is applied on top. At the correct
//! candidate both ears carry the same composite filter, so the left/right
//! cochlear channels line up in time and the coincidence-detector assembly
//! for that location fires hardest.

pub mod audio;
pub mod cli;
pub mod config;
pub mod core;
pub mod decoder;
pub mod hrtf;
pub mod net;
pub mod pipeline;
pub mod plot;
