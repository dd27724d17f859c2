pub mod coincidence;
pub mod lif;
