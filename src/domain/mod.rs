pub mod distribution;
pub mod observation;
