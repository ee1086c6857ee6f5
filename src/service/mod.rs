pub mod runner;

pub use runner::{ReconcilerService, RunReport};
