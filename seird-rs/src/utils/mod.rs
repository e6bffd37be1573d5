pub mod ascii_plot;

pub use ascii_plot::*;
