pub mod legend;
pub mod paint;
pub mod plot;
