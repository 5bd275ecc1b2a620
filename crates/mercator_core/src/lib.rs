pub mod locations;
pub mod matrix;
