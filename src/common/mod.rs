//! Small helpers shared by the package reader and writer.

pub mod unit;
pub mod xml;
