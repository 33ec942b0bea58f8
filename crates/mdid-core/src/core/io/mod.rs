//! # File I/O Module
//!
//! - [`traits`] - the trajectory reader seam that loads topology + trajectory files
//! - [`table`] - CSV export of window, segment and label tables

pub mod table;
pub mod traits;
