//! Query modules for each domain table, plus the dataset rollup.

pub mod annotations;
pub mod images;
pub mod overview;
