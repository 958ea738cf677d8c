//! Descriptive statistics over the numeric columns of a loaded table.
//!
//! All aggregation here excludes missing cells and never panics on
//! degenerate input: empty columns report undefined summaries, zero-variance
//! pairs report `NaN` correlations, constant columns collapse to a single
//! histogram bin. Display rounding is left to the UI; everything returned
//! here is full precision.

pub mod correlation;
pub mod density;
pub mod summary;
