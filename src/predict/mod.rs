//! Model artifact loading and inference.
//!
//! The artifact is an opaque pre-fitted estimator serialized to JSON. The
//! dashboard never trains or modifies it; the only capability consumed here
//! is "one ordered row of numeric features in, one scalar out". The feature
//! names recorded at training time travel with the artifact so a prediction
//! against a mismatched dataset is refused instead of silently reordered.

pub mod artifact;
pub mod engine;
