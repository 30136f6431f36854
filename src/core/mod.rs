//! Core processing building blocks: masking, component grouping, cropping,
//! quality gates, scaling, and artifact saving. These are internal primitives
//! consumed by the high-level `api` module.
pub mod params;
pub mod processing;
