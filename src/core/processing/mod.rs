pub mod components;
pub mod mask;
pub mod merge;
pub mod padding;
pub mod pipeline;
pub mod quality;
pub mod resize;
pub mod save;
pub mod tighten;
