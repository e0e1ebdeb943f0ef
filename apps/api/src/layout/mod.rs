// Resume layout: fixed template composition, line wrapping, pagination.
// Pure and CPU-bound; callers on the async runtime run it inside spawn_blocking.

pub mod composer;
pub mod font_metrics;
pub mod paginator;

// Re-export the public API consumed by the renderer.
pub use composer::compose;
pub use paginator::{paginate, PageSpec};
