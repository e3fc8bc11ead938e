pub mod counter;
pub mod traits;

// Re-export commonly used types
pub use counter::CounterApi;
pub use traits::{Visualization, VisualizationApi};
