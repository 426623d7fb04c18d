pub mod merge;
pub mod pipeline;
pub mod refine;

pub use merge::*;
pub use pipeline::*;
pub use refine::*;
