mod build;
mod merge;
mod ops;
mod types;

pub use build::*;
pub use merge::combine;
pub use ops::*;
pub use types::*;
