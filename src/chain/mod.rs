pub mod joint;
pub mod model;
pub mod snapshot;

pub use joint::*;
pub use model::*;
pub use snapshot::*;
