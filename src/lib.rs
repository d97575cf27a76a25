pub mod core_types;
pub mod error;
pub mod moc;
pub mod uniform;

pub use core_types::{Gene, Segment};
pub use error::{CrossoverError, GwResult};
