pub mod check;
pub mod finding;
pub mod raw;
pub mod repo;

pub use check::*;
pub use finding::*;
pub use raw::*;
pub use repo::*;
