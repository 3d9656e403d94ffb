//! FileSystem abstraction so the generator can run against temp dirs or memory

mod mock;
mod real;
mod r#trait;

pub use mock::MockFileSystem;
pub use r#trait::FileSystem;
pub use real::RealFileSystem;
