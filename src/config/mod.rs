//! Configuration module

mod library;

pub use library::excludes_type;
pub use library::CategorySeed;
pub use library::ContentTypeConfig;
pub use library::LibraryConfig;
pub use library::ServerConfig;
