//! Domain logic - versions and their textual encodings, independent of I/O

pub mod class;
pub mod codec;
pub mod version;

pub use class::SubstitutionClass;
pub use version::Version;
