pub mod metadata;
pub mod revision;
pub mod section;

pub use metadata::Metadata;
pub use revision::Revision;
pub use section::Section;
