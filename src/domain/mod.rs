//! Domain types - pure data independent of I/O

pub mod merged;
pub mod product_line;
pub mod release;
pub mod version_type;

pub use merged::{DeviceNotes, MergedRelease};
pub use product_line::{ProductGroup, ProductLine};
pub use release::{DownloadLink, JsonList, RawRelease, ReleaseDate, Year};
pub use version_type::VersionType;
