//! Repository traits for the metadata store.

pub mod chapters;
pub mod comics;
pub mod pages;

pub use chapters::ChapterRepo;
pub use comics::ComicRepo;
pub use pages::PageRepo;
