//! HTTP request handlers.

pub mod common;
pub mod dashboard;
pub mod reader;

pub use common::*;
pub use dashboard::*;
pub use reader::*;
