/// State management module
///
/// This module handles the page sequencing model, independent of the UI:
/// - Shared data structures (page.rs)
/// - Ordered collections with selection and grouping (collection.rs)

pub mod collection;
pub mod page;
