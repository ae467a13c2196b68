/// UI building blocks for the main window
///
/// This module handles:
/// - Labeled directory browser rows (browser.rs)
/// - Thumbnail strips and the merged preview grid (strip.rs)

pub mod browser;
pub mod strip;
