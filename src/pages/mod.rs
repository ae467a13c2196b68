/// Page discovery module
///
/// This module handles:
/// - Scanning a capture directory for page images
/// - Generating strip thumbnails for each page
/// - Skipping entries that are not decodable images

pub mod scanner;
pub mod thumbnail;
