use std::path::Path;

use walkdir::WalkDir;

use crate::progress::Progress;
use crate::state::page::Page;

use super::thumbnail;

/// Scan a capture directory for page images, ordered by file name.
///
/// Only direct children are considered; subdirectories are ignored. An
/// entry that cannot be decoded as an image is skipped with a logged line
/// rather than surfaced as an error, so one corrupt scan never blocks a
/// whole book.
pub fn scan_pages(dir: &Path, progress: &mut dyn Progress) -> Vec<Page> {
    let mut pages = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            progress.advance();
            continue;
        }

        match thumbnail::make_thumbnail(path) {
            Some(thumb) => {
                pages.push(Page::new(path.to_path_buf(), Some(thumb)));
                progress.advance();
            }
            None => {
                progress.advance();
                progress.log(&format!("Error loading image: {}", path.display()));
            }
        }
    }

    pages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::{NullProgress, ProgressLog};
    use image::{Rgb, RgbImage};
    use std::fs;

    fn write_image(path: &Path) {
        RgbImage::from_pixel(40, 60, Rgb([10, 20, 30]))
            .save(path)
            .unwrap();
    }

    #[test]
    fn test_scan_orders_by_file_name() {
        let dir = tempfile::tempdir().unwrap();
        write_image(&dir.path().join("page_002.png"));
        write_image(&dir.path().join("page_001.png"));
        write_image(&dir.path().join("page_010.png"));

        let pages = scan_pages(dir.path(), &mut NullProgress);

        let names: Vec<_> = pages.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["page_001", "page_002", "page_010"]);
        assert!(pages.iter().all(|p| p.thumb.is_some()));
    }

    #[test]
    fn test_scan_skips_corrupt_file_with_log() {
        let dir = tempfile::tempdir().unwrap();
        write_image(&dir.path().join("a.png"));
        write_image(&dir.path().join("b.png"));
        fs::write(dir.path().join("broken.jpg"), b"not an image").unwrap();

        let mut progress = ProgressLog::new(3);
        let pages = scan_pages(dir.path(), &mut progress);

        assert_eq!(pages.len(), 2);
        assert_eq!(progress.completed(), 3);
        assert!(progress
            .lines()
            .iter()
            .any(|line| line.contains("broken.jpg")));
    }

    #[test]
    fn test_scan_ignores_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        write_image(&dir.path().join("a.png"));
        fs::create_dir(dir.path().join("nested")).unwrap();
        write_image(&dir.path().join("nested").join("b.png"));

        let pages = scan_pages(dir.path(), &mut NullProgress);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].name, "a");
    }

    #[test]
    fn test_scan_missing_directory_is_empty() {
        let pages = scan_pages(Path::new("/nonexistent/scans"), &mut NullProgress);
        assert!(pages.is_empty());
    }
}
