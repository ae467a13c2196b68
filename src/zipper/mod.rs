/// Page zipping module
///
/// This module handles:
/// - Interleaving the left and right collections (sequencer.rs)
/// - Writing the merged sequence to the output directory (save.rs)
/// - The batch rename utility with backup/restore (rename.rs)

pub mod rename;
pub mod save;
pub mod sequencer;

#[cfg(test)]
mod tests {
    use crate::progress::ProgressLog;
    use crate::state::collection::PageCollection;
    use crate::state::page::Page;
    use std::fs;

    use super::{save, sequencer};

    /// Full save path: scan results in, interleaved and named files out
    #[test]
    fn test_end_to_end_save() {
        let source = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();

        let mut left = PageCollection::new();
        let mut right = PageCollection::new();

        let mut side = |names: &[&str]| -> Vec<Page> {
            names
                .iter()
                .map(|name| {
                    let path = source.path().join(format!("{}.jpg", name));
                    fs::write(&path, *name).unwrap();
                    Page::new(path, None)
                })
                .collect()
        };

        left.load(side(&["L1", "L2"]));
        right.load(side(&["R1", "R2"]));

        // Right page of a spread comes first in the merged book
        let merged = sequencer::merge_lists(right.entries(), left.entries());
        let pages = sequencer::flatten_groups(&merged);

        let order: Vec<_> = pages.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(order, ["R1", "L1", "R2", "L2"]);

        let mut progress = ProgressLog::new(pages.len());
        save::clear_dir(out.path()).unwrap();
        save::copy_files(&pages, out.path(), "img_", 1, &mut progress).unwrap();

        // Final counter is 1 + 4 = 5, one digit, no leading zeros
        let mut written: Vec<String> = fs::read_dir(out.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        written.sort();
        assert_eq!(written, ["img_1.jpg", "img_2.jpg", "img_3.jpg", "img_4.jpg"]);

        assert_eq!(fs::read_to_string(out.path().join("img_1.jpg")).unwrap(), "R1");
        assert_eq!(fs::read_to_string(out.path().join("img_4.jpg")).unwrap(), "L2");
        assert_eq!(progress.completed(), 4);
    }
}
