/// Output directory writing
///
/// Clears the output directory and copies the merged sequence into it under
/// the assigned names. The copy is not transactional: a failure part-way
/// through propagates and leaves the directory partially written.

use std::fs;
use std::io;
use std::path::Path;

use crate::progress::Progress;
use crate::state::page::Page;

use super::sequencer;

/// Remove every regular file directly inside `path`. Subdirectories are
/// left alone.
pub fn clear_dir(path: &Path) -> io::Result<()> {
    for entry in fs::read_dir(path)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            fs::remove_file(entry.path())?;
        }
    }
    Ok(())
}

/// Copy `pages` into `out` under their assigned names, advancing progress
/// and logging one line per file. Copies keep the source's modification
/// time. Returns the number of files written.
pub fn copy_files(
    pages: &[Page],
    out: &Path,
    prefix: &str,
    start_number: usize,
    progress: &mut dyn Progress,
) -> io::Result<usize> {
    let named = sequencer::assign_names(pages, prefix, start_number);

    for (page, name) in &named {
        let destination = out.join(name);
        let metadata = fs::metadata(&page.path)?;
        fs::copy(&page.path, &destination)?;

        // Not every filesystem reports mtimes; skip when the source has none
        if let Ok(modified) = metadata.modified() {
            fs::File::options()
                .write(true)
                .open(&destination)?
                .set_modified(modified)?;
        }

        progress.advance();
        progress.log(&format!(
            "Copied {} to {}",
            page.path.display(),
            destination.display()
        ));
    }

    Ok(named.len())
}
