/// Shared data structures for the page model
///
/// These structs represent the data that flows between
/// the scanning layer and the UI layer.

use std::path::PathBuf;

use crate::pages::thumbnail::Thumbnail;

/// Display label used for every page group
pub const GROUP_NAME: &str = "Group";

/// Represents a single scanned page image
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Full path to the image file
    pub path: PathBuf,
    /// Display label: the filename without its extension
    pub name: String,
    /// Strip thumbnail (None when the page was created without one)
    pub thumb: Option<Thumbnail>,
}

impl Page {
    /// Create a page for an image file. The display name is derived
    /// from the file stem, so "scan_0042.jpg" shows as "scan_0042".
    pub fn new(path: PathBuf, thumb: Option<Thumbnail>) -> Self {
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        Page { path, name, thumb }
    }
}

/// A user-created cluster of pages. Groups own their members exclusively
/// and are always non-empty; ungrouping hands the pages back to the
/// collection. Groups never contain other groups.
#[derive(Debug, Clone, PartialEq)]
pub struct PageGroup {
    /// Member pages in display order
    pub pages: Vec<Page>,
}

impl PageGroup {
    pub fn new(pages: Vec<Page>) -> Self {
        debug_assert!(!pages.is_empty(), "page groups are never empty");
        PageGroup { pages }
    }

    pub fn name(&self) -> &'static str {
        GROUP_NAME
    }
}

/// One entry in a page collection: either a leaf page or a group.
/// A tagged union so call sites that draw, merge, or flatten never
/// need runtime type checks.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEntry {
    Page(Page),
    Group(PageGroup),
}

impl PageEntry {
    /// Display label for the strip
    pub fn name(&self) -> &str {
        match self {
            PageEntry::Page(page) => &page.name,
            PageEntry::Group(group) => group.name(),
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, PageEntry::Group(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_name_is_file_stem() {
        let page = Page::new(PathBuf::from("/scans/left/page_001.jpg"), None);
        assert_eq!(page.name, "page_001");
    }

    #[test]
    fn test_entry_names() {
        let page = Page::new(PathBuf::from("a.png"), None);
        let group = PageGroup::new(vec![page.clone()]);

        assert_eq!(PageEntry::Page(page).name(), "a");
        assert_eq!(PageEntry::Group(group).name(), "Group");
    }
}
