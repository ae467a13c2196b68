/// Ordered, mutable sequence of page entries with selection and grouping
///
/// A PageCollection owns its data independently of any presentation layer.
/// The view observes the `revision` counter to know when to rebuild itself
/// instead of being the source of truth.

use thiserror::Error;

use super::page::{Page, PageEntry, PageGroup};

/// User-input errors raised by grouping operations. The messages are
/// shown verbatim in an error dialog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("No images are selected")]
    NoImagesSelected,
    #[error("No page groups are selected")]
    NoGroupsSelected,
}

/// An ordered sequence of pages and page groups, as displayed in one
/// thumbnail strip.
#[derive(Debug, Clone, Default)]
pub struct PageCollection {
    /// Entries in display order
    entries: Vec<PageEntry>,
    /// Selected indices, kept sorted ascending for deterministic grouping
    selection: Vec<usize>,
    /// Bumped on every structural mutation (load, group, ungroup)
    revision: u64,
}

impl PageCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[PageEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn selection(&self) -> &[usize] {
        &self.selection
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selection.binary_search(&index).is_ok()
    }

    /// Structural mutation counter, for change observation by the view
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace the entire collection with a fresh scan. Clears the
    /// selection. An empty scan yields an empty collection.
    pub fn load(&mut self, pages: Vec<Page>) {
        self.entries = pages.into_iter().map(PageEntry::Page).collect();
        self.selection.clear();
        self.revision += 1;
    }

    /// Add `index` to the selection. Out of range is a silent no-op.
    pub fn select(&mut self, index: usize) {
        if index >= self.entries.len() {
            return;
        }
        if let Err(slot) = self.selection.binary_search(&index) {
            self.selection.insert(slot, index);
        }
    }

    /// Remove `index` from the selection. Not selected is a silent no-op.
    pub fn deselect(&mut self, index: usize) {
        if let Ok(slot) = self.selection.binary_search(&index) {
            self.selection.remove(slot);
        }
    }

    /// Toggle selection membership, for strip clicks
    pub fn toggle(&mut self, index: usize) {
        if self.is_selected(index) {
            self.deselect(index);
        } else {
            self.select(index);
        }
    }

    /// Collapse the current selection into a single group inserted at the
    /// lowest selected index.
    ///
    /// Entries are removed highest-index-first so earlier removals never
    /// shift the indices still to be removed; reversing the removed list
    /// then restores the original ascending order. A one-entry selection
    /// produces a one-page group. Selected entries that are already groups
    /// contribute their member pages, keeping groups exactly one level deep.
    pub fn group(&mut self) -> Result<(), SelectionError> {
        if self.selection.is_empty() {
            return Err(SelectionError::NoImagesSelected);
        }

        let first = self.selection[0];

        let mut removed = Vec::with_capacity(self.selection.len());
        for &index in self.selection.iter().rev() {
            removed.push(self.entries.remove(index));
        }
        removed.reverse();

        let mut pages = Vec::with_capacity(removed.len());
        for entry in removed {
            match entry {
                PageEntry::Page(page) => pages.push(page),
                PageEntry::Group(group) => pages.extend(group.pages),
            }
        }

        self.entries
            .insert(first, PageEntry::Group(PageGroup::new(pages)));
        self.selection.clear();
        self.revision += 1;
        Ok(())
    }

    /// Expand every selected group in place, splicing its member pages
    /// back at the group's position. Selected entries that are not groups
    /// pass through unchanged.
    pub fn ungroup(&mut self) -> Result<(), SelectionError> {
        if self.selection.is_empty() {
            return Err(SelectionError::NoGroupsSelected);
        }

        let selection = std::mem::take(&mut self.selection);
        let old = std::mem::take(&mut self.entries);

        for (index, entry) in old.into_iter().enumerate() {
            match entry {
                PageEntry::Group(group) if selection.binary_search(&index).is_ok() => {
                    self.entries
                        .extend(group.pages.into_iter().map(PageEntry::Page));
                }
                other => self.entries.push(other),
            }
        }

        self.revision += 1;
        Ok(())
    }

    /// Order-preserving copy of every leaf page, with groups expanded.
    /// Does not mutate the collection.
    pub fn flatten(&self) -> Vec<Page> {
        crate::zipper::sequencer::flatten_groups(&self.entries)
    }
}
