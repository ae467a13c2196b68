/// Stateless sequencing transforms
///
/// These functions turn two ordered page collections into one interleaved,
/// fully-flattened, deterministically named output sequence. They never
/// hold state and are safe to call from any single thread.

use crate::state::page::{Page, PageEntry};

/// Interleave two ordered sequences by position: a[0], b[0], a[1], b[1], ...
///
/// Unlike a strict zip, unequal lengths never truncate: once the shorter
/// input runs out, the remainder of the longer one is taken alone, so no
/// entry from either input is ever dropped.
pub fn merge_lists(a: &[PageEntry], b: &[PageEntry]) -> Vec<PageEntry> {
    let mut merged = Vec::with_capacity(a.len() + b.len());
    let mut a = a.iter();
    let mut b = b.iter();

    loop {
        match (a.next(), b.next()) {
            (None, None) => break,
            (first, second) => {
                if let Some(entry) = first {
                    merged.push(entry.clone());
                }
                if let Some(entry) = second {
                    merged.push(entry.clone());
                }
            }
        }
    }

    merged
}

/// Expand every group into its member pages, in place and in order.
///
/// Groups from the two sides of a merge are expanded independently, never
/// merged into one. Groups are only ever one level deep, but the expansion
/// recurses anyway so a nested group could not silently drop pages.
pub fn flatten_groups(entries: &[PageEntry]) -> Vec<Page> {
    let mut pages = Vec::with_capacity(entries.len());
    collect_pages(entries, &mut pages);
    pages
}

fn collect_pages(entries: &[PageEntry], out: &mut Vec<Page>) {
    for entry in entries {
        match entry {
            PageEntry::Page(page) => out.push(page.clone()),
            PageEntry::Group(group) => {
                for page in &group.pages {
                    out.push(page.clone());
                }
            }
        }
    }
}

/// Assign output filenames to a flattened sequence.
///
/// Filenames are `prefix + zero-padded counter + original extension`. The
/// counter starts at `start_number` and increments once per page. The
/// padding width is the digit count of `start_number + pages.len()`, the
/// final counter value, so early names are never under-padded.
pub fn assign_names(
    pages: &[Page],
    prefix: &str,
    start_number: usize,
) -> Vec<(Page, String)> {
    let width = digit_count(start_number + pages.len());

    pages
        .iter()
        .enumerate()
        .map(|(offset, page)| {
            let number = start_number + offset;
            let extension = page
                .path
                .extension()
                .map(|ext| format!(".{}", ext.to_string_lossy()))
                .unwrap_or_default();

            let name = format!("{}{:0width$}{}", prefix, number, extension, width = width);
            (page.clone(), name)
        })
        .collect()
}

/// Number of decimal digits in `n` (1 for zero)
pub fn digit_count(n: usize) -> usize {
    let mut n = n;
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::page::PageGroup;
    use std::path::PathBuf;

    fn page(name: &str) -> Page {
        Page::new(PathBuf::from(format!("/scans/{}.jpg", name)), None)
    }

    fn entry(name: &str) -> PageEntry {
        PageEntry::Page(page(name))
    }

    fn names(entries: &[PageEntry]) -> Vec<String> {
        entries.iter().map(|e| e.name().to_string()).collect()
    }

    #[test]
    fn test_merge_equal_lengths() {
        let a = [entry("a1"), entry("a2")];
        let b = [entry("b1"), entry("b2")];

        assert_eq!(names(&merge_lists(&a, &b)), ["a1", "b1", "a2", "b2"]);
    }

    #[test]
    fn test_merge_unequal_lengths_drops_nothing() {
        let a = [entry("a1"), entry("a2")];
        let b = [entry("b1")];

        assert_eq!(names(&merge_lists(&a, &b)), ["a1", "b1", "a2"]);
        assert_eq!(names(&merge_lists(&b, &a)), ["b1", "a1", "a2"]);
    }

    #[test]
    fn test_merge_with_empty_side() {
        let a = [entry("a1"), entry("a2")];

        assert_eq!(names(&merge_lists(&a, &[])), ["a1", "a2"]);
        assert_eq!(names(&merge_lists(&[], &a)), ["a1", "a2"]);
        assert!(merge_lists(&[], &[]).is_empty());
    }

    #[test]
    fn test_merge_keeps_groups_intact() {
        let a = [
            entry("a1"),
            PageEntry::Group(PageGroup::new(vec![page("a2"), page("a3")])),
        ];
        let b = [entry("b1"), entry("b2")];

        let merged = merge_lists(&a, &b);
        assert_eq!(names(&merged), ["a1", "b1", "Group", "b2"]);
    }

    #[test]
    fn test_flatten_groups_expands_in_place() {
        let entries = [
            entry("a"),
            PageEntry::Group(PageGroup::new(vec![page("b"), page("c")])),
            entry("d"),
        ];

        let flat: Vec<_> = flatten_groups(&entries)
            .iter()
            .map(|p| p.name.clone())
            .collect();
        assert_eq!(flat, ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_flatten_groups_is_idempotent() {
        let entries = [
            PageEntry::Group(PageGroup::new(vec![page("a"), page("b")])),
            entry("c"),
        ];

        let once = flatten_groups(&entries);
        let relifted: Vec<PageEntry> = once.iter().cloned().map(PageEntry::Page).collect();
        let twice = flatten_groups(&relifted);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_assign_names_order_and_uniqueness() {
        let pages: Vec<Page> = (0..12).map(|i| page(&format!("p{:02}", i))).collect();
        let named = assign_names(&pages, "img_", 1);

        assert_eq!(named.len(), 12);
        for (i, (original, _)) in named.iter().enumerate() {
            assert_eq!(original, &pages[i]);
        }

        let mut seen: Vec<&String> = named.iter().map(|(_, n)| n).collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 12);
    }

    #[test]
    fn test_assign_names_padding_width() {
        // Four pages from 1: final counter is 5, so one digit
        let pages: Vec<Page> = (0..4).map(|i| page(&format!("p{}", i))).collect();
        let named = assign_names(&pages, "img_", 1);
        let names: Vec<_> = named.iter().map(|(_, n)| n.as_str()).collect();
        assert_eq!(names, ["img_1.jpg", "img_2.jpg", "img_3.jpg", "img_4.jpg"]);

        // Ten pages from 1: final counter is 11, so two digits
        let pages: Vec<Page> = (0..10).map(|i| page(&format!("p{}", i))).collect();
        let named = assign_names(&pages, "img_", 1);
        assert_eq!(named[0].1, "img_01.jpg");
        assert_eq!(named[9].1, "img_10.jpg");
    }

    #[test]
    fn test_assign_names_keeps_original_extension() {
        let pages = vec![
            Page::new(PathBuf::from("/scans/a.png"), None),
            Page::new(PathBuf::from("/scans/b.tiff"), None),
            Page::new(PathBuf::from("/scans/noext"), None),
        ];
        let named = assign_names(&pages, "pg_", 1);
        let names: Vec<_> = named.iter().map(|(_, n)| n.as_str()).collect();
        assert_eq!(names, ["pg_1.png", "pg_2.tiff", "pg_3"]);
    }

    #[test]
    fn test_assign_names_respects_start_number() {
        let pages: Vec<Page> = (0..3).map(|i| page(&format!("p{}", i))).collect();
        let named = assign_names(&pages, "img_", 98);
        let names: Vec<_> = named.iter().map(|(_, n)| n.as_str()).collect();
        // Final counter is 101, so three digits
        assert_eq!(names, ["img_098.jpg", "img_099.jpg", "img_100.jpg"]);
    }

    #[test]
    fn test_digit_count() {
        assert_eq!(digit_count(0), 1);
        assert_eq!(digit_count(9), 1);
        assert_eq!(digit_count(10), 2);
        assert_eq!(digit_count(99), 2);
        assert_eq!(digit_count(100), 3);
    }
}
