//! Offset index from the flattened page buffer back to leaf zones.

/// Where one leaf's fragment sits in the flattened buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatEntry<N> {
    /// Buffer length before this leaf was appended; for every leaf but the
    /// first this is the position of the separating space.
    pub offset: usize,
    /// First byte of the fragment itself.
    pub start: usize,
    /// One past the last byte of the fragment.
    pub end: usize,
    /// The leaf that produced the fragment.
    pub node: N,
}

impl<N> FlatEntry<N> {
    /// Byte range of the fragment.
    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

/// Ordered mapping from buffer offsets to the leaves that produced them.
///
/// Offsets are strictly increasing, one entry per leaf that contributed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatIndex<N> {
    entries: Vec<FlatEntry<N>>,
}

impl<N> Default for FlatIndex<N> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<N: Copy> FlatIndex<N> {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry; offsets must keep increasing.
    pub(crate) fn push(&mut self, entry: FlatEntry<N>) {
        debug_assert!(self.entries.last().map_or(true, |last| last.offset < entry.offset));
        self.entries.push(entry);
    }

    /// All entries in buffer order.
    pub fn entries(&self) -> &[FlatEntry<N>] {
        &self.entries
    }

    /// Number of indexed leaves.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no leaf contributed text.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry covering a buffer offset.
    ///
    /// Each entry owns `[offset, next.offset)`: the separator in front of the
    /// fragment plus the fragment. An offset that falls on a separator thus
    /// resolves to the leaf that follows it. Offsets at or past the end of
    /// the buffer resolve to nothing.
    pub fn entry_at(&self, offset: usize) -> Option<&FlatEntry<N>> {
        let last = self.entries.last()?;
        if offset >= last.end {
            return None;
        }
        let index = self.entries.partition_point(|entry| entry.offset <= offset);
        self.entries.get(index.checked_sub(1)?)
    }

    /// Leaf that produced the character at a buffer offset.
    ///
    /// # Examples
    ///
    /// ```
    /// use djvu_text::text::flatten;
    /// use djvu_text::zone::{PageText, TextTree};
    ///
    /// let page = PageText::parse(
    ///     r#"(line 0 0 70 10 (word 0 0 30 10 "cat") (word 40 0 70 10 "dog"))"#,
    ///     &Default::default(),
    /// )?;
    /// let flat = flatten(&page, 64);
    /// assert_eq!(flat.text, "cat dog");
    ///
    /// let dog = flat.index.locate(4).unwrap();
    /// assert_eq!(page.text(dog), Some("dog"));
    /// // The separator belongs to the following leaf.
    /// assert_eq!(flat.index.locate(3), Some(dog));
    /// assert_eq!(flat.index.locate(7), None);
    /// # Ok::<(), djvu_text::Error>(())
    /// ```
    pub fn locate(&self, offset: usize) -> Option<N> {
        self.entry_at(offset).map(|entry| entry.node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// "ab cde f" with leaves 0, 1, 2
    fn sample() -> FlatIndex<u32> {
        let mut index = FlatIndex::new();
        index.push(FlatEntry { offset: 0, start: 0, end: 2, node: 0 });
        index.push(FlatEntry { offset: 2, start: 3, end: 6, node: 1 });
        index.push(FlatEntry { offset: 6, start: 7, end: 8, node: 2 });
        index
    }

    #[test]
    fn test_locate_first_and_last() {
        let index = sample();
        assert_eq!(index.locate(0), Some(0));
        assert_eq!(index.locate(7), Some(2));
    }

    #[test]
    fn test_locate_inside_fragment() {
        let index = sample();
        assert_eq!(index.locate(1), Some(0));
        assert_eq!(index.locate(4), Some(1));
        assert_eq!(index.locate(5), Some(1));
    }

    #[test]
    fn test_locate_separator_resolves_forward() {
        let index = sample();
        assert_eq!(index.locate(2), Some(1));
        assert_eq!(index.locate(6), Some(2));
    }

    #[test]
    fn test_locate_out_of_range() {
        let index = sample();
        assert_eq!(index.locate(8), None);
        assert_eq!(index.locate(usize::MAX), None);
        assert_eq!(FlatIndex::<u32>::new().locate(0), None);
    }

    #[test]
    fn test_entry_range() {
        let index = sample();
        assert_eq!(index.entry_at(4).map(FlatEntry::range), Some(3..6));
    }
}
