use crate::model::lesson::VocabEntry;

pub const DEFAULT_VOCAB_PER_PAGE: usize = 3;
pub const NO_VOCABULARY: &str = "No vocabulary items in this lesson.";

/// Page cursor over a lesson's vocabulary list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabPager {
    len: usize,
    per_page: usize,
    page: usize,
}

impl VocabPager {
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self::with_page_size(len, DEFAULT_VOCAB_PER_PAGE)
    }

    /// A `per_page` of zero is treated as one.
    #[must_use]
    pub fn with_page_size(len: usize, per_page: usize) -> Self {
        Self {
            len,
            per_page: per_page.max(1),
            page: 0,
        }
    }

    /// Zero-based page index.
    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.len.div_ceil(self.per_page)
    }

    #[must_use]
    pub fn has_prev(&self) -> bool {
        self.page > 0
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page + 1 < self.total_pages()
    }

    /// Returns `false` when already on the last page.
    pub fn next(&mut self) -> bool {
        if self.has_next() {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// Returns `false` when already on the first page.
    pub fn prev(&mut self) -> bool {
        if self.has_prev() {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    /// Entries on the current page.
    #[must_use]
    pub fn items<'a>(&self, vocabulary: &'a [VocabEntry]) -> &'a [VocabEntry] {
        let start = (self.page * self.per_page).min(vocabulary.len());
        let end = (start + self.per_page).min(vocabulary.len());
        &vocabulary[start..end]
    }

    /// `Page 1 of 3`, or [`NO_VOCABULARY`] when there is nothing to page.
    #[must_use]
    pub fn label(&self) -> String {
        match self.total_pages() {
            0 => NO_VOCABULARY.to_owned(),
            total => format!("Page {} of {total}", self.page + 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab(count: usize) -> Vec<VocabEntry> {
        (0..count)
            .map(|i| VocabEntry {
                korean: format!("단어{i}"),
                romanization: format!("daneo{i}"),
                english: format!("word {i}"),
            })
            .collect()
    }

    #[test]
    fn pages_of_three() {
        let words = vocab(7);
        let mut pager = VocabPager::new(words.len());
        assert_eq!(pager.total_pages(), 3);
        assert_eq!(pager.items(&words).len(), 3);
        assert!(!pager.has_prev());

        assert!(pager.next());
        assert!(pager.next());
        assert_eq!(pager.label(), "Page 3 of 3");
        assert_eq!(pager.items(&words).len(), 1);
        assert_eq!(pager.items(&words)[0].korean, "단어6");
        assert!(!pager.next());
        assert_eq!(pager.page(), 2);
    }

    #[test]
    fn prev_clamps_at_first_page() {
        let mut pager = VocabPager::new(2);
        assert_eq!(pager.total_pages(), 1);
        assert!(!pager.prev());
        assert!(!pager.has_next());
    }

    #[test]
    fn empty_vocabulary_has_no_pages() {
        let pager = VocabPager::new(0);
        assert_eq!(pager.total_pages(), 0);
        assert!(pager.items(&[]).is_empty());
        assert_eq!(pager.label(), "No vocabulary items in this lesson.");
    }
}
