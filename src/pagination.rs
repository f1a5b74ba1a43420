/// Page size shared with the frontend.
pub const QUESTIONS_PER_PAGE: usize = 10;

/// Cuts an ordered collection into 1-based pages of a fixed size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
}

impl Paginator {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Returns the items of `page`. Pages below 1 or past the end are empty.
    pub fn paginate<'a, T>(&self, items: &'a [T], page: i64) -> &'a [T] {
        let Some(skipped) = page
            .checked_sub(1)
            .and_then(|p| usize::try_from(p).ok())
        else {
            return &[];
        };
        let start = match skipped.checked_mul(self.page_size) {
            Some(start) if start < items.len() => start,
            _ => return &[],
        };
        let end = start.saturating_add(self.page_size).min(items.len());
        &items[start..end]
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(QUESTIONS_PER_PAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<usize> {
        (1..=n).collect()
    }

    #[test]
    fn third_page_of_25_has_last_five() {
        let all = items(25);
        assert_eq!(Paginator::default().paginate(&all, 3), &[21, 22, 23, 24, 25]);
    }

    #[test]
    fn empty_collection_gives_empty_first_page() {
        let all: Vec<usize> = Vec::new();
        assert!(Paginator::default().paginate(&all, 1).is_empty());
    }

    #[test]
    fn out_of_range_pages_are_empty() {
        let all = items(25);
        let paginator = Paginator::default();
        assert!(paginator.paginate(&all, 0).is_empty());
        assert!(paginator.paginate(&all, -3).is_empty());
        assert!(paginator.paginate(&all, 4).is_empty());
        assert!(paginator.paginate(&all, i64::MAX).is_empty());
        assert!(paginator.paginate(&all, i64::MIN).is_empty());
    }

    #[test]
    fn pages_concatenate_back_to_input() {
        let paginator = Paginator::default();
        for n in [0, 1, 9, 10, 11, 20, 37] {
            let all = items(n);
            let pages = n.div_ceil(paginator.page_size()) as i64;
            let mut joined = Vec::new();
            for page in 1..=pages {
                let chunk = paginator.paginate(&all, page);
                assert!(chunk.len() <= paginator.page_size());
                joined.extend_from_slice(chunk);
            }
            assert_eq!(joined, all, "n = {n}");
        }
    }

    #[test]
    fn custom_page_size() {
        let all = items(7);
        let paginator = Paginator::new(3);
        assert_eq!(paginator.paginate(&all, 1), &[1, 2, 3]);
        assert_eq!(paginator.paginate(&all, 3), &[7]);
    }

    #[test]
    fn zero_page_size_is_clamped() {
        assert_eq!(Paginator::new(0).page_size(), 1);
    }
}
