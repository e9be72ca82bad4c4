use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum PageError {
    #[error("pages are numbered from 1")]
    Zero,
    #[error("page {page} is past the last page ({page_count})")]
    PastEnd { page: u32, page_count: u32 },
}

/// Fixed-size pages over a borrowed, already ordered slice.
pub struct Paginator<'a, T> {
    items: &'a [T],
    page_size: u32,
    page_count: u32,
}

impl<'a, T> Paginator<'a, T> {
    pub fn from(items: &'a [T], page_size: u32) -> Self {
        let page_size = page_size.max(1);
        Paginator {
            items,
            page_size,
            page_count: (items.len() as u32).div_ceil(page_size),
        }
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    /// Out of range requests land on page 1.
    pub fn sanitize(&self, page: u32) -> u32 {
        if page == 0 || page > self.page_count { 1 } else { page }
    }

    pub fn get_page(&self, page: u32) -> Result<&'a [T], PageError> {
        if page == 0 {
            return Err(PageError::Zero);
        }
        if page > self.page_count {
            return Err(PageError::PastEnd { page, page_count: self.page_count });
        }

        let start = (page - 1) as usize * self.page_size as usize;
        let end = self.items.len().min(start.saturating_add(self.page_size as usize));
        Ok(&self.items[start..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_page_is_partial() {
        let slugs = ["a", "b", "c", "d", "e", "f", "g"];
        let paginator = Paginator::from(&slugs, 3);
        assert_eq!(paginator.page_count(), 3);
        assert_eq!(paginator.get_page(2), Ok(["d", "e", "f"].as_slice()));
        assert_eq!(paginator.get_page(3), Ok(["g"].as_slice()));
        assert_eq!(paginator.get_page(0), Err(PageError::Zero));
        assert_eq!(paginator.get_page(4), Err(PageError::PastEnd { page: 4, page_count: 3 }));
    }

    #[test]
    fn single_unbounded_page() {
        let slugs = ["a", "b"];
        let paginator = Paginator::from(&slugs, u32::MAX);
        assert_eq!(paginator.page_count(), 1);
        assert_eq!(paginator.get_page(1), Ok(slugs.as_slice()));
    }

    #[test]
    fn sanitize_out_of_range() {
        let slugs = ["a", "b", "c"];
        let paginator = Paginator::from(&slugs, 2);
        assert_eq!(paginator.sanitize(0), 1);
        assert_eq!(paginator.sanitize(2), 2);
        assert_eq!(paginator.sanitize(7), 1);
    }

    #[test]
    fn no_items_no_pages() {
        let slugs: [&str; 0] = [];
        let paginator = Paginator::from(&slugs, 3);
        assert_eq!(paginator.page_count(), 0);
        assert_eq!(paginator.sanitize(1), 1);
        assert!(paginator.get_page(1).is_err());
    }
}
