/// Whether `page_num` addresses a page of a `len`-item listing.
///
/// Page 1 always exists, even for an empty listing.
pub fn page_in_bounds(len: usize, page_num: Option<i64>, items_per_page: usize) -> bool {
    let Some(page_num) = page_num else {
        return false;
    };
    if page_num < 1 {
        return false;
    }
    if page_num == 1 {
        return true;
    }
    let Ok(skipped) = usize::try_from(page_num - 1) else {
        return false;
    };
    skipped
        .checked_mul(items_per_page)
        .is_some_and(|start| start < len)
}

/// Items of page `page_num`; empty when the page starts past the end.
pub fn page_values<T>(items: &[T], page_num: i64, items_per_page: usize) -> &[T] {
    let start = usize::try_from(page_num.saturating_sub(1))
        .unwrap_or(0)
        .saturating_mul(items_per_page)
        .min(items.len());
    let end = start.saturating_add(items_per_page).min(items.len());
    &items[start..end]
}

/// One page of a listing plus what the view needs for prev/next links.
#[derive(Debug, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub page_num: i64,
    pub has_prev: bool,
    pub has_next: bool,
}

impl<'a, T> Page<'a, T> {
    /// `None` when the requested page is out of bounds.
    pub fn load(items: &'a [T], page_num: Option<i64>, items_per_page: usize) -> Option<Self> {
        if !page_in_bounds(items.len(), page_num, items_per_page) {
            return None;
        }
        let page_num = page_num?;
        Some(Self {
            items: page_values(items, page_num, items_per_page),
            page_num,
            has_prev: page_in_bounds(items.len(), Some(page_num - 1), items_per_page),
            has_next: page_in_bounds(items.len(), Some(page_num + 1), items_per_page),
        })
    }
}
