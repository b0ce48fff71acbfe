/// Number of records shown in the "recent items" lists.
pub const PREVIEW_LIMIT: usize = 5;

/// First [`PREVIEW_LIMIT`] items in input order. No sorting is applied, so the
/// result is only "most recent" if the source already lists newest first.
pub fn preview<T: Clone>(items: &[T]) -> Vec<T> {
    items.iter().take(PREVIEW_LIMIT).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_is_bounded_prefix() {
        for len in 0..12 {
            let items: Vec<usize> = (0..len).collect();
            let head = preview(&items);
            assert_eq!(head.len(), len.min(PREVIEW_LIMIT));
            assert_eq!(head[..], items[..head.len()]);
        }
    }
}
