//! Batch progress cursor

use crate::domain::CursorError;

/// Pages fetched so far out of the total
///
/// A plain value: [`advance`](Self::advance) returns the next state instead of
/// mutating in place, so the owner only swaps it in once a page has fully
/// succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchCursor {
    pages_fetched: u32,
    pages_total: u32,
}

impl BatchCursor {
    /// Start a cursor at page 0
    pub fn new(pages_total: u32) -> Self {
        Self {
            pages_fetched: 0,
            pages_total,
        }
    }

    /// True once every page has been fetched
    pub fn is_exhausted(&self) -> bool {
        self.pages_fetched == self.pages_total
    }

    /// Index of the next page to fetch
    pub fn current_index(&self) -> u32 {
        self.pages_fetched
    }

    pub fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }

    pub fn pages_total(&self) -> u32 {
        self.pages_total
    }

    /// Pages left to fetch
    pub fn remaining(&self) -> u32 {
        self.pages_total - self.pages_fetched
    }

    /// The state after one more page has been fetched
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::Exhausted`] if no pages remain
    pub fn advance(self) -> Result<Self, CursorError> {
        if self.is_exhausted() {
            return Err(CursorError::Exhausted {
                pages_total: self.pages_total,
            });
        }
        Ok(Self {
            pages_fetched: self.pages_fetched + 1,
            ..self
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cursor_starts_at_zero() {
        let cursor = BatchCursor::new(3);
        assert_eq!(cursor.current_index(), 0);
        assert_eq!(cursor.remaining(), 3);
        assert!(!cursor.is_exhausted());
    }

    #[test]
    fn test_advance_until_exhausted() {
        let mut cursor = BatchCursor::new(2);
        cursor = cursor.advance().unwrap();
        assert_eq!(cursor.current_index(), 1);
        cursor = cursor.advance().unwrap();
        assert!(cursor.is_exhausted());
        assert_eq!(cursor.pages_fetched(), cursor.pages_total());
    }

    #[test]
    fn test_advance_past_end_fails() {
        let cursor = BatchCursor::new(1).advance().unwrap();
        assert_eq!(
            cursor.advance(),
            Err(CursorError::Exhausted { pages_total: 1 })
        );
    }

    #[test]
    fn test_advance_leaves_original_untouched() {
        let cursor = BatchCursor::new(5);
        let next = cursor.advance().unwrap();
        assert_eq!(cursor.current_index(), 0);
        assert_eq!(next.current_index(), 1);
    }

    #[test]
    fn test_zero_pages_is_exhausted() {
        assert!(BatchCursor::new(0).is_exhausted());
    }
}
