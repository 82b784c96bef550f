//! Data models shared between the server and admin clients

pub mod book;
pub mod notification;
pub mod order;
pub mod review;
pub mod session;
pub mod user;

pub use book::{Book, BookPriceUpdate, BookPublic, BookStockUpdate};
pub use notification::{Notification, NotificationKind};
pub use order::{Order, OrderCreate, OrderListQuery, OrderResponse, OrderStatus, OrderStatusUpdate};
pub use review::{Review, ReviewCreate, ReviewPublic, ReviewStatus, ReviewStatusUpdate};
pub use session::Session;
pub use user::User;

use serde::{Deserialize, Serialize};

/// Paginated listing envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    /// Build a page from a slice of results plus the total row count
    pub fn new(items: Vec<T>, total: i64, page: i64, limit: i64) -> Self {
        let total_pages = if limit > 0 {
            (total + limit - 1) / limit
        } else {
            0
        };
        Self {
            items,
            total,
            page,
            total_pages,
        }
    }

    /// Convert the items while keeping the page metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_total_pages() {
        let page = Page::new(vec![1, 2, 3], 25, 1, 10);
        assert_eq!(page.total_pages, 3);

        let page = Page::new(vec![1], 10, 1, 10);
        assert_eq!(page.total_pages, 1);

        let page: Page<i32> = Page::new(vec![], 0, 1, 10);
        assert_eq!(page.total_pages, 0);
    }
}
