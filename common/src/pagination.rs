//! Abstractions for offset pagination.

use serde::{Deserialize, Serialize};

/// Pagination arguments selecting a single [`Page`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Arguments {
    /// Number of the requested [`Page`], starting from `1`.
    pub page: u32,

    /// Maximum number of items on a [`Page`].
    pub limit: u32,
}

impl Arguments {
    /// Number of the first [`Page`].
    pub const FIRST_PAGE: u32 = 1;

    /// Default number of items on a [`Page`].
    pub const DEFAULT_LIMIT: u32 = 12;

    /// Creates new [`Arguments`] falling back to the defaults for the missing
    /// values.
    #[must_use]
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(Self::FIRST_PAGE),
            limit: limit.unwrap_or(Self::DEFAULT_LIMIT),
        }
    }

    /// Returns the number of items preceding the requested [`Page`].
    ///
    /// Page `0` is treated as the first one.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }

    /// Cuts the items of the requested [`Page`] out of all the `items`.
    #[must_use]
    pub fn slice<T>(&self, items: Vec<T>) -> Vec<T> {
        let offset = usize::try_from(self.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(self.limit).unwrap_or(usize::MAX);
        items.into_iter().skip(offset).take(limit).collect()
    }
}

impl Default for Arguments {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Pagination metadata of a [`Page`].
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Total number of items across all pages.
    pub total: u64,

    /// Number of the current [`Page`].
    pub page: u32,

    /// Maximum number of items on a [`Page`].
    pub limit: u32,

    /// Total number of pages.
    pub total_pages: u64,
}

impl Pagination {
    /// Creates new [`Pagination`] of `total` items split by the provided
    /// [`Arguments`].
    #[must_use]
    pub fn new(total: u64, args: &Arguments) -> Self {
        Self {
            total,
            page: args.page,
            limit: args.limit,
            total_pages: total_pages(total, args.limit),
        }
    }
}

/// Returns the number of pages required to fit `total` items by `limit` items
/// on each.
///
/// Zero `limit` fits nothing and results in zero pages.
#[must_use]
pub fn total_pages(total: u64, limit: u32) -> u64 {
    match u64::from(limit) {
        0 => 0,
        limit => total.div_ceil(limit),
    }
}

/// A single page of items.
#[derive(Clone, Debug)]
pub struct Page<T> {
    /// Items on this [`Page`].
    pub items: Vec<T>,

    /// [`Pagination`] metadata of this [`Page`].
    pub pagination: Pagination,
}

impl<T> Page<T> {
    /// Creates a new [`Page`] out of the provided `items`.
    #[must_use]
    pub fn new(items: Vec<T>, total: u64, args: &Arguments) -> Self {
        Self {
            items,
            pagination: Pagination::new(total, args),
        }
    }
}

/// Order of items.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Order {
    /// Ascending order.
    Ascending,

    /// Descending order.
    Descending,
}

impl Order {
    /// Returns SQL keyword representing this [`Order`].
    #[must_use]
    pub const fn sql(&self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

#[cfg(test)]
mod spec {
    use super::{total_pages, Arguments, Pagination};

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 12), 0);
        assert_eq!(total_pages(12, 12), 1);
        assert_eq!(total_pages(13, 12), 2);
        assert_eq!(total_pages(1, 12), 1);
        assert_eq!(total_pages(47, 10), 5);
        assert_eq!(total_pages(100, 1), 100);

        for total in 0..200_u64 {
            for limit in 1..30_u32 {
                let pages = total_pages(total, limit);
                assert!(pages * u64::from(limit) >= total);
                assert!(pages == 0 || (pages - 1) * u64::from(limit) < total);
            }
        }
    }

    #[test]
    fn zero_limit_has_no_pages() {
        assert_eq!(total_pages(0, 0), 0);
        assert_eq!(total_pages(42, 0), 0);
    }

    #[test]
    fn defaults() {
        assert_eq!(Arguments::default(), Arguments { page: 1, limit: 12 });
        assert_eq!(
            Arguments::new(Some(3), None),
            Arguments { page: 3, limit: 12 },
        );
    }

    #[test]
    fn offset() {
        assert_eq!(Arguments { page: 1, limit: 12 }.offset(), 0);
        assert_eq!(Arguments { page: 2, limit: 12 }.offset(), 12);
        assert_eq!(Arguments { page: 5, limit: 10 }.offset(), 40);
        assert_eq!(Arguments { page: 0, limit: 10 }.offset(), 0);
    }

    #[test]
    fn slice() {
        let items = (1..=25).collect::<Vec<_>>();

        assert_eq!(
            Arguments { page: 1, limit: 10 }.slice(items.clone()),
            (1..=10).collect::<Vec<_>>(),
        );
        assert_eq!(
            Arguments { page: 3, limit: 10 }.slice(items.clone()),
            (21..=25).collect::<Vec<_>>(),
        );
        assert!(Arguments { page: 4, limit: 10 }.slice(items).is_empty());
    }

    #[test]
    fn pagination() {
        let args = Arguments { page: 2, limit: 12 };

        assert_eq!(
            Pagination::new(25, &args),
            Pagination {
                total: 25,
                page: 2,
                limit: 12,
                total_pages: 3,
            },
        );
    }

    #[test]
    fn serializes_camel_case() {
        let pagination = Pagination::new(13, &Arguments::default());

        assert_eq!(
            serde_json::to_value(pagination).unwrap(),
            serde_json::json!({
                "total": 13,
                "page": 1,
                "limit": 12,
                "totalPages": 2,
            }),
        );
    }
}
