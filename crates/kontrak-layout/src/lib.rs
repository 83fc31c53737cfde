//! Pagination of assembled contract text.
//!
//! [`Paginator::paginate`] turns a document string into [`Placement`]s:
//! (page, position, wrapped rows) records that an export writer draws as-is
//! or that a screen preview shows page by page.
//!
//! ```
//! use kontrak_layout::{PageLayout, Paginator, TextStyle};
//!
//! let pagination = Paginator::paginate("LEASE\n\nThe Landlord leases...", &PageLayout::default());
//! assert_eq!(pagination.page_count, 1);
//! assert_eq!(pagination.placements[0].style, TextStyle::Title);
//! ```

mod page;
mod paginator;
mod wrap;

pub use page::{FontSpec, PageLayout, TextStyle, MM_PER_PT};
pub use paginator::{Pagination, Paginator, Placement};
pub use wrap::{display_width, expand_tabs, wrap_line};
