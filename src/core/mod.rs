//! Core enumeration logic: granule grouping and product-name parsing

pub mod gunw;
pub mod stack;

// Re-export main entry points
pub use gunw::{any_product_matches, dates_match, parse_date_pair};
pub use stack::{build_stack, group_granules};
