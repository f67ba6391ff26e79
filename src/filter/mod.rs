//! Deal listing query builder.
//!
//! Raw query-string parameters are parsed into a validated [`DealFilter`]
//! (see [`parse`]), folded into `AND`-joined predicates with positional
//! parameters by [`FilterWhere`], and composed into one statement by
//! [`Filter`].

pub mod country;
pub mod cursor;
pub mod error;
pub mod filter;
pub mod filter_order;
pub mod filter_where;
pub mod parse;
pub mod types;

pub use cursor::Cursor;
pub use error::FilterError;
pub use filter::Filter;
pub use filter_where::{FilterWhere, Predicate};
pub use parse::ParseOptions;
pub use types::*;
