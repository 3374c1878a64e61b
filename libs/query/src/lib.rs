//! Tally query core
//!
//! Pure, synchronous building blocks for querying an in-memory company dataset:
//! - [`record`]: the flattened row model (`Record`, `Scalar`)
//! - [`parser`]: the text query sub-language (`industry:Tech AND revenue>1000000`)
//! - [`filter`]: predicate evaluation and AND/OR clause folding
//! - [`compare`]: null-safe, direction-aware key comparison
//! - [`sort`]: merge-sort and quick-sort over records keyed by a field
//!
//! Nothing in this crate performs I/O or can fail. Loading and caching the
//! dataset lives in the server crate.
//!
//! ```
//! use tally_query::{filter, parser, sort, Record, SortAlgorithm, SortDirection};
//!
//! let data = vec![
//!     Record::new().with("name", "Acme").with("country", "USA").with("founded_year", 2001_i64),
//!     Record::new().with("name", "Beta").with("country", "UK").with("founded_year", 1995_i64),
//!     Record::new().with("name", "Gamma").with("country", "France").with("founded_year", 1980_i64),
//! ];
//!
//! let clauses = parser::parse("country:USA OR country:UK");
//! let matched = filter::apply(&data, &clauses);
//! let sorted = sort::sort(&matched, "founded_year", SortDirection::Ascending, SortAlgorithm::QuickSort);
//!
//! let names: Vec<_> = sorted.iter().map(|r| r.get("name").unwrap().to_string()).collect();
//! assert_eq!(names, ["Beta", "Acme"]);
//! ```

pub mod compare;
pub mod filter;
pub mod parser;
pub mod record;
pub mod sort;

pub use compare::SortDirection;
pub use parser::{Connector, FilterClause, Operator, Predicate};
pub use record::{Record, Scalar, FIELDS};
pub use sort::SortAlgorithm;
