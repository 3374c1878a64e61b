//! Null-safe, direction-aware comparison shared by both sort algorithms

use crate::record::{Record, Scalar};
use rust_decimal::Decimal;
use std::cmp::Ordering;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// `"desc"` (any case) is descending; anything else, including no value, is ascending.
    pub fn from_order(order: Option<&str>) -> Self {
        match order {
            Some(order) if order.trim().eq_ignore_ascii_case("desc") => Self::Descending,
            _ => Self::Ascending,
        }
    }

    pub fn is_descending(self) -> bool {
        matches!(self, Self::Descending)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

/// Natural ascending order between two non-null values.
///
/// Integers and decimals compare numerically with each other, text compares by
/// code point, and numbers order before text so the ordering stays total.
pub fn compare_scalars(a: &Scalar, b: &Scalar) -> Ordering {
    match (a, b) {
        (Scalar::Integer(x), Scalar::Integer(y)) => x.cmp(y),
        (Scalar::Integer(x), Scalar::Decimal(y)) => Decimal::from(*x).cmp(y),
        (Scalar::Decimal(x), Scalar::Integer(y)) => x.cmp(&Decimal::from(*y)),
        (Scalar::Decimal(x), Scalar::Decimal(y)) => x.cmp(y),
        (Scalar::Text(x), Scalar::Text(y)) => x.cmp(y),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn type_rank(value: &Scalar) -> u8 {
    match value {
        Scalar::Integer(_) | Scalar::Decimal(_) => 0,
        Scalar::Text(_) => 1,
        Scalar::Null => 2,
    }
}

/// Three-way comparison of two sort keys, where `None` is a null or missing key.
///
/// Nulls go last when ascending and first when descending. Two nulls are equal.
pub fn compare_keys(a: Option<&Scalar>, b: Option<&Scalar>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => match direction {
            SortDirection::Ascending => Ordering::Greater,
            SortDirection::Descending => Ordering::Less,
        },
        (Some(_), None) => match direction {
            SortDirection::Ascending => Ordering::Less,
            SortDirection::Descending => Ordering::Greater,
        },
        (Some(a), Some(b)) => {
            let ordering = compare_scalars(a, b);
            if direction.is_descending() {
                ordering.reverse()
            } else {
                ordering
            }
        }
    }
}

/// Compare two records by `field`.
pub fn compare_records(a: &Record, b: &Record, field: &str, direction: SortDirection) -> Ordering {
    compare_keys(a.value(field), b.value(field), direction)
}
