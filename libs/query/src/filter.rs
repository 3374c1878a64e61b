//! In-memory filter evaluation
//!
//! Predicates never fail: a missing field, a null, or a non-numeric operand of an
//! ordering operator is simply "no match".
//!
//! Clauses fold left to right. An `AND` connector narrows the running result with
//! the next clause. An `OR` connector adds back records that match the next clause
//! from the set the previous clause was evaluated against, so the union never
//! reaches outside what had already survived before that clause.

use crate::parser::{Connector, FilterClause, Operator, Predicate};
use crate::record::{Record, Scalar};
use std::collections::HashSet;

/// Evaluate a single predicate against a record.
pub fn matches(record: &Record, predicate: &Predicate) -> bool {
    let Some(actual) = record.value(&predicate.field) else {
        return false;
    };

    match predicate.operator {
        Operator::Equals | Operator::Colon => {
            normalized(actual) == normalized_query(actual, &predicate.value)
        }
        Operator::Contains => {
            normalized(actual).contains(normalized_query(actual, &predicate.value).as_str())
        }
        Operator::GreaterThan => compare_numeric(actual, &predicate.value, |a, b| a > b),
        Operator::LessThan => compare_numeric(actual, &predicate.value, |a, b| a < b),
        Operator::GreaterOrEqual => compare_numeric(actual, &predicate.value, |a, b| a >= b),
        Operator::LessOrEqual => compare_numeric(actual, &predicate.value, |a, b| a <= b),
    }
}

/// True when every predicate of the clause matches. A clause without predicates matches everything.
pub fn matches_clause(record: &Record, clause: &FilterClause) -> bool {
    clause.predicates.iter().all(|p| matches(record, p))
}

// Text compares case-insensitively; numbers compare by their string form as-is.
fn normalized(value: &Scalar) -> String {
    match value {
        Scalar::Text(s) => s.to_lowercase(),
        other => other.to_string(),
    }
}

fn normalized_query(actual: &Scalar, query: &str) -> String {
    if actual.is_text() {
        query.to_lowercase()
    } else {
        query.to_string()
    }
}

fn compare_numeric(actual: &Scalar, query: &str, op: impl Fn(f64, f64) -> bool) -> bool {
    match (actual.as_f64(), query.trim().parse::<f64>()) {
        (Some(a), Ok(b)) => op(a, b),
        _ => false,
    }
}

/// Apply clauses to `records`, returning the surviving records in first-seen order.
pub fn apply<'a>(records: &'a [Record], clauses: &[FilterClause]) -> Vec<&'a Record> {
    apply_indices(records, clauses)
        .into_iter()
        .map(|i| &records[i])
        .collect()
}

/// Like [`apply`], but returns positions into `records`.
///
/// Positions are the record identity used to de-duplicate `OR` unions.
pub fn apply_indices(records: &[Record], clauses: &[FilterClause]) -> Vec<usize> {
    let all: Vec<usize> = (0..records.len()).collect();
    let Some((first, rest)) = clauses.split_first() else {
        return all;
    };

    let mut input = all;
    let mut result = select(records, &input, first);
    let mut connector = first.connector;

    for clause in rest {
        match connector {
            Some(Connector::Or) => {
                let seen: HashSet<usize> = result.iter().copied().collect();
                let added = select(records, &input, clause);
                result.extend(added.into_iter().filter(|i| !seen.contains(i)));
            }
            Some(Connector::And) | None => {
                input = result;
                result = select(records, &input, clause);
            }
        }
        connector = clause.connector;
    }

    result
}

fn select(records: &[Record], candidates: &[usize], clause: &FilterClause) -> Vec<usize> {
    candidates
        .iter()
        .copied()
        .filter(|&i| matches_clause(&records[i], clause))
        .collect()
}
