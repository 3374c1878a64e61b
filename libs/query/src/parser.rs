//! Query sub-language parser
//!
//! Turns free text such as `industry:Tech AND revenue>1000000` into filter clauses.
//!
//! Grammar:
//! ```text
//! query      := clause (connector clause)*
//! connector  := "AND" | "OR"      (case-insensitive, whitespace on both sides)
//! clause     := predicate*
//! predicate  := field op value
//! op         := ">=" | "<=" | ">" | "<" | ":" | "=" | "~"
//! value      := quoted-string | bare-token
//! ```
//!
//! Parsing is lenient: text that does not form a predicate is dropped, and field
//! names are not checked here. An unquoted value runs to the next `"` or to the
//! end of its clause, so `headquarters:New York` keeps the space.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

// Two-character operators come first in the alternation.
static PREDICATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(\w+)\s*(>=|<=|>|<|:|=|~)\s*"?([^"]+)"?"#).expect("predicate pattern is valid")
});

static CONNECTOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s+(AND|OR)\s+").expect("connector pattern is valid"));

/// Comparison operator of a predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `=`
    Equals,
    /// `:`, same meaning as `=`
    Colon,
    /// `~`, substring containment
    Contains,
    /// `>`
    GreaterThan,
    /// `<`
    LessThan,
    /// `>=`
    GreaterOrEqual,
    /// `<=`
    LessOrEqual,
}

impl Operator {
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "=" => Some(Self::Equals),
            ":" => Some(Self::Colon),
            "~" => Some(Self::Contains),
            ">" => Some(Self::GreaterThan),
            "<" => Some(Self::LessThan),
            ">=" => Some(Self::GreaterOrEqual),
            "<=" => Some(Self::LessOrEqual),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Equals => "=",
            Self::Colon => ":",
            Self::Contains => "~",
            Self::GreaterThan => ">",
            Self::LessThan => "<",
            Self::GreaterOrEqual => ">=",
            Self::LessOrEqual => "<=",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Boolean connector between two clauses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connector {
    And,
    Or,
}

impl Connector {
    pub fn parse(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("and") {
            Some(Self::And)
        } else if token.eq_ignore_ascii_case("or") {
            Some(Self::Or)
        } else {
            None
        }
    }
}

/// A single `field op value` condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub field: String,
    pub operator: Operator,
    pub value: String,
}

impl Predicate {
    pub fn new(field: impl Into<String>, operator: Operator, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }
}

/// Predicates that must all hold, plus the connector to the next clause.
///
/// `connector` describes how this clause's result combines with the following
/// clause; it is `None` on the last clause.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterClause {
    pub predicates: Vec<Predicate>,
    pub connector: Option<Connector>,
}

/// Parse a query string into clauses. Blank input yields no clauses.
pub fn parse(query: &str) -> Vec<FilterClause> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }

    let mut clauses = Vec::new();
    let mut segment_start = 0;
    for caps in CONNECTOR_RE.captures_iter(query) {
        let (Some(whole), Some(token)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        clauses.push(FilterClause {
            predicates: parse_predicates(&query[segment_start..whole.start()]),
            connector: Connector::parse(token.as_str()),
        });
        segment_start = whole.end();
    }
    clauses.push(FilterClause {
        predicates: parse_predicates(&query[segment_start..]),
        connector: None,
    });

    clauses
}

fn parse_predicates(segment: &str) -> Vec<Predicate> {
    PREDICATE_RE
        .captures_iter(segment)
        .filter_map(|caps| {
            let field = caps.get(1)?.as_str();
            let operator = Operator::parse(caps.get(2)?.as_str())?;
            let value = caps.get(3)?.as_str();
            Some(Predicate::new(field, operator, value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_input_yields_no_clauses() {
        assert!(parse("").is_empty());
        assert!(parse("   \t ").is_empty());
    }

    #[test]
    fn parses_and_joined_clauses() {
        let clauses = parse("industry:Tech AND revenue>1000000");
        assert_eq!(clauses.len(), 2);
        assert_eq!(
            clauses[0].predicates,
            vec![Predicate::new("industry", Operator::Colon, "Tech")]
        );
        assert_eq!(clauses[0].connector, Some(Connector::And));
        assert_eq!(
            clauses[1].predicates,
            vec![Predicate::new("revenue", Operator::GreaterThan, "1000000")]
        );
        assert_eq!(clauses[1].connector, None);
    }

    #[test]
    fn connectors_are_case_insensitive() {
        let clauses = parse("country:USA or country:UK And size~100");
        assert_eq!(clauses.len(), 3);
        assert_eq!(clauses[0].connector, Some(Connector::Or));
        assert_eq!(clauses[1].connector, Some(Connector::And));
        assert_eq!(clauses[2].connector, None);
    }

    #[test]
    fn two_character_operators_win_over_prefixes() {
        let clauses = parse("revenue>=500 AND net_income<=10");
        assert_eq!(clauses[0].predicates[0].operator, Operator::GreaterOrEqual);
        assert_eq!(clauses[0].predicates[0].value, "500");
        assert_eq!(clauses[1].predicates[0].operator, Operator::LessOrEqual);
        assert_eq!(clauses[1].predicates[0].value, "10");
    }

    #[test]
    fn quoted_values_are_unwrapped() {
        let clauses = parse(r#"headquarters:"New York""#);
        assert_eq!(
            clauses[0].predicates,
            vec![Predicate::new("headquarters", Operator::Colon, "New York")]
        );
    }

    #[test]
    fn quoted_values_allow_several_predicates_per_clause() {
        let clauses = parse(r#"name:"Acme" country:USA"#);
        assert_eq!(clauses.len(), 1);
        assert_eq!(
            clauses[0].predicates,
            vec![
                Predicate::new("name", Operator::Colon, "Acme"),
                Predicate::new("country", Operator::Colon, "USA"),
            ]
        );
    }

    #[test]
    fn bare_values_run_to_end_of_clause() {
        let clauses = parse("headquarters:New York AND size~50");
        assert_eq!(clauses[0].predicates[0].value, "New York");
        assert_eq!(clauses[1].predicates[0].value, "50");
    }

    #[test]
    fn whitespace_around_operator_is_allowed() {
        let clauses = parse("revenue > 1000");
        assert_eq!(
            clauses[0].predicates,
            vec![Predicate::new("revenue", Operator::GreaterThan, "1000")]
        );
    }

    #[test]
    fn garbage_yields_a_clause_without_predicates() {
        let clauses = parse("!!! ???");
        assert_eq!(clauses.len(), 1);
        assert!(clauses[0].predicates.is_empty());
    }

    #[test]
    fn unknown_fields_are_kept() {
        let clauses = parse("ticker:ACME");
        assert_eq!(clauses[0].predicates[0].field, "ticker");
    }

    #[test]
    fn connector_words_inside_values_do_not_split() {
        let clauses = parse("name:ANDROMEDA");
        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0].predicates[0].value, "ANDROMEDA");
    }
}
