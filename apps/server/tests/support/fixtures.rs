use rust_decimal::Decimal;
use tally_query::Record;

/// One joined row in column order.
#[allow(clippy::too_many_arguments)]
pub fn company_row(
    id: i64,
    name: &str,
    industry: &str,
    country: &str,
    founded_year: i32,
    financial_year: Option<i32>,
    revenue: Option<Decimal>,
    net_income: Option<Decimal>,
) -> Record {
    Record::new()
        .with("id", id)
        .with("name", name)
        .with("industry", industry)
        .with("country", country)
        .with("founded_year", founded_year)
        .with("company_type", "Public")
        .with("size", "500")
        .with("ceo_name", format!("CEO of {name}"))
        .with("headquarters", "New York")
        .with("financial_year", financial_year)
        .with("revenue", revenue)
        .with("net_income", net_income)
}

pub fn money(units: i64) -> Option<Decimal> {
    Some(Decimal::new(units * 100, 2))
}

/// Small dataset covering text, numeric and null keys.
pub fn sample_companies() -> Vec<Record> {
    vec![
        company_row(1, "Acme", "Tech", "USA", 2001, Some(2024), money(2_000_000), money(150_000)),
        company_row(2, "Beta", "Finance", "UK", 1995, Some(2024), money(5_000_000), money(-20_000)),
        company_row(3, "Gamma", "Tech", "France", 1980, Some(2023), money(750_000), money(10_000)),
        company_row(4, "Delta", "Retail", "USA", 2010, None, None, None),
    ]
}
