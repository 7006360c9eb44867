//! Data binding: CSV rows to variance-ready data points
//!
//! Columns are bound to roles (category, group, actual, budget, previous year,
//! forecast, comment) by header name. Variance fields are derived from the
//! bound values and recomputed whenever those values change.

use std::io;

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;

use crate::error::DataError;
use crate::variance::{Comparison, Variance};

/// Category label of the row that aggregates everything outside the Top N
pub const OTHERS_CATEGORY: &str = "Others";

/// Header names bound to each data role (matched case-insensitively)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FieldRoles {
    pub category: String,
    pub group: String,
    pub actual: String,
    pub budget: String,
    pub previous_year: String,
    pub forecast: String,
    pub comment: String,
}

impl Default for FieldRoles {
    fn default() -> Self {
        Self {
            category: "category".to_string(),
            group: "group".to_string(),
            actual: "actual".to_string(),
            budget: "budget".to_string(),
            previous_year: "previous_year".to_string(),
            forecast: "forecast".to_string(),
            comment: "comment".to_string(),
        }
    }
}

/// One category row with its derived variances
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataPoint {
    pub category: String,
    pub group: Option<String>,
    pub actual: f64,
    pub budget: Option<f64>,
    pub previous_year: Option<f64>,
    pub forecast: Option<f64>,
    pub comment: Option<String>,
    pub variance_to_budget: Option<Variance>,
    pub variance_to_previous_year: Option<Variance>,
    pub variance_to_forecast: Option<Variance>,
}

impl DataPoint {
    pub fn new(category: impl Into<String>, actual: f64) -> Self {
        Self {
            category: category.into(),
            actual,
            ..Self::default()
        }
    }

    pub fn with_budget(mut self, budget: f64) -> Self {
        self.budget = Some(budget);
        self.recompute_variances();
        self
    }

    pub fn with_previous_year(mut self, previous_year: f64) -> Self {
        self.previous_year = Some(previous_year);
        self.recompute_variances();
        self
    }

    pub fn with_forecast(mut self, forecast: f64) -> Self {
        self.forecast = Some(forecast);
        self.recompute_variances();
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Re-derive every variance field from the current values
    pub fn recompute_variances(&mut self) {
        let actual = self.actual;
        self.variance_to_budget = self.budget.map(|b| Variance::between(actual, b));
        self.variance_to_previous_year = self.previous_year.map(|p| Variance::between(actual, p));
        self.variance_to_forecast = self.forecast.map(|f| Variance::between(actual, f));
    }

    /// The comparison value this row holds for `comparison`
    pub fn comparison_value(&self, comparison: Comparison) -> Option<f64> {
        match comparison {
            Comparison::Budget => self.budget,
            Comparison::PreviousYear => self.previous_year,
            Comparison::Forecast => self.forecast,
        }
    }

    /// The stored variance against `comparison`, with the invert flag applied
    pub fn variance(&self, comparison: Comparison, invert: bool) -> Option<Variance> {
        let stored = match comparison {
            Comparison::Budget => self.variance_to_budget,
            Comparison::PreviousYear => self.variance_to_previous_year,
            Comparison::Forecast => self.variance_to_forecast,
        };
        stored.map(|v| v.oriented(invert))
    }

    /// Whether the row carries a non-empty comment
    pub fn has_comment(&self) -> bool {
        self.comment
            .as_deref()
            .is_some_and(|c| !c.trim().is_empty())
    }
}

/// Whether any row carries a non-empty comment
pub fn has_comments(points: &[DataPoint]) -> bool {
    points.iter().any(DataPoint::has_comment)
}

/// Rows sharing one group value, by index into the full row set
#[derive(Debug, Clone, PartialEq)]
pub struct RowGroup {
    /// `None` for the rows that carry no group value
    pub name: Option<String>,
    pub rows: Vec<usize>,
}

impl RowGroup {
    /// Clone this group's rows out of the full row set
    pub fn points(&self, points: &[DataPoint]) -> Vec<DataPoint> {
        self.rows.iter().map(|&i| points[i].clone()).collect()
    }
}

/// Split rows by group value in order of first appearance
///
/// Rows without a group value form one unnamed group of their own, so every
/// row lands in exactly one group.
pub fn group_rows(points: &[DataPoint]) -> Vec<RowGroup> {
    let mut groups: Vec<RowGroup> = Vec::new();
    for (index, point) in points.iter().enumerate() {
        match groups.iter_mut().find(|g| g.name == point.group) {
            Some(group) => group.rows.push(index),
            None => groups.push(RowGroup {
                name: point.group.clone(),
                rows: vec![index],
            }),
        }
    }
    groups
}

/// Which end of the ranking Top N keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TopNOrder {
    #[default]
    Largest,
    Smallest,
}

impl std::str::FromStr for TopNOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "largest" | "top" => Ok(TopNOrder::Largest),
            "smallest" | "bottom" => Ok(TopNOrder::Smallest),
            _ => Err(format!("unknown top-n order '{s}'")),
        }
    }
}

/// Keep the `count` largest (or smallest) rows by actual value and fold the
/// rest into a single "Others" row
///
/// Kept rows come back in ranking order. Inputs with `count` rows or fewer,
/// and a `count` of zero, are returned unchanged.
pub fn top_n_with_others(points: &[DataPoint], count: usize, order: TopNOrder) -> Vec<DataPoint> {
    if count == 0 || points.len() <= count {
        return points.to_vec();
    }

    let mut ranked = points.to_vec();
    ranked.sort_by(|a, b| match order {
        TopNOrder::Largest => b.actual.total_cmp(&a.actual),
        TopNOrder::Smallest => a.actual.total_cmp(&b.actual),
    });
    let rest = ranked.split_off(count);

    let mut others = DataPoint::new(OTHERS_CATEGORY, rest.iter().map(|p| p.actual).sum());
    others.group = rest[0].group.clone();
    others.budget = sum_present(rest.iter().map(|p| p.budget));
    others.previous_year = sum_present(rest.iter().map(|p| p.previous_year));
    others.forecast = sum_present(rest.iter().map(|p| p.forecast));
    others.recompute_variances();

    tracing::debug!(kept = count, folded = rest.len(), "aggregated Top N rows");
    ranked.push(others);
    ranked
}

/// Sum of the present values; `None` when none is present
fn sum_present(values: impl Iterator<Item = Option<f64>>) -> Option<f64> {
    values.flatten().fold(None, |acc, v| Some(acc.unwrap_or(0.0) + v))
}

/// Column positions of each bound role
struct BoundColumns {
    category: usize,
    actual: usize,
    group: Option<usize>,
    budget: Option<usize>,
    previous_year: Option<usize>,
    forecast: Option<usize>,
    comment: Option<usize>,
}

impl BoundColumns {
    fn bind(headers: &[String], roles: &FieldRoles) -> Result<Self, DataError> {
        let find = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
        let require = |role: &'static str, name: &str| {
            find(name).ok_or_else(|| DataError::missing_column(role, name, headers))
        };

        Ok(Self {
            category: require("category", &roles.category)?,
            actual: require("actual", &roles.actual)?,
            group: find(&roles.group),
            budget: find(&roles.budget),
            previous_year: find(&roles.previous_year),
            forecast: find(&roles.forecast),
            comment: find(&roles.comment),
        })
    }
}

/// Read data points from CSV with a header row
pub fn read_csv<R: io::Read>(reader: R, roles: &FieldRoles) -> Result<Vec<DataPoint>, DataError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(|s| s.to_string()).collect();
    let columns = BoundColumns::bind(&headers, roles)?;

    let mut points = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        points.push(parse_record(&record, &columns, &headers, index + 1)?);
    }

    if points.is_empty() {
        return Err(DataError::Empty);
    }
    tracing::debug!(rows = points.len(), "bound CSV rows");
    Ok(points)
}

/// Read data points from an in-memory CSV string
pub fn read_csv_str(content: &str, roles: &FieldRoles) -> Result<Vec<DataPoint>, DataError> {
    read_csv(content.as_bytes(), roles)
}

fn parse_record(
    record: &StringRecord,
    columns: &BoundColumns,
    headers: &[String],
    row: usize,
) -> Result<DataPoint, DataError> {
    let text = |idx: Option<usize>| {
        idx.and_then(|i| record.get(i))
            .map(str::trim)
            .filter(|s| !s.is_empty())
    };
    let number = |idx: Option<usize>| -> Result<Option<f64>, DataError> {
        match text(idx) {
            None => Ok(None),
            Some(raw) => parse_number(raw).map(Some).ok_or_else(|| {
                let column = idx.map(|i| headers[i].clone()).unwrap_or_default();
                DataError::invalid_number(raw, column, row)
            }),
        }
    };

    let mut point = DataPoint {
        category: text(Some(columns.category)).unwrap_or_default().to_string(),
        group: text(columns.group).map(str::to_string),
        actual: number(Some(columns.actual))?.unwrap_or(0.0),
        budget: number(columns.budget)?,
        previous_year: number(columns.previous_year)?,
        forecast: number(columns.forecast)?,
        comment: text(columns.comment).map(str::to_string),
        ..DataPoint::default()
    };
    point.recompute_variances();
    Ok(point)
}

/// Parse a number, tolerating thousands separators
fn parse_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| *c != ',' && *c != '_').collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}
