use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::cursor::Cursor;

/// A positional value bound to a `$n` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Uuid(Uuid),
    Timestamp(DateTime<Utc>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("asc") {
            Some(SortDirection::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Some(SortDirection::Desc)
        } else {
            None
        }
    }

    pub fn to_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Columns a listing may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderColumn {
    PostedAt,
    TotalPrice,
    Likes,
    Members,
}

impl OrderColumn {
    /// Matches the wire names exactly; anything else is not orderable.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "posted_at" => Some(OrderColumn::PostedAt),
            "total_price" => Some(OrderColumn::TotalPrice),
            "likes" => Some(OrderColumn::Likes),
            "members" => Some(OrderColumn::Members),
            _ => None,
        }
    }

    /// Qualified with the deals alias where the name exists on joined tables too.
    pub fn to_sql(&self) -> &'static str {
        match self {
            OrderColumn::PostedAt => "d.posted_at",
            OrderColumn::TotalPrice => "d.total_price",
            OrderColumn::Likes => "likes",
            OrderColumn::Members => "members",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
    pub column: OrderColumn,
    pub direction: SortDirection,
}

impl Default for OrderBy {
    fn default() -> Self {
        Self {
            column: OrderColumn::PostedAt,
            direction: SortDirection::Desc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoRadius {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: i64,
}

/// Validated listing criteria for a single request.
#[derive(Debug, Clone, PartialEq)]
pub struct DealFilter {
    pub search_text: Option<String>,
    pub cursor: Option<Cursor>,
    pub poster_id: Option<Uuid>,
    pub category_id: Option<i64>,
    pub country_code: Option<String>,
    pub geo: Option<GeoRadius>,
    pub show_inactive: bool,
    pub is_featured: Option<bool>,
    pub member_id: Option<Uuid>,
    pub order: OrderBy,
    pub page_size: i64,
    /// Session user; enables the hidden/blocked exclusions.
    pub viewer_id: Option<Uuid>,
}

impl Default for DealFilter {
    fn default() -> Self {
        Self {
            search_text: None,
            cursor: None,
            poster_id: None,
            category_id: None,
            country_code: None,
            geo: None,
            show_inactive: false,
            is_featured: None,
            member_id: None,
            order: OrderBy::default(),
            page_size: 30,
            viewer_id: None,
        }
    }
}

impl DealFilter {
    pub fn with_viewer(mut self, viewer_id: Option<Uuid>) -> Self {
        self.viewer_id = viewer_id;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<SqlParam>,
}
