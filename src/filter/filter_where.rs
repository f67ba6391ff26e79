use uuid::Uuid;

use super::cursor::CursorPredicate;
use super::types::{DealFilter, GeoRadius, SqlParam};

/// A single WHERE fragment. Implementations push their placeholder values
/// through [`FilterWhere::param`] so numbering stays global to the statement.
pub trait Predicate {
    fn apply(&self, builder: &mut FilterWhere);
}

/// Accumulates `AND`-joined conditions together with their parameter vector.
#[derive(Debug, Default)]
pub struct FilterWhere {
    conditions: Vec<String>,
    param_values: Vec<SqlParam>,
}

impl FilterWhere {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the conditions for a listing in a fixed order.
    pub fn generate(filter: &DealFilter) -> Self {
        let mut builder = Self::new();

        if let Some(text) = &filter.search_text {
            builder.add(&TitleSimilarTo(text));
        }
        if let Some(cursor) = &filter.cursor {
            builder.add(&CursorPredicate { column: "d.posted_at", cursor });
        }
        if let Some(poster_id) = filter.poster_id {
            builder.add(&PostedBy(poster_id));
        }
        if let Some(category_id) = filter.category_id {
            builder.add(&InCategory(category_id));
        }
        if let Some(code) = &filter.country_code {
            builder.add(&InCountry(code));
        }
        if let Some(geo) = &filter.geo {
            builder.add(&WithinRadius(geo));
        }
        if !filter.show_inactive {
            builder.add(&ActiveOnly);
        }
        if let Some(featured) = filter.is_featured {
            builder.add(&Featured(featured));
        }
        if let Some(viewer_id) = filter.viewer_id {
            builder.add(&NotHiddenBy(viewer_id));
            builder.add(&PosterNotBlockedBy(viewer_id));
        }
        if let Some(member_id) = filter.member_id {
            builder.add(&JoinedBy(member_id));
        }

        builder
    }

    pub fn add(&mut self, predicate: &dyn Predicate) -> &mut Self {
        predicate.apply(self);
        self
    }

    pub fn push(&mut self, condition: String) {
        self.conditions.push(condition);
    }

    /// Appends a value and returns its placeholder.
    pub fn param(&mut self, value: SqlParam) -> String {
        self.param_values.push(value);
        format!("${}", self.param_values.len())
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn to_sql(&self) -> String {
        self.conditions.join(" AND ")
    }

    pub fn into_parts(self) -> (String, Vec<SqlParam>) {
        let sql = self.to_sql();
        (sql, self.param_values)
    }
}

/// Trigram similarity on the title (`pg_trgm`).
pub struct TitleSimilarTo<'a>(pub &'a str);

impl Predicate for TitleSimilarTo<'_> {
    fn apply(&self, builder: &mut FilterWhere) {
        let p = builder.param(SqlParam::Text(self.0.to_string()));
        builder.push(format!("d.title % {}", p));
    }
}

pub struct PostedBy(pub Uuid);

impl Predicate for PostedBy {
    fn apply(&self, builder: &mut FilterWhere) {
        let p = builder.param(SqlParam::Uuid(self.0));
        builder.push(format!("d.poster_id = {}", p));
    }
}

pub struct InCategory(pub i64);

impl Predicate for InCategory {
    fn apply(&self, builder: &mut FilterWhere) {
        let p = builder.param(SqlParam::Int(self.0));
        builder.push(format!("d.category_id = {}", p));
    }
}

pub struct InCountry<'a>(pub &'a str);

impl Predicate for InCountry<'_> {
    fn apply(&self, builder: &mut FilterWhere) {
        let p = builder.param(SqlParam::Text(self.0.to_string()));
        builder.push(format!("d.country_code = {}", p));
    }
}

/// Geodetic distance on the `geography` point, radius converted to meters.
/// `ST_DWithin` lets the planner use the GiST index on `d.point`.
pub struct WithinRadius<'a>(pub &'a GeoRadius);

impl Predicate for WithinRadius<'_> {
    fn apply(&self, builder: &mut FilterWhere) {
        let lng = builder.param(SqlParam::Float(self.0.longitude));
        let lat = builder.param(SqlParam::Float(self.0.latitude));
        let radius = builder.param(SqlParam::Int(self.0.radius_km));
        builder.push(format!(
            "ST_DWithin(d.point, ST_SetSRID(ST_MakePoint({}, {}), 4326)::geography, {} * 1000)",
            lng, lat, radius
        ));
    }
}

pub struct ActiveOnly;

impl Predicate for ActiveOnly {
    fn apply(&self, builder: &mut FilterWhere) {
        builder.push("d.inactive_at IS NULL".to_string());
    }
}

pub struct Featured(pub bool);

impl Predicate for Featured {
    fn apply(&self, builder: &mut FilterWhere) {
        let p = builder.param(SqlParam::Bool(self.0));
        builder.push(format!("d.is_featured = {}", p));
    }
}

pub struct NotHiddenBy(pub Uuid);

impl Predicate for NotHiddenBy {
    fn apply(&self, builder: &mut FilterWhere) {
        let p = builder.param(SqlParam::Uuid(self.0));
        builder.push(format!(
            "NOT EXISTS (SELECT 1 FROM deal_hidden d_h WHERE d_h.deal_id = d.id AND d_h.user_id = {})",
            p
        ));
    }
}

pub struct PosterNotBlockedBy(pub Uuid);

impl Predicate for PosterNotBlockedBy {
    fn apply(&self, builder: &mut FilterWhere) {
        let p = builder.param(SqlParam::Uuid(self.0));
        builder.push(format!(
            "NOT EXISTS (SELECT 1 FROM users_blocked u_b WHERE u_b.blocked_id = d.poster_id AND u_b.user_id = {})",
            p
        ));
    }
}

/// Requires the `deal_memberships d_m` join added by the composer.
pub struct JoinedBy(pub Uuid);

impl Predicate for JoinedBy {
    fn apply(&self, builder: &mut FilterWhere) {
        let p = builder.param(SqlParam::Uuid(self.0));
        builder.push(format!("d_m.user_id = {}", p));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::cursor::Cursor;
    use chrono::{TimeZone, Utc};

    #[test]
    fn default_filter_is_active_only() {
        let (sql, params) = FilterWhere::generate(&DealFilter::default()).into_parts();
        assert_eq!(sql, "d.inactive_at IS NULL");
        assert!(params.is_empty());
    }

    #[test]
    fn show_inactive_drops_the_soft_delete_predicate() {
        let filter = DealFilter { show_inactive: true, ..Default::default() };
        let builder = FilterWhere::generate(&filter);
        assert!(builder.is_empty());
        assert_eq!(builder.to_sql(), "");
    }

    #[test]
    fn search_and_category_scenario() {
        let filter = DealFilter {
            search_text: Some("pizza".to_string()),
            category_id: Some(3),
            ..Default::default()
        };
        let (sql, params) = FilterWhere::generate(&filter).into_parts();
        assert_eq!(
            sql,
            "d.title % $1 AND d.category_id = $2 AND d.inactive_at IS NULL"
        );
        assert_eq!(params, vec![SqlParam::Text("pizza".to_string()), SqlParam::Int(3)]);
        assert!(!sql.contains("ST_DWithin"));
    }

    #[test]
    fn placeholders_follow_the_parameter_vector_across_every_predicate() {
        let viewer = Uuid::new_v4();
        let poster = Uuid::new_v4();
        let member = Uuid::new_v4();
        let after = Utc.with_ymd_and_hms(2020, 2, 1, 0, 0, 0).unwrap();
        let before = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let filter = DealFilter {
            search_text: Some("bulk rice".to_string()),
            cursor: Some(Cursor::new(after, before).unwrap()),
            poster_id: Some(poster),
            category_id: Some(7),
            country_code: Some("SG".to_string()),
            geo: Some(GeoRadius { latitude: 1.3, longitude: 103.8, radius_km: 5 }),
            is_featured: Some(true),
            member_id: Some(member),
            viewer_id: Some(viewer),
            ..Default::default()
        };

        let (sql, params) = FilterWhere::generate(&filter).into_parts();

        assert_eq!(params.len(), 13);
        for n in 1..=13 {
            assert!(sql.contains(&format!("${}", n)), "missing placeholder ${} in {}", n, sql);
        }
        assert!(!sql.contains("$14"));
        assert_eq!(params[0], SqlParam::Text("bulk rice".to_string()));
        assert_eq!(params[1], SqlParam::Timestamp(after));
        assert_eq!(params[2], SqlParam::Timestamp(before));
        assert_eq!(params[3], SqlParam::Uuid(poster));
        assert_eq!(params[4], SqlParam::Int(7));
        assert_eq!(params[5], SqlParam::Text("SG".to_string()));
        assert_eq!(params[6], SqlParam::Float(103.8));
        assert_eq!(params[7], SqlParam::Float(1.3));
        assert_eq!(params[8], SqlParam::Int(5));
        assert_eq!(params[9], SqlParam::Bool(true));
        assert_eq!(params[10], SqlParam::Uuid(viewer));
        assert_eq!(params[11], SqlParam::Uuid(viewer));
        assert_eq!(params[12], SqlParam::Uuid(member));
        assert!(sql.contains("d.poster_id = $4"));
        assert!(sql.contains(
            "ST_DWithin(d.point, ST_SetSRID(ST_MakePoint($7, $8), 4326)::geography, $9 * 1000)"
        ));
        assert!(sql.ends_with("d_m.user_id = $13"));
    }

    #[test]
    fn user_values_never_reach_the_sql_text() {
        let filter = DealFilter {
            search_text: Some("'; DROP TABLE deals; --".to_string()),
            country_code: Some("SG".to_string()),
            ..Default::default()
        };
        let (sql, _) = FilterWhere::generate(&filter).into_parts();
        assert!(!sql.contains("DROP"));
        assert!(!sql.contains("SG"));
    }

    #[test]
    fn social_graph_predicates_need_a_viewer() {
        let (sql, _) = FilterWhere::generate(&DealFilter::default()).into_parts();
        assert!(!sql.contains("deal_hidden"));

        let filter = DealFilter::default().with_viewer(Some(Uuid::new_v4()));
        let (sql, params) = FilterWhere::generate(&filter).into_parts();
        assert!(sql.contains("NOT EXISTS (SELECT 1 FROM deal_hidden"));
        assert!(sql.contains("NOT EXISTS (SELECT 1 FROM users_blocked"));
        assert_eq!(params.len(), 2);
    }
}
