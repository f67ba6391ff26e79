use uuid::Uuid;

use super::filter_order::FilterOrder;
use super::filter_where::FilterWhere;
use super::types::{DealFilter, SqlParam, SqlResult};

/// Columns every deal read returns, including the read-time aggregates.
pub const DEAL_COLUMNS: &str = "d.id, d.title, d.description, d.thumbnail_id, d_i.image_url AS thumbnail_url, \
d.latitude, d.longitude, d.location_text, d.total_price, d.quantity, d.benefits, \
d.category_id, d.poster_id, d.country_code, d.posted_at, d.updated_at, d.inactive_at, \
d.featured_url, d.is_featured, \
(SELECT COUNT(*) FROM deal_likes d_l WHERE d_l.deal_id = d.id AND d_l.is_upvote) AS likes, \
(SELECT COUNT(*) FROM deal_memberships d_mc WHERE d_mc.deal_id = d.id) AS members";

const DEAL_FROM: &str = "FROM deals d LEFT JOIN deal_images d_i ON d_i.id = d.thumbnail_id";

const MEMBERSHIP_JOIN: &str = "LEFT JOIN deal_memberships d_m ON d_m.deal_id = d.id";

/// Composes the listing statement for one set of criteria. The output is a
/// pure function of the criteria.
#[derive(Debug, Clone)]
pub struct Filter {
    criteria: DealFilter,
}

impl Filter {
    pub fn new(criteria: DealFilter) -> Self {
        Self { criteria }
    }

    pub fn to_sql(&self) -> SqlResult {
        let mut filter_where = FilterWhere::generate(&self.criteria);
        let where_clause = if filter_where.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", filter_where.to_sql())
        };
        let limit_clause = format!("LIMIT {}", filter_where.param(SqlParam::Int(self.criteria.page_size)));
        let (_, params) = filter_where.into_parts();

        let join_clause = if self.criteria.member_id.is_some() { MEMBERSHIP_JOIN } else { "" };

        let query = [
            format!("SELECT {}", DEAL_COLUMNS),
            DEAL_FROM.to_string(),
            join_clause.to_string(),
            where_clause,
            FilterOrder::generate(&self.criteria.order),
            limit_clause,
        ]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

        SqlResult { query, params }
    }

    /// Single deal by id with the listing projection, inactive rows included.
    pub fn by_id_sql(id: Uuid) -> SqlResult {
        SqlResult {
            query: format!("SELECT {} {} WHERE d.id = $1", DEAL_COLUMNS, DEAL_FROM),
            params: vec![SqlParam::Uuid(id)],
        }
    }
}
