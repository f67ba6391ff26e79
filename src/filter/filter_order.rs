use super::types::{OrderBy, OrderColumn, SortDirection};

pub struct FilterOrder;

impl FilterOrder {
    /// Resolves the raw column/direction pair, falling back to the default
    /// for anything outside the allow-list.
    pub fn parse(column: Option<&str>, direction: Option<&str>) -> OrderBy {
        let default = OrderBy::default();
        OrderBy {
            column: column.and_then(OrderColumn::parse).unwrap_or(default.column),
            direction: direction.and_then(SortDirection::parse).unwrap_or(default.direction),
        }
    }

    /// `d.id` breaks ties so equal sort keys page deterministically.
    pub fn generate(order: &OrderBy) -> String {
        let dir = order.direction.to_sql();
        format!("ORDER BY {} {}, d.id {}", order.column.to_sql(), dir, dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_posted_at_descending() {
        let order = FilterOrder::parse(None, None);
        assert_eq!(FilterOrder::generate(&order), "ORDER BY d.posted_at DESC, d.id DESC");
    }

    #[test]
    fn unknown_values_fall_back_independently() {
        let order = FilterOrder::parse(Some("title; DROP TABLE deals"), Some("ASC"));
        assert_eq!(order.column, OrderColumn::PostedAt);
        assert_eq!(order.direction, SortDirection::Asc);

        let order = FilterOrder::parse(Some("likes"), Some("sideways"));
        assert_eq!(order.column, OrderColumn::Likes);
        assert_eq!(order.direction, SortDirection::Desc);
    }

    #[test]
    fn aggregate_columns_are_not_qualified() {
        let order = FilterOrder::parse(Some("members"), Some("asc"));
        assert_eq!(FilterOrder::generate(&order), "ORDER BY members ASC, d.id ASC");

        let order = FilterOrder::parse(Some("total_price"), Some("DESC"));
        assert_eq!(FilterOrder::generate(&order), "ORDER BY d.total_price DESC, d.id DESC");
    }
}
