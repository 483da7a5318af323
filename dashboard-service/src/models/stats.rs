use serde::Serialize;

/// Dashboard aggregate counts for one website.
/// All four counts come from one `try_join!` batch; there is no partial
/// result - any failed count fails the whole aggregate.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub user_count: i64,
    pub content_count: i64,
    pub category_count: i64,
    pub product_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_camel_case_counts() {
        let stats = DashboardStats {
            user_count: 1,
            content_count: 3,
            category_count: 2,
            product_count: 0,
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["userCount"], 1);
        assert_eq!(json["contentCount"], 3);
        assert_eq!(json["categoryCount"], 2);
        assert_eq!(json["productCount"], 0);
    }
}
