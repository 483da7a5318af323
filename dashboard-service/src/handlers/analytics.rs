//! Analytics endpoint. Real traffic collection is out of scope; this serves
//! a fixed dataset so the dashboard charts have something to render.

use axum::{response::IntoResponse, Json};
use serde::Serialize;
use service_core::error::AppError;

use crate::middleware::TenantContext;

#[derive(Debug, Serialize)]
pub struct MonthlyTraffic {
    pub month: &'static str,
    pub views: u64,
    pub users: u64,
    pub content: u64,
}

#[derive(Debug, Serialize)]
pub struct ContentTypeShare {
    pub name: &'static str,
    pub value: u64,
}

#[derive(Debug, Serialize)]
pub struct TopContent {
    pub title: &'static str,
    pub views: u64,
    pub change: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResponse {
    pub monthly: Vec<MonthlyTraffic>,
    pub content_types: Vec<ContentTypeShare>,
    pub top_content: Vec<TopContent>,
}

/// GET /websites/:website_id/analytics
pub async fn get_analytics(_ctx: TenantContext) -> Result<impl IntoResponse, AppError> {
    Ok(Json(mock_analytics()))
}

fn mock_analytics() -> AnalyticsResponse {
    AnalyticsResponse {
        monthly: vec![
            MonthlyTraffic { month: "Jan", views: 4000, users: 2400, content: 24 },
            MonthlyTraffic { month: "Feb", views: 3000, users: 1398, content: 22 },
            MonthlyTraffic { month: "Mar", views: 2000, users: 9800, content: 29 },
            MonthlyTraffic { month: "Apr", views: 2780, users: 3908, content: 20 },
            MonthlyTraffic { month: "May", views: 1890, users: 4800, content: 21 },
            MonthlyTraffic { month: "Jun", views: 2390, users: 3800, content: 25 },
        ],
        content_types: vec![
            ContentTypeShare { name: "Blog Posts", value: 45 },
            ContentTypeShare { name: "Tutorials", value: 30 },
            ContentTypeShare { name: "Documentation", value: 15 },
            ContentTypeShare { name: "Guides", value: 10 },
        ],
        top_content: vec![
            TopContent { title: "Getting Started with React", views: 15420, change: "+12%" },
            TopContent { title: "Advanced JavaScript Concepts", views: 12350, change: "+8%" },
            TopContent { title: "CSS Grid Layout Guide", views: 9870, change: "+15%" },
            TopContent { title: "API Design Best Practices", views: 8450, change: "+5%" },
            TopContent { title: "Database Optimization Tips", views: 7200, change: "+3%" },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_dataset_is_stable() {
        let a = serde_json::to_value(mock_analytics()).unwrap();
        let b = serde_json::to_value(mock_analytics()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a["monthly"].as_array().unwrap().len(), 6);
        assert_eq!(a["contentTypes"].as_array().unwrap().len(), 4);
        assert_eq!(a["topContent"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn content_type_shares_sum_to_hundred() {
        let total: u64 = mock_analytics().content_types.iter().map(|c| c.value).sum();
        assert_eq!(total, 100);
    }
}
