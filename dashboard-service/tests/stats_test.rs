mod common;

use common::TestApp;

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn stats_count_each_collection_for_the_website_only() {
    let app = TestApp::spawn().await;
    let token = app.register("Jo", "jo@example.com", "a-strong-password").await;
    let website_id = app.create_website(&token, "Acme", "acme.com").await;
    let other_id = app.create_website(&token, "Beta", "beta.com").await;

    for name in ["News", "Guides"] {
        app.post_json(
            &token,
            &format!("/websites/{}/categories", website_id),
            &serde_json::json!({ "name": name }),
        )
        .await;
    }
    for title in ["One", "Two", "Three"] {
        app.post_json(
            &token,
            &format!("/websites/{}/content", website_id),
            &serde_json::json!({ "title": title }),
        )
        .await;
    }
    // Noise in the other website must not leak into Acme's counts
    app.post_json(
        &token,
        &format!("/websites/{}/content", other_id),
        &serde_json::json!({ "title": "Elsewhere" }),
    )
    .await;

    let response = app
        .get(&token, &format!("/websites/{}/stats", website_id))
        .await;
    assert_eq!(response.status(), 200);

    let stats: serde_json::Value = response.json().await.expect("Invalid body");
    assert_eq!(stats["userCount"], 1);
    assert_eq!(stats["contentCount"], 3);
    assert_eq!(stats["categoryCount"], 2);
    assert_eq!(stats["productCount"], 0);
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn analytics_returns_the_fixed_dataset() {
    let app = TestApp::spawn().await;
    let token = app.register("Jo", "jo@example.com", "a-strong-password").await;
    let website_id = app.create_website(&token, "Acme", "acme.com").await;

    let response = app
        .get(&token, &format!("/websites/{}/analytics", website_id))
        .await;
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.expect("Invalid body");
    assert_eq!(body["monthly"].as_array().unwrap().len(), 6);
    assert_eq!(body["monthly"][0]["month"], "Jan");
    assert_eq!(body["monthly"][0]["views"], 4000);
    assert_eq!(body["contentTypes"].as_array().unwrap().len(), 4);
    assert_eq!(body["topContent"][0]["title"], "Getting Started with React");
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn health_check_works() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(format!("{}/health", app.address))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.expect("Invalid body");
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["postgres"], "up");
}
