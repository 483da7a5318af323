mod common;

use common::TestApp;

async fn setup() -> (TestApp, String, uuid::Uuid) {
    let app = TestApp::spawn().await;
    let token = app.register("Jo", "jo@example.com", "a-strong-password").await;
    let website_id = app.create_website(&token, "Acme", "acme.com").await;
    (app, token, website_id)
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn new_content_defaults_to_unpublished_draft() {
    let (app, token, website_id) = setup().await;

    let created = app
        .post_json(
            &token,
            &format!("/websites/{}/content", website_id),
            &serde_json::json!({ "title": "Hello" }),
        )
        .await;
    assert_eq!(created.status(), 201);

    let body: serde_json::Value = created.json().await.expect("Invalid body");
    assert_eq!(body["status"], "draft");
    assert_eq!(body["contentType"], "article");
    assert!(body["publishedAt"].is_null());
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn publishing_sets_and_unpublishing_clears_published_at() {
    let (app, token, website_id) = setup().await;
    let base = format!("/websites/{}/content", website_id);

    let created: serde_json::Value = app
        .post_json(&token, &base, &serde_json::json!({ "title": "Hello" }))
        .await
        .json()
        .await
        .expect("Invalid body");
    let id = created["id"].as_str().unwrap().to_string();
    let item = format!("{}/{}", base, id);

    let published: serde_json::Value = app
        .patch_json(&token, &item, &serde_json::json!({ "status": "published" }))
        .await
        .json()
        .await
        .expect("Invalid body");
    assert_eq!(published["status"], "published");
    assert!(published["publishedAt"].as_str().is_some());

    // An unrelated update keeps the timestamp
    let retitled: serde_json::Value = app
        .patch_json(&token, &item, &serde_json::json!({ "title": "Hi" }))
        .await
        .json()
        .await
        .expect("Invalid body");
    assert_eq!(retitled["publishedAt"], published["publishedAt"]);

    // Moving back to draft clears it
    let drafted: serde_json::Value = app
        .patch_json(&token, &item, &serde_json::json!({ "status": "draft" }))
        .await
        .json()
        .await
        .expect("Invalid body");
    assert_eq!(drafted["status"], "draft");
    assert!(drafted["publishedAt"].is_null());
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn content_list_filters_compose() {
    let (app, token, website_id) = setup().await;
    let base = format!("/websites/{}/content", website_id);

    let category: serde_json::Value = app
        .post_json(
            &token,
            &format!("/websites/{}/categories", website_id),
            &serde_json::json!({ "name": "News" }),
        )
        .await
        .json()
        .await
        .expect("Invalid body");
    let category_id = category["id"].as_str().unwrap().to_string();

    app.post_json(
        &token,
        &base,
        &serde_json::json!({
            "title": "Launch day",
            "status": "published",
            "categoryId": category_id,
        }),
    )
    .await;
    app.post_json(
        &token,
        &base,
        &serde_json::json!({ "title": "Launch retro", "status": "draft" }),
    )
    .await;
    app.post_json(
        &token,
        &base,
        &serde_json::json!({ "title": "Unrelated", "status": "published" }),
    )
    .await;

    let by_status: serde_json::Value = app
        .get(&token, &format!("{}?status=published", base))
        .await
        .json()
        .await
        .expect("Invalid body");
    assert_eq!(by_status.as_array().unwrap().len(), 2);

    let by_search: serde_json::Value = app
        .get(&token, &format!("{}?search=launch", base))
        .await
        .json()
        .await
        .expect("Invalid body");
    assert_eq!(by_search.as_array().unwrap().len(), 2);

    let combined: serde_json::Value = app
        .get(
            &token,
            &format!(
                "{}?search=launch&status=published&categoryId={}",
                base, category_id
            ),
        )
        .await
        .json()
        .await
        .expect("Invalid body");
    assert_eq!(combined.as_array().unwrap().len(), 1);
    assert_eq!(combined[0]["title"], "Launch day");
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn content_author_is_the_creator() {
    let (app, token, website_id) = setup().await;

    let me: serde_json::Value = app
        .get(&token, "/auth/me")
        .await
        .json()
        .await
        .expect("Invalid body");

    let created: serde_json::Value = app
        .post_json(
            &token,
            &format!("/websites/{}/content", website_id),
            &serde_json::json!({ "title": "Hello" }),
        )
        .await
        .json()
        .await
        .expect("Invalid body");

    assert_eq!(created["authorId"], me["userId"]);
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn deleting_content_twice_returns_404() {
    let (app, token, website_id) = setup().await;
    let base = format!("/websites/{}/content", website_id);

    let created: serde_json::Value = app
        .post_json(&token, &base, &serde_json::json!({ "title": "Hello" }))
        .await
        .json()
        .await
        .expect("Invalid body");
    let id = created["id"].as_str().unwrap().to_string();

    assert_eq!(
        app.delete(&token, &format!("{}/{}", base, id)).await.status(),
        204
    );
    assert_eq!(
        app.delete(&token, &format!("{}/{}", base, id)).await.status(),
        404
    );
}
