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
async fn category_crud_round_trip() {
    let (app, token, website_id) = setup().await;
    let base = format!("/websites/{}/categories", website_id);

    let created = app
        .post_json(&token, &base, &serde_json::json!({ "name": "News" }))
        .await;
    assert_eq!(created.status(), 201);
    let created: serde_json::Value = created.json().await.expect("Invalid body");
    let category_id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["name"], "News");

    let listed: serde_json::Value = app
        .get(&token, &base)
        .await
        .json()
        .await
        .expect("Invalid body");
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let updated = app
        .patch_json(
            &token,
            &format!("{}/{}", base, category_id),
            &serde_json::json!({ "name": "Press" }),
        )
        .await;
    assert_eq!(updated.status(), 200);
    let updated: serde_json::Value = updated.json().await.expect("Invalid body");
    assert_eq!(updated["name"], "Press");

    let deleted = app
        .delete(&token, &format!("{}/{}", base, category_id))
        .await;
    assert_eq!(deleted.status(), 204);

    // Deleting again is a 404, not a silent no-op
    let again = app
        .delete(&token, &format!("{}/{}", base, category_id))
        .await;
    assert_eq!(again.status(), 404);
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn category_search_filters_by_name() {
    let (app, token, website_id) = setup().await;
    let base = format!("/websites/{}/categories", website_id);

    for name in ["News", "Newsletter", "Products"] {
        app.post_json(&token, &base, &serde_json::json!({ "name": name }))
            .await;
    }

    let matches: serde_json::Value = app
        .get(&token, &format!("{}?search=news", base))
        .await
        .json()
        .await
        .expect("Invalid body");
    assert_eq!(matches.as_array().unwrap().len(), 2);

    let none: serde_json::Value = app
        .get(&token, &format!("{}?search=zzz", base))
        .await
        .json()
        .await
        .expect("Invalid body");
    assert_eq!(none.as_array().unwrap().len(), 0);
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn categories_are_scoped_per_website() {
    let (app, token, website_id) = setup().await;
    let other_id = app.create_website(&token, "Beta", "beta.com").await;

    app.post_json(
        &token,
        &format!("/websites/{}/categories", website_id),
        &serde_json::json!({ "name": "OnlyInAcme" }),
    )
    .await;

    let other_list: serde_json::Value = app
        .get(&token, &format!("/websites/{}/categories", other_id))
        .await
        .json()
        .await
        .expect("Invalid body");
    assert_eq!(other_list.as_array().unwrap().len(), 0);
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn category_ids_do_not_cross_websites() {
    let (app, token, website_id) = setup().await;
    let other_id = app.create_website(&token, "Beta", "beta.com").await;

    let created: serde_json::Value = app
        .post_json(
            &token,
            &format!("/websites/{}/categories", website_id),
            &serde_json::json!({ "name": "News" }),
        )
        .await
        .json()
        .await
        .expect("Invalid body");
    let category_id = created["id"].as_str().unwrap().to_string();

    // Addressing the category through the wrong website is a 404
    let response = app
        .delete(
            &token,
            &format!("/websites/{}/categories/{}", other_id, category_id),
        )
        .await;
    assert_eq!(response.status(), 404);
}
