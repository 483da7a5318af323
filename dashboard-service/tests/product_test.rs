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
async fn product_crud_round_trip() {
    let (app, token, website_id) = setup().await;
    let base = format!("/websites/{}/products", website_id);

    let created = app
        .post_json(
            &token,
            &base,
            &serde_json::json!({
                "name": "Widget",
                "price": 9.99,
                "sku": "W-1",
                "stockQuantity": 3,
            }),
        )
        .await;
    assert_eq!(created.status(), 201);
    let created: serde_json::Value = created.json().await.expect("Invalid body");
    assert_eq!(created["status"], "active");
    assert_eq!(created["stockQuantity"], 3);
    assert_eq!(created["images"].as_array().unwrap().len(), 0);
    let id = created["id"].as_str().unwrap().to_string();

    let updated: serde_json::Value = app
        .patch_json(
            &token,
            &format!("{}/{}", base, id),
            &serde_json::json!({ "stockQuantity": 0, "status": "out_of_stock" }),
        )
        .await
        .json()
        .await
        .expect("Invalid body");
    assert_eq!(updated["stockQuantity"], 0);
    assert_eq!(updated["status"], "out_of_stock");
    // Untouched fields survive the partial update
    assert_eq!(updated["name"], "Widget");
    assert_eq!(updated["price"], 9.99);

    assert_eq!(
        app.delete(&token, &format!("{}/{}", base, id)).await.status(),
        204
    );
    let listed: serde_json::Value = app
        .get(&token, &base)
        .await
        .json()
        .await
        .expect("Invalid body");
    assert_eq!(listed.as_array().unwrap().len(), 0);
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn product_search_matches_name_and_sku() {
    let (app, token, website_id) = setup().await;
    let base = format!("/websites/{}/products", website_id);

    app.post_json(
        &token,
        &base,
        &serde_json::json!({ "name": "Widget", "sku": "ALPHA-1" }),
    )
    .await;
    app.post_json(
        &token,
        &base,
        &serde_json::json!({ "name": "Gadget", "sku": "BETA-2" }),
    )
    .await;

    let by_name: serde_json::Value = app
        .get(&token, &format!("{}?search=widg", base))
        .await
        .json()
        .await
        .expect("Invalid body");
    assert_eq!(by_name.as_array().unwrap().len(), 1);

    let by_sku: serde_json::Value = app
        .get(&token, &format!("{}?search=beta", base))
        .await
        .json()
        .await
        .expect("Invalid body");
    assert_eq!(by_sku.as_array().unwrap().len(), 1);
    assert_eq!(by_sku[0]["name"], "Gadget");

    let by_status: serde_json::Value = app
        .get(&token, &format!("{}?status=active", base))
        .await
        .json()
        .await
        .expect("Invalid body");
    assert_eq!(by_status.as_array().unwrap().len(), 2);
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn product_rejects_negative_values() {
    let (app, token, website_id) = setup().await;
    let base = format!("/websites/{}/products", website_id);

    let negative_price = app
        .post_json(
            &token,
            &base,
            &serde_json::json!({ "name": "Widget", "price": -1.0 }),
        )
        .await;
    assert_eq!(negative_price.status(), 422);

    let negative_stock = app
        .post_json(
            &token,
            &base,
            &serde_json::json!({ "name": "Widget", "stockQuantity": -5 }),
        )
        .await;
    assert_eq!(negative_stock.status(), 422);
}
