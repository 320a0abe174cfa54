mod common;

use common::*;

#[tokio::test]
async fn test_list_categories_ordered_with_counts() {
    let app = spawn_app().await;
    let (admin_id, token) = create_test_user(&app, "admin").await;
    make_admin(&app.db, admin_id).await;

    let (cat_id, cat_slug) = create_test_category(&app, &token).await;
    create_test_category(&app, &token).await;
    create_test_post(&app, &token, cat_id, true).await;
    create_test_post(&app, &token, cat_id, false).await;

    let resp = app.client.get(app.url("/categories")).send().await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = resp.json().await.unwrap();
    let categories = body["data"].as_array().unwrap();
    assert_eq!(categories.len(), 2);

    // Ordered by sort_order ascending
    let orders: Vec<i64> = categories
        .iter()
        .map(|c| c["sort_order"].as_i64().unwrap())
        .collect();
    let mut sorted = orders.clone();
    sorted.sort();
    assert_eq!(orders, sorted);

    // Only the published post is counted
    let first = categories
        .iter()
        .find(|c| c["slug"] == cat_slug.as_str())
        .unwrap();
    assert_eq!(first["post_count"], 1);
}

#[tokio::test]
async fn test_get_category_by_slug() {
    let app = spawn_app().await;
    let (admin_id, token) = create_test_user(&app, "admin").await;
    make_admin(&app.db, admin_id).await;

    let (_, slug) = create_test_category(&app, &token).await;

    let resp = app
        .client
        .get(app.url(&format!("/categories/{}", slug)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["slug"], slug.as_str());
    assert!(body["data"]["name_ko"].as_str().is_some());
    assert!(body["data"]["name"].as_str().is_some());
}

#[tokio::test]
async fn test_get_category_locale_resolution() {
    let app = spawn_app().await;
    let (admin_id, token) = create_test_user(&app, "admin").await;
    make_admin(&app.db, admin_id).await;

    let (_, slug) = create_test_category(&app, &token).await;

    // Default locale is Korean
    let resp = app
        .client
        .get(app.url(&format!("/categories/{}", slug)))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["name"], body["data"]["name_ko"]);

    // lang=ja resolves the Japanese column; unknown values fall back to Korean
    let resp = app
        .client
        .get(app.url(&format!("/categories/{}?lang=ja", slug)))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["name"], body["data"]["name_ja"]);

    let resp = app
        .client
        .get(app.url(&format!("/categories/{}?lang=fr", slug)))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["name"], body["data"]["name_ko"]);
}

#[tokio::test]
async fn test_get_unknown_category_not_found() {
    let app = spawn_app().await;

    let resp = app
        .client
        .get(app.url("/categories/no-such-category"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_category_posts_pagination() {
    let app = spawn_app().await;
    let (admin_id, token) = create_test_user(&app, "admin").await;
    make_admin(&app.db, admin_id).await;

    let (cat_id, slug) = create_test_category(&app, &token).await;
    for _ in 0..7 {
        create_test_post(&app, &token, cat_id, true).await;
    }
    // Drafts never show in the public listing
    create_test_post(&app, &token, cat_id, false).await;

    let resp = app
        .client
        .get(app.url(&format!("/categories/{}/posts?page=2&limit=3", slug)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["category"]["slug"], slug.as_str());
    assert_eq!(body["data"]["posts"].as_array().unwrap().len(), 3);
    assert_eq!(body["data"]["pagination"]["page"], 2);
    assert_eq!(body["data"]["pagination"]["limit"], 3);
    assert_eq!(body["data"]["pagination"]["total"], 7);
    assert_eq!(body["data"]["pagination"]["total_pages"], 3);
}

#[tokio::test]
async fn test_category_posts_empty() {
    let app = spawn_app().await;
    let (admin_id, token) = create_test_user(&app, "admin").await;
    make_admin(&app.db, admin_id).await;

    let (_, slug) = create_test_category(&app, &token).await;

    let resp = app
        .client
        .get(app.url(&format!("/categories/{}/posts", slug)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["posts"].as_array().unwrap().len(), 0);
    assert_eq!(body["data"]["pagination"]["total"], 0);
    assert_eq!(body["data"]["pagination"]["total_pages"], 0);
}

#[tokio::test]
async fn test_create_category_requires_admin() {
    let app = spawn_app().await;
    let (_, customer_token) = create_test_user(&app, "customer").await;

    let payload = serde_json::json!({
        "slug": "forbidden-category",
        "name_ko": "금지",
        "name_en": "Forbidden",
        "name_ja": "禁止"
    });

    let resp = app
        .client
        .post(app.url("/categories"))
        .bearer_auth(&customer_token)
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);

    // Editors cannot manage categories either
    let (editor_id, editor_token) = create_test_user(&app, "editor").await;
    make_editor(&app.db, editor_id).await;

    let resp = app
        .client
        .post(app.url("/categories"))
        .bearer_auth(&editor_token)
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);
}

#[tokio::test]
async fn test_update_category() {
    let app = spawn_app().await;
    let (admin_id, token) = create_test_user(&app, "admin").await;
    make_admin(&app.db, admin_id).await;

    let (cat_id, slug) = create_test_category(&app, &token).await;
    create_test_post(&app, &token, cat_id, true).await;

    let resp = app
        .client
        .put(app.url(&format!("/categories/{}", slug)))
        .bearer_auth(&token)
        .json(&serde_json::json!({
            "slug": slug,
            "name_ko": "새 이름",
            "name_en": "New Name",
            "name_ja": "新しい名前",
            "color": "#FF0000",
            "sort_order": 42
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["name_en"], "New Name");
    assert_eq!(body["data"]["color"], "#FF0000");
    assert_eq!(body["data"]["sort_order"], 42);
    // The updated response carries the live published-post count
    assert_eq!(body["data"]["post_count"], 1);
}

#[tokio::test]
async fn test_delete_category_with_posts_conflict() {
    let app = spawn_app().await;
    let (admin_id, token) = create_test_user(&app, "admin").await;
    make_admin(&app.db, admin_id).await;

    let (cat_id, slug) = create_test_category(&app, &token).await;
    let (post_id, _) = create_test_post(&app, &token, cat_id, true).await;

    // Referenced categories cannot be removed
    let resp = app
        .client
        .delete(app.url(&format!("/categories/{}", slug)))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 409);

    // After the post is gone the delete succeeds
    let resp = app
        .client
        .delete(app.url(&format!("/blog-posts/{}", post_id)))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = app
        .client
        .delete(app.url(&format!("/categories/{}", slug)))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = app
        .client
        .get(app.url(&format!("/categories/{}", slug)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}
