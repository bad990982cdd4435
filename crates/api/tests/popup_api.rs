//! Integration tests for the theme catalog and popup processing endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json};
use serde_json::json;

// ---------------------------------------------------------------------------
// Themes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_themes_starts_with_default_token() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/themes").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let themes = json["data"].as_array().expect("data is a list");
    assert_eq!(themes.len(), 20);
    assert_eq!(themes[0]["id"], "retail_flash_sale");
}

#[tokio::test]
async fn get_theme_by_id() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/themes/date_halloween").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], "date_halloween");
    assert_eq!(json["data"]["layout"], "countdown");
}

#[tokio::test]
async fn unknown_theme_is_404_not_fallback() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/themes/neon_nights").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "ThemeToken with id neon_nights not found");
}

// ---------------------------------------------------------------------------
// Normalize
// ---------------------------------------------------------------------------

#[tokio::test]
async fn normalize_clean_set_is_unmodified() {
    let app = common::build_test_app();
    let body = json!({
        "items": [
            { "id": "a", "title": "Summer sale", "targetPages": ["home"] }
        ]
    });
    let response = post_json(app, "/api/v1/popups/normalize", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["modified"], false);
    assert_eq!(json["data"]["warnings"], json!([]));
    assert_eq!(json["data"]["set"]["items"][0]["id"], "a");
    assert_eq!(json["data"]["set"]["items"][0]["target_pages"], json!(["home"]));
}

#[tokio::test]
async fn normalize_repairs_unsafe_links() {
    let app = common::build_test_app();
    let body = json!({
        "items": [
            { "id": "a", "ctaUrl": "javascript:alert(1)" },
            { "id": "b", "ctaUrl": "//cdn.example.com/promo" },
            { "id": "c", "ctaUrl": "//evil.example.net/promo" }
        ]
    });
    let response = post_json(app, "/api/v1/popups/normalize", body).await;
    let json = body_json(response).await;

    let items = &json["data"]["set"]["items"];
    assert_eq!(json["data"]["modified"], true);
    assert_eq!(items[0]["cta"]["target"]["kind"], "unsafe");
    assert_eq!(items[1]["cta"]["target"]["kind"], "navigable");
    assert_eq!(items[1]["cta"]["target"]["url"], "//cdn.example.com/promo");
    assert_eq!(items[2]["cta"]["target"]["kind"], "unsafe");
    assert_eq!(json["data"]["warnings"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn normalize_garbage_yields_empty_set() {
    let app = common::build_test_app();
    let response = post_json(app, "/api/v1/popups/normalize", json!("not a set")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["set"]["items"], json!([]));
    assert_eq!(json["data"]["modified"], true);
}

#[tokio::test]
async fn normalize_truncates_oversized_sets() {
    let app = common::build_test_app();
    let items: Vec<_> = (0..30).map(|i| json!({ "id": format!("p{i}") })).collect();
    let response = post_json(app, "/api/v1/popups/normalize", json!({ "items": items })).await;

    let json = body_json(response).await;
    let kept = json["data"]["set"]["items"].as_array().unwrap();
    assert_eq!(kept.len(), 24);
    assert_eq!(kept[23]["id"], "p23");
}

// ---------------------------------------------------------------------------
// Resolve
// ---------------------------------------------------------------------------

#[tokio::test]
async fn resolve_returns_descriptors_and_plan() {
    let app = common::build_test_app();
    let body = json!({
        "popup_set": {
            "items": [
                { "id": "x", "themePresetId": "date_halloween" },
                { "id": "y", "themePresetId": "no_such_theme", "popupSizePreset": "banner_top" }
            ]
        },
        "current_index": 1
    });
    let response = post_json(app, "/api/v1/popups/resolve", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let slides = json["data"]["slides"].as_array().unwrap();
    assert_eq!(slides.len(), 2);

    assert_eq!(slides[0]["descriptor"]["theme_id"], "date_halloween");
    assert_eq!(slides[0]["plan"]["template"]["layout"], "countdown");
    assert_eq!(slides[0]["plan"]["is_current"], false);

    assert_eq!(slides[1]["descriptor"]["theme_fallback_used"], true);
    assert_eq!(slides[1]["descriptor"]["theme_id"], "retail_flash_sale");
    assert_eq!(slides[1]["plan"]["template"]["layout"], "banner_top");
    assert_eq!(slides[1]["plan"]["is_current"], true);

    assert_eq!(json["data"]["chrome"]["show_arrows"], true);
    assert_eq!(json["data"]["chrome"]["active_dot"], 1);
}

#[tokio::test]
async fn resolve_rejects_out_of_range_index() {
    let app = common::build_test_app();
    let body = json!({
        "popup_set": { "items": [{ "id": "only" }] },
        "current_index": 3
    });
    let response = post_json(app, "/api/v1/popups/resolve", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}
