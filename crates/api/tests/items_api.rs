//! HTTP-level integration tests for the item hierarchy.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, insert_item};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_empty_tree(pool: PgPool) {
    let response = get(build_test_app(pool), "/api/v1/items/tree").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_tree_shape(pool: PgPool) {
    let first = insert_item(&pool, "P-100", "S1", "B1").await;
    let second = insert_item(&pool, "P-100", "S1", "B2").await;
    insert_item(&pool, "P-200", "", "B1").await;

    let response = get(build_test_app(pool), "/api/v1/items/tree").await;
    let json = body_json(response).await;
    let roots = json["data"].as_array().unwrap();
    assert_eq!(roots.len(), 2);

    let part = &roots[0];
    assert_eq!(part["type"], "PART");
    assert_eq!(part["key"], "part-P-100");
    assert_eq!(part["label"], "Part P-100");

    let serial = &part["children"][0];
    assert_eq!(serial["type"], "SERIAL");
    assert_eq!(serial["label"], "S1");

    let bridges = serial["children"].as_array().unwrap();
    assert_eq!(bridges[0]["type"], "BRIDGE");
    assert_eq!(bridges[0]["key"], format!("bridge-{first}"));
    assert_eq!(bridges[0]["itemId"], first);
    assert_eq!(bridges[1]["itemId"], second);

    // An empty serial still gets its own level.
    assert_eq!(roots[1]["children"][0]["label"], "");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_part_ids_and_item_lookup(pool: PgPool) {
    let id = insert_item(&pool, "P-200", "S1", "B1").await;
    insert_item(&pool, "P-100", "S1", "B1").await;

    let response = get(build_test_app(pool.clone()), "/api/v1/items/part-ids").await;
    assert_eq!(body_json(response).await["data"], json!(["P-100", "P-200"]));

    let response = get(build_test_app(pool.clone()), &format!("/api/v1/items/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["bridgeName"], "B1");

    let response = get(build_test_app(pool), "/api/v1/items/99999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
