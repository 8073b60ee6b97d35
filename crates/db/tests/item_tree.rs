//! Integration tests for reading items and folding them into the tree.

use scale_core::item_tree::ItemTreeNode;
use scale_db::repositories::ItemRepo;
use sqlx::PgPool;

async fn insert_item(pool: &PgPool, part: &str, serial: &str, bridge: &str, active: bool) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO items (part_id, serial_number, bridge_name, is_active) \
         VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(part)
    .bind(serial)
    .bind(bridge)
    .bind(active)
    .fetch_one(pool)
    .await
    .unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_empty_table_gives_empty_tree(pool: PgPool) {
    let tree = ItemRepo::tree(&pool).await.unwrap();
    assert!(tree.is_empty());
    assert!(tree.to_nested().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_tree_is_sorted_and_skips_inactive(pool: PgPool) {
    // Inserted out of order on purpose; the query sorts.
    let b2 = insert_item(&pool, "P-200", "S1", "B1", true).await;
    let a2 = insert_item(&pool, "P-100", "S2", "B1", true).await;
    let a1b = insert_item(&pool, "P-100", "S1", "B2", true).await;
    let a1a = insert_item(&pool, "P-100", "S1", "B1", true).await;
    insert_item(&pool, "P-300", "S9", "B9", false).await;

    let tree = ItemRepo::tree(&pool).await.unwrap();
    assert_eq!(tree.part_count(), 2);
    assert_eq!(tree.serial_count(), 3);
    assert_eq!(tree.bridge_count(), 4);

    let nested = tree.to_nested();
    assert_eq!(nested[0].key, "part-P-100");
    assert_eq!(nested[0].children[0].label, "S1");
    let leaves: Vec<i64> = nested[0].children[0]
        .children
        .iter()
        .map(|b| b.item_id)
        .collect();
    assert_eq!(leaves, [a1a, a1b]);
    assert_eq!(nested[0].children[1].children[0].item_id, a2);
    assert_eq!(nested[1].children[0].children[0].item_id, b2);

    let first_root = tree.node(tree.roots()[0]);
    assert!(matches!(first_root, ItemTreeNode::Part { .. }));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_part_ids_and_lookup(pool: PgPool) {
    let id = insert_item(&pool, "P-200", "S1", "B1", true).await;
    insert_item(&pool, "P-100", "S1", "B1", true).await;
    insert_item(&pool, "P-100", "S2", "B1", true).await;
    insert_item(&pool, "P-900", "S1", "B1", false).await;

    let parts = ItemRepo::list_part_ids(&pool).await.unwrap();
    assert_eq!(parts, ["P-100", "P-200"]);

    let item = ItemRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(item.part_id, "P-200");
    assert!(ItemRepo::find_by_id(&pool, id + 1000).await.unwrap().is_none());
}
