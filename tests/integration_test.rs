use std::sync::Arc;

use waiter_draft::draft_actor::{DraftSessionError, LineSelection, SentLinePolicy};
use waiter_draft::kitchen::mock::MockKitchen;
use waiter_draft::lifecycle::DraftSystem;
use waiter_draft::model::VariantAttributes;

fn plain(code: &str, name: &str, price: f64) -> LineSelection {
    LineSelection::new(code, name, price, VariantAttributes::new())
}

/// Full end-to-end integration test through the DraftSystem wiring:
/// one waiter working one table across two kitchen submissions.
#[tokio::test]
async fn test_full_table_service_round() {
    let kitchen = Arc::new(MockKitchen::new());
    let system = DraftSystem::new(kitchen.clone());
    let client = &system.draft_client;

    client
        .open_table("T1", SentLinePolicy::default())
        .await
        .expect("Failed to open table");

    // Three coffees become one quantity-3 line.
    client.add_line("T1", plain("COFFEE", "Coffee", 2.5)).await.unwrap();
    client.add_line("T1", plain("COFFEE", "Coffee", 2.5)).await.unwrap();
    let status = client.add_line("T1", plain("COFFEE", "Coffee", 2.5)).await.unwrap();
    assert_eq!(status.lines.len(), 1);
    assert_eq!(status.lines[0].quantity, 3);
    assert_eq!(status.total_amount, 7.5);

    let receipt = client.send_full_order("T1").await.expect("Failed to send order");
    assert_eq!(receipt.line_count, 1);

    // Nothing unsent remains until the tea arrives.
    let draft = client.draft("T1").await.unwrap().unwrap();
    assert!(!draft.has_unsent_lines());

    let status = client.add_line("T1", plain("TEA", "Tea", 2.0)).await.unwrap();
    assert!(status.can_send_additional);
    assert!(status.can_send_full_order);

    let receipt = client
        .send_additional_items("T1")
        .await
        .expect("Failed to send additional items");
    assert_eq!(receipt.line_count, 1);

    assert_eq!(kitchen.requests().len(), 2);

    system.shutdown().await.expect("Shutdown failed");
}

/// Tables are independent sessions: amendments and sends on one never leak
/// into another, and closing a table drops its draft entirely.
#[tokio::test]
async fn test_tables_are_isolated() {
    let kitchen = Arc::new(MockKitchen::new());
    let system = DraftSystem::new(kitchen.clone());
    let client = &system.draft_client;

    client.open_table("T1", SentLinePolicy::default()).await.unwrap();
    client.open_table("T2", SentLinePolicy::default()).await.unwrap();

    // Opening an already-open table fails.
    let err = client.open_table("T1", SentLinePolicy::default()).await.unwrap_err();
    assert_eq!(err, DraftSessionError::AlreadyOpen("T1".to_string()));

    client.add_line("T1", plain("COFFEE", "Coffee", 2.5)).await.unwrap();
    client.add_line("T2", plain("TEA", "Tea", 2.0)).await.unwrap();

    client.send_full_order("T1").await.unwrap();

    let t2 = client.draft("T2").await.unwrap().unwrap();
    assert!(t2.acknowledged_lines().is_empty());
    assert_eq!(t2.lines()[0].item_code, "TEA");

    // Close T1; its draft is gone, T2 is untouched.
    client.close_table("T1").await.unwrap();
    assert!(client.draft("T1").await.unwrap().is_none());
    let err = client.add_line("T1", plain("COFFEE", "Coffee", 2.5)).await.unwrap_err();
    assert_eq!(err, DraftSessionError::NotFound("T1".to_string()));
    assert!(client.draft("T2").await.unwrap().is_some());

    system.shutdown().await.expect("Shutdown failed");
}

/// Starting a new order mid-session behaves like a fresh draft: lines and
/// acknowledgments both cleared, gates closed.
#[tokio::test]
async fn test_start_new_order_resets_everything() {
    let kitchen = Arc::new(MockKitchen::new());
    let system = DraftSystem::new(kitchen);
    let client = &system.draft_client;

    client.open_table("T1", SentLinePolicy::default()).await.unwrap();
    client.add_line("T1", plain("COFFEE", "Coffee", 2.5)).await.unwrap();
    client.send_full_order("T1").await.unwrap();
    client.add_line("T1", plain("TEA", "Tea", 2.0)).await.unwrap();

    let status = client.start_new_order("T1").await.unwrap();
    assert!(status.lines.is_empty());
    assert!(!status.can_send_full_order);
    assert!(!status.can_send_additional);

    let draft = client.draft("T1").await.unwrap().unwrap();
    assert!(draft.acknowledged_lines().is_empty());

    // A subsequent add behaves as in a fresh draft.
    let status = client.add_line("T1", plain("COFFEE", "Coffee", 2.5)).await.unwrap();
    assert_eq!(status.lines[0].quantity, 1);
    assert!(!status.can_send_additional);

    system.shutdown().await.expect("Shutdown failed");
}

/// Quantity controls through the full stack: decrement floors at 1, remove
/// needs a valid index.
#[tokio::test]
async fn test_quantity_controls() {
    let kitchen = Arc::new(MockKitchen::new());
    let system = DraftSystem::new(kitchen);
    let client = &system.draft_client;

    client.open_table("T1", SentLinePolicy::default()).await.unwrap();
    client.add_line("T1", plain("COFFEE", "Coffee", 2.5)).await.unwrap();

    let status = client.increment_line("T1", 0).await.unwrap();
    assert_eq!(status.lines[0].quantity, 2);

    let status = client.decrement_line("T1", 0).await.unwrap();
    assert_eq!(status.lines[0].quantity, 1);

    // Already at the floor: no change, no error.
    let status = client.decrement_line("T1", 0).await.unwrap();
    assert_eq!(status.lines[0].quantity, 1);

    // Out-of-range index is a real error.
    let err = client.remove_line("T1", 5).await.unwrap_err();
    assert!(err.to_string().contains("no order line at index 5"));

    system.shutdown().await.expect("Shutdown failed");
}
