//! End-to-end audit behavior: trails accumulate through the gated edit
//! path, no-op edits stay silent, and history access is privileged.

use crate::common::{TestHarness, alice, bob, docs, root};
use folio::{CapabilitySet, CommentId, DenyReason, Operation, ServiceError};

async fn harness_with_editor() -> (TestHarness, CommentId) {
    let harness = TestHarness::new().await;
    harness
        .grant_on_docs(&alice(), CapabilitySet::all())
        .await;
    let comment = harness
        .service
        .add_comment(&alice(), &docs(), "v1".to_string())
        .await
        .unwrap();
    (harness, comment.id)
}

#[tokio::test]
async fn first_save_leaves_no_trail() {
    let (harness, comment) = harness_with_editor().await;
    let trail = harness.service.history(&root(), &comment).await.unwrap();
    assert!(trail.is_empty());
}

#[tokio::test]
async fn edits_accumulate_ordered_trail() {
    let (harness, comment) = harness_with_editor().await;
    for body in ["v2", "v3", "v4"] {
        harness
            .service
            .edit_comment(&alice(), &comment, body)
            .await
            .unwrap();
    }

    let trail = harness.service.history(&root(), &comment).await.unwrap();
    assert_eq!(trail.len(), 3);
    let previous: Vec<&str> = trail.iter().map(|r| r.previous_body.as_str()).collect();
    assert_eq!(previous, vec!["v3", "v2", "v1"], "newest first");
}

#[tokio::test]
async fn noop_edit_is_silent() {
    let (harness, comment) = harness_with_editor().await;
    let outcome = harness
        .service
        .edit_comment(&alice(), &comment, "v1")
        .await
        .unwrap();
    assert!(outcome.is_none());
    assert!(
        harness
            .service
            .history(&root(), &comment)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn edit_back_to_original_records_both_directions() {
    let (harness, comment) = harness_with_editor().await;
    harness
        .service
        .edit_comment(&alice(), &comment, "v2")
        .await
        .unwrap();
    harness
        .service
        .edit_comment(&alice(), &comment, "v1")
        .await
        .unwrap();

    let trail = harness.service.history(&root(), &comment).await.unwrap();
    let previous: Vec<&str> = trail.iter().map(|r| r.previous_body.as_str()).collect();
    assert_eq!(previous, vec!["v2", "v1"]);
}

#[tokio::test]
async fn privileged_edit_is_still_captured() {
    // The privilege bypass applies to authorization, not to audit: a
    // root edit needs no grant but leaves the same trail as anyone else.
    let (harness, comment) = harness_with_editor().await;
    let record = harness
        .service
        .edit_comment(&root(), &comment, "moderated")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.modified_by, root());
    assert_eq!(record.previous_body, "v1");
}

#[tokio::test]
async fn editor_without_grant_leaves_no_trace() {
    let (harness, comment) = harness_with_editor().await;
    let err = harness
        .service
        .edit_comment(&bob(), &comment, "defaced")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Denied(DenyReason::NotPermitted(Operation::Edit))
    ));

    // Denied means nothing happened: no body change, no record.
    let comments = harness.service.view_comments(&alice(), &docs()).await.unwrap();
    assert_eq!(comments[0].body, "v1");
    assert!(
        harness
            .service
            .history(&root(), &comment)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn history_access_is_privileged() {
    let (harness, comment) = harness_with_editor().await;
    harness
        .service
        .edit_comment(&alice(), &comment, "v2")
        .await
        .unwrap();

    // Even the comment's author cannot read the trail.
    let err = harness
        .service
        .history(&alice(), &comment)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::PrivilegeRequired));
}

#[tokio::test]
async fn removing_comment_requires_delete_and_drops_trail() {
    let (harness, comment) = harness_with_editor().await;
    harness
        .service
        .edit_comment(&alice(), &comment, "v2")
        .await
        .unwrap();

    let err = harness
        .service
        .remove_comment(&bob(), &comment)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Denied(_)));

    harness
        .service
        .remove_comment(&alice(), &comment)
        .await
        .unwrap();
    let err = harness
        .service
        .history(&root(), &comment)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Core(folio::Error::NotFound { .. })));
}

#[tokio::test]
async fn concurrent_edits_serialize_into_one_trail() {
    let (harness, comment) = harness_with_editor().await;
    let service = std::sync::Arc::new(harness.service);

    let n = 6;
    let mut handles = Vec::new();
    for i in 1..=n {
        let service = std::sync::Arc::clone(&service);
        handles.push(tokio::spawn(async move {
            let body = format!("draft-{i}");
            loop {
                match service.edit_comment(&alice(), &comment, &body).await {
                    Err(ServiceError::Core(folio::Error::Conflict { .. })) => continue,
                    other => return other,
                }
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let trail = service.history(&root(), &comment).await.unwrap();
    assert_eq!(trail.len(), n, "one record per distinct-body edit");

    let mut sequences: Vec<u64> = trail.iter().map(|r| r.sequence).collect();
    sequences.sort_unstable();
    assert_eq!(sequences, (0..n as u64).collect::<Vec<_>>());
}
