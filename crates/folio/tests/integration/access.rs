//! End-to-end authorization behavior: privilege bypass, fail-closed
//! defaults, flag mapping, and grant lifecycle cascades.

use crate::common::{TestHarness, alice, bob, docs, root};
use folio::{CapabilitySet, Decision, DenyReason, Operation, PageId, ServiceError};

#[tokio::test]
async fn privileged_actor_allowed_everywhere() {
    let harness = TestHarness::new().await;
    let engine = harness.service.engine();

    for op in Operation::ALL {
        assert_eq!(
            engine.authorize(&root(), Some(&docs()), op).await.unwrap(),
            Decision::Allow
        );
        // Including pages that do not exist.
        let ghost = PageId::from("no-such-page");
        assert_eq!(
            engine.authorize(&root(), Some(&ghost), op).await.unwrap(),
            Decision::Allow
        );
    }
}

#[tokio::test]
async fn no_grant_denies_every_operation() {
    let harness = TestHarness::new().await;
    let engine = harness.service.engine();

    for op in Operation::ALL {
        assert_eq!(
            engine.authorize(&alice(), Some(&docs()), op).await.unwrap(),
            Decision::Deny(DenyReason::NoGrant)
        );
    }
}

#[tokio::test]
async fn partial_grant_maps_flags_to_operations() {
    // view + edit on, create + delete off
    let harness = TestHarness::new().await;
    harness
        .grant_on_docs(
            &alice(),
            CapabilitySet::none()
                .with(Operation::View)
                .with(Operation::Edit),
        )
        .await;

    let engine = harness.service.engine();
    let expectations = [
        (Operation::View, true),
        (Operation::Create, false),
        (Operation::Edit, true),
        (Operation::Delete, false),
    ];
    for (op, allowed) in expectations {
        let decision = engine.authorize(&alice(), Some(&docs()), op).await.unwrap();
        assert_eq!(decision.is_allowed(), allowed, "unexpected decision for {op}");
    }
}

#[tokio::test]
async fn view_only_actor_can_list_but_not_post() {
    let harness = TestHarness::new().await;
    harness.grant_on_docs(&alice(), CapabilitySet::read_only()).await;

    assert!(harness.service.view_comments(&alice(), &docs()).await.is_ok());

    let err = harness
        .service
        .add_comment(&alice(), &docs(), "hi".to_string())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Denied(DenyReason::NotPermitted(Operation::Create))
    ));
}

#[tokio::test]
async fn grant_upsert_is_idempotent() {
    let harness = TestHarness::new().await;
    let caps = CapabilitySet::read_only();
    harness.grant_on_docs(&alice(), caps).await;
    harness.grant_on_docs(&alice(), caps).await;

    let grants = harness
        .service
        .grants_for_actor(&root(), &alice())
        .await
        .unwrap();
    assert_eq!(grants.len(), 1, "exactly one grant per (actor, page)");
    assert_eq!(grants[0].capabilities, caps);
}

#[tokio::test]
async fn revoke_restores_fail_closed_default() {
    let harness = TestHarness::new().await;
    harness.grant_on_docs(&alice(), CapabilitySet::read_only()).await;
    assert!(harness.service.view_comments(&alice(), &docs()).await.is_ok());

    assert!(harness.service.revoke(&root(), &alice(), &docs()).await.unwrap());

    let err = harness
        .service
        .view_comments(&alice(), &docs())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Denied(DenyReason::NoGrant)));
}

#[tokio::test]
async fn grant_management_requires_privilege() {
    let harness = TestHarness::new().await;

    let err = harness
        .service
        .grant(&alice(), &bob(), &docs(), CapabilitySet::all())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::PrivilegeRequired));

    let err = harness
        .service
        .grants_for_page(&alice(), &docs())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::PrivilegeRequired));
}

#[tokio::test]
async fn grant_on_unknown_actor_or_page_is_not_found() {
    let harness = TestHarness::new().await;

    let ghost = folio::ActorId::from("ghost");
    let err = harness
        .service
        .grant(&root(), &ghost, &docs(), CapabilitySet::all())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Core(folio::Error::NotFound { .. })));

    let nowhere = PageId::from("nowhere");
    let err = harness
        .service
        .grant(&root(), &alice(), &nowhere, CapabilitySet::all())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Core(folio::Error::NotFound { .. })));
}

#[tokio::test]
async fn removing_actor_cascades_grants() {
    let harness = TestHarness::new().await;
    harness.grant_on_docs(&alice(), CapabilitySet::all()).await;

    harness.service.remove_actor(&alice()).await.unwrap();

    let grants = harness
        .service
        .grants_for_page(&root(), &docs())
        .await
        .unwrap();
    assert!(grants.is_empty(), "no orphaned grants after actor removal");
}

#[tokio::test]
async fn deleting_page_cascades_grants() {
    let harness = TestHarness::new().await;
    harness.grant_on_docs(&alice(), CapabilitySet::all()).await;

    harness.service.delete_page(&root(), &docs()).await.unwrap();

    let grants = harness
        .service
        .grants_for_actor(&root(), &alice())
        .await
        .unwrap();
    assert!(grants.is_empty(), "no orphaned grants after page deletion");

    // The page itself now fails closed for everyone non-privileged.
    let err = harness
        .service
        .view_comments(&alice(), &docs())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Denied(DenyReason::UnknownPage)
    ));
}

#[tokio::test]
async fn renaming_page_carries_grants_and_content() {
    let harness = TestHarness::new().await;
    harness.grant_on_docs(&alice(), CapabilitySet::all()).await;
    harness
        .service
        .add_comment(&alice(), &docs(), "hello".to_string())
        .await
        .unwrap();

    let handbook = PageId::from("handbook");
    harness
        .service
        .rename_page(&root(), &docs(), &handbook)
        .await
        .unwrap();

    // The grant followed the page; the old name no longer resolves.
    let comments = harness
        .service
        .view_comments(&alice(), &handbook)
        .await
        .unwrap();
    assert_eq!(comments.len(), 1);

    let err = harness
        .service
        .view_comments(&alice(), &docs())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Denied(DenyReason::UnknownPage)
    ));
}

#[tokio::test]
async fn page_management_requires_privilege() {
    let harness = TestHarness::new().await;

    let err = harness
        .service
        .create_page(&alice(), PageId::from("mine"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::PrivilegeRequired));

    let err = harness
        .service
        .delete_page(&alice(), &docs())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::PrivilegeRequired));
}

#[tokio::test]
async fn listing_pages_requires_a_known_actor() {
    let harness = TestHarness::new().await;

    let pages = harness.service.list_pages(&alice()).await.unwrap();
    assert_eq!(pages.len(), 1);

    let ghost = folio::ActorId::from("ghost");
    let err = harness.service.list_pages(&ghost).await.unwrap_err();
    assert!(matches!(err, ServiceError::Core(folio::Error::NotFound { .. })));
}
