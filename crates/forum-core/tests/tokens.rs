mod common;

use std::sync::Arc;

use sea_orm::EntityTrait;

use entity::ValidationHash;
use forum_core::clock::FixedClock;
use forum_core::error::MintError;
use forum_core::tokens::TokenService;

const SECRET: &[u8] = b"server-side-test-secret";
const T0: i64 = 1_770_000_000;

fn service(db: sea_orm::DatabaseConnection, clock: Arc<FixedClock>) -> TokenService {
    TokenService::new(db, SECRET, clock)
}

async fn token_exists(db: &sea_orm::DatabaseConnection, code: &str) -> bool {
    ValidationHash::find_by_id(code)
        .one(db)
        .await
        .expect("lookup")
        .is_some()
}

#[tokio::test]
async fn minted_token_validates_once_and_is_consumed() {
    let db = common::setup_db().await;
    let alice = common::insert_user(&db, "alice").await;
    let clock = Arc::new(FixedClock::new(T0));
    let svc = service(db.clone(), clock);

    let token = svc
        .mint(&alice.id, "confirm-email", &["alice@example.com"], None)
        .await
        .expect("mint");

    assert!(
        svc.validate(&token.hash_code, &alice.id, "confirm-email", &["alice@example.com"])
            .await
    );
    assert!(!token_exists(&db, &token.hash_code).await);

    // Already consumed: a second redemption fails.
    assert!(
        !svc.validate(&token.hash_code, &alice.id, "confirm-email", &["alice@example.com"])
            .await
    );
}

#[tokio::test]
async fn mismatches_reject_and_leave_the_token_intact() {
    let db = common::setup_db().await;
    let alice = common::insert_user(&db, "alice").await;
    let bob = common::insert_user(&db, "bob").await;
    let clock = Arc::new(FixedClock::new(T0));
    let svc = service(db.clone(), clock);

    let token = svc
        .mint(&alice.id, "reset-password", &["a", "b"], None)
        .await
        .expect("mint");

    // Wrong purpose.
    assert!(!svc.validate(&token.hash_code, &alice.id, "confirm-email", &["a", "b"]).await);
    // Wrong owner.
    assert!(!svc.validate(&token.hash_code, &bob.id, "reset-password", &["a", "b"]).await);
    // Reordered context.
    assert!(!svc.validate(&token.hash_code, &alice.id, "reset-password", &["b", "a"]).await);
    // Changed context element.
    assert!(!svc.validate(&token.hash_code, &alice.id, "reset-password", &["a", "c"]).await);
    // Unknown code.
    assert!(!svc.validate("no-such-code", &alice.id, "reset-password", &["a", "b"]).await);

    assert!(token_exists(&db, &token.hash_code).await);

    // The untouched token still redeems with the right inputs.
    assert!(svc.validate(&token.hash_code, &alice.id, "reset-password", &["a", "b"]).await);
}

#[tokio::test]
async fn expired_token_is_rejected_and_deleted() {
    let db = common::setup_db().await;
    let alice = common::insert_user(&db, "alice").await;
    let clock = Arc::new(FixedClock::new(T0));
    let svc = service(db.clone(), clock.clone());

    let token = svc
        .mint(&alice.id, "confirm-email", &[], None)
        .await
        .expect("mint");

    // Step past the default 24h lifetime.
    clock.advance(24 * 60 * 60 + 1);

    assert!(!svc.validate(&token.hash_code, &alice.id, "confirm-email", &[]).await);
    // Consumed even though it failed: no indefinite retry of expired codes.
    assert!(!token_exists(&db, &token.hash_code).await);
    assert!(!svc.validate(&token.hash_code, &alice.id, "confirm-email", &[]).await);
}

#[tokio::test]
async fn explicit_expiration_overrides_the_default() {
    let db = common::setup_db().await;
    let alice = common::insert_user(&db, "alice").await;
    let clock = Arc::new(FixedClock::new(T0));
    let svc = service(db.clone(), clock.clone());

    let token = svc
        .mint(&alice.id, "confirm-email", &[], Some(T0 + 60))
        .await
        .expect("mint");
    assert_eq!(token.expires_at, T0 + 60);

    clock.advance(61);
    assert!(!svc.validate(&token.hash_code, &alice.id, "confirm-email", &[]).await);
}

#[tokio::test]
async fn second_mint_for_same_user_and_purpose_conflicts() {
    let db = common::setup_db().await;
    let alice = common::insert_user(&db, "alice").await;
    let clock = Arc::new(FixedClock::new(T0));
    let svc = service(db.clone(), clock);

    svc.mint(&alice.id, "reset-password", &[], None)
        .await
        .expect("first mint");

    let second = svc.mint(&alice.id, "reset-password", &[], None).await;
    assert!(matches!(second, Err(MintError::Conflict)));
}

#[tokio::test]
async fn distinct_purposes_and_owners_coexist() {
    let db = common::setup_db().await;
    let alice = common::insert_user(&db, "alice").await;
    let bob = common::insert_user(&db, "bob").await;
    let clock = Arc::new(FixedClock::new(T0));
    let svc = service(db.clone(), clock);

    svc.mint(&alice.id, "reset-password", &[], None).await.expect("mint");
    svc.mint(&alice.id, "confirm-email", &[], None).await.expect("mint");
    svc.mint(&bob.id, "reset-password", &[], None).await.expect("mint");
}

#[tokio::test]
async fn empty_purpose_is_rejected() {
    let db = common::setup_db().await;
    let alice = common::insert_user(&db, "alice").await;
    let clock = Arc::new(FixedClock::new(T0));
    let svc = service(db.clone(), clock);

    let result = svc.mint(&alice.id, "", &[], None).await;
    assert!(matches!(result, Err(MintError::InvalidPurpose)));
}
