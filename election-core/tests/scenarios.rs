//! End-to-end election scenarios through the ledger API
//!
//! Mirrors the reference deployment's acceptance flow: one owner account,
//! one unprivileged account, a fresh ledger per test.

use election_core::{
    AccountId, Candidate, Config, Error, Ledger, Leader, NotificationKind, RegionResult,
};

fn owner() -> AccountId {
    AccountId::new("0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266")
}

fn other_account() -> AccountId {
    AccountId::new("0x70997970c51812dc3a010c7d01b50e0d17dc79c8")
}

async fn create_test_ledger() -> Ledger {
    Ledger::open(Config::with_owner(owner())).await.unwrap()
}

#[tokio::test]
async fn fresh_ledger_has_no_leader_and_is_open() {
    let ledger = create_test_ledger().await;

    assert_eq!(ledger.current_leader().await.unwrap(), Leader::None);
    assert_eq!(ledger.current_leader().await.unwrap().code(), 0);
    assert!(!ledger.election_ended().await.unwrap());

    ledger.shutdown().await.unwrap();
}

#[tokio::test]
async fn leader_follows_cumulative_seats() {
    let ledger = create_test_ledger().await;

    ledger
        .submit_result(&owner(), RegionResult::new("California", 1000, 900, 32))
        .await
        .unwrap();
    assert_eq!(ledger.current_leader().await.unwrap(), Leader::CandidateA);

    ledger
        .submit_result(&owner(), RegionResult::new("Ohio", 800, 1200, 33))
        .await
        .unwrap();
    assert_eq!(ledger.current_leader().await.unwrap(), Leader::CandidateB);

    assert_eq!(ledger.seats(Candidate::CandidateA).await.unwrap(), 32);
    assert_eq!(ledger.seats(Candidate::CandidateB).await.unwrap(), 33);

    ledger.shutdown().await.unwrap();
}

#[tokio::test]
async fn resubmitted_region_is_rejected() {
    let ledger = create_test_ledger().await;

    ledger
        .submit_result(&owner(), RegionResult::new("California", 1000, 900, 32))
        .await
        .unwrap();
    ledger
        .submit_result(&owner(), RegionResult::new("Ohio", 800, 1200, 33))
        .await
        .unwrap();

    let result = ledger
        .submit_result(&owner(), RegionResult::new("California", 1000, 900, 32))
        .await;
    assert_eq!(result, Err(Error::DuplicateRegion("California".to_string())));
    assert_eq!(ledger.current_leader().await.unwrap(), Leader::CandidateB);

    // Changed numbers do not help either
    let result = ledger
        .submit_result(&owner(), RegionResult::new("California", 1001, 900, 32))
        .await;
    assert!(matches!(result, Err(Error::DuplicateRegion(_))));

    let stored = ledger.region_result("California").await.unwrap();
    assert_eq!(stored.votes_candidate_a, 1000);

    ledger.shutdown().await.unwrap();
}

#[tokio::test]
async fn tied_region_is_rejected_without_tally_change() {
    let ledger = create_test_ledger().await;
    let before = ledger.snapshot().await.unwrap();

    let result = ledger
        .submit_result(&owner(), RegionResult::new("South Dakota", 100, 100, 100))
        .await;
    assert_eq!(result, Err(Error::TiedResult("South Dakota".to_string())));

    assert_eq!(ledger.snapshot().await.unwrap(), before);
    assert!(!ledger.results_submitted("South Dakota").await.unwrap());

    ledger.shutdown().await.unwrap();
}

#[tokio::test]
async fn zero_seat_region_is_rejected() {
    let ledger = create_test_ledger().await;

    let result = ledger
        .submit_result(&owner(), RegionResult::new("Washington", 700, 1000, 0))
        .await;
    assert!(matches!(result, Err(Error::InvalidSeatCount(_))));

    ledger.shutdown().await.unwrap();
}

#[tokio::test]
async fn closed_election_rejects_every_write() {
    let ledger = create_test_ledger().await;

    let closed = ledger.end_election(&owner()).await.unwrap();
    assert!(matches!(closed.kind, NotificationKind::ElectionClosed { .. }));
    assert!(ledger.election_ended().await.unwrap());
    assert_eq!(ledger.current_leader().await.unwrap(), Leader::None);

    assert_eq!(
        ledger.end_election(&owner()).await,
        Err(Error::ElectionClosed)
    );

    let result = ledger
        .submit_result(&owner(), RegionResult::new("Alaska", 700, 1000, 60))
        .await;
    assert_eq!(result, Err(Error::ElectionClosed));

    ledger.shutdown().await.unwrap();
}

#[tokio::test]
async fn non_owner_cannot_write() {
    let ledger = create_test_ledger().await;
    let before = ledger.snapshot().await.unwrap();

    let result = ledger
        .submit_result(
            &other_account(),
            RegionResult::new("Wyoming", 800, 1200, 50),
        )
        .await;
    assert!(matches!(result, Err(Error::Unauthorized(_))));

    let result = ledger.end_election(&other_account()).await;
    assert!(matches!(result, Err(Error::Unauthorized(_))));

    assert_eq!(ledger.snapshot().await.unwrap(), before);
    assert!(!ledger.election_ended().await.unwrap());

    ledger.shutdown().await.unwrap();
}

#[tokio::test]
async fn leader_is_frozen_at_close() {
    let ledger = create_test_ledger().await;

    ledger
        .submit_result(&owner(), RegionResult::new("California", 1000, 900, 32))
        .await
        .unwrap();
    ledger
        .submit_result(&owner(), RegionResult::new("Nevada", 300, 200, 32))
        .await
        .unwrap();
    ledger
        .submit_result(&owner(), RegionResult::new("Texas", 100, 900, 64))
        .await
        .unwrap();

    // Cumulative tie at close
    assert_eq!(ledger.current_leader().await.unwrap(), Leader::None);
    ledger.end_election(&owner()).await.unwrap();
    assert_eq!(ledger.current_leader().await.unwrap(), Leader::None);

    ledger.shutdown().await.unwrap();
}

#[tokio::test]
async fn unknown_region_is_not_found() {
    let ledger = create_test_ledger().await;

    let result = ledger.region_result("Atlantis").await;
    assert_eq!(result, Err(Error::NotFound("Atlantis".to_string())));

    // Ledger remains usable
    ledger
        .submit_result(&owner(), RegionResult::new("Ohio", 800, 1200, 33))
        .await
        .unwrap();

    ledger.shutdown().await.unwrap();
}

#[tokio::test]
async fn concurrent_duplicate_submissions_accept_once() {
    let ledger = std::sync::Arc::new(create_test_ledger().await);

    let mut tasks = Vec::new();
    for _ in 0..16 {
        let ledger = ledger.clone();
        tasks.push(tokio::spawn(async move {
            ledger
                .submit_result(&owner(), RegionResult::new("Florida", 500, 400, 29))
                .await
        }));
    }

    let mut accepted = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(_) => accepted += 1,
            Err(e) => assert!(matches!(e, Error::DuplicateRegion(_))),
        }
    }

    assert_eq!(accepted, 1);
    assert_eq!(ledger.seats(Candidate::CandidateA).await.unwrap(), 29);
}
