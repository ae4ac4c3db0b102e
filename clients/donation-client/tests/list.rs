//! Listing donations from a program scan.

use solana_sdk::signature::Keypair;

use donation_client::{
    DonationError, DonationRecord, KeypairWallet, WalletSigner, WithdrawalRequest,
};

mod helpers;
use helpers::*;

#[tokio::test]
async fn corrupt_account_is_left_out_of_the_listing() {
    let alice = test_pubkey("alice");
    let bob = test_pubkey("bob");
    let ledger = FakeLedger::new().with_accounts(vec![
        donation_account(&alice, 10, T),
        donation_account(&bob, 20, T + 1),
        foreign_account(vec![7; 13]),
        donation_account(&alice, 30, T + 2),
    ]);
    let session = session_with(ledger, KeypairWallet::new(Keypair::new()));

    let donations = session.list_donations(None).await.unwrap();

    assert_eq!(donations.len(), 3);
    let amounts: Vec<_> = donations.iter().map(|d| d.amount).collect();
    assert_eq!(amounts, vec![10, 20, 30]);
    assert_eq!(donations[1].record(), DonationRecord::new(bob, 20, T + 1));
}

#[tokio::test]
async fn foreign_shapes_never_decode_as_donations() {
    let ledger = FakeLedger::new().with_accounts(vec![
        foreign_account(Vec::new()),
        foreign_account(WithdrawalRequest::new(T).encode()),
        foreign_account(vec![1; DonationRecord::LEN + 8]),
    ]);
    let session = session_with(ledger, KeypairWallet::new(Keypair::new()));

    assert!(session.list_donations(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn donor_filter_keeps_the_matching_subset() {
    let alice = test_pubkey("alice");
    let bob = test_pubkey("bob");
    let ledger = FakeLedger::new().with_accounts(vec![
        donation_account(&alice, 10, T),
        donation_account(&bob, 20, T + 1),
        donation_account(&alice, 30, T + 2),
    ]);
    let session = session_with(ledger, KeypairWallet::new(Keypair::new()));

    let everything = session.list_donations(None).await.unwrap();
    let alice_key = alice.to_string();
    let only_alice = session.list_donations(Some(&alice_key)).await.unwrap();

    let expected: Vec<_> = everything
        .into_iter()
        .filter(|d| d.donor.to_string() == alice_key)
        .collect();
    assert_eq!(only_alice, expected);
    assert_eq!(only_alice.len(), 2);

    // Each listing re-fetches from the ledger.
    assert_eq!(
        session.ledger().calls(),
        vec!["program_accounts", "program_accounts"]
    );
}

#[tokio::test]
async fn listing_does_not_need_a_wallet() {
    let session = session_with(FakeLedger::new(), KeypairWallet::new(Keypair::new()));
    session.list_donations(None).await.unwrap();
    assert_eq!(session.wallet().public_key(), None);
}

#[tokio::test]
async fn scan_failure_is_a_network_error() {
    let session = session_with(
        FakeLedger::new().offline(),
        KeypairWallet::new(Keypair::new()),
    );

    let err = session.list_donations(None).await.unwrap_err();
    assert!(matches!(err, DonationError::Network(_)));
}
