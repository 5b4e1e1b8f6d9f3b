mod common;

use std::sync::Arc;

use engine::{EngineError, Money, Page, transfers};

use common::{account_with_balance, engine_with_db, money};

#[tokio::test]
async fn transfer_moves_money_and_records_it() {
    let (engine, _db) = engine_with_db().await;
    let u1 = account_with_balance(&engine, "U1", "100.00").await;
    let u2 = account_with_balance(&engine, "U2", "0").await;

    let transfer = engine.transfer(u1.id, u2.id, money("40.00")).await.unwrap();

    assert_eq!(transfer.from_user_id, u1.id);
    assert_eq!(transfer.to_user_id, u2.id);
    assert_eq!(transfer.amount.to_string(), "40");
    assert_eq!(engine.balance(u1.id).await.unwrap(), money("60"));
    assert_eq!(engine.balance(u2.id).await.unwrap(), money("40"));

    let outbound = engine.outbound_transfers(u1.id, Page::default()).await.unwrap();
    assert_eq!(outbound, vec![transfer]);
}

#[tokio::test]
async fn transfer_with_insufficient_funds_changes_nothing() {
    let (engine, _db) = engine_with_db().await;
    let u1 = account_with_balance(&engine, "U1", "10").await;
    let u2 = account_with_balance(&engine, "U2", "5").await;

    let err = engine.transfer(u1.id, u2.id, money("10.01")).await.unwrap_err();

    assert_eq!(
        err,
        EngineError::InsufficientFunds("not enough money on balance, available only 10".to_string())
    );
    assert_eq!(engine.balance(u1.id).await.unwrap(), money("10"));
    assert_eq!(engine.balance(u2.id).await.unwrap(), money("5"));
    assert!(
        engine
            .inbound_transfers(u2.id, Page::default())
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn transfer_to_missing_account_rolls_back() {
    let (engine, _db) = engine_with_db().await;
    let u1 = account_with_balance(&engine, "U1", "10").await;

    let err = engine.transfer(u1.id, 999, money("1")).await.unwrap_err();

    assert_eq!(err, EngineError::KeyNotFound("user 999".to_string()));
    assert_eq!(engine.balance(u1.id).await.unwrap(), money("10"));
}

#[tokio::test]
async fn transfer_rejects_same_account_and_bad_amounts() {
    let (engine, _db) = engine_with_db().await;
    let u1 = account_with_balance(&engine, "U1", "10").await;
    let u2 = account_with_balance(&engine, "U2", "0").await;

    let err = engine.transfer(u1.id, u1.id, money("1")).await.unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidArgument("from_user_id and to_user_id must differ".to_string())
    );

    for amount in ["0", "-3"] {
        let err = engine.transfer(u1.id, u2.id, money(amount)).await.unwrap_err();
        assert!(matches!(err, EngineError::InvalidAmount(_)));
    }
    assert_eq!(engine.balance(u1.id).await.unwrap(), money("10"));
}

#[tokio::test]
async fn created_transfer_reads_back_identical() {
    let (engine, db) = engine_with_db().await;
    let u1 = account_with_balance(&engine, "U1", "0").await;
    let u2 = account_with_balance(&engine, "U2", "0").await;

    let created = transfers::create_transfer(&db, u1.id, u2.id, money("2.50"))
        .await
        .unwrap();
    let read = engine.transfer_by_id(created.id).await.unwrap();

    assert_eq!(read, created);
}

#[tokio::test]
async fn create_transfer_rejects_non_positive_amount() {
    let (engine, db) = engine_with_db().await;
    let u1 = account_with_balance(&engine, "U1", "0").await;
    let u2 = account_with_balance(&engine, "U2", "0").await;

    let err = transfers::create_transfer(&db, u1.id, u2.id, Money::ZERO)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));
}

#[tokio::test]
async fn missing_transfer_is_not_found() {
    let (engine, _db) = engine_with_db().await;

    let err = engine.transfer_by_id(5).await.unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound("transfer 5".to_string()));
}

#[tokio::test]
async fn inbound_pages_follow_the_cursor() {
    let (engine, _db) = engine_with_db().await;
    let sender = account_with_balance(&engine, "Sender", "100").await;
    let other = account_with_balance(&engine, "Other", "100").await;
    let receiver = account_with_balance(&engine, "Receiver", "0").await;

    for _ in 0..12 {
        engine.transfer(sender.id, receiver.id, money("1")).await.unwrap();
        engine.transfer(other.id, sender.id, money("1")).await.unwrap();
    }

    let first = engine
        .inbound_transfers(receiver.id, Page::default())
        .await
        .unwrap();
    assert_eq!(first.len(), 10);
    assert!(first.iter().all(|t| t.to_user_id == receiver.id));
    assert!(first.windows(2).all(|w| w[0].id < w[1].id));
    assert!(first[0].id > 0);

    let cursor = first.last().unwrap().id;
    let second = engine
        .inbound_transfers(receiver.id, Page::new(cursor, 10))
        .await
        .unwrap();
    assert_eq!(second.len(), 2);
    assert!(second.iter().all(|t| t.id > cursor));

    let rest = engine
        .inbound_transfers(receiver.id, Page::new(second[1].id, 10))
        .await
        .unwrap();
    assert!(rest.is_empty());
}

#[tokio::test]
async fn between_filters_both_ends() {
    let (engine, _db) = engine_with_db().await;
    let a = account_with_balance(&engine, "A", "100").await;
    let b = account_with_balance(&engine, "B", "100").await;
    let c = account_with_balance(&engine, "C", "100").await;

    engine.transfer(a.id, b.id, money("1")).await.unwrap();
    engine.transfer(a.id, c.id, money("2")).await.unwrap();
    engine.transfer(b.id, a.id, money("3")).await.unwrap();
    engine.transfer(a.id, b.id, money("4")).await.unwrap();

    let between = engine
        .transfers_between(a.id, b.id, Page::default())
        .await
        .unwrap();
    let amounts: Vec<String> = between.iter().map(|t| t.amount.to_string()).collect();
    assert_eq!(amounts, vec!["1", "4"]);

    let outbound = engine
        .outbound_transfers(a.id, Page::new(0, 2))
        .await
        .unwrap();
    assert_eq!(outbound.len(), 2);
    assert!(outbound.iter().all(|t| t.from_user_id == a.id));
}

#[tokio::test]
async fn concurrent_transfers_conserve_money() {
    let (engine, _db) = engine_with_db().await;
    let a = account_with_balance(&engine, "A", "50").await;
    let b = account_with_balance(&engine, "B", "50").await;
    let engine = Arc::new(engine);

    let mut tasks = tokio::task::JoinSet::new();
    for i in 0..20 {
        let engine = Arc::clone(&engine);
        let (from, to) = if i % 2 == 0 { (a.id, b.id) } else { (b.id, a.id) };
        tasks.spawn(async move { engine.transfer(from, to, money("35")).await });
    }

    let mut recorded = 0;
    while let Some(result) = tasks.join_next().await {
        match result.unwrap() {
            Ok(_) => recorded += 1,
            Err(EngineError::InsufficientFunds(_)) => {}
            Err(err) => panic!("unexpected error: {err}"),
        }
    }

    let balance_a = engine.balance(a.id).await.unwrap();
    let balance_b = engine.balance(b.id).await.unwrap();
    assert!(!balance_a.is_negative());
    assert!(!balance_b.is_negative());
    assert_eq!(balance_a.checked_add(balance_b).unwrap(), money("100"));

    let sent_by_a = engine
        .outbound_transfers(a.id, Page::new(0, 100))
        .await
        .unwrap()
        .len();
    let sent_by_b = engine
        .outbound_transfers(b.id, Page::new(0, 100))
        .await
        .unwrap()
        .len();
    assert_eq!(sent_by_a + sent_by_b, recorded);
}
