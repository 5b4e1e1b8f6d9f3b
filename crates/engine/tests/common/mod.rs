use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use engine::{Account, Engine, Money, NewAccount};
use migration::MigratorTrait;

pub async fn engine_with_db() -> (Engine, DatabaseConnection) {
    // One connection: every pooled connection would get its own memory DB.
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1);
    let db = Database::connect(options).await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

pub fn money(value: &str) -> Money {
    value.parse().unwrap()
}

pub async fn account_with_balance(engine: &Engine, name: &str, balance: &str) -> Account {
    let account = engine
        .create_user(NewAccount {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
        })
        .await
        .unwrap();
    let balance = money(balance);
    if balance.is_positive() {
        engine.deposit(account.id, balance).await.unwrap();
    }
    account
}
