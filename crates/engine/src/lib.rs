//! Balance engine.
//!
//! The engine owns the money-moving protocol of the service: deposits,
//! withdrawals and transfers between accounts. Each mutation is one database
//! transaction, and every store call inside it runs on that transaction's
//! handle, so a failure at any step leaves no partial writes behind.
//!
//! Balances never go negative. The protocol checks it before writing, the
//! [`users`] store refuses negative values, and the schema has a `CHECK`
//! constraint on the column.
//!
//! ```no_run
//! # async fn demo(db: sea_orm::DatabaseConnection) -> Result<(), engine::EngineError> {
//! use engine::{Engine, NewAccount};
//!
//! let engine = Engine::builder().database(db).build().await?;
//! let alice = engine
//!     .create_user(NewAccount { name: "Alice".into(), email: "alice@example.com".into() })
//!     .await?;
//! let bob = engine
//!     .create_user(NewAccount { name: "Bob".into(), email: "bob@example.com".into() })
//!     .await?;
//!
//! engine.deposit(alice.id, "100.00".parse()?).await?;
//! let transfer = engine.transfer(alice.id, bob.id, "40.00".parse()?).await?;
//! assert_eq!(transfer.amount.to_string(), "40");
//! # Ok(())
//! # }
//! ```

pub use error::EngineError;
pub use money::Money;
pub use ops::{Engine, EngineBuilder};
pub use transfers::{Page, Transfer};
pub use users::{Account, NewAccount};

mod error;
mod money;
mod ops;
pub mod transfers;
pub mod users;
mod util;

pub type ResultEngine<T> = Result<T, EngineError>;
