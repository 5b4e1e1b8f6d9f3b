use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub mod user {
    use super::*;

    /// Request body for creating a user.
    ///
    /// A `balance` sent by the client is accepted and ignored: new users
    /// always start at zero.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserNew {
        pub name: String,
        pub email: String,
        #[serde(default, skip_serializing)]
        pub balance: Option<Decimal>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct User {
        pub id: i64,
        pub name: String,
        pub email: String,
        pub balance: Decimal,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Balance {
        pub balance: Decimal,
    }

    /// Request body for deposits and withdrawals.
    ///
    /// `balance` is the amount to move, not the resulting balance.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct BalanceUpdate {
        pub id: i64,
        pub balance: Decimal,
    }
}

pub mod transfer {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransferNew {
        pub from_user_id: i64,
        pub to_user_id: i64,
        pub amount: Decimal,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Transfer {
        pub id: i64,
        pub from_user_id: i64,
        pub to_user_id: i64,
        pub amount: Decimal,
        pub created_at: DateTime<Utc>,
    }

    /// Raw pagination query (`?limit=&cursor=`).
    ///
    /// Both values stay strings so malformed input can fall back to defaults
    /// instead of rejecting the request.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct PageQuery {
        pub limit: Option<String>,
        pub cursor: Option<String>,
    }
}

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// HTTP status code.
    pub status: u16,
    /// Human readable description.
    pub message: String,
    /// Underlying error.
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
}
