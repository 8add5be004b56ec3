//! Database model for accounts.

use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;

use crate::errors::StorageError;
use lotbook_core::accounts::Account;

/// Database row for an account aggregate.
///
/// `data` holds the whole serialized account; `name`, `account_type` and
/// `created_at` are copied out of it for ordering and inspection only.
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::accounts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AccountDB {
    pub id: String,
    pub name: String,
    pub account_type: String,
    pub data: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<&Account> for AccountDB {
    type Error = StorageError;

    fn try_from(account: &Account) -> Result<Self, Self::Error> {
        Ok(Self {
            id: account.id.clone(),
            name: account.name.clone(),
            account_type: account.account_type.as_str().to_string(),
            data: serde_json::to_string(account)?,
            created_at: account.created_at.naive_utc(),
            updated_at: Utc::now().naive_utc(),
        })
    }
}

impl TryFrom<AccountDB> for Account {
    type Error = StorageError;

    fn try_from(db: AccountDB) -> Result<Self, Self::Error> {
        Ok(serde_json::from_str(&db.data)?)
    }
}
