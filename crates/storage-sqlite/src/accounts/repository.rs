use async_trait::async_trait;
use diesel::prelude::*;
use log::debug;
use std::sync::Arc;

use super::model::AccountDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::accounts;
use crate::schema::accounts::dsl::*;
use lotbook_core::accounts::{Account, AccountRepositoryTrait};
use lotbook_core::errors::{Error, Result};

/// Repository for account aggregates, one row per account.
pub struct AccountRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl AccountRepository {
    /// Creates a new AccountRepository instance
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

fn to_rows(list: &[Account]) -> Result<Vec<AccountDB>> {
    list.iter()
        .map(|account| AccountDB::try_from(account).map_err(Into::into))
        .collect()
}

fn to_account(row: AccountDB) -> Result<Account> {
    Ok(Account::try_from(row)?)
}

#[async_trait]
impl AccountRepositoryTrait for AccountRepository {
    fn get_by_id(&self, account_id: &str) -> Result<Option<Account>> {
        let mut conn = get_connection(&self.pool)?;

        accounts
            .select(AccountDB::as_select())
            .find(account_id)
            .first::<AccountDB>(&mut conn)
            .optional()
            .into_core()?
            .map(to_account)
            .transpose()
    }

    /// Lists accounts, oldest first
    fn list(&self) -> Result<Vec<Account>> {
        let mut conn = get_connection(&self.pool)?;

        accounts
            .select(AccountDB::as_select())
            .order((created_at.asc(), name.asc()))
            .load::<AccountDB>(&mut conn)
            .into_core()?
            .into_iter()
            .map(to_account)
            .collect()
    }

    async fn save(&self, account: Account) -> Result<Account> {
        let row = AccountDB::try_from(&account).map_err(Error::from)?;

        self.writer
            .exec(move |conn| {
                diesel::replace_into(accounts::table)
                    .values(&row)
                    .execute(conn)
                    .into_core()?;
                debug!("Saved account {}", row.id);
                Ok(account)
            })
            .await
    }

    async fn delete(&self, account_id: &str) -> Result<usize> {
        let id_to_delete = account_id.to_string();
        self.writer
            .exec(move |conn| {
                diesel::delete(accounts.find(id_to_delete))
                    .execute(conn)
                    .into_core()
            })
            .await
    }

    async fn replace_all(&self, new_accounts: Vec<Account>) -> Result<usize> {
        let rows = to_rows(&new_accounts)?;

        self.writer
            .exec(move |conn| {
                let removed = diesel::delete(accounts::table).execute(conn).into_core()?;
                let inserted = if rows.is_empty() {
                    0
                } else {
                    diesel::insert_into(accounts::table)
                        .values(&rows)
                        .execute(conn)
                        .into_core()?
                };
                debug!(
                    "Replaced {} stored accounts with {} imported accounts",
                    removed, inserted
                );
                Ok(inserted)
            })
            .await
    }
}
