use rusqlite::OptionalExtension;

use crate::error::constraint_to;
use crate::models::MailboxRow;
use crate::ownership::assert_owner;
use crate::{Database, StoreError, StoreResult};

impl Database {
    /// Create a mailbox and its registry entry in one transaction. Fails
    /// with `AlreadyExists` when the mailbox id is bound to any owner or the
    /// owner already has a mailbox.
    pub fn create_mailbox(&self, mailbox_id: &str, owner_wallet: &str) -> StoreResult<()> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            tx.execute(
                "INSERT INTO mailboxes (mailbox_id, owner_wallet) VALUES (?1, ?2)",
                rusqlite::params![mailbox_id, owner_wallet],
            )
            .map_err(|e| constraint_to(e, "mailbox"))?;
            tx.execute(
                "INSERT INTO mailbox_registry (owner_wallet, mailbox_id) VALUES (?1, ?2)",
                rusqlite::params![owner_wallet, mailbox_id],
            )
            .map_err(|e| constraint_to(e, "mailbox"))?;
            tx.commit()?;
            Ok(())
        })
    }

    pub fn get_mailbox(&self, mailbox_id: &str) -> StoreResult<Option<MailboxRow>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    "SELECT id, mailbox_id, owner_wallet FROM mailboxes WHERE mailbox_id = ?1",
                    [mailbox_id],
                    map_mailbox,
                )
                .optional()?;
            Ok(row)
        })
    }

    pub fn get_mailbox_by_owner(&self, owner_wallet: &str) -> StoreResult<Option<MailboxRow>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    "SELECT id, mailbox_id, owner_wallet FROM mailboxes WHERE owner_wallet = ?1",
                    [owner_wallet],
                    map_mailbox,
                )
                .optional()?;
            Ok(row)
        })
    }

    /// The registry's view of an owner's mailbox id.
    pub fn registry_entry(&self, owner_wallet: &str) -> StoreResult<Option<String>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    "SELECT mailbox_id FROM mailbox_registry WHERE owner_wallet = ?1",
                    [owner_wallet],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(row)
        })
    }

    /// Mirror of the canonical on-chain mailbox deletion. Removes the
    /// mailbox, its messages, and the registry row in one transaction;
    /// owner-only.
    pub fn delete_mailbox(&self, mailbox_id: &str, requester: &str) -> StoreResult<()> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            let owner: Option<String> = tx
                .query_row(
                    "SELECT owner_wallet FROM mailboxes WHERE mailbox_id = ?1",
                    [mailbox_id],
                    |row| row.get(0),
                )
                .optional()?;
            let owner = owner.ok_or(StoreError::NotFound("mailbox"))?;
            assert_owner(&owner, requester, "mailbox")?;

            tx.execute("DELETE FROM messages WHERE mailbox_id = ?1", [mailbox_id])?;
            tx.execute(
                "DELETE FROM mailbox_registry WHERE mailbox_id = ?1",
                [mailbox_id],
            )?;
            tx.execute("DELETE FROM mailboxes WHERE mailbox_id = ?1", [mailbox_id])?;
            tx.commit()?;
            Ok(())
        })
    }
}

fn map_mailbox(row: &rusqlite::Row) -> rusqlite::Result<MailboxRow> {
    Ok(MailboxRow {
        id: row.get(0)?,
        mailbox_id: row.get(1)?,
        owner_wallet: row.get(2)?,
    })
}
