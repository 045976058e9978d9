use rusqlite::OptionalExtension;

use crate::error::constraint_to;
use crate::models::{MessageRow, NewMessage};
use crate::ownership::assert_owner;
use crate::{Database, StoreError, StoreResult};

impl Database {
    /// Persist one mirrored message. Preconditions are checked before any
    /// write: a non-empty CID, an existing mailbox, and the NFT fields
    /// supplied together or not at all. Returns the stored row with its
    /// assigned id; the id is stable and never reused.
    pub fn insert_message(&self, msg: &NewMessage) -> StoreResult<MessageRow> {
        if msg.cid.is_empty() {
            return Err(StoreError::Validation("CID cannot be empty".into()));
        }
        if msg.nft_object_id.is_some() != msg.claim_price.is_some() {
            return Err(StoreError::Validation(
                "nft_object_id and claim_price must be supplied together".into(),
            ));
        }

        self.with_conn(|conn| {
            let mailbox: Option<i64> = conn
                .query_row(
                    "SELECT id FROM mailboxes WHERE mailbox_id = ?1",
                    [&msg.mailbox_id],
                    |row| row.get(0),
                )
                .optional()?;
            if mailbox.is_none() {
                return Err(StoreError::NotFound("mailbox"));
            }

            let id = match msg.id {
                Some(id) => {
                    conn.execute(
                        "INSERT INTO messages
                           (id, sender, receiver, cid, content, timestamp,
                            nft_object_id, claim_price, mailbox_id)
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                        rusqlite::params![
                            id,
                            msg.sender,
                            msg.receiver,
                            msg.cid,
                            msg.content,
                            msg.timestamp,
                            msg.nft_object_id,
                            msg.claim_price,
                            msg.mailbox_id,
                        ],
                    )
                    .map_err(|e| constraint_to(e, "message"))?;
                    id
                }
                None => {
                    conn.execute(
                        "INSERT INTO messages
                           (sender, receiver, cid, content, timestamp,
                            nft_object_id, claim_price, mailbox_id)
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                        rusqlite::params![
                            msg.sender,
                            msg.receiver,
                            msg.cid,
                            msg.content,
                            msg.timestamp,
                            msg.nft_object_id,
                            msg.claim_price,
                            msg.mailbox_id,
                        ],
                    )
                    .map_err(|e| constraint_to(e, "message"))?;
                    conn.last_insert_rowid()
                }
            };

            Ok(MessageRow {
                id,
                sender: msg.sender.clone(),
                receiver: msg.receiver.clone(),
                cid: msg.cid.clone(),
                content: msg.content.clone(),
                timestamp: msg.timestamp,
                nft_object_id: msg.nft_object_id.clone(),
                claim_price: msg.claim_price,
                mailbox_id: msg.mailbox_id.clone(),
            })
        })
    }

    /// Every message where the wallet is sender or receiver, and no others.
    /// Rowid order, which is stable under repeated calls absent mutation.
    pub fn messages_for_participant(&self, wallet: &str) -> StoreResult<Vec<MessageRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, sender, receiver, cid, content, timestamp,
                        nft_object_id, claim_price, mailbox_id
                 FROM messages
                 WHERE sender = ?1 OR receiver = ?1",
            )?;
            let rows = stmt
                .query_map([wallet], |row| {
                    Ok(MessageRow {
                        id: row.get(0)?,
                        sender: row.get(1)?,
                        receiver: row.get(2)?,
                        cid: row.get(3)?,
                        content: row.get(4)?,
                        timestamp: row.get(5)?,
                        nft_object_id: row.get(6)?,
                        claim_price: row.get(7)?,
                        mailbox_id: row.get(8)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// Mirror of the canonical on-chain message deletion. Ownership is
    /// checked against the mailbox owner, not the message's sender or
    /// receiver.
    pub fn delete_message(
        &self,
        mailbox_id: &str,
        message_id: i64,
        requester: &str,
    ) -> StoreResult<()> {
        self.with_conn(|conn| {
            let owner: Option<String> = conn
                .query_row(
                    "SELECT owner_wallet FROM mailboxes WHERE mailbox_id = ?1",
                    [mailbox_id],
                    |row| row.get(0),
                )
                .optional()?;
            let owner = owner.ok_or(StoreError::NotFound("mailbox"))?;
            assert_owner(&owner, requester, "mailbox")?;

            let deleted = conn.execute(
                "DELETE FROM messages WHERE id = ?1 AND mailbox_id = ?2",
                rusqlite::params![message_id, mailbox_id],
            )?;
            if deleted == 0 {
                return Err(StoreError::NotFound("message"));
            }
            Ok(())
        })
    }
}
