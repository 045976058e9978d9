use rusqlite::Connection;
use tracing::info;

use crate::StoreResult;

pub fn run(conn: &Connection) -> StoreResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            address         TEXT PRIMARY KEY,
            username        TEXT NOT NULL,
            display_name    TEXT NOT NULL,
            bio             TEXT NOT NULL DEFAULT '',
            avatar_cid      TEXT NOT NULL DEFAULT '',
            password        TEXT NOT NULL,
            created_at      TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS mailboxes (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            mailbox_id      TEXT NOT NULL UNIQUE,
            owner_wallet    TEXT NOT NULL UNIQUE REFERENCES users(address)
        );

        -- Denormalized owner -> mailbox map. Always written in the same
        -- transaction as the mailboxes row; the two must never diverge.
        CREATE TABLE IF NOT EXISTS mailbox_registry (
            owner_wallet    TEXT PRIMARY KEY,
            mailbox_id      TEXT NOT NULL UNIQUE
        );

        -- Message ids mirror the 64-bit on-chain sequence when supplied by
        -- the caller; AUTOINCREMENT keeps locally assigned ids from ever
        -- being reused after a delete.
        CREATE TABLE IF NOT EXISTS messages (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            sender          TEXT NOT NULL,
            receiver        TEXT NOT NULL,
            cid             TEXT NOT NULL,
            content         TEXT,
            timestamp       INTEGER NOT NULL,
            nft_object_id   TEXT,
            claim_price     INTEGER,
            mailbox_id      TEXT NOT NULL REFERENCES mailboxes(mailbox_id)
        );

        CREATE INDEX IF NOT EXISTS idx_messages_sender ON messages(sender);
        CREATE INDEX IF NOT EXISTS idx_messages_receiver ON messages(receiver);
        CREATE INDEX IF NOT EXISTS idx_messages_mailbox ON messages(mailbox_id);

        CREATE TABLE IF NOT EXISTS kiosks (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            kiosk_id        TEXT NOT NULL UNIQUE,
            owner_wallet    TEXT NOT NULL REFERENCES users(address)
        );

        CREATE TABLE IF NOT EXISTS kiosk_items (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            item_id         TEXT NOT NULL UNIQUE,
            kiosk_id        TEXT NOT NULL REFERENCES kiosks(kiosk_id),
            title           TEXT NOT NULL,
            content_cid     TEXT NOT NULL,
            price           INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_kiosk_items_kiosk ON kiosk_items(kiosk_id);

        -- Singleton fee ledger; the CHECK pins it to one row, one admin.
        CREATE TABLE IF NOT EXISTS bank (
            id              INTEGER PRIMARY KEY CHECK (id = 1),
            bank_id         TEXT NOT NULL UNIQUE,
            admin_wallet    TEXT NOT NULL,
            balance         INTEGER NOT NULL DEFAULT 0
        );
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}
