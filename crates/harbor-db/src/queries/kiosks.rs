use rusqlite::OptionalExtension;

use crate::error::constraint_to;
use crate::models::{KioskItemRow, KioskRow, NewKioskItem};
use crate::ownership::assert_owner;
use crate::{Database, StoreError, StoreResult};

impl Database {
    pub fn create_kiosk(&self, kiosk_id: &str, owner_wallet: &str) -> StoreResult<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO kiosks (kiosk_id, owner_wallet) VALUES (?1, ?2)",
                rusqlite::params![kiosk_id, owner_wallet],
            )
            .map_err(|e| constraint_to(e, "kiosk"))?;
            Ok(())
        })
    }

    pub fn get_kiosk(&self, kiosk_id: &str) -> StoreResult<Option<KioskRow>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    "SELECT id, kiosk_id, owner_wallet FROM kiosks WHERE kiosk_id = ?1",
                    [kiosk_id],
                    map_kiosk,
                )
                .optional()?;
            Ok(row)
        })
    }

    pub fn list_kiosks(&self) -> StoreResult<Vec<KioskRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT id, kiosk_id, owner_wallet FROM kiosks")?;
            let rows = stmt
                .query_map([], map_kiosk)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// Owner-only; removes the kiosk's items in the same transaction.
    pub fn delete_kiosk(&self, kiosk_id: &str, requester: &str) -> StoreResult<()> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            let owner: Option<String> = tx
                .query_row(
                    "SELECT owner_wallet FROM kiosks WHERE kiosk_id = ?1",
                    [kiosk_id],
                    |row| row.get(0),
                )
                .optional()?;
            let owner = owner.ok_or(StoreError::NotFound("kiosk"))?;
            assert_owner(&owner, requester, "kiosk")?;

            tx.execute("DELETE FROM kiosk_items WHERE kiosk_id = ?1", [kiosk_id])?;
            tx.execute("DELETE FROM kiosks WHERE kiosk_id = ?1", [kiosk_id])?;
            tx.commit()?;
            Ok(())
        })
    }

    /// Publish an item into a kiosk the requester owns.
    pub fn add_kiosk_item(&self, item: &NewKioskItem, requester: &str) -> StoreResult<()> {
        self.with_conn(|conn| {
            let owner: Option<String> = conn
                .query_row(
                    "SELECT owner_wallet FROM kiosks WHERE kiosk_id = ?1",
                    [&item.kiosk_id],
                    |row| row.get(0),
                )
                .optional()?;
            let owner = owner.ok_or(StoreError::NotFound("kiosk"))?;
            assert_owner(&owner, requester, "kiosk")?;

            conn.execute(
                "INSERT INTO kiosk_items (item_id, kiosk_id, title, content_cid, price)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![
                    item.item_id,
                    item.kiosk_id,
                    item.title,
                    item.content_cid,
                    item.price,
                ],
            )
            .map_err(|e| constraint_to(e, "kiosk item"))?;
            Ok(())
        })
    }

    pub fn list_kiosk_items(&self, kiosk_id: &str) -> StoreResult<Vec<KioskItemRow>> {
        self.with_conn(|conn| {
            let kiosk: Option<i64> = conn
                .query_row(
                    "SELECT id FROM kiosks WHERE kiosk_id = ?1",
                    [kiosk_id],
                    |row| row.get(0),
                )
                .optional()?;
            if kiosk.is_none() {
                return Err(StoreError::NotFound("kiosk"));
            }

            let mut stmt = conn.prepare(
                "SELECT id, item_id, kiosk_id, title, content_cid, price
                 FROM kiosk_items WHERE kiosk_id = ?1",
            )?;
            let rows = stmt
                .query_map([kiosk_id], map_item)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn remove_kiosk_item(&self, item_id: &str, requester: &str) -> StoreResult<()> {
        self.with_conn(|conn| {
            // Owner lives on the kiosk, not the item.
            let owner: Option<String> = conn
                .query_row(
                    "SELECT k.owner_wallet
                     FROM kiosk_items i JOIN kiosks k ON i.kiosk_id = k.kiosk_id
                     WHERE i.item_id = ?1",
                    [item_id],
                    |row| row.get(0),
                )
                .optional()?;
            let owner = owner.ok_or(StoreError::NotFound("kiosk item"))?;
            assert_owner(&owner, requester, "kiosk")?;

            conn.execute("DELETE FROM kiosk_items WHERE item_id = ?1", [item_id])?;
            Ok(())
        })
    }

    /// Remove a purchased item. Payment is settled on-chain before this is
    /// called; the mirror only drops the row.
    pub fn purchase_item(&self, item_id: &str) -> StoreResult<()> {
        self.with_conn(|conn| {
            let deleted = conn.execute("DELETE FROM kiosk_items WHERE item_id = ?1", [item_id])?;
            if deleted == 0 {
                return Err(StoreError::NotFound("kiosk item"));
            }
            Ok(())
        })
    }
}

fn map_kiosk(row: &rusqlite::Row) -> rusqlite::Result<KioskRow> {
    Ok(KioskRow {
        id: row.get(0)?,
        kiosk_id: row.get(1)?,
        owner_wallet: row.get(2)?,
    })
}

fn map_item(row: &rusqlite::Row) -> rusqlite::Result<KioskItemRow> {
    Ok(KioskItemRow {
        id: row.get(0)?,
        item_id: row.get(1)?,
        kiosk_id: row.get(2)?,
        title: row.get(3)?,
        content_cid: row.get(4)?,
        price: row.get(5)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::testutil;

    fn item(item_id: &str, kiosk_id: &str) -> NewKioskItem {
        NewKioskItem {
            item_id: item_id.to_string(),
            kiosk_id: kiosk_id.to_string(),
            title: "An item".to_string(),
            content_cid: "QmItem".to_string(),
            price: 100,
        }
    }

    fn db_with_kiosk(owner: &str, kiosk_id: &str) -> Database {
        let db = testutil::db();
        testutil::seed_user(&db, owner);
        db.create_kiosk(kiosk_id, owner).unwrap();
        db
    }

    #[test]
    fn duplicate_kiosk_id_rejected() {
        let db = db_with_kiosk("0xA", "k1");
        testutil::seed_user(&db, "0xB");
        assert!(matches!(
            db.create_kiosk("k1", "0xB"),
            Err(StoreError::AlreadyExists("kiosk"))
        ));
        assert_eq!(db.get_kiosk("k1").unwrap().unwrap().owner_wallet, "0xA");
    }

    #[test]
    fn only_kiosk_owner_can_publish_items() {
        let db = db_with_kiosk("0xA", "k1");

        assert!(matches!(
            db.add_kiosk_item(&item("i1", "k1"), "0xB"),
            Err(StoreError::NotAuthorized("kiosk"))
        ));
        assert!(matches!(
            db.add_kiosk_item(&item("i1", "k-none"), "0xA"),
            Err(StoreError::NotFound("kiosk"))
        ));

        db.add_kiosk_item(&item("i1", "k1"), "0xA").unwrap();
        assert_eq!(db.list_kiosk_items("k1").unwrap().len(), 1);
    }

    #[test]
    fn non_owner_removal_leaves_item_intact() {
        let db = db_with_kiosk("0xA", "k1");
        db.add_kiosk_item(&item("i1", "k1"), "0xA").unwrap();

        assert!(matches!(
            db.remove_kiosk_item("i1", "0xB"),
            Err(StoreError::NotAuthorized("kiosk"))
        ));
        assert_eq!(db.list_kiosk_items("k1").unwrap().len(), 1);

        db.remove_kiosk_item("i1", "0xA").unwrap();
        assert!(db.list_kiosk_items("k1").unwrap().is_empty());
        assert!(matches!(
            db.remove_kiosk_item("i1", "0xA"),
            Err(StoreError::NotFound("kiosk item"))
        ));
    }

    #[test]
    fn purchase_removes_item_without_ownership_check() {
        let db = db_with_kiosk("0xA", "k1");
        db.add_kiosk_item(&item("i1", "k1"), "0xA").unwrap();

        db.purchase_item("i1").unwrap();
        assert!(matches!(
            db.purchase_item("i1"),
            Err(StoreError::NotFound("kiosk item"))
        ));
    }

    #[test]
    fn delete_kiosk_cascades_items() {
        let db = db_with_kiosk("0xA", "k1");
        db.add_kiosk_item(&item("i1", "k1"), "0xA").unwrap();

        assert!(matches!(
            db.delete_kiosk("k1", "0xB"),
            Err(StoreError::NotAuthorized("kiosk"))
        ));

        db.delete_kiosk("k1", "0xA").unwrap();
        assert!(db.get_kiosk("k1").unwrap().is_none());
        assert!(matches!(
            db.list_kiosk_items("k1"),
            Err(StoreError::NotFound("kiosk"))
        ));
    }
}
