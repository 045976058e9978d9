use rusqlite::OptionalExtension;

use crate::error::constraint_to;
use crate::models::BankRow;
use crate::{Database, StoreResult};

impl Database {
    /// The bank is a singleton row with exactly one admin; a second creation
    /// attempt is `AlreadyExists` no matter which fields differ.
    pub fn create_bank(&self, bank_id: &str, admin_wallet: &str) -> StoreResult<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO bank (id, bank_id, admin_wallet) VALUES (1, ?1, ?2)",
                rusqlite::params![bank_id, admin_wallet],
            )
            .map_err(|e| constraint_to(e, "bank"))?;
            Ok(())
        })
    }

    pub fn get_bank(&self, bank_id: &str) -> StoreResult<Option<BankRow>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    "SELECT bank_id, admin_wallet, balance FROM bank WHERE bank_id = ?1",
                    [bank_id],
                    |row| {
                        Ok(BankRow {
                            bank_id: row.get(0)?,
                            admin_wallet: row.get(1)?,
                            balance: row.get(2)?,
                        })
                    },
                )
                .optional()?;
            Ok(row)
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::StoreError;
    use crate::queries::testutil;

    #[test]
    fn bank_is_a_singleton() {
        let db = testutil::db();

        db.create_bank("bank1", "0xADMIN").unwrap();
        assert!(matches!(
            db.create_bank("bank2", "0xOTHER"),
            Err(StoreError::AlreadyExists("bank"))
        ));

        let bank = db.get_bank("bank1").unwrap().unwrap();
        assert_eq!(bank.admin_wallet, "0xADMIN");
        assert_eq!(bank.balance, 0);
        assert!(db.get_bank("bank2").unwrap().is_none());
    }
}
