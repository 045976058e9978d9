use rusqlite::OptionalExtension;

use crate::error::constraint_to;
use crate::models::{NewUser, UserRow};
use crate::{Database, StoreError, StoreResult};

impl Database {
    /// Register a user. A second registration for the same wallet address
    /// fails with `AlreadyExists` and never overwrites the first profile.
    pub fn create_user(&self, user: &NewUser) -> StoreResult<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (address, username, display_name, bio, avatar_cid, password)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                rusqlite::params![
                    user.address,
                    user.username,
                    user.display_name,
                    user.bio,
                    user.avatar_cid,
                    user.password_hash,
                ],
            )
            .map_err(|e| constraint_to(e, "user"))?;
            Ok(())
        })
    }

    pub fn get_user(&self, address: &str) -> StoreResult<Option<UserRow>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    "SELECT address, username, display_name, bio, avatar_cid, password, created_at
                     FROM users WHERE address = ?1",
                    [address],
                    |row| {
                        Ok(UserRow {
                            address: row.get(0)?,
                            username: row.get(1)?,
                            display_name: row.get(2)?,
                            bio: row.get(3)?,
                            avatar_cid: row.get(4)?,
                            password: row.get(5)?,
                            created_at: row.get(6)?,
                        })
                    },
                )
                .optional()?;
            Ok(row)
        })
    }

    /// Bio is the only profile field that is ever updated in place.
    pub fn update_bio(&self, address: &str, bio: &str) -> StoreResult<()> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE users SET bio = ?2 WHERE address = ?1",
                rusqlite::params![address, bio],
            )?;
            if changed == 0 {
                return Err(StoreError::NotFound("user"));
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::testutil;

    fn new_user(address: &str, username: &str) -> NewUser {
        NewUser {
            address: address.to_string(),
            username: username.to_string(),
            display_name: "Display".to_string(),
            bio: "first bio".to_string(),
            avatar_cid: "QmAvatar".to_string(),
            password_hash: "$argon2id$fake".to_string(),
        }
    }

    #[test]
    fn second_registration_rejected_and_first_profile_kept() {
        let db = testutil::db();
        db.create_user(&new_user("0xA", "alice")).unwrap();

        let err = db.create_user(&new_user("0xA", "mallory")).unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists("user")));

        let row = db.get_user("0xA").unwrap().unwrap();
        assert_eq!(row.username, "alice");
        assert_eq!(row.bio, "first bio");
    }

    #[test]
    fn lookup_missing_user_is_none() {
        let db = testutil::db();
        assert!(db.get_user("0xNOBODY").unwrap().is_none());
    }

    #[test]
    fn update_bio_only_touches_bio() {
        let db = testutil::db();
        db.create_user(&new_user("0xA", "alice")).unwrap();

        db.update_bio("0xA", "new bio").unwrap();
        let row = db.get_user("0xA").unwrap().unwrap();
        assert_eq!(row.bio, "new bio");
        assert_eq!(row.username, "alice");

        assert!(matches!(
            db.update_bio("0xB", "whatever"),
            Err(StoreError::NotFound("user"))
        ));
    }
}
