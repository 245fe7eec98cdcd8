//! User accounts.

use chrono::Utc;
use rig_core::entities::User;
use rig_core::enums::UserRole;
use rig_core::ids::PREFIX_USER;
use rig_core::validate;

use crate::error::DatabaseError;
use crate::helpers::{parse_datetime, parse_enum};
use crate::service::RigService;

const COLUMNS: &str = "id, username, email, is_active, role, created_at, hashed_password";

/// A user together with the stored password hash, for login checks.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub user: User,
    pub hashed_password: String,
}

fn row_to_record(row: &libsql::Row) -> Result<UserRecord, DatabaseError> {
    Ok(UserRecord {
        user: User {
            id: row.get::<String>(0)?,
            username: row.get::<String>(1)?,
            email: row.get::<String>(2)?,
            is_active: row.get::<i64>(3)? != 0,
            role: parse_enum::<UserRole>(&row.get::<String>(4)?)?,
            created_at: parse_datetime(&row.get::<String>(5)?)?,
        },
        hashed_password: row.get::<String>(6)?,
    })
}

impl RigService {
    /// Create an account. Username and email must both be unused.
    pub async fn create_user(
        &self,
        username: &str,
        email: &str,
        hashed_password: &str,
        role: UserRole,
    ) -> Result<User, DatabaseError> {
        let username = validate::required_text("username", username, 64)?;
        // Usernames double as the per-user suite directory name.
        let username = validate::path_segment("username", &username)?;
        let email = validate::email("email", email)?;

        if self.find_user_by_username(&username).await?.is_some() {
            return Err(DatabaseError::Validation(
                "Username already registered".to_string(),
            ));
        }
        let mut rows = self
            .db()
            .query("SELECT 1 FROM users WHERE email = ?1", [email.as_str()])
            .await?;
        if rows.next().await?.is_some() {
            return Err(DatabaseError::Validation(
                "Email already registered".to_string(),
            ));
        }

        let id = self.db().generate_id(PREFIX_USER).await?;
        self.db()
            .execute(
                "INSERT INTO users (id, username, email, hashed_password, is_active, role, created_at)
                 VALUES (?1, ?2, ?3, ?4, 1, ?5, ?6)",
                libsql::params![
                    id.as_str(),
                    username.as_str(),
                    email.as_str(),
                    hashed_password,
                    role.as_str(),
                    Utc::now().to_rfc3339()
                ],
            )
            .await?;
        self.get_user(&id).await
    }

    pub async fn get_user(&self, id: &str) -> Result<User, DatabaseError> {
        let mut rows = self
            .db()
            .query(&format!("SELECT {COLUMNS} FROM users WHERE id = ?1"), [id])
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("user", id))?;
        Ok(row_to_record(&row)?.user)
    }

    pub async fn find_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserRecord>, DatabaseError> {
        let mut rows = self
            .db()
            .query(
                &format!("SELECT {COLUMNS} FROM users WHERE username = ?1"),
                [username],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_record(&row)?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use rig_core::enums::UserRole;

    use crate::error::DatabaseError;
    use crate::test_support::helpers::test_service;

    #[tokio::test]
    async fn create_and_find() {
        let svc = test_service().await;
        let user = svc
            .create_user("alice", "alice@lab.io", "$2b$hash", UserRole::User)
            .await
            .unwrap();
        assert!(user.id.starts_with("usr-"));
        assert!(user.is_active);
        assert_eq!(user.role, UserRole::User);

        let record = svc.find_user_by_username("alice").await.unwrap().unwrap();
        assert_eq!(record.user, user);
        assert_eq!(record.hashed_password, "$2b$hash");
    }

    #[tokio::test]
    async fn duplicate_username_or_email_is_rejected() {
        let svc = test_service().await;
        svc.create_user("alice", "alice@lab.io", "h", UserRole::User)
            .await
            .unwrap();

        let err = svc
            .create_user("alice", "other@lab.io", "h", UserRole::User)
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Validation(ref m) if m.contains("Username")));

        let err = svc
            .create_user("bob", "alice@lab.io", "h", UserRole::Admin)
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Validation(ref m) if m.contains("Email")));
    }

    #[tokio::test]
    async fn malformed_email_is_rejected() {
        let svc = test_service().await;
        let err = svc
            .create_user("carol", "not-an-email", "h", UserRole::User)
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Validation(_)));
    }

    #[tokio::test]
    async fn username_must_be_a_single_path_segment() {
        let svc = test_service().await;
        for (i, name) in ["qa/team", "a\\b", ".ops", "nul\0byte"].into_iter().enumerate() {
            let err = svc
                .create_user(name, &format!("u{i}@lab.io"), "h", UserRole::User)
                .await
                .unwrap_err();
            assert!(
                matches!(err, DatabaseError::Validation(ref m) if m.starts_with("username")),
                "{name:?}"
            );
        }
        assert!(svc.find_user_by_username("qa/team").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn admin_role_roundtrips() {
        let svc = test_service().await;
        let admin = svc
            .create_user("root", "root@lab.io", "h", UserRole::Admin)
            .await
            .unwrap();
        assert_eq!(svc.get_user(&admin.id).await.unwrap().role, UserRole::Admin);
    }
}
