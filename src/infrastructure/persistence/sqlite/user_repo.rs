//! SQLite User Repository

use async_trait::async_trait;
use sqlx::{FromRow, QueryBuilder, Sqlite};

use super::DbPool;
use crate::application::ports::{RepositoryError, UserRepositoryPort};
use crate::domain::user::{NewUser, User, UserChanges, UserId};

/// SQLite User Repository
///
/// 每个操作只执行一条语句，连接由连接池在语句前后获取和归还。
pub struct SqliteUserRepository {
    pool: DbPool,
}

impl SqliteUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
    password: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            username: row.username,
            email: row.email,
            password: row.password,
        }
    }
}

fn db_error(e: sqlx::Error) -> RepositoryError {
    RepositoryError::DatabaseError(e.to_string())
}

#[async_trait]
impl UserRepositoryPort for SqliteUserRepository {
    async fn list_users(&self) -> Result<Vec<User>, RepositoryError> {
        let rows: Vec<UserRow> =
            sqlx::query_as("SELECT id, username, email, password FROM users")
                .fetch_all(&self.pool)
                .await
                .map_err(db_error)?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row: Option<UserRow> =
            sqlx::query_as("SELECT id, username, email, password FROM users WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error)?;

        Ok(row.map(User::from))
    }

    async fn user_exists(&self, id: UserId) -> Result<bool, RepositoryError> {
        let size: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(size > 0)
    }

    async fn create_user(&self, user: &NewUser) -> Result<User, RepositoryError> {
        user.validate()?;

        let id = sqlx::query("INSERT INTO users (username, email, password) VALUES (?, ?, ?)")
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password)
            .execute(&self.pool)
            .await
            .map_err(db_error)?
            .last_insert_rowid();

        self.get_user(id)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("user {} after insert", id)))
    }

    async fn update_user(
        &self,
        id: UserId,
        changes: &UserChanges,
    ) -> Result<User, RepositoryError> {
        changes.validate()?;

        let assignments = changes.assignments();
        if !assignments.is_empty() {
            let mut builder = QueryBuilder::<Sqlite>::new("UPDATE users SET ");
            let mut set = builder.separated(", ");
            for (column, value) in assignments {
                set.push(format!("{} = ", column));
                set.push_bind_unseparated(value);
            }
            builder.push(" WHERE id = ");
            builder.push_bind(id);

            builder
                .build()
                .execute(&self.pool)
                .await
                .map_err(db_error)?;
        }

        self.get_user(id)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("user {}", id)))
    }

    async fn delete_user(&self, id: UserId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
