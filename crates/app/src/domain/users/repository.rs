//! Users Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::users::records::{UserCredentials, UserRecord, UserUuid};

const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const GET_USER_SQL: &str = include_str!("sql/get_user.sql");
const FIND_USER_CREDENTIALS_BY_EMAIL_SQL: &str =
    include_str!("sql/find_user_credentials_by_email.sql");
const UPDATE_USER_SQL: &str = include_str!("sql/update_user.sql");
const DELETE_USER_SQL: &str = include_str!("sql/delete_user.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgUsersRepository;

impl PgUsersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        username: &str,
        email: &str,
        password_verifier: &str,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(CREATE_USER_SQL)
            .bind(user.into_uuid())
            .bind(username)
            .bind(email)
            .bind(password_verifier)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(GET_USER_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_credentials_by_email(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
    ) -> Result<Option<UserCredentials>, sqlx::Error> {
        let row = query(FIND_USER_CREDENTIALS_BY_EMAIL_SQL)
            .bind(email)
            .fetch_optional(&mut **tx)
            .await?;

        row.map(|row| {
            Ok(UserCredentials {
                uuid: UserUuid::from_uuid(row.try_get("uuid")?),
                password_verifier: row.try_get("password_verifier")?,
            })
        })
        .transpose()
    }

    pub(crate) async fn update_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        username: &str,
        email: &str,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(UPDATE_USER_SQL)
            .bind(user.into_uuid())
            .bind(username)
            .bind(email)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_USER_SQL)
            .bind(user.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for UserRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get("uuid")?),
            username: row.try_get("username")?,
            email: row.try_get("email")?,
            status: row.try_get("status")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
