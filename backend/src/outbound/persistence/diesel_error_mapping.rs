//! Shared mapping from pool and Diesel failures to port error enums.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::{BoardSeedRepositoryError, PostPersistenceError, UserPersistenceError};

use super::pool::PoolError;

/// Port errors carrying the connection/query split every repository reports.
pub(super) trait StoreError: Sized {
    fn connection_failed(message: String) -> Self;
    fn query_failed(message: String) -> Self;
}

macro_rules! impl_store_error {
    ($($error:ty),* $(,)?) => {
        $(
            impl StoreError for $error {
                fn connection_failed(message: String) -> Self {
                    Self::connection(message)
                }

                fn query_failed(message: String) -> Self {
                    Self::query(message)
                }
            }
        )*
    };
}

impl_store_error!(UserPersistenceError, PostPersistenceError, BoardSeedRepositoryError);

pub(super) fn map_pool_error<E: StoreError>(error: PoolError) -> E {
    E::connection_failed(error.message().to_owned())
}

pub(super) fn map_diesel_error<E: StoreError>(error: DieselError) -> E {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(%error, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            E::connection_failed(info.message().to_owned())
        }
        DieselError::DatabaseError(_, info) => E::query_failed(info.message().to_owned()),
        DieselError::NotFound => E::query_failed("record not found".to_owned()),
        other => E::query_failed(other.to_string()),
    }
}

/// Convert a stored counter to the domain's unsigned tally.
pub(super) fn counter<E: StoreError>(value: i32, column: &'static str) -> Result<u32, E> {
    u32::try_from(value).map_err(|_| E::query_failed(format!("negative {column}: {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_errors_become_connection_errors() {
        let err: PostPersistenceError = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(err, PostPersistenceError::connection("timed out"));
    }

    #[rstest]
    fn not_found_becomes_query_error() {
        let err: UserPersistenceError = map_diesel_error(DieselError::NotFound);
        assert_eq!(err, UserPersistenceError::query("record not found"));
    }

    #[rstest]
    fn rollback_transaction_becomes_query_error() {
        let err: BoardSeedRepositoryError = map_diesel_error(DieselError::RollbackTransaction);
        assert!(matches!(err, BoardSeedRepositoryError::Query { .. }));
    }

    #[rstest]
    #[case(0, Some(0))]
    #[case(17, Some(17))]
    #[case(-1, None)]
    fn counter_rejects_negative_values(#[case] raw: i32, #[case] expected: Option<u32>) {
        let result: Result<u32, PostPersistenceError> = counter(raw, "upvotes");
        assert_eq!(result.ok(), expected);
    }
}
