//! Client owning the connection pool and running interactive transactions.

use std::{future::Future, pin::Pin, time::Duration};

use sea_orm::{
    ConnAcquireErr, ConnectOptions, Database, DatabaseConnection, DatabaseTransaction, DbErr,
    IsolationLevel, TransactionTrait,
};

use crate::error::{query::QueryError, Error};

/// Defaults applied to [`AcademyClient::transaction`] when no options are passed.
#[derive(Debug, Clone)]
pub struct TransactionOptions {
    /// Isolation level passed to the database, `None` keeps the engine default.
    pub isolation_level: Option<IsolationLevel>,
    /// Maximum time to wait for a connection to start the transaction.
    pub max_wait: Duration,
    /// Maximum run time of the transaction callback before it is rolled back.
    pub timeout: Duration,
}

impl Default for TransactionOptions {
    fn default() -> Self {
        Self {
            isolation_level: None,
            max_wait: Duration::from_millis(2_000),
            timeout: Duration::from_millis(5_000),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub database_url: String,
    pub max_connections: u32,
    /// Log every SQL statement through `tracing`.
    pub sql_logging: bool,
    pub transaction: TransactionOptions,
}

impl ClientOptions {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: 10,
            sql_logging: false,
            transaction: TransactionOptions::default(),
        }
    }
}

/// Boxed transaction callback future borrowing the transaction for `'c`.
pub type TransactionFuture<'c, T> = Pin<Box<dyn Future<Output = Result<T, Error>> + Send + 'c>>;

pub struct AcademyClient {
    db: DatabaseConnection,
    options: ClientOptions,
}

impl AcademyClient {
    /// Open the connection pool described by `options`.
    pub async fn connect(options: ClientOptions) -> Result<Self, Error> {
        let mut opt = ConnectOptions::new(&options.database_url);
        opt.max_connections(options.max_connections)
            .acquire_timeout(options.transaction.max_wait)
            .sqlx_logging(options.sql_logging);

        let db = Database::connect(opt).await?;

        tracing::debug!(
            max_connections = options.max_connections,
            "connected to database"
        );

        Ok(Self { db, options })
    }

    /// Wrap an existing connection, used by tests running on an in-memory database.
    pub fn from_connection(db: DatabaseConnection, options: ClientOptions) -> Self {
        Self { db, options }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Close every pooled connection.
    pub async fn disconnect(self) -> Result<(), Error> {
        self.db.close().await?;
        Ok(())
    }

    /// Run `callback` inside a transaction.
    ///
    /// The transaction is committed when the callback returns `Ok` and rolled back when
    /// it returns `Err` or runs past `options.timeout`. Options default to the client's
    /// [`ClientOptions::transaction`].
    ///
    /// ```ignore
    /// client
    ///     .transaction(None, |txn| {
    ///         Box::pin(async move {
    ///             let academy = txn.academy().find_unique_or_throw(1).await?;
    ///             Ok(academy)
    ///         })
    ///     })
    ///     .await?;
    /// ```
    pub async fn transaction<F, T>(
        &self,
        options: Option<TransactionOptions>,
        callback: F,
    ) -> Result<T, Error>
    where
        F: for<'c> FnOnce(&'c DatabaseTransaction) -> TransactionFuture<'c, T>,
        T: Send,
    {
        let options = options.unwrap_or_else(|| self.options.transaction.clone());

        let txn = match tokio::time::timeout(
            options.max_wait,
            self.db.begin_with_config(options.isolation_level, None),
        )
        .await
        {
            Ok(txn) => txn?,
            Err(_) => {
                return Err(Error::from(DbErr::ConnectionAcquire(
                    ConnAcquireErr::Timeout,
                )))
            }
        };

        let outcome = tokio::time::timeout(options.timeout, callback(&txn)).await;

        match outcome {
            Ok(Ok(value)) => {
                txn.commit().await?;
                Ok(value)
            }
            Ok(Err(err)) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::warn!(error = %rollback_err, "failed to roll back transaction");
                }
                Err(err)
            }
            Err(_) => {
                tracing::warn!(
                    timeout_ms = options.timeout.as_millis() as u64,
                    "transaction timed out, rolling back"
                );
                txn.rollback().await?;
                Err(QueryError::TransactionTimeout(options.timeout).into())
            }
        }
    }
}
