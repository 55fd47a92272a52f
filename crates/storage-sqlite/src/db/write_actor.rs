use super::DbPool;
use crate::errors::StorageError;
use diesel::SqliteConnection;
use spendwise_core::errors::{DatabaseError, Error, Result};
use std::any::Any;
use tokio::sync::{mpsc, oneshot};

// Jobs run on the actor's connection and return the core Result callers expect.
type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;

type ErasedJob = Job<Box<dyn Any + Send + 'static>>;
type ErasedReply = oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>;

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<(ErasedJob, ErasedReply)>,
}

impl WriteHandle {
    /// Executes a database job on the writer actor's dedicated connection.
    ///
    /// Every job runs inside its own immediate transaction, so a job that
    /// returns an error leaves the database untouched.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |c| job(c).map(|v| Box::new(v) as Box<dyn Any + Send>)),
                ret_tx,
            ))
            .await
            .map_err(|_| Error::Unexpected("Writer actor has stopped".to_string()))?;

        let boxed = ret_rx.await.map_err(|_| {
            Error::Unexpected("Writer actor dropped the reply without a result".to_string())
        })??;

        boxed
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| Error::Unexpected("Failed to downcast writer actor result".to_string()))
    }
}

/// Spawns a background Tokio task that acts as the single writer to the database.
/// The actor owns one pooled connection and processes write jobs serially.
pub fn spawn_writer(pool: DbPool) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<(ErasedJob, ErasedReply)>(1024);

    tokio::spawn(async move {
        let mut conn = match pool.get() {
            Ok(conn) => conn,
            Err(e) => {
                let message = e.to_string();
                log::error!("Writer actor could not acquire a connection: {}", message);
                while let Some((_, reply_tx)) = rx.recv().await {
                    let _ = reply_tx.send(Err(Error::Database(
                        DatabaseError::ConnectionFailed(message.clone()),
                    )));
                }
                return;
            }
        };

        while let Some((job, reply_tx)) = rx.recv().await {
            let result: Result<Box<dyn Any + Send + 'static>> = conn
                .immediate_transaction::<_, StorageError, _>(|c| job(c).map_err(StorageError::from))
                .map_err(Error::from);

            // The requester may have gone away (timeout or cancellation).
            let _ = reply_tx.send(result);
        }
    });

    WriteHandle { tx }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, get_connection, run_migrations};
    use crate::schema::app_settings;
    use diesel::prelude::*;
    use tempfile::tempdir;

    fn setting_count(pool: &DbPool) -> i64 {
        let mut conn = get_connection(pool).unwrap();
        app_settings::table.count().get_result(&mut conn).unwrap()
    }

    #[tokio::test]
    async fn failing_job_rolls_back_its_writes() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("test.db").to_string_lossy().to_string();
        let pool = create_pool(&path).unwrap();
        run_migrations(&pool).unwrap();
        let writer = spawn_writer((*pool).clone());

        let result: Result<()> = writer
            .exec(|conn| {
                diesel::insert_into(app_settings::table)
                    .values((
                        app_settings::setting_key.eq("theme"),
                        app_settings::setting_value.eq("dark"),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Err(Error::NotFound("abort".to_string()))
            })
            .await;

        assert!(matches!(result, Err(Error::NotFound(_))));
        assert_eq!(setting_count(&pool), 0);
    }

    #[tokio::test]
    async fn jobs_return_their_values() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("test.db").to_string_lossy().to_string();
        let pool = create_pool(&path).unwrap();
        run_migrations(&pool).unwrap();
        let writer = spawn_writer((*pool).clone());

        let inserted: usize = writer
            .exec(|conn| {
                Ok(diesel::insert_into(app_settings::table)
                    .values((
                        app_settings::setting_key.eq("theme"),
                        app_settings::setting_value.eq("dark"),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
            .unwrap();

        assert_eq!(inserted, 1);
        assert_eq!(setting_count(&pool), 1);
    }
}
