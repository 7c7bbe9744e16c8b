use std::error::Error;
use std::path::Path;

use crate::{dto::TransactionRow, SharedEngine, Transaction};

use csv_async::{AsyncReaderBuilder, Error as CsvError, Trim};
use tokio::fs::File;
use tokio::sync::mpsc;
use tokio_stream::StreamExt;
use tracing::info;

const BUFFER_SIZE: usize = 1024;

type Result<T, E = Box<dyn Error + Send + Sync>> = std::result::Result<T, E>;

/// Imports the given CSV file into the shared engine asynchronously.
/// Spawns two tasks:
/// * CSV reader - streams rows from the input file, deserializes them and sends them to the applier via channel.
/// * Applier - receives transactions from the channel and upserts them until the channel is closed.
///
/// # Arguments
/// * `input_path` - Path to the CSV file, with header `transaction_id,amount,type,parent_id`
/// * `engine` - Shared store receiving the transactions; readers may use it concurrently
///
/// # Errors
/// Returns an error if:
/// * The input file cannot be read
/// * The CSV is malformed
///
/// Rows read before the failure stay imported.
pub async fn import<P>(input_path: P, engine: SharedEngine) -> Result<usize>
where
    P: AsRef<Path>,
{
    // Create channel for passing transactions from reader to applier
    let (tx, rx) = mpsc::channel(BUFFER_SIZE);
    let input_path = input_path.as_ref().to_owned();

    let reader_handle = tokio::spawn(read_transactions(input_path.clone(), tx));
    let applier_handle = tokio::spawn(apply_transactions(rx, engine));

    // Wait for reader to finish and propagate any errors, after the applier drained the channel
    let read_result = reader_handle.await?;
    let imported = applier_handle.await?;
    read_result?;

    info!(path = %input_path.display(), imported, "imported transactions");
    Ok(imported)
}

/// Reads and deserializes transaction rows from a CSV file.
/// Returns them through the provided channel.
async fn read_transactions(
    input_path: impl AsRef<Path> + Send,
    tx: mpsc::Sender<Transaction>,
) -> Result<(), CsvError> {
    let file = File::open(input_path).await?;
    let mut csv_reader = AsyncReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .create_deserializer(file);

    let mut records = csv_reader.deserialize::<TransactionRow>();
    while let Some(result) = records.next().await {
        match result {
            Ok(row) => {
                if tx.send(row.into()).await.is_err() {
                    // Receiver dropped, exit gracefully
                    break;
                }
            }
            // CSV parsing errors are critical - propagate them
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

/// Upserts transactions received through the channel.
/// Returns the number applied once the channel is closed by the reader.
async fn apply_transactions(mut rx: mpsc::Receiver<Transaction>, engine: SharedEngine) -> usize {
    let mut applied = 0;
    while let Some(transaction) = rx.recv().await {
        engine.upsert(transaction).await;
        applied += 1;
    }
    applied
}
