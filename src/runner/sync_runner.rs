use std::error::Error;
use std::path::Path;

use tracing::info;

use crate::{csv_utils::read_csv, dto::TransactionRow, Engine};

/// Imports every transaction of the given CSV file into the engine.
///
/// # Arguments
/// * `input_path` - Path to the CSV file, with header `transaction_id,amount,type,parent_id`
/// * `engine` - The store receiving the transactions
///
/// # Errors
/// Returns an error if:
/// * The input file cannot be read
/// * The CSV is malformed
///
/// Rows before a malformed one stay imported.
pub fn import<P>(input_path: P, engine: &mut Engine) -> Result<usize, Box<dyn Error>>
where
    P: AsRef<Path>,
{
    let mut imported = 0;
    for row in read_csv::<TransactionRow, _>(&input_path)? {
        // CSV parsing errors are critical - propagate them
        let row = row?;
        engine.upsert(row.into());
        imported += 1;
    }

    info!(
        path = %input_path.as_ref().display(),
        imported,
        "imported transactions"
    );
    Ok(imported)
}
