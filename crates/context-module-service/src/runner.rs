use context_module_nft::model::{LoaderOptions, Transaction};
use context_module_nft::ContextLoader;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

use crate::core::Error;

/// Load the context of each JSON transaction read from `input`, one per line,
/// and write the JSON encoded responses to `output`, one line per transaction.
///
/// Lines that are not a transaction are skipped. Returns the number of
/// transactions processed.
pub async fn run<L, R, W>(loader: &L, options: &LoaderOptions, input: R, mut output: W) -> Result<usize, Error>
where
    L: ContextLoader,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    let mut processed = 0;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let transaction = match serde_json::from_str::<Transaction>(line) {
            Ok(transaction) => transaction,
            Err(e) => {
                warn!(error = %e, "skipping invalid transaction");
                continue;
            },
        };

        let responses = loader.load(&transaction, options).await;
        debug!(to = ?transaction.to, responses = responses.len(), "transaction loaded");

        let mut encoded = serde_json::to_vec(&responses)?;
        encoded.push(b'\n');

        output.write_all(&encoded).await?;
        output.flush().await?;
        processed += 1;
    }

    Ok(processed)
}
