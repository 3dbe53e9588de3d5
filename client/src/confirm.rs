//! Waiting for transaction confirmation.

use std::time::Duration;

use dims_transactions::Call;
use dims_types::{Receipt, TxHash};

use crate::{ClientError, LedgerApi, Signer};

/// Default time to wait for a receipt.
pub const DEFAULT_CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Default delay between receipt polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(200);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub confirmation_timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            confirmation_timeout: DEFAULT_CONFIRMATION_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// Poll `ledger` until `tx_hash` has a receipt or the timeout elapses.
pub async fn await_receipt<L: LedgerApi + ?Sized>(
    ledger: &L,
    tx_hash: TxHash,
    config: &ClientConfig,
) -> Result<Receipt, ClientError> {
    let poll = async {
        loop {
            if let Some(receipt) = ledger.receipt(&tx_hash).await? {
                return Ok::<_, ClientError>(receipt);
            }
            tokio::time::sleep(config.poll_interval).await;
        }
    };

    match tokio::time::timeout(config.confirmation_timeout, poll).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(
                %tx_hash,
                timeout = ?config.confirmation_timeout,
                "confirmation timed out"
            );
            Err(ClientError::ConfirmationTimeout {
                tx_hash,
                waited: config.confirmation_timeout,
            })
        }
    }
}

/// Sign `call`, submit it, and wait for its receipt.
pub async fn submit_and_confirm<L: LedgerApi + ?Sized>(
    ledger: &L,
    signer: &Signer,
    call: Call,
    config: &ClientConfig,
) -> Result<Receipt, ClientError> {
    let function = call.function();
    let tx = signer.sign(call)?;
    let tx_hash = ledger.submit(tx).await?;
    tracing::debug!(%tx_hash, function, "submitted transaction");
    await_receipt(ledger, tx_hash, config).await
}
