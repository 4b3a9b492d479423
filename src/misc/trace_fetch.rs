use std::sync::Arc;

use alloy::providers::Provider;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::{GenericProvider, misc::retry::retry_until_success_or_cancelled};

pub const TRACE_BLOCK_METHOD: &str = "trace_block";

/// Outcome of a `trace_block` fetch. `Unavailable` covers nodes that do not
/// expose the tracing API as well as fetches that failed after retries; the
/// caller proceeds with empty reward maps in both cases.
#[derive(Debug)]
pub enum TraceBlockResult {
    Entries(Vec<Value>),
    Unavailable,
}

/// Fetches the raw `trace_block` entries for a block.
///
/// Transient RPC errors are retried until the token is cancelled or the
/// attempt budget runs out. A node reporting that the method does not exist
/// resolves to `Unavailable` on the first attempt. This call never fails:
/// reward traces are an optional enrichment and must not take down the
/// surrounding block processing.
pub async fn fetch_block_traces(
    cancel: &CancellationToken,
    provider: &Arc<GenericProvider>,
    block_number: u64,
) -> TraceBlockResult {
    let block_tag = format!("0x{block_number:x}");

    let outcome = retry_until_success_or_cancelled(
        cancel,
        || {
            let block_tag = block_tag.clone();
            async move {
                match provider
                    .raw_request::<_, Vec<Value>>(TRACE_BLOCK_METHOD.into(), (block_tag,))
                    .await
                {
                    Ok(entries) => Ok(TraceBlockResult::Entries(entries)),
                    Err(err) if is_trace_method_missing(&err.to_string()) => {
                        info!(
                            "{TRACE_BLOCK_METHOD} not available on this RPC endpoint, \
                             skipping reward traces"
                        );
                        Ok(TraceBlockResult::Unavailable)
                    }
                    Err(err) => Err(eyre::Report::new(err)),
                }
            }
        },
        TRACE_BLOCK_METHOD,
    )
    .await;

    match outcome {
        Ok(result) => result,
        Err(err) => {
            warn!("{TRACE_BLOCK_METHOD} for block {block_number} failed: {err}");
            TraceBlockResult::Unavailable
        }
    }
}

fn is_trace_method_missing(message: &str) -> bool {
    message.contains(TRACE_BLOCK_METHOD) && message.contains("does not exist")
}
