use std::io::Write;

use async_trait::async_trait;

use crate::core::models::Destination;
use crate::errors::DigestError;

/// Final hand-off of a digest. `C` is the chat type of the source the
/// digest was built from, so sinks can post back into it.
#[async_trait]
pub trait DeliverySink<C: Sync>: Send + Sync {
    /// # Errors
    ///
    /// Returns `DeliveryError` if the payload could not be sent.
    async fn deliver(&self, destination: Destination, chat: &C, text: &str)
    -> Result<(), DigestError>;
}

/// Writes the digest to standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

#[async_trait]
impl<C: Sync> DeliverySink<C> for StdoutSink {
    async fn deliver(
        &self,
        _destination: Destination,
        _chat: &C,
        text: &str,
    ) -> Result<(), DigestError> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{text}")
            .and_then(|()| stdout.flush())
            .map_err(|e| DigestError::DeliveryError(format!("stdout: {e}")))
    }
}
