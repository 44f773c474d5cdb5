//! Digest pipeline: select, resolve, render, summarize, deliver.

pub mod deliver;
pub mod identity;
pub mod summarize;
pub mod transcript;
pub mod window;

use tracing::{error, info};

use self::deliver::DeliverySink;
use self::summarize::Summarizer;
use crate::ai::Generator;
use crate::core::locale::Locale;
use crate::core::models::{Destination, Digest, Selection};
use crate::core::source::ChatSource;
use crate::errors::DigestError;

/// Where a run currently is. Stages only move forward; any failure lands in
/// `Failed` and the run is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Idle,
    ChatResolved,
    MessagesFetched,
    TranscriptBuilt,
    DigestGenerated,
    Delivered,
    Failed,
}

/// One digest run over one chat.
pub struct DigestPipeline<'a, S, G>
where
    S: ChatSource,
    G: Generator,
{
    source: &'a S,
    summarizer: &'a Summarizer<G>,
    sink: &'a dyn DeliverySink<S::Chat>,
    locale: Locale,
    stage: PipelineStage,
}

impl<'a, S, G> DigestPipeline<'a, S, G>
where
    S: ChatSource,
    G: Generator,
{
    pub fn new(
        source: &'a S,
        summarizer: &'a Summarizer<G>,
        sink: &'a dyn DeliverySink<S::Chat>,
        locale: Locale,
    ) -> Self {
        Self {
            source,
            summarizer,
            sink,
            locale,
            stage: PipelineStage::Idle,
        }
    }

    #[must_use]
    pub fn stage(&self) -> PipelineStage {
        self.stage
    }

    /// Run every stage once.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by any stage; the pipeline is then
    /// `Failed` until the next call.
    pub async fn run(
        &mut self,
        handle: &str,
        selection: &Selection,
        destination: Destination,
    ) -> Result<Digest, DigestError> {
        // Every invocation starts over; nothing carries across runs.
        self.stage = PipelineStage::Idle;

        match self.run_stages(handle, selection, destination).await {
            Ok(digest) => Ok(digest),
            Err(e) => {
                error!("Digest run failed after stage {:?}: {}", self.stage, e);
                self.stage = PipelineStage::Failed;
                Err(e)
            }
        }
    }

    async fn run_stages(
        &mut self,
        handle: &str,
        selection: &Selection,
        destination: Destination,
    ) -> Result<Digest, DigestError> {
        let chat = self.source.resolve_chat(handle).await?;
        self.advance(PipelineStage::ChatResolved);

        let messages = window::select(self.source.messages(&chat), selection).await?;
        let message_count = messages.len();
        info!("Selected {} messages ({:?})", message_count, selection);
        self.advance(PipelineStage::MessagesFetched);

        let resolved = identity::resolve_messages(self.source, messages, self.locale).await;
        let transcript = transcript::render(&resolved, self.locale);
        #[cfg(feature = "debug-logs")]
        info!("Transcript:\n{}", transcript);
        self.advance(PipelineStage::TranscriptBuilt);

        let text = self.summarizer.summarize(&transcript).await?;
        // Captured before delivery; a failed send must not lose it.
        info!(digest = %text, "Digest generated");
        self.advance(PipelineStage::DigestGenerated);

        self.sink
            .deliver(destination, &chat, &text)
            .await
            .map_err(|e| match e {
                DigestError::DeliveryError(_) => e,
                other => DigestError::DeliveryError(other.to_string()),
            })?;
        self.advance(PipelineStage::Delivered);

        Ok(Digest {
            text,
            message_count,
        })
    }

    fn advance(&mut self, next: PipelineStage) {
        info!("Pipeline stage {:?} -> {:?}", self.stage, next);
        self.stage = next;
    }
}
