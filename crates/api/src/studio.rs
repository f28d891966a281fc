//! Shared studio session.
//!
//! [`StudioService`] owns the single [`Studio`] behind a
//! [`tokio::sync::RwLock`] and is the only writer of its result slot.
//! Accepted submissions run on a spawned task and complete with their
//! generation token, so a slow reply from an older cycle is discarded.
//!
//! Every transition publishes a [`StudioSnapshot`] on a
//! [`tokio::sync::broadcast`] channel. Call [`StudioService::subscribe`] to
//! receive them (the WebSocket stream does).

use std::sync::Arc;

use svgsmith_core::classify::{ErrorCategory, GenerationError};
use svgsmith_core::generation::{GeneratedArtifact, Generator};
use svgsmith_core::image::ImageAttachment;
use svgsmith_core::settings::TraceSettings;
use svgsmith_core::studio::{Completion, Studio, StudioSnapshot, SubmitRejection, Ticket};
use svgsmith_core::style::Style;
use svgsmith_core::types::GenerationToken;
use tokio::sync::{broadcast, RwLock};

/// Broadcast channel capacity for studio snapshots.
const SNAPSHOT_CHANNEL_CAPACITY: usize = 64;

pub struct StudioService {
    studio: RwLock<Studio>,
    generator: Generator,
    snapshot_tx: broadcast::Sender<StudioSnapshot>,
}

impl StudioService {
    pub fn new(generator: Generator) -> Arc<Self> {
        let (snapshot_tx, _) = broadcast::channel(SNAPSHOT_CHANNEL_CAPACITY);
        Arc::new(Self {
            studio: RwLock::new(Studio::new()),
            generator,
            snapshot_tx,
        })
    }

    /// Subscribe to snapshots published after every transition.
    pub fn subscribe(&self) -> broadcast::Receiver<StudioSnapshot> {
        self.snapshot_tx.subscribe()
    }

    pub async fn snapshot(&self) -> StudioSnapshot {
        self.studio.read().await.snapshot()
    }

    pub async fn select_style(&self, style: Style) -> StudioSnapshot {
        self.mutate(|studio| studio.select_style(style)).await
    }

    pub async fn update_settings(&self, settings: TraceSettings) -> StudioSnapshot {
        self.mutate(|studio| studio.update_settings(settings)).await
    }

    pub async fn attach_image(&self, image: ImageAttachment) -> StudioSnapshot {
        self.mutate(|studio| studio.attach_image(image)).await
    }

    pub async fn clear_image(&self) -> StudioSnapshot {
        self.mutate(Studio::clear_image).await
    }

    /// Submit a generation and run it in the background.
    ///
    /// Returns the token of the accepted request. Rejections leave the
    /// studio untouched and publish nothing.
    pub async fn submit(
        self: &Arc<Self>,
        prompt: &str,
        style: Option<Style>,
        settings: Option<TraceSettings>,
    ) -> Result<GenerationToken, SubmitRejection> {
        let ticket = {
            let mut studio = self.studio.write().await;
            let ticket = studio
                .submit_with(prompt, style, settings)
                .inspect_err(|rejection| {
                    tracing::debug!(reason = %rejection, "Submission rejected");
                })?;
            self.publish(studio.snapshot());
            ticket
        };

        tracing::info!(
            token = ticket.token,
            style = %ticket.request.style,
            has_image = ticket.request.image.is_some(),
            "Generation started",
        );

        let token = ticket.token;
        tokio::spawn(Arc::clone(self).run_ticket(ticket));

        Ok(token)
    }

    /// Run an accepted ticket and complete it, even if the generation task
    /// panics.
    async fn run_ticket(self: Arc<Self>, ticket: Ticket) {
        let Ticket { token, request } = ticket;
        let generator = self.generator.clone();
        let run = tokio::spawn(async move { generator.run(&request).await });

        let outcome = match run.await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(token, error = %e, "Generation task failed");
                Err(GenerationError::new(
                    ErrorCategory::ConnectionError,
                    format!("Generation task failed: {e}"),
                ))
            }
        };

        self.complete(token, outcome).await;
    }

    /// Apply the outcome of the request tagged `token`.
    pub async fn complete(
        &self,
        token: GenerationToken,
        outcome: Result<GeneratedArtifact, GenerationError>,
    ) -> Completion {
        let succeeded = outcome.is_ok();
        let mut studio = self.studio.write().await;
        let completion = studio.complete(token, outcome);

        match completion {
            Completion::Applied => {
                tracing::info!(token, succeeded, "Generation finished");
                self.publish(studio.snapshot());
            }
            Completion::Stale => {
                tracing::warn!(token, "Discarding stale generation result");
            }
        }
        completion
    }

    async fn mutate(&self, f: impl FnOnce(&mut Studio)) -> StudioSnapshot {
        let mut studio = self.studio.write().await;
        f(&mut studio);
        let snapshot = studio.snapshot();
        self.publish(snapshot.clone());
        snapshot
    }

    fn publish(&self, snapshot: StudioSnapshot) {
        // SendError only means there are zero receivers.
        let _ = self.snapshot_tx.send(snapshot);
    }
}
