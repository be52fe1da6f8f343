use crate::traits::Pacer;
use async_trait::async_trait;
use std::time::Duration;
use tracing::trace;

/// Pacer backed by the tokio timer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioPacer;

#[async_trait]
impl Pacer for TokioPacer {
    async fn pause(&self, duration: Duration) {
        trace!("pausing for {:?}", duration);
        tokio::time::sleep(duration).await;
    }
}
