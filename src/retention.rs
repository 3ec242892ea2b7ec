use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::audio_store::AudioStore;
use crate::config::RetentionConfig;

/// Periodically delete synthesis output files past the configured age.
pub fn spawn_output_sweep(store: Arc<AudioStore>, config: RetentionConfig) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(config.sweep_interval_secs));
        loop {
            ticker.tick().await;
            match store
                .prune_outputs_older_than(Duration::from_secs(config.max_age_secs))
                .await
            {
                Ok(0) => {}
                Ok(removed) => info!(removed, "Pruned expired synthesis output files"),
                Err(e) => warn!(error = %e, "Output retention sweep failed"),
            }
        }
    })
}
