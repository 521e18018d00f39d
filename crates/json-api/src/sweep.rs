//! Background purge of dead token store entries.

use std::{sync::Arc, time::Duration};

use tokio::{task::JoinHandle, time::interval};
use tracing::debug;

use idols_app::auth::TokenStore;

/// Purge expired tokens and revocations every `period`.
///
/// The task holds only a weak reference and ends once the store is dropped.
pub(crate) fn spawn_token_sweep(store: &Arc<TokenStore>, period: Duration) -> JoinHandle<()> {
    let store = Arc::downgrade(store);

    tokio::spawn(async move {
        let mut ticker = interval(period);

        loop {
            ticker.tick().await;

            let Some(store) = store.upgrade() else {
                debug!("token store dropped, stopping sweep");

                break;
            };

            let purged = store.purge_expired();

            if purged > 0 {
                let (issued, revoked) = store.counts();

                debug!(purged, issued, revoked, "swept token store");
            }
        }
    })
}
