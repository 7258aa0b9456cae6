use kernel::interface::update::StoreSynchronizer;
use tracing::warn;

pub use self::{book::*, collection::*, rent::*, session::*, stats::*, user::*};

mod book;
mod collection;
mod rent;
mod session;
mod stats;
mod user;

/// Notifies the store after a local mutation. A failure is logged, never surfaced.
async fn notify_store<S: StoreSynchronizer>(synchronizer: &S) {
    if let Err(report) = synchronizer.sync_to().await {
        warn!(error = ?report, "Failed to synchronize catalog to store");
    }
}
