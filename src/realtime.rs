//! In-process change feed. Handlers publish an event after every successful
//! write and subscribers (the SSE endpoint, background callbacks) receive the
//! events of the table they asked for.

use common::{ChangeEvent, ChangeKind, Table};
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

/// Events buffered per table before slow receivers start lagging.
const CHANNEL_CAPACITY: usize = 256;

/// One broadcast channel per store table.
#[derive(Clone, Debug)]
pub struct ChangeFeed {
    channels: Arc<[broadcast::Sender<ChangeEvent>; 5]>,
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeFeed {
    pub fn new() -> Self {
        let channels = Table::ALL.map(|_| broadcast::channel(CHANNEL_CAPACITY).0);
        Self { channels: Arc::new(channels) }
    }

    fn sender(&self, table: Table) -> &broadcast::Sender<ChangeEvent> {
        let slot = match table {
            Table::Orders => 0,
            Table::Menu => 1,
            Table::Ingredients => 2,
            Table::MenuIngredients => 3,
            Table::Student => 4,
        };
        &self.channels[slot]
    }

    pub fn subscribe(&self, table: Table) -> broadcast::Receiver<ChangeEvent> {
        debug!(%table, "New change feed subscriber");
        self.sender(table).subscribe()
    }

    /// Emits a change event, returning how many subscribers received it.
    pub fn publish(&self, table: Table, kind: ChangeKind, id: i32) -> usize {
        let event = ChangeEvent { table, kind, id };
        match self.sender(table).send(event) {
            Ok(receivers) => {
                trace!(%table, ?kind, id, receivers, "Published change event");
                receivers
            }
            Err(_) => {
                trace!(%table, ?kind, id, "No subscribers for change event");
                0
            }
        }
    }

    /// Runs `callback` for every event on `table` until the returned handle is
    /// aborted or the feed is dropped. Missed events are skipped when the
    /// callback falls behind.
    pub fn on_change<F>(&self, table: Table, callback: F) -> JoinHandle<()>
    where
        F: Fn(ChangeEvent) + Send + 'static,
    {
        let mut receiver = self.subscribe(table);
        tokio::spawn(async move {
            loop {
                match receiver.recv().await {
                    Ok(event) => callback(event),
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(%table, skipped, "Change listener lagged, skipping events");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
            debug!(%table, "Change listener stopped");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn subscribers_only_see_their_table() {
        let feed = ChangeFeed::new();
        let mut orders = feed.subscribe(Table::Orders);
        let mut menu = feed.subscribe(Table::Menu);

        assert_eq!(feed.publish(Table::Orders, ChangeKind::Update, 7), 1);

        let event = orders.recv().await.unwrap();
        assert_eq!(event, ChangeEvent { table: Table::Orders, kind: ChangeKind::Update, id: 7 });
        assert!(menu.try_recv().is_err());
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_not_an_error() {
        let feed = ChangeFeed::new();
        assert_eq!(feed.publish(Table::Student, ChangeKind::Insert, 1), 0);
    }

    #[tokio::test]
    async fn on_change_invokes_callback_until_aborted() {
        let feed = ChangeFeed::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = feed.on_change(Table::Orders, move |event| {
            let _ = tx.send(event.id);
        });

        feed.publish(Table::Orders, ChangeKind::Insert, 1);
        feed.publish(Table::Orders, ChangeKind::Update, 1);
        assert_eq!(rx.recv().await, Some(1));
        assert_eq!(rx.recv().await, Some(1));

        handle.abort();
        let _ = handle.await;
        // Sender was owned by the aborted task, so the channel closes.
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn lagged_listener_keeps_receiving() {
        let feed = ChangeFeed::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();

        let handle = feed.on_change(Table::Menu, move |event| {
            sink.lock().unwrap().push(event.id);
        });
        // Single-threaded test runtime: the listener only runs once we yield.
        for id in 0..(CHANNEL_CAPACITY as i32 + 10) {
            feed.publish(Table::Menu, ChangeKind::Update, id);
        }

        tokio::time::sleep(Duration::from_millis(50)).await;
        feed.publish(Table::Menu, ChangeKind::Update, -1);
        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.abort();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.last(), Some(&-1));
        assert!(seen.len() <= CHANNEL_CAPACITY + 1);
    }
}
