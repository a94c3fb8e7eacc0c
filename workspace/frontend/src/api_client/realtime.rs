use common::{ChangeEvent, ChangeKind, Table};
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{EventSource, MessageEvent};

use crate::settings;

fn stream_endpoint(table: Table) -> String {
    format!("/realtime/{}", table.name())
}

/// An open server-sent event stream for one table.
///
/// The stream is closed when the subscription is dropped, so a component
/// keeps it alive for exactly as long as it is mounted.
pub struct ChangeSubscription {
    source: EventSource,
    _listener: Closure<dyn FnMut(MessageEvent)>,
}

impl ChangeSubscription {
    pub fn open<F>(table: Table, on_change: F) -> Result<Self, String>
    where
        F: Fn(ChangeEvent) + 'static,
    {
        let url = settings::get_settings().api_url(&stream_endpoint(table));
        log::debug!("Opening change stream: {}", url);

        let source = EventSource::new(&url)
            .map_err(|e| format!("Failed to open change stream for {}: {:?}", table, e))?;

        let listener = Closure::<dyn FnMut(MessageEvent)>::new(move |event: MessageEvent| {
            let Some(data) = event.data().as_string() else {
                log::warn!("Change event without text payload on {}", table);
                return;
            };
            match serde_json::from_str::<ChangeEvent>(&data) {
                Ok(change) => {
                    log::debug!("{} {} on {}", change.kind.as_str(), change.id, change.table);
                    on_change(change);
                }
                Err(e) => log::warn!("Ignoring malformed change event: {}", e),
            }
        });

        for kind in [ChangeKind::Insert, ChangeKind::Update, ChangeKind::Delete] {
            source
                .add_event_listener_with_callback(kind.as_str(), listener.as_ref().unchecked_ref())
                .map_err(|e| format!("Failed to listen for {} events: {:?}", kind.as_str(), e))?;
        }

        Ok(Self { source, _listener: listener })
    }
}

impl Drop for ChangeSubscription {
    fn drop(&mut self) {
        log::debug!("Closing change stream {}", self.source.url());
        self.source.close();
    }
}
