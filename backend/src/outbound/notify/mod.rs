//! Notification adapters for hospitals receiving new requests.

mod tracing_request_notifier;

pub use tracing_request_notifier::TracingRequestNotifier;
