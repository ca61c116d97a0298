//! modq engine: transport, cancellation, polling and effect execution.
mod bulk;
mod coordinator;
mod debounce;
mod http;
mod persist;
mod poll;
mod presets;
mod registry;
mod settings;
mod transport;
mod types;

pub use bulk::{run_bulk, settle_all};
pub use coordinator::{Coordinator, Navigator};
pub use debounce::Debouncer;
pub use http::ReqwestTransport;
pub use persist::{ensure_dir, write_atomic, PersistError};
pub use poll::{PollCallback, PollMonitor, SubscriptionId};
pub use presets::{FilterPreset, PresetStore};
pub use registry::{RequestRegistry, RequestTicket};
pub use settings::{EngineSettings, DEFAULT_BASE_URL};
pub use transport::{Transport, TransportFacade};
pub use types::{FailureKind, RequestKey, TransportError};
