//! Client-side state layer: an immutable state tree updated by pure
//! reducers, fed through a FIFO dispatch queue. Action creators wrap the
//! HTTP API and return messages for the store.

pub mod actions;
pub mod api;
pub mod reducers;
pub mod state;
pub mod store;

pub use actions::{Action, AlertAction, AuthAction, PostAction, ProfileAction};
pub use api::ApiClient;
pub use reducers::reduce;
pub use state::{Alert, AlertKind, AppState, RequestError, Route};
pub use store::Store;
