//! View-state layer
//!
//! Everything the user list and the add/edit form need: an observable state
//! container, search debouncing, the `UserStore` view-model, the `UserForm`
//! editing session, and plain-text list rendering.

pub mod debounce;
pub mod form;
pub mod list;
pub mod state;
pub mod store;

pub use debounce::Debouncer;
pub use form::{FieldState, FormMode, SubmitOutcome, UserForm};
pub use list::{ListView, UserRow};
pub use state::{Observable, SubscriptionId};
pub use store::{StorageFailure, StoreOperation, UserStore};
