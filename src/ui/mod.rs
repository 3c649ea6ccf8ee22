// UI state
// Framework-agnostic state the presentation layer renders from

pub mod modal_set;
pub mod store;
pub mod toolbar;

pub use modal_set::{ModalError, ModalSetManager, ModalSnapshot, SchedulerModal};
pub use store::{Store, SubscriptionId};
pub use toolbar::{NavigationStep, ToolbarOptions};
