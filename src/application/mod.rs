//! Application layer: use cases over the domain and ports.

mod controller;

pub use controller::{user_message, NavigationError, PendingSubmission, WizardController};
