//! Client-side state owned by the application controller.
//!
//! Views read this state but never mutate it; they emit actions which the
//! controller applies here.

mod edit_buffer;
mod section;
mod store;
mod toggle;

pub use edit_buffer::{EditBuffer, EditDraft, EditField};
pub use section::Section;
pub use store::ActivityStore;
pub use toggle::FailurePolicy;
