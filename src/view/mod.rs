//! Screen state: list views, form dialogs and the search debouncer

pub mod debounce;
pub mod fields;
pub mod form;
pub mod list;

pub use debounce::Debouncer;
pub use form::{FormDialog, FormMode, FormResource, Submission};
pub use list::{Action, ListScreen, ListView, Pagination};
