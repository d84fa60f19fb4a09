//! Page controllers for the catalog and compare views.
//!
//! Controllers own the page state (dataset, filters, compare selection) and
//! report what changed as [`ViewEvent`]s. Rendering is the presenter's job.
//!
//! ```text
//! user action ──► controller ──► state change ──► ViewEvent ──► Presenter
//!                     │
//!                     └──► PersistentCache (compare selection)
//! ```

mod catalog;
mod compare;
mod debounce;

pub use catalog::CatalogController;
pub use compare::{CompareController, CompareRow};
pub use debounce::Debouncer;

use crate::data::{DistroId, DistroRecord};

/// Something the view should reflect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// Show or hide the offline indicator.
    Offline(bool),
    /// No dataset could be loaded. The message suggests retrying.
    LoadFailed(String),
    /// The catalog grid now shows these records, in order.
    CatalogRendered(Vec<DistroId>),
    /// The compare tray now holds these ids.
    TrayUpdated(Vec<DistroId>),
    /// The comparison now shows these ids, in order.
    CompareRendered(Vec<DistroId>),
    /// Replace the page query string in place (`None` clears it).
    QueryReplaced(Option<String>),
}

/// Receives view events from a controller.
pub trait Presenter {
    fn present(&mut self, event: ViewEvent);
}

impl Presenter for Vec<ViewEvent> {
    fn present(&mut self, event: ViewEvent) {
        self.push(event);
    }
}

impl<P: Presenter + ?Sized> Presenter for &mut P {
    fn present(&mut self, event: ViewEvent) {
        (**self).present(event);
    }
}

/// Message shown when every dataset source failed.
const LOAD_FAILED_MESSAGE: &str =
    "Unable to load distribution data. Check your connection and try again.";

fn record_ids<'a, I>(records: I) -> Vec<DistroId>
where
    I: IntoIterator<Item = &'a DistroRecord>,
{
    records.into_iter().map(|record| record.id.clone()).collect()
}
