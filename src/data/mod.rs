//! Data module - observations, the record store and table projection

mod observation;
mod store;
pub mod table;

pub use observation::{InputError, NewObservation, Observation, ObservationId};
pub use store::RecordStore;
pub use table::TableRow;
