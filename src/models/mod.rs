// Record types for the dashboard collections

pub mod dashboard;
pub mod diet_plan;
pub mod event;
pub mod gym;
pub mod lenient;
pub mod user;
pub mod validation;

pub use dashboard::*;
pub use diet_plan::*;
pub use event::*;
pub use gym::*;
pub use user::*;
pub use validation::FormErrors;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::store::{Collection, Document};

/// A typed view over documents of one collection.
pub trait Record: DeserializeOwned + Serialize {
    const COLLECTION: Collection;

    fn set_id(&mut self, id: String);

    /// Decode a stored document, carrying its id over.
    fn from_document(document: &Document) -> Result<Self, serde_json::Error> {
        let mut record: Self = document.decode()?;
        record.set_id(document.id.clone());
        Ok(record)
    }
}
