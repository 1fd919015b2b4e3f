//! HTTP request building blocks

mod body;
mod key_value;
mod method;
mod outbound;

pub use body::{BodyType, FormEntryType, FormField};
pub use key_value::{KeyValue, entries_from_map};
pub use method::HttpMethod;
pub use outbound::{FormDataEntry, HttpRequestArgs};
