pub mod api_docs;
pub mod site;

pub use api_docs::{
    ApiParameter, ApiSection, DocumentContext, Endpoint, EndpointDoc, FieldNote, HttpMethod,
    StatusAvailability,
};
pub use site::{ChangeLine, SiteContent, VersionEntry};
