use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::slug;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSection {
    pub id: String,
    pub title: String,
    /// One-line blurb used on the home page resource cards.
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub endpoints: Vec<Endpoint>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contexts: Vec<DocumentContext>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_availability: Option<StatusAvailability>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub summary_fields: Vec<FieldNote>,
}

impl ApiSection {
    /// Sections with document contexts take their endpoints from the
    /// context adapter instead of `endpoints`.
    pub fn has_contexts(&self) -> bool {
        !self.contexts.is_empty()
    }

    pub fn context(&self, id: &str) -> Option<(usize, &DocumentContext)> {
        self.contexts.iter().enumerate().find(|(_, c)| c.id == id)
    }
}

/// A documented operation, either standalone or a header with one level of
/// child operations beneath it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Endpoint {
    Leaf(EndpointDoc),
    Group {
        header: EndpointDoc,
        children: Vec<EndpointDoc>,
    },
}

impl Endpoint {
    /// The doc that represents this entry in lists and URLs.
    pub fn doc(&self) -> &EndpointDoc {
        match self {
            Endpoint::Leaf(doc) => doc,
            Endpoint::Group { header, .. } => header,
        }
    }

    pub fn children(&self) -> &[EndpointDoc] {
        match self {
            Endpoint::Leaf(_) => &[],
            Endpoint::Group { children, .. } => children,
        }
    }

    pub fn slug(&self) -> String {
        self.doc().slug()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointDoc {
    pub title: String,
    pub method: HttpMethod,
    pub path: String,
    pub description: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_headers: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path_params: Vec<ApiParameter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub query_params: Vec<ApiParameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validation_rules: Vec<String>,
    pub response_example: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface_definition: Option<String>,
}

impl EndpointDoc {
    pub fn slug(&self) -> String {
        slug(&self.title)
    }

    pub fn is_list(&self) -> bool {
        self.title.starts_with("List ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: String,
    pub required: bool,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Put,
    Delete,
    Other(String),
}

impl HttpMethod {
    pub fn as_str(&self) -> &str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Other(method) => method,
        }
    }

    pub fn badge_color(&self) -> &'static str {
        match self {
            HttpMethod::Get => "#10B981",
            HttpMethod::Post => "#3B82F6",
            HttpMethod::Patch => "#F59E0B",
            HttpMethod::Delete => "#EF4444",
            HttpMethod::Put => "#8B5CF6",
            HttpMethod::Other(_) => "#9E9E9E",
        }
    }
}

impl From<String> for HttpMethod {
    fn from(method: String) -> Self {
        match method.to_ascii_uppercase().as_str() {
            "GET" => HttpMethod::Get,
            "POST" => HttpMethod::Post,
            "PATCH" => HttpMethod::Patch,
            "PUT" => HttpMethod::Put,
            "DELETE" => HttpMethod::Delete,
            _ => HttpMethod::Other(method),
        }
    }
}

impl From<HttpMethod> for String {
    fn from(method: HttpMethod) -> Self {
        method.as_str().to_string()
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transaction type that parameterizes the document operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentContext {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Transaction resource the documents hang off, e.g.
    /// `/v1/title-data/financing/:financingId/property/:propertyId`.
    pub resource_path: String,
    pub path_params: Vec<ApiParameter>,
    pub document_type_enum: String,
    pub document_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_rules: Vec<String>,
}

impl DocumentContext {
    pub fn base_path(&self) -> String {
        format!("{}/documents", self.resource_path)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusAvailability {
    pub description: String,
    pub statuses: Vec<StatusRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusRow {
    pub name: String,
    pub returned: Returned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Returned {
    Always,
    #[serde(rename = "last_24_hours")]
    Last24Hours,
    Never,
}

impl Returned {
    pub fn label(self) -> &'static str {
        match self {
            Returned::Always => "Always",
            Returned::Last24Hours => "Last 24 hours only",
            Returned::Never => "Never",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldNote {
    pub field: String,
    pub description: String,
}
