//! Document operations shared by every transaction type.
//!
//! The six operations are authored once as templates. Each
//! [`DocumentContext`] supplies the resource path, path parameters, document
//! type enum and any extra validation rules, and [`derive_endpoints`] turns
//! the templates into concrete endpoints for that context.

use serde::{Deserialize, Serialize};

use crate::models::{ApiParameter, DocumentContext, EndpointDoc, HttpMethod};

pub const API_BASE: &str = "{amherst-api-base}";
pub const DEFAULT_OPERATION: &str = "create-document";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Create,
    UploadUrl,
    Update,
    List,
    GetById,
    AmherstDocuments,
}

impl OperationKind {
    pub const ALL: [OperationKind; 6] = [
        OperationKind::Create,
        OperationKind::UploadUrl,
        OperationKind::Update,
        OperationKind::List,
        OperationKind::GetById,
        OperationKind::AmherstDocuments,
    ];

    /// Path appended to the transaction resource.
    pub fn suffix(self) -> &'static str {
        match self {
            OperationKind::Create | OperationKind::List => "/documents",
            OperationKind::UploadUrl => "/documents/:documentId/upload-url",
            OperationKind::Update | OperationKind::GetById => "/documents/:documentId",
            OperationKind::AmherstDocuments => "/amherst-documents",
        }
    }

    pub fn targets_document(self) -> bool {
        matches!(
            self,
            OperationKind::UploadUrl | OperationKind::Update | OperationKind::GetById
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentTemplates {
    /// "How to upload a file" walkthrough; backticks mark inline code.
    pub upload_steps: Vec<String>,
    pub interface_definition: String,
    pub operations: Vec<OperationTemplate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationTemplate {
    pub kind: OperationKind,
    pub title: String,
    pub method: HttpMethod,
    pub description: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_headers: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<String>,
    /// Lead the rules with "DocType must be a valid <enum> value".
    #[serde(default)]
    pub names_document_type: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validation_rules: Vec<String>,
    pub response_example: String,
}

fn document_id_param() -> ApiParameter {
    ApiParameter {
        name: "documentId".to_string(),
        param_type: "string".to_string(),
        required: true,
        description: "Document ID (must be exactly 18 characters in length)".to_string(),
    }
}

/// Builds the concrete endpoint for one operation in one context.
pub fn derive_endpoint(
    template: &OperationTemplate,
    context: &DocumentContext,
    interface_definition: &str,
) -> EndpointDoc {
    let path = format!("{}{}{}", API_BASE, context.resource_path, template.kind.suffix());

    let mut path_params = context.path_params.clone();
    if template.kind.targets_document() {
        path_params.push(document_id_param());
    }

    let mut validation_rules = Vec::with_capacity(
        template.validation_rules.len() + context.extra_rules.len() + 1,
    );
    if template.names_document_type {
        validation_rules.push(format!(
            "DocType must be a valid {} value",
            context.document_type_enum
        ));
    }
    validation_rules.extend(template.validation_rules.iter().cloned());
    validation_rules.extend(context.extra_rules.iter().cloned());

    EndpointDoc {
        title: template.title.clone(),
        method: template.method.clone(),
        path,
        description: template.description.clone(),
        request_headers: template.request_headers.clone(),
        path_params,
        query_params: Vec::new(),
        request_body: template.request_body.clone(),
        validation_rules,
        response_example: template.response_example.clone(),
        interface_definition: Some(interface_definition.to_string()),
    }
}

/// Endpoints for `context`, in template order. Recomputed on every call.
pub fn derive_endpoints(templates: &DocumentTemplates, context: &DocumentContext) -> Vec<EndpointDoc> {
    templates
        .operations
        .iter()
        .map(|template| derive_endpoint(template, context, &templates.interface_definition))
        .collect()
}

/// Index of the endpoint shown when none is named: Create Document if
/// present, otherwise the first.
pub fn default_index(endpoints: &[EndpointDoc]) -> usize {
    endpoints
        .iter()
        .position(|endpoint| endpoint.slug() == DEFAULT_OPERATION)
        .unwrap_or(0)
}

/// Maps a persisted selection to a context index. Anything unparsable or out
/// of range selects the first context.
pub fn context_index(saved: Option<&str>, context_count: usize) -> usize {
    match saved.map(str::trim).map(str::parse::<usize>) {
        Some(Ok(index)) if index < context_count => index,
        Some(Ok(index)) => {
            tracing::debug!(index, context_count, "persisted context out of range");
            0
        }
        Some(Err(err)) => {
            tracing::debug!(%err, "ignoring unparsable persisted context");
            0
        }
        None => 0,
    }
}
