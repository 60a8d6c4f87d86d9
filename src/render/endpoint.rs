use maud::{html, Markup};

use super::code_block::CodeBlock;
use super::highlight::Language;
use super::RenderOptions;
use crate::models::{ApiParameter, ApiSection, Endpoint, EndpointDoc, FieldNote, StatusAvailability};

/// A catalog entry: the block itself, or for a group the header block
/// followed by every child block.
pub fn endpoint_entry(entry: &Endpoint, section: &ApiSection, options: &RenderOptions) -> Markup {
    html! {
        (endpoint_block(entry.doc(), section, options))
        @if !entry.children().is_empty() {
            div.endpoint-children {
                @for child in entry.children() {
                    (endpoint_block(child, section, options))
                }
            }
        }
    }
}

/// One endpoint, blocks in fixed order. Absent fields drop their block.
pub fn endpoint_block(doc: &EndpointDoc, section: &ApiSection, options: &RenderOptions) -> Markup {
    let color = doc.method.badge_color();
    let copy_ms = options.copy_reset_ms;

    html! {
        article.endpoint id=(doc.slug()) {
            div.endpoint-title data-block="title" {
                h2 { (doc.title) }
                span.method-badge style={ "background-color:" (color) "20;color:" (color) } {
                    (doc.method.as_str())
                }
            }
            @if !doc.description.is_empty() {
                div.endpoint-description data-block="description" {
                    @for paragraph in &doc.description {
                        p { (paragraph) }
                    }
                }
            }
            div.endpoint-path data-block="path" {
                span.path-method style={ "color:" (color) } { (doc.method.as_str()) }
                code { (doc.path) }
            }
            @if let Some(headers) = &doc.request_headers {
                section data-block="request-headers" {
                    h3 { "Request Headers" }
                    (CodeBlock::new(headers, Language::Http, copy_ms))
                }
            }
            @if !doc.path_params.is_empty() {
                section data-block="path-params" {
                    h3 { "Path Parameters" }
                    (param_table(&doc.path_params))
                }
            }
            @if !doc.query_params.is_empty() {
                section data-block="query-params" {
                    h3 { "Query Parameters" }
                    (param_table(&doc.query_params))
                }
            }
            @if doc.is_list() {
                @if let Some(availability) = &section.status_availability {
                    section data-block="status-matrix" { (status_matrix(availability)) }
                }
                @if !section.summary_fields.is_empty() {
                    section data-block="summary-fields" { (summary_fields(&section.summary_fields)) }
                }
            }
            @if let Some(body) = &doc.request_body {
                section data-block="request-body" {
                    h3 { "Request Body" }
                    (CodeBlock::new(body, Language::for_body(body), copy_ms))
                }
            }
            @if !doc.validation_rules.is_empty() {
                section data-block="validation-rules" {
                    h3 { "Validation Rules" }
                    ul.validation-rules {
                        @for rule in &doc.validation_rules {
                            li { (rule) }
                        }
                    }
                }
            }
            section data-block="response-example" {
                h3 { "Response Example" }
                (CodeBlock::new(&doc.response_example, Language::Json, copy_ms).with_line_numbers())
            }
            @if let Some(interface) = &doc.interface_definition {
                section data-block="interface-definition" {
                    h3 { "Interface Definition" }
                    (CodeBlock::new(interface, Language::TypeScript, copy_ms))
                }
            }
        }
    }
}

pub fn param_table(params: &[ApiParameter]) -> Markup {
    html! {
        table.params {
            thead {
                tr { th { "Name" } th { "Type" } th { "Required" } th { "Description" } }
            }
            tbody {
                @for param in params {
                    tr {
                        td { code { (param.name) } }
                        td { (param.param_type) }
                        td {
                            @if param.required {
                                span.badge.required { "Required" }
                            } @else {
                                span.badge.optional { "Optional" }
                            }
                        }
                        td { (param.description) }
                    }
                }
            }
        }
    }
}

fn status_matrix(availability: &StatusAvailability) -> Markup {
    html! {
        h3 { "Available Statuses" }
        p { (availability.description) }
        table.status-matrix {
            thead { tr { th { "Status" } th { "Returned" } } }
            tbody {
                @for status in &availability.statuses {
                    tr {
                        td { (status.name) }
                        td.returned data-returned=(status.returned.label()) { (status.returned.label()) }
                    }
                }
            }
        }
        p.note {
            "Note: Use the specific 'Get by ID' endpoint to retrieve transactions of any status, "
            "regardless of when they were modified."
        }
    }
}

fn summary_fields(fields: &[FieldNote]) -> Markup {
    html! {
        h3 { "Property Summary Fields" }
        p { "The following fields contain arrays of 18-character Property record IDs:" }
        table.summary-fields {
            thead { tr { th { "Field" } th { "Description" } } }
            tbody {
                @for field in fields {
                    tr {
                        td { code { (field.field) } }
                        td { (field.description) }
                    }
                }
            }
        }
    }
}
