use maud::{html, Markup};

use super::code_block::CodeBlock;
use super::endpoint::{endpoint_block, endpoint_entry};
use super::highlight::Language;
use super::layout::{page_shell, NavState};
use super::{inline_code, RenderOptions, RenderedPage};
use crate::catalog::Catalog;
use crate::models::{ApiSection, ChangeLine, DocumentContext, EndpointDoc, VersionEntry};
use crate::resolver::{resolve, Resolution, Route, Target};

const AUTHENTICATION: &str = "authentication";

/// Renders the page for `route`. `context_index` selects the document
/// context on context-bearing sections and is ignored elsewhere.
pub fn render_route(
    catalog: &Catalog,
    route: &Route,
    context_index: usize,
    options: &RenderOptions,
) -> RenderedPage {
    let path = route.path();
    let (title, nav, content, found) = match route {
        Route::Home => ("Home".to_string(), NavState::at(path), home(catalog), true),
        Route::Authentication => (
            "Authentication".to_string(),
            NavState::at(path),
            authentication(catalog, options),
            true,
        ),
        Route::VersionHistory => (
            "Version History".to_string(),
            NavState::at(path),
            version_history(&catalog.site().version_history),
            true,
        ),
        Route::Notes => ("Notes".to_string(), NavState::at(path), notes(catalog), true),
        Route::ResponseCodes => (
            "Response Codes".to_string(),
            NavState::at(path),
            response_codes(catalog),
            true,
        ),
        Route::Section { section_id, slug } => {
            let resolution = resolve(catalog, section_id, slug.as_deref(), context_index);
            let nav = match resolution.section() {
                Some(section) => NavState::at(path).in_section(&section.id, resolution.selected_slug()),
                None => NavState::at(path),
            };
            let (title, content) = resolved(catalog, &resolution, options);
            (title, nav, content, resolution.is_found())
        }
    };

    RenderedPage {
        markup: page_shell(catalog, options, &nav, &title, content),
        found,
    }
}

fn resolved(catalog: &Catalog, resolution: &Resolution<'_>, options: &RenderOptions) -> (String, Markup) {
    match resolution {
        Resolution::Endpoint { section, target } => {
            let body = match *target {
                Target::Entry(entry) => endpoint_entry(entry, section, options),
                Target::Child { parent, child } => html! {
                    p.endpoint-parent {
                        a href=(format!("/{}/{}", section.id, parent.slug())) { (parent.title) }
                    }
                    (endpoint_block(child, section, options))
                },
            };
            let content = html! {
                (section_header(section))
                (body)
            };
            (format!("{} - {}", target.doc().title, section.title), content)
        }
        Resolution::Documents {
            section,
            context_index,
            context,
            endpoints,
            selected,
        } => {
            let content = documents_page(
                section,
                &catalog.documents().upload_steps,
                *context_index,
                context,
                endpoints,
                *selected,
                options,
            );
            let title = match endpoints.get(*selected) {
                Some(endpoint) => format!("{} - {}", endpoint.title, section.title),
                None => section.title.clone(),
            };
            (title, content)
        }
        Resolution::SectionNotFound { section_id } => (
            "Section not found".to_string(),
            not_found("Section not found", &format!("No API section named \"{section_id}\" exists.")),
        ),
        Resolution::EndpointNotFound { section, slug } => (
            "Endpoint not found".to_string(),
            html! {
                (section_header(section))
                (not_found(
                    "Endpoint not found",
                    &format!("\"{}\" has no endpoint named \"{}\".", section.title, slug),
                ))
            },
        ),
    }
}

fn section_header(section: &ApiSection) -> Markup {
    html! {
        div.section-header {
            h1 { (section.title) }
            @if let Some(description) = &section.description {
                p.section-description { (description) }
            }
        }
    }
}

fn not_found(heading: &str, message: &str) -> Markup {
    html! {
        div.not-found role="alert" {
            h2 { (heading) }
            p { (message) }
            a href="/" { "Back to Home" }
        }
    }
}

fn base_urls(catalog: &Catalog) -> Markup {
    let urls = &catalog.site().base_urls;
    html! {
        section.base-urls {
            h2 { "Base URLs" }
            dl {
                dt { "QA" } dd { code { (urls.qa) } }
                dt { "PROD" } dd { code { (urls.prod) } }
            }
        }
    }
}

fn home(catalog: &Catalog) -> Markup {
    let site = catalog.site();
    html! {
        div.home {
            h1 { (site.home_heading) }
            p.intro { (site.home_intro) }
            section.getting-started {
                h2 { "Getting Started" }
                ol {
                    @for step in &site.getting_started {
                        li { (step) }
                    }
                }
            }
            (base_urls(catalog))
            section.resources {
                h2 { "API Resources" }
                div.cards {
                    @for section in catalog.sections() {
                        a.card href={ "/" (section.id) } {
                            h3 { (section.title) }
                            p { (section.summary) }
                        }
                    }
                }
            }
        }
    }
}

fn authentication(catalog: &Catalog, options: &RenderOptions) -> Markup {
    let site = catalog.site();
    let section = catalog.section(AUTHENTICATION);
    html! {
        div.authentication {
            h1 { "Authentication" }
            @if let Some(description) = section.and_then(|s| s.description.as_ref()) {
                p.section-description { (description) }
            }
            div.notice role="note" { (site.auth_notice) }
            (base_urls(catalog))
            @if let Some(section) = section {
                @for entry in &section.endpoints {
                    (endpoint_entry(entry, section, options))
                }
            }
            section.token-usage {
                h2 { "Using the Token" }
                p { "Include the token in all API requests:" }
                (CodeBlock::new("Authorization: Bearer {access_token}", Language::Http, options.copy_reset_ms))
                h3 { "Important Notes" }
                ul {
                    @for note in &site.token_usage_notes {
                        li { (inline_code(note)) }
                    }
                }
            }
        }
    }
}

fn notes(catalog: &Catalog) -> Markup {
    html! {
        div.notes {
            h1 { "Notes" }
            ul {
                @for note in &catalog.site().notes {
                    li { (note) }
                }
            }
        }
    }
}

fn response_codes(catalog: &Catalog) -> Markup {
    html! {
        div.response-codes {
            h1 { "Response Codes" }
            table {
                thead { tr { th { "Code" } th { "Description" } } }
                tbody {
                    @for code in &catalog.site().response_codes {
                        tr {
                            td {
                                span.status-badge style={ "background-color:" (code.color()) } { (code.code) }
                            }
                            td { (code.description) }
                        }
                    }
                }
            }
        }
    }
}

fn version_history(history: &[VersionEntry]) -> Markup {
    html! {
        div.version-history {
            h1 { "Version History" }
            @for entry in history {
                article.version-entry id=(entry.version) {
                    div.version-title {
                        h2 { (entry.version) }
                        span.date-chip { (entry.date.format("%Y-%m-%d").to_string()) }
                    }
                    p.author { "Author: " (entry.author) }
                    div.environments {
                        span.env.on[entry.environments.qa] { "QA" }
                        span.env.on[entry.environments.prod] { "PROD" }
                    }
                    ul.changes {
                        @for change in &entry.changes {
                            @match ChangeLine::parse(change) {
                                ChangeLine::Heading(text) => {
                                    li.change-heading { (text) }
                                }
                                ChangeLine::Item { text, depth } => {
                                    li class={ "change depth-" (depth) } { (text) }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn documents_page(
    section: &ApiSection,
    upload_steps: &[String],
    context_index: usize,
    context: &DocumentContext,
    endpoints: &[EndpointDoc],
    selected: usize,
    options: &RenderOptions,
) -> Markup {
    // Tabs keep the selected operation when switching context.
    let operation_path = match endpoints.get(selected) {
        Some(endpoint) => format!("/{}/{}", section.id, endpoint.slug()),
        None => format!("/{}", section.id),
    };
    html! {
        (section_header(section))
        section.upload-steps {
            h2 { "How to upload a file" }
            ol {
                @for step in upload_steps {
                    li { (inline_code(step)) }
                }
            }
        }
        div.context-tabs role="tablist" {
            @for (index, tab) in section.contexts.iter().enumerate() {
                a.context-tab.selected[index == context_index] role="tab"
                    aria-selected=(if index == context_index { "true" } else { "false" })
                    href={ (operation_path) "?context=" (tab.id) } { (tab.title) }
            }
        }
        section.context-summary data-context=(context.id) {
            p { (context.description) }
            p.base-path { "Base path: " code { (context.base_path()) } }
            h3 { "Available Document Types (" (context.document_types.len()) ")" }
            p { "Valid values of " code { (context.document_type_enum) } ":" }
            ul.document-types {
                @for document_type in &context.document_types {
                    li { code { (document_type) } }
                }
            }
        }
        @if let Some(endpoint) = endpoints.get(selected) {
            (endpoint_block(endpoint, section, options))
        }
    }
}
