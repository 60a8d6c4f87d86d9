use maud::{html, Markup, DOCTYPE};

use super::RenderOptions;
use crate::catalog::{slug, Catalog};
use crate::models::ApiSection;

/// Navigation state for one request. Computed from the route, never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavState {
    /// Request path, used to mark the current top-level entry.
    pub path: String,
    /// Section whose entry starts expanded.
    pub open_section: Option<String>,
    /// Endpoint slug marked as selected inside the open section.
    pub selected_slug: Option<String>,
}

impl NavState {
    pub fn at(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn in_section(mut self, section_id: &str, selected_slug: Option<String>) -> Self {
        self.open_section = Some(section_id.to_string());
        self.selected_slug = selected_slug;
        self
    }

    fn is_open(&self, section_id: &str) -> bool {
        self.open_section.as_deref() == Some(section_id)
    }

    fn is_selected(&self, section_id: &str, slug: &str) -> bool {
        self.is_open(section_id) && self.selected_slug.as_deref() == Some(slug)
    }
}

/// Full HTML document: header, sidebar and `content`.
pub fn page_shell(
    catalog: &Catalog,
    options: &RenderOptions,
    nav: &NavState,
    title: &str,
    content: Markup,
) -> Markup {
    let site = catalog.site();
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " | " (site.site_title) }
                link rel="stylesheet" href="/assets/site.css";
                script src="/assets/site.js" defer {}
            }
            body data-scroll-delay-ms=(options.scroll_delay_ms) {
                header.site-header {
                    button.drawer-toggle type="button" aria-label="Toggle navigation"
                        aria-controls="sidebar" aria-expanded="false" { "☰" }
                    a.brand href="/" { (site.site_title) }
                    span.version-badge { (site.version_badge) }
                }
                div.layout {
                    (sidebar(catalog, nav))
                    main.content { (content) }
                }
            }
        }
    }
}

fn sidebar(catalog: &Catalog, nav: &NavState) -> Markup {
    html! {
        nav #sidebar .sidebar {
            ul.nav-root {
                (top_link(nav, "/", "Home"))
                (top_link(nav, "/authentication", "Authentication"))
                li {
                    details.nav-group open {
                        summary { "API Endpoints" }
                        ul {
                            @for section in catalog.sections().iter().filter(|s| s.id != "authentication") {
                                li { (section_entry(catalog, section, nav)) }
                            }
                        }
                    }
                }
                (top_link(nav, "/version-history", "Version History"))
                (top_link(nav, "/notes", "Notes"))
                (top_link(nav, "/response-codes", "Response Codes"))
            }
        }
    }
}

fn top_link(nav: &NavState, href: &str, label: &str) -> Markup {
    html! {
        li.nav-item.active[nav.path == href] {
            a href=(href) { (label) }
        }
    }
}

/// Entry titles listed under a section: derived operations for context
/// sections, otherwise each endpoint with its group children beneath it.
fn section_entry(catalog: &Catalog, section: &ApiSection, nav: &NavState) -> Markup {
    let id = section.id.as_str();
    html! {
        details.nav-section data-section=(id) open[nav.is_open(id)] {
            summary { a href={ "/" (id) } { (section.title) } }
            ul {
                @if section.has_contexts() {
                    @for operation in &catalog.documents().operations {
                        (endpoint_link(nav, id, &operation.title, &slug(&operation.title)))
                    }
                } @else {
                    @for endpoint in &section.endpoints {
                        (endpoint_link(nav, id, &endpoint.doc().title, &endpoint.slug()))
                        @if !endpoint.children().is_empty() {
                            li {
                                ul.nav-children {
                                    @for child in endpoint.children() {
                                        (endpoint_link(nav, id, &child.title, &child.slug()))
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn endpoint_link(nav: &NavState, section_id: &str, title: &str, slug: &str) -> Markup {
    html! {
        li.nav-endpoint.active[nav.is_selected(section_id, slug)] {
            a href={ "/" (section_id) "/" (slug) } { (title) }
        }
    }
}
