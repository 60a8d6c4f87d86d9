mod route;

pub use route::Route;

use crate::catalog::Catalog;
use crate::documents::{default_index, derive_endpoints};
use crate::models::{ApiSection, DocumentContext, Endpoint, EndpointDoc};

/// What a section route points at.
#[derive(Debug, Clone, Copy)]
pub enum Target<'a> {
    /// A top-level entry; groups render with all their children.
    Entry(&'a Endpoint),
    /// One child of a group, addressed by its own slug.
    Child {
        parent: &'a EndpointDoc,
        child: &'a EndpointDoc,
    },
}

impl<'a> Target<'a> {
    pub fn doc(&self) -> &'a EndpointDoc {
        match *self {
            Target::Entry(endpoint) => endpoint.doc(),
            Target::Child { child, .. } => child,
        }
    }
}

#[derive(Debug)]
pub enum Resolution<'a> {
    Endpoint {
        section: &'a ApiSection,
        target: Target<'a>,
    },
    /// A context-bearing section, with the endpoints derived for the
    /// selected context.
    Documents {
        section: &'a ApiSection,
        context_index: usize,
        context: &'a DocumentContext,
        endpoints: Vec<EndpointDoc>,
        selected: usize,
    },
    SectionNotFound {
        section_id: String,
    },
    EndpointNotFound {
        section: &'a ApiSection,
        slug: String,
    },
}

impl<'a> Resolution<'a> {
    pub fn section(&self) -> Option<&'a ApiSection> {
        match self {
            Resolution::Endpoint { section, .. }
            | Resolution::Documents { section, .. }
            | Resolution::EndpointNotFound { section, .. } => Some(*section),
            Resolution::SectionNotFound { .. } => None,
        }
    }

    /// Slug of the endpoint being displayed, if any.
    pub fn selected_slug(&self) -> Option<String> {
        match self {
            Resolution::Endpoint { target, .. } => Some(target.doc().slug()),
            Resolution::Documents {
                endpoints,
                selected,
                ..
            } => endpoints.get(*selected).map(EndpointDoc::slug),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(
            self,
            Resolution::Endpoint { .. } | Resolution::Documents { .. }
        )
    }
}

/// Looks up a section and endpoint. Never fails: unknown ids come back as
/// the not-found variants.
///
/// `context_index` picks the document context for context-bearing sections
/// and must already be clamped to the section's contexts.
pub fn resolve<'a>(
    catalog: &'a Catalog,
    section_id: &str,
    slug: Option<&str>,
    context_index: usize,
) -> Resolution<'a> {
    let Some(section) = catalog.section(section_id) else {
        return Resolution::SectionNotFound {
            section_id: section_id.to_string(),
        };
    };

    if section.has_contexts() {
        return resolve_documents(catalog, section, slug, context_index);
    }

    let Some(slug) = slug else {
        return match section.endpoints.first() {
            Some(first) => Resolution::Endpoint {
                section,
                target: Target::Entry(first),
            },
            None => Resolution::EndpointNotFound {
                section,
                slug: String::new(),
            },
        };
    };

    match find_target(&section.endpoints, slug) {
        Some(target) => Resolution::Endpoint { section, target },
        None => Resolution::EndpointNotFound {
            section,
            slug: slug.to_string(),
        },
    }
}

fn find_target<'a>(endpoints: &'a [Endpoint], slug: &str) -> Option<Target<'a>> {
    if let Some(entry) = endpoints.iter().find(|endpoint| endpoint.slug() == slug) {
        return Some(Target::Entry(entry));
    }
    endpoints.iter().find_map(|endpoint| {
        endpoint
            .children()
            .iter()
            .find(|child| child.slug() == slug)
            .map(|child| Target::Child {
                parent: endpoint.doc(),
                child,
            })
    })
}

fn resolve_documents<'a>(
    catalog: &'a Catalog,
    section: &'a ApiSection,
    slug: Option<&str>,
    context_index: usize,
) -> Resolution<'a> {
    let context_index = if context_index < section.contexts.len() {
        context_index
    } else {
        0
    };
    let context = &section.contexts[context_index];
    let endpoints = derive_endpoints(catalog.documents(), context);

    let selected = match slug {
        None => default_index(&endpoints),
        Some(slug) => match endpoints.iter().position(|endpoint| endpoint.slug() == slug) {
            Some(index) => index,
            None => {
                return Resolution::EndpointNotFound {
                    section,
                    slug: slug.to_string(),
                };
            }
        },
    };

    Resolution::Documents {
        section,
        context_index,
        context,
        endpoints,
        selected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::catalog_with_group;

    fn catalog() -> Catalog {
        Catalog::embedded().unwrap()
    }

    #[test]
    fn no_slug_selects_first_endpoint() {
        let catalog = catalog();
        for section in catalog.sections() {
            let resolution = resolve(&catalog, &section.id, None, 0);
            match resolution {
                Resolution::Endpoint { target, .. } => {
                    assert_eq!(target.doc().title, section.endpoints[0].doc().title);
                }
                Resolution::Documents {
                    endpoints,
                    selected,
                    ..
                } => {
                    assert_eq!(endpoints[selected].title, "Create Document");
                }
                other => panic!("{} did not resolve: {other:?}", section.id),
            }
        }
    }

    #[test]
    fn every_context_defaults_to_create_document() {
        let catalog = catalog();
        for index in 0..4 {
            let resolution = resolve(&catalog, "document-management", None, index);
            assert_eq!(resolution.selected_slug().as_deref(), Some("create-document"));
        }
    }

    #[test]
    fn resolves_by_slug() {
        let catalog = catalog();
        match resolve(&catalog, "cash-acquisitions", Some("list-cash-acquisitions"), 0) {
            Resolution::Endpoint { section, target } => {
                assert_eq!(section.id, "cash-acquisitions");
                let doc = target.doc();
                assert_eq!(doc.title, "List Cash Acquisitions");
                assert_eq!(doc.method.as_str(), "GET");
                assert!(doc.response_example.contains("\"pagination\""));
                assert!(doc.response_example.contains("\"currentPage\": 1"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn unknown_ids_are_not_found_states() {
        let catalog = catalog();
        assert!(matches!(
            resolve(&catalog, "bulk-portfolio", None, 0),
            Resolution::SectionNotFound { section_id } if section_id == "bulk-portfolio"
        ));
        assert!(matches!(
            resolve(&catalog, "retail-sales", Some("delete-retail-sale"), 0),
            Resolution::EndpointNotFound { slug, .. } if slug == "delete-retail-sale"
        ));
        assert!(matches!(
            resolve(&catalog, "document-management", Some("delete-document"), 2),
            Resolution::EndpointNotFound { .. }
        ));
    }

    #[test]
    fn financing_property_create_document() {
        let catalog = catalog();
        let section = catalog.section("document-management").unwrap();
        let (index, _) = section.context("financing-property").unwrap();

        match resolve(&catalog, "document-management", Some("create-document"), index) {
            Resolution::Documents {
                context,
                endpoints,
                selected,
                ..
            } => {
                assert_eq!(context.id, "financing-property");
                let create = &endpoints[selected];
                assert!(create.path.contains(":financingId"));
                assert!(create.path.contains(":propertyId"));
                assert!(
                    create
                        .validation_rules
                        .iter()
                        .any(|rule| rule == "Property must belong to the specified financing transaction")
                );
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn out_of_range_context_uses_first() {
        let catalog = catalog();
        match resolve(&catalog, "document-management", None, 99) {
            Resolution::Documents {
                context_index,
                context,
                ..
            } => {
                assert_eq!(context_index, 0);
                assert_eq!(context.id, "cash-acquisitions");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn searches_one_level_of_nesting() {
        let catalog = catalog_with_group();

        match resolve(&catalog, "portfolio", Some("delete-portfolio-document"), 0) {
            Resolution::Endpoint {
                target: Target::Child { parent, child },
                ..
            } => {
                assert_eq!(parent.title, "Portfolio Documents");
                assert_eq!(child.title, "Delete Portfolio Document");
            }
            other => panic!("unexpected {other:?}"),
        }

        match resolve(&catalog, "portfolio", Some("portfolio-documents"), 0) {
            Resolution::Endpoint {
                target: Target::Entry(entry),
                ..
            } => assert_eq!(entry.children().len(), 2),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn resolution_is_idempotent() {
        let catalog = catalog();
        let first = resolve(&catalog, "document-management", Some("list-documents"), 1);
        let second = resolve(&catalog, "document-management", Some("list-documents"), 1);
        assert_eq!(first.selected_slug(), second.selected_slug());
        match (first, second) {
            (
                Resolution::Documents { endpoints: a, .. },
                Resolution::Documents { endpoints: b, .. },
            ) => assert_eq!(a, b),
            other => panic!("unexpected {other:?}"),
        }
    }
}
