mod slug;

pub use slug::{is_url_safe, slug};

use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

use crate::documents::{derive_endpoints, DocumentTemplates, OperationKind};
use crate::models::{ApiSection, EndpointDoc, SiteContent};

const SITE_SOURCE: &str = include_str!("../../content/site.json");
const DOCUMENTS_SOURCE: &str = include_str!("../../content/documents.json");
const SECTION_SOURCES: [&str; 6] = [
    include_str!("../../content/sections/cash-acquisitions.json"),
    include_str!("../../content/sections/retail-sales.json"),
    include_str!("../../content/sections/document-management.json"),
    include_str!("../../content/sections/financing-transactions.json"),
    include_str!("../../content/sections/financing-property.json"),
    include_str!("../../content/sections/authentication.json"),
];

/// Paths owned by fixed pages or assets; no section may claim them.
const RESERVED_IDS: [&str; 5] = ["version-history", "notes", "response-codes", "assets", "health"];

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse {name}: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("duplicate section id `{0}`")]
    DuplicateSection(String),
    #[error("section id `{0}` is not lower-kebab-case")]
    InvalidSectionId(String),
    #[error("context id `{id}` in section `{section}` is not lower-kebab-case")]
    InvalidContextId { section: String, id: String },
    #[error("duplicate context id `{id}` in section `{section}`")]
    DuplicateContext { section: String, id: String },
    #[error("section id `{0}` collides with a fixed route")]
    ReservedSectionId(String),
    #[error("section `{0}` must define either endpoints or document contexts, not both or neither")]
    AmbiguousSection(String),
    #[error("`{first}` and `{second}` in {scope} share the slug `{slug}`")]
    SlugCollision {
        scope: String,
        slug: String,
        first: String,
        second: String,
    },
    #[error("endpoint `{endpoint}` in {scope} has no response example")]
    MissingResponseExample { scope: String, endpoint: String },
    #[error("document templates must define each operation once (missing {missing:?}, repeated {repeated:?})")]
    OperationCoverage {
        missing: Vec<OperationKind>,
        repeated: Vec<OperationKind>,
    },
    #[error("version history must be newest first: {version} is dated after {previous}")]
    VersionOrder { version: String, previous: String },
}

/// The complete, validated documentation content. Built once at startup and
/// only ever read afterwards.
#[derive(Debug, Clone)]
pub struct Catalog {
    site: SiteContent,
    sections: Vec<ApiSection>,
    documents: DocumentTemplates,
}

fn parse<T: serde::de::DeserializeOwned>(name: &str, source: &str) -> Result<T, CatalogError> {
    serde_json::from_str(source).map_err(|source| CatalogError::Parse {
        name: name.to_string(),
        source,
    })
}

impl Catalog {
    /// The content compiled into the binary.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_sources(SITE_SOURCE, &SECTION_SOURCES, DOCUMENTS_SOURCE)
    }

    pub fn from_sources(site: &str, sections: &[&str], documents: &str) -> Result<Self, CatalogError> {
        let site = parse("site.json", site)?;
        let sections = sections
            .iter()
            .enumerate()
            .map(|(index, source)| parse(&format!("section #{index}"), source))
            .collect::<Result<Vec<ApiSection>, _>>()?;
        let documents = parse("documents.json", documents)?;
        Self::new(site, sections, documents)
    }

    pub fn new(
        site: SiteContent,
        sections: Vec<ApiSection>,
        documents: DocumentTemplates,
    ) -> Result<Self, CatalogError> {
        validate_sections(&sections)?;
        validate_documents(&documents)?;
        validate_history(&site)?;
        Ok(Self {
            site,
            sections,
            documents,
        })
    }

    pub fn site(&self) -> &SiteContent {
        &self.site
    }

    pub fn sections(&self) -> &[ApiSection] {
        &self.sections
    }

    pub fn section(&self, id: &str) -> Option<&ApiSection> {
        self.sections.iter().find(|section| section.id == id)
    }

    pub fn documents(&self) -> &DocumentTemplates {
        &self.documents
    }

    pub fn endpoint_count(&self) -> usize {
        self.sections
            .iter()
            .map(|section| {
                if section.has_contexts() {
                    section.contexts.len() * self.documents.operations.len()
                } else {
                    section
                        .endpoints
                        .iter()
                        .map(|endpoint| 1 + endpoint.children().len())
                        .sum()
                }
            })
            .sum()
    }

    /// Every client route the site answers, in navigation order.
    pub fn routes(&self) -> Vec<String> {
        let mut routes = vec!["/".to_string(), "/authentication".to_string()];
        for section in &self.sections {
            routes.push(format!("/{}", section.id));
            if section.has_contexts() {
                for operation in &self.documents.operations {
                    routes.push(format!("/{}/{}", section.id, slug(&operation.title)));
                }
                continue;
            }
            for endpoint in &section.endpoints {
                routes.push(format!("/{}/{}", section.id, endpoint.slug()));
                for child in endpoint.children() {
                    routes.push(format!("/{}/{}", section.id, child.slug()));
                }
            }
        }
        routes.extend(
            ["/version-history", "/notes", "/response-codes"]
                .into_iter()
                .map(String::from),
        );
        routes
    }

    /// The catalog with every document context expanded into its endpoints.
    /// Sections and contexts keep all of their own fields.
    pub fn expanded(&self) -> Value {
        let sections: Vec<Value> = self
            .sections
            .iter()
            .map(|section| {
                let mut value = json!(section);
                if section.has_contexts() {
                    let contexts: Vec<Value> = section
                        .contexts
                        .iter()
                        .map(|context| {
                            let mut value = json!(context);
                            value["base_path"] = json!(context.base_path());
                            value["endpoints"] = json!(derive_endpoints(&self.documents, context));
                            value
                        })
                        .collect();
                    value["contexts"] = Value::Array(contexts);
                }
                value
            })
            .collect();

        json!({
            "site": self.site,
            "sections": sections,
        })
    }
}

fn check_slugs<'a>(
    scope: &str,
    docs: impl IntoIterator<Item = &'a EndpointDoc>,
) -> Result<(), CatalogError> {
    let mut seen: HashMap<String, &str> = HashMap::new();
    for doc in docs {
        if doc.response_example.trim().is_empty() {
            return Err(CatalogError::MissingResponseExample {
                scope: scope.to_string(),
                endpoint: doc.title.clone(),
            });
        }
        let slug = doc.slug();
        if let Some(first) = seen.insert(slug.clone(), &doc.title) {
            return Err(CatalogError::SlugCollision {
                scope: scope.to_string(),
                slug,
                first: first.to_string(),
                second: doc.title.clone(),
            });
        }
    }
    Ok(())
}

fn validate_sections(sections: &[ApiSection]) -> Result<(), CatalogError> {
    let mut ids = HashSet::new();
    for section in sections {
        if !is_url_safe(&section.id) {
            return Err(CatalogError::InvalidSectionId(section.id.clone()));
        }
        if RESERVED_IDS.contains(&section.id.as_str()) {
            return Err(CatalogError::ReservedSectionId(section.id.clone()));
        }
        if !ids.insert(section.id.as_str()) {
            return Err(CatalogError::DuplicateSection(section.id.clone()));
        }
        if section.endpoints.is_empty() == section.contexts.is_empty() {
            return Err(CatalogError::AmbiguousSection(section.id.clone()));
        }

        // Context ids end up in `?context=` links and must pick one context.
        let mut context_ids = HashSet::new();
        for context in &section.contexts {
            if !is_url_safe(&context.id) {
                return Err(CatalogError::InvalidContextId {
                    section: section.id.clone(),
                    id: context.id.clone(),
                });
            }
            if !context_ids.insert(context.id.as_str()) {
                return Err(CatalogError::DuplicateContext {
                    section: section.id.clone(),
                    id: context.id.clone(),
                });
            }
        }

        // Children resolve through the same URL segment as top-level entries,
        // so they share one slug namespace per section.
        let docs = section
            .endpoints
            .iter()
            .flat_map(|endpoint| std::iter::once(endpoint.doc()).chain(endpoint.children()));
        check_slugs(&format!("section `{}`", section.id), docs)?;
    }
    Ok(())
}

fn validate_documents(documents: &DocumentTemplates) -> Result<(), CatalogError> {
    let mut counts: HashMap<OperationKind, usize> = HashMap::new();
    for operation in &documents.operations {
        *counts.entry(operation.kind).or_default() += 1;
    }
    let missing: Vec<_> = OperationKind::ALL
        .into_iter()
        .filter(|kind| !counts.contains_key(kind))
        .collect();
    let repeated: Vec<_> = OperationKind::ALL
        .into_iter()
        .filter(|kind| counts.get(kind).is_some_and(|count| *count > 1))
        .collect();
    if !missing.is_empty() || !repeated.is_empty() {
        return Err(CatalogError::OperationCoverage { missing, repeated });
    }

    let mut seen: HashMap<String, &str> = HashMap::new();
    for operation in &documents.operations {
        if operation.response_example.trim().is_empty() {
            return Err(CatalogError::MissingResponseExample {
                scope: "document templates".to_string(),
                endpoint: operation.title.clone(),
            });
        }
        let slug = slug(&operation.title);
        if let Some(first) = seen.insert(slug.clone(), &operation.title) {
            return Err(CatalogError::SlugCollision {
                scope: "document templates".to_string(),
                slug,
                first: first.to_string(),
                second: operation.title.clone(),
            });
        }
    }
    Ok(())
}

fn validate_history(site: &SiteContent) -> Result<(), CatalogError> {
    for pair in site.version_history.windows(2) {
        let (previous, entry) = (&pair[0], &pair[1]);
        if entry.date > previous.date {
            return Err(CatalogError::VersionOrder {
                version: entry.version.clone(),
                previous: previous.version.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const GROUPED_SECTION: &str = r#"{
        "id": "portfolio",
        "title": "Portfolio",
        "summary": "Portfolio transactions.",
        "endpoints": [
            {
                "kind": "leaf",
                "title": "List Portfolio Properties",
                "method": "GET",
                "path": "{amherst-api-base}/v1/title-data/portfolio",
                "description": ["Lists portfolio properties"],
                "response_example": "{\"data\": []}"
            },
            {
                "kind": "group",
                "header": {
                    "title": "Portfolio Documents",
                    "method": "GET",
                    "path": "{amherst-api-base}/v1/title-data/portfolio/:id/documents",
                    "description": ["Documents attached to a portfolio property"],
                    "response_example": "{\"data\": []}"
                },
                "children": [
                    {
                        "title": "Create Portfolio Document",
                        "method": "POST",
                        "path": "{amherst-api-base}/v1/title-data/portfolio/:id/documents",
                        "description": ["Creates a document"],
                        "response_example": "{\"Id\": \"d15VH00000AbcdefGHI\"}"
                    },
                    {
                        "title": "Delete Portfolio Document",
                        "method": "DELETE",
                        "path": "{amherst-api-base}/v1/title-data/portfolio/:id/documents/:documentId",
                        "description": ["Deletes a document"],
                        "response_example": "{}"
                    }
                ]
            }
        ]
    }"#;

    /// Embedded content plus a section exercising grouped endpoints.
    pub(crate) fn catalog_with_group() -> Catalog {
        let mut sources = SECTION_SOURCES.to_vec();
        sources.push(GROUPED_SECTION);
        Catalog::from_sources(SITE_SOURCE, &sources, DOCUMENTS_SOURCE).unwrap()
    }

    fn with_extra_section(section: &str) -> Result<Catalog, CatalogError> {
        let mut sources = SECTION_SOURCES.to_vec();
        sources.push(section);
        Catalog::from_sources(SITE_SOURCE, &sources, DOCUMENTS_SOURCE)
    }

    #[test]
    fn embedded_catalog_loads() {
        let catalog = Catalog::embedded().unwrap();
        let ids: Vec<_> = catalog.sections().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(
            ids,
            [
                "cash-acquisitions",
                "retail-sales",
                "document-management",
                "financing-transactions",
                "financing-property",
                "authentication"
            ]
        );
        assert_eq!(catalog.documents().operations.len(), 6);
        assert_eq!(catalog.section("document-management").unwrap().contexts.len(), 4);
        // 10 fixed endpoints plus six operations in each of four contexts.
        assert_eq!(catalog.endpoint_count(), 10 + 24);
    }

    #[test]
    fn sibling_slugs_are_unique_across_catalog() {
        let catalog = catalog_with_group();
        for section in catalog.sections() {
            let mut seen = HashSet::new();
            for endpoint in &section.endpoints {
                assert!(seen.insert(endpoint.slug()), "{}: {}", section.id, endpoint.slug());
                for child in endpoint.children() {
                    assert!(seen.insert(child.slug()), "{}: {}", section.id, child.slug());
                }
            }
        }
        let operations: HashSet<_> = catalog
            .documents()
            .operations
            .iter()
            .map(|operation| slug(&operation.title))
            .collect();
        assert_eq!(operations.len(), 6);
    }

    #[test]
    fn colliding_titles_fail_fast() {
        let section = r#"{
            "id": "duplicates",
            "title": "Duplicates",
            "summary": "",
            "endpoints": [
                {"kind": "leaf", "title": "Get Thing", "method": "GET", "path": "/a", "description": [], "response_example": "{}"},
                {"kind": "leaf", "title": "get  thing", "method": "GET", "path": "/b", "description": [], "response_example": "{}"}
            ]
        }"#;

        match with_extra_section(section) {
            Err(CatalogError::SlugCollision { slug, first, second, .. }) => {
                assert_eq!(slug, "get-thing");
                assert_eq!(first, "Get Thing");
                assert_eq!(second, "get  thing");
            }
            other => panic!("expected slug collision, got {other:?}"),
        }
    }

    #[test]
    fn child_colliding_with_top_level_fails() {
        let section = r#"{
            "id": "shadowed",
            "title": "Shadowed",
            "summary": "",
            "endpoints": [
                {"kind": "leaf", "title": "Create Note", "method": "POST", "path": "/a", "description": [], "response_example": "{}"},
                {"kind": "group",
                 "header": {"title": "Notes", "method": "GET", "path": "/n", "description": [], "response_example": "{}"},
                 "children": [
                    {"title": "Create Note", "method": "POST", "path": "/n", "description": [], "response_example": "{}"}
                 ]}
            ]
        }"#;

        assert!(matches!(
            with_extra_section(section),
            Err(CatalogError::SlugCollision { .. })
        ));
    }

    #[test]
    fn sections_need_exactly_one_content_kind() {
        let section = r#"{"id": "empty", "title": "Empty", "summary": ""}"#;
        assert!(matches!(
            with_extra_section(section),
            Err(CatalogError::AmbiguousSection(id)) if id == "empty"
        ));
    }

    #[test]
    fn rejects_bad_and_reserved_ids() {
        let bad = r#"{"id": "Bad Id", "title": "", "summary": "", "endpoints": [
            {"kind": "leaf", "title": "A", "method": "GET", "path": "/", "description": [], "response_example": "{}"}]}"#;
        assert!(matches!(with_extra_section(bad), Err(CatalogError::InvalidSectionId(_))));

        let reserved = bad.replace("Bad Id", "notes");
        assert!(matches!(
            with_extra_section(&reserved),
            Err(CatalogError::ReservedSectionId(_))
        ));

        let duplicate = bad.replace("Bad Id", "retail-sales");
        assert!(matches!(
            with_extra_section(&duplicate),
            Err(CatalogError::DuplicateSection(_))
        ));
    }

    #[test]
    fn context_ids_must_be_url_safe_and_unique() {
        let section = r#"{"id": "contexts", "title": "Contexts", "summary": "", "contexts": [
            {"id": "first", "title": "First", "description": "", "resource_path": "/first",
             "path_params": [], "document_type_enum": "FirstType", "document_types": ["Other"]},
            {"id": "SECOND", "title": "Second", "description": "", "resource_path": "/second",
             "path_params": [], "document_type_enum": "SecondType", "document_types": ["Other"]}]}"#;
        assert!(with_extra_section(&section.replace("SECOND", "second")).is_ok());

        assert!(matches!(
            with_extra_section(&section.replace("SECOND", "second one")),
            Err(CatalogError::InvalidContextId { id, .. }) if id == "second one"
        ));
        assert!(matches!(
            with_extra_section(&section.replace("SECOND", "first")),
            Err(CatalogError::DuplicateContext { section, id }) if section == "contexts" && id == "first"
        ));
    }

    #[test]
    fn empty_response_example_is_rejected() {
        let section = r#"{"id": "blank", "title": "", "summary": "", "endpoints": [
            {"kind": "leaf", "title": "A", "method": "GET", "path": "/", "description": [], "response_example": "  "}]}"#;
        assert!(matches!(
            with_extra_section(section),
            Err(CatalogError::MissingResponseExample { .. })
        ));
    }

    #[test]
    fn parse_errors_name_the_source() {
        let err = Catalog::from_sources("{", &SECTION_SOURCES, DOCUMENTS_SOURCE).unwrap_err();
        assert!(err.to_string().starts_with("failed to parse site.json"));
    }

    #[test]
    fn version_history_is_newest_first() {
        let catalog = Catalog::embedded().unwrap();
        let history = &catalog.site().version_history;
        assert_eq!(history[0].version, "v1.5.1");
        assert_eq!(history.last().unwrap().version, "v1.0.0");

        let mut site = catalog.site().clone();
        site.version_history.reverse();
        let err = Catalog::new(
            site,
            catalog.sections().to_vec(),
            catalog.documents().clone(),
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::VersionOrder { .. }));
    }

    #[test]
    fn missing_operation_template_is_rejected() {
        let catalog = Catalog::embedded().unwrap();
        let mut documents = catalog.documents().clone();
        documents.operations.retain(|op| op.kind != OperationKind::List);

        match Catalog::new(catalog.site().clone(), catalog.sections().to_vec(), documents) {
            Err(CatalogError::OperationCoverage { missing, repeated }) => {
                assert_eq!(missing, [OperationKind::List]);
                assert!(repeated.is_empty());
            }
            other => panic!("expected coverage error, got {other:?}"),
        }
    }

    #[test]
    fn routes_cover_every_endpoint() {
        let catalog = Catalog::embedded().unwrap();
        let routes = catalog.routes();
        assert_eq!(routes[0], "/");
        assert!(routes.contains(&"/cash-acquisitions/list-cash-acquisitions".to_string()));
        assert!(routes.contains(&"/document-management/get-amherst-documents".to_string()));
        assert!(routes.contains(&"/authentication/obtaining-an-access-token".to_string()));
        assert_eq!(routes.last().map(String::as_str), Some("/response-codes"));
    }

    #[test]
    fn expanded_catalog_lists_context_endpoints() {
        let catalog = Catalog::embedded().unwrap();
        let expanded = catalog.expanded();
        let documents = expanded["sections"]
            .as_array()
            .unwrap()
            .iter()
            .find(|s| s["id"] == "document-management")
            .unwrap();
        let contexts = documents["contexts"].as_array().unwrap();
        assert_eq!(contexts.len(), 4);
        assert_eq!(
            contexts[3]["base_path"],
            "/v1/title-data/financing/:financingId/property/:propertyId/documents"
        );
        assert_eq!(contexts[3]["endpoints"].as_array().unwrap().len(), 6);
        assert_eq!(
            contexts[3]["resource_path"],
            "/v1/title-data/financing/:financingId/property/:propertyId"
        );
        assert_eq!(contexts[3]["path_params"].as_array().unwrap().len(), 2);
        assert!(!contexts[3]["extra_rules"].as_array().unwrap().is_empty());
        assert!(documents["summary"].is_string());

        let cash = expanded["sections"]
            .as_array()
            .unwrap()
            .iter()
            .find(|s| s["id"] == "cash-acquisitions")
            .unwrap();
        assert!(cash["summary"].is_string());
        assert!(cash["status_availability"]["statuses"].is_array());

        let financing = expanded["sections"]
            .as_array()
            .unwrap()
            .iter()
            .find(|s| s["id"] == "financing-transactions")
            .unwrap();
        assert!(!financing["summary_fields"].as_array().unwrap().is_empty());
        assert_eq!(expanded["site"]["base_urls"]["qa"], "https://qa.amhev.com/api");
    }
}
