/// A client route, parsed from the request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Authentication,
    VersionHistory,
    Notes,
    ResponseCodes,
    Section {
        section_id: String,
        slug: Option<String>,
    },
}

impl Route {
    /// Parses `/`, the fixed pages, `/{section}` and `/{section}/{slug}`.
    /// Anything deeper is not a route.
    pub fn parse(path: &str) -> Option<Route> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let route = match segments.as_slice() {
            [] => Route::Home,
            ["authentication"] => Route::Authentication,
            ["version-history"] => Route::VersionHistory,
            ["notes"] => Route::Notes,
            ["response-codes"] => Route::ResponseCodes,
            [section] => Route::Section {
                section_id: section.to_string(),
                slug: None,
            },
            [section, slug] => Route::Section {
                section_id: section.to_string(),
                slug: Some(slug.to_string()),
            },
            _ => return None,
        };
        Some(route)
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Authentication => "/authentication".to_string(),
            Route::VersionHistory => "/version-history".to_string(),
            Route::Notes => "/notes".to_string(),
            Route::ResponseCodes => "/response-codes".to_string(),
            Route::Section {
                section_id,
                slug: None,
            } => format!("/{section_id}"),
            Route::Section {
                section_id,
                slug: Some(slug),
            } => format!("/{section_id}/{slug}"),
        }
    }

    pub fn section_id(&self) -> Option<&str> {
        match self {
            Route::Section { section_id, .. } => Some(section_id),
            _ => None,
        }
    }
}
