use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Everything on the site that is not an endpoint: landing page copy, base
/// URLs, notes, response codes and the changelog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteContent {
    pub site_title: String,
    pub version_badge: String,
    pub home_heading: String,
    pub home_intro: String,
    pub getting_started: Vec<String>,
    pub base_urls: BaseUrls,
    pub auth_notice: String,
    pub token_usage_notes: Vec<String>,
    pub response_codes: Vec<ResponseCode>,
    pub notes: Vec<String>,
    pub version_history: Vec<VersionEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseUrls {
    pub qa: String,
    pub prod: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseCode {
    pub code: u16,
    pub description: String,
}

impl ResponseCode {
    pub fn color(&self) -> &'static str {
        match self.code {
            200..=299 => "#10B981",
            300..=399 => "#3B82F6",
            400..=499 => "#F59E0B",
            500..=u16::MAX => "#EF4444",
            _ => "#718096",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionEntry {
    pub version: String,
    pub date: NaiveDate,
    pub author: String,
    pub environments: Environments,
    pub changes: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Environments {
    pub qa: bool,
    pub prod: bool,
}

/// How a changelog line is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeLine<'a> {
    /// "Document Management:" style group label.
    Heading(&'a str),
    /// Plain bullet, `depth` levels of indentation.
    Item { text: &'a str, depth: usize },
}

impl<'a> ChangeLine<'a> {
    pub fn parse(line: &'a str) -> Self {
        let mut text = line;
        let mut depth = 0;
        while let Some(rest) = text.strip_prefix("- ") {
            text = rest;
            depth += 1;
        }
        if depth == 0 && line.contains(':') && !line.contains('-') && !line.contains('.') {
            return ChangeLine::Heading(line);
        }
        ChangeLine::Item { text, depth }
    }
}
