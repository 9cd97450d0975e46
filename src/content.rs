//! Content loader for the news and events data files.
//!
//! Each source is fetched once, parsed as JSON, and the first collection found
//! is rendered into its container. Failures render a localized placeholder in
//! that container only; there are no automatic retries.

use crate::config::Config;
use crate::dom::Document;
use crate::error::{Result, SiteError};
use crate::events::{EventBus, SiteEvent};
use crate::i18n::{Language, LanguageStrings, LocalizationMetrics};
use chrono::{DateTime, Datelike, NaiveDate};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const NEWS_CONTAINER_ID: &str = "news-container";
pub const EVENTS_CONTAINER_ID: &str = "events-container";

/// How entries of a source are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    News,
    Events,
}

/// A news record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub description: String,
}

/// An event record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
}

/// A data resource and the container it fills.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentSource {
    pub url: String,
    pub container_id: String,
    pub template: Template,
}

impl ContentSource {
    pub fn new(url: impl Into<String>, container_id: impl Into<String>, template: Template) -> Self {
        Self {
            url: url.into(),
            container_id: container_id.into(),
            template,
        }
    }
}

/// Find the first collection in a parsed document.
///
/// A top-level array is returned as is. For an object, top-level array
/// fields are preferred in document order before nested objects are searched.
pub fn extract_collection(value: &Value) -> Option<&Vec<Value>> {
    match value {
        Value::Array(items) => Some(items),
        Value::Object(map) => map
            .values()
            .find_map(|field| field.as_array())
            .or_else(|| map.values().find_map(extract_collection)),
        _ => None,
    }
}

/// GET a data file and return its first collection.
pub async fn fetch_collection(client: &reqwest::Client, url: &str) -> Result<Vec<Value>> {
    debug!("Fetching {}", url);
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(SiteError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.text().await?;
    let parsed: Value = serde_json::from_str(&body)?;
    extract_collection(&parsed)
        .cloned()
        .ok_or_else(|| SiteError::MissingCollection(url.to_string()))
}

/// Escape text for inclusion in rendered markup.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render an ISO 8601 date in the long form of a language.
///
/// Accepts a plain date or a full timestamp; anything else is returned as-is.
pub fn format_date(raw: &str, language: Language) -> String {
    let trimmed = raw.trim();
    let parsed = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|dt| dt.date_naive())
        });

    let Some(date) = parsed else {
        return trimmed.to_string();
    };

    let strings = LanguageStrings::for_language(language);
    let formatted = strings
        .date_format
        .replace("{day}", &date.day().to_string())
        .replace("{month}", strings.months[date.month0() as usize])
        .replace("{year}", &date.year().to_string());
    strings.localize_digits(&formatted)
}

fn render_news(item: &NewsItem, language: Language) -> String {
    format!(
        "<article class=\"news-card\"><time class=\"news-date\">{}</time><h3>{}</h3><p>{}</p></article>",
        escape_html(&format_date(&item.date, language)),
        escape_html(&item.title),
        escape_html(&item.description),
    )
}

fn render_event(item: &EventItem, language: Language) -> String {
    let strings = LanguageStrings::for_language(language);
    format!(
        "<article class=\"event-card\"><time class=\"event-date\">{}</time><h3>{}</h3><p class=\"event-location\">{}: {}</p><p>{}</p></article>",
        escape_html(&format_date(&item.date, language)),
        escape_html(&item.title),
        strings.location_label,
        escape_html(&item.location),
        escape_html(&item.description),
    )
}

/// Render entries through a template. Non-object entries are skipped.
pub fn render_entries(template: Template, entries: &[Value], language: Language) -> String {
    if entries.is_empty() {
        return format!(
            "<p class=\"content-empty\">{}</p>",
            LanguageStrings::for_language(language).content_empty
        );
    }

    entries
        .iter()
        .filter_map(|entry| {
            let rendered = match template {
                Template::News => serde_json::from_value::<NewsItem>(entry.clone())
                    .map(|item| render_news(&item, language)),
                Template::Events => serde_json::from_value::<EventItem>(entry.clone())
                    .map(|item| render_event(&item, language)),
            };
            match rendered {
                Ok(html) => Some(html),
                Err(e) => {
                    warn!("Skipping malformed entry: {}", e);
                    None
                }
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Markup shown in place of entries when a source fails.
pub fn render_error(language: Language) -> String {
    format!(
        "<p class=\"content-error\">{}</p>",
        LanguageStrings::for_language(language).content_error
    )
}

/// Outcome of the last load of one container.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadedContent {
    Entries {
        template: Template,
        entries: Vec<Value>,
    },
    Failed,
}

/// Fetches every source and keeps the results for re-rendering.
pub struct ContentLoader {
    client: reqwest::Client,
    sources: Vec<ContentSource>,
    loaded: BTreeMap<String, LoadedContent>,
}

impl ContentLoader {
    pub fn new(sources: Vec<ContentSource>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            sources,
            loaded: BTreeMap::new(),
        })
    }

    /// The site's two sources: news and events.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            vec![
                ContentSource::new(config.news_url(), NEWS_CONTAINER_ID, Template::News),
                ContentSource::new(config.events_url(), EVENTS_CONTAINER_ID, Template::Events),
            ],
            Duration::from_secs(config.fetch_timeout_secs),
        )
    }

    pub fn sources(&self) -> &[ContentSource] {
        &self.sources
    }

    pub fn loaded(&self, container_id: &str) -> Option<&LoadedContent> {
        self.loaded.get(container_id)
    }

    /// Fetch every source concurrently and render each container.
    ///
    /// Returns the number of containers that failed.
    pub async fn load_all(
        &mut self,
        document: &mut Document,
        language: Language,
        events: &EventBus,
        metrics: &LocalizationMetrics,
    ) -> usize {
        info!("Loading {} content sources", self.sources.len());
        let client = &self.client;
        let results = join_all(
            self.sources
                .iter()
                .map(|source| fetch_collection(client, &source.url)),
        )
        .await;

        let mut failures = 0;
        for (source, result) in self.sources.iter().zip(results) {
            let loaded = match result {
                Ok(entries) => {
                    info!("✓ {} - {} entries", source.url, entries.len());
                    events.publish(SiteEvent::ContentLoaded {
                        container: source.container_id.clone(),
                        entries: entries.len(),
                    });
                    LoadedContent::Entries {
                        template: source.template,
                        entries,
                    }
                }
                Err(e) => {
                    warn!("✗ {} - {}", source.url, e);
                    failures += 1;
                    metrics.record_content_failure();
                    events.publish(SiteEvent::ContentFailed {
                        container: source.container_id.clone(),
                    });
                    LoadedContent::Failed
                }
            };
            self.loaded.insert(source.container_id.clone(), loaded);
        }

        self.render(document, language);
        failures
    }

    /// Re-render every loaded container, e.g. after a language change.
    pub fn render(&self, document: &mut Document, language: Language) {
        for (container_id, loaded) in &self.loaded {
            let Some(container) = document.get_element_by_id(container_id) else {
                debug!("Container #{} not on this page", container_id);
                continue;
            };
            let markup = match loaded {
                LoadedContent::Entries { template, entries } => {
                    render_entries(*template, entries, language)
                }
                LoadedContent::Failed => render_error(language),
            };
            document.set_markup(container, &markup);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn page_with_containers() -> Document {
        let mut doc = Document::new();
        for id in [NEWS_CONTAINER_ID, EVENTS_CONTAINER_ID] {
            let container = doc.append(doc.body(), "div");
            doc.set_attribute(container, "id", id);
            doc.set_text(container, "Loading...");
        }
        doc
    }

    fn loader_for(server: &MockServer) -> ContentLoader {
        ContentLoader::new(
            vec![
                ContentSource::new(
                    format!("{}/data/news.json", server.uri()),
                    NEWS_CONTAINER_ID,
                    Template::News,
                ),
                ContentSource::new(
                    format!("{}/data/events.json", server.uri()),
                    EVENTS_CONTAINER_ID,
                    Template::Events,
                ),
            ],
            Duration::from_secs(5),
        )
        .unwrap()
    }

    // ==================== Collection Extraction Tests ====================

    #[test]
    fn test_extract_top_level_array() {
        let value = json!([{"title": "a"}]);
        assert_eq!(extract_collection(&value).unwrap().len(), 1);
    }

    #[test]
    fn test_extract_named_collection() {
        let value = json!({"updated": "2024-01-01", "news": [{"title": "a"}, {"title": "b"}]});
        assert_eq!(extract_collection(&value).unwrap().len(), 2);
    }

    #[test]
    fn test_extract_prefers_top_level_over_nested() {
        let value = json!({"meta": {"tags": ["x", "y", "z"]}, "events": [{"title": "a"}]});
        assert_eq!(extract_collection(&value).unwrap().len(), 1);
    }

    #[test]
    fn test_extract_nested_when_no_top_level() {
        let value = json!({"data": {"events": [{"title": "a"}]}});
        assert_eq!(extract_collection(&value).unwrap().len(), 1);
    }

    #[test]
    fn test_extract_none() {
        assert!(extract_collection(&json!({"title": "x"})).is_none());
        assert!(extract_collection(&json!("text")).is_none());
    }

    // ==================== Formatting Tests ====================

    #[test]
    fn test_format_date_english() {
        assert_eq!(format_date("2024-01-15", Language::ENGLISH), "January 15, 2024");
    }

    #[test]
    fn test_format_date_arabic() {
        assert_eq!(format_date("2024-03-05", Language::ARABIC), "٥ مارس ٢٠٢٤");
    }

    #[test]
    fn test_format_date_timestamp() {
        assert_eq!(
            format_date("2024-12-01T18:30:00+03:00", Language::ENGLISH),
            "December 1, 2024"
        );
    }

    #[test]
    fn test_format_date_unparsable_verbatim() {
        assert_eq!(format_date("TBA", Language::ENGLISH), "TBA");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<script>\"x\" & 'y'</script>"),
            "&lt;script&gt;&quot;x&quot; &amp; &#39;y&#39;&lt;/script&gt;"
        );
    }

    #[test]
    fn test_render_news_entry() {
        let entries = vec![json!({
            "title": "Welcome <back>",
            "date": "2024-09-01",
            "description": "Fall semester kickoff"
        })];
        let html = render_entries(Template::News, &entries, Language::ENGLISH);
        assert!(html.contains("news-card"));
        assert!(html.contains("Welcome &lt;back&gt;"));
        assert!(html.contains("September 1, 2024"));
    }

    #[test]
    fn test_render_event_entry_arabic() {
        let entries = vec![json!({
            "title": "Cultural Night",
            "date": "2024-11-20",
            "description": "Food and music",
            "location": "Student Union"
        })];
        let html = render_entries(Template::Events, &entries, Language::ARABIC);
        assert!(html.contains("event-card"));
        assert!(html.contains("المكان: Student Union"));
        assert!(html.contains("٢٠ نوفمبر ٢٠٢٤"));
    }

    #[test]
    fn test_render_skips_non_objects() {
        let entries = vec![json!("stray"), json!({"title": "Real"})];
        let html = render_entries(Template::News, &entries, Language::ENGLISH);
        assert_eq!(html.matches("news-card").count(), 1);
    }

    #[test]
    fn test_render_empty_collection() {
        let html = render_entries(Template::Events, &[], Language::ENGLISH);
        assert!(html.contains("content-empty"));
    }

    // ==================== Fetch Tests ====================

    #[tokio::test]
    async fn test_fetch_collection_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/news.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "news": [{"title": "One", "date": "2024-01-01", "description": "d"}]
            })))
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let entries = fetch_collection(&client, &format!("{}/data/news.json", server.uri()))
            .await
            .unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_collection_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/news.json"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let result = fetch_collection(&client, &format!("{}/data/news.json", server.uri())).await;
        assert!(matches!(result, Err(SiteError::HttpStatus { status: 404, .. })));
    }

    #[tokio::test]
    async fn test_fetch_collection_invalid_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/news.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let result = fetch_collection(&client, &format!("{}/data/news.json", server.uri())).await;
        assert!(matches!(result, Err(SiteError::Parse(_))));
    }

    // ==================== Loader Tests ====================

    #[tokio::test]
    async fn test_load_all_events_failure_is_scoped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/news.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "news": [
                    {"title": "One", "date": "2024-01-01", "description": "first"},
                    {"title": "Two", "date": "2024-01-02", "description": "second"}
                ]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/data/events.json"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let mut doc = page_with_containers();
        let mut loader = loader_for(&server);
        let events = EventBus::new();
        let metrics = LocalizationMetrics::new();

        let failures = loader
            .load_all(&mut doc, Language::ENGLISH, &events, &metrics)
            .await;

        assert_eq!(failures, 1);
        assert_eq!(metrics.content_failures(), 1);

        let news = doc.get_element_by_id(NEWS_CONTAINER_ID).unwrap();
        assert_eq!(doc.text(news).matches("news-card").count(), 2);

        let events_container = doc.get_element_by_id(EVENTS_CONTAINER_ID).unwrap();
        let html = doc.text(events_container);
        assert!(html.contains("content-error"));
        assert!(html.contains("Unable to load content"));
        assert!(!html.contains("event-card"));
    }

    #[tokio::test]
    async fn test_render_after_language_change_uses_cache() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/news.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"title": "One", "date": "2024-01-15", "description": "first"}
            ])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/data/events.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"events": []})))
            .mount(&server)
            .await;

        let mut doc = page_with_containers();
        let mut loader = loader_for(&server);
        loader
            .load_all(&mut doc, Language::ENGLISH, &EventBus::new(), &LocalizationMetrics::new())
            .await;

        loader.render(&mut doc, Language::ARABIC);

        let news = doc.get_element_by_id(NEWS_CONTAINER_ID).unwrap();
        assert!(doc.text(news).contains("١٥ يناير ٢٠٢٤"));
        let events_container = doc.get_element_by_id(EVENTS_CONTAINER_ID).unwrap();
        assert!(doc.text(events_container).contains("لا يوجد محتوى بعد"));
    }

    #[tokio::test]
    async fn test_missing_container_is_skipped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let mut doc = Document::new();
        let mut loader = loader_for(&server);
        let failures = loader
            .load_all(&mut doc, Language::ENGLISH, &EventBus::new(), &LocalizationMetrics::new())
            .await;
        assert_eq!(failures, 0);
        assert!(loader.loaded(NEWS_CONTAINER_ID).is_some());
    }
}
