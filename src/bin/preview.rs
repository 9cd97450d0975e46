//! Preview binary - renders the demo page in a language and prints its outline
//!
//! Usage:
//!   cargo run --bin preview          # Stored preference, else locale, else English
//!   cargo run --bin preview -- ar    # Switch to Arabic after loading
//!
//! Optional environment variables:
//! - CONTENT_BASE_URL (defaults to http://localhost:8000)
//! - SITE_PREFERENCE_FILE (defaults to data/preferences.json)
//! - SITE_LOCALE (defaults to LANG)
//! - NAV_STRATEGY (scroll or intersection, defaults to scroll)

use anyhow::{Context, Result};
use bilingual_site::config::Config;
use bilingual_site::dom::{Document, ElementId};
use bilingual_site::i18n::{Catalog, CatalogValidator, Language};
use bilingual_site::localization::CATALOG_KEY_ATTR;
use bilingual_site::preference::FileStore;
use bilingual_site::site::Site;
use tracing::{info, warn};

/// A small page using both markup conventions.
fn demo_page() -> Document {
    let mut doc = Document::new();
    let body = doc.body();

    let nav = doc.append(body, "nav");
    for (key, href) in [
        ("navHome", "#home"),
        ("navAbout", "#about"),
        ("navEvents", "#events"),
        ("navNews", "#news"),
        ("navGallery", "#gallery"),
        ("navContact", "#contact"),
    ] {
        let link = doc.append(nav, "a");
        doc.add_class(link, "nav-link");
        doc.set_attribute(link, "href", href);
        doc.set_attribute(link, CATALOG_KEY_ATTR, key);
    }

    let hero = doc.append(body, "h1");
    doc.set_attribute(hero, CATALOG_KEY_ATTR, "heroTitle");

    let about = doc.append(body, "section");
    doc.set_attribute(about, "id", "about");
    let about_text = doc.append(about, "p");
    doc.set_attribute(
        about_text,
        "data-en",
        "We bring Arab culture to campus through events and community.",
    );
    doc.set_attribute(
        about_text,
        "data-ar",
        "نقدم الثقافة العربية في الحرم الجامعي من خلال الفعاليات والمجتمع.",
    );

    for id in ["news-container", "events-container"] {
        let container = doc.append(body, "div");
        doc.set_attribute(container, "id", id);
    }

    let gallery = doc.append(body, "section");
    doc.set_attribute(gallery, "id", "gallery");
    let item = doc.append(gallery, "div");
    doc.add_class(item, "gallery-item");
    doc.set_attribute(item, "data-caption-en", "Welcome night");
    doc.set_attribute(item, "data-caption-ar", "ليلة الترحيب");
    let img = doc.append(item, "img");
    doc.set_attribute(img, "src", "images/welcome.jpg");

    let form = doc.append(body, "form");
    doc.set_attribute(form, "id", "contact-form");
    let name = doc.append(form, "input");
    doc.set_attribute(name, "id", "contact-name");
    doc.set_attribute(name, CATALOG_KEY_ATTR, "contactName");
    let subject = doc.append(form, "select");
    doc.set_attribute(subject, "id", "contact-subject");
    for key in ["contactSubjectGeneral", "contactSubjectMembership", "contactSubjectEvents"] {
        let option = doc.append(subject, "option");
        doc.set_attribute(option, CATALOG_KEY_ATTR, key);
    }
    let submit = doc.append(form, "button");
    doc.set_attribute(submit, CATALOG_KEY_ATTR, "contactSubmit");

    doc
}

fn print_outline(doc: &Document, id: ElementId, depth: usize) {
    let element = doc.element(id);
    let mut line = format!("{}<{}", "  ".repeat(depth), element.tag);
    if let Some(dom_id) = element.attribute("id") {
        line.push_str(&format!(" #{}", dom_id));
    }
    for class in &element.classes {
        line.push_str(&format!(" .{}", class));
    }
    line.push('>');
    if let Some(placeholder) = &element.placeholder {
        line.push_str(&format!(" [{}]", placeholder));
    }
    let text = element.content.as_str();
    if !text.is_empty() {
        line.push_str(&format!(" {}", text));
    }
    println!("{}", line);

    for &child in element.children() {
        print_outline(doc, child, depth + 1);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("bilingual_site=info".parse()?),
        )
        .init();

    // Parse CLI arguments
    let requested = std::env::args()
        .nth(1)
        .map(|code| Language::from_code(&code))
        .transpose()
        .context("Unsupported language argument")?;

    info!("Loading configuration...");
    let config = Config::from_env()?;

    let page = demo_page();
    let report = CatalogValidator::validate(&page, Catalog::get());
    for warning in &report.warnings {
        warn!("{}", warning);
    }
    for error in &report.errors {
        warn!("{}", error);
    }

    let store = FileStore::new(&config.preference_file);
    let mut site = Site::load(&config, page, Box::new(store))
        .context("Failed to set up the page")?;

    let failures = site.load_content().await;
    if failures > 0 {
        warn!("{} content sources failed, placeholders shown", failures);
    }

    if let Some(language) = requested {
        site.switch_language(language).await;
    }

    let doc = site.document();
    println!("\n========== PAGE PREVIEW ==========");
    println!("title: {}", doc.title);
    println!("lang: {}  dir: {}", doc.lang, doc.dir);
    println!("==================================\n");
    print_outline(doc, doc.root(), 0);

    println!(
        "\n{}",
        serde_json::to_string_pretty(&site.metrics().report())?
    );
    Ok(())
}
