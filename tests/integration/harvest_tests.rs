//! Integration tests for the harvester
//!
//! These tests use wiremock to stand in for the upstream site and run the
//! full index -> chapter -> verse cycle end-to-end.

use tafsir_harvest::config::Config;
use tafsir_harvest::crawler::{Fetcher, VerseCollector};
use tafsir_harvest::output::{emit_document, format_document};
use tafsir_harvest::{harvest, Document, HarvestError};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: &str) -> Config {
    let mut config = Config::default();
    config.source.index_url = format!("{}/sure", base_url);
    config.source.user_agent = "TestHarvester/1.0".to_string();
    config.source.timeout_secs = 5;
    config.retry.delay_ms = 10;
    config
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.into_bytes(), "text/html")
}

fn index_page(chapters: &[(&str, &str)]) -> String {
    let links: String = chapters
        .iter()
        .map(|(href, title)| format!("<li><a href=\"{}\">{}</a></li>", href, title))
        .collect();
    format!(
        "<html><body><nav><a href=\"/about\">O nama</a></nav><article><ul>{}</ul></article></body></html>",
        links
    )
}

fn chapter_page(place: &str, verse_count: u32, verse_links: &str) -> String {
    format!(
        r#"<html><body>
            <h3 class="post-subtitle">Objavljena u {}</h3>
            <article>
                <p class="post-meta">Broj ajeta: ima {} ajeta</p>
                {}
            </article>
        </body></html>"#,
        place, verse_count, verse_links
    )
}

fn verse_page(original: &str, commentary: &[&str]) -> String {
    let blocks: String = commentary
        .iter()
        .map(|text| format!("<p>{}</p>", text))
        .collect();
    format!(
        r#"<html><body><article>
            <p>Autor</p>
            <p>Datum</p>
            <p align="right">{}</p>
            <p>Prijevod</p>
            {}
            <p class="tag">Oznake</p>
            <p>Povezano</p>
        </article></body></html>"#,
        original, blocks
    )
}

async fn mount_page(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html(body))
        .mount(server)
        .await;
}

/// Mounts an index with `count` chapters, each with one verse
async fn mount_simple_corpus(server: &MockServer, count: u32) {
    let base = server.uri();
    let chapters: Vec<(String, String)> = (1..=count)
        .map(|n| (format!("/sura/{}", n), format!("{}. Sura {}", n, n)))
        .collect();
    let refs: Vec<(&str, &str)> = chapters
        .iter()
        .map(|(href, title)| (href.as_str(), title.as_str()))
        .collect();
    mount_page(server, "/sure", index_page(&refs)).await;

    for n in 1..=count {
        mount_page(
            server,
            &format!("/sura/{}", n),
            chapter_page(
                "Mekki",
                1,
                &format!("<a href=\"{}/ajet/{}/1\">1. Ajet</a>", base, n),
            ),
        )
        .await;
        mount_page(
            server,
            &format!("/ajet/{}/1", n),
            verse_page("نص", &["Tefsir"]),
        )
        .await;
    }
}

#[tokio::test]
async fn test_full_harvest() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/sure",
        index_page(&[("/sura/1", "1. El-Fatiha"), ("/sura/2", "2. El-Bekare")]),
    )
    .await;

    mount_page(
        &mock_server,
        "/sura/1",
        chapter_page(
            "Mekki.",
            7,
            &format!(
                r#"<a href="{base}/ajet/1/1">1. U ime Allaha</a>
                   <a href="https://facebook.com/share" target="_blank">Podijeli</a>
                   <a href="/ajet/1/2">2. Hvala Allahu</a>"#,
                base = base_url
            ),
        ),
    )
    .await;

    mount_page(
        &mock_server,
        "/sura/2",
        chapter_page(
            "Medini",
            286,
            &format!(r#"<a href="{}/ajet/2/1">1. Elif Lam Mim</a>"#, base_url),
        ),
    )
    .await;

    mount_page(
        &mock_server,
        "/ajet/1/1",
        verse_page("بِسْمِ اللَّهِ", &["Prvi pasus", "Drugi pasus"]),
    )
    .await;
    mount_page(
        &mock_server,
        "/ajet/1/2",
        verse_page("الْحَمْدُ لِلَّهِ", &["Hvala"]),
    )
    .await;
    mount_page(&mock_server, "/ajet/2/1", verse_page("الم", &[])).await;

    let document = harvest(&create_test_config(&base_url))
        .await
        .expect("Harvest failed");

    assert_eq!(document.len(), 2);

    let first = &document.chapters[0];
    assert_eq!(first.number, 1);
    assert_eq!(first.name, "El-Fatiha");
    assert_eq!(first.place_of_revelation, "Mekkia");
    assert_eq!(first.number_of_verses, 7);
    assert_eq!(first.verses.len(), 2);

    let verse = &first.verses[0];
    assert_eq!(verse.number, 1);
    assert_eq!(verse.text, "U ime Allaha");
    assert_eq!(verse.original_text, "بِسْمِ اللَّهِ");
    assert_eq!(verse.commentary, "Prvi pasus\nDrugi pasus\n");
    assert_eq!(first.verses[1].number, 2);
    assert_eq!(first.verses[1].text, "Hvala Allahu");

    let second = &document.chapters[1];
    assert_eq!(second.number, 2);
    assert_eq!(second.name, "El-Bekare");
    assert_eq!(second.place_of_revelation, "Medina");
    assert_eq!(second.number_of_verses, 286);
    assert_eq!(second.verses.len(), 1);
    assert_eq!(second.verses[0].commentary, "");
}

#[tokio::test]
async fn test_chapter_always_failing_is_attempted_three_times_and_omitted() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/sure",
        index_page(&[("/sura/1", "1. A"), ("/sura/2", "2. B"), ("/sura/3", "3. C")]),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/sura/2"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&mock_server)
        .await;

    for n in [1, 3] {
        mount_page(
            &mock_server,
            &format!("/sura/{}", n),
            chapter_page("Mekki", 0, ""),
        )
        .await;
    }

    let document = harvest(&create_test_config(&mock_server.uri()))
        .await
        .expect("Harvest failed");

    let numbers: Vec<u32> = document.chapters.iter().map(|c| c.number).collect();
    assert_eq!(numbers, vec![1, 3]);
}

#[tokio::test]
async fn test_chapter_succeeds_on_second_attempt() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/sure", index_page(&[("/sura/1", "1. El-Fatiha")])).await;

    // Mounted first, so it answers the first request only.
    Mock::given(method("GET"))
        .and(path("/sura/1"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;

    mount_page(
        &mock_server,
        "/sura/1",
        chapter_page(
            "Mekki",
            2,
            &format!(
                r#"<a href="{b}/ajet/1/1">1. Prvi</a><a href="{b}/ajet/1/2">2. Drugi</a>"#,
                b = base_url
            ),
        ),
    )
    .await;
    mount_page(&mock_server, "/ajet/1/1", verse_page("أ", &["x"])).await;
    mount_page(&mock_server, "/ajet/1/2", verse_page("ب", &["y"])).await;

    let document = harvest(&create_test_config(&base_url))
        .await
        .expect("Harvest failed");

    assert_eq!(document.len(), 1);
    assert_eq!(document.chapters[0].verses.len(), 2);
    assert_eq!(document.chapters[0].verses[1].commentary, "y\n");
}

#[tokio::test]
async fn test_failed_verse_is_skipped_without_retry() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/sure", index_page(&[("/sura/1", "1. A")])).await;

    mount_page(
        &mock_server,
        "/sura/1",
        chapter_page(
            "Mekki",
            3,
            &format!(
                r#"<a href="{b}/ajet/1">1. Prvi</a>
                   <a href="{b}/ajet/2">2. Drugi</a>
                   <a href="{b}/ajet/3">3. Treci</a>"#,
                b = base_url
            ),
        ),
    )
    .await;

    mount_page(&mock_server, "/ajet/1", verse_page("أ", &[])).await;
    Mock::given(method("GET"))
        .and(path("/ajet/2"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/ajet/3", verse_page("ج", &[])).await;

    let document = harvest(&create_test_config(&base_url))
        .await
        .expect("Harvest failed");

    let chapter = &document.chapters[0];
    // declared count is left alone even though a verse is missing
    assert_eq!(chapter.number_of_verses, 3);
    let numbers: Vec<u32> = chapter.verses.iter().map(|v| v.number).collect();
    assert_eq!(numbers, vec![1, 3]);
    assert_eq!(chapter.verses[1].text, "Treci");
}

#[tokio::test]
async fn test_verse_page_without_container_is_skipped() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/sure", index_page(&[("/sura/1", "1. A")])).await;
    mount_page(
        &mock_server,
        "/sura/1",
        chapter_page(
            "Mekki",
            2,
            &format!(
                r#"<a href="{b}/ajet/1">1. Prvi</a><a href="{b}/ajet/2">2. Drugi</a>"#,
                b = base_url
            ),
        ),
    )
    .await;
    mount_page(&mock_server, "/ajet/1", "<html><body>Nema</body></html>".to_string()).await;
    mount_page(&mock_server, "/ajet/2", verse_page("ب", &[])).await;

    let document = harvest(&create_test_config(&base_url))
        .await
        .expect("Harvest failed");

    let chapter = &document.chapters[0];
    assert_eq!(chapter.verses.len(), 1);
    assert_eq!(chapter.verses[0].number, 2);
}

#[tokio::test]
async fn test_chapter_without_container_is_not_retried() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/sure",
        index_page(&[("/sura/1", "1. A"), ("/sura/2", "2. B")]),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/sura/1"))
        .respond_with(html("<html><body><div>Greska</div></body></html>".to_string()))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/sura/2", chapter_page("Medini", 0, "")).await;

    let document = harvest(&create_test_config(&mock_server.uri()))
        .await
        .expect("Harvest failed");

    assert_eq!(document.len(), 1);
    assert_eq!(document.chapters[0].number, 2);
}

#[tokio::test]
async fn test_chapter_link_without_href_keeps_numbering() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/sure",
        "<article><a name=\"top\">1. Bez linka</a><a href=\"/sura/2\">2. B</a></article>"
            .to_string(),
    )
    .await;
    mount_page(&mock_server, "/sura/2", chapter_page("Mekki", 0, "")).await;

    let document = harvest(&create_test_config(&mock_server.uri()))
        .await
        .expect("Harvest failed");

    assert_eq!(document.len(), 1);
    assert_eq!(document.chapters[0].number, 2);
    assert_eq!(document.chapters[0].name, "B");
}

#[tokio::test]
async fn test_index_failure_is_fatal() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sure"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = harvest(&create_test_config(&mock_server.uri())).await;
    assert!(matches!(result, Err(HarvestError::Http { .. })));
}

#[tokio::test]
async fn test_index_without_container_is_fatal() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/sure",
        "<html><body><a href=\"/sura/1\">1. A</a></body></html>".to_string(),
    )
    .await;

    let result = harvest(&create_test_config(&mock_server.uri())).await;
    assert!(matches!(result, Err(HarvestError::MissingElement { .. })));
}

#[tokio::test]
async fn test_max_chapters_limits_fetches() {
    let mock_server = MockServer::start().await;
    mount_simple_corpus(&mock_server, 3).await;

    let mut config = create_test_config(&mock_server.uri());
    config.source.max_chapters = 2;

    let document = harvest(&config).await.expect("Harvest failed");

    assert_eq!(document.len(), 2);
    let requests = mock_server.received_requests().await.unwrap_or_default();
    assert!(requests.iter().all(|r| r.url.path() != "/sura/3"));
}

#[tokio::test]
async fn test_harvest_is_deterministic() {
    let mock_server = MockServer::start().await;
    mount_simple_corpus(&mock_server, 4).await;

    let config = create_test_config(&mock_server.uri());
    let first = format_document(&harvest(&config).await.unwrap()).unwrap();
    let second = format_document(&harvest(&config).await.unwrap()).unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_numbering_is_gapless_without_failures() {
    let mock_server = MockServer::start().await;
    mount_simple_corpus(&mock_server, 5).await;

    let document = harvest(&create_test_config(&mock_server.uri()))
        .await
        .unwrap();

    for (index, chapter) in document.chapters.iter().enumerate() {
        assert_eq!(chapter.number, index as u32 + 1);
        for (verse_index, verse) in chapter.verses.iter().enumerate() {
            assert_eq!(verse.number, verse_index as u32 + 1);
        }
    }
}

#[tokio::test]
async fn test_verse_collector_from_url() {
    let mock_server = MockServer::start().await;
    mount_simple_corpus(&mock_server, 1).await;

    let config = create_test_config(&mock_server.uri());
    let fetcher = Fetcher::new(&config.source).unwrap();
    let collector = VerseCollector::new(&fetcher);

    let verses = collector
        .collect_from_url(&format!("{}/sura/1", mock_server.uri()))
        .await;
    assert_eq!(verses.len(), 1);
    assert_eq!(verses[0].text, "Ajet");
    assert_eq!(verses[0].original_text, "نص");

    let missing = collector
        .collect_from_url(&format!("{}/sura/404", mock_server.uri()))
        .await;
    assert!(missing.is_empty());

    let invalid = collector.collect_from_url("not a url").await;
    assert!(invalid.is_empty());
}

#[tokio::test]
async fn test_emit_writes_harvested_document() {
    let mock_server = MockServer::start().await;
    mount_simple_corpus(&mock_server, 2).await;

    let document = harvest(&create_test_config(&mock_server.uri()))
        .await
        .unwrap();

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("tafsir.json");
    emit_document(&document, &output, false).unwrap();

    let written = std::fs::read_to_string(&output).unwrap();
    let parsed: Document = serde_json::from_str(&written).unwrap();
    assert_eq!(parsed, document);
    assert!(written.contains("\"placeOfRevelation\": \"Mekka\""));
}

#[tokio::test]
async fn test_invalid_config_rejected_before_any_request() {
    let mock_server = MockServer::start().await;
    mount_simple_corpus(&mock_server, 1).await;

    let mut config = create_test_config(&mock_server.uri());
    config.source.max_chapters = 0;

    let result = harvest(&config).await;

    assert!(matches!(result, Err(HarvestError::Config(_))));
    let requests = mock_server.received_requests().await.unwrap_or_default();
    assert!(requests.is_empty());
}
