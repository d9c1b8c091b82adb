//! End-to-end audits against a mock site

use crate::test_client;
use crawl_signal::audit::{Auditor, NONE_NOTED, NO_NEXT_ACTIONS};
use crawl_signal::robots::AI_BOT_ROSTER;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const WELL_FORMED_PAGE: &str = r#"<!doctype html>
<html>
<head>
  <meta name="robots" content="index, follow">
  <link rel="canonical" href="https://example.com/Post">
  <script type="application/ld+json">{"@type":"Article"}</script>
</head>
<body><main><article><h1>Post</h1><p>Readable server-rendered text.</p></article></main></body>
</html>"#;

fn auditor() -> Auditor {
    Auditor::new(test_client()).with_robots_scheme("http")
}

async fn mount_page(server: &MockServer, route: &str, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(template)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_audit_with_robots_groups() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/post",
        ResponseTemplate::new(200).set_body_raw(WELL_FORMED_PAGE, "text/html; charset=utf-8"),
    )
    .await;
    mount_page(
        &server,
        "/robots.txt",
        ResponseTemplate::new(200)
            .set_body_string("User-agent: GPTBot\nDisallow: /\n\nUser-agent: *\nAllow: /\n"),
    )
    .await;

    let url = format!("{}/post", server.uri());
    let report = auditor().audit(&url, true).await;

    assert_eq!(report.critical_issues, vec![NONE_NOTED]);
    assert_eq!(
        report.warnings,
        vec!["robots.txt blocks GPTBot from the site."]
    );
    assert_eq!(
        report.next_actions,
        vec!["Update robots.txt to allow GPTBot if desired."]
    );
    assert!(report
        .good_signals
        .contains(&"Canonical tag present: https://example.com/Post".to_string()));
    assert!(report
        .good_signals
        .contains(&"Found 1 JSON-LD structured data block(s).".to_string()));
    for agent in ["ClaudeBot", "PerplexityBot", "Bingbot"] {
        assert!(report
            .good_signals
            .contains(&format!("robots.txt allows {}.", agent)));
    }

    let markdown = report.to_markdown();
    assert!(markdown.starts_with("## Critical issues\n- None noted.\n\n## Warnings\n"));
}

#[tokio::test]
async fn test_audit_header_and_meta_directives() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/hidden",
        ResponseTemplate::new(200)
            .insert_header("x-robots-tag", "noindex")
            .set_body_raw(
                r#"<html><head><meta name="googlebot" content="nosnippet"></head><body><p>Hi</p></body></html>"#,
                "text/html",
            ),
    )
    .await;

    let url = format!("{}/hidden", server.uri());
    let report = auditor().audit(&url, false).await;

    assert_eq!(
        report.critical_issues,
        vec!["X-Robots-Tag header includes noindex."]
    );
    assert!(report
        .warnings
        .contains(&"Meta robots includes nosnippet; snippets may be suppressed.".to_string()));
    assert!(report
        .warnings
        .contains(&"No <h1> heading found; crawlers may lack a clear title.".to_string()));
}

#[tokio::test]
async fn test_audit_skips_robots_when_disabled() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/post",
        ResponseTemplate::new(200).set_body_raw(WELL_FORMED_PAGE, "text/html"),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /"))
        .expect(0)
        .mount(&server)
        .await;

    let url = format!("{}/post", server.uri());
    let report = auditor().audit(&url, false).await;

    assert!(report.good_signals.iter().all(|s| !s.starts_with("robots.txt")));
    assert_eq!(report.warnings, vec![NONE_NOTED]);
    assert_eq!(report.next_actions, vec![NO_NEXT_ACTIONS]);
}

#[tokio::test]
async fn test_audit_robots_not_found_is_unknown() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/post",
        ResponseTemplate::new(200).set_body_raw(WELL_FORMED_PAGE, "text/html"),
    )
    .await;
    mount_page(&server, "/robots.txt", ResponseTemplate::new(404)).await;

    let url = format!("{}/post", server.uri());
    let report = auditor().audit(&url, true).await;

    let expected: Vec<String> = AI_BOT_ROSTER
        .iter()
        .map(|agent| format!("robots.txt access for {} is unknown (no matching group).", agent))
        .collect();
    assert_eq!(report.warnings, expected);
}

#[tokio::test]
async fn test_audit_error_status_page() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/gone",
        ResponseTemplate::new(404)
            .set_body_raw("<html><body>Not found</body></html>", "text/html"),
    )
    .await;

    let url = format!("{}/gone", server.uri());
    let report = auditor().audit(&url, false).await;

    assert_eq!(
        report.critical_issues,
        vec!["HTTP status 404 returned for the page."]
    );
}

#[tokio::test]
async fn test_audit_unreachable_page() {
    // Nothing listens on port 1, so both the page and robots.txt fail to connect
    let report = auditor().audit("http://127.0.0.1:1/page", true).await;

    assert_eq!(report.critical_issues.len(), 1);
    assert!(report.critical_issues[0].starts_with("Failed to fetch page: "));
    assert_eq!(
        report.next_actions,
        vec!["Verify the URL is reachable and not blocking requests."]
    );
    assert_eq!(report.warnings.len(), AI_BOT_ROSTER.len());
    assert!(report
        .warnings
        .iter()
        .all(|w| w.ends_with("is unknown (no matching group).")));
    assert_eq!(
        report.good_signals,
        vec!["No strong positive signals detected yet."]
    );
}
