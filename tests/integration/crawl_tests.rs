//! Integration tests for the archiver
//!
//! These tests use wiremock to serve a synthetic diary and check the
//! directories and files a full run leaves behind.

use diary_walker::config::Config;
use diary_walker::crawler::Coordinator;
use diary_walker::output::TEXT_FILE_NAME;
use diary_walker::DiaryError;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// One synthetic post page
struct TestPost<'a> {
    title: &'a str,
    date: &'a str,
    images: &'a [&'a str],
    body: Option<&'a str>,
    nav: Option<(&'a str, &'a str)>,
}

impl TestPost<'_> {
    fn render(&self) -> String {
        let images: String = self
            .images
            .iter()
            .map(|src| format!(r#"<img src="{}">"#, src))
            .collect();
        let body = self
            .body
            .map(|inner| format!(r#"<div class="bd--edit">{}</div>"#, inner))
            .unwrap_or_default();
        let nav = self
            .nav
            .map(|(label, href)| {
                format!(
                    r#"<a class="bd--hn__a hv--op" href="{}"><p class="bd--hn__tx f--head">{}</p></a>"#,
                    href, label
                )
            })
            .unwrap_or_default();

        format!(
            r#"<html>
            <head><meta property="og:title" content="{title}"></head>
            <body>
                <p class="bd--prof__name f--head">乃木 坂子</p>
                <p class="bd--hd__date a--tx js-tdi">{date}</p>
                {images}
                {body}
                {nav}
            </body>
            </html>"#,
            title = self.title,
            date = self.date,
            images = images,
            body = body,
            nav = nav
        )
    }
}

/// Creates a test configuration rooted in `root`, starting at `start`
fn create_test_config(server: &MockServer, start: &str, root: &Path) -> Config {
    let mut config = Config::default();
    config.site.start_url = format!("{}{}", server.uri(), start);
    config.crawler.delay_ms = 0; // No courtesy pause against the mock server
    config.output.root_dir = root.to_path_buf();
    config
}

async fn mount_page(server: &MockServer, at: &str, post: &TestPost<'_>) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(post.render())
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

async fn mount_image(server: &MockServer, at: &str, bytes: &[u8]) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(bytes.to_vec()))
        .mount(server)
        .await;
}

fn list_dirs(dir: &Path) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = std::fs::read_dir(dir)
        .expect("Failed to read directory")
        .map(|entry| entry.expect("Failed to read entry").path())
        .filter(|path| path.is_dir())
        .collect();
    dirs.sort();
    dirs
}

async fn requested_paths(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .expect("Request recording is enabled")
        .iter()
        .map(|request| request.url.path().to_string())
        .collect()
}

#[tokio::test]
async fn test_three_page_chain() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/diary/c",
        &TestPost {
            title: "Third",
            date: "2023.10.07 21:00",
            images: &["/img/c1.jpg", "https://cdn.example.com/skip.jpg"],
            body: Some(r#"<div dir="auto">third post</div>"#),
            nav: Some(("前の記事", "/diary/b")),
        },
    )
    .await;
    mount_page(
        &server,
        "/diary/b",
        &TestPost {
            title: "Second",
            date: "2023.10.06 20:00",
            images: &[],
            body: Some("<div>second</div><div>post</div>"),
            nav: Some(("前の記事", "/diary/a")),
        },
    )
    .await;
    mount_page(
        &server,
        "/diary/a",
        &TestPost {
            title: "First",
            date: "2023.10.05 12:30",
            images: &["/img/a1.jpg"],
            body: Some("<p>first post</p>"),
            nav: Some(("次の記事", "/diary/b")),
        },
    )
    .await;
    mount_image(&server, "/img/c1.jpg", b"c1").await;
    mount_image(&server, "/img/a1.jpg", b"a1").await;

    let tmp = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(&server, "/diary/c", tmp.path());

    let mut coordinator = Coordinator::new(config)
        .expect("Failed to create coordinator")
        .with_progress(false);
    let summary = coordinator.run().await.expect("Archive run failed");

    assert_eq!(summary.posts, 3);
    assert_eq!(summary.images, 2);
    assert_eq!(summary.texts, 3);
    assert_eq!(summary.author.as_deref(), Some("乃木坂子"));

    // Pages are visited newest to oldest
    let pages: Vec<String> = requested_paths(&server)
        .await
        .into_iter()
        .filter(|p| p.starts_with("/diary/"))
        .collect();
    assert_eq!(pages, vec!["/diary/c", "/diary/b", "/diary/a"]);

    let author_dir = tmp.path().join("乃木坂子");
    let post_dirs = list_dirs(&author_dir);
    assert_eq!(post_dirs.len(), 3);

    let third = author_dir.join("【2023-10-07_21：00】Third");
    assert_eq!(std::fs::read(third.join("c1.jpg")).unwrap(), b"c1");
    assert!(!third.join("skip.jpg").exists());
    assert_eq!(
        std::fs::read_to_string(third.join(TEXT_FILE_NAME)).unwrap(),
        "third post"
    );

    let second = author_dir.join("【2023-10-06_20：00】Second");
    assert_eq!(
        std::fs::read_to_string(second.join(TEXT_FILE_NAME)).unwrap(),
        "second\npost"
    );

    let first = author_dir.join("【2023-10-05_12：30】First");
    assert_eq!(std::fs::read(first.join("a1.jpg")).unwrap(), b"a1");
    assert_eq!(
        std::fs::read_to_string(first.join(TEXT_FILE_NAME)).unwrap(),
        "first post"
    );
}

#[tokio::test]
async fn test_missing_body_container_leaves_no_text_file() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/diary/only",
        &TestPost {
            title: "Photo only",
            date: "2024.02.01 08:00",
            images: &[],
            body: None,
            nav: None,
        },
    )
    .await;

    let tmp = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(&server, "/diary/only", tmp.path());

    let mut coordinator = Coordinator::new(config).unwrap().with_progress(false);
    let summary = coordinator.run().await.unwrap();

    assert_eq!(summary.posts, 1);
    assert_eq!(summary.texts, 0);

    let post_dir = tmp
        .path()
        .join("乃木坂子")
        .join("【2024-02-01_08：00】Photo only");
    assert!(post_dir.is_dir());
    assert!(!post_dir.join(TEXT_FILE_NAME).exists());
}

#[tokio::test]
async fn test_image_failure_aborts_run() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/diary/c",
        &TestPost {
            title: "Broken",
            date: "2023.10.07 21:00",
            images: &["/img/missing.jpg"],
            body: Some("<p>text</p>"),
            nav: Some(("前の記事", "/diary/b")),
        },
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/img/missing.jpg"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/diary/b"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let tmp = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(&server, "/diary/c", tmp.path());

    let mut coordinator = Coordinator::new(config).unwrap().with_progress(false);
    let err = coordinator.run().await.unwrap_err();

    match err {
        DiaryError::ImageFetch(source) => assert!(source.url().ends_with("/img/missing.jpg")),
        other => panic!("Expected image fetch error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_cycle_detected() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/diary/c",
        &TestPost {
            title: "C",
            date: "2023.10.07 21:00",
            images: &[],
            body: None,
            nav: Some(("前の記事", "/diary/b")),
        },
    )
    .await;
    mount_page(
        &server,
        "/diary/b",
        &TestPost {
            title: "B",
            date: "2023.10.06 20:00",
            images: &[],
            body: None,
            nav: Some(("前の記事", "/diary/c")),
        },
    )
    .await;

    let tmp = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(&server, "/diary/c", tmp.path());

    let mut coordinator = Coordinator::new(config).unwrap().with_progress(false);
    let err = coordinator.run().await.unwrap_err();

    assert!(matches!(err, DiaryError::CycleDetected { ref url } if url.ends_with("/diary/c")));
    // Both posts were saved before the loop was noticed
    assert_eq!(list_dirs(&tmp.path().join("乃木坂子")).len(), 2);
}

#[tokio::test]
async fn test_max_posts_limit() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/diary/c",
        &TestPost {
            title: "C",
            date: "2023.10.07 21:00",
            images: &[],
            body: Some("<p>c</p>"),
            nav: Some(("前の記事", "/diary/b")),
        },
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/diary/b"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let tmp = TempDir::new().expect("Failed to create temp dir");
    let mut config = create_test_config(&server, "/diary/c", tmp.path());
    config.crawler.max_posts = Some(1);

    let mut coordinator = Coordinator::new(config).unwrap().with_progress(false);
    let summary = coordinator.run().await.unwrap();

    assert_eq!(summary.posts, 1);
}

#[tokio::test]
async fn test_image_saved_under_decoded_name() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/diary/only",
        &TestPost {
            title: "Photo",
            date: "2024.03.01 09:00",
            images: &["/img/写真 1.jpg"],
            body: Some("<p>photo</p>"),
            nav: None,
        },
    )
    .await;
    // Request paths arrive percent-encoded
    mount_image(&server, "/img/%E5%86%99%E7%9C%9F%201.jpg", b"photo").await;

    let tmp = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(&server, "/diary/only", tmp.path());

    let mut coordinator = Coordinator::new(config).unwrap().with_progress(false);
    let summary = coordinator.run().await.unwrap();
    assert_eq!(summary.images, 1);

    let post_dir = tmp
        .path()
        .join("乃木坂子")
        .join("【2024-03-01_09：00】Photo");
    assert_eq!(std::fs::read(post_dir.join("写真 1.jpg")).unwrap(), b"photo");
    assert!(!post_dir.join("%E5%86%99%E7%9C%9F%201.jpg").exists());
}
