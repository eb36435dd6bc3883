//! Page operations against a mock server.

mod common;

use std::io::Read;

use azd_wiki::types::{VersionControlRecursionType, VersionDescriptor, WikiPageMoveParameters};
use azd_wiki::{PageQuery, PageWriteOptions, WikiErrorKind};
use common::{AUTHORIZATION, WIKI, api_version, client, page_json, pages_path, query, wikis_path};
use mockito::Matcher;
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_get_page_quoted_etag_is_stripped() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", pages_path("").as_str())
        .match_query(query(&[("api-version", "7.1-preview.1"), ("path", "/Home")]))
        .match_header("authorization", AUTHORIZATION)
        .match_header("accept", "application/json")
        .with_header("content-type", "application/json")
        .with_header("etag", r#""abc123""#)
        .with_body(page_json(1, "/Home"))
        .create();

    let page = client(&server).get_page(WIKI, "/Home", &PageQuery::default()).unwrap();

    mock.assert();
    assert_eq!(page.id, Some(1));
    assert_eq!(page.path, "/Home");
    assert_eq!(page.etag.as_deref(), Some("abc123"));
}

#[test]
fn test_get_page_unquoted_etag_passes_through() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", pages_path("").as_str())
        .match_query(Matcher::Any)
        .with_header("etag", "abc123")
        .with_body(page_json(1, "/Home"))
        .create();

    let page = client(&server).get_page(WIKI, "/Home", &PageQuery::default()).unwrap();

    assert_eq!(page.etag.as_deref(), Some("abc123"));
}

#[test]
fn test_get_page_without_etag_header() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", pages_path("").as_str())
        .match_query(Matcher::Any)
        .with_body(page_json(1, "/Home"))
        .create();

    let page = client(&server).get_page(WIKI, "/Home", &PageQuery::default()).unwrap();

    assert_eq!(page.path, "/Home");
    assert!(page.etag.is_none());
}

#[test]
fn test_absent_optional_parameters_are_not_sent() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", pages_path("").as_str())
        .match_query(Matcher::Exact("api-version=7.1-preview.1&path=/Home".to_owned()))
        .with_body(page_json(1, "/Home"))
        .create();

    client(&server).get_page(WIKI, "/Home", &PageQuery::default()).unwrap();

    mock.assert();
}

#[test]
fn test_get_page_by_id_with_options() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", pages_path("7").as_str())
        .match_query(query(&[
            ("api-version", "7.1-preview.1"),
            ("includeContent", "true"),
            ("recursionLevel", "ONELEVEL"),
            ("version", "release"),
            ("versionType", "BRANCH"),
            ("versionOptions", "NONE"),
        ]))
        .with_header("etag", r#""7""#)
        .with_body(
            json!({
                "id": 7,
                "path": "/Guides",
                "content": "# Guides",
                "isParentPage": true,
                "subPages": [{"id": 8, "path": "/Guides/Setup"}]
            })
            .to_string(),
        )
        .create();

    let options = PageQuery {
        include_content: true,
        recursion_level: Some(VersionControlRecursionType::OneLevel),
        version: Some(VersionDescriptor::branch("release")),
    };
    let page = client(&server).get_page_by_id(WIKI, 7, &options).unwrap();

    mock.assert();
    assert_eq!(page.content.as_deref(), Some("# Guides"));
    assert!(page.is_parent_page);
    assert_eq!(page.sub_pages.len(), 1);
    assert_eq!(page.sub_pages[0].path, "/Guides/Setup");
    assert!(page.sub_pages[0].etag.is_none());
}

#[test]
fn test_page_text_is_returned_verbatim() {
    let content = "# Title\r\n\nLine with **markdown** and ünïcödé\n\n```\ncode\n```\n";
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", pages_path("3").as_str())
        .match_query(api_version("7.1-preview.1"))
        .match_header("accept", "text/plain")
        .with_header("content-type", "text/plain")
        .with_header("etag", r#""9""#)
        .with_body(content)
        .create();

    let text = client(&server).get_page_text(WIKI, 3).unwrap();

    mock.assert();
    assert_eq!(text, content);
}

#[test]
fn test_page_archive_streams_bytes() {
    let archive: Vec<u8> = vec![0x50, 0x4b, 0x03, 0x04, 0x00, 0xff, 0x10, 0x00];
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", pages_path("3").as_str())
        .match_query(api_version("7.1-preview.1"))
        .match_header("accept", "application/zip")
        .with_header("content-type", "application/zip")
        .with_body(archive.clone())
        .create();

    let mut reader = client(&server).get_page_archive(WIKI, 3).unwrap();
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes).unwrap();

    mock.assert();
    assert_eq!(bytes, archive);
}

#[test]
fn test_get_page_stats() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", pages_path("42/stats").as_str())
        .match_query(api_version("7.1-preview.1"))
        .with_body(
            json!({
                "id": 42,
                "path": "/Home",
                "viewStats": [{"day": "2024-05-01T00:00:00Z", "count": 12}]
            })
            .to_string(),
        )
        .create();

    let detail = client(&server).get_page_stats(WIKI, 42).unwrap();

    mock.assert();
    assert_eq!(detail.id, 42);
    assert_eq!(detail.view_stats.len(), 1);
    assert_eq!(detail.view_stats[0].count, 12);
}

#[test]
fn test_create_page_sends_content_without_if_match() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("PUT", pages_path("").as_str())
        .match_query(query(&[
            ("api-version", "7.1-preview.1"),
            ("path", "/New Page"),
            ("comment", "first draft"),
        ]))
        .match_header("content-type", "application/json")
        .match_header("if-match", Matcher::Missing)
        .match_body(Matcher::Json(json!({"content": "# New"})))
        .with_status(201)
        .with_header("etag", r#""1""#)
        .with_body(page_json(5, "/New Page"))
        .create();

    let page = client(&server)
        .create_or_update_page(WIKI, "/New Page", "# New", None, &PageWriteOptions::with_comment("first draft"))
        .unwrap();

    mock.assert();
    assert_eq!(page.id, Some(5));
    assert_eq!(page.etag.as_deref(), Some("1"));
}

#[test]
fn test_repeated_reads_return_same_etag() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", pages_path("").as_str())
        .match_query(Matcher::Any)
        .with_header("etag", r#""stable""#)
        .with_body(page_json(1, "/Home"))
        .expect(2)
        .create();

    let client = client(&server);
    let first = client.get_page(WIKI, "/Home", &PageQuery::default()).unwrap();
    let second = client.get_page(WIKI, "/Home", &PageQuery::default()).unwrap();

    mock.assert();
    assert_eq!(first.etag, second.etag);
    assert_eq!(first, second);
}

#[test]
fn test_update_with_read_etag_then_stale_etag_rejected() {
    let mut server = mockito::Server::new();
    let read = server
        .mock("GET", pages_path("").as_str())
        .match_query(Matcher::Any)
        .with_header("etag", r#""v1""#)
        .with_body(page_json(1, "/Home"))
        .create();
    let accepted = server
        .mock("PUT", pages_path("").as_str())
        .match_query(Matcher::Any)
        .match_header("if-match", "v1")
        .match_body(Matcher::Json(json!({"content": "# v2"})))
        .with_header("etag", r#""v2""#)
        .with_body(page_json(1, "/Home"))
        .create();
    let rejected = server
        .mock("PUT", pages_path("").as_str())
        .match_query(Matcher::Any)
        .match_header("if-match", "v1")
        .match_body(Matcher::Json(json!({"content": "# v3"})))
        .with_status(412)
        .with_body(r#"{"message":"The page was changed by another user."}"#)
        .create();

    let client = client(&server);
    let page = client.get_page(WIKI, "/Home", &PageQuery::default()).unwrap();
    let etag = page.etag.as_deref();
    let updated = client
        .create_or_update_page(WIKI, "/Home", "# v2", etag, &PageWriteOptions::default())
        .unwrap();
    let err = client
        .create_or_update_page(WIKI, "/Home", "# v3", etag, &PageWriteOptions::default())
        .unwrap_err();

    read.assert();
    accepted.assert();
    rejected.assert();
    assert_eq!(updated.etag.as_deref(), Some("v2"));
    assert_eq!(err.kind(), WikiErrorKind::Status);
    assert_eq!(err.status(), Some(412));
    assert_eq!(err.operation(), Some("create_or_update_page"));
    assert!(err.body().unwrap().contains("changed by another user"));
}

#[test]
fn test_update_page_by_id_uses_patch_and_if_match() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("PATCH", pages_path("1").as_str())
        .match_query(query(&[("api-version", "7.1-preview.1"), ("comment", "Fix typo & link")]))
        .match_header("if-match", "v1")
        .match_body(Matcher::Json(json!({"content": "# Fixed"})))
        .with_header("etag", r#""v2""#)
        .with_body(page_json(1, "/Home"))
        .create();

    let page = client(&server)
        .update_page(WIKI, 1, "# Fixed", "v1", Some("Fix typo & link"))
        .unwrap();

    mock.assert();
    assert_eq!(page.etag.as_deref(), Some("v2"));
}

#[test]
fn test_delete_page_by_path_and_id() {
    let mut server = mockito::Server::new();
    let by_path = server
        .mock("DELETE", pages_path("").as_str())
        .match_query(query(&[("api-version", "7.1-preview.1"), ("path", "/Old")]))
        .with_header("etag", r#""d1""#)
        .with_body(page_json(4, "/Old"))
        .create();
    let by_id = server
        .mock("DELETE", pages_path("5").as_str())
        .match_query(query(&[("api-version", "7.1-preview.1"), ("comment", "cleanup")]))
        .with_body(page_json(5, "/Older"))
        .create();

    let client = client(&server);
    let deleted = client.delete_page(WIKI, "/Old", &PageWriteOptions::default()).unwrap();
    let deleted_by_id = client
        .delete_page_by_id(WIKI, 5, &PageWriteOptions::with_comment("cleanup"))
        .unwrap();

    by_path.assert();
    by_id.assert();
    assert_eq!(deleted.etag.as_deref(), Some("d1"));
    assert_eq!(deleted_by_id.path, "/Older");
    assert!(deleted_by_id.etag.is_none());
}

#[test]
fn test_missing_page_is_status_error() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", pages_path("").as_str())
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body(r#"{"message":"Wiki page not found."}"#)
        .create();

    let err = client(&server)
        .get_page(WIKI, "/Missing", &PageQuery::default())
        .unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert_eq!(err.body(), Some(r#"{"message":"Wiki page not found."}"#));
}

#[test]
fn test_malformed_body_is_decode_error() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", pages_path("").as_str())
        .match_query(Matcher::Any)
        .with_header("etag", r#""1""#)
        .with_body("<html>Sign in</html>")
        .create();

    let err = client(&server)
        .get_page(WIKI, "/Home", &PageQuery::default())
        .unwrap_err();

    assert_eq!(err.kind(), WikiErrorKind::Decode);
    assert_eq!(err.operation(), Some("get_page"));
    assert_eq!(err.body(), Some("<html>Sign in</html>"));
}

#[test]
fn test_create_attachment_uploads_base64() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("PUT", wikis_path(&format!("{WIKI}/attachments")).as_str())
        .match_query(query(&[("api-version", "7.1-preview.1"), ("name", "logo.png")]))
        .match_header("content-type", "application/octet-stream")
        .match_body("iVBORw0KGgo=")
        .with_status(201)
        .with_header("etag", r#""att1""#)
        .with_body(r#"{"name": "logo.png", "path": "/.attachments/logo.png"}"#)
        .create();

    let png_header = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];
    let attachment = client(&server)
        .create_attachment(WIKI, "logo.png", &png_header, None)
        .unwrap();

    mock.assert();
    assert_eq!(attachment.path, "/.attachments/logo.png");
    assert_eq!(attachment.etag.as_deref(), Some("att1"));
}

#[test]
fn test_create_page_move() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", wikis_path(&format!("{WIKI}/pagemoves")).as_str())
        .match_query(query(&[("api-version", "7.1-preview.1"), ("comment", "reorganize")]))
        .match_body(Matcher::Json(json!({"path": "/Old", "newPath": "/Archive/Old", "newOrder": 2})))
        .with_status(201)
        .with_header("etag", r#""m1""#)
        .with_body(
            json!({
                "path": "/Old",
                "newPath": "/Archive/Old",
                "newOrder": 2,
                "page": {"id": 9, "path": "/Archive/Old"}
            })
            .to_string(),
        )
        .create();

    let params = WikiPageMoveParameters {
        path: "/Old".to_owned(),
        new_path: "/Archive/Old".to_owned(),
        new_order: Some(2),
    };
    let moved = client(&server)
        .create_page_move(WIKI, &params, &PageWriteOptions::with_comment("reorganize"))
        .unwrap();

    mock.assert();
    assert_eq!(moved.new_path, "/Archive/Old");
    assert_eq!(moved.etag.as_deref(), Some("m1"));
    assert_eq!(moved.page.unwrap().id, Some(9));
}

#[test]
fn test_content_round_trips_through_write_and_text_read() {
    let content = "# Quotes \"here\" and 'there'\r\nPath C:\\docs\\wiki\r\n\nÜber naïve 日本語 🚀\n";
    let mut server = mockito::Server::new();
    let write = server
        .mock("PUT", pages_path("").as_str())
        .match_query(query(&[("api-version", "7.1-preview.1"), ("path", "/Notes")]))
        .match_body(Matcher::Json(json!({ "content": content })))
        .with_status(201)
        .with_header("etag", r#""1""#)
        .with_body(page_json(11, "/Notes"))
        .create();
    let read = server
        .mock("GET", pages_path("11").as_str())
        .match_query(api_version("7.1-preview.1"))
        .match_header("accept", "text/plain")
        .with_header("content-type", "text/plain; charset=utf-8")
        .with_body(content)
        .create();

    let client = client(&server);
    let page = client
        .create_or_update_page(WIKI, "/Notes", content, None, &PageWriteOptions::default())
        .unwrap();
    let text = client.get_page_text(WIKI, page.id.unwrap()).unwrap();

    write.assert();
    read.assert();
    assert_eq!(text, content);
}

#[test]
fn test_page_text_larger_than_ten_mib() {
    let line = "Lorem ipsum dolor sit amet, consectetur adipiscing elit.\n";
    let content = line.repeat((11 * 1024 * 1024) / line.len() + 1);
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", pages_path("3").as_str())
        .match_query(Matcher::Any)
        .with_body(&content)
        .create();

    let text = client(&server).get_page_text(WIKI, 3).unwrap();

    assert_eq!(text.len(), content.len());
    assert!(text == content);
}

#[test]
fn test_redirect_is_status_error_and_not_followed() {
    let mut server = mockito::Server::new();
    let page = server
        .mock("GET", pages_path("").as_str())
        .match_query(Matcher::Any)
        .with_status(302)
        .with_header("location", "/_signin")
        .with_body("")
        .create();
    let sign_in = server
        .mock("GET", "/_signin")
        .match_query(Matcher::Any)
        .with_body("<html>Sign in</html>")
        .expect(0)
        .create();

    let err = client(&server)
        .get_page(WIKI, "/Home", &PageQuery::default())
        .unwrap_err();

    page.assert();
    sign_in.assert();
    assert_eq!(err.kind(), WikiErrorKind::Status);
    assert_eq!(err.status(), Some(302));
    assert_eq!(err.operation(), Some("get_page"));
}
