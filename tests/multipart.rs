//! Multipart upload protocol against a mock artifact store.

use astore_client::{Client, CompletedPart, Config, UploadOptions};
use httptest::{Expectation, Server, matchers::*, responders::*};
use serde_json::json;

fn client(server: &Server) -> Client {
    Client::new(Config::new(server.url_str("/"))).unwrap()
}

#[tokio::test]
async fn initiate_sends_uploads_marker_and_decodes_upload_id() {
    let server = Server::run();
    server.expect(
        Expectation::matching(all_of![
            request::method_path("POST", "/s3/demo/big.bin"),
            request::query(url_decoded(contains(("uploads", "")))),
            request::headers(contains(("content-type", "application/octet-stream"))),
            request::headers(contains(("x-amz-meta-build", "42"))),
        ])
        .times(1)
        .respond_with(json_encoded(json!({"uploadId": "upl-123"}))),
    );

    let opts = UploadOptions {
        metadata: [("build".to_string(), "42".to_string())].into(),
        ..Default::default()
    };
    let upload = client(&server)
        .initiate_multipart_upload("demo", "big.bin", opts)
        .await
        .unwrap();
    assert_eq!(upload.upload_id, "upl-123");
    assert_eq!(upload.bucket, "demo");
    assert_eq!(upload.key, "big.bin");
}

#[tokio::test]
async fn upload_part_returns_quote_stripped_etag() {
    let server = Server::run();
    server.expect(
        Expectation::matching(all_of![
            request::method_path("PUT", "/s3/demo/big.bin"),
            request::query(url_decoded(contains(("uploadId", "upl-123")))),
            request::query(url_decoded(contains(("partNumber", "1")))),
            request::body("part one data"),
        ])
        .times(1)
        .respond_with(status_code(200).append_header("ETag", "\"etag-1\"")),
    );

    let etag = client(&server)
        .upload_part("demo", "big.bin", "upl-123", 1, &b"part one data"[..], 13)
        .await
        .unwrap();
    assert_eq!(etag, "etag-1");
}

#[tokio::test]
async fn complete_sends_parts_in_caller_order() {
    let server = Server::run();
    server.expect(
        Expectation::matching(all_of![
            request::method_path("POST", "/s3/demo/big.bin"),
            request::query(url_decoded(contains(("uploadId", "upl-123")))),
            request::body(json_decoded(eq(json!({
                "parts": [
                    {"partNumber": 1, "etag": "etag-1"},
                    {"partNumber": 2, "etag": "etag-2"}
                ]
            })))),
        ])
        .times(1)
        .respond_with(status_code(200)),
    );

    let parts = vec![
        CompletedPart {
            part_number: 1,
            etag: "etag-1".to_string(),
        },
        CompletedPart {
            part_number: 2,
            etag: "etag-2".to_string(),
        },
    ];
    client(&server)
        .complete_multipart_upload("demo", "big.bin", "upl-123", &parts)
        .await
        .unwrap();
}

#[tokio::test]
async fn abort_issues_delete_with_upload_id() {
    let server = Server::run();
    server.expect(
        Expectation::matching(all_of![
            request::method_path("DELETE", "/s3/demo/big.bin"),
            request::query(url_decoded(contains(("uploadId", "upl-123")))),
        ])
        .times(1)
        .respond_with(status_code(204)),
    );

    client(&server)
        .abort_multipart_upload("demo", "big.bin", "upl-123")
        .await
        .unwrap();
}

#[tokio::test]
async fn full_sequence_initiate_parts_complete() {
    let server = Server::run();
    server.expect(
        Expectation::matching(all_of![
            request::method_path("POST", "/s3/demo/movie.mp4"),
            request::query(url_decoded(contains(("uploads", "")))),
        ])
        .times(1)
        .respond_with(json_encoded(json!({"uploadId": "upl-777"}))),
    );
    server.expect(
        Expectation::matching(all_of![
            request::method_path("PUT", "/s3/demo/movie.mp4"),
            request::query(url_decoded(contains(("partNumber", "1")))),
        ])
        .times(1)
        .respond_with(status_code(200).append_header("ETag", "\"p1\"")),
    );
    server.expect(
        Expectation::matching(all_of![
            request::method_path("PUT", "/s3/demo/movie.mp4"),
            request::query(url_decoded(contains(("partNumber", "2")))),
        ])
        .times(1)
        .respond_with(status_code(200).append_header("ETag", "\"p2\"")),
    );
    server.expect(
        Expectation::matching(all_of![
            request::method_path("POST", "/s3/demo/movie.mp4"),
            request::query(url_decoded(contains(("uploadId", "upl-777")))),
            request::body(json_decoded(eq(json!({
                "parts": [
                    {"partNumber": 1, "etag": "p1"},
                    {"partNumber": 2, "etag": "p2"}
                ]
            })))),
        ])
        .times(1)
        .respond_with(status_code(200)),
    );

    let client = client(&server);
    let upload = client
        .initiate_multipart_upload("demo", "movie.mp4", UploadOptions::default())
        .await
        .unwrap();

    let mut parts = Vec::new();
    for (number, chunk) in [(1u32, &b"first half"[..]), (2, &b"second half"[..])] {
        let etag = client
            .upload_part(
                &upload.bucket,
                &upload.key,
                &upload.upload_id,
                number,
                chunk,
                chunk.len() as u64,
            )
            .await
            .unwrap();
        parts.push(CompletedPart {
            part_number: number,
            etag,
        });
    }

    client
        .complete_multipart_upload(&upload.bucket, &upload.key, &upload.upload_id, &parts)
        .await
        .unwrap();
}
