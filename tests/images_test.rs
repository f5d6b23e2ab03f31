//! Integration tests for image upload and images → PDF.

mod common;

use common::{post_json, upload, TestHarness, ToolCall};
use serde_json::json;

async fn upload_three(addr: std::net::SocketAddr) -> Vec<String> {
    let body = upload(
        addr,
        "/upload_images",
        "images",
        &[("one.png", b"1"), ("two.png", b"2"), ("three.png", b"3")],
    )
    .await;
    body["images"]
        .as_array()
        .unwrap()
        .iter()
        .map(|img| img["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn upload_returns_public_urls() {
    let (_h, addr) = TestHarness::with_server().await;
    let body = upload(addr, "/upload_images", "images", &[("cover.jpg", b"jpeg-bytes")]).await;

    let image = &body["images"][0];
    let id = image["id"].as_str().unwrap();
    assert_eq!(image["url"], format!("/uploads/{id}/cover.jpg"));

    let served = reqwest::get(format!("http://{addr}/uploads/{id}/cover.jpg"))
        .await
        .unwrap();
    assert_eq!(served.status(), 200);
    assert_eq!(&served.bytes().await.unwrap()[..], b"jpeg-bytes");
}

#[tokio::test]
async fn pages_are_sorted_by_order() {
    let (h, addr) = TestHarness::with_server().await;
    let ids = upload_three(addr).await;

    let (status, body) = post_json(
        addr,
        "/images_pdf",
        json!({
            "items": [
                {"id": ids[0], "order": 3},
                {"id": ids[1], "order": 1},
                {"id": ids[2], "order": 2},
            ],
            "out_name": "album"
        }),
    )
    .await;
    assert_eq!(status, 200, "{body}");
    assert_eq!(body["count"], 3);
    assert_eq!(body["pdf_url"], "/download/album.pdf");

    match &h.toolkit.calls()[..] {
        [ToolCall::AssemblePdf { images, .. }] => {
            let order: Vec<_> = images
                .iter()
                .map(|p| {
                    let s = p.to_string_lossy();
                    ids.iter().position(|id| s.contains(id.as_str())).unwrap()
                })
                .collect();
            assert_eq!(order, vec![1, 2, 0]);
        }
        calls => panic!("unexpected calls: {calls:?}"),
    }
}

#[tokio::test]
async fn blank_out_name_gets_generated_name() {
    let (_h, addr) = TestHarness::with_server().await;
    let ids = upload_three(addr).await;

    let (status, body) = post_json(
        addr,
        "/images_pdf",
        json!({"items": [{"id": ids[0], "order": 0}], "out_name": "  "}),
    )
    .await;
    assert_eq!(status, 200);
    let url = body["pdf_url"].as_str().unwrap();
    assert!(url.starts_with("/download/images_"), "{url}");
    assert!(url.ends_with(".pdf"));
}

#[tokio::test]
async fn unknown_image_aborts_batch() {
    let (h, addr) = TestHarness::with_server().await;
    let ids = upload_three(addr).await;

    let (status, body) = post_json(
        addr,
        "/images_pdf",
        json!({"items": [{"id": ids[0], "order": 0}, {"id": "ffffffffffffffff", "order": 1}]}),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "unknown image id: ffffffffffffffff");
    assert!(h.toolkit.calls().is_empty());
}
