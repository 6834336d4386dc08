use axum::response::Response;
use http_body_util::BodyExt;
use rand::RngCore;

/// Multipart boundary used by the upload body builder
pub const BOUNDARY: &str = "fanhub-test-boundary";

/// Parse response body to JSON
pub async fn parse_response_body(response: Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// Generate random image bytes for upload tests
pub fn generate_test_image(size: usize) -> Vec<u8> {
    let mut buf = vec![0u8; size];
    rand::rngs::OsRng.fill_bytes(&mut buf);
    buf
}

/// Build a multipart body from optional `image`, `caption`, and `userId`
/// parts, matching what the gallery upload form sends
pub fn upload_body(image: Option<&[u8]>, caption: Option<&str>, user_id: Option<&str>) -> Vec<u8> {
    let mut body = Vec::new();

    if let Some(bytes) = image {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; \
                 filename=\"fan.png\"\r\nContent-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    if let Some(caption) = caption {
        push_text_field(&mut body, "caption", caption);
    }
    if let Some(user_id) = user_id {
        push_text_field(&mut body, "userId", user_id);
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    body
}

fn push_text_field(body: &mut Vec<u8>, name: &str, value: &str) {
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        )
        .as_bytes(),
    );
}
