//! Product Identification Endpoint
//!
//! Accepts a multipart image upload, tries the catalog filename match
//! first, and falls back to the configured cloud providers.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use snapfind_catalog::find_product;
use snapfind_core::Product;
use snapfind_understanding::{detect_labels, generate_text};

use crate::server::GatewayState;

/// How an identification was produced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum IdentifySource {
    Catalog,
    Vision,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifyResponse {
    pub source: IdentifySource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// One uploaded image, pulled out of the multipart body.
struct Upload {
    filename: String,
    mime_type: String,
    bytes: Vec<u8>,
}

/// Handler for `POST /api/identify`.
pub async fn identify(State(state): State<GatewayState>, multipart: Multipart) -> Response {
    let request_id = Uuid::new_v4();

    let upload = match read_upload(multipart).await {
        Ok(upload) => upload,
        Err((status, message)) => return error_response(status, message),
    };

    info!(
        request_id = %request_id,
        filename = %upload.filename,
        size = upload.bytes.len(),
        "Identify request"
    );

    // Catalog pass: a filename hit short-circuits without any cloud call.
    if let Some(product) = find_product(&upload.filename, &state.catalog) {
        info!(request_id = %request_id, product = %product.name, "Catalog match");
        let description = product
            .description
            .clone()
            .unwrap_or_else(|| product.name.clone());
        return Json(IdentifyResponse {
            source: IdentifySource::Catalog,
            product: Some(product.clone()),
            labels: None,
            description,
        })
        .into_response();
    }

    let Some(label_provider) = &state.labels else {
        return error_response(
            StatusCode::NOT_FOUND,
            "No catalog match and no vision provider configured",
        );
    };

    let labels = match detect_labels(label_provider, &upload.bytes, &upload.mime_type).await {
        Ok(labels) => labels,
        Err(e) => {
            warn!(request_id = %request_id, error = %e, "Label detection failed");
            return error_response(
                StatusCode::BAD_GATEWAY,
                format!("label detection failed: {e}"),
            );
        }
    };

    if labels.is_empty() {
        return error_response(StatusCode::NOT_FOUND, "No products recognized in the image");
    }

    let description = match &state.generation {
        Some(provider) => {
            match generate_text(provider, &description_prompt(&labels)).await {
                Ok(text) => text,
                Err(e) => {
                    warn!(request_id = %request_id, error = %e, "Description generation failed");
                    return error_response(
                        StatusCode::BAD_GATEWAY,
                        format!("description generation failed: {e}"),
                    );
                }
            }
        }
        // No generation provider: the joined labels are the description.
        None => labels.join(", "),
    };

    Json(IdentifyResponse {
        source: IdentifySource::Vision,
        product: None,
        labels: Some(labels),
        description,
    })
    .into_response()
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Pull the `file` field out of the multipart body.
async fn read_upload(mut multipart: Multipart) -> Result<Upload, (StatusCode, &'static str)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| (StatusCode::BAD_REQUEST, "Malformed multipart body"))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        if filename.is_empty() {
            return Err((StatusCode::BAD_REQUEST, "No selected file"));
        }

        // Prefer the part's own content type; derive from the filename
        // when the client sent none.
        let mime_type = field
            .content_type()
            .filter(|ct| ct.starts_with("image/"))
            .map(str::to_string)
            .unwrap_or_else(|| mime_for_filename(&filename).to_string());

        let bytes = field
            .bytes()
            .await
            .map_err(|_| (StatusCode::BAD_REQUEST, "Malformed multipart body"))?
            .to_vec();

        return Ok(Upload {
            filename,
            mime_type,
            bytes,
        });
    }

    Err((StatusCode::BAD_REQUEST, "No file part"))
}

/// Best-effort image MIME type from the upload's filename extension.
fn mime_for_filename(filename: &str) -> &'static str {
    let ext = match filename.rsplit_once('.') {
        Some((_, ext)) => ext.to_lowercase(),
        None => String::new(),
    };

    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png"          => "image/png",
        "gif"          => "image/gif",
        "webp"         => "image/webp",
        "bmp"          => "image/bmp",
        "tiff" | "tif" => "image/tiff",
        // Fallback hint for unknown extensions; forwarded to the provider
        // only, never used to reject an upload.
        _              => "image/jpeg",
    }
}

fn description_prompt(labels: &[String]) -> String {
    format!(
        "A shopper photographed an item identified by these labels: {}. \
         Write one short sentence describing the item for a marketplace listing.",
        labels.join(", ")
    )
}
