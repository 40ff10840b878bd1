//! Turns a matched [`Mapping`] into an HTTP response (spec §4.4).

use axum::body::Body;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use doppelganger::config::{Content, Mapping};
use tokio_util::io::ReaderStream;

pub async fn emit_mapping(mapping: &Mapping) -> Response {
	let status = StatusCode::from_u16(mapping.resp_code).unwrap_or(StatusCode::OK);

	match &mapping.content {
		None => status.into_response(),
		Some(Content::Json(data)) => {
			let body = match serde_json::to_vec(data) {
				Ok(bytes) => bytes,
				Err(err) => {
					tracing::error!(error = %err, "failed to serialize JSON content");
					return StatusCode::INTERNAL_SERVER_ERROR.into_response();
				}
			};
			(status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
		}
		Some(Content::File(path)) => match emit_file(path, status).await {
			Ok(response) => response,
			Err(err) => {
				// Missing/unreadable content files are a server-side fault, not the
				// caller's, so they surface as 500 rather than 404 (OQ-3).
				tracing::error!(error = %err, path = %path.display(), "failed to serve FILE content");
				StatusCode::INTERNAL_SERVER_ERROR.into_response()
			}
		},
	}
}

async fn emit_file(path: &std::path::Path, status: StatusCode) -> std::io::Result<Response> {
	let file = fs_err::tokio::File::open(path).await?;
	let mime = mime_guess::from_path(path).first_or_octet_stream();
	let body = Body::from_stream(ReaderStream::new(file));
	Ok((status, [(header::CONTENT_TYPE, mime.essence_str().to_string())], body).into_response())
}
