//! HTTP request handlers
//!
//! Every request lands in [`dispatch`], which walks the mount table and turns
//! the resolved resource into a response.

use crate::core::resource::{Body, Resolved};
use crate::server::state::AppState;
use crate::utils::error::ProviderError;
use actix_files::NamedFile;
use actix_web::http::Method;
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Name of the catch-all path parameter, see the route in `create_app`
pub const TAIL: &str = "tail";

/// Catch-all handler: `GET`/`HEAD` only, 404 for anything unresolved.
pub async fn dispatch(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ProviderError> {
    if !matches!(*req.method(), Method::GET | Method::HEAD) {
        return Err(ProviderError::method_not_allowed(req.method().as_str()));
    }

    let path = req.match_info().query(TAIL).to_string();
    debug!(path = %path, method = %req.method(), "Dispatching request");

    // Resolution canonicalizes and stats paths on disk.
    let mounts = Arc::clone(&state.mounts);
    let resolved = web::block(move || mounts.resolve(&path))
        .await
        .map_err(|e| ProviderError::internal(format!("resolver task failed: {}", e)))?;

    let resolved = match resolved {
        Ok(Some(resolved)) => resolved,
        Ok(None) => return Err(ProviderError::not_found(req.path())),
        Err(e) => {
            error!(path = %req.path(), error = %e, "Failed to resolve request");
            return Err(e.into());
        }
    };

    respond(&req, resolved).await
}

async fn respond(req: &HttpRequest, resolved: Resolved) -> Result<HttpResponse, ProviderError> {
    let Resolved {
        body,
        content_type,
        headers,
    } = resolved;

    let mut response = match body {
        Body::File(path) => {
            let file = NamedFile::open_async(&path).await.map_err(|e| {
                error!(path = %path.display(), error = %e, "Failed to open registered file");
                ProviderError::from(e)
            })?;
            file.set_content_type(content_type)
                .disable_content_disposition()
                .use_etag(false)
                .use_last_modified(false)
                .into_response(req)
        }
        Body::Bytes(bytes) => HttpResponse::Ok()
            .content_type(content_type.to_string())
            .body(bytes),
    };

    for (name, value) in headers {
        match (HeaderName::try_from(name), HeaderValue::try_from(value)) {
            (Ok(name), Ok(value)) => {
                response.headers_mut().insert(name, value);
            }
            _ => warn!("Skipping invalid resource header"),
        }
    }

    Ok(response)
}
