use crate::error::ConversionError;
use crate::models::ConversionResult;
use crate::startup::AppState;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::Json;

/// `POST /api/pixelate`: one multipart `image` file in, one generated image out.
///
/// Configuration is checked before the body is read. A request that is not
/// multipart at all is treated the same as one without a file.
pub async fn pixelate(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ConversionResult>, ConversionError> {
    state.gateway.ensure_configured()?;

    let upload = match multipart {
        Ok(multipart) => state.uploads.receive(multipart).await.map_err(|e| {
            tracing::warn!(error = %e, "Upload rejected");
            ConversionError::from(e)
        })?,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Request body is not multipart");
            None
        }
    };

    let image = state.gateway.convert(upload).await?;

    Ok(Json(image.into()))
}
