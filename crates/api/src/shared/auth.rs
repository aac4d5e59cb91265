use crate::error::ParkvaktError;
use actix_web::HttpRequest;
use parkvakt_infra::ParkvaktContext;

/// Protects the sweep trigger route. The external cron caller must present
/// the shared secret as a bearer token; who runs the cron is not this
/// service's concern.
pub fn protect_cron_route(
    http_req: &HttpRequest,
    ctx: &ParkvaktContext,
) -> Result<(), ParkvaktError> {
    let token = http_req
        .headers()
        .get("Authorization")
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .ok_or_else(|| {
            ParkvaktError::Unauthorized(
                "Missing or malformed Authorization bearer header".to_string(),
            )
        })?;

    if token != ctx.config.cron_secret {
        return Err(ParkvaktError::Unauthorized(
            "The provided cron secret is not valid".to_string(),
        ));
    }
    Ok(())
}
