//! Short-code redirects from a fixed link table

use axum::{
    extract::Path,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::AppError;
use crate::provider::{MountContext, ProviderError, RouteProvider, RouteSpec};

/// Mounts `GET {base}/:code` redirecting to the configured target
pub struct RedirectProvider;

#[derive(Debug, Deserialize)]
struct RedirectOptions {
    #[serde(default = "default_base")]
    base: String,
    #[serde(default)]
    permanent: bool,
    links: BTreeMap<String, String>,
}

fn default_base() -> String {
    "/s".to_string()
}

impl RouteProvider for RedirectProvider {
    fn name(&self) -> &str {
        "redirect"
    }

    fn description(&self) -> &str {
        "Short-code redirects"
    }

    fn routes(&self, ctx: &MountContext<'_>) -> Result<Vec<RouteSpec>, ProviderError> {
        let options: RedirectOptions = ctx.options()?;

        for (code, target) in &options.links {
            if code.is_empty() || code.contains('/') {
                return Err(ProviderError::InvalidOptions(format!(
                    "invalid short code '{}'",
                    code
                )));
            }
            if !(target.starts_with("http://") || target.starts_with("https://")) {
                return Err(ProviderError::InvalidOptions(format!(
                    "target for '{}' must be an absolute http(s) URL",
                    code
                )));
            }
        }

        let links = Arc::new(options.links);
        let permanent = options.permanent;
        let path = format!("{}/:code", options.base.trim_end_matches('/'));

        let handler = move |Path(code): Path<String>| {
            let links = links.clone();
            async move { resolve(&links, &code, permanent) }
        };

        Ok(vec![RouteSpec::get(path, handler)])
    }
}

fn resolve(
    links: &BTreeMap<String, String>,
    code: &str,
    permanent: bool,
) -> Result<Response, AppError> {
    let target = links
        .get(code)
        .ok_or_else(|| AppError::NotFound(format!("Short code '{}'", code)))?;

    let redirect = if permanent {
        Redirect::permanent(target)
    } else {
        Redirect::temporary(target)
    };
    Ok(redirect.into_response())
}
