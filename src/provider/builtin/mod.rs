//! Built-in route providers
//!
//! These cover the endpoint shapes route modules typically need (fixed JSON
//! documents, short-link redirects, pure text utilities) without any upstream
//! integration.

pub mod redirect;
pub mod static_json;
pub mod text_tools;

use std::sync::Arc;

use crate::provider::RouteProvider;

pub use redirect::RedirectProvider;
pub use self_test::SelfTestProvider;
pub use static_json::StaticJsonProvider;
pub use text_tools::TextToolsProvider;

/// Every built-in provider, in registration order
pub fn all() -> Vec<Arc<dyn RouteProvider>> {
    vec![
        Arc::new(StaticJsonProvider),
        Arc::new(RedirectProvider),
        Arc::new(TextToolsProvider),
        Arc::new(SelfTestProvider),
    ]
}
