use std::time::Duration;

use tracing_subscriber::{fmt, EnvFilter};

/// Truthy env flag: `1`, `true`, `yes` or `on` (case-insensitive).
pub fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| {
            let v = v.trim().to_ascii_lowercase();
            v == "1" || v == "true" || v == "yes" || v == "on"
        })
        .unwrap_or(false)
}

/// Load the env file, then install the tracing subscriber based on RUST_LOG.
///
/// Env file lookup order:
/// - explicit path in ENV_FILE or DOTENV_PATH
/// - `.env` discovered from the working directory upward (dotenvy default)
///
/// Existing process variables are never overwritten.
pub fn init_tracing() {
    let mut env_source: String = "none".into();
    for key in ["ENV_FILE", "DOTENV_PATH"] {
        if let Ok(p) = std::env::var(key) {
            let p = p.trim();
            if !p.is_empty()
                && std::path::Path::new(p).is_file()
                && dotenvy::from_filename(p).is_ok()
            {
                env_source = format!("{p} ({key})");
                break;
            }
        }
    }

    if env_source == "none" {
        if let Ok(path) = dotenvy::dotenv() {
            env_source = path.display().to_string();
        }
    }

    // RUST_LOG may come from the env file loaded above
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=info".into());
    let subscriber = fmt().with_env_filter(EnvFilter::new(filter)).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    tracing::info!("Environment loaded from: {}", env_source);
}

/// Get the bind address for the HTTP server from env or default to 0.0.0.0:8088.
pub fn env_bind_addr() -> String {
    std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8088".into())
}

/// Build the outbound HTTP client honoring timeout and proxy environment variables.
///
/// Environment:
/// - FORMSMITH_HTTP_TIMEOUT_SECONDS        -> overall request timeout (u64); unset = reqwest default
/// - FORMSMITH_NO_PROXY = 1|true|yes|on    -> disable all proxies (including system ones)
/// - FORMSMITH_PROXY_URL = <url>           -> proxy for all schemes
///
/// A timeout surfaces as a transport error and is reported like any other failed call.
pub fn build_http_client_from_env() -> reqwest::Client {
    let mut builder = reqwest::Client::builder();

    if let Ok(secs) = std::env::var("FORMSMITH_HTTP_TIMEOUT_SECONDS") {
        if let Ok(n) = secs.trim().parse::<u64>() {
            builder = builder.timeout(Duration::from_secs(n));
        }
    }

    if env_flag("FORMSMITH_NO_PROXY") {
        builder = builder.no_proxy();
    } else if let Ok(url) = std::env::var("FORMSMITH_PROXY_URL") {
        let u = url.trim();
        if !u.is_empty() {
            match reqwest::Proxy::all(u) {
                Ok(p) => builder = builder.proxy(p),
                Err(e) => tracing::warn!(error = %e, "ignoring invalid FORMSMITH_PROXY_URL"),
            }
        }
    }

    builder = builder.user_agent(format!("formsmith/{}", env!("CARGO_PKG_VERSION")));

    builder.build().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "falling back to default HTTP client");
        reqwest::Client::new()
    })
}

/// Split a comma-separated env value, dropping empty items. `None` when unset or `*`.
fn env_list(name: &str) -> Option<Vec<String>> {
    let raw = std::env::var(name).ok()?;
    let s = raw.trim();
    if s == "*" {
        return None;
    }
    let items: Vec<String> = s
        .split(',')
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect();
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

/// Build a CORS layer from environment variables.
///
/// Environment variables:
/// - CORS_ALLOWED_ORIGINS: "*" or comma-separated origins (e.g., "https://a.com, https://b.com")
/// - CORS_ALLOWED_METHODS: "*" or comma-separated methods (e.g., "GET,POST,OPTIONS")
/// - CORS_ALLOWED_HEADERS: "*" or comma-separated request header names
/// - CORS_ALLOW_CREDENTIALS: enable with 1,true,yes,on
/// - CORS_MAX_AGE: max age in seconds (u64)
///
/// Unset (or unparseable) values are permissive (Any).
pub fn cors_layer_from_env() -> tower_http::cors::CorsLayer {
    use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};

    let mut layer = CorsLayer::new();

    let origins: Vec<http::HeaderValue> = env_list("CORS_ALLOWED_ORIGINS")
        .unwrap_or_default()
        .iter()
        .filter_map(|o| http::HeaderValue::from_str(o).ok())
        .collect();
    let mut all_explicit = !origins.is_empty();
    layer = if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(origins))
    };

    let methods: Vec<http::Method> = env_list("CORS_ALLOWED_METHODS")
        .unwrap_or_default()
        .iter()
        .filter_map(|m| http::Method::from_bytes(m.to_ascii_uppercase().as_bytes()).ok())
        .collect();
    all_explicit &= !methods.is_empty();
    layer = if methods.is_empty() {
        layer.allow_methods(Any)
    } else {
        layer.allow_methods(AllowMethods::list(methods))
    };

    let headers: Vec<http::header::HeaderName> = env_list("CORS_ALLOWED_HEADERS")
        .unwrap_or_default()
        .iter()
        .filter_map(|h| http::header::HeaderName::try_from(h.as_str()).ok())
        .collect();
    all_explicit &= !headers.is_empty();
    layer = if headers.is_empty() {
        layer.allow_headers(Any)
    } else {
        layer.allow_headers(AllowHeaders::list(headers))
    };

    // tower-http rejects credentials combined with any wildcard setting.
    if env_flag("CORS_ALLOW_CREDENTIALS") {
        if all_explicit {
            layer = layer.allow_credentials(true);
        } else {
            tracing::warn!(
                "CORS_ALLOW_CREDENTIALS ignored: origins, methods and headers must all be explicit lists"
            );
        }
    }

    if let Ok(secs) = std::env::var("CORS_MAX_AGE") {
        if let Ok(n) = secs.trim().parse::<u64>() {
            layer = layer.max_age(Duration::from_secs(n));
        }
    }

    layer
}
