use hyper::Method;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Health,
    SearchSongs { mood: Option<String> },
    Analyze { text: Option<String> },
    Recommendations { text: Option<String> },
    Preflight,
    MethodNotAllowed,
    NotFound,
}

/// Decodes `a=1&b=two+words` into a map. Later duplicates win.
pub fn parse_query(query: Option<&str>) -> HashMap<String, String> {
    query
        .unwrap_or("")
        .split('&')
        .filter(|kv| !kv.is_empty())
        .filter_map(|kv| {
            let mut parts = kv.splitn(2, '=');
            let key = decode(parts.next()?)?;
            let value = decode(parts.next().unwrap_or(""))?;
            Some((key, value))
        })
        .collect()
}

fn decode(raw: &str) -> Option<String> {
    urlencoding::decode(&raw.replace('+', " "))
        .ok()
        .map(|s| s.into_owned())
}

pub fn map_request_to_route(method: &Method, path: &str, query: Option<&str>) -> Route {
    let path = match path.strip_suffix('/') {
        Some(trimmed) if !trimmed.is_empty() => trimmed,
        _ => path,
    };
    let known = matches!(
        path,
        "/api/health" | "/api/search-songs" | "/api/analyze" | "/api/recommendations"
    );
    if !known {
        return Route::NotFound;
    }
    if *method == Method::OPTIONS {
        return Route::Preflight;
    }
    if *method != Method::GET {
        return Route::MethodNotAllowed;
    }

    let mut params = parse_query(query);
    match path {
        "/api/health" => Route::Health,
        "/api/search-songs" => Route::SearchSongs {
            mood: params.remove("mood"),
        },
        "/api/analyze" => Route::Analyze {
            text: params.remove("text"),
        },
        "/api/recommendations" => Route::Recommendations {
            text: params.remove("text"),
        },
        _ => Route::NotFound,
    }
}
