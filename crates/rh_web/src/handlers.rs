use axum::body::Bytes;
use axum::http::{header, HeaderMap};
use axum::{extract::State, Json};
use rh_core::{ArticlesEnvelope, SiteConfig, SiteConfigUpdate, SiteConfigUpdated};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use crate::{ApiError, AppState};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PingResponse {
    pub message: String,
}

pub async fn ping(State(state): State<Arc<AppState>>) -> Json<PingResponse> {
    Json(PingResponse {
        message: state.ping_message.clone(),
    })
}

pub async fn list_articles(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ArticlesEnvelope>, ApiError> {
    let dataset = state.cache.get().await?;
    let site_config = state.site_config.snapshot().await;
    Ok(Json(ArticlesEnvelope {
        articles: dataset.articles.clone(),
        categories: dataset.categories.clone(),
        site_config,
    }))
}

pub async fn get_site_config(State(state): State<Arc<AppState>>) -> Json<SiteConfig> {
    Json(state.site_config.snapshot().await)
}

pub async fn update_site_config(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<SiteConfigUpdated>, ApiError> {
    let update = SiteConfigUpdate::from_value(&parse_body(&headers, &body));
    let section = update.section_name()?;
    let data = state.site_config.update(section, &update.patch()).await;
    Ok(Json(SiteConfigUpdated {
        message: "Site config updated successfully".to_string(),
        data,
    }))
}

/// Decodes a form or JSON body. Anything unreadable becomes `Null`, which
/// carries no section and is rejected as such.
fn parse_body(headers: &HeaderMap, body: &[u8]) -> Value {
    let is_form = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

    if is_form {
        let fields: Map<String, Value> = url::form_urlencoded::parse(body)
            .map(|(k, v)| (k.into_owned(), Value::String(v.into_owned())))
            .collect();
        return Value::Object(fields);
    }

    serde_json::from_slice(body).unwrap_or(Value::Null)
}
