//! Conversation handlers: session history, streamed replies, chat,
//! templates and uploads

use super::{ApiError, AppState};
use crate::chat::{invoke_chat, ChatReply, ChatRequest};
use crate::reply::ChannelSink;
use crate::session::Message;
use axum::{
    body::Body,
    extract::{multipart::MultipartError, rejection::JsonRejection, Multipart, Path, Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use futures::StreamExt;
use serde::Deserialize;
use serde_json::{json, Value};
use std::convert::Infallible;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

/// Query for the plugin-mode history route
#[derive(Debug, Deserialize)]
pub struct SessionQuery {
    pub session_id: Option<String>,
}

/// `GET /api/fetch-messages/:session_id`
pub async fn fetch_messages(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Json<Value> {
    let messages = state.sessions.get(&session_id).await;
    Json(json!({ "messages": messages }))
}

/// `GET /workspace/fetch_messages_by_id?session_id=...`
///
/// Returns the bare message list; a missing id yields an empty list.
pub async fn fetch_messages_by_query(
    State(state): State<AppState>,
    Query(query): Query<SessionQuery>,
) -> Json<Vec<Message>> {
    match query.session_id {
        Some(id) => Json(state.sessions.get(&id).await),
        None => Json(Vec::new()),
    }
}

/// `POST /api/workflow-gen`
///
/// Streams the reply as newline-delimited JSON. The emitter runs in its own
/// task; when the client goes away the body is dropped, the next push fails
/// and the task ends without recording the message.
pub async fn workflow_gen(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload?;

    let (tx, rx) = mpsc::channel(state.stream_capacity.max(1));
    let emitter = Arc::clone(&state.emitter);
    tokio::spawn(async move {
        let mut sink = ChannelSink::new(tx);
        if let Err(e) = emitter
            .emit(&request.session_id, &request.message, &mut sink)
            .await
        {
            tracing::debug!(session_id = %request.session_id, "Emitter stopped: {}", e);
        }
    });

    let body = Body::from_stream(ReceiverStream::new(rx).map(Ok::<_, Infallible>));
    let mut response = body.into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    Ok(response)
}

/// `POST /api/chat`
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, ApiError> {
    let Json(request) = payload?;
    Ok(Json(invoke_chat(state.sessions.as_ref(), &request).await))
}

/// `GET /api/templates`
pub async fn templates(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let templates = state.catalog.load().await?;
    Ok(Json(json!({ "templates": templates })))
}

/// `POST /api/upload` with a multipart `file` field
///
/// The exact file size limit is enforced by the upload store; a body cut
/// off by the route's byte limit reports the same message.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let limit = state.upload_limit;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field.bytes().await.map_err(|e| multipart_error(e, limit))?;
        let url = state.uploads.store(&filename, &data).await?;
        return Ok(Json(json!({ "url": url })));
    }

    Err(ApiError::BadRequest("file field is required".to_string()))
}

fn multipart_error(err: MultipartError, limit: usize) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::BadRequest(format!("File exceeds upload limit of {} bytes", limit))
    } else {
        err.into()
    }
}
