use axum::{extract::State, response::IntoResponse};
use std::sync::Arc;

use crate::api::{ApiPath, DataResponse};
use crate::app::AppState;
use crate::domain::{MarkReadResponse, NotificationListResponse};
use crate::error::{ApiError, ApiResult};

/// List notifications, newest first
pub async fn list_notifications(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let store = state.store.read();
    DataResponse::new(NotificationListResponse {
        notifications: store.notifications.clone(),
        unread_count: store.unread_count(),
    })
}

/// Mark a notification as read
pub async fn mark_read(
    State(state): State<Arc<AppState>>,
    ApiPath(notification_id): ApiPath<String>,
) -> ApiResult<impl IntoResponse> {
    let notification = state
        .store
        .write()
        .mark_notification_read(&notification_id)
        .ok_or_else(|| {
            ApiError::NotFound(format!("Notification {} not found", notification_id))
        })?;

    Ok(DataResponse::new(notification))
}

/// Mark all notifications as read
pub async fn mark_all_read(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let updated = state.store.write().mark_all_notifications_read();
    tracing::debug!(updated = updated, "Notifications marked read");
    DataResponse::new(MarkReadResponse { updated })
}
