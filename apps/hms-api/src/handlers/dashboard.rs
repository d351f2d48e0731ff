//! 看板统计 handlers
//!
//! - `GET /dashboard/stats`：缓存优先读取
//! - `POST /dashboard/stats/refresh`：强制重新计算
//! - `GET /dashboard/stats/stream`：SSE，先推送当前统计，之后每次相关集合变更推送一次

use crate::AppState;
use crate::middleware::authorize;
use crate::utils::dto::dashboard_to_dto;
use crate::utils::response::ok;
use axum::{
    extract::State,
    http::HeaderMap,
    response::{
        IntoResponse, Response,
        sse::{Event, KeepAlive, Sse},
    },
};
use domain::{HotelContext, permissions};
use futures::stream;
use hms_storage::ChangeEvent;
use tokio::sync::broadcast::{Receiver, error::RecvError};
use tracing::{debug, info};

pub async fn get_dashboard_stats(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let ctx = match authorize(&state, &headers, permissions::DASHBOARD_READ) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    let snapshot = state.dashboard.stats(&ctx).await;
    ok(dashboard_to_dto(snapshot, &state.currency))
}

pub async fn refresh_dashboard_stats(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    let ctx = match authorize(&state, &headers, permissions::DASHBOARD_READ) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    let snapshot = state.dashboard.refresh(&ctx).await;
    info!(hotel_id = %ctx.hotel_id, source = snapshot.source.as_str(), "dashboard refreshed");
    ok(dashboard_to_dto(snapshot, &state.currency))
}

struct StatsStream {
    state: AppState,
    ctx: HotelContext,
    receiver: Receiver<ChangeEvent>,
    sent_initial: bool,
}

impl StatsStream {
    /// 等待下一条影响本酒店看板的事件；广播关闭时返回 false。
    async fn next_change(&mut self) -> bool {
        loop {
            match self.receiver.recv().await {
                Ok(event) => {
                    if event.hotel_id == self.ctx.hotel_id && event.collection.affects_dashboard()
                    {
                        return true;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    debug!(hotel_id = %self.ctx.hotel_id, skipped, "dashboard stream lagged");
                    return true;
                }
                Err(RecvError::Closed) => return false,
            }
        }
    }

    fn event(&self, dto: &api_contract::DashboardStatsDto) -> Result<Event, axum::Error> {
        Event::default().event("stats").json_data(dto)
    }
}

pub async fn stream_dashboard_stats(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    let ctx = match authorize(&state, &headers, permissions::DASHBOARD_READ) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    // 先订阅再推送首条，避免错过两者之间的变更
    let receiver = state.changes.subscribe();
    let initial = StatsStream {
        state,
        ctx,
        receiver,
        sent_initial: false,
    };
    let events = stream::unfold(initial, |mut current| async move {
        if current.sent_initial {
            if !current.next_change().await {
                return None;
            }
        } else {
            current.sent_initial = true;
        }
        let snapshot = current.state.dashboard.stats(&current.ctx).await;
        let dto = dashboard_to_dto(snapshot, &current.state.currency);
        let event = current.event(&dto);
        Some((event, current))
    });
    Sse::new(events)
        .keep_alive(KeepAlive::default())
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::testing::{admin_headers, guest_headers, read_json, seeded_state};
    use axum::body::Body;
    use axum::http::StatusCode;
    use hms_storage::in_memory::DEFAULT_HOTEL_ID;
    use hms_storage::{ChangeKind, Collection};
    use http_body_util::BodyExt;

    async fn next_text(body: &mut Body) -> String {
        let frame = body.frame().await.expect("frame").expect("body");
        let data = frame.into_data().expect("data frame");
        String::from_utf8(data.to_vec()).expect("utf8")
    }

    #[tokio::test]
    async fn stats_are_computed_then_cached() {
        let state = seeded_state();
        let headers = admin_headers(&state).await;
        let body = read_json(get_dashboard_stats(State(state.clone()), headers.clone()).await).await;
        assert_eq!(body["data"]["source"], "computed");
        assert_eq!(body["data"]["totalBookings"], 5);
        assert_eq!(body["data"]["totalRooms"], 6);
        assert_eq!(body["data"]["occupiedRooms"], 2);

        let body = read_json(get_dashboard_stats(State(state), headers).await).await;
        assert_eq!(body["data"]["source"], "cached");
    }

    #[tokio::test]
    async fn refresh_recomputes() {
        let state = seeded_state();
        let headers = admin_headers(&state).await;
        let _ = get_dashboard_stats(State(state.clone()), headers.clone()).await;
        let body = read_json(refresh_dashboard_stats(State(state), headers).await).await;
        assert_eq!(body["data"]["source"], "computed");
    }

    #[tokio::test]
    async fn guest_cannot_read_dashboard() {
        let state = seeded_state();
        let headers = guest_headers(&state).await;
        let response = get_dashboard_stats(State(state), headers).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn stream_pushes_after_change() {
        let state = seeded_state();
        let headers = admin_headers(&state).await;
        let response = stream_dashboard_stats(State(state.clone()), headers).await;
        assert_eq!(response.status(), StatusCode::OK);
        let mut body = response.into_body();

        let first = next_text(&mut body).await;
        assert!(first.starts_with("event: stats"));
        assert!(first.contains("\"totalBookings\":5"));

        let ctx = HotelContext::new(DEFAULT_HOTEL_ID, "user-1", Vec::new(), Vec::new());
        state
            .room_store
            .delete_room(&ctx, "room-103")
            .await
            .expect("delete");
        // 不影响看板的集合不会触发推送
        state.publish_change(&ctx, Collection::Payments, "pay-1", ChangeKind::Updated);
        state.publish_change(&ctx, Collection::Rooms, "room-103", ChangeKind::Deleted);

        let second = next_text(&mut body).await;
        assert!(second.contains("\"totalRooms\":5"));
        assert!(second.contains("\"source\":\"computed\""));
    }
}
