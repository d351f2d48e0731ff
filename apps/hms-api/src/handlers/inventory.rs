//! 库存 handlers
//!
//! 物品 CRUD、库存调整、低库存列表，以及库存看板三件套：
//! `get-dashboard-stats`（汇总）、`get-dashboard-chart`（按分类）、
//! `get-dashboard-activity`（最近变动，默认 20 条）。
//!
//! 创建、调整、删除都会追加一条库存变动记录。

use crate::AppState;
use crate::middleware::authorize;
use crate::utils::dto::{
    category_stock_to_dto, inventory_activity_to_dto, inventory_item_to_dto,
    inventory_overview_to_dto,
};
use crate::utils::response::{bad_request_error, not_found_error, ok, storage_error};
use crate::utils::validation::{
    blank_to_none, ensure_non_negative, normalize_optional, normalize_required,
    parse_optional_enum,
};
use api_contract::{
    AdjustStockRequest, CreateInventoryItemRequest, InventoryActivityDto, InventoryChartPointDto,
    InventoryItemDto, LimitQuery, UpdateInventoryItemRequest,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::HeaderMap,
    response::Response,
};
use domain::timestamp::now_ms;
use domain::{HotelContext, InventoryActivityKind, permissions};
use hms_analytics::{inventory_chart, inventory_overview};
use hms_storage::{
    ChangeKind, Collection, InventoryActivityRecord, InventoryItemRecord, InventoryItemUpdate,
};
use tracing::warn;
use uuid::Uuid;

const DEFAULT_ACTIVITY_LIMIT: i64 = 20;
const MAX_ACTIVITY_LIMIT: i64 = 200;

#[derive(serde::Deserialize)]
pub struct ItemPath {
    item_id: String,
}

/// 追加库存变动；失败只记日志，不影响已完成的写入。
async fn record_activity(
    state: &AppState,
    ctx: &HotelContext,
    item: &InventoryItemRecord,
    kind: InventoryActivityKind,
    delta: i64,
) {
    let record = InventoryActivityRecord {
        activity_id: format!("activity-{}", Uuid::new_v4()),
        hotel_id: ctx.hotel_id.clone(),
        item_id: item.item_id.clone(),
        item_name: item.name.clone(),
        kind,
        quantity_delta: delta,
        stock_after: if kind == InventoryActivityKind::Deleted {
            0
        } else {
            item.current_stock
        },
        actor_id: ctx.user_id.clone(),
        at_ms: now_ms(),
    };
    if let Err(err) = state.inventory_store.record_activity(ctx, record).await {
        warn!(item_id = %item.item_id, error = %err, "inventory activity not recorded");
    }
}

/// 未指定类型时按增量方向推断。
fn adjustment_kind(
    delta: i64,
    kind: Option<InventoryActivityKind>,
) -> Result<InventoryActivityKind, Response> {
    if delta == 0 {
        return Err(bad_request_error("delta must not be zero"));
    }
    match kind {
        Some(InventoryActivityKind::Created | InventoryActivityKind::Deleted) => Err(
            bad_request_error("kind must be restocked, consumed or adjusted"),
        ),
        Some(kind) => Ok(kind),
        None if delta > 0 => Ok(InventoryActivityKind::Restocked),
        None => Ok(InventoryActivityKind::Consumed),
    }
}

pub async fn list_items(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let ctx = match authorize(&state, &headers, permissions::INVENTORY_READ) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    match state.inventory_store.list_items(&ctx).await {
        Ok(items) => {
            let data: Vec<InventoryItemDto> = items.into_iter().map(inventory_item_to_dto).collect();
            ok(data)
        }
        Err(err) => storage_error(err),
    }
}

pub async fn low_stock_items(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let ctx = match authorize(&state, &headers, permissions::INVENTORY_READ) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    match state.inventory_store.list_items(&ctx).await {
        Ok(items) => {
            let data: Vec<InventoryItemDto> = items
                .into_iter()
                .filter(InventoryItemRecord::is_low_stock)
                .map(inventory_item_to_dto)
                .collect();
            ok(data)
        }
        Err(err) => storage_error(err),
    }
}

pub async fn create_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateInventoryItemRequest>,
) -> Response {
    let ctx = match authorize(&state, &headers, permissions::INVENTORY_WRITE) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    let name = match normalize_required(req.name, "name") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let category = match normalize_required(req.category, "category") {
        Ok(value) => value,
        Err(response) => return response,
    };
    if req.current_stock < 0 || req.reorder_level < 0 {
        return bad_request_error("currentStock and reorderLevel must not be negative");
    }
    let unit_price = match ensure_non_negative(req.unit_price, "unitPrice") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let record = InventoryItemRecord {
        item_id: format!("item-{}", Uuid::new_v4()),
        hotel_id: ctx.hotel_id.clone(),
        name,
        category,
        current_stock: req.current_stock,
        reorder_level: req.reorder_level,
        unit_price,
        supplier: blank_to_none(req.supplier),
        unit: blank_to_none(req.unit),
        location: blank_to_none(req.location),
        image: blank_to_none(req.image),
    };
    match state.inventory_store.create_item(&ctx, record).await {
        Ok(item) => {
            record_activity(
                &state,
                &ctx,
                &item,
                InventoryActivityKind::Created,
                item.current_stock,
            )
            .await;
            state.publish_change(&ctx, Collection::Inventory, &item.item_id, ChangeKind::Created);
            ok(inventory_item_to_dto(item))
        }
        Err(err) => storage_error(err),
    }
}

pub async fn get_item(
    State(state): State<AppState>,
    Path(path): Path<ItemPath>,
    headers: HeaderMap,
) -> Response {
    let ctx = match authorize(&state, &headers, permissions::INVENTORY_READ) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    match state.inventory_store.find_item(&ctx, &path.item_id).await {
        Ok(Some(item)) => ok(inventory_item_to_dto(item)),
        Ok(None) => not_found_error(),
        Err(err) => storage_error(err),
    }
}

/// 库存数量不在此修改，使用 adjust。
pub async fn update_item(
    State(state): State<AppState>,
    Path(path): Path<ItemPath>,
    headers: HeaderMap,
    Json(req): Json<UpdateInventoryItemRequest>,
) -> Response {
    let ctx = match authorize(&state, &headers, permissions::INVENTORY_WRITE) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    let name = match normalize_optional(req.name, "name") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let category = match normalize_optional(req.category, "category") {
        Ok(value) => value,
        Err(response) => return response,
    };
    if req.reorder_level.is_some_and(|level| level < 0) {
        return bad_request_error("reorderLevel must not be negative");
    }
    let unit_price = match req.unit_price {
        Some(price) => match ensure_non_negative(price, "unitPrice") {
            Ok(value) => Some(value),
            Err(response) => return response,
        },
        None => None,
    };
    let update = InventoryItemUpdate {
        name,
        category,
        reorder_level: req.reorder_level,
        unit_price,
        supplier: req.supplier,
        unit: req.unit,
        location: req.location,
        image: req.image,
    };
    match state
        .inventory_store
        .update_item(&ctx, &path.item_id, update)
        .await
    {
        Ok(Some(item)) => {
            state.publish_change(&ctx, Collection::Inventory, &item.item_id, ChangeKind::Updated);
            ok(inventory_item_to_dto(item))
        }
        Ok(None) => not_found_error(),
        Err(err) => storage_error(err),
    }
}

pub async fn delete_item(
    State(state): State<AppState>,
    Path(path): Path<ItemPath>,
    headers: HeaderMap,
) -> Response {
    let ctx = match authorize(&state, &headers, permissions::INVENTORY_WRITE) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    let item = match state.inventory_store.find_item(&ctx, &path.item_id).await {
        Ok(Some(item)) => item,
        Ok(None) => return not_found_error(),
        Err(err) => return storage_error(err),
    };
    match state.inventory_store.delete_item(&ctx, &path.item_id).await {
        Ok(true) => {
            record_activity(
                &state,
                &ctx,
                &item,
                InventoryActivityKind::Deleted,
                -item.current_stock,
            )
            .await;
            state.publish_change(&ctx, Collection::Inventory, &item.item_id, ChangeKind::Deleted);
            ok(())
        }
        Ok(false) => not_found_error(),
        Err(err) => storage_error(err),
    }
}

pub async fn adjust_stock(
    State(state): State<AppState>,
    Path(path): Path<ItemPath>,
    headers: HeaderMap,
    Json(req): Json<AdjustStockRequest>,
) -> Response {
    let ctx = match authorize(&state, &headers, permissions::INVENTORY_WRITE) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    let kind = match parse_optional_enum::<InventoryActivityKind>(req.kind.as_deref(), "kind") {
        Ok(kind) => kind,
        Err(response) => return response,
    };
    let kind = match adjustment_kind(req.delta, kind) {
        Ok(kind) => kind,
        Err(response) => return response,
    };
    match state
        .inventory_store
        .adjust_stock(&ctx, &path.item_id, req.delta)
        .await
    {
        Ok(Some(item)) => {
            record_activity(&state, &ctx, &item, kind, req.delta).await;
            state.publish_change(&ctx, Collection::Inventory, &item.item_id, ChangeKind::Updated);
            ok(inventory_item_to_dto(item))
        }
        Ok(None) => not_found_error(),
        Err(err) => storage_error(err),
    }
}

pub async fn inventory_dashboard_stats(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    let ctx = match authorize(&state, &headers, permissions::INVENTORY_READ) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    match state.inventory_store.list_items(&ctx).await {
        Ok(items) => ok(inventory_overview_to_dto(
            inventory_overview(&items),
            &state.currency,
        )),
        Err(err) => storage_error(err),
    }
}

pub async fn inventory_dashboard_chart(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    let ctx = match authorize(&state, &headers, permissions::INVENTORY_READ) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    match state.inventory_store.list_items(&ctx).await {
        Ok(items) => {
            let data: Vec<InventoryChartPointDto> = inventory_chart(&items)
                .into_iter()
                .map(category_stock_to_dto)
                .collect();
            ok(data)
        }
        Err(err) => storage_error(err),
    }
}

pub async fn inventory_dashboard_activity(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<LimitQuery>,
) -> Response {
    let ctx = match authorize(&state, &headers, permissions::INVENTORY_READ) {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };
    let limit = query
        .limit
        .unwrap_or(DEFAULT_ACTIVITY_LIMIT)
        .clamp(1, MAX_ACTIVITY_LIMIT) as usize;
    match state.inventory_store.list_activities(&ctx, limit).await {
        Ok(activities) => {
            let data: Vec<InventoryActivityDto> = activities
                .into_iter()
                .map(inventory_activity_to_dto)
                .collect();
            ok(data)
        }
        Err(err) => storage_error(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::testing::{admin_headers, read_json, seeded_state};
    use axum::http::StatusCode;

    fn item_path(item_id: &str) -> Path<ItemPath> {
        Path(ItemPath {
            item_id: item_id.to_string(),
        })
    }

    #[test]
    fn adjustment_kind_follows_sign() {
        assert_eq!(
            adjustment_kind(5, None).expect("kind"),
            InventoryActivityKind::Restocked
        );
        assert_eq!(
            adjustment_kind(-5, None).expect("kind"),
            InventoryActivityKind::Consumed
        );
        assert_eq!(
            adjustment_kind(-5, Some(InventoryActivityKind::Adjusted)).expect("kind"),
            InventoryActivityKind::Adjusted
        );
        assert!(adjustment_kind(0, None).is_err());
        assert!(adjustment_kind(3, Some(InventoryActivityKind::Deleted)).is_err());
    }

    #[tokio::test]
    async fn adjust_records_activity_and_rejects_negative_stock() {
        let state = seeded_state();
        let headers = admin_headers(&state).await;

        let response = adjust_stock(
            State(state.clone()),
            item_path("item-coffee"),
            headers.clone(),
            Json(AdjustStockRequest {
                delta: -5,
                kind: None,
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["data"]["currentStock"], 20);

        let response = adjust_stock(
            State(state.clone()),
            item_path("item-coffee"),
            headers.clone(),
            Json(AdjustStockRequest {
                delta: -100,
                kind: None,
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = inventory_dashboard_activity(
            State(state),
            headers,
            Query(LimitQuery::default()),
        )
        .await;
        let body = read_json(response).await;
        let activities = body["data"].as_array().expect("array");
        assert_eq!(activities.len(), 1);
        assert_eq!(activities[0]["kind"], "consumed");
        assert_eq!(activities[0]["stockAfter"], 20);
    }

    #[tokio::test]
    async fn low_stock_lists_items_at_or_below_reorder_level() {
        let state = seeded_state();
        let headers = admin_headers(&state).await;
        let response = low_stock_items(State(state), headers).await;
        let body = read_json(response).await;
        let mut names: Vec<&str> = body["data"]
            .as_array()
            .expect("array")
            .iter()
            .map(|item| item["name"].as_str().expect("name"))
            .collect();
        names.sort();
        assert_eq!(names, vec!["Bed Sheets", "Soap Bars"]);
    }

    #[tokio::test]
    async fn dashboard_stats_format_value() {
        let state = seeded_state();
        let headers = admin_headers(&state).await;
        let response = inventory_dashboard_stats(State(state), headers).await;
        let body = read_json(response).await;
        assert_eq!(body["data"]["totalItems"], 4);
        assert_eq!(body["data"]["outOfStockItems"], 1);
        assert_eq!(body["data"]["categoryCount"], 3);
        // 120*6.5 + 30*18 + 0 + 25*14 = 1670
        assert_eq!(body["data"]["totalValueFormatted"], "$1,670.00");
    }

    #[tokio::test]
    async fn create_then_delete_logs_both() {
        let state = seeded_state();
        let headers = admin_headers(&state).await;
        let response = create_item(
            State(state.clone()),
            headers.clone(),
            Json(CreateInventoryItemRequest {
                name: "Pillows".to_string(),
                category: "Linen".to_string(),
                current_stock: 12,
                reorder_level: 4,
                unit_price: 9.0,
                supplier: None,
                unit: Some("pcs".to_string()),
                location: None,
                image: None,
            }),
        )
        .await;
        let body = read_json(response).await;
        let item_id = body["data"]["itemId"].as_str().expect("id").to_string();

        let response = delete_item(State(state.clone()), item_path(&item_id), headers.clone()).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response =
            inventory_dashboard_activity(State(state), headers, Query(LimitQuery { limit: Some(5) }))
                .await;
        let body = read_json(response).await;
        let kinds: Vec<&str> = body["data"]
            .as_array()
            .expect("array")
            .iter()
            .map(|activity| activity["kind"].as_str().expect("kind"))
            .collect();
        assert_eq!(kinds, vec!["deleted", "created"]);
    }
}
