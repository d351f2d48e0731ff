//! 集合变更通知
//!
//! 写入成功后由调用方发布 ChangeEvent，订阅方（如看板 SSE）收到后重新读取。
//! 基于 tokio broadcast：慢订阅者会丢失旧事件（Lagged），不保证跨集合顺序。

use tokio::sync::broadcast;

/// 被修改的集合。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Bookings,
    BookingArchive,
    Rooms,
    Inventory,
    PurchaseOrders,
    Staff,
    Payments,
    Reports,
    ContactRequests,
    Stats,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Bookings => "bookings",
            Collection::BookingArchive => "booking_archive",
            Collection::Rooms => "rooms",
            Collection::Inventory => "inventory",
            Collection::PurchaseOrders => "purchase_orders",
            Collection::Staff => "staff",
            Collection::Payments => "payments",
            Collection::Reports => "reports",
            Collection::ContactRequests => "contact_requests",
            Collection::Stats => "stats",
        }
    }

    /// 是否影响看板统计。
    pub fn affects_dashboard(&self) -> bool {
        matches!(
            self,
            Collection::Bookings
                | Collection::BookingArchive
                | Collection::Rooms
                | Collection::Inventory
                | Collection::Staff
                | Collection::Stats
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Created,
    Updated,
    Deleted,
}

/// 单条变更事件。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub hotel_id: String,
    pub collection: Collection,
    pub document_id: String,
    pub kind: ChangeKind,
}

impl ChangeEvent {
    pub fn new(
        hotel_id: impl Into<String>,
        collection: Collection,
        document_id: impl Into<String>,
        kind: ChangeKind,
    ) -> Self {
        Self {
            hotel_id: hotel_id.into(),
            collection,
            document_id: document_id.into(),
            kind,
        }
    }
}

/// 进程内变更广播。
#[derive(Clone)]
pub struct ChangeFeed {
    sender: broadcast::Sender<ChangeEvent>,
}

impl ChangeFeed {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// 发布事件，返回收到事件的订阅者数量（无订阅者时为 0）。
    pub fn publish(&self, event: ChangeEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new(256)
    }
}
