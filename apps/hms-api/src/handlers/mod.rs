//! Handlers 模块

pub mod auth;
pub mod bookings;
pub mod contact;
pub mod dashboard;
pub mod inventory;
pub mod metrics;
pub mod payments;
pub mod purchase_orders;
pub mod reports;
pub mod revenue;
pub mod rooms;
pub mod staff;

pub use auth::*;
pub use bookings::*;
pub use contact::*;
pub use dashboard::*;
pub use inventory::*;
pub use metrics::*;
pub use payments::*;
pub use purchase_orders::*;
pub use reports::*;
pub use revenue::*;
pub use rooms::*;
pub use staff::*;
