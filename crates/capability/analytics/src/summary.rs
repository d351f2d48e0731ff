//! 库存、支付、员工的汇总统计。

use domain::{PaymentStatus, StaffStatus};
use hms_storage::{InventoryItemRecord, PaymentRecord, StaffRecord};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// 库存看板数值。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InventoryOverview {
    pub total_items: u64,
    pub low_stock_items: u64,
    pub out_of_stock_items: u64,
    pub category_count: u64,
    pub total_value: f64,
}

pub fn inventory_overview(items: &[InventoryItemRecord]) -> InventoryOverview {
    let categories: BTreeSet<&str> = items.iter().map(|item| item.category.as_str()).collect();
    InventoryOverview {
        total_items: items.len() as u64,
        low_stock_items: items.iter().filter(|item| item.is_low_stock()).count() as u64,
        out_of_stock_items: items.iter().filter(|item| item.current_stock <= 0).count() as u64,
        category_count: categories.len() as u64,
        total_value: items.iter().map(InventoryItemRecord::stock_value).sum(),
    }
}

/// 单个分类的库存量与价值。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStock {
    pub category: String,
    pub item_count: u64,
    pub stock: i64,
    pub value: f64,
}

/// 按分类名排序。
pub fn inventory_chart(items: &[InventoryItemRecord]) -> Vec<CategoryStock> {
    let mut by_category: BTreeMap<&str, CategoryStock> = BTreeMap::new();
    for item in items {
        let entry = by_category
            .entry(item.category.as_str())
            .or_insert_with(|| CategoryStock {
                category: item.category.clone(),
                item_count: 0,
                stock: 0,
                value: 0.0,
            });
        entry.item_count += 1;
        entry.stock += item.current_stock;
        entry.value += item.stock_value();
    }
    by_category.into_values().collect()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PaymentSummary {
    pub total_transactions: u64,
    pub completed_amount: f64,
    pub refunded_amount: f64,
    pub pending_count: u64,
    pub failed_count: u64,
    pub count_by_status: BTreeMap<String, u64>,
    /// 仅统计已完成的支付。
    pub amount_by_method: BTreeMap<String, f64>,
}

pub fn payment_summary(payments: &[PaymentRecord]) -> PaymentSummary {
    let mut summary = PaymentSummary {
        total_transactions: payments.len() as u64,
        ..PaymentSummary::default()
    };
    for payment in payments {
        *summary
            .count_by_status
            .entry(payment.status.as_str().to_string())
            .or_default() += 1;
        match payment.status {
            PaymentStatus::Completed => {
                summary.completed_amount += payment.amount;
                *summary
                    .amount_by_method
                    .entry(payment.payment_method.as_str().to_string())
                    .or_default() += payment.amount;
            }
            PaymentStatus::Refunded => summary.refunded_amount += payment.amount,
            PaymentStatus::Pending => summary.pending_count += 1,
            PaymentStatus::Failed => summary.failed_count += 1,
        }
    }
    summary
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StaffSummary {
    pub total: u64,
    pub active: u64,
    pub count_by_status: BTreeMap<String, u64>,
    pub count_by_department: BTreeMap<String, u64>,
    pub monthly_payroll: f64,
}

pub fn staff_summary(staff: &[StaffRecord]) -> StaffSummary {
    let mut summary = StaffSummary {
        total: staff.len() as u64,
        ..StaffSummary::default()
    };
    for member in staff {
        *summary
            .count_by_status
            .entry(member.status.as_str().to_string())
            .or_default() += 1;
        *summary
            .count_by_department
            .entry(member.department.clone())
            .or_default() += 1;
        if member.status == StaffStatus::Active {
            summary.active += 1;
            summary.monthly_payroll += member.salary;
        }
    }
    summary
}
