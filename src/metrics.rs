//! Derived display metrics.
//!
//! Every function here is pure and total: empty collections and zero
//! denominators produce zeros, never errors. Callers recompute after any
//! mutation — there is no cache or observer layer.

use chrono::{DateTime, Datelike, Utc};

use crate::types::{
    Board, CashMetrics, FpaMetrics, Invoice, InvoiceStatus, MarginMetrics, MonthlyFinancials,
    RevenueSlice, SlaBreakdown, SlaStatus, StaffMember, TrendDirection,
};

/// Classify a raw trend value, suppressing noise inside the dead zone.
pub fn trend_direction(raw: f64, dead_zone: f64) -> TrendDirection {
    if raw > dead_zone {
        TrendDirection::Up
    } else if raw < -dead_zone {
        TrendDirection::Down
    } else {
        TrendDirection::Neutral
    }
}

fn month_key(ts: &DateTime<Utc>) -> (i32, u32) {
    (ts.year(), ts.month())
}

fn previous_month_key(now: &DateTime<Utc>) -> (i32, u32) {
    match month_key(now) {
        (year, 1) => (year - 1, 12),
        (year, month) => (year, month - 1),
    }
}

fn sum_for_month(invoices: &[Invoice], key: (i32, u32), paid_only: bool) -> f64 {
    invoices
        .iter()
        .filter(|inv| month_key(&inv.due_date) == key)
        .filter(|inv| !paid_only || inv.status == InvoiceStatus::Paid)
        .map(|inv| inv.amount)
        .sum()
}

/// Month-to-date cash collection vs invoiced, with a trend against the
/// previous calendar month.
pub fn compute_cash_metrics(
    invoices: &[Invoice],
    now: DateTime<Utc>,
    dead_zone: f64,
) -> CashMetrics {
    let this_month = month_key(&now);
    let last_month = previous_month_key(&now);

    let cash_collected = sum_for_month(invoices, this_month, true);
    let invoiced_this_month = sum_for_month(invoices, this_month, false);
    let collected_percentage = if invoiced_this_month > 0.0 {
        cash_collected / invoiced_this_month * 100.0
    } else {
        0.0
    };

    let collected_last_month = sum_for_month(invoices, last_month, true);
    let raw_trend = if collected_last_month > 0.0 {
        (cash_collected - collected_last_month) / collected_last_month * 100.0
    } else if cash_collected > 0.0 {
        100.0
    } else {
        0.0
    };

    CashMetrics {
        cash_collected,
        collected_percentage,
        cash_trend_value: raw_trend.abs(),
        cash_trend_direction: trend_direction(raw_trend, dead_zone),
    }
}

fn period_margin_ratio(period: &MonthlyFinancials) -> f64 {
    if period.revenue > 0.0 {
        (period.revenue - period.costs) / period.revenue
    } else {
        0.0
    }
}

/// Whole-series contribution margin plus the margin-ratio delta across the
/// last two periods in sequence order.
pub fn compute_margin_metrics(series: &[MonthlyFinancials], dead_zone: f64) -> MarginMetrics {
    let total_revenue: f64 = series.iter().map(|p| p.revenue).sum();
    let total_costs: f64 = series.iter().map(|p| p.costs).sum();
    let contribution_margin = if total_revenue > 0.0 {
        (total_revenue - total_costs) / total_revenue * 100.0
    } else {
        0.0
    };

    let raw_trend = match series {
        [.., prev, latest] => (period_margin_ratio(latest) - period_margin_ratio(prev)) * 100.0,
        _ => 0.0,
    };

    MarginMetrics {
        contribution_margin,
        margin_trend_value: raw_trend.abs(),
        margin_trend_direction: trend_direction(raw_trend, dead_zone),
    }
}

/// Mean first-pass acceptance across staff, trended against the configured
/// prior-period baseline.
pub fn compute_fpa_metrics(staff: &[StaffMember], baseline: f64, dead_zone: f64) -> FpaMetrics {
    let average_fpa = if staff.is_empty() {
        0.0
    } else {
        staff.iter().map(|s| s.fpa).sum::<f64>() / staff.len() as f64
    };

    let raw_trend = average_fpa - baseline;

    FpaMetrics {
        average_fpa,
        fpa_trend_value: raw_trend.abs(),
        fpa_trend_direction: trend_direction(raw_trend, dead_zone),
    }
}

/// Split each financial period into retainer (MRR) and booster revenue.
pub fn revenue_composition(series: &[MonthlyFinancials]) -> Vec<RevenueSlice> {
    series
        .iter()
        .map(|p| RevenueSlice {
            month: p.month.clone(),
            retainer: p.mrr,
            boosters: p.boosters,
        })
        .collect()
}

/// Count board tasks per SLA status across all three lanes.
pub fn sla_breakdown(board: &Board) -> SlaBreakdown {
    let mut breakdown = SlaBreakdown::default();
    let lanes = [&board.todo, &board.in_progress, &board.review];
    for task in lanes.into_iter().flatten() {
        match task.sla_status {
            SlaStatus::Healthy => breakdown.healthy += 1,
            SlaStatus::Warning => breakdown.warning += 1,
            SlaStatus::Danger => breakdown.danger += 1,
        }
        breakdown.total += 1;
    }
    breakdown
}
