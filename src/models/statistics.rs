use serde::{Deserialize, Serialize};

/// Dashboard counters computed by the backend. One snapshot covers order
/// totals by period and type plus user/driver counts; the client displays
/// these as-is and never recomputes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatistics {
    pub total_orders: i64,
    pub pending_orders: i64,
    pub completed_orders: i64,
    pub total_users: i64,
    pub total_drivers: i64,
    pub approved_drivers: i64,
    pub pending_drivers: i64,
    pub today_orders: i64,
    pub yesterday_orders: i64,
    pub this_week_orders: i64,
    pub last_week_orders: i64,
    pub taxi_orders: i64,
    pub package_orders: i64,
    pub plane_orders: i64,
    pub train_orders: i64,
    pub recent_orders_by_day: Vec<DailyOrderCount>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyOrderCount {
    pub date: String,
    pub count: i64,
}
