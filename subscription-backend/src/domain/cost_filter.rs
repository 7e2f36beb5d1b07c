// src/domain/cost_filter.rs
use chrono::NaiveDate;

/// 合計金額の集計条件。None の項目は条件を課さない
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CostFilter {
    pub user_id: Option<String>,
    pub service_name: Option<String>,
    /// start_date の下限（含む）
    pub start_date_from: Option<NaiveDate>,
    /// start_date の上限（含む）
    pub start_date_to: Option<NaiveDate>,
}

impl CostFilter {
    pub fn is_unbounded(&self) -> bool {
        self.user_id.is_none()
            && self.service_name.is_none()
            && self.start_date_from.is_none()
            && self.start_date_to.is_none()
    }

    /// 条件をすべて満たすか（インメモリ実装用）
    pub fn matches(&self, user_id: &str, service_name: &str, start_date: NaiveDate) -> bool {
        self.user_id.as_deref().is_none_or(|u| u == user_id)
            && self.service_name.as_deref().is_none_or(|s| s == service_name)
            && self.start_date_from.is_none_or(|from| start_date >= from)
            && self.start_date_to.is_none_or(|to| start_date <= to)
    }
}
