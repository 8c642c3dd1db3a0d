pub mod dashboard_service;

pub use dashboard_service::{DashboardService, DashboardSummary, WidgetSelection};

#[cfg(test)]
mod tests;
