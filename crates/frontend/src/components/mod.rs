//! Reusable UI components.

mod customizer;
mod dashboard_card;
mod stat_card;

pub use customizer::DashboardCustomizer;
pub use dashboard_card::{DashboardCard, DashboardCardProps};
pub use stat_card::StatCard;
