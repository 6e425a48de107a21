//! Dashboard widgets for the home view: stat cards, SVG trend chart, the
//! body model with organ markers, and the recent-activity feed.

mod body_model;
mod recent_activity;
mod stat_cards;
mod trend_chart;

pub use body_model::BodyModel;
pub use recent_activity::RecentActivityList;
pub use stat_cards::StatCards;
pub use trend_chart::TrendChart;
