pub mod chart;
pub mod metrics;
pub mod view;

pub use view::Dashboard;
