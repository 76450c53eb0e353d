//! View selection: controls, chart selection and the loaded dashboard.

pub mod controls;
pub mod dashboard;
pub mod selector;

pub use controls::DashboardControls;
pub use dashboard::Dashboard;
