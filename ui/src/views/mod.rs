mod home;
pub use home::Home;

mod dashboard;
pub use dashboard::Dashboard;

mod compare;
pub use compare::Compare;
