pub mod handlers;
pub mod ledger;
pub mod models;
pub mod routes;

pub use ledger::award_points;
pub use models::PointAction;
