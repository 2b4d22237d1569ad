pub mod dispatch;
pub mod model;
pub mod partition;
pub mod worker;
