pub mod clock;
pub mod error;
pub mod ids;
pub mod model;
pub mod notify;
pub mod session;
pub mod stats;
pub mod storage;
pub mod task_api;
pub mod view;
