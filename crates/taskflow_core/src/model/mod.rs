mod task;

pub use task::{Priority, TASK_CATEGORIES, Task};
