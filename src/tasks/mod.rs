pub mod panel_loop;
pub mod task_runner;
