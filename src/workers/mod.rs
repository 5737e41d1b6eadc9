pub mod command_runner;
pub mod projection_worker;
