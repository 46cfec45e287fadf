pub mod access_log;
pub mod panic_handler;
pub mod request_context;
pub mod request_state;
pub mod route_policy;
pub mod stage;
