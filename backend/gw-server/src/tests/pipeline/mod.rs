mod request_context;
mod request_state;
mod route_policy;
