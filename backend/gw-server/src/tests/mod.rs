mod api;
mod pipeline;
