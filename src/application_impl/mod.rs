mod graph_service_impl;

pub use graph_service_impl::*;
