pub mod forwarding_service;
