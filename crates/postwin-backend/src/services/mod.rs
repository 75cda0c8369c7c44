//! Backend service handlers for frontend-driven requests.
//!
//! This module groups async request handlers that operate on the shared
//! `AppContext`, perform side effects (network, camera, filesystem), and emit
//! updates or notifications back to the frontend.

pub mod camera_service;
pub mod config_service;
pub mod detection_service;

/// Represents a type that is used in all handlers as an application context.
pub(crate) type AppContextHandle = std::sync::Arc<crate::app::AppContext>;
