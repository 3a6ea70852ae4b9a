//! # Course Admin
//!
//! A course-management backend: users, courses and course contents, each stored by a
//! [`ResourceActor`](resource_actor::ResourceActor) and exposed over a small REST API,
//! plus the client-side kernel a UI drives (list views, mutation modals, debounced
//! search).
//!
//! ## Layout
//!
//! - [`model`] - rows and request payloads
//! - [`user_actor`], [`course_actor`], [`content_actor`] - entity hooks and actor factories
//! - [`clients`] - resource services, authorization re-checked per call
//! - [`query`] - translation of list queries into store filters
//! - [`auth`] - roles and the authorization gate
//! - [`lifecycle`] - actor wiring, dashboard counters, shutdown, tracing setup
//! - [`api`] - axum router
//! - [`view`] - list view model, mutation controller, debouncer

pub mod api;
pub mod auth;
pub mod clients;
pub mod config;
pub mod content_actor;
pub mod course_actor;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod password;
pub mod query;
pub mod user_actor;
pub mod view;
