//! In-memory metadata indexing and search service.
//!
//! Three components do the real work: [`analysis`] turns a [`model::Metadata`]
//! descriptor into field→terms, [`index`] and [`store`] hold the resulting
//! postings and payloads under independent concurrency disciplines, and
//! [`query`] composes posting sets into search results. [`service::Service`]
//! orchestrates the three for callers; [`http`] exposes that facade over
//! HTTP, and [`config`] loads the two configuration surfaces the binary
//! needs at startup.

pub mod analysis;
pub mod config;
pub mod error;
pub mod http;
pub mod index;
pub mod model;
pub mod query;
pub mod service;
pub mod store;
