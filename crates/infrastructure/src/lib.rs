//! Adapters for the audit engine's ports.

#![forbid(unsafe_code)]

mod in_memory_report_repository;

pub use in_memory_report_repository::InMemoryReportRepository;
