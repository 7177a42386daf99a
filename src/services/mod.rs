//! Service layer for skillkit
//!
//! Business logic behind `doctor` and `uninstall`. Services return reports
//! and outcomes; the CLI layer decides how to print them.

pub mod doctor_service;
pub mod uninstall_service;

pub use doctor_service::{check_manifest, run_checks, Check, DoctorReport, ManifestReport};
pub use uninstall_service::{execute, plan_removal, uninstall, RemovalOutcome, RemovalPlan};
