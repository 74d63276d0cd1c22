#![allow(clippy::doc_markdown)] // Allow technical terms like JSON, TOML in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Weft Harness
//!
//! Integration test harness for the Weft workflow orchestration engine.
//!
//! ## Overview
//!
//! Suites testing Weft deployments all need the same plumbing: a known
//! catalog of task definitions, a way to wipe engine state between tests,
//! workflow definition registration from JSON documents, and simulated
//! workers that poll, acknowledge, and update tasks without standing up a
//! real worker fleet. This crate packages that plumbing behind a single
//! [`TestHarness`] so suites stay declarative.
//!
//! The harness reaches the engine only through four narrow service
//! contracts ([`MetadataService`], [`ExecutionService`],
//! [`WorkflowExecutor`], [`QueueService`]). Deployments wire in their
//! HTTP or gRPC clients; the crate's own tests run against the bundled
//! [`InMemoryEngine`].
//!
//! ## Module Organization
//!
//! - [`harness`] - The [`TestHarness`] lifecycle operations
//! - [`services`] - Engine service contracts
//! - [`models`] - Task, workflow, and definition data types
//! - [`memory`] - In-memory engine for self-contained suites
//! - [`config`] - Harness configuration
//! - [`error`] - Structured error handling
//! - [`constants`] - Fixture catalog names and system defaults
//! - [`logging`] - Test-friendly tracing initialization
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use weft_harness::{EngineServices, HarnessConfig, InMemoryEngine, TestHarness};
//!
//! # async fn example() -> weft_harness::Result<()> {
//! let engine = Arc::new(InMemoryEngine::new());
//! let services = EngineServices::from_shared(engine.clone());
//! let harness = TestHarness::new(HarnessConfig::default(), services).await?;
//!
//! harness.reset().await?;
//! let polled = harness
//!     .poll_and_complete_task("fixture_task_0", "demo-worker", None, 0)
//!     .await?;
//! let task = weft_harness::verify_polled_and_acknowledged(polled, None);
//! println!("completed {}", task.task_id);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod harness;
pub mod logging;
pub mod memory;
pub mod models;
pub mod services;

pub use config::HarnessConfig;
pub use error::{HarnessError, Result};
pub use harness::{fixture_catalog, verify_polled_and_acknowledged, TestHarness};
pub use memory::InMemoryEngine;
pub use models::{
    PollResult, QueueInfo, Task, TaskDefinition, TaskReference, TaskStatus, Workflow,
    WorkflowDefinition, WorkflowStatus,
};
pub use services::{
    EngineServices, ExecutionService, MetadataService, QueueService, WorkflowExecutor,
};
