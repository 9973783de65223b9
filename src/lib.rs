//! # Company Scout
//!
//! A single-page company research tool backed by an LLM agent.
//!
//! This library provides:
//! - An HTTP page and API for looking up a company by name
//! - A tool-based agent loop that may issue web searches before answering
//! - A regex extraction pass that turns the agent's free-text answer into
//!   a structured record
//!
//! ## Architecture
//!
//! A lookup follows the "tools in a loop" pattern:
//! 1. Receive a company name via the API
//! 2. Fill the research prompt and hand it to the agent
//! 3. The agent calls the LLM, executing any web-search tool calls it
//!    requests, until a final text answer is produced
//! 4. Scan the answer for the recognized fields and return the record
//!
//! ## Example
//!
//! ```rust,ignore
//! use company_scout::{config::Config, retrieval::CompanyInfoService};
//!
//! let config = Config::from_env()?;
//! let service = CompanyInfoService::new(&config);
//! let record = service.retrieve("Acme Corp").await?;
//! ```

pub mod agent;
pub mod api;
pub mod config;
pub mod extract;
pub mod llm;
pub mod retrieval;
pub mod tools;

pub use config::Config;
