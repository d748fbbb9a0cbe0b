/*!
 * Monitoring
 * Structured logging setup for the VFS binary and tests
 */

mod tracer;

pub use tracer::{init_tracing, TRACE_JSON_ENV};
