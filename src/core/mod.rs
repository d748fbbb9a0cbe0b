/*!
 * Core Module
 * Shared limits and data structures
 */

pub mod data_structures;
pub mod limits;

pub use data_structures::InlineString;
