/*!
 * Data Structures
 *
 * Small specialized containers shared by the VFS layer.
 */

mod inline_string;

pub use inline_string::InlineString;
