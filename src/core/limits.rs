/*!
 * System Limits and Constants
 *
 * Centralized location for VFS-wide limits and fixed paths.
 */

// =============================================================================
// PATHS
// =============================================================================

/// Path separator; mountpoints and directory arguments end with it
pub const PATH_SEPARATOR: char = '/';

/// Mountpoint of the device namespace established at boot
pub const DEVICE_ROOT: &str = "/device/";

// =============================================================================
// DIRECTORY ENTRIES
// =============================================================================

/// Maximum visible length of a directory entry name (bytes)
/// [LINUX-COMPAT] Mirrors a 32-byte name field with a terminator
pub const DIR_ENTRY_NAME_MAX: usize = 31;

// =============================================================================
// HANDLES
// =============================================================================

/// Mode passed to a driver's create callback by the open-with-create fallback
pub const FALLBACK_CREATE_MODE: u32 = 0;
