/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Error values reported by [`RedBlackTreeMap`](crate::RedBlackTreeMap).
//!
//! Both kinds are ordinary recoverable outcomes of a lookup.  A failed call never leaves the
//! map half-updated.

use thiserror::Error;

/// Result type alias for map operations that report presence.
pub type Result<T> = core::result::Result<T, Error>;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Error {
    /// The key was already present.  The stored value has been overwritten with the new one.
    #[error("key already exists")]
    AlreadyExists,

    /// The key is not present in the map.
    #[error("key not found")]
    NotFound,
}
