/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

pub(crate) mod iter_utils {
    /// `⌊log₂(size)⌋`.  `size` must be positive.
    pub fn lg_floor(size: usize) -> usize {
        debug_assert!(size > 0);

        let c: usize = usize::BITS as usize - size.leading_zeros() as usize;

        c - 1
    }

    /// Approximate height of a red-black tree with `size` entries, used to size traversal stacks.
    /// A tree with *n* live nodes is never taller than `2·log₂(n + 1)`.
    pub fn conservative_height(size: usize) -> usize {
        if size > 0 { 2 * lg_floor(size + 1) } else { 0 }
    }
}
