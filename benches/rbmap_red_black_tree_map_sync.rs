/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

#![cfg_attr(feature = "fatal-warnings", deny(warnings))]
#![allow(clippy::cast_possible_wrap)]

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use rbmap::{RedBlackTreeMap, RedBlackTreeMapSync};
use std::hint::black_box;

const LIMIT: usize = 100_000;

fn filled() -> RedBlackTreeMapSync<usize, isize> {
    let mut map = RedBlackTreeMap::new_sync();

    for i in 0..LIMIT {
        let _ = map.insert(i, -(i as isize));
    }

    map
}

fn rbmap_red_black_tree_map_sync_insert(c: &mut Criterion) {
    c.bench_function("rbmap red black tree map sync insert", move |b| {
        b.iter(|| {
            let mut map = RedBlackTreeMap::new_sync();

            for i in 0..LIMIT {
                let _ = map.insert(i, -(i as isize));
            }

            map
        });
    });
}

fn rbmap_red_black_tree_map_sync_remove(c: &mut Criterion) {
    c.bench_function("rbmap red black tree map sync remove", move |b| {
        b.iter_batched(
            filled,
            |mut map| {
                for i in 0..LIMIT {
                    let _ = map.remove(&i);
                }

                map
            },
            BatchSize::LargeInput,
        );
    });
}

fn rbmap_red_black_tree_map_sync_get(c: &mut Criterion) {
    let map = filled();

    c.bench_function("rbmap red black tree map sync get", move |b| {
        b.iter(|| {
            for i in 0..LIMIT {
                black_box(map.get(&i));
            }
        });
    });
}

#[allow(clippy::explicit_iter_loop)]
fn rbmap_red_black_tree_map_sync_iterate(c: &mut Criterion) {
    let map = filled();

    c.bench_function("rbmap red black tree map sync iterate", move |b| {
        b.iter(|| {
            for kv in map.iter() {
                black_box(kv);
            }
        });
    });
}

criterion_group!(
    benches,
    rbmap_red_black_tree_map_sync_insert,
    rbmap_red_black_tree_map_sync_remove,
    rbmap_red_black_tree_map_sync_get,
    rbmap_red_black_tree_map_sync_iterate
);
criterion_main!(benches);
