/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

#![cfg_attr(feature = "fatal-warnings", deny(warnings))]
#![allow(clippy::cast_possible_wrap)]

//! Baseline for the `rbmap_red_black_tree_map` benchmarks, with the same workloads.

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use std::collections::BTreeMap;
use std::hint::black_box;

const LIMIT: usize = 100_000;

fn filled() -> BTreeMap<usize, isize> {
    (0..LIMIT).map(|i| (i, -(i as isize))).collect()
}

fn std_btree_map_insert(c: &mut Criterion) {
    c.bench_function("std b-tree map insert", move |b| {
        b.iter(|| {
            let mut map: BTreeMap<usize, isize> = BTreeMap::new();

            for i in 0..LIMIT {
                map.insert(i, -(i as isize));
            }

            map
        });
    });
}

fn std_btree_map_insert_descending(c: &mut Criterion) {
    c.bench_function("std b-tree map insert descending", move |b| {
        b.iter(|| {
            let mut map: BTreeMap<usize, isize> = BTreeMap::new();

            for i in (0..LIMIT).rev() {
                map.insert(i, -(i as isize));
            }

            map
        });
    });
}

fn std_btree_map_remove(c: &mut Criterion) {
    c.bench_function("std b-tree map remove", move |b| {
        b.iter_batched(
            filled,
            |mut map| {
                for i in 0..LIMIT {
                    map.remove(&i);
                }

                map
            },
            BatchSize::LargeInput,
        );
    });
}

fn std_btree_map_update(c: &mut Criterion) {
    c.bench_function("std b-tree map update", move |b| {
        b.iter_batched(
            filled,
            |mut map| {
                for i in 0..LIMIT {
                    if let Some(v) = map.get_mut(&i) {
                        *v = i as isize;
                    }
                }

                map
            },
            BatchSize::LargeInput,
        );
    });
}

fn std_btree_map_get(c: &mut Criterion) {
    let map = filled();

    c.bench_function("std b-tree map get", move |b| {
        b.iter(|| {
            for i in 0..LIMIT {
                black_box(map.get(&i));
            }
        });
    });
}

fn std_btree_map_iterate(c: &mut Criterion) {
    let map = filled();

    c.bench_function("std b-tree map iterate", move |b| {
        b.iter(|| {
            for kv in &map {
                black_box(kv);
            }
        });
    });
}

criterion_group!(
    benches,
    std_btree_map_insert,
    std_btree_map_insert_descending,
    std_btree_map_remove,
    std_btree_map_update,
    std_btree_map_get,
    std_btree_map_iterate
);
criterion_main!(benches);
