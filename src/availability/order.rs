//! Display order for holdings and summary libraries
//!
//! Holdings at the hold libraries always come last, one bucket per library
//! in [`HoldLibrary::ALL`] order. Everything else sorts by library name and
//! then shelving key; journals list the newest shelving key first.

use std::cmp::Ordering;

use crate::classifier::HoldLibrary;
use crate::models::{Holding, HomeLibrary};

/// Split off hold-library entries into their buckets and sort each part
fn arrange<T, B, C>(items: Vec<T>, bucket_of: B, normal_order: C, bucket_order: Option<C>) -> Vec<T>
where
    B: Fn(&T) -> Option<HoldLibrary>,
    C: Fn(&T, &T) -> Ordering,
{
    let mut normal = Vec::with_capacity(items.len());
    let mut buckets: [Vec<T>; 4] = std::array::from_fn(|_| Vec::new());

    for item in items {
        match bucket_of(&item) {
            Some(library) => buckets[library as usize].push(item),
            None => normal.push(item),
        }
    }

    normal.sort_by(&normal_order);
    if let Some(order) = bucket_order {
        for bucket in buckets.iter_mut() {
            bucket.sort_by(&order);
        }
    }

    normal.extend(buckets.into_iter().flatten());
    normal
}

fn by_name_then_key(a: &Holding, b: &Holding) -> Ordering {
    a.library
        .name
        .cmp(&b.library.name)
        .then_with(|| a.shelving_key.cmp(&b.shelving_key))
}

fn by_name_then_key_descending(a: &Holding, b: &Holding) -> Ordering {
    a.library
        .name
        .cmp(&b.library.name)
        .then_with(|| b.shelving_key.cmp(&a.shelving_key))
}

pub fn order_holdings(holdings: Vec<Holding>, journal: bool) -> Vec<Holding> {
    let bucket_of = |h: &Holding| h.library.hold_library();
    if journal {
        arrange(
            holdings,
            bucket_of,
            by_name_then_key_descending,
            Some(by_name_then_key_descending),
        )
    } else {
        arrange(holdings, bucket_of, by_name_then_key, None)
    }
}

/// Summary libraries carry no shelving key; they are matched and sorted by name
pub fn order_summary_libraries(libraries: Vec<HomeLibrary>) -> Vec<HomeLibrary> {
    arrange(
        libraries,
        |l| HoldLibrary::from_name(l.name()),
        |a: &HomeLibrary, b: &HomeLibrary| a.name().cmp(b.name()),
        None,
    )
}
