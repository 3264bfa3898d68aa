#![allow(dead_code)]

use hyperseg::{NdArray, RangeEngine};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn total(dims: &[usize]) -> usize {
    dims.iter().product()
}

/// Twice the element count, capped so the naive engine stays fast in debug builds.
pub fn samples(dims: &[usize]) -> usize {
    (2 * total(dims)).min(2000)
}

pub fn generate(rng: &mut StdRng, dims: &[usize], lo: i64, hi: i64) -> NdArray<i64> {
    NdArray::from_fn(dims, |_| rng.gen_range(lo..=hi)).expect("non-empty dims")
}

pub fn random_index(rng: &mut StdRng, index: &mut [usize], dims: &[usize]) {
    for (i, &d) in index.iter_mut().zip(dims) {
        *i = rng.gen_range(0..d);
    }
}

pub fn random_range(rng: &mut StdRng, left: &mut [usize], right: &mut [usize], dims: &[usize]) {
    for ((l, r), &d) in left.iter_mut().zip(right.iter_mut()).zip(dims) {
        let a = rng.gen_range(0..d);
        let b = rng.gen_range(0..d);
        *l = a.min(b);
        *r = a.max(b);
    }
}

/// Runs random range queries against both engines and asserts they agree.
pub fn compare_immutable<A, B, Out>(
    a: &mut A,
    b: &mut B,
    dims: &[usize],
    samples: usize,
    rng: &mut StdRng,
    project_a: impl Fn(A::Node) -> Out,
    project_b: impl Fn(B::Node) -> Out,
) where
    A: RangeEngine,
    B: RangeEngine,
    Out: PartialEq + std::fmt::Debug,
{
    let mut ha = a.range_query_handle();
    let mut hb = b.range_query_handle();
    let mut left = vec![0; dims.len()];
    let mut right = vec![0; dims.len()];

    for _ in 0..samples {
        random_range(rng, &mut left, &mut right, dims);
        ha.set_range(&left, &right);
        hb.set_range(&left, &right);
        assert_eq!(
            project_a(a.query(&mut ha)),
            project_b(b.query(&mut hb)),
            "range {left:?}..={right:?}"
        );
    }
}

/// Interleaves random range queries with random point assignments.
pub fn compare_mutable<A, B, Out>(
    a: &mut A,
    b: &mut B,
    dims: &[usize],
    samples: usize,
    rng: &mut StdRng,
    project_a: impl Fn(A::Node) -> Out,
    project_b: impl Fn(B::Node) -> Out,
) where
    A: RangeEngine<Value = i64>,
    B: RangeEngine<Value = i64>,
    Out: PartialEq + std::fmt::Debug,
{
    let mut ha = a.range_query_handle();
    let mut hb = b.range_query_handle();
    let mut pa = a.query_handle();
    let mut pb = b.query_handle();
    let mut left = vec![0; dims.len()];
    let mut right = vec![0; dims.len()];
    let mut index = vec![0; dims.len()];

    for _ in 0..samples {
        random_range(rng, &mut left, &mut right, dims);
        ha.set_range(&left, &right);
        hb.set_range(&left, &right);
        assert_eq!(
            project_a(a.query(&mut ha)),
            project_b(b.query(&mut hb)),
            "range {left:?}..={right:?}"
        );

        let value = rng.gen_range(-100..=100);
        random_index(rng, &mut index, dims);
        pa.set_index(&index);
        pb.set_index(&index);
        a.update(&mut pa, &value);
        b.update(&mut pb, &value);
    }
}

/// Interleaves random range queries with random range additions.
pub fn compare_mutable_range<A, B, Out>(
    a: &mut A,
    b: &mut B,
    dims: &[usize],
    samples: usize,
    rng: &mut StdRng,
    project_a: impl Fn(A::Node) -> Out,
    project_b: impl Fn(B::Node) -> Out,
) where
    A: RangeEngine<Value = i64>,
    B: RangeEngine<Value = i64>,
    Out: PartialEq + std::fmt::Debug,
{
    let mut ha = a.range_query_handle();
    let mut hb = b.range_query_handle();
    let mut left = vec![0; dims.len()];
    let mut right = vec![0; dims.len()];

    for _ in 0..samples {
        random_range(rng, &mut left, &mut right, dims);
        ha.set_range(&left, &right);
        hb.set_range(&left, &right);
        assert_eq!(
            project_a(a.query(&mut ha)),
            project_b(b.query(&mut hb)),
            "range {left:?}..={right:?}"
        );

        random_range(rng, &mut left, &mut right, dims);
        ha.set_range(&left, &right);
        hb.set_range(&left, &right);
        let value = rng.gen_range(-10..=10);
        a.update_range(&mut ha, &value);
        b.update_range(&mut hb, &value);
    }
}
