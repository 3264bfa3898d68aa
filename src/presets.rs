//! よく使う演算の定義

use super::operation::Operation;
use super::util::{Associativity, HasMax, HasMin, HasOne, HasZero, Identity, Magma};
use std::marker::PhantomData;
use std::ops::{Add, Mul};

/// 最小値のモノイド. 単位元は型の最大値
pub struct Min<T>(PhantomData<T>);
/// 最大値のモノイド. 単位元は型の最小値
pub struct Max<T>(PhantomData<T>);
/// 和のモノイド. 単位元は0
pub struct Sum<T>(PhantomData<T>);

macro_rules! impl_marker {
    ($($name: ident),*) => {$(
        impl<T> $name<T> {
            #[must_use]
            pub fn new() -> Self {
                Self(PhantomData)
            }
        }
        impl<T> Default for $name<T> {
            fn default() -> Self {
                Self::new()
            }
        }
        impl<T> Clone for $name<T> {
            fn clone(&self) -> Self {
                Self::new()
            }
        }
        impl<T> Copy for $name<T> {}
    )*};
}

impl_marker! { Min, Max, Sum }

impl<T: Ord + Clone> Magma for Min<T> {
    type T = T;
    fn op(&self, lhs: &T, rhs: &T) -> T {
        std::cmp::min(lhs, rhs).clone()
    }
}
impl<T: Ord + Clone + HasMax> Identity for Min<T> {
    fn e(&self) -> T {
        T::max_value()
    }
}
impl<T: Ord + Clone> Associativity for Min<T> {}

impl<T: Ord + Clone> Magma for Max<T> {
    type T = T;
    fn op(&self, lhs: &T, rhs: &T) -> T {
        std::cmp::max(lhs, rhs).clone()
    }
}
impl<T: Ord + Clone + HasMin> Identity for Max<T> {
    fn e(&self) -> T {
        T::min_value()
    }
}
impl<T: Ord + Clone> Associativity for Max<T> {}

impl<T: Eq + Clone + Add<Output = T>> Magma for Sum<T> {
    type T = T;
    fn op(&self, lhs: &T, rhs: &T) -> T {
        lhs.clone() + rhs.clone()
    }
}
impl<T: Eq + Clone + Add<Output = T> + HasZero> Identity for Sum<T> {
    fn e(&self) -> T {
        T::zero()
    }
}
impl<T: Eq + Clone + Add<Output = T>> Associativity for Sum<T> {}

/// 区間の最小値と, それを取る要素の個数
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MinCount<T> {
    pub min: T,
    pub count: usize,
}

impl<T> MinCount<T> {
    /// 要素1個だけからなる区間を表す値を返す
    #[must_use]
    pub fn leaf(value: T) -> Self {
        Self {
            min: value,
            count: 1,
        }
    }
}

/// [`MinCount`]のモノイド. 単位元は`(最大値, 0)`
pub struct MinCountMonoid<T>(PhantomData<T>);
/// [`MinCount`]をノードに持ち, 葉の値として`T`を受け取る演算
pub struct MinCountOp<T>(PhantomData<T>);
/// 区間加算・区間和のための遅延伝搬つき演算
pub struct SumAddOp<T>(PhantomData<T>);

impl_marker! { MinCountMonoid, MinCountOp, SumAddOp }

impl<T: Ord + Clone> Magma for MinCountMonoid<T> {
    type T = MinCount<T>;
    fn op(&self, lhs: &MinCount<T>, rhs: &MinCount<T>) -> MinCount<T> {
        match lhs.min.cmp(&rhs.min) {
            std::cmp::Ordering::Less => lhs.clone(),
            std::cmp::Ordering::Greater => rhs.clone(),
            std::cmp::Ordering::Equal => MinCount {
                min: lhs.min.clone(),
                count: lhs.count + rhs.count,
            },
        }
    }
}
impl<T: Ord + Clone + HasMax> Identity for MinCountMonoid<T> {
    fn e(&self) -> MinCount<T> {
        MinCount {
            min: T::max_value(),
            count: 0,
        }
    }
}
impl<T: Ord + Clone> Associativity for MinCountMonoid<T> {}

impl<T: Ord + Clone + HasMax> Operation for MinCountOp<T> {
    type Node = MinCount<T>;
    type Value = T;

    fn neutral(&self) -> MinCount<T> {
        MinCountMonoid::<T>::new().e()
    }

    fn combine(&self, left: &MinCount<T>, right: &MinCount<T>) -> MinCount<T> {
        MinCountMonoid::<T>::new().op(left, right)
    }

    fn update_leaf(&self, node: &mut MinCount<T>, value: &T) {
        *node = MinCount::leaf(value.clone());
    }
}

/// 区間の和と長さ, および区間全体にまだ伝搬していない加算量
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SumAdd<T> {
    pub sum: T,
    pub size: T,
    pub added: T,
}

impl<T: Copy + Add<Output = T> + Mul<Output = T>> SumAdd<T> {
    /// 遅延中の加算も含めた区間の和を返す
    #[must_use]
    pub fn total(&self) -> T {
        self.sum + self.size * self.added
    }
}

impl<T> Operation for SumAddOp<T>
where
    T: Copy + Eq + HasZero + HasOne + Add<Output = T> + Mul<Output = T>,
{
    type Node = SumAdd<T>;
    type Value = T;

    fn neutral(&self) -> SumAdd<T> {
        SumAdd {
            sum: T::zero(),
            size: T::zero(),
            added: T::zero(),
        }
    }

    fn init(&self) -> SumAdd<T> {
        SumAdd {
            sum: T::zero(),
            size: T::one(),
            added: T::zero(),
        }
    }

    fn combine(&self, left: &SumAdd<T>, right: &SumAdd<T>) -> SumAdd<T> {
        SumAdd {
            sum: left.total() + right.total(),
            size: left.size + right.size,
            added: T::zero(),
        }
    }

    fn update_leaf(&self, node: &mut SumAdd<T>, value: &T) {
        node.sum = *value;
        node.added = T::zero();
    }

    fn push(&self, node: &mut SumAdd<T>, left: &mut SumAdd<T>, right: &mut SumAdd<T>) {
        if node.added == T::zero() {
            return;
        }
        left.added = left.added + node.added;
        right.added = right.added + node.added;
        node.sum = left.total() + right.total();
        node.added = T::zero();
    }

    fn update_range(&self, node: &mut SumAdd<T>, value: &T) {
        node.added = node.added + *value;
    }
}
