use super::handle::{QueryHandle, RangeQueryHandle};
use super::naive::NaiveEngine;
use super::operation::Operation;
use super::segmenttree::SegmentTree;
use super::util::Monoid;

/// 直方体領域の集約と更新を扱うデータ構造の共通インターフェース
///
/// 同じ入力から作った2つの実装に同じハンドルを与え, 結果を突き合わせるために使う.
pub trait RangeEngine {
    /// 集約結果の型
    type Node;
    /// 更新に使う値の型
    type Value;

    fn query_handle(&self) -> QueryHandle;
    fn range_query_handle(&self) -> RangeQueryHandle;
    fn query(&mut self, handle: &mut RangeQueryHandle) -> Self::Node;
    fn update(&mut self, handle: &mut QueryHandle, value: &Self::Value);
    fn update_range(&mut self, handle: &mut RangeQueryHandle, value: &Self::Value);
}

impl<O: Operation> RangeEngine for SegmentTree<O> {
    type Node = O::Node;
    type Value = O::Value;

    fn query_handle(&self) -> QueryHandle {
        SegmentTree::query_handle(self)
    }
    fn range_query_handle(&self) -> RangeQueryHandle {
        SegmentTree::range_query_handle(self)
    }
    fn query(&mut self, handle: &mut RangeQueryHandle) -> O::Node {
        SegmentTree::query(self, handle)
    }
    fn update(&mut self, handle: &mut QueryHandle, value: &O::Value) {
        SegmentTree::update(self, handle, value)
    }
    fn update_range(&mut self, handle: &mut RangeQueryHandle, value: &O::Value) {
        SegmentTree::update_range(self, handle, value)
    }
}

impl<M, V> RangeEngine for NaiveEngine<M, V>
where
    M: Monoid,
    V: Clone + std::ops::AddAssign,
{
    type Node = M::T;
    type Value = V;

    fn query_handle(&self) -> QueryHandle {
        QueryHandle::new(self.dims())
    }
    fn range_query_handle(&self) -> RangeQueryHandle {
        RangeQueryHandle::new(self.dims())
    }
    fn query(&mut self, handle: &mut RangeQueryHandle) -> M::T {
        self.fold(handle.left(), handle.right())
    }
    fn update(&mut self, handle: &mut QueryHandle, value: &V) {
        self.set(handle.index(), value.clone());
    }
    fn update_range(&mut self, handle: &mut RangeQueryHandle, value: &V) {
        self.add_range(handle.left(), handle.right(), value);
    }
}
