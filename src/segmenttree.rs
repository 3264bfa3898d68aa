use super::handle::{Position, QueryHandle, RangeQueryHandle};
use super::layout::Layout;
use super::ndarray::NdView;
use super::operation::{Operation, SimpleOperation};
use tracing::{debug, trace};

/// 多次元セグメントツリー
///
/// 軸に平行な直方体領域に対する集約の取得と, 1点の更新が可能である.
/// [`Operation::push`]と[`Operation::update_range`]を実装した演算を使えば,
/// 1次元の木では区間更新も可能である.
///
/// 各次元の木は1本の配列に[`Layout`]で詰められている.
/// 外側の次元の頂点ごとに内側の次元の木が丸ごと1本あり,
/// 最も内側の次元でのみ遅延伝搬を行う.
#[derive(Clone)]
pub struct SegmentTree<O: Operation>(Box<[O::Node]>, Layout, O);

/// モノイドをそのまま載せたセグメントツリー
pub type SimpleSegmentTree<M> = SegmentTree<SimpleOperation<M>>;

impl<O: Operation> SegmentTree<O> {
    /// 全ての要素が`op.init()`である, 各次元の長さが`dims`の木を構築する
    ///
    /// # Constraints
    ///
    /// - `dims`は空でなく, 各要素は正である
    ///
    /// # Time complexity
    ///
    /// - *O*(4^*d* Π dims)
    #[must_use]
    pub fn new(op: O, dims: &[usize]) -> Self {
        let mut tree = Self::allocate(op, dims);
        let mut position = Position::root(tree.dims());
        tree.build(&|_, _, _| {}, &mut position, 0);
        tree
    }

    /// 多次元配列`view`から木を構築する
    ///
    /// # Constraints
    ///
    /// - `view`の各次元の長さは正である
    ///
    /// # Time complexity
    ///
    /// - *O*(4^*d* Π dims)
    #[must_use]
    pub fn from_view<V: NdView<O::Value> + ?Sized>(op: O, view: &V) -> Self {
        let mut tree = Self::allocate(op, &view.dims());
        let mut position = Position::root(tree.dims());
        tree.build(
            &|op, node, index| op.update_leaf(node, view.at(index)),
            &mut position,
            0,
        );
        tree
    }

    fn allocate(op: O, dims: &[usize]) -> Self {
        let layout = Layout::new(dims);
        debug!(
            ?dims,
            strides = ?layout.strides(),
            storage = layout.storage_len(),
            "allocating segment tree"
        );
        let storage = (0..layout.storage_len()).map(|_| op.init()).collect();
        Self(storage, layout, op)
    }

    /// 1次元の列`vec`から木を構築する
    ///
    /// # Constraints
    ///
    /// - `vec`は空でない
    ///
    /// # Time complexity
    ///
    /// - *O*(*n*)
    #[must_use]
    pub fn from_vec(op: O, vec: Vec<O::Value>) -> Self {
        Self::from_view(op, &vec)
    }

    /// 各次元の葉の数を返す
    #[must_use]
    pub fn dims(&self) -> &[usize] {
        self.1.dims()
    }

    /// 次元数を返す
    #[must_use]
    pub fn ndims(&self) -> usize {
        self.1.ndims()
    }

    #[must_use]
    pub fn operation(&self) -> &O {
        &self.2
    }

    /// この木のための1点用ハンドルを返す
    #[must_use]
    pub fn query_handle(&self) -> QueryHandle {
        QueryHandle::new(self.dims())
    }

    /// この木のための領域用ハンドルを返す
    #[must_use]
    pub fn range_query_handle(&self) -> RangeQueryHandle {
        RangeQueryHandle::new(self.dims())
    }

    /// ハンドルに設定された領域の集約を計算する
    ///
    /// ある次元で`left > right`ならば空の領域とみなし`op.neutral()`を返す.
    ///
    /// # Constraints
    ///
    /// - 各次元で`left <= right`ならば`right < dims[i]`
    ///
    /// # Time complexity
    ///
    /// - *O*(Π log dims)
    pub fn query(&mut self, handle: &mut RangeQueryHandle) -> O::Node {
        trace!(left = ?handle.left(), right = ?handle.right(), "range query");
        self.debug_check_range(handle);
        self.query_dim(handle, 0)
    }

    /// ハンドルに設定された1点の値を取得する
    ///
    /// # Constraints
    ///
    /// - `index[i] < dims[i]`
    ///
    /// # Time complexity
    ///
    /// - *O*(Σ log dims)
    pub fn get(&mut self, handle: &mut QueryHandle) -> O::Node {
        trace!(index = ?handle.index(), "point query");
        self.debug_check_index(handle);
        self.get_dim(handle, 0)
    }

    /// ハンドルに設定された1点の葉を`op.update_leaf(leaf, value)`で更新する
    ///
    /// # Constraints
    ///
    /// - `index[i] < dims[i]`
    ///
    /// # Time complexity
    ///
    /// - *O*(Π log dims)
    pub fn update(&mut self, handle: &mut QueryHandle, value: &O::Value) {
        trace!(index = ?handle.index(), "point update");
        self.debug_check_index(handle);
        self.update_dim(handle, &mut |op, node| op.update_leaf(node, value), 0);
    }

    /// ハンドルに設定された1点の葉を`f`で書き換える
    ///
    /// # Constraints
    ///
    /// - `index[i] < dims[i]`
    ///
    /// # Time complexity
    ///
    /// - *O*(Π log dims)
    pub fn update_with(&mut self, handle: &mut QueryHandle, f: impl FnOnce(&mut O::Node)) {
        trace!(index = ?handle.index(), "point update with closure");
        self.debug_check_index(handle);
        let mut f = Some(f);
        self.update_dim(
            handle,
            &mut |_, node| {
                if let Some(f) = f.take() {
                    f(node);
                }
            },
            0,
        );
    }

    /// ハンドルに設定された領域全体に`op.update_range(node, value)`を作用させる
    ///
    /// 空の領域なら何もしない.
    ///
    /// # Constraints
    ///
    /// - 木が1次元である
    /// - `left <= right`ならば`right < dims[0]`
    ///
    /// # Time complexity
    ///
    /// - *O*(log *n*)
    pub fn update_range(&mut self, handle: &mut RangeQueryHandle, value: &O::Value) {
        trace!(left = ?handle.left(), right = ?handle.right(), "range update");
        debug_assert_eq!(self.ndims(), 1, "range updates are only defined for one dimension");
        self.debug_check_range(handle);
        self.update_range_dim(handle, value, 0);
    }

    fn debug_check_index(&self, handle: &QueryHandle) {
        debug_assert_eq!(handle.index().len(), self.ndims());
        debug_assert!(handle
            .index()
            .iter()
            .zip(self.dims())
            .all(|(&i, &d)| i < d));
        debug_assert_eq!(handle.position, Position::root(self.dims()));
    }

    fn debug_check_range(&self, handle: &RangeQueryHandle) {
        debug_assert_eq!(handle.left.len(), self.ndims());
        debug_assert_eq!(handle.right.len(), self.ndims());
        debug_assert!(handle
            .left
            .iter()
            .zip(handle.right.iter())
            .zip(self.dims())
            .all(|((&l, &r), &d)| l > r || r < d));
        debug_assert_eq!(handle.position, Position::root(self.dims()));
    }

    fn is_last(&self, dim: usize) -> bool {
        dim + 1 == self.ndims()
    }

    /// 最も内側の次元の頂点`t`(木の上では`v`)の遅延作用を子に伝搬する
    fn push(&mut self, t: usize, v: usize) {
        let Self(storage, _, op) = self;
        let (head, tail) = storage.split_at_mut(t + v);
        let (left, right) = tail.split_at_mut(1);
        op.push(&mut head[t], &mut left[0], &mut right[0]);
    }

    /// 位置`t`の値を, `dim`次元目の子2つ(`t`から`v`を`2v`, `2v + 1`に変えた位置)から計算し直す
    fn pull(&mut self, t: usize, v: usize, dim: usize) {
        let stride = self.1.strides()[dim];
        let left = t + v * stride;
        let node = self.2.combine(&self.0[left], &self.0[left + stride]);
        self.0[t] = node;
    }

    /// 最も内側の次元が葉である位置`t`の値を, 葉でない最も外側の次元の子から計算し直す.
    /// 全ての次元で葉ならば`false`を返す
    fn pull_outer(&mut self, t: usize, position: &Position) -> bool {
        let last = self.ndims() - 1;
        match (0..last).find(|&i| position.ls[i] != position.rs[i]) {
            Some(i) => {
                self.pull(t, position.vs[i], i);
                true
            }
            None => false,
        }
    }

    fn build(
        &mut self,
        leaf: &dyn Fn(&O, &mut O::Node, &[usize]),
        position: &mut Position,
        dim: usize,
    ) {
        let l = position.ls[dim];
        let r = position.rs[dim];
        let v = position.vs[dim];

        if l != r {
            let m = l + (r - l) / 2;

            position.vs[dim] = 2 * v;
            position.rs[dim] = m;
            self.build(leaf, position, dim);

            position.vs[dim] = 2 * v + 1;
            position.ls[dim] = m + 1;
            position.rs[dim] = r;
            self.build(leaf, position, dim);

            position.vs[dim] = v;
            position.ls[dim] = l;
        }

        if !self.is_last(dim) {
            self.build(leaf, position, dim + 1);
            return;
        }

        let t = self.1.offset(&position.vs);
        if l != r {
            self.pull(t, v, dim);
        } else if !self.pull_outer(t, position) {
            let Self(storage, _, op) = self;
            leaf(op, &mut storage[t], &position.ls);
        }
    }

    fn get_dim(&mut self, handle: &mut QueryHandle, dim: usize) -> O::Node {
        let l = handle.position.ls[dim];
        let r = handle.position.rs[dim];

        if l == r {
            if self.is_last(dim) {
                return self.0[self.1.offset(&handle.position.vs)].clone();
            }
            return self.get_dim(handle, dim + 1);
        }

        let v = handle.position.vs[dim];
        let m = l + (r - l) / 2;
        if self.is_last(dim) {
            let t = self.1.offset(&handle.position.vs);
            self.push(t, v);
        }

        if handle.index()[dim] <= m {
            handle.position.vs[dim] = 2 * v;
            handle.position.rs[dim] = m;
        } else {
            handle.position.vs[dim] = 2 * v + 1;
            handle.position.ls[dim] = m + 1;
        }
        let node = self.get_dim(handle, dim);

        handle.position.vs[dim] = v;
        handle.position.ls[dim] = l;
        handle.position.rs[dim] = r;
        node
    }

    fn update_dim(
        &mut self,
        handle: &mut QueryHandle,
        f: &mut dyn FnMut(&O, &mut O::Node),
        dim: usize,
    ) {
        let l = handle.position.ls[dim];
        let r = handle.position.rs[dim];
        let v = handle.position.vs[dim];
        let t = self.1.offset(&handle.position.vs);

        if l != r {
            let m = l + (r - l) / 2;
            if self.is_last(dim) {
                self.push(t, v);
            }

            if handle.index()[dim] <= m {
                handle.position.vs[dim] = 2 * v;
                handle.position.rs[dim] = m;
            } else {
                handle.position.vs[dim] = 2 * v + 1;
                handle.position.ls[dim] = m + 1;
            }
            self.update_dim(handle, f, dim);

            handle.position.vs[dim] = v;
            handle.position.ls[dim] = l;
            handle.position.rs[dim] = r;
        }

        if !self.is_last(dim) {
            self.update_dim(handle, f, dim + 1);
            return;
        }

        if l != r {
            self.pull(t, v, dim);
        } else if !self.pull_outer(t, &handle.position) {
            let Self(storage, _, op) = self;
            f(op, &mut storage[t]);
        }
    }

    fn query_dim(&mut self, handle: &mut RangeQueryHandle, dim: usize) -> O::Node {
        let ql = handle.left[dim];
        let qr = handle.right[dim];
        if ql > qr {
            return self.2.neutral();
        }

        let l = handle.position.ls[dim];
        let r = handle.position.rs[dim];
        let t = self.1.offset(&handle.position.vs);

        if l == ql && r == qr {
            if self.is_last(dim) {
                return self.0[t].clone();
            }
            return self.query_dim(handle, dim + 1);
        }

        let v = handle.position.vs[dim];
        let m = l + (r - l) / 2;
        if self.is_last(dim) {
            self.push(t, v);
        }

        handle.position.vs[dim] = 2 * v;
        handle.position.rs[dim] = m;
        handle.right[dim] = qr.min(m);
        let left = self.query_dim(handle, dim);

        handle.position.vs[dim] = 2 * v + 1;
        handle.position.ls[dim] = m + 1;
        handle.position.rs[dim] = r;
        handle.left[dim] = ql.max(m + 1);
        handle.right[dim] = qr;
        let right = self.query_dim(handle, dim);

        handle.position.vs[dim] = v;
        handle.position.ls[dim] = l;
        handle.left[dim] = ql;
        self.2.combine(&left, &right)
    }

    fn update_range_dim(&mut self, handle: &mut RangeQueryHandle, value: &O::Value, dim: usize) {
        let ql = handle.left[dim];
        let qr = handle.right[dim];
        if ql > qr {
            return;
        }

        let l = handle.position.ls[dim];
        let r = handle.position.rs[dim];
        let t = self.1.offset(&handle.position.vs);

        if l == ql && r == qr {
            if self.is_last(dim) {
                let Self(storage, _, op) = self;
                op.update_range(&mut storage[t], value);
            } else {
                self.update_range_dim(handle, value, dim + 1);
            }
            return;
        }

        let v = handle.position.vs[dim];
        let m = l + (r - l) / 2;
        if self.is_last(dim) {
            self.push(t, v);
        }

        handle.position.vs[dim] = 2 * v;
        handle.position.rs[dim] = m;
        handle.right[dim] = qr.min(m);
        self.update_range_dim(handle, value, dim);

        handle.position.vs[dim] = 2 * v + 1;
        handle.position.ls[dim] = m + 1;
        handle.position.rs[dim] = r;
        handle.left[dim] = ql.max(m + 1);
        handle.right[dim] = qr;
        self.update_range_dim(handle, value, dim);

        handle.position.vs[dim] = v;
        handle.position.ls[dim] = l;
        handle.left[dim] = ql;

        if self.is_last(dim) {
            self.pull(t, v, dim);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::ndarray::NdArray;
    use super::super::presets::{Min, MinCount, MinCountOp, Sum, SumAddOp};
    use super::*;

    #[test]
    fn sum_add_one_dimension() {
        let mut seg = SegmentTree::from_vec(SumAddOp::<i64>::new(), vec![3, 1, 4, 1, 5]);
        let mut range = seg.range_query_handle();
        let mut point = seg.query_handle();

        range.set_range(&[1], &[3]);
        assert_eq!(seg.query(&mut range).total(), 6);

        point.set_index(&[2]);
        seg.update(&mut point, &10);
        assert_eq!(seg.query(&mut range).total(), 12);

        range.set_range(&[0], &[4]);
        seg.update_range(&mut range, &2);
        assert_eq!(seg.query(&mut range).total(), 30);

        range.set_range(&[3], &[4]);
        assert_eq!(seg.query(&mut range).total(), 10);
        assert_eq!(seg.get(&mut point).total(), 12);
    }

    #[test]
    fn sum_add_overlapping_ranges() {
        let mut seg = SegmentTree::new(SumAddOp::<i64>::new(), &[8]);
        let mut range = seg.range_query_handle();
        let mut naive = [0i64; 8];

        for (l, r, x) in [(0, 7, 1), (2, 5, 3), (5, 6, -2), (0, 0, 7), (3, 7, 4)] {
            range.set_range(&[l], &[r]);
            seg.update_range(&mut range, &x);
            naive[l..=r].iter_mut().for_each(|v| *v += x);
        }
        for l in 0..8 {
            for r in l..8 {
                range.set_range(&[l], &[r]);
                assert_eq!(seg.query(&mut range).total(), naive[l..=r].iter().sum::<i64>());
            }
        }

        let mut point = seg.query_handle();
        point.set_index(&[5]);
        seg.update(&mut point, &0);
        naive[5] = 0;
        range.set_range(&[0], &[7]);
        assert_eq!(seg.query(&mut range).total(), naive.iter().sum::<i64>());
    }

    #[test]
    fn min_two_dimensions() {
        let mut grid = NdArray::filled(&[3, 3], 0).unwrap();
        grid[&[1usize, 1][..]] = 1;
        let mut seg = SimpleSegmentTree::from_view(SimpleOperation::new(Min::<i32>::new()), &grid);
        let mut range = seg.range_query_handle();

        range.set_range(&[0, 0], &[2, 2]);
        assert_eq!(seg.query(&mut range), 0);
        range.set_range(&[1, 1], &[1, 1]);
        assert_eq!(seg.query(&mut range), 1);
        range.set_range(&[1, 2], &[1, 1]);
        assert_eq!(seg.query(&mut range), i32::MAX);
    }

    #[test]
    fn sum_three_dimensions() {
        let dims = [3, 4, 5];
        let array = NdArray::from_fn(&dims, |i| (i[0] * 100 + i[1] * 10 + i[2]) as i64).unwrap();
        let mut seg = SimpleSegmentTree::from_view(SimpleOperation::new(Sum::<i64>::new()), &array);
        let mut range = seg.range_query_handle();

        let brute = |array: &NdArray<i64>, l: [usize; 3], r: [usize; 3]| {
            let mut s = 0;
            for a in l[0]..=r[0] {
                for b in l[1]..=r[1] {
                    for c in l[2]..=r[2] {
                        s += array[&[a, b, c][..]];
                    }
                }
            }
            s
        };

        range.set_range(&[0, 1, 2], &[2, 3, 3]);
        assert_eq!(seg.query(&mut range), brute(&array, [0, 1, 2], [2, 3, 3]));

        let mut array = array;
        let mut point = seg.query_handle();
        point.set_index(&[1, 2, 3]);
        seg.update(&mut point, &-1000);
        array[&[1usize, 2, 3][..]] = -1000;
        seg.update_with(&mut point, |x| *x *= 2);
        array[&[1usize, 2, 3][..]] *= 2;
        assert_eq!(seg.get(&mut point), -2000);

        for (l, r) in [([0, 0, 0], [2, 3, 4]), ([1, 2, 3], [1, 2, 3]), ([1, 0, 2], [2, 3, 4])] {
            range.set_range(&l, &r);
            assert_eq!(seg.query(&mut range), brute(&array, l, r));
        }
    }

    #[test]
    fn min_count() {
        let mut seg = SegmentTree::from_vec(MinCountOp::<i32>::new(), vec![2, 1, 1, 3, 1, 2]);
        let mut range = seg.range_query_handle();
        range.set_range(&[0], &[5]);
        assert_eq!(seg.query(&mut range), MinCount { min: 1, count: 3 });
        range.set_range(&[3], &[3]);
        assert_eq!(seg.query(&mut range), MinCount { min: 3, count: 1 });

        let mut point = seg.query_handle();
        point.set_index(&[1]);
        seg.update(&mut point, &0);
        range.set_range(&[0], &[5]);
        assert_eq!(seg.query(&mut range), MinCount { min: 0, count: 1 });
    }

    #[test]
    fn empty_tree_uses_init() {
        let mut seg = SegmentTree::new(SumAddOp::<i64>::new(), &[4]);
        let mut range = seg.range_query_handle();
        range.set_range(&[0], &[3]);
        assert_eq!(seg.query(&mut range).total(), 0);
        seg.update_range(&mut range, &1);
        assert_eq!(seg.query(&mut range).total(), 4);
        assert_eq!(seg.query(&mut range).size, 4);
    }

    #[test]
    fn single_leaf() {
        let grid = NdArray::filled(&[1, 1], 7).unwrap();
        let mut seg = SimpleSegmentTree::from_view(SimpleOperation::new(Min::<i32>::new()), &grid);
        let mut range = seg.range_query_handle();
        range.set_range(&[0, 0], &[0, 0]);
        assert_eq!(seg.query(&mut range), 7);
        let mut point = seg.query_handle();
        seg.update(&mut point, &3);
        assert_eq!(seg.query(&mut range), 3);
    }
}
