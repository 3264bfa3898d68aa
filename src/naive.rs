use super::ndarray::{NdArray, NdView, ShapeError};
use super::util::{Magma, Monoid};

/// 愚直に全要素をなめる区間クエリの実装
///
/// 他の実装の答え合わせに使う. 要素`V`は`lift`でモノイドの元に変換してから畳み込む.
pub struct NaiveEngine<M: Monoid, V = <M as Magma>::T> {
    monoid: M,
    data: NdArray<V>,
    lift: fn(&V) -> M::T,
}

impl<M: Monoid> NaiveEngine<M, M::T> {
    /// 要素がそのままモノイドの元であるような配列から構築する
    pub fn from_view<W: NdView<M::T> + ?Sized>(monoid: M, view: &W) -> Result<Self, ShapeError> {
        Self::with_lift(monoid, view, Clone::clone)
    }
}

impl<M: Monoid, V: Clone> NaiveEngine<M, V> {
    /// `view`の中身を複製して構築する
    pub fn with_lift<W: NdView<V> + ?Sized>(
        monoid: M,
        view: &W,
        lift: fn(&V) -> M::T,
    ) -> Result<Self, ShapeError> {
        let data = NdArray::from_fn(&view.dims(), |index| view.at(index).clone())?;
        Ok(Self { monoid, data, lift })
    }
}

/// `left`から`right`までの添字を辞書順に`f`に渡す
fn for_each_index(left: &[usize], right: &[usize], mut f: impl FnMut(&[usize])) {
    if left.iter().zip(right).any(|(l, r)| l > r) {
        return;
    }
    let mut index = left.to_vec();
    loop {
        f(&index);
        let mut axis = index.len();
        loop {
            if axis == 0 {
                return;
            }
            axis -= 1;
            if index[axis] < right[axis] {
                index[axis] += 1;
                break;
            }
            index[axis] = left[axis];
        }
    }
}

impl<M: Monoid, V> NaiveEngine<M, V> {
    /// 各次元の長さを返す
    #[must_use]
    pub fn dims(&self) -> &[usize] {
        self.data.shape()
    }

    /// 両端を含む直方体`[left, right]`の集約を計算する
    ///
    /// # Time complexity
    ///
    /// - *O*(領域の要素数)
    #[must_use]
    pub fn fold(&self, left: &[usize], right: &[usize]) -> M::T {
        let mut acc = self.monoid.e();
        for_each_index(left, right, |index| {
            acc = self.monoid.op(&acc, &(self.lift)(&self.data[index]));
        });
        acc
    }

    /// 1点の値を`value`にする
    pub fn set(&mut self, index: &[usize], value: V) {
        self.data[index] = value;
    }

    /// 添字`index`の値を返す
    #[must_use]
    pub fn get(&self, index: &[usize]) -> &V {
        &self.data[index]
    }

    /// 直方体`[left, right]`の全要素に`value`を加える
    pub fn add_range(&mut self, left: &[usize], right: &[usize], value: &V)
    where
        V: Clone + std::ops::AddAssign,
    {
        let data = &mut self.data;
        for_each_index(left, right, |index| data[index] += value.clone());
    }
}
