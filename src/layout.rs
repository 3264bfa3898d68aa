/// 多次元セグメントツリーを1本の配列に詰めるための添字計算
///
/// 各次元は長さ`4 * dims[i]`の暗黙の完全二分木(根が1, `v`の子が`2v`と`2v + 1`)を持ち,
/// 木の上の位置`(v_0, ..., v_{n-1})`は`Σ v_i * strides[i]`番目に置かれる.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout(Box<[usize]>, Box<[usize]>);

impl Layout {
    /// # Constraints
    ///
    /// - `dims`は空でない
    /// - `dims`の各要素は正である
    #[must_use]
    pub fn new(dims: &[usize]) -> Self {
        debug_assert!(!dims.is_empty());
        debug_assert!(dims.iter().all(|&d| d > 0));

        let mut strides = vec![0; dims.len()].into_boxed_slice();
        let mut stride = 1;
        for i in (0..dims.len()).rev() {
            strides[i] = stride;
            stride *= 4 * dims[i];
        }
        Self(dims.into(), strides)
    }

    /// 次元数を返す
    #[must_use]
    pub fn ndims(&self) -> usize {
        self.0.len()
    }

    /// 各次元の葉の数を返す
    #[must_use]
    pub fn dims(&self) -> &[usize] {
        &self.0
    }

    #[must_use]
    pub fn strides(&self) -> &[usize] {
        &self.1
    }

    /// 必要な配列の長さを返す
    #[must_use]
    pub fn storage_len(&self) -> usize {
        self.1[0] * 4 * self.0[0]
    }

    /// 木の上の位置`vs`を配列の添字に変換する
    ///
    /// # Time complexity
    ///
    /// - *O*(次元数)
    #[must_use]
    pub fn offset(&self, vs: &[usize]) -> usize {
        debug_assert_eq!(vs.len(), self.ndims());
        vs.iter().zip(self.1.iter()).map(|(&v, &s)| v * s).sum()
    }
}
