/// 各次元について, 今見ている木の頂点`vs[i]`と, それが受け持つ葉の区間`[ls[i], rs[i]]`
///
/// 探索が終わると必ず根に戻っている.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Position {
    pub(crate) vs: Box<[usize]>,
    pub(crate) ls: Box<[usize]>,
    pub(crate) rs: Box<[usize]>,
}

impl Position {
    pub(crate) fn root(dims: &[usize]) -> Self {
        Self {
            vs: vec![1; dims.len()].into(),
            ls: vec![0; dims.len()].into(),
            rs: dims.iter().map(|&d| d - 1).collect(),
        }
    }
}

/// 1点に対する取得・更新に使うハンドル
///
/// 同じ次元の木であれば使い回せる.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryHandle {
    index: Box<[usize]>,
    pub(crate) position: Position,
}

impl QueryHandle {
    /// 各次元の長さが`dims`の木のための, 添字が全て0のハンドルを作る
    #[must_use]
    pub fn new(dims: &[usize]) -> Self {
        Self {
            index: vec![0; dims.len()].into(),
            position: Position::root(dims),
        }
    }

    #[must_use]
    pub fn index(&self) -> &[usize] {
        &self.index
    }

    pub fn index_mut(&mut self) -> &mut [usize] {
        &mut self.index
    }

    /// # Constraints
    ///
    /// - `index.len()`が次元数と等しい
    pub fn set_index(&mut self, index: &[usize]) {
        self.index.copy_from_slice(index);
    }
}

/// 直方体領域に対する取得・更新に使うハンドル
///
/// 領域は両端を含む`[left[i], right[i]]`の直積である.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RangeQueryHandle {
    pub(crate) left: Box<[usize]>,
    pub(crate) right: Box<[usize]>,
    pub(crate) position: Position,
}

impl RangeQueryHandle {
    /// 各次元の長さが`dims`の木のための, 領域が原点1点のハンドルを作る
    #[must_use]
    pub fn new(dims: &[usize]) -> Self {
        Self {
            left: vec![0; dims.len()].into(),
            right: vec![0; dims.len()].into(),
            position: Position::root(dims),
        }
    }

    #[must_use]
    pub fn left(&self) -> &[usize] {
        &self.left
    }

    #[must_use]
    pub fn right(&self) -> &[usize] {
        &self.right
    }

    /// 領域の左端と右端の可変参照を返す
    pub fn range_mut(&mut self) -> (&mut [usize], &mut [usize]) {
        (&mut self.left, &mut self.right)
    }

    /// # Constraints
    ///
    /// - `left.len()`と`right.len()`が次元数と等しい
    pub fn set_range(&mut self, left: &[usize], right: &[usize]) {
        self.left.copy_from_slice(left);
        self.right.copy_from_slice(right);
    }
}
