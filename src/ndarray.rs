use thiserror::Error;

/// [`NdArray`]の構築に失敗したときのエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("shape must have at least one dimension")]
    NoDimensions,
    #[error("dimension {axis} has size 0")]
    EmptyDimension { axis: usize },
    #[error("shape {shape:?} holds {expected} elements but {actual} were given")]
    LengthMismatch {
        shape: Vec<usize>,
        expected: usize,
        actual: usize,
    },
    #[error("row {row} has length {actual}, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

/// 多次元配列の読み取り専用ビュー
pub trait NdView<T> {
    /// 次元数を返す
    fn ndims(&self) -> usize;
    /// `axis`次元目の長さを返す
    fn dim(&self, axis: usize) -> usize;
    /// 添字`index`の要素を返す
    fn at(&self, index: &[usize]) -> &T;

    /// 各次元の長さを返す
    fn dims(&self) -> Vec<usize> {
        (0..self.ndims()).map(|axis| self.dim(axis)).collect()
    }
}

impl<T> NdView<T> for [T] {
    fn ndims(&self) -> usize {
        1
    }
    fn dim(&self, axis: usize) -> usize {
        debug_assert_eq!(axis, 0);
        self.len()
    }
    fn at(&self, index: &[usize]) -> &T {
        debug_assert_eq!(index.len(), 1);
        &self[index[0]]
    }
}

impl<T> NdView<T> for Vec<T> {
    fn ndims(&self) -> usize {
        1
    }
    fn dim(&self, axis: usize) -> usize {
        self.as_slice().dim(axis)
    }
    fn at(&self, index: &[usize]) -> &T {
        self.as_slice().at(index)
    }
}

/// 行優先で要素を持つ多次元配列
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NdArray<T> {
    shape: Box<[usize]>,
    data: Vec<T>,
}

fn validate(shape: &[usize]) -> Result<usize, ShapeError> {
    if shape.is_empty() {
        return Err(ShapeError::NoDimensions);
    }
    if let Some(axis) = shape.iter().position(|&d| d == 0) {
        return Err(ShapeError::EmptyDimension { axis });
    }
    Ok(shape.iter().product())
}

impl<T> NdArray<T> {
    /// 形状`shape`と行優先の要素列`data`から構築する
    pub fn new(shape: &[usize], data: Vec<T>) -> Result<Self, ShapeError> {
        let expected = validate(shape)?;
        if data.len() != expected {
            return Err(ShapeError::LengthMismatch {
                shape: shape.to_vec(),
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            shape: shape.into(),
            data,
        })
    }

    /// 各要素を`f(index)`で初期化する
    pub fn from_fn(shape: &[usize], mut f: impl FnMut(&[usize]) -> T) -> Result<Self, ShapeError> {
        let len = validate(shape)?;
        let mut index = vec![0; shape.len()];
        let mut data = Vec::with_capacity(len);
        for _ in 0..len {
            data.push(f(&index));
            for axis in (0..shape.len()).rev() {
                index[axis] += 1;
                if index[axis] < shape[axis] {
                    break;
                }
                index[axis] = 0;
            }
        }
        Ok(Self {
            shape: shape.into(),
            data,
        })
    }

    /// 全ての要素が`value`の配列を構築する
    pub fn filled(shape: &[usize], value: T) -> Result<Self, ShapeError>
    where
        T: Clone,
    {
        let len = validate(shape)?;
        Ok(Self {
            shape: shape.into(),
            data: vec![value; len],
        })
    }

    /// 行の列から2次元配列を構築する
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, ShapeError> {
        let width = rows.first().map_or(0, Vec::len);
        let shape = [rows.len(), width];
        let expected = validate(&shape)?;
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(ShapeError::RaggedRow {
                row,
                expected: width,
                actual: r.len(),
            });
        }
        let mut data = Vec::with_capacity(expected);
        for row in rows {
            data.extend(row);
        }
        Ok(Self {
            shape: shape.into(),
            data,
        })
    }

    #[must_use]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// 要素数を返す
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// 行優先に並んだ要素列を返す
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    fn linear(&self, index: &[usize]) -> Option<usize> {
        if index.len() != self.shape.len() {
            return None;
        }
        let mut k = 0;
        for (&i, &d) in index.iter().zip(self.shape.iter()) {
            if i >= d {
                return None;
            }
            k = k * d + i;
        }
        Some(k)
    }

    #[must_use]
    pub fn get(&self, index: &[usize]) -> Option<&T> {
        self.linear(index).map(|k| &self.data[k])
    }

    #[must_use]
    pub fn get_mut(&mut self, index: &[usize]) -> Option<&mut T> {
        self.linear(index).map(|k| &mut self.data[k])
    }
}

impl<T> From<Vec<T>> for NdArray<T> {
    /// 1次元配列にする. `vec`は空であってはならない
    fn from(vec: Vec<T>) -> Self {
        debug_assert!(!vec.is_empty());
        Self {
            shape: Box::new([vec.len()]),
            data: vec,
        }
    }
}

impl<T> std::ops::Index<&[usize]> for NdArray<T> {
    type Output = T;

    fn index(&self, index: &[usize]) -> &T {
        match self.get(index) {
            Some(v) => v,
            None => panic!("index {index:?} out of bounds for shape {:?}", self.shape),
        }
    }
}

impl<T> std::ops::IndexMut<&[usize]> for NdArray<T> {
    fn index_mut(&mut self, index: &[usize]) -> &mut T {
        let Some(k) = self.linear(index) else {
            panic!("index {index:?} out of bounds for shape {:?}", self.shape);
        };
        &mut self.data[k]
    }
}

impl<T> NdView<T> for NdArray<T> {
    fn ndims(&self) -> usize {
        self.shape.len()
    }
    fn dim(&self, axis: usize) -> usize {
        self.shape[axis]
    }
    fn at(&self, index: &[usize]) -> &T {
        &self[index]
    }
}
