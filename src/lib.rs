//! 多次元セグメントツリー
//!
//! *d*次元配列の軸に平行な直方体領域に対して, 結合的な演算による集約の取得と
//! 1点更新を各次元 *O*(log *n*) で行う. 1次元では遅延伝搬による区間更新もできる.
//!
//! ```
//! use hyperseg::presets::Sum;
//! use hyperseg::{SimpleOperation, SimpleSegmentTree};
//!
//! let mut seg = SimpleSegmentTree::from_vec(SimpleOperation::new(Sum::<i64>::new()), vec![3, 1, 4, 1, 5]);
//! let mut range = seg.range_query_handle();
//! range.set_range(&[1], &[3]);
//! assert_eq!(seg.query(&mut range), 6);
//!
//! let mut point = seg.query_handle();
//! point.set_index(&[2]);
//! seg.update(&mut point, &10);
//! assert_eq!(seg.query(&mut range), 12);
//! ```

pub mod handle;
pub mod layout;
pub mod naive;
pub mod ndarray;
pub mod operation;
pub mod presets;
pub mod rangeengine;
pub mod segmenttree;
pub mod util;

pub use handle::{QueryHandle, RangeQueryHandle};
pub use naive::NaiveEngine;
pub use ndarray::{NdArray, NdView, ShapeError};
pub use operation::{Operation, SimpleOperation};
pub use rangeengine::RangeEngine;
pub use segmenttree::{SegmentTree, SimpleSegmentTree};
