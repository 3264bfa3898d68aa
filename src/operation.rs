use super::util::Monoid;

/// セグメントツリーのノードに対する演算の集まり
///
/// 以下を満たす必要がある. 満たさない場合の結果は未定義である(パニックはしない).
///
/// - 任意の`x`について`combine(neutral(), x) == combine(x, neutral()) == x`
/// - `combine`は結合律を満たす
/// - 区間更新を使う場合, `push`と`update_range`を実装している
pub trait Operation {
    /// ノードの型. 値に加えて遅延伝搬用の状態を持ってもよい
    type Node: Clone;
    /// 更新に使う値の型
    type Value;

    /// 単位元を返す
    fn neutral(&self) -> Self::Node;

    /// まだ値の入っていない葉の初期値を返す
    fn init(&self) -> Self::Node {
        self.neutral()
    }

    /// 隣り合う2つのノードを結合する
    fn combine(&self, left: &Self::Node, right: &Self::Node) -> Self::Node;

    /// 葉の値を`value`で書き換える
    fn update_leaf(&self, node: &mut Self::Node, value: &Self::Value);

    /// `node`に溜まっている遅延作用を子に伝搬し, `node`の遅延作用を空にする
    fn push(&self, _node: &mut Self::Node, _left: &mut Self::Node, _right: &mut Self::Node) {}

    /// `node`が表す区間全体に`value`を作用させる. 子には触れない
    fn update_range(&self, _node: &mut Self::Node, _value: &Self::Value) {}
}

/// モノイドをそのまま[`Operation`]として扱うアダプタ
///
/// ノードは値そのものであり, 葉の更新は上書きになる.
/// 遅延作用を持たないので区間更新には使えない.
#[derive(Clone, Default)]
pub struct SimpleOperation<M: Monoid>(pub M);

impl<M: Monoid> SimpleOperation<M> {
    #[must_use]
    pub fn new(monoid: M) -> Self {
        Self(monoid)
    }

    /// 内部のモノイドを返す
    #[must_use]
    pub fn monoid(&self) -> &M {
        &self.0
    }
}

impl<M: Monoid> Operation for SimpleOperation<M> {
    type Node = M::T;
    type Value = M::T;

    fn neutral(&self) -> M::T {
        self.0.e()
    }

    fn combine(&self, left: &M::T, right: &M::T) -> M::T {
        self.0.op(left, right)
    }

    fn update_leaf(&self, node: &mut M::T, value: &M::T) {
        *node = value.clone();
    }
}
