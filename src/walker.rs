//! Depth-first tree traversal
//!
//! Visits every node once in pre-order (document order) with enter/exit
//! callbacks. Uses an explicit stack so deeply nested documents cannot
//! overflow the call stack.

use crate::syntax::Node;

/// What the walker should do after entering a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkControl {
    /// Descend into the node's children
    Continue,
    /// Do not descend into this subtree; keep walking its siblings
    SkipChildren,
    /// Abort the whole walk
    Stop,
}

/// How a walk ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Walked {
    Completed,
    Stopped,
}

impl Walked {
    pub fn is_stopped(self) -> bool {
        self == Walked::Stopped
    }
}

/// Callbacks fired by [`walk`]
pub trait Visitor {
    /// Called before a node's children are visited
    fn enter(&mut self, node: &dyn Node) -> WalkControl;

    /// Called after all of a node's children have been visited.
    ///
    /// Also fires for a node whose children were skipped. Never fires once the
    /// walk has been stopped.
    fn exit(&mut self, _node: &dyn Node) {}
}

enum Step<'a> {
    Enter(&'a dyn Node),
    Exit(&'a dyn Node),
}

/// Walk the subtree rooted at `root`
pub fn walk<V: Visitor + ?Sized>(root: &dyn Node, visitor: &mut V) -> Walked {
    let mut stack = vec![Step::Enter(root)];

    while let Some(step) = stack.pop() {
        match step {
            Step::Enter(node) => match visitor.enter(node) {
                WalkControl::Stop => return Walked::Stopped,
                WalkControl::SkipChildren => stack.push(Step::Exit(node)),
                WalkControl::Continue => {
                    stack.push(Step::Exit(node));
                    // Reversed so the leftmost child is popped first
                    stack.extend(node.children().into_iter().rev().map(Step::Enter));
                }
            },
            Step::Exit(node) => visitor.exit(node),
        }
    }

    Walked::Completed
}

/// Visitor built from an enter closure
struct EnterFn<F>(F);

impl<F> Visitor for EnterFn<F>
where
    F: FnMut(&dyn Node) -> WalkControl,
{
    fn enter(&mut self, node: &dyn Node) -> WalkControl {
        (self.0)(node)
    }
}

/// Walk with only an enter callback
pub fn walk_with<F>(root: &dyn Node, enter: F) -> Walked
where
    F: FnMut(&dyn Node) -> WalkControl,
{
    walk(root, &mut EnterFn(enter))
}

/// Call `f` on every node in document order
pub fn for_each_node<F>(root: &dyn Node, mut f: F)
where
    F: FnMut(&dyn Node),
{
    walk_with(root, |node| {
        f(node);
        WalkControl::Continue
    });
}

/// Whether any node in the subtree (root included) satisfies `predicate`.
///
/// Stops at the first match.
pub fn any_node<P>(root: &dyn Node, mut predicate: P) -> bool
where
    P: FnMut(&dyn Node) -> bool,
{
    walk_with(root, |node| {
        if predicate(node) {
            WalkControl::Stop
        } else {
            WalkControl::Continue
        }
    })
    .is_stopped()
}
