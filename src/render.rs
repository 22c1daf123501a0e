//! Diagnostic rendering of [`Llrb`] tree shape.
//!
//! Every node is printed on its own line, children are prefixed with the
//! branch they hang from, `r` or `l`, and the color of their link, `(red)`
//! or `(blk)`. Right subtree is rendered before left subtree:
//!
//! ```text
//! 4
//! ├r(blk)── 6
//! |     ├r(blk)── 7
//! |     └l(blk)── 5
//! └l(blk)── 2
//!      ├r(blk)── 3
//!      └l(blk)── 1
//! ```

use std::fmt;

use crate::llrb::{is_red, Llrb, Node};

impl<K, V> fmt::Display for Llrb<K, V>
where
    K: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.as_root() {
            Some(root) => render(f, root, "", ""),
            None => Ok(()),
        }
    }
}

fn render<K, V>(
    f: &mut fmt::Formatter,
    node: &Node<K, V>,
    prefix: &str,
    children_prefix: &str,
) -> fmt::Result
where
    K: fmt::Display,
{
    writeln!(f, "{}{}", prefix, node.as_key())?;

    let (left, right) = (node.left_deref(), node.right_deref());
    if let Some(right) = right {
        let (branch, indent) = match left {
            Some(_) => ("├", "|     "),
            None => ("└", "     "),
        };
        let prefix = format!("{}{}r{}── ", children_prefix, branch, link(right));
        let children_prefix = format!("{}{}", children_prefix, indent);
        render(f, right, &prefix, &children_prefix)?;
    }
    if let Some(left) = left {
        let prefix = format!("{}└l{}── ", children_prefix, link(left));
        let children_prefix = format!("{}     ", children_prefix);
        render(f, left, &prefix, &children_prefix)?;
    }
    Ok(())
}

fn link<K, V>(node: &Node<K, V>) -> &'static str {
    if is_red(Some(node)) {
        "(red)"
    } else {
        "(blk)"
    }
}
