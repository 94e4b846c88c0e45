//! Depth-first traversal of a node tree.

use super::{ConfigurationNode, NodeValue, Scalar};

/// Callbacks for [`ConfigurationNode::visit`].
///
/// Every node is first passed to `enter_node`; maps and lists are then
/// bracketed by their enter/exit callbacks around their children, while
/// scalars go to `visit_scalar`. Any error stops the traversal.
pub trait NodeVisitor {
    type Output;
    type Error;

    fn enter_node(&mut self, _node: &ConfigurationNode) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_map(&mut self, _node: &ConfigurationNode) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_map(&mut self, _node: &ConfigurationNode) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_list(&mut self, _node: &ConfigurationNode) -> Result<(), Self::Error> {
        Ok(())
    }

    fn exit_list(&mut self, _node: &ConfigurationNode) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_scalar(
        &mut self,
        _node: &ConfigurationNode,
        _scalar: &Scalar,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Produce the result once the whole tree has been visited.
    fn finish(self) -> Result<Self::Output, Self::Error>;
}

impl ConfigurationNode {
    /// Walk this node and its descendants with `visitor`.
    pub fn visit<V: NodeVisitor>(&self, mut visitor: V) -> Result<V::Output, V::Error> {
        self.walk(&mut visitor)?;
        visitor.finish()
    }

    fn walk<V: NodeVisitor>(&self, visitor: &mut V) -> Result<(), V::Error> {
        visitor.enter_node(self)?;
        match &self.value {
            NodeValue::Scalar(scalar) => visitor.visit_scalar(self, scalar),
            NodeValue::List(items) => {
                visitor.enter_list(self)?;
                for item in items {
                    item.walk(visitor)?;
                }
                visitor.exit_list(self)
            }
            NodeValue::Map(children) => {
                visitor.enter_map(self)?;
                for child in children {
                    child.walk(visitor)?;
                }
                visitor.exit_map(self)
            }
        }
    }
}
