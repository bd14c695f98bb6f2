//! Wrapping an expression statement in the output call.

use super::options::OutputCallee;
use crate::transforms::TransformError;
use autocon_parser::parser::node::{
    CallExpressionData, IdentifierData, MemberExpressionData, NodeData,
};
use autocon_parser::{NodeArena, NodeFlags, NodeIndex, NodeList};

/// Replace `statement`'s expression `e` with `object.property(e)`.
///
/// The original expression node is moved under the new call, not copied.
/// The new nodes borrow `e`'s source range and are flagged `SYNTHESIZED`.
/// Returns the index of the new call.
pub fn wrap_statement(
    arena: &mut NodeArena,
    statement: NodeIndex,
    callee: &OutputCallee,
) -> Result<NodeIndex, TransformError> {
    let expression = match arena.get(statement).map(|n| &n.data) {
        Some(NodeData::ExpressionStatement(stmt)) if stmt.expression.is_some() => stmt.expression,
        _ => return Err(TransformError::malformed(arena, statement, "expression")),
    };
    let Some(original) = arena.get(expression) else {
        return Err(TransformError::malformed(arena, statement, "expression"));
    };
    let (pos, end) = (original.pos, original.end);
    let flags = NodeFlags::SYNTHESIZED;

    let object = arena.add_with_flags(
        pos,
        end,
        flags,
        NodeData::Identifier(IdentifierData {
            name: callee.object.clone(),
        }),
    );
    let property = arena.add_with_flags(
        pos,
        end,
        flags,
        NodeData::Identifier(IdentifierData {
            name: callee.property.clone(),
        }),
    );
    let member = arena.add_with_flags(
        pos,
        end,
        flags,
        NodeData::MemberExpression(MemberExpressionData {
            object,
            property,
            computed: false,
            question_dot_token: false,
        }),
    );
    let call = arena.add_with_flags(
        pos,
        end,
        flags,
        NodeData::CallExpression(CallExpressionData {
            callee: member,
            arguments: NodeList::from_vec(vec![expression]),
        }),
    );

    if let Some(NodeData::ExpressionStatement(stmt)) =
        arena.get_mut(statement).map(|n| &mut n.data)
    {
        stmt.expression = call;
    }
    Ok(call)
}

#[cfg(test)]
mod tests {
    use super::*;
    use autocon_parser::parser::node::ExpressionStatementData;

    #[test]
    fn moves_expression_under_new_call() {
        let mut arena = NodeArena::new();
        let expr = arena.add(
            3,
            8,
            NodeData::Identifier(IdentifierData {
                name: "value".to_string(),
            }),
        );
        let stmt = arena.add(
            3,
            9,
            NodeData::ExpressionStatement(ExpressionStatementData { expression: expr }),
        );

        let call = wrap_statement(&mut arena, stmt, &OutputCallee::default()).unwrap();

        let NodeData::ExpressionStatement(data) = &arena.get(stmt).unwrap().data else {
            panic!("statement kind changed");
        };
        assert_eq!(data.expression, call);
        let call_node = arena.get(call).unwrap();
        assert!(call_node.is_synthesized());
        assert_eq!((call_node.pos, call_node.end), (3, 8));
        let NodeData::CallExpression(call_data) = &call_node.data else {
            panic!("expected call");
        };
        assert_eq!(call_data.arguments.nodes, vec![expr]);
        assert!(OutputCallee::default().matches(&arena, call_data.callee));
        assert!(!arena.get(expr).unwrap().is_synthesized());
    }

    #[test]
    fn missing_expression_is_malformed() {
        let mut arena = NodeArena::new();
        let stmt = arena.add(
            0,
            1,
            NodeData::ExpressionStatement(ExpressionStatementData {
                expression: NodeIndex::NONE,
            }),
        );
        let err = wrap_statement(&mut arena, stmt, &OutputCallee::default()).unwrap_err();
        assert_eq!(
            err,
            TransformError::MalformedNode {
                node: stmt,
                kind: Some(autocon_parser::NodeKind::ExpressionStatement),
                field: "expression",
            }
        );
    }
}
