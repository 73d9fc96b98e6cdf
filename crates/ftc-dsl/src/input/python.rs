//! Tree-sitter based reader for the robot DSL.
//!
//! The DSL uses Python's grammar, so parsing is delegated to the
//! `arborium-python` grammar. This module lowers the concrete tree into the
//! closed [`crate::ast`] and rejects trees that contain syntax errors.

use crate::ast::*;
use crate::error::ReadError;
use tree_sitter::{Node, Parser, Tree};

/// Parse DSL source and return its single class.
pub fn read_unit(source: &str) -> Result<Unit, ReadError> {
    let mut parser = Parser::new();
    parser
        .set_language(&arborium_python::language().into())
        .map_err(|err| ReadError::Parse(err.to_string()))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| ReadError::Parse("failed to parse".into()))?;

    let ctx = ReadContext::new(source);
    ctx.read_module(&tree)
}

struct ReadContext<'a> {
    source: &'a str,
}

impl<'a> ReadContext<'a> {
    fn new(source: &'a str) -> Self {
        Self { source }
    }

    fn node_text(&self, node: Node) -> &'a str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    fn line(node: Node) -> usize {
        node.start_position().row + 1
    }

    /// Named children, minus comments (which the grammar allows anywhere).
    fn named_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
        let mut cursor = node.walk();
        node.named_children(&mut cursor)
            .filter(|child| child.kind() != "comment")
            .collect()
    }

    fn field<'t>(node: Node<'t>, name: &str) -> Result<Node<'t>, ReadError> {
        node.child_by_field_name(name)
            .ok_or_else(|| ReadError::UnexpectedNode {
                expected: format!("{} with `{}`", node.kind(), name),
                got: node.to_sexp(),
            })
    }

    fn read_module(&self, tree: &Tree) -> Result<Unit, ReadError> {
        let root = tree.root_node();

        if root.has_error() {
            let (line, column) = first_error(root)
                .map(|node| {
                    let pos = node.start_position();
                    (pos.row + 1, pos.column + 1)
                })
                .unwrap_or((1, 1));
            return Err(ReadError::Syntax { line, column });
        }

        let mut units = Vec::new();
        for child in Self::named_children(root) {
            match child.kind() {
                "class_definition" => units.push(self.read_class(child, Vec::new())?),
                "decorated_definition" => {
                    let definition = Self::field(child, "definition")?;
                    if definition.kind() == "class_definition" {
                        let decorators = self.read_decorators(child)?;
                        units.push(self.read_class(definition, decorators)?);
                    } else {
                        tracing::warn!(
                            line = Self::line(child),
                            "ignoring decorated {} outside a class",
                            definition.kind()
                        );
                    }
                }
                "import_statement" | "import_from_statement" | "future_import_statement" => {}
                // Module docstring.
                _ if self.is_docstring(child) => {}
                other => {
                    tracing::warn!(line = Self::line(child), "ignoring top-level {}", other);
                }
            }
        }

        match units.len() {
            0 => Err(ReadError::NoUnit),
            1 => Ok(units.remove(0)),
            _ => Err(ReadError::MultipleUnits {
                names: units.into_iter().map(|u| u.name).collect(),
            }),
        }
    }

    /// A bare string at statement level, with or without an
    /// `expression_statement` wrapper.
    fn is_docstring(&self, node: Node) -> bool {
        match node.kind() {
            "string" | "concatenated_string" => true,
            "expression_statement" => {
                let children = Self::named_children(node);
                children.len() == 1
                    && matches!(children[0].kind(), "string" | "concatenated_string")
            }
            _ => false,
        }
    }

    fn read_decorators(&self, node: Node) -> Result<Vec<Expr>, ReadError> {
        let mut decorators = Vec::new();
        for child in Self::named_children(node) {
            if child.kind() != "decorator" {
                continue;
            }
            let expr = Self::named_children(child)
                .into_iter()
                .next()
                .ok_or_else(|| ReadError::Parse("decorator has no expression".into()))?;
            decorators.push(self.read_expr(expr)?);
        }
        Ok(decorators)
    }

    fn read_class(&self, node: Node, decorators: Vec<Expr>) -> Result<Unit, ReadError> {
        let name = self.node_text(Self::field(node, "name")?);
        if node.child_by_field_name("superclasses").is_some() {
            tracing::debug!(class = name, "base classes are replaced by LinearOpMode");
        }
        let body = self.read_block(Self::field(node, "body")?)?;
        Ok(Unit::new(name, decorators, body))
    }

    fn read_block(&self, node: Node) -> Result<Vec<Stmt>, ReadError> {
        let mut stmts = Vec::new();
        for child in Self::named_children(node) {
            if let Some(stmt) = self.read_stmt(child)? {
                stmts.push(stmt);
            }
        }
        Ok(stmts)
    }

    fn read_stmt(&self, node: Node) -> Result<Option<Stmt>, ReadError> {
        let stmt = match node.kind() {
            "pass_statement" => return Ok(None),

            "expression_statement" => self.read_expression_statement(node)?,

            // The grammar also places these directly under `block`.
            "assignment" => self.read_assignment(node)?,
            "augmented_assignment" => self.read_augmented_assignment(node)?,
            "call"
            | "string"
            | "concatenated_string"
            | "identifier"
            | "attribute"
            | "integer"
            | "float"
            | "true"
            | "false"
            | "none"
            | "unary_operator"
            | "not_operator"
            | "binary_operator"
            | "boolean_operator"
            | "comparison_operator"
            | "parenthesized_expression" => Stmt::expr(self.read_expr(node)?),
            "expression_list" => Stmt::unsupported("expression_list", Self::line(node)),

            "if_statement" => self.read_if_statement(node)?,
            "while_statement" => self.read_while_statement(node)?,

            "return_statement" => {
                let value = Self::named_children(node)
                    .into_iter()
                    .next()
                    .map(|expr| self.read_expr(expr))
                    .transpose()?;
                Stmt::Return { value }
            }
            "break_statement" => Stmt::Break,
            "continue_statement" => Stmt::Continue,

            "function_definition" => Stmt::Routine(self.read_function_definition(node)?),

            // Routine decorators (`@staticmethod` etc.) carry no meaning here.
            "decorated_definition" => {
                let definition = Self::field(node, "definition")?;
                match definition.kind() {
                    "function_definition" => {
                        Stmt::Routine(self.read_function_definition(definition)?)
                    }
                    other => Stmt::unsupported(other, Self::line(node)),
                }
            }

            other => Stmt::unsupported(other, Self::line(node)),
        };
        Ok(Some(stmt))
    }

    fn read_expression_statement(&self, node: Node) -> Result<Stmt, ReadError> {
        let children = Self::named_children(node);
        let [inner] = children.as_slice() else {
            // `a, b` at statement level
            return Ok(Stmt::unsupported("expression_list", Self::line(node)));
        };

        match inner.kind() {
            "assignment" => self.read_assignment(*inner),
            "augmented_assignment" => self.read_augmented_assignment(*inner),
            _ => Ok(Stmt::expr(self.read_expr(*inner)?)),
        }
    }

    fn read_assignment(&self, node: Node) -> Result<Stmt, ReadError> {
        let left = Self::field(node, "left")?;

        // Bare annotation (`x: float`) declares nothing translatable.
        let Some(right) = node.child_by_field_name("right") else {
            return Ok(Stmt::unsupported("annotation", Self::line(node)));
        };
        if right.kind() == "assignment" {
            return Ok(Stmt::unsupported("chained assignment", Self::line(node)));
        }

        Ok(Stmt::assign(self.read_expr(left)?, self.read_expr(right)?))
    }

    fn read_augmented_assignment(&self, node: Node) -> Result<Stmt, ReadError> {
        let left = Self::field(node, "left")?;
        let right = Self::field(node, "right")?;
        let op_node = Self::field(node, "operator")?;

        let op_text = self.node_text(op_node);
        let Some(op) = BinaryOp::from_augmented(op_text) else {
            return Err(ReadError::Parse(format!(
                "unknown augmented op: {}",
                op_text
            )));
        };

        Ok(Stmt::AugAssign {
            target: self.read_expr(left)?,
            op,
            value: self.read_expr(right)?,
        })
    }

    fn read_if_statement(&self, node: Node) -> Result<Stmt, ReadError> {
        let test = self.read_expr(Self::field(node, "condition")?)?;
        let body = self.read_block(Self::field(node, "consequence")?)?;

        // `elif` clauses are siblings in the tree; fold them right-to-left
        // into nested ifs in the else branch.
        let mut cursor = node.walk();
        let alternatives: Vec<Node> = node
            .children_by_field_name("alternative", &mut cursor)
            .collect();

        let mut orelse = Vec::new();
        for alt in alternatives.into_iter().rev() {
            match alt.kind() {
                "else_clause" => {
                    orelse = self.read_block(Self::field(alt, "body")?)?;
                }
                "elif_clause" => {
                    let elif_test = self.read_expr(Self::field(alt, "condition")?)?;
                    let elif_body = self.read_block(Self::field(alt, "consequence")?)?;
                    orelse = vec![Stmt::if_stmt(elif_test, elif_body, orelse)];
                }
                other => {
                    return Err(ReadError::UnexpectedNode {
                        expected: "elif_clause or else_clause".into(),
                        got: other.into(),
                    });
                }
            }
        }

        Ok(Stmt::if_stmt(test, body, orelse))
    }

    fn read_while_statement(&self, node: Node) -> Result<Stmt, ReadError> {
        if node.child_by_field_name("alternative").is_some() {
            return Ok(Stmt::unsupported("while-else", Self::line(node)));
        }
        let test = self.read_expr(Self::field(node, "condition")?)?;
        let body = self.read_block(Self::field(node, "body")?)?;
        Ok(Stmt::while_loop(test, body))
    }

    fn read_function_definition(&self, node: Node) -> Result<Routine, ReadError> {
        let name = self.node_text(Self::field(node, "name")?);
        let params = node
            .child_by_field_name("parameters")
            .map(|p| self.read_parameters(p, name))
            .unwrap_or_default();
        let body = self.read_block(Self::field(node, "body")?)?;
        Ok(Routine::new(name, params, body))
    }

    fn read_parameters(&self, node: Node, routine: &str) -> Vec<String> {
        let mut params = Vec::new();

        for child in Self::named_children(node) {
            let name = match child.kind() {
                "identifier" => Some(child),
                // Defaults and annotations are dropped; only the name survives.
                "default_parameter" | "typed_default_parameter" => {
                    child.child_by_field_name("name")
                }
                "typed_parameter" => Self::named_children(child)
                    .into_iter()
                    .find(|n| n.kind() == "identifier"),
                _ => None,
            };

            match name {
                Some(name) => params.push(self.node_text(name).to_string()),
                None => tracing::warn!(
                    routine,
                    line = Self::line(child),
                    "ignoring parameter {}",
                    self.node_text(child)
                ),
            }
        }

        params
    }

    fn read_expr(&self, node: Node) -> Result<Expr, ReadError> {
        match node.kind() {
            "integer" => Ok(Expr::int(self.node_text(node))),
            "float" => Ok(Expr::float(self.node_text(node))),

            "string" => self.read_string(node),
            "concatenated_string" => {
                let mut joined = String::new();
                for part in Self::named_children(node) {
                    match self.read_string(part)? {
                        Expr::Literal {
                            value: Literal::Str(s),
                        } => joined.push_str(&s),
                        other => return Ok(other),
                    }
                }
                Ok(Expr::string(joined))
            }

            "true" => Ok(Expr::bool(true)),
            "false" => Ok(Expr::bool(false)),
            "none" => Ok(Expr::none()),

            "identifier" => Ok(Expr::name(self.node_text(node))),

            "attribute" => {
                let object = self.read_expr(Self::field(node, "object")?)?;
                let attr = self.node_text(Self::field(node, "attribute")?);
                Ok(Expr::attr(object, attr))
            }

            "call" => self.read_call(node),

            "unary_operator" => {
                let operand = self.read_expr(Self::field(node, "argument")?)?;
                let op = match self.node_text(Self::field(node, "operator")?) {
                    "-" => UnaryOp::Neg,
                    "+" => UnaryOp::Pos,
                    "~" => UnaryOp::Invert,
                    other => {
                        return Err(ReadError::Parse(format!("unknown unary op: {}", other)));
                    }
                };
                Ok(Expr::unary(op, operand))
            }
            "not_operator" => {
                let operand = self.read_expr(Self::field(node, "argument")?)?;
                Ok(Expr::unary(UnaryOp::Not, operand))
            }

            "binary_operator" | "boolean_operator" => {
                let left = self.read_expr(Self::field(node, "left")?)?;
                let right = self.read_expr(Self::field(node, "right")?)?;
                let op_text = self.node_text(Self::field(node, "operator")?);
                let op = BinaryOp::from_token(op_text)
                    .ok_or_else(|| ReadError::Parse(format!("unknown binary op: {}", op_text)))?;
                Ok(Expr::binary(left, op, right))
            }
            "comparison_operator" => self.read_comparison_operator(node),

            "parenthesized_expression" => {
                let children = Self::named_children(node);
                match children.as_slice() {
                    [inner] => self.read_expr(*inner),
                    _ => Ok(Expr::unsupported(node.kind())),
                }
            }

            // Everything else parses but has no translation.
            other => Ok(Expr::unsupported(other)),
        }
    }

    fn read_string(&self, node: Node) -> Result<Expr, ReadError> {
        let mut cursor = node.walk();
        let interpolated = node
            .children(&mut cursor)
            .any(|child| child.kind() == "interpolation");
        if interpolated {
            return Ok(Expr::unsupported("f-string"));
        }

        let text = self.node_text(node);
        let quote_start = text
            .find(|c: char| c == '"' || c == '\'')
            .ok_or_else(|| ReadError::Parse(format!("malformed string literal: {}", text)))?;
        let (prefix, quoted) = text.split_at(quote_start);

        let delimiter = if quoted.starts_with("\"\"\"") || quoted.starts_with("'''") {
            &quoted[..3]
        } else {
            &quoted[..1]
        };
        let body = quoted
            .strip_prefix(delimiter)
            .and_then(|rest| rest.strip_suffix(delimiter))
            .ok_or_else(|| ReadError::Parse(format!("malformed string literal: {}", text)))?;

        if prefix.contains(['r', 'R']) {
            Ok(Expr::string(body))
        } else {
            Ok(Expr::string(unescape(body)))
        }
    }

    fn read_call(&self, node: Node) -> Result<Expr, ReadError> {
        let func = self.read_expr(Self::field(node, "function")?)?;
        let arguments = Self::field(node, "arguments")?;

        // `f(x for x in y)`
        if arguments.kind() != "argument_list" {
            return Ok(Expr::unsupported(arguments.kind()));
        }

        let mut args = Vec::new();
        let mut keywords = Vec::new();
        for child in Self::named_children(arguments) {
            match child.kind() {
                "keyword_argument" => {
                    let name = self.node_text(Self::field(child, "name")?);
                    let value = self.read_expr(Self::field(child, "value")?)?;
                    keywords.push((name.to_string(), value));
                }
                _ => args.push(self.read_expr(child)?),
            }
        }

        Ok(Expr::Call {
            func: Box::new(func),
            args,
            keywords,
        })
    }

    fn read_comparison_operator(&self, node: Node) -> Result<Expr, ReadError> {
        // Operands are named, operators anonymous: `a < b <= c` arrives as
        // [a, <, b, <=, c].
        let mut cursor = node.walk();
        let children: Vec<Node> = node
            .children(&mut cursor)
            .filter(|c| c.kind() != "comment")
            .collect();

        if children.len() < 3 || children.len() % 2 == 0 {
            return Err(ReadError::UnexpectedNode {
                expected: "comparison with operands".into(),
                got: node.to_sexp(),
            });
        }

        let mut left = self.read_expr(children[0])?;
        let mut result: Option<Expr> = None;

        for pair in children[1..].chunks(2) {
            let op_text = pair[0].kind();
            let op = BinaryOp::from_token(op_text).ok_or_else(|| {
                ReadError::Parse(format!("unknown comparison op: {}", op_text))
            })?;
            let right = self.read_expr(pair[1])?;

            // a < b < c becomes (a < b) and (b < c)
            let cmp = Expr::binary(left, op, right.clone());
            result = Some(match result {
                Some(prev) => Expr::binary(prev, BinaryOp::And, cmp),
                None => cmp,
            });
            left = right;
        }

        result.ok_or_else(|| ReadError::Parse("empty comparison".into()))
    }
}

/// Depth-first search for the first ERROR or MISSING node.
fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error)
}

/// Decode backslash escapes in a non-raw string body.
///
/// Unknown escapes keep their backslash, as the surface language does.
fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(next) = chars.next() else {
            out.push('\\');
            break;
        };
        match next {
            '\n' => {}
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            '0' => out.push('\0'),
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0C}'),
            'v' => out.push('\u{0B}'),
            'x' | 'u' | 'U' => {
                let width = match next {
                    'x' => 2,
                    'u' => 4,
                    _ => 8,
                };
                let digits: String = (0..width).map_while(|_| chars.next_if(char::is_ascii_hexdigit)).collect();
                let decoded = if digits.len() == width {
                    u32::from_str_radix(&digits, 16).ok().and_then(char::from_u32)
                } else {
                    None
                };
                match decoded {
                    Some(ch) => out.push(ch),
                    None => {
                        out.push('\\');
                        out.push(next);
                        out.push_str(&digits);
                    }
                }
            }
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(source: &str) -> Unit {
        read_unit(source).expect("parse failed")
    }

    fn first_stmt(body: &str) -> Stmt {
        let source = format!("class R:\n    def f(self):\n        {}\n", body);
        let unit = unit(&source);
        match &unit.body[0] {
            Stmt::Routine(r) => r.body[0].clone(),
            other => panic!("expected routine, got {:?}", other),
        }
    }

    fn expr(text: &str) -> Expr {
        match first_stmt(&format!("x = {}", text)) {
            Stmt::Assign { value, .. } => value,
            other => panic!("expected assignment, got {:?}", other),
        }
    }

    #[test]
    fn test_class_with_decorator() {
        let unit = unit("@teleop(\"Drive\", \"Comp\")\nclass Robot:\n    def run(self):\n        pass\n");
        assert_eq!(unit.name, "Robot");
        assert_eq!(unit.decorators.len(), 1);
        assert!(matches!(&unit.decorators[0], Expr::Call { args, .. } if args.len() == 2));

        let run = unit.routine("run").unwrap();
        assert_eq!(run.params, vec!["self"]);
        assert!(run.body.is_empty());
    }

    #[test]
    fn test_comments_and_imports_ignored() {
        let unit = unit(
            "# header\nfrom ftc import *\n\nclass Robot:\n    # members\n    def run(self):  # entry\n        x = 1  # trailing\n",
        );
        let run = unit.routine("run").unwrap();
        assert_eq!(run.body.len(), 1);
    }

    #[test]
    fn test_parameters() {
        let unit = unit("class R:\n    def drive(self, power, turn=0.5):\n        pass\n");
        assert_eq!(
            unit.routine("drive").unwrap().params,
            vec!["self", "power", "turn"]
        );
    }

    #[test]
    fn test_assignment_targets() {
        match first_stmt("self.m = motor(\"left\", \"forward\")") {
            Stmt::Assign { target, value } => {
                assert_eq!(target.receiver_field(Some("self")), Some("m"));
                assert_eq!(value.literal_arg(0).as_deref(), Some("left"));
                assert_eq!(value.literal_arg(1).as_deref(), Some("forward"));
            }
            other => panic!("expected assignment, got {:?}", other),
        }
    }

    #[test]
    fn test_statement_level_forms() {
        let unit = unit(
            "\"\"\"Module.\"\"\"\nclass R:\n    \"\"\"Robot.\"\"\"\n    def f(self):\n        x = 1\n        foo()\n        x += 2\n",
        );
        assert_eq!(unit.body[0], Stmt::expr(Expr::string("Robot.")));

        let f = unit.routine("f").unwrap();
        assert!(matches!(&f.body[0], Stmt::Assign { target, .. } if target.as_name() == Some("x")));
        assert!(matches!(&f.body[1], Stmt::Expr { expr: Expr::Call { .. } }));
        assert!(matches!(&f.body[2], Stmt::AugAssign { op: BinaryOp::Add, .. }));
    }

    #[test]
    fn test_augmented_assignment() {
        match first_stmt("count += 1") {
            Stmt::AugAssign { target, op, .. } => {
                assert_eq!(target.as_name(), Some("count"));
                assert_eq!(op, BinaryOp::Add);
            }
            other => panic!("expected augmented assignment, got {:?}", other),
        }
    }

    #[test]
    fn test_elif_chain_nests() {
        let stmt = first_stmt("if a:\n            x = 1\n        elif b:\n            x = 2\n        else:\n            x = 3");
        let Stmt::If { orelse, .. } = stmt else {
            panic!("expected if");
        };
        let [Stmt::If { test, orelse: inner, .. }] = orelse.as_slice() else {
            panic!("expected nested elif, got {:?}", orelse);
        };
        assert_eq!(test.as_name(), Some("b"));
        assert_eq!(inner.len(), 1);
    }

    #[test]
    fn test_binary_precedence_from_grammar() {
        let e = expr("1 + 2 * 3");
        let Expr::Binary { op, right, .. } = e else {
            panic!("expected binary");
        };
        assert_eq!(op, BinaryOp::Add);
        assert!(matches!(*right, Expr::Binary { op: BinaryOp::Mul, .. }));
    }

    #[test]
    fn test_chained_comparison() {
        let e = expr("0 < x <= 10");
        assert!(matches!(e, Expr::Binary { op: BinaryOp::And, .. }));
    }

    #[test]
    fn test_boolean_and_not() {
        assert!(matches!(expr("a and b"), Expr::Binary { op: BinaryOp::And, .. }));
        assert!(matches!(expr("not a"), Expr::Unary { op: UnaryOp::Not, .. }));
        assert!(matches!(expr("-a"), Expr::Unary { op: UnaryOp::Neg, .. }));
    }

    #[test]
    fn test_literals() {
        assert_eq!(expr("0.5"), Expr::float("0.5"));
        assert_eq!(expr("1000"), Expr::int("1000"));
        assert_eq!(expr("True"), Expr::bool(true));
        assert_eq!(expr("None"), Expr::none());
        assert_eq!(expr("'single'"), Expr::string("single"));
        assert_eq!(expr("\"a\\tb\""), Expr::string("a\tb"));
        assert_eq!(expr("r\"a\\tb\""), Expr::string("a\\tb"));
        assert_eq!(expr("\"ab\" \"cd\""), Expr::string("abcd"));
    }

    #[test]
    fn test_unsupported_forms_are_kept() {
        assert_eq!(expr("[1, 2]"), Expr::unsupported("list"));
        assert_eq!(expr("cfg[\"k\"]"), Expr::unsupported("subscript"));
        assert_eq!(expr("f\"{x}\""), Expr::unsupported("f-string"));
        assert!(matches!(
            first_stmt("for i in items:\n            pass"),
            Stmt::Unsupported { ref kind, line: 3 } if kind == "for_statement"
        ));
    }

    #[test]
    fn test_keyword_arguments() {
        let Expr::Call { args, keywords, .. } = expr("f(1, unit=\"cm\")") else {
            panic!("expected call");
        };
        assert_eq!(args.len(), 1);
        assert_eq!(keywords[0].0, "unit");
    }

    #[test]
    fn test_syntax_error_position() {
        let err = read_unit("class Broken\n    def run(self):\n        pass\n").unwrap_err();
        assert!(matches!(err, ReadError::Syntax { .. }), "{:?}", err);
        assert!(err.to_string().starts_with("invalid syntax at line "));
    }

    #[test]
    fn test_unit_count() {
        assert!(matches!(read_unit("x = 1\n"), Err(ReadError::NoUnit)));
        assert!(matches!(read_unit(""), Err(ReadError::NoUnit)));

        let err = read_unit("class A:\n    pass\nclass B:\n    pass\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "expected exactly one class definition, found 2: A, B"
        );
    }

    #[test]
    fn test_unescape() {
        assert_eq!(unescape(r"a\nb"), "a\nb");
        assert_eq!(unescape(r#"say \"hi\""#), "say \"hi\"");
        assert_eq!(unescape(r"\x41\u00e9"), "Aé");
        assert_eq!(unescape(r"\d"), "\\d");
        assert_eq!(unescape(r"\xZZ"), "\\xZZ");
    }
}
