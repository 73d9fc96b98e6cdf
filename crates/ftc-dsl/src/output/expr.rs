//! Expression translation.
//!
//! Pure and recursive: an expression plus the [`Scope`] it appears in maps to
//! Java text. Forms without a translation become inline comment markers so
//! the rest of the unit still comes out.

use crate::ast::{BinaryOp, Expr, Literal, UnaryOp};
use crate::mapping::{self, CallTemplate};
use std::collections::BTreeSet;

pub const UNKNOWN_EXPRESSION: &str = "/* UNKNOWN EXPRESSION */";
pub const UNKNOWN_CALL: &str = "/* UNKNOWN CALL */";
pub const UNKNOWN_MODE: &str = "/* UNKNOWN MODE */";
pub const UNKNOWN_OPERATOR: &str = "?";

/// What an expression can refer to besides plain names.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    /// Name of the enclosing routine's receiver (`self`).
    pub receiver: Option<&'a str>,
    /// Routines defined on the unit.
    pub routines: &'a BTreeSet<String>,
}

impl<'a> Scope<'a> {
    pub fn new(receiver: Option<&'a str>, routines: &'a BTreeSet<String>) -> Self {
        Self {
            receiver,
            routines,
        }
    }

    fn is_receiver(&self, expr: &Expr) -> bool {
        self.receiver.is_some() && expr.as_name() == self.receiver
    }
}

pub fn translate_expr(expr: &Expr, scope: &Scope) -> String {
    match expr {
        Expr::Literal { value } => translate_literal(value),

        Expr::Name { id } => {
            if scope.receiver == Some(id.as_str()) {
                "this".to_string()
            } else {
                id.clone()
            }
        }

        Expr::Attribute { object, attr } => {
            if scope.is_receiver(object) {
                return attr.clone();
            }
            match object.as_name() {
                Some(root) if mapping::GAMEPADS.contains(&root) => {
                    format!("{}.{}", root, mapping::gamepad_field(attr))
                }
                _ => format!("{}.{}", translate_operand(object, scope), attr),
            }
        }

        Expr::Unary { op, operand } => {
            let symbol = match op {
                UnaryOp::Neg => "-",
                UnaryOp::Pos => "+",
                UnaryOp::Not => "!",
                UnaryOp::Invert => "~",
            };
            let text = translate_operand(operand, scope);
            // `- -y` must not become the decrement `--y`.
            if matches!(op, UnaryOp::Neg | UnaryOp::Pos) && text.starts_with(symbol) {
                format!("{}({})", symbol, text)
            } else {
                format!("{}{}", symbol, text)
            }
        }

        Expr::Binary { left, op, right } => translate_binary(left, *op, right, scope),

        Expr::Call { .. } => translate_call(expr, scope),

        Expr::Unsupported { kind } => {
            tracing::debug!(kind = %kind, "unsupported expression");
            UNKNOWN_EXPRESSION.to_string()
        }
    }
}

fn translate_literal(value: &Literal) -> String {
    match value {
        Literal::Int(text) | Literal::Float(text) => text.clone(),
        Literal::Str(s) => java_string(s),
        Literal::Bool(b) => b.to_string(),
        Literal::None => "null".to_string(),
    }
}

/// Double-quoted Java string literal.
pub fn java_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Operand of a unary operator or member access: binary expressions need
/// parentheses to keep binding.
fn translate_operand(expr: &Expr, scope: &Scope) -> String {
    let text = translate_expr(expr, scope);
    if matches!(expr, Expr::Binary { .. }) {
        format!("({})", text)
    } else {
        text
    }
}

fn translate_binary(left: &Expr, op: BinaryOp, right: &Expr, scope: &Scope) -> String {
    let Some(symbol) = mapping::java_operator(op) else {
        tracing::debug!(?op, "unmapped operator");
        return format!(
            "{} {} {}",
            translate_expr(left, scope),
            UNKNOWN_OPERATOR,
            translate_expr(right, scope)
        );
    };

    let precedence = mapping::java_precedence(op);
    let side = |expr: &Expr, is_right: bool| {
        let text = translate_expr(expr, scope);
        let Expr::Binary { op: inner, .. } = expr else {
            return text;
        };
        // Java operators here are left-associative: a right operand at the
        // same level needs parentheses, a left one does not.
        let inner = mapping::java_precedence(*inner);
        if inner < precedence || (is_right && inner == precedence) {
            format!("({})", text)
        } else {
            text
        }
    };

    format!("{} {} {}", side(left, false), symbol, side(right, true))
}

fn translate_args(args: &[Expr], scope: &Scope) -> String {
    args.iter()
        .map(|arg| translate_expr(arg, scope))
        .collect::<Vec<_>>()
        .join(", ")
}

fn unknown_call(func: &Expr) -> String {
    tracing::debug!(callee = ?func.dotted_name(), "unknown call");
    match func.dotted_name() {
        Some(name) => format!("/* UNKNOWN CALL: {} */", name),
        None => UNKNOWN_CALL.to_string(),
    }
}

/// Translate a call expression.
///
/// Anything that is not a call translates as an expression.
pub fn translate_call(expr: &Expr, scope: &Scope) -> String {
    let Expr::Call {
        func,
        args,
        keywords,
    } = expr
    else {
        return translate_expr(expr, scope);
    };

    if !keywords.is_empty() {
        return unknown_call(func);
    }

    match func.as_ref() {
        Expr::Attribute { object, attr } => {
            translate_method_call(object, attr, args, scope).unwrap_or_else(|| unknown_call(func))
        }
        Expr::Name { id } => translate_intrinsic(id, args, scope).unwrap_or_else(|| unknown_call(func)),
        _ => unknown_call(func),
    }
}

fn translate_method_call(
    object: &Expr,
    method: &str,
    args: &[Expr],
    scope: &Scope,
) -> Option<String> {
    // `self.drive(x)`: one of the unit's own routines.
    if scope.is_receiver(object) {
        if !scope.routines.contains(method) {
            return None;
        }
        return Some(format!(
            "{}({})",
            mapping::java_routine_name(method),
            translate_args(args, scope)
        ));
    }

    let template = mapping::device_method(method)?;
    if args.len() != template.arity() {
        return None;
    }

    let obj = translate_operand(object, scope);
    let call = match template {
        CallTemplate::Setter(java) => {
            format!("{}.{}({})", obj, java, translate_expr(&args[0], scope))
        }
        CallTemplate::Getter(java) => format!("{}.{}()", obj, java),
        CallTemplate::GetterWith(java, fixed) => format!("{}.{}({})", obj, java, fixed),
        CallTemplate::RunMode => {
            let mode = match &args[0] {
                Expr::Literal {
                    value: Literal::Str(token),
                } => mapping::run_mode(token),
                _ => None,
            };
            format!("{}.setMode({})", obj, mode.unwrap_or(UNKNOWN_MODE))
        }
    };
    Some(call)
}

fn translate_intrinsic(name: &str, args: &[Expr], scope: &Scope) -> Option<String> {
    match (name, args) {
        ("telemetry_add", [key, value]) => Some(format!(
            "telemetry.addData({}, {})",
            translate_expr(key, scope),
            translate_expr(value, scope)
        )),
        ("sleep", [millis]) => Some(format!("sleep({})", translate_expr(millis, scope))),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn routines() -> BTreeSet<String> {
        ["drive", "loop"].iter().map(|s| s.to_string()).collect()
    }

    fn tr(expr: &Expr) -> String {
        let routines = routines();
        translate_expr(expr, &Scope::new(Some("self"), &routines))
    }

    fn this(attr: &str) -> Expr {
        Expr::attr(Expr::name("self"), attr)
    }

    fn method(object: Expr, name: &str, args: Vec<Expr>) -> Expr {
        Expr::call(Expr::attr(object, name), args)
    }

    #[test]
    fn test_literals() {
        assert_eq!(tr(&Expr::float("0.5")), "0.5");
        assert_eq!(tr(&Expr::int("1000")), "1000");
        assert_eq!(tr(&Expr::string("Status")), "\"Status\"");
        assert_eq!(tr(&Expr::bool(true)), "true");
        assert_eq!(tr(&Expr::none()), "null");
    }

    #[test]
    fn test_string_escaping() {
        assert_eq!(java_string("say \"hi\""), r#""say \"hi\"""#);
        assert_eq!(java_string(r"C:\dir"), r#""C:\\dir""#);
        assert_eq!(java_string("a\nb"), r#""a\nb""#);
        assert_eq!(java_string("\u{1}"), r#""\u0001""#);
    }

    #[test]
    fn test_names_and_attributes() {
        assert_eq!(tr(&Expr::name("drive")), "drive");
        assert_eq!(tr(&Expr::name("self")), "this");
        assert_eq!(tr(&this("arm_motor")), "arm_motor");
        assert_eq!(tr(&Expr::attr(Expr::name("Math"), "PI")), "Math.PI");
        assert_eq!(
            tr(&Expr::attr(Expr::attr(Expr::name("a"), "b"), "c")),
            "a.b.c"
        );
    }

    #[test]
    fn test_gamepad_fields() {
        assert_eq!(
            tr(&Expr::attr(Expr::name("gamepad1"), "a_button")),
            "gamepad1.a"
        );
        assert_eq!(
            tr(&Expr::attr(Expr::name("gamepad2"), "left_stick_y")),
            "gamepad2.left_stick_y"
        );
        // Only the gamepads get remapped.
        assert_eq!(
            tr(&Expr::attr(Expr::name("other"), "a_button")),
            "other.a_button"
        );
    }

    #[test]
    fn test_unary() {
        let stick = Expr::attr(Expr::name("gamepad1"), "left_stick_y");
        assert_eq!(
            tr(&Expr::unary(UnaryOp::Neg, stick)),
            "-gamepad1.left_stick_y"
        );
        assert_eq!(
            tr(&Expr::unary(
                UnaryOp::Neg,
                Expr::binary(Expr::name("a"), BinaryOp::Add, Expr::name("b"))
            )),
            "-(a + b)"
        );
        assert_eq!(tr(&Expr::unary(UnaryOp::Not, Expr::name("done"))), "!done");

        let y = || Expr::name("y");
        assert_eq!(
            tr(&Expr::unary(UnaryOp::Neg, Expr::unary(UnaryOp::Neg, y()))),
            "-(-y)"
        );
        assert_eq!(
            tr(&Expr::unary(UnaryOp::Pos, Expr::unary(UnaryOp::Pos, y()))),
            "+(+y)"
        );
        assert_eq!(
            tr(&Expr::unary(UnaryOp::Neg, Expr::unary(UnaryOp::Neg, Expr::int("1")))),
            "-(-1)"
        );
        assert_eq!(
            tr(&Expr::unary(UnaryOp::Neg, Expr::unary(UnaryOp::Pos, y()))),
            "-+y"
        );
        assert_eq!(tr(&Expr::unary(UnaryOp::Not, Expr::unary(UnaryOp::Not, y()))), "!!y");
    }

    #[test]
    fn test_binary_keeps_source_spelling() {
        // 1.0 + 2.0 - 3.0 * 4.0 / 5.0 as the grammar groups it
        let expr = Expr::binary(
            Expr::binary(Expr::float("1.0"), BinaryOp::Add, Expr::float("2.0")),
            BinaryOp::Sub,
            Expr::binary(
                Expr::binary(Expr::float("3.0"), BinaryOp::Mul, Expr::float("4.0")),
                BinaryOp::Div,
                Expr::float("5.0"),
            ),
        );
        assert_eq!(tr(&expr), "1.0 + 2.0 - 3.0 * 4.0 / 5.0");
    }

    #[test]
    fn test_binary_parenthesizes_grouping() {
        // (a + b) * c
        let expr = Expr::binary(
            Expr::binary(Expr::name("a"), BinaryOp::Add, Expr::name("b")),
            BinaryOp::Mul,
            Expr::name("c"),
        );
        assert_eq!(tr(&expr), "(a + b) * c");

        // a - (b - c)
        let expr = Expr::binary(
            Expr::name("a"),
            BinaryOp::Sub,
            Expr::binary(Expr::name("b"), BinaryOp::Sub, Expr::name("c")),
        );
        assert_eq!(tr(&expr), "a - (b - c)");

        // a or b and c
        let expr = Expr::binary(
            Expr::name("a"),
            BinaryOp::Or,
            Expr::binary(Expr::name("b"), BinaryOp::And, Expr::name("c")),
        );
        assert_eq!(tr(&expr), "a || b && c");
    }

    #[test]
    fn test_unmapped_operator_placeholder() {
        let expr = Expr::binary(Expr::name("a"), BinaryOp::Pow, Expr::int("2"));
        assert_eq!(tr(&expr), "a ? 2");
    }

    #[test]
    fn test_device_methods() {
        assert_eq!(
            tr(&method(this("m"), "set_power", vec![Expr::float("0.5")])),
            "m.setPower(0.5)"
        );
        assert_eq!(
            tr(&method(this("claw"), "set_position", vec![Expr::float("1.0")])),
            "claw.setPosition(1.0)"
        );
        assert_eq!(
            tr(&method(this("d"), "get_distance", vec![])),
            "d.getDistance(DistanceUnit.CM)"
        );
        assert_eq!(tr(&method(this("t"), "is_pressed", vec![])), "t.isPressed()");
        assert_eq!(
            tr(&method(this("m"), "get_current_position", vec![])),
            "m.getCurrentPosition()"
        );
        assert_eq!(
            tr(&method(this("m"), "set_target_position", vec![Expr::int("1000")])),
            "m.setTargetPosition(1000)"
        );
    }

    #[test]
    fn test_set_mode() {
        assert_eq!(
            tr(&method(
                this("m"),
                "set_mode",
                vec![Expr::string("run_using_encoder")]
            )),
            "m.setMode(DcMotor.RunMode.RUN_USING_ENCODER)"
        );
        assert_eq!(
            tr(&method(this("m"), "set_mode", vec![Expr::string("brake")])),
            "m.setMode(/* UNKNOWN MODE */)"
        );
        assert_eq!(
            tr(&method(this("m"), "set_mode", vec![Expr::name("mode")])),
            "m.setMode(/* UNKNOWN MODE */)"
        );
    }

    #[test]
    fn test_unknown_calls() {
        assert_eq!(
            tr(&method(this("imu"), "initialize", vec![])),
            "/* UNKNOWN CALL: self.imu.initialize */"
        );
        // Wrong arity is not a match.
        assert_eq!(
            tr(&method(this("m"), "set_power", vec![])),
            "/* UNKNOWN CALL: self.m.set_power */"
        );
        assert_eq!(
            tr(&Expr::call(Expr::name("dashboard_get"), vec![])),
            "/* UNKNOWN CALL: dashboard_get */"
        );
        let computed = Expr::call(
            Expr::attr(Expr::call(Expr::name("f"), vec![]), "g"),
            vec![],
        );
        assert_eq!(tr(&computed), UNKNOWN_CALL);
    }

    #[test]
    fn test_own_routines() {
        assert_eq!(
            tr(&method(Expr::name("self"), "drive", vec![Expr::float("0.5")])),
            "drive(0.5)"
        );
        assert_eq!(tr(&method(Expr::name("self"), "loop", vec![])), "mainLoop()");
        assert_eq!(
            tr(&method(Expr::name("self"), "missing", vec![])),
            "/* UNKNOWN CALL: self.missing */"
        );
    }

    #[test]
    fn test_intrinsics() {
        assert_eq!(
            tr(&Expr::call(
                Expr::name("telemetry_add"),
                vec![Expr::string("Power"), Expr::float("0.5")]
            )),
            "telemetry.addData(\"Power\", 0.5)"
        );
        assert_eq!(
            tr(&Expr::call(Expr::name("sleep"), vec![Expr::int("2000")])),
            "sleep(2000)"
        );
        assert_eq!(
            tr(&Expr::call(Expr::name("telemetry_add"), vec![Expr::string("x")])),
            "/* UNKNOWN CALL: telemetry_add */"
        );
    }

    #[test]
    fn test_keywords_block_templates() {
        let call = Expr::Call {
            func: Box::new(Expr::name("sleep")),
            args: vec![Expr::int("10")],
            keywords: vec![("unit".into(), Expr::string("ms"))],
        };
        assert_eq!(tr(&call), "/* UNKNOWN CALL: sleep */");
    }

    #[test]
    fn test_unsupported_expression_marker() {
        assert_eq!(tr(&Expr::unsupported("subscript")), UNKNOWN_EXPRESSION);
        let sum = Expr::binary(Expr::name("a"), BinaryOp::Add, Expr::unsupported("list"));
        assert_eq!(tr(&sum), "a + /* UNKNOWN EXPRESSION */");
    }
}
