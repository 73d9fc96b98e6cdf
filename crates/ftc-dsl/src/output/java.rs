//! Java writer for the robot DSL.
//!
//! Walks one [`Unit`] and emits a `LinearOpMode` subclass: annotations, the
//! hardware field block, one method per routine, then any framework methods
//! the unit left out. Statements the writer cannot translate become
//! `/* UNSUPPORTED STATEMENT: kind */` lines at the same position.

use super::buffer::EmitBuffer;
use super::expr::{Scope, java_string, translate_call, translate_expr};
use crate::ast::{BinaryOp, Expr, Literal, Routine, Stmt, Unit};
use crate::mapping::{self, ENTRY, INITIALIZER, LOOP};
use crate::metadata::UnitMetadata;
use crate::registry::{ComponentRegistry, HardwareComponent};
use crate::transpile::TranspileOptions;
use std::collections::BTreeSet;

pub const UNKNOWN_DIRECTION: &str = "/* UNKNOWN DIRECTION */";

/// Emits a unit as a Java class.
pub struct JavaWriter<'a> {
    buf: EmitBuffer,
    unit: &'a Unit,
    metadata: UnitMetadata,
    registry: ComponentRegistry,
    routines: BTreeSet<String>,
}

impl<'a> JavaWriter<'a> {
    pub fn new(unit: &'a Unit, options: &TranspileOptions) -> Self {
        let registry = unit
            .routine(INITIALIZER)
            .map(ComponentRegistry::scan)
            .unwrap_or_default();

        Self {
            buf: EmitBuffer::new(options.indent_width),
            unit,
            metadata: UnitMetadata::extract(unit, &options.default_group),
            registry,
            routines: unit.routines().map(|r| r.name.clone()).collect(),
        }
    }

    /// Emit the class declaration (no imports).
    pub fn emit(unit: &Unit, options: &TranspileOptions) -> String {
        let mut writer = JavaWriter::new(unit, options);
        writer.write_class();
        writer.buf.finish()
    }

    fn write_class(&mut self) {
        if let Some(opmode) = &self.metadata.opmode {
            self.buf.line(format!(
                "@{}(name={}, group={})",
                opmode.kind.annotation(),
                java_string(&opmode.name),
                java_string(&opmode.group)
            ));
        }
        if self.metadata.disabled {
            self.buf.line("@Disabled");
        }

        self.buf.open(format!(
            "public class {} extends LinearOpMode",
            self.metadata.class_name
        ));

        self.write_fields();

        let unit = self.unit;
        let routines = self.routines.clone();
        let mut after_routine = false;
        for stmt in &unit.body {
            match stmt {
                Stmt::Routine(routine) => {
                    self.buf.blank();
                    self.write_routine(routine, &routines);
                    after_routine = true;
                }
                other => {
                    if after_routine {
                        self.buf.blank();
                        after_routine = false;
                    }
                    // Only fields and docstrings are valid as class members.
                    match other {
                        Stmt::Assign {
                            target: Expr::Name { .. },
                            ..
                        }
                        | Stmt::Expr {
                            expr: Expr::Literal {
                                value: Literal::Str(_),
                            },
                        } => {
                            let scope = Scope::new(None, &routines);
                            self.write_stmt(other, &scope);
                        }
                        _ => self.unsupported(statement_kind(other)),
                    }
                }
            }
        }

        self.write_synthesized();
        self.buf.close();
    }

    fn write_fields(&mut self) {
        if self.registry.is_empty() {
            return;
        }
        self.buf.line("// Hardware components");
        for component in self.registry.components() {
            self.buf.line(format!(
                "private {} {} = null;",
                component.kind.java_type(),
                component.name
            ));
        }
        self.buf.blank();
    }

    fn write_routine(&mut self, routine: &Routine, routines: &BTreeSet<String>) {
        tracing::debug!(routine = %routine.name, "emitting routine");
        let scope = Scope::new(routine.receiver(), routines);

        match routine.name.as_str() {
            INITIALIZER => {
                self.buf.open("private void initHardware()");
                self.write_block(&routine.body, &scope);
                self.buf.close();
            }
            ENTRY => {
                self.write_entry_header();
                if !routine.body.is_empty() {
                    self.buf.line("");
                }
                self.write_block(&routine.body, &scope);
                self.buf.close();
            }
            LOOP => {
                self.buf.open("private void mainLoop()");
                self.buf.open("while (opModeIsActive())");
                self.write_block(&routine.body, &scope);
                self.buf.line("telemetry.update();");
                self.buf.close();
                self.buf.close();
            }
            name => {
                let params = routine
                    .value_params()
                    .iter()
                    .map(|p| format!("double {}", p))
                    .collect::<Vec<_>>()
                    .join(", ");
                self.buf.open(format!("private void {}({})", name, params));
                self.write_block(&routine.body, &scope);
                self.buf.close();
            }
        }
    }

    /// `runOpMode()` up to and including `waitForStart();`.
    fn write_entry_header(&mut self) {
        self.buf.line("@Override");
        self.buf.open("public void runOpMode()");
        self.buf.line("initHardware();");
        self.buf.line("");
        self.buf.line("telemetry.addData(\"Status\", \"Initialized\");");
        self.buf.line("telemetry.update();");
        self.buf.line("");
        self.buf.line("waitForStart();");
    }

    /// Framework methods the unit did not define.
    fn write_synthesized(&mut self) {
        if self.unit.routine(INITIALIZER).is_none() {
            tracing::debug!("synthesizing empty initHardware");
            self.buf.blank();
            self.buf.open("private void initHardware()");
            self.buf.close();
        }
        if self.unit.routine(ENTRY).is_none() {
            tracing::debug!("synthesizing runOpMode");
            self.buf.blank();
            self.write_entry_header();
            self.buf.close();
        }
    }

    fn write_block(&mut self, stmts: &[Stmt], scope: &Scope) {
        for stmt in stmts {
            self.write_stmt(stmt, scope);
        }
    }

    fn write_stmt(&mut self, stmt: &Stmt, scope: &Scope) {
        match stmt {
            Stmt::Assign { target, value } => self.write_assign(target, value, scope),

            Stmt::AugAssign { target, op, value } => {
                self.write_aug_assign(target, *op, value, scope)
            }

            Stmt::Expr { expr } => match expr {
                Expr::Call { .. } => {
                    self.buf.line(format!("{};", translate_call(expr, scope)));
                }
                Expr::Literal {
                    value: Literal::Str(doc),
                } => self.write_comment(doc),
                _ => self.unsupported("expression"),
            },

            Stmt::If { test, body, orelse } => self.write_if(test, body, orelse, scope),

            Stmt::While { test, body } => {
                self.buf
                    .open(format!("while ({})", translate_expr(test, scope)));
                self.write_block(body, scope);
                self.buf.close();
            }

            Stmt::Return { value: None } => self.buf.line("return;"),
            Stmt::Return { value: Some(_) } => self.unsupported("return"),
            Stmt::Break => self.buf.line("break;"),
            Stmt::Continue => self.buf.line("continue;"),

            Stmt::Routine(routine) => {
                tracing::debug!(routine = %routine.name, "nested routine");
                self.unsupported("function_definition");
            }

            Stmt::Unsupported { kind, line } => {
                tracing::debug!(kind = %kind, line, "unsupported statement");
                self.unsupported(kind);
            }
        }
    }

    fn unsupported(&mut self, kind: &str) {
        self.buf
            .line(format!("/* UNSUPPORTED STATEMENT: {} */", kind));
    }

    /// Docstring as `//` lines.
    fn write_comment(&mut self, text: &str) {
        for line in text.trim().lines() {
            let line = line.trim();
            if line.is_empty() {
                self.buf.line("//");
            } else {
                self.buf.line(format!("// {}", line));
            }
        }
    }

    fn write_assign(&mut self, target: &Expr, value: &Expr, scope: &Scope) {
        if let Some(component) = HardwareComponent::recognize(target, value, scope.receiver) {
            self.write_lookup(&component);
            return;
        }

        match target {
            Expr::Name { id } if scope.receiver != Some(id.as_str()) => {
                self.buf
                    .line(format!("double {} = {};", id, translate_expr(value, scope)));
            }
            Expr::Attribute { .. } => {
                self.buf.line(format!(
                    "{} = {};",
                    translate_expr(target, scope),
                    translate_expr(value, scope)
                ));
            }
            _ => self.unsupported("assignment"),
        }
    }

    /// `hardwareMap.get` lookup plus the motor direction, if any.
    fn write_lookup(&mut self, component: &HardwareComponent) {
        self.buf.line(format!(
            "{} = hardwareMap.get({}.class, {});",
            component.name,
            component.kind.java_type(),
            java_string(&component.config_name)
        ));

        if !component.kind.has_direction() {
            return;
        }
        if let Some(token) = &component.direction {
            let direction = mapping::motor_direction(token).unwrap_or(UNKNOWN_DIRECTION);
            self.buf
                .line(format!("{}.setDirection({});", component.name, direction));
        }
    }

    fn write_aug_assign(&mut self, target: &Expr, op: BinaryOp, value: &Expr, scope: &Scope) {
        let arithmetic = matches!(
            op,
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod
        );
        let assignable = match target {
            Expr::Name { id } => scope.receiver != Some(id.as_str()),
            Expr::Attribute { .. } => true,
            _ => false,
        };

        match mapping::java_operator(op) {
            Some(symbol) if arithmetic && assignable => {
                self.buf.line(format!(
                    "{} {}= {};",
                    translate_expr(target, scope),
                    symbol,
                    translate_expr(value, scope)
                ));
            }
            _ => self.unsupported("augmented_assignment"),
        }
    }

    fn write_if(&mut self, test: &Expr, body: &[Stmt], orelse: &[Stmt], scope: &Scope) {
        self.buf.open(format!("if ({})", translate_expr(test, scope)));
        self.write_block(body, scope);

        let mut rest = orelse;
        loop {
            match rest {
                [] => break,
                [Stmt::If { test, body, orelse }] => {
                    self.buf
                        .reopen(format!("else if ({})", translate_expr(test, scope)));
                    self.write_block(body, scope);
                    rest = orelse;
                }
                stmts => {
                    self.buf.reopen("else");
                    self.write_block(stmts, scope);
                    break;
                }
            }
        }

        self.buf.close();
    }
}

fn statement_kind(stmt: &Stmt) -> &str {
    match stmt {
        Stmt::Assign { .. } => "assignment",
        Stmt::AugAssign { .. } => "augmented_assignment",
        Stmt::Expr { .. } => "expression_statement",
        Stmt::If { .. } => "if_statement",
        Stmt::While { .. } => "while_statement",
        Stmt::Return { .. } => "return",
        Stmt::Break => "break_statement",
        Stmt::Continue => "continue_statement",
        Stmt::Routine(_) => "function_definition",
        Stmt::Unsupported { kind, .. } => kind,
    }
}
