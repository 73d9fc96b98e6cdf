//! OpMode metadata from class decorators.

use crate::ast::{Expr, Unit};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum OpModeKind {
    TeleOp,
    Autonomous,
}

impl OpModeKind {
    fn from_decorator(name: &str) -> Option<Self> {
        match name {
            "teleop" => Some(OpModeKind::TeleOp),
            "autonomous" => Some(OpModeKind::Autonomous),
            _ => None,
        }
    }

    /// Annotation name in the SDK.
    pub fn annotation(self) -> &'static str {
        match self {
            OpModeKind::TeleOp => "TeleOp",
            OpModeKind::Autonomous => "Autonomous",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct OpModeInfo {
    pub kind: OpModeKind,
    pub name: String,
    pub group: String,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct UnitMetadata {
    pub class_name: String,
    /// `None` when the class carries no OpMode decorator.
    pub opmode: Option<OpModeInfo>,
    pub disabled: bool,
}

impl UnitMetadata {
    /// Read the unit's decorators. When several OpMode decorators are
    /// present the last one wins.
    pub fn extract(unit: &Unit, default_group: &str) -> Self {
        let mut metadata = Self {
            class_name: unit.name.clone(),
            opmode: None,
            disabled: false,
        };

        for decorator in &unit.decorators {
            // `@teleop("Name")` and bare `@teleop` both count.
            let (callee, call) = match decorator {
                Expr::Call { func, .. } => (func.as_ref(), Some(decorator)),
                other => (other, None),
            };
            let Some(name) = callee.as_name() else {
                continue;
            };

            if name == "disabled" {
                metadata.disabled = true;
                continue;
            }

            let Some(kind) = OpModeKind::from_decorator(name) else {
                tracing::debug!(decorator = name, "ignoring unknown class decorator");
                continue;
            };

            let arg = |index| call.and_then(|c| c.literal_arg(index));
            metadata.opmode = Some(OpModeInfo {
                kind,
                name: arg(0).unwrap_or_else(|| unit.name.clone()),
                group: arg(1).unwrap_or_else(|| default_group.to_string()),
            });
        }

        metadata
    }
}
