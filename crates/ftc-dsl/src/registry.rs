//! Hardware component registry.
//!
//! Built once, before emission, from the initializer routine. The snapshot is
//! immutable afterwards and drives the field declarations at the top of the
//! class.

use crate::ast::{Expr, Routine, Stmt};
use crate::mapping::HardwareKind;

/// One hardware device declared in the initializer.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct HardwareComponent {
    /// Attribute name on the receiver; the Java field name.
    pub name: String,
    pub kind: HardwareKind,
    /// Key the device is looked up under in the robot configuration.
    pub config_name: String,
    /// Raw direction token (`"forward"`), if one was given.
    pub direction: Option<String>,
}

impl HardwareComponent {
    /// Recognize `receiver.name = kind("cfg", "dir")`.
    ///
    /// Shared by the registry scan and the statement emitter so both see the
    /// same record for the same assignment.
    pub fn recognize(target: &Expr, value: &Expr, receiver: Option<&str>) -> Option<Self> {
        let name = target.receiver_field(receiver)?;
        let Expr::Call { func, .. } = value else {
            return None;
        };
        let kind = HardwareKind::from_constructor(func.as_name()?)?;

        Some(Self {
            name: name.to_string(),
            kind,
            config_name: value.literal_arg(0).unwrap_or_else(|| name.to_string()),
            direction: value.literal_arg(1),
        })
    }
}

/// Ordered hardware records of one unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct ComponentRegistry {
    components: Vec<HardwareComponent>,
}

impl ComponentRegistry {
    /// Scan the initializer's direct statements. Nested blocks are not
    /// visited.
    ///
    /// Declaring the same attribute twice keeps one record at the first
    /// position, holding the last declaration's kind and arguments.
    pub fn scan(initializer: &Routine) -> Self {
        let receiver = initializer.receiver();
        let mut registry = Self::default();

        for stmt in &initializer.body {
            let Stmt::Assign { target, value } = stmt else {
                continue;
            };
            if let Some(component) = HardwareComponent::recognize(target, value, receiver) {
                registry.insert(component);
            }
        }

        tracing::debug!(
            routine = %initializer.name,
            components = registry.len(),
            "scanned hardware declarations"
        );
        registry
    }

    fn insert(&mut self, component: HardwareComponent) {
        match self.components.iter_mut().find(|c| c.name == component.name) {
            Some(existing) => {
                tracing::debug!(name = %component.name, "hardware component redeclared");
                *existing = component;
            }
            None => self.components.push(component),
        }
    }

    pub fn components(&self) -> &[HardwareComponent] {
        &self.components
    }

    pub fn get(&self, name: &str) -> Option<&HardwareComponent> {
        self.components.iter().find(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}
