//! Static translation tables from DSL vocabulary to the FTC Java API.
//!
//! Everything here is read-only process-wide data; lookups are plain
//! functions over `match`es and `const` slices.

use crate::ast::BinaryOp;

/// Device categories recognized as hardware constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HardwareKind {
    Motor,
    Servo,
    ColorSensor,
    DistanceSensor,
    Gyro,
    TouchSensor,
    LightSensor,
    Imu,
}

impl HardwareKind {
    pub const ALL: [HardwareKind; 8] = [
        HardwareKind::Motor,
        HardwareKind::Servo,
        HardwareKind::ColorSensor,
        HardwareKind::DistanceSensor,
        HardwareKind::Gyro,
        HardwareKind::TouchSensor,
        HardwareKind::LightSensor,
        HardwareKind::Imu,
    ];

    /// Kind for a constructor name such as `motor` or `distance_sensor`.
    pub fn from_constructor(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.constructor() == name)
    }

    /// Constructor name in the DSL.
    pub fn constructor(self) -> &'static str {
        match self {
            HardwareKind::Motor => "motor",
            HardwareKind::Servo => "servo",
            HardwareKind::ColorSensor => "color_sensor",
            HardwareKind::DistanceSensor => "distance_sensor",
            HardwareKind::Gyro => "gyro",
            HardwareKind::TouchSensor => "touch_sensor",
            HardwareKind::LightSensor => "light_sensor",
            HardwareKind::Imu => "imu",
        }
    }

    /// Java interface the device is looked up as.
    pub fn java_type(self) -> &'static str {
        match self {
            HardwareKind::Motor => "DcMotor",
            HardwareKind::Servo => "Servo",
            HardwareKind::ColorSensor => "ColorSensor",
            HardwareKind::DistanceSensor => "DistanceSensor",
            HardwareKind::Gyro => "GyroSensor",
            HardwareKind::TouchSensor => "TouchSensor",
            HardwareKind::LightSensor => "LightSensor",
            HardwareKind::Imu => "IMU",
        }
    }

    /// Only motors take a direction.
    pub fn has_direction(self) -> bool {
        matches!(self, HardwareKind::Motor)
    }
}

/// Motor direction token → Java constant.
pub fn motor_direction(token: &str) -> Option<&'static str> {
    match token {
        "forward" => Some("DcMotor.Direction.FORWARD"),
        "reverse" => Some("DcMotor.Direction.REVERSE"),
        _ => None,
    }
}

/// Motor run-mode token → Java constant.
pub fn run_mode(token: &str) -> Option<&'static str> {
    match token {
        "run_using_encoder" => Some("DcMotor.RunMode.RUN_USING_ENCODER"),
        "run_without_encoder" => Some("DcMotor.RunMode.RUN_WITHOUT_ENCODER"),
        "run_to_position" => Some("DcMotor.RunMode.RUN_TO_POSITION"),
        "stop_and_reset_encoder" => Some("DcMotor.RunMode.STOP_AND_RESET_ENCODER"),
        _ => None,
    }
}

/// Names that refer to the driver gamepads.
pub const GAMEPADS: &[&str] = &["gamepad1", "gamepad2"];

/// Gamepad field in the DSL → field on the SDK `Gamepad` object.
///
/// The face buttons drop their `_button` suffix; everything else (sticks,
/// triggers, bumpers, dpad) already has the SDK name.
pub fn gamepad_field(field: &str) -> &str {
    match field {
        "a_button" => "a",
        "b_button" => "b",
        "x_button" => "x",
        "y_button" => "y",
        other => other,
    }
}

/// Java spelling of a binary operator, or `None` when Java has no
/// equivalent the translator can use.
pub fn java_operator(op: BinaryOp) -> Option<&'static str> {
    let s = match op {
        BinaryOp::Add => "+",
        BinaryOp::Sub => "-",
        BinaryOp::Mul => "*",
        BinaryOp::Div => "/",
        BinaryOp::Mod => "%",
        BinaryOp::Lt => "<",
        BinaryOp::Gt => ">",
        BinaryOp::LtE => "<=",
        BinaryOp::GtE => ">=",
        BinaryOp::Eq => "==",
        BinaryOp::NotEq => "!=",
        BinaryOp::And => "&&",
        BinaryOp::Or => "||",
        _ => return None,
    };
    Some(s)
}

/// Java binding strength of an operator (higher binds tighter).
///
/// Unmapped operators sit at the bottom so their operands never get
/// wrapped around a `?` placeholder.
pub fn java_precedence(op: BinaryOp) -> u8 {
    match op {
        BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => 12,
        BinaryOp::Add | BinaryOp::Sub => 11,
        BinaryOp::Lt | BinaryOp::Gt | BinaryOp::LtE | BinaryOp::GtE => 9,
        BinaryOp::Eq | BinaryOp::NotEq => 8,
        BinaryOp::And => 4,
        BinaryOp::Or => 3,
        _ => 0,
    }
}

/// How a receiver-method call maps onto the SDK.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallTemplate {
    /// `obj.java(arg)`
    Setter(&'static str),
    /// `obj.java()`
    Getter(&'static str),
    /// `obj.java(FIXED)`: the SDK needs an argument the DSL leaves implicit.
    GetterWith(&'static str, &'static str),
    /// `obj.setMode(RUN_MODE)` with the string argument remapped.
    RunMode,
}

impl CallTemplate {
    /// Number of positional arguments the DSL method takes.
    pub fn arity(self) -> usize {
        match self {
            CallTemplate::Setter(_) | CallTemplate::RunMode => 1,
            CallTemplate::Getter(_) | CallTemplate::GetterWith(..) => 0,
        }
    }
}

/// Device method in the DSL → SDK call template.
pub fn device_method(method: &str) -> Option<CallTemplate> {
    let template = match method {
        "set_power" => CallTemplate::Setter("setPower"),
        "set_position" => CallTemplate::Setter("setPosition"),
        "set_target_position" => CallTemplate::Setter("setTargetPosition"),
        "get_distance" => CallTemplate::GetterWith("getDistance", "DistanceUnit.CM"),
        "is_pressed" => CallTemplate::Getter("isPressed"),
        "get_current_position" => CallTemplate::Getter("getCurrentPosition"),
        "set_mode" => CallTemplate::RunMode,
        _ => return None,
    };
    Some(template)
}

// Routines with structural treatment.
pub const INITIALIZER: &str = "init_hardware";
pub const ENTRY: &str = "run";
pub const LOOP: &str = "loop";

/// Java method name for a routine of the unit.
pub fn java_routine_name(name: &str) -> &str {
    match name {
        INITIALIZER => "initHardware",
        ENTRY => "runOpMode",
        LOOP => "mainLoop",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hardware_kinds() {
        assert_eq!(
            HardwareKind::from_constructor("motor").map(HardwareKind::java_type),
            Some("DcMotor")
        );
        assert_eq!(
            HardwareKind::from_constructor("distance_sensor").map(HardwareKind::java_type),
            Some("DistanceSensor")
        );
        assert_eq!(
            HardwareKind::from_constructor("imu").map(HardwareKind::java_type),
            Some("IMU")
        );
        assert_eq!(HardwareKind::from_constructor("webcam"), None);

        for kind in HardwareKind::ALL {
            assert_eq!(HardwareKind::from_constructor(kind.constructor()), Some(kind));
        }
    }

    #[test]
    fn test_directions_and_modes() {
        assert_eq!(motor_direction("forward"), Some("DcMotor.Direction.FORWARD"));
        assert_eq!(motor_direction("reverse"), Some("DcMotor.Direction.REVERSE"));
        assert_eq!(motor_direction("FORWARD"), None);
        assert_eq!(
            run_mode("run_to_position"),
            Some("DcMotor.RunMode.RUN_TO_POSITION")
        );
        assert_eq!(run_mode("coast"), None);
    }

    #[test]
    fn test_gamepad_fields() {
        assert_eq!(gamepad_field("a_button"), "a");
        assert_eq!(gamepad_field("y_button"), "y");
        assert_eq!(gamepad_field("left_stick_y"), "left_stick_y");
        assert_eq!(gamepad_field("dpad_up"), "dpad_up");
        assert_eq!(gamepad_field("left_bumper"), "left_bumper");
    }

    #[test]
    fn test_operators() {
        assert_eq!(java_operator(BinaryOp::Add), Some("+"));
        assert_eq!(java_operator(BinaryOp::Eq), Some("=="));
        assert_eq!(java_operator(BinaryOp::And), Some("&&"));
        assert_eq!(java_operator(BinaryOp::Pow), None);
        assert_eq!(java_operator(BinaryOp::FloorDiv), None);
        assert!(java_precedence(BinaryOp::Mul) > java_precedence(BinaryOp::Add));
        assert!(java_precedence(BinaryOp::Lt) > java_precedence(BinaryOp::Eq));
        assert!(java_precedence(BinaryOp::And) > java_precedence(BinaryOp::Or));
    }

    #[test]
    fn test_routine_names() {
        assert_eq!(java_routine_name("init_hardware"), "initHardware");
        assert_eq!(java_routine_name("run"), "runOpMode");
        assert_eq!(java_routine_name("loop"), "mainLoop");
        assert_eq!(java_routine_name("drive"), "drive");
    }
}
