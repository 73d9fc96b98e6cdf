//! Fixed import block.
//!
//! Every unit gets the same imports regardless of the hardware it uses, so
//! the block never depends on emission state.

/// Framework classes, alphabetical.
pub const IMPORTS: &[&str] = &[
    "com.qualcomm.robotcore.eventloop.opmode.Autonomous",
    "com.qualcomm.robotcore.eventloop.opmode.Disabled",
    "com.qualcomm.robotcore.eventloop.opmode.LinearOpMode",
    "com.qualcomm.robotcore.eventloop.opmode.TeleOp",
    "com.qualcomm.robotcore.hardware.ColorSensor",
    "com.qualcomm.robotcore.hardware.DcMotor",
    "com.qualcomm.robotcore.hardware.DistanceSensor",
    "com.qualcomm.robotcore.hardware.GyroSensor",
    "com.qualcomm.robotcore.hardware.IMU",
    "com.qualcomm.robotcore.hardware.LightSensor",
    "com.qualcomm.robotcore.hardware.Servo",
    "com.qualcomm.robotcore.hardware.TouchSensor",
    "org.firstinspires.ftc.robotcore.external.navigation.AngleUnit",
    "org.firstinspires.ftc.robotcore.external.navigation.DistanceUnit",
];

/// `import ...;` lines followed by one blank line.
pub fn import_block() -> String {
    let mut block = String::new();
    for import in IMPORTS {
        block.push_str("import ");
        block.push_str(import);
        block.push_str(";\n");
    }
    block.push('\n');
    block
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::HardwareKind;

    #[test]
    fn test_sorted_and_unique() {
        let mut sorted = IMPORTS.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted, IMPORTS);
    }

    #[test]
    fn test_every_hardware_type_imported() {
        for kind in HardwareKind::ALL {
            let suffix = format!(".{}", kind.java_type());
            assert!(
                IMPORTS.iter().any(|i| i.ends_with(&suffix)),
                "missing import for {}",
                kind.java_type()
            );
        }
    }

    #[test]
    fn test_block_shape() {
        let block = import_block();
        assert!(block.starts_with("import com.qualcomm.robotcore.eventloop.opmode.Autonomous;\n"));
        assert!(block.ends_with("DistanceUnit;\n\n"));
        assert_eq!(block.lines().filter(|l| l.starts_with("import ")).count(), IMPORTS.len());
    }
}
