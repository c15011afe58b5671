//! PlatformIO toolchain.

use std::path::Path;

use serde::Deserialize;

use crate::core::board::{Board, BoardInfo, DetectedBoard};
use crate::core::catalog::{parse_usb_id, BoardCatalog};
use crate::toolchain::{
    require_program, run_enumeration, Availability, DetectionError, SerialConfig,
    ToolchainAdapter,
};

const NAME: &str = "platformio";

/// One entry of `pio device list --json-output`.
#[derive(Debug, Deserialize)]
struct SerialDevice {
    #[serde(default)]
    port: String,
    #[serde(default)]
    hwid: String,
}

/// Extract the USB VID/PID pair from a hardware id such as
/// `USB VID:PID=10C4:EA60 SER=0001 LOCATION=20-1`.
pub fn parse_hwid(hwid: &str) -> Option<(u16, u16)> {
    let ids = hwid
        .split_whitespace()
        .find_map(|token| token.strip_prefix("VID:PID="))?;
    let (vid, pid) = ids.split_once(':')?;
    Some((parse_usb_id(vid)?, parse_usb_id(pid)?))
}

/// Map `pio device list` JSON onto catalog boards via USB VID/PID hints.
pub fn parse_device_list(json: &str) -> Result<Vec<DetectedBoard>, serde_json::Error> {
    let devices: Vec<SerialDevice> = serde_json::from_str(json)?;
    let catalog = BoardCatalog::global();

    Ok(devices
        .into_iter()
        .filter(|d| !d.port.is_empty())
        .flat_map(|device| {
            let boards = parse_hwid(&device.hwid)
                .map(|(vid, pid)| catalog.find_by_usb_id(vid, pid))
                .unwrap_or_default();
            boards
                .into_iter()
                .map(|b| DetectedBoard::new(b.clone(), device.port.clone(), NAME))
                .collect::<Vec<_>>()
        })
        .collect())
}

/// Projects managed by `platformio.ini`.
#[derive(Debug, Default)]
pub struct PlatformIOToolchain;

impl PlatformIOToolchain {
    pub fn new() -> Self {
        PlatformIOToolchain
    }
}

impl ToolchainAdapter for PlatformIOToolchain {
    fn name(&self) -> &str {
        NAME
    }

    fn detect_project(&self, dir: &Path) -> bool {
        dir.join("platformio.ini").is_file()
    }

    fn detect_boards(&self) -> Result<Vec<DetectedBoard>, DetectionError> {
        let args = ["device", "list", "--json-output"];
        let stdout = run_enumeration("pio", &args)?;
        parse_device_list(&stdout).map_err(|source| DetectionError::MalformedOutput {
            command: format!("pio {}", args.join(" ")),
            source,
        })
    }

    fn compile_command(&self, _board: &Board) -> String {
        "pio run".to_string()
    }

    fn upload_command(&self, _board: &Board, port: &str) -> String {
        format!("pio run --target upload --upload-port {}", port)
    }

    fn monitor_command(&self, board: &Board, port: &str) -> Option<String> {
        Some(format!(
            "pio device monitor --port {} --baud {}",
            port, board.baud_rate
        ))
    }

    fn serial_config(&self, board: &Board) -> SerialConfig {
        SerialConfig {
            baud_rate: board.baud_rate,
            boot_delay: 3,
        }
    }

    fn board_info(&self, board: &Board) -> BoardInfo {
        BoardInfo::notes_and_pitfalls(board)
    }

    fn environment_check(&self) -> Availability {
        require_program("pio", "https://platformio.org/install/cli")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_detects_platformio_ini() {
        let tmp = TempDir::new().unwrap();
        let pio = PlatformIOToolchain::new();
        assert!(!pio.detect_project(tmp.path()));

        std::fs::write(tmp.path().join("platformio.ini"), "[env:esp32dev]\n").unwrap();
        assert!(pio.detect_project(tmp.path()));
    }

    #[test]
    fn test_commands() {
        let pio = PlatformIOToolchain::new();
        let board = BoardCatalog::global().get("esp32").unwrap();
        assert_eq!(pio.compile_command(board), "pio run");
        assert_eq!(
            pio.upload_command(board, "/dev/ttyUSB0"),
            "pio run --target upload --upload-port /dev/ttyUSB0"
        );
        assert_eq!(
            pio.monitor_command(board, "/dev/ttyUSB0").as_deref(),
            Some("pio device monitor --port /dev/ttyUSB0 --baud 115200")
        );
    }

    #[test]
    fn test_board_info_is_notes_and_pitfalls_only() {
        let pio = PlatformIOToolchain::new();
        let info = pio.board_info(BoardCatalog::global().get("esp32").unwrap());
        assert!(info.pitfalls.is_some());
        assert!(info.pin_notes.is_some());
        assert!(info.capabilities.is_none());
        assert!(info.includes.is_none());
        assert!(info.pins.is_none());
    }

    #[test]
    fn test_parse_hwid() {
        assert_eq!(
            parse_hwid("USB VID:PID=10C4:EA60 SER=0001 LOCATION=20-1"),
            Some((0x10C4, 0xEA60))
        );
        assert_eq!(parse_hwid("n/a"), None);
        assert_eq!(parse_hwid("USB VID:PID=zzzz:EA60"), None);
    }

    #[test]
    fn test_parse_device_list() {
        let json = r#"[
            {"port": "/dev/ttyUSB0", "description": "CP2102", "hwid": "USB VID:PID=10C4:EA60 SER=0001"},
            {"port": "/dev/ttyS0", "description": "n/a", "hwid": "n/a"}
        ]"#;
        let detected = parse_device_list(json).unwrap();
        let slugs: Vec<_> = detected.iter().map(|d| d.board.slug.as_str()).collect();
        assert_eq!(slugs, vec!["esp32", "esp8266"]);
        assert!(detected.iter().all(|d| d.port == "/dev/ttyUSB0"));
        assert!(detected.iter().all(|d| d.toolchain_name == "platformio"));
    }

    #[test]
    fn test_parse_malformed_device_list() {
        assert!(parse_device_list("{\"not\": \"a list\"}").is_err());
        assert!(parse_device_list("[]").unwrap().is_empty());
    }
}
