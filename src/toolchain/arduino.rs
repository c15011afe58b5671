//! Arduino toolchain using arduino-cli.

use std::path::Path;

use serde::Deserialize;

use crate::core::board::{Board, BoardInfo, DetectedBoard};
use crate::core::catalog::{parse_usb_id, BoardCatalog};
use crate::toolchain::{
    require_program, run_enumeration, Availability, DetectionError, SerialConfig,
    ToolchainAdapter,
};
use crate::util::fs::has_file_with_extension;

const NAME: &str = "arduino";

/// `arduino-cli board list --format json` output.
#[derive(Debug, Default, Deserialize)]
struct BoardList {
    #[serde(default)]
    detected_ports: Vec<DetectedPort>,
}

#[derive(Debug, Default, Deserialize)]
struct DetectedPort {
    #[serde(default)]
    port: PortInfo,
    #[serde(default)]
    matching_boards: Vec<MatchingBoard>,
}

#[derive(Debug, Default, Deserialize)]
struct PortInfo {
    #[serde(default)]
    address: String,
    #[serde(default)]
    properties: PortProperties,
}

#[derive(Debug, Default, Deserialize)]
struct PortProperties {
    #[serde(default)]
    vid: String,
    #[serde(default)]
    pid: String,
}

#[derive(Debug, Default, Deserialize)]
struct MatchingBoard {
    #[serde(default)]
    fqbn: String,
}

/// Map `arduino-cli board list` JSON onto catalog boards.
///
/// FQBN matches win; a port with no recognised FQBN falls back to the
/// USB-serial bridge hints, which may yield several candidates.
pub fn parse_board_list(json: &str) -> Result<Vec<DetectedBoard>, serde_json::Error> {
    let list: BoardList = serde_json::from_str(json)?;
    let catalog = BoardCatalog::global();
    let mut detected = Vec::new();

    for entry in list.detected_ports {
        let port = entry.port.address;
        if port.is_empty() {
            continue;
        }

        let by_fqbn: Vec<&Board> = entry
            .matching_boards
            .iter()
            .filter_map(|m| catalog.find_by_fqbn(&m.fqbn))
            .collect();

        let boards = if by_fqbn.is_empty() {
            let props = &entry.port.properties;
            match (parse_usb_id(&props.vid), parse_usb_id(&props.pid)) {
                (Some(vid), Some(pid)) => catalog.find_by_usb_id(vid, pid),
                _ => Vec::new(),
            }
        } else {
            by_fqbn
        };

        detected.extend(
            boards
                .into_iter()
                .map(|b| DetectedBoard::new(b.clone(), port.clone(), NAME)),
        );
    }

    Ok(detected)
}

/// Arduino sketches built and flashed with arduino-cli.
#[derive(Debug, Default)]
pub struct ArduinoToolchain;

impl ArduinoToolchain {
    pub fn new() -> Self {
        ArduinoToolchain
    }

    fn fqbn<'a>(&self, board: &'a Board) -> &'a str {
        board.fqbn.as_deref().unwrap_or(board.slug.as_str())
    }
}

impl ToolchainAdapter for ArduinoToolchain {
    fn name(&self) -> &str {
        NAME
    }

    fn detect_project(&self, dir: &Path) -> bool {
        has_file_with_extension(dir, "ino")
    }

    fn detect_boards(&self) -> Result<Vec<DetectedBoard>, DetectionError> {
        let args = ["board", "list", "--format", "json"];
        let stdout = run_enumeration("arduino-cli", &args)?;
        parse_board_list(&stdout).map_err(|source| DetectionError::MalformedOutput {
            command: format!("arduino-cli {}", args.join(" ")),
            source,
        })
    }

    fn compile_command(&self, board: &Board) -> String {
        format!("arduino-cli compile --fqbn {} .", self.fqbn(board))
    }

    fn upload_command(&self, board: &Board, port: &str) -> String {
        format!(
            "arduino-cli upload --fqbn {} --port {} .",
            self.fqbn(board),
            port
        )
    }

    fn monitor_command(&self, board: &Board, port: &str) -> Option<String> {
        Some(format!(
            "arduino-cli monitor --port {} --config baudrate={}",
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
        BoardInfo::full(board)
    }

    fn setup_info(&self, board: &Board) -> Option<String> {
        let package = board.package.as_ref()?;
        Some(match &package.index_url {
            Some(url) => format!(
                "arduino-cli core install {} --additional-urls {}",
                package.core, url
            ),
            None => format!("arduino-cli core install {}", package.core),
        })
    }

    fn environment_check(&self) -> Availability {
        require_program(
            "arduino-cli",
            "https://arduino.github.io/arduino-cli/latest/installation/",
        )
    }

    fn boards(&self) -> &[Board] {
        BoardCatalog::global().all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const ONE_BOARD: &str = r#"{
        "detected_ports": [{
            "matching_boards": [{"name": "ESP32 Dev Module", "fqbn": "esp32:esp32:esp32"}],
            "port": {"address": "/dev/cu.usbserial-0001", "protocol": "serial"}
        }]
    }"#;

    const CH340_NO_MATCH: &str = r#"{
        "detected_ports": [{
            "port": {
                "address": "/dev/cu.usbserial-110",
                "protocol": "serial",
                "properties": {"pid": "0x7523", "vid": "0x1A86"}
            }
        }]
    }"#;

    fn esp32() -> Board {
        BoardCatalog::global().get("esp32").unwrap().clone()
    }

    #[test]
    fn test_detects_ino_file() {
        let tmp = TempDir::new().unwrap();
        let arduino = ArduinoToolchain::new();
        assert!(!arduino.detect_project(tmp.path()));

        std::fs::write(tmp.path().join("blink.ino"), "void setup() {}\nvoid loop() {}\n").unwrap();
        assert!(arduino.detect_project(tmp.path()));
    }

    #[test]
    fn test_commands() {
        let arduino = ArduinoToolchain::new();
        let board = esp32();
        assert_eq!(
            arduino.compile_command(&board),
            "arduino-cli compile --fqbn esp32:esp32:esp32:UploadSpeed=115200 ."
        );
        assert_eq!(
            arduino.upload_command(&board, "/dev/ttyUSB0"),
            "arduino-cli upload --fqbn esp32:esp32:esp32:UploadSpeed=115200 --port /dev/ttyUSB0 ."
        );
        assert_eq!(
            arduino.monitor_command(&board, "/dev/ttyUSB0").as_deref(),
            Some("arduino-cli monitor --port /dev/ttyUSB0 --config baudrate=115200")
        );
    }

    #[test]
    fn test_serial_config() {
        let arduino = ArduinoToolchain::new();
        let config = arduino.serial_config(&esp32());
        assert_eq!(config.baud_rate, 115200);
        assert_eq!(config.boot_delay, 3);

        let uno = BoardCatalog::global().get("arduino-uno").unwrap();
        assert_eq!(arduino.serial_config(uno).baud_rate, 9600);
    }

    #[test]
    fn test_setup_info() {
        let arduino = ArduinoToolchain::new();
        let esp = arduino.setup_info(&esp32()).unwrap();
        assert!(esp.starts_with("arduino-cli core install esp32:esp32 --additional-urls https://"));

        let uno = BoardCatalog::global().get("arduino-uno").unwrap();
        assert_eq!(
            arduino.setup_info(uno).as_deref(),
            Some("arduino-cli core install arduino:avr")
        );

        assert!(arduino.setup_info(&Board::custom("Mine", 9600)).is_none());
    }

    #[test]
    fn test_parse_fqbn_match() {
        let detected = parse_board_list(ONE_BOARD).unwrap();
        assert_eq!(detected.len(), 1);
        assert_eq!(detected[0].board.slug, "esp32");
        assert_eq!(detected[0].port, "/dev/cu.usbserial-0001");
        assert_eq!(detected[0].toolchain_name, "arduino");
    }

    #[test]
    fn test_parse_vid_pid_fallback() {
        let detected = parse_board_list(CH340_NO_MATCH).unwrap();
        let slugs: Vec<_> = detected.iter().map(|d| d.board.slug.as_str()).collect();
        assert_eq!(slugs, vec!["esp32", "esp8266", "arduino-nano"]);
        assert!(detected.iter().all(|d| d.port == "/dev/cu.usbserial-110"));
    }

    #[test]
    fn test_parse_skips_unknown_and_portless_entries() {
        let json = r#"{
            "detected_ports": [
                {"matching_boards": [{"fqbn": "vendor:arch:mystery"}], "port": {"address": "/dev/ttyACM0"}},
                {"matching_boards": [{"fqbn": "arduino:avr:uno"}], "port": {"address": ""}},
                {"port": {"address": "/dev/ttyS0", "properties": {"vid": "not-hex", "pid": "0x7523"}}}
            ]
        }"#;
        assert!(parse_board_list(json).unwrap().is_empty());
        assert!(parse_board_list("{}").unwrap().is_empty());
    }

    #[test]
    fn test_parse_malformed_output() {
        assert!(parse_board_list("not json").is_err());
    }

    #[test]
    fn test_lists_catalog_boards() {
        let arduino = ArduinoToolchain::new();
        assert_eq!(arduino.boards().len(), BoardCatalog::global().all().len());
    }
}
