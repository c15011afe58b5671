//! Board discovery across every registered toolchain.

use std::collections::BTreeMap;

use crate::core::board::{Board, DetectedBoard};
use crate::core::catalog::BoardCatalog;
use crate::toolchain::{DetectionError, ToolchainAdapter, ToolchainRegistry};
use crate::util::errors::ResolveError;

/// Aggregates board enumeration from all adapters.
pub struct BoardResolver<'r> {
    registry: &'r ToolchainRegistry,
}

fn log_detection_failure(adapter: &dyn ToolchainAdapter, err: &DetectionError) {
    match err {
        DetectionError::ToolMissing { .. } => {
            tracing::debug!("skipping {} board detection: {}", adapter.name(), err)
        }
        _ => tracing::warn!("{} board detection failed: {}", adapter.name(), err),
    }
}

/// Enumerate one adapter's boards, degrading a failure to no boards.
pub fn detect_with(adapter: &dyn ToolchainAdapter) -> Vec<DetectedBoard> {
    match adapter.detect_boards() {
        Ok(boards) => boards,
        Err(err) => {
            log_detection_failure(adapter, &err);
            Vec::new()
        }
    }
}

impl<'r> BoardResolver<'r> {
    pub fn new(registry: &'r ToolchainRegistry) -> Self {
        BoardResolver { registry }
    }

    /// Every adapter's detected boards, concatenated in registry order.
    ///
    /// A failing adapter contributes nothing; it never hides boards found
    /// by the others. Duplicates on the same port are all kept.
    pub fn detect_all(&self) -> Vec<DetectedBoard> {
        let detected: Vec<DetectedBoard> = self
            .registry
            .all()
            .flat_map(|adapter| detect_with(adapter))
            .collect();
        tracing::debug!("detected {} board(s)", detected.len());
        detected
    }

    /// Ports reported by more than one adapter, with every report for each.
    pub fn port_conflicts(detected: &[DetectedBoard]) -> BTreeMap<&str, Vec<&DetectedBoard>> {
        let mut by_port: BTreeMap<&str, Vec<&DetectedBoard>> = BTreeMap::new();
        for d in detected {
            by_port.entry(d.port.as_str()).or_default().push(d);
        }
        by_port.retain(|_, reports| reports.len() > 1);
        by_port
    }

    /// Look up a board by slug in the catalog.
    pub fn find_board(&self, slug: &str) -> Result<&'static Board, ResolveError> {
        let catalog = BoardCatalog::global();
        catalog.get(slug).ok_or_else(|| ResolveError::UnknownBoard {
            slug: slug.to_string(),
            known: catalog.slugs().into_iter().map(str::to_string).collect(),
        })
    }

    /// First registered adapter that can name `board`.
    pub fn adapter_for_board(&self, board: &Board) -> Option<&'r dyn ToolchainAdapter> {
        self.registry
            .all()
            .find(|adapter| adapter.boards().iter().any(|b| b.slug == board.slug))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::board::BoardInfo;
    use crate::toolchain::{Availability, SerialConfig};
    use std::path::Path;

    struct Fake {
        name: &'static str,
        result: fn() -> Result<Vec<DetectedBoard>, DetectionError>,
    }

    impl ToolchainAdapter for Fake {
        fn name(&self) -> &str {
            self.name
        }
        fn detect_project(&self, _dir: &Path) -> bool {
            false
        }
        fn detect_boards(&self) -> Result<Vec<DetectedBoard>, DetectionError> {
            (self.result)()
        }
        fn compile_command(&self, _board: &Board) -> String {
            String::new()
        }
        fn upload_command(&self, _board: &Board, _port: &str) -> String {
            String::new()
        }
        fn serial_config(&self, board: &Board) -> SerialConfig {
            SerialConfig {
                baud_rate: board.baud_rate,
                boot_delay: 3,
            }
        }
        fn board_info(&self, _board: &Board) -> BoardInfo {
            BoardInfo::default()
        }
        fn environment_check(&self) -> Availability {
            Availability::Builtin
        }
    }

    fn esp32_on_usb0() -> Result<Vec<DetectedBoard>, DetectionError> {
        let board = BoardCatalog::global().get("esp32").unwrap().clone();
        Ok(vec![DetectedBoard::new(board, "/dev/ttyUSB0", "good")])
    }

    fn esp32s3_on_usb0() -> Result<Vec<DetectedBoard>, DetectionError> {
        let board = BoardCatalog::global().get("esp32s3").unwrap().clone();
        Ok(vec![DetectedBoard::new(board, "/dev/ttyUSB0", "other")])
    }

    fn broken() -> Result<Vec<DetectedBoard>, DetectionError> {
        Err(DetectionError::Failed {
            command: "broken list".to_string(),
            code: Some(2),
        })
    }

    fn missing() -> Result<Vec<DetectedBoard>, DetectionError> {
        Err(DetectionError::ToolMissing {
            program: "broken".to_string(),
        })
    }

    fn registry(adapters: Vec<Fake>) -> ToolchainRegistry {
        let mut registry = ToolchainRegistry::empty();
        for adapter in adapters {
            registry.register(Box::new(adapter));
        }
        registry
    }

    #[test]
    fn test_failing_adapter_does_not_hide_others() {
        let registry = registry(vec![
            Fake { name: "broken", result: broken },
            Fake { name: "missing", result: missing },
            Fake { name: "good", result: esp32_on_usb0 },
        ]);

        let detected = BoardResolver::new(&registry).detect_all();
        assert_eq!(detected.len(), 1);
        assert_eq!(detected[0].board.slug, "esp32");
        assert_eq!(detected[0].toolchain_name, "good");
    }

    #[test]
    fn test_same_port_reports_are_all_kept() {
        let registry = registry(vec![
            Fake { name: "good", result: esp32_on_usb0 },
            Fake { name: "other", result: esp32s3_on_usb0 },
        ]);

        let detected = BoardResolver::new(&registry).detect_all();
        assert_eq!(detected.len(), 2);

        let conflicts = BoardResolver::port_conflicts(&detected);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts["/dev/ttyUSB0"].len(), 2);
    }

    #[test]
    fn test_find_board() {
        let registry = ToolchainRegistry::new();
        let resolver = BoardResolver::new(&registry);
        assert_eq!(resolver.find_board("rp2040").unwrap().slug, "rp2040");

        match resolver.find_board("esp64") {
            Err(ResolveError::UnknownBoard { slug, known }) => {
                assert_eq!(slug, "esp64");
                assert_eq!(known.len(), 12);
            }
            other => panic!("expected UnknownBoard, got {:?}", other),
        }
    }

    #[test]
    fn test_adapter_for_board_uses_registration_order() {
        let registry = ToolchainRegistry::new();
        let resolver = BoardResolver::new(&registry);
        let board = resolver.find_board("teensy41").unwrap();
        assert_eq!(resolver.adapter_for_board(board).unwrap().name(), "arduino");
        assert!(resolver.adapter_for_board(&Board::custom("Mystery", 9600)).is_none());
    }
}
