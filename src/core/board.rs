//! Board records and the board-derived views handed to synthesis.

/// Arduino core package that provides a board's build support.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardPackage {
    /// Core identifier (e.g., "esp32:esp32")
    pub core: String,
    /// Additional board-manager index URL, if the core is not bundled
    pub index_url: Option<String>,
}

/// A microcontroller board, independent of any specific toolchain.
///
/// Catalog boards are built once and never mutated. Fields are kept in
/// declaration order so rendered output is stable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Unique slug (e.g., "esp32", "arduino-uno")
    pub slug: String,
    /// Display name
    pub name: String,
    /// Default serial baud rate
    pub baud_rate: u32,
    /// Capability tags (e.g., "wifi", "ble")
    pub capabilities: Vec<String>,
    /// Named pins and their GPIO numbers
    pub pins: Vec<(String, u32)>,
    /// Free-form pin reference notes
    pub pin_notes: Vec<String>,
    /// Common mistakes on this board, in priority order
    pub pitfalls: Vec<String>,
    /// Capability → include directive
    pub includes: Vec<(String, String)>,
    /// Arduino fully-qualified board name
    pub fqbn: Option<String>,
    /// Arduino core package
    pub package: Option<BoardPackage>,
    /// OpenOCD target config name (without `.cfg`)
    pub jtag_target: Option<String>,
}

impl Board {
    /// Create a board with no metadata.
    pub fn new(slug: impl Into<String>, name: impl Into<String>, baud_rate: u32) -> Self {
        Board {
            slug: slug.into(),
            name: name.into(),
            baud_rate,
            capabilities: Vec::new(),
            pins: Vec::new(),
            pin_notes: Vec::new(),
            pitfalls: Vec::new(),
            includes: Vec::new(),
            fqbn: None,
            package: None,
            jtag_target: None,
        }
    }

    /// A user-described board for override-file projects.
    pub fn custom(name: impl Into<String>, baud_rate: u32) -> Self {
        Board::new("custom", name, baud_rate)
    }

    pub fn with_capabilities(mut self, caps: &[&str]) -> Self {
        for cap in caps {
            if !self.capabilities.iter().any(|c| c == cap) {
                self.capabilities.push((*cap).to_string());
            }
        }
        self
    }

    pub fn with_pins(mut self, pins: &[(&str, u32)]) -> Self {
        self.pins
            .extend(pins.iter().map(|(name, num)| ((*name).to_string(), *num)));
        self
    }

    pub fn with_pin_notes(mut self, notes: &[&str]) -> Self {
        self.pin_notes.extend(notes.iter().map(|n| (*n).to_string()));
        self
    }

    pub fn with_pitfalls(mut self, pitfalls: &[&str]) -> Self {
        self.pitfalls.extend(pitfalls.iter().map(|p| (*p).to_string()));
        self
    }

    pub fn with_includes(mut self, includes: &[(&str, &str)]) -> Self {
        self.includes.extend(
            includes
                .iter()
                .map(|(cap, inc)| ((*cap).to_string(), (*inc).to_string())),
        );
        self
    }

    pub fn with_fqbn(mut self, fqbn: impl Into<String>) -> Self {
        self.fqbn = Some(fqbn.into());
        self
    }

    /// Set the Arduino core package. An empty index URL means the core ships
    /// with arduino-cli.
    pub fn with_package(mut self, core: impl Into<String>, index_url: &str) -> Self {
        self.package = Some(BoardPackage {
            core: core.into(),
            index_url: (!index_url.is_empty()).then(|| index_url.to_string()),
        });
        self
    }

    pub fn with_jtag_target(mut self, target: impl Into<String>) -> Self {
        self.jtag_target = Some(target.into());
        self
    }
}

/// Board metadata selected by a toolchain for the board reference section.
///
/// Only fields the board actually has are populated; an absent field is
/// `None`, never an empty collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardInfo {
    pub capabilities: Option<Vec<String>>,
    pub includes: Option<Vec<(String, String)>>,
    pub pins: Option<Vec<(String, u32)>>,
    pub pin_notes: Option<Vec<String>>,
    pub pitfalls: Option<Vec<String>>,
    pub fqbn: Option<String>,
    pub jtag_target: Option<String>,
    pub package: Option<BoardPackage>,
}

fn non_empty<T: Clone>(items: &[T]) -> Option<Vec<T>> {
    (!items.is_empty()).then(|| items.to_vec())
}

impl BoardInfo {
    /// Every metadata field of the board.
    pub fn full(board: &Board) -> Self {
        BoardInfo {
            capabilities: non_empty(&board.capabilities),
            includes: non_empty(&board.includes),
            pins: non_empty(&board.pins),
            pin_notes: non_empty(&board.pin_notes),
            pitfalls: non_empty(&board.pitfalls),
            fqbn: board.fqbn.clone(),
            jtag_target: board.jtag_target.clone(),
            package: board.package.clone(),
        }
    }

    /// Only pin notes and pitfalls, for toolchains that do not use the
    /// Arduino-specific metadata.
    pub fn notes_and_pitfalls(board: &Board) -> Self {
        BoardInfo {
            pin_notes: non_empty(&board.pin_notes),
            pitfalls: non_empty(&board.pitfalls),
            jtag_target: board.jtag_target.clone(),
            ..Default::default()
        }
    }

    /// Prepend toolchain-wide pitfalls ahead of the board's own.
    pub fn with_leading_pitfalls(mut self, leading: &[&str]) -> Self {
        let mut pitfalls: Vec<String> = leading.iter().map(|p| (*p).to_string()).collect();
        pitfalls.extend(self.pitfalls.take().unwrap_or_default());
        self.pitfalls = non_empty(&pitfalls);
        self
    }

    /// Check whether any reference subsection has content.
    pub fn has_reference_content(&self) -> bool {
        self.capabilities.is_some()
            || self.includes.is_some()
            || self.pins.is_some()
            || self.pin_notes.is_some()
            || self.pitfalls.is_some()
    }
}

/// A board detected on a specific port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedBoard {
    /// The catalog board that matched
    pub board: Board,
    /// Communication port (e.g., "/dev/ttyUSB0")
    pub port: String,
    /// Name of the toolchain whose enumeration found it
    pub toolchain_name: String,
}

impl DetectedBoard {
    pub fn new(board: Board, port: impl Into<String>, toolchain_name: impl Into<String>) -> Self {
        DetectedBoard {
            board,
            port: port.into(),
            toolchain_name: toolchain_name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capabilities_are_deduplicated() {
        let board = Board::new("b", "B", 9600).with_capabilities(&["wifi", "ble", "wifi"]);
        assert_eq!(board.capabilities, vec!["wifi", "ble"]);
    }

    #[test]
    fn test_empty_index_url_is_none() {
        let board = Board::new("uno", "Uno", 9600).with_package("arduino:avr", "");
        assert_eq!(
            board.package,
            Some(BoardPackage {
                core: "arduino:avr".to_string(),
                index_url: None
            })
        );
    }

    #[test]
    fn test_board_info_omits_absent_fields() {
        let board = Board::new("b", "B", 9600).with_pitfalls(&["Watch out"]);
        let info = BoardInfo::full(&board);
        assert_eq!(info.pitfalls, Some(vec!["Watch out".to_string()]));
        assert!(info.capabilities.is_none());
        assert!(info.pins.is_none());
        assert!(info.includes.is_none());
        assert!(info.has_reference_content());

        let bare = BoardInfo::full(&Board::custom("Mine", 115200));
        assert!(!bare.has_reference_content());
    }

    #[test]
    fn test_leading_pitfalls() {
        let board = Board::new("b", "B", 9600).with_pitfalls(&["board specific"]);
        let info = BoardInfo::notes_and_pitfalls(&board).with_leading_pitfalls(&["global"]);
        assert_eq!(
            info.pitfalls,
            Some(vec!["global".to_string(), "board specific".to_string()])
        );

        let none = BoardInfo::default().with_leading_pitfalls(&[]);
        assert!(none.pitfalls.is_none());
    }
}
