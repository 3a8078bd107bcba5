//! STM32CubeMX pinout report parsing
//!
//! The report is a tab-separated table. One line names the MCU model; the
//! rows after the `Pin Nb` header assign a function to each pin number.

use std::collections::HashMap;
use std::fmt;

/// Marker beginning the MCU model line
const MCU_MARKER: &str = "MCU";

/// Header introducing the pin assignment rows
const PIN_TABLE_HEADER: &str = "Pin Nb";

/// Errors that can occur while reading a report
#[derive(Debug, Clone, PartialEq)]
pub enum ReportError {
    /// No line carrying the MCU model was found
    MissingMcu,
    /// A pin row did not have the expected tab-separated fields
    MalformedPinRow { line: usize },
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::MissingMcu => write!(f, "the report does not name an MCU model"),
            ReportError::MalformedPinRow { line } => {
                write!(f, "pin row on line {} is not a tab-separated assignment", line)
            }
        }
    }
}

impl std::error::Error for ReportError {}

/// Parsed contents of a pinout report
#[derive(Debug, Clone, PartialEq)]
pub struct PinoutReport {
    /// MCU model identifier, e.g. `STM8S003F3Px`
    pub mcu_model: String,
    /// Pin number text mapped to the assigned function name
    pub pin_assignments: HashMap<String, String>,
}

impl PinoutReport {
    /// Parse a full report
    ///
    /// The MCU model comes from the first line beginning with `MCU`,
    /// second tab field. Pin rows are `number, name, function, …`; the
    /// mapping keys the number to the function. Blank lines are skipped.
    pub fn parse(text: &str) -> Result<Self, ReportError> {
        let mut mcu_model = None;
        let mut pin_assignments = HashMap::new();
        let mut in_pin_table = false;

        for (index, line) in text.lines().enumerate() {
            if mcu_model.is_none() && line.starts_with(MCU_MARKER) {
                mcu_model = line
                    .split('\t')
                    .nth(1)
                    .map(|field| field.trim().to_string());
                continue;
            }
            if line.starts_with(PIN_TABLE_HEADER) {
                in_pin_table = true;
                continue;
            }
            if !in_pin_table || line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() < 3 {
                return Err(ReportError::MalformedPinRow { line: index + 1 });
            }
            pin_assignments.insert(fields[0].to_string(), fields[2].to_string());
        }

        match mcu_model {
            Some(mcu_model) => Ok(Self {
                mcu_model,
                pin_assignments,
            }),
            None => Err(ReportError::MissingMcu),
        }
    }

    /// Library lookup prefix: the model with one trailing variant marker
    /// character removed
    pub fn symbol_prefix(&self) -> &str {
        self.mcu_model
            .strip_suffix('x')
            .unwrap_or(&self.mcu_model)
    }
}
