//! System status snapshot and the parser for the server's status text.
//!
//! The server reports status as human-readable lines, e.g.
//!
//! ```text
//! 🖥️ System Status
//! 🧠 CPU: 12% (8 cores)
//! 💾 RAM: 6.1 / 16.0 GB (38%)
//! 💿 Disk: 120 / 500 GB (24%)
//! 🔋 Battery: 87% (charging)
//! ```

/// Shown for any field the server has not reported.
pub const PLACEHOLDER: &str = "—";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub cpu: String,
    pub ram: String,
    pub disk: String,
    pub battery: String,
}

impl Default for StatusSnapshot {
    fn default() -> Self {
        Self {
            cpu: PLACEHOLDER.to_string(),
            ram: PLACEHOLDER.to_string(),
            disk: PLACEHOLDER.to_string(),
            battery: PLACEHOLDER.to_string(),
        }
    }
}

/// Build a fresh snapshot from status text. Unreported fields get the placeholder.
pub fn parse_status(text: &str) -> StatusSnapshot {
    let mut snapshot = StatusSnapshot::default();

    for line in text.lines() {
        let Some((label, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        if value.is_empty() {
            continue;
        }

        let label = label.to_lowercase();
        let field = label
            .split(|c: char| !c.is_alphanumeric())
            .find_map(Field::from_word);
        let slot = match field {
            Some(Field::Cpu) => &mut snapshot.cpu,
            Some(Field::Ram) => &mut snapshot.ram,
            Some(Field::Disk) => &mut snapshot.disk,
            Some(Field::Battery) => &mut snapshot.battery,
            None => continue,
        };
        *slot = value.to_string();
    }

    snapshot
}

enum Field {
    Cpu,
    Ram,
    Disk,
    Battery,
}

impl Field {
    fn from_word(word: &str) -> Option<Field> {
        match word {
            "cpu" => Some(Field::Cpu),
            "ram" | "memory" | "mem" => Some(Field::Ram),
            "disk" | "storage" => Some(Field::Disk),
            "battery" | "power" => Some(Field::Battery),
            _ => None,
        }
    }
}
