use crate::canvas::Canvas;
use crate::theme::ThemeSource;
use std::collections::BTreeMap;

/// Named KPI text slots on the dashboard page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    Total,
    Approved,
    Deals,
    Reps,
    Conversion,
    Clients,
    Upcoming,
    RepTotal,
}

impl Slot {
    pub const ALL: [Slot; 8] = [
        Slot::Total,
        Slot::Approved,
        Slot::Deals,
        Slot::Reps,
        Slot::Conversion,
        Slot::Clients,
        Slot::Upcoming,
        Slot::RepTotal,
    ];

    pub fn element_id(self) -> &'static str {
        match self {
            Slot::Total => "k_total",
            Slot::Approved => "k_approved",
            Slot::Deals => "k_deals",
            Slot::Reps => "k_reps",
            Slot::Conversion => "conv",
            Slot::Clients => "clientsCount",
            Slot::Upcoming => "upcoming",
            Slot::RepTotal => "repTotal",
        }
    }
}

/// Text slots present in the document. A slot missing from the map is
/// skipped by the renderer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextSlots {
    slots: BTreeMap<Slot, String>,
}

impl TextSlots {
    /// Every slot, each holding `placeholder`.
    pub fn all(placeholder: &str) -> Self {
        let mut slots = Self::default();
        for slot in Slot::ALL {
            slots.insert(slot, placeholder);
        }
        slots
    }

    pub fn insert(&mut self, slot: Slot, text: impl Into<String>) {
        self.slots.insert(slot, text.into());
    }

    pub fn get(&self, slot: Slot) -> Option<&str> {
        self.slots.get(&slot).map(String::as_str)
    }

    /// Overwrites the slot's text if it exists; returns whether it did.
    pub fn set_text(&mut self, slot: Slot, text: String) -> bool {
        match self.slots.get_mut(&slot) {
            Some(current) => {
                *current = text;
                true
            }
            None => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarRow {
    pub label: String,
    pub width_percent: u32,
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BarList {
    rows: Vec<BarRow>,
}

impl BarList {
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn push(&mut self, row: BarRow) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[BarRow] {
        &self.rows
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableBody {
    rows: Vec<Vec<String>>,
}

impl TableBody {
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn push_row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }
}

/// Output targets handed to the renderer. `None` marks a target absent
/// from the document.
pub struct Targets<'a> {
    pub slots: &'a mut TextSlots,
    pub bars: Option<&'a mut BarList>,
    pub line_chart: Option<&'a mut dyn Canvas>,
    pub recent: Option<&'a mut TableBody>,
    pub upcoming: Option<&'a mut TableBody>,
    pub theme: &'a dyn ThemeSource,
}
