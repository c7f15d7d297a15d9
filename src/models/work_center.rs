//! Work center enumeration.
//!
//! The shop's production stations form a closed set. Spreadsheet labels
//! are resolved to a [`WorkCenter`] once, at load time, using a
//! whitespace-stripped, case-insensitive key match.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CalendarError;

/// A production resource with its own weekly operating calendar.
///
/// Two members are sentinels rather than real stations:
/// [`WorkCenter::Unassigned`] and [`WorkCenter::ReadyForInspection`].
/// Jobs parked on a sentinel are never scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WorkCenter {
    #[serde(rename = "sl_50")]
    Sl50,
    #[serde(rename = "sl_30")]
    Sl30,
    #[serde(rename = "q")]
    Q,
    #[serde(rename = "r")]
    R,
    #[serde(rename = "a")]
    A,
    #[serde(rename = "x")]
    X,
    #[serde(rename = "sect_1")]
    Sect1,
    #[serde(rename = "q2")]
    Q2,
    #[serde(rename = "n")]
    N,
    #[serde(rename = "h")]
    H,
    #[serde(rename = "long_press")]
    LongPress,
    #[serde(rename = "fabrication")]
    Fabrication,
    #[serde(rename = "pvc")]
    Pvc,
    #[serde(rename = "pvc_vg")]
    PvcVg,
    #[serde(rename = "punch_press")]
    PunchPress,
    #[serde(rename = "loose_bw")]
    LooseBw,
    #[serde(rename = "ready_for_inspection")]
    ReadyForInspection,
    #[serde(rename = "unassigned")]
    Unassigned,
}

impl WorkCenter {
    /// Every work center, in shop-floor display order.
    pub const ALL: [WorkCenter; 18] = [
        WorkCenter::Sl50,
        WorkCenter::Sl30,
        WorkCenter::Q,
        WorkCenter::R,
        WorkCenter::A,
        WorkCenter::X,
        WorkCenter::Sect1,
        WorkCenter::Q2,
        WorkCenter::N,
        WorkCenter::H,
        WorkCenter::LongPress,
        WorkCenter::Fabrication,
        WorkCenter::Pvc,
        WorkCenter::PvcVg,
        WorkCenter::PunchPress,
        WorkCenter::LooseBw,
        WorkCenter::ReadyForInspection,
        WorkCenter::Unassigned,
    ];

    /// Spreadsheet column label.
    pub fn label(&self) -> &'static str {
        match self {
            WorkCenter::Sl50 => "SL 50",
            WorkCenter::Sl30 => "SL 30",
            WorkCenter::Q => "Q",
            WorkCenter::R => "R",
            WorkCenter::A => "A",
            WorkCenter::X => "X",
            WorkCenter::Sect1 => "SECT #1",
            WorkCenter::Q2 => "Q2",
            WorkCenter::N => "N",
            WorkCenter::H => "H",
            WorkCenter::LongPress => "Long press",
            WorkCenter::Fabrication => "Fabrication",
            WorkCenter::Pvc => "PVC",
            WorkCenter::PvcVg => "PVC VG",
            WorkCenter::PunchPress => "Punch press",
            WorkCenter::LooseBw => "Loose BW",
            WorkCenter::ReadyForInspection => "Ready for inspection",
            WorkCenter::Unassigned => "UNASSIGNED",
        }
    }

    /// Stable snake-case identifier (matches the serde form).
    pub fn id(&self) -> &'static str {
        match self {
            WorkCenter::Sl50 => "sl_50",
            WorkCenter::Sl30 => "sl_30",
            WorkCenter::Q => "q",
            WorkCenter::R => "r",
            WorkCenter::A => "a",
            WorkCenter::X => "x",
            WorkCenter::Sect1 => "sect_1",
            WorkCenter::Q2 => "q2",
            WorkCenter::N => "n",
            WorkCenter::H => "h",
            WorkCenter::LongPress => "long_press",
            WorkCenter::Fabrication => "fabrication",
            WorkCenter::Pvc => "pvc",
            WorkCenter::PvcVg => "pvc_vg",
            WorkCenter::PunchPress => "punch_press",
            WorkCenter::LooseBw => "loose_bw",
            WorkCenter::ReadyForInspection => "ready_for_inspection",
            WorkCenter::Unassigned => "unassigned",
        }
    }

    /// Whether this is a parking slot rather than a real station.
    #[inline]
    pub fn is_sentinel(&self) -> bool {
        matches!(self, WorkCenter::Unassigned | WorkCenter::ReadyForInspection)
    }

    /// Work centers that own a production queue.
    pub fn schedulable() -> impl Iterator<Item = WorkCenter> {
        Self::ALL.into_iter().filter(|wc| !wc.is_sentinel())
    }

    /// Resolves a free-form label (spreadsheet header or cell).
    ///
    /// Whitespace is ignored and case is folded, so `"long press"`,
    /// `"LongPress"` and `" LONG  PRESS "` all resolve to
    /// [`WorkCenter::LongPress`]. The snake-case id is accepted too.
    pub fn from_label(label: &str) -> Option<WorkCenter> {
        let key = normalize_key(label);
        if key.is_empty() {
            return None;
        }
        Self::ALL
            .into_iter()
            .find(|wc| normalize_key(wc.label()) == key || wc.id() == key)
    }
}

impl fmt::Display for WorkCenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for WorkCenter {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| CalendarError::UnknownWorkCenter(s.to_string()))
    }
}

/// Strips whitespace and folds case.
fn normalize_key(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}
