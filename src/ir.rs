use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date::DateToken;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDate {
    pub date: DateToken,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cycle {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub dates: Vec<EventDate>,
}

impl Cycle {
    /// Stable sort by calendar date; ties keep their dataset order.
    pub fn sort_dates(&mut self) {
        self.dates.sort_by_key(|event| event.date.date);
    }

    /// Earliest and latest event dates, or `None` for a cycle with no dates.
    pub fn span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.dates.first()?.date.date;
        Some(self.dates.iter().fold((first, first), |(lo, hi), event| {
            (lo.min(event.date.date), hi.max(event.date.date))
        }))
    }

    /// Fewer than two dates can never produce a segment.
    pub fn is_renderable(&self) -> bool {
        self.dates.len() >= 2
    }

    pub fn has_label(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installment {
    pub year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default)]
    pub cycles: Vec<Cycle>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conference {
    pub id: String,
    #[serde(rename = "conference")]
    pub name: String,
    pub full_name: String,
    #[serde(default)]
    pub installments: Vec<Installment>,
}

/// A cycle together with the installment that owns it, in dataset order.
#[derive(Debug, Clone, Copy)]
pub struct CycleRef<'a> {
    pub installment_index: usize,
    pub cycle_index: usize,
    pub installment: &'a Installment,
    pub cycle: &'a Cycle,
}

impl Conference {
    pub fn installment_for_year(&self, year: i32) -> Option<&Installment> {
        self.installments.iter().find(|inst| inst.year == year)
    }

    pub fn cycles(&self) -> impl Iterator<Item = CycleRef<'_>> + '_ {
        self.installments
            .iter()
            .enumerate()
            .flat_map(|(installment_index, installment)| {
                installment
                    .cycles
                    .iter()
                    .enumerate()
                    .map(move |(cycle_index, cycle)| CycleRef {
                        installment_index,
                        cycle_index,
                        installment,
                        cycle,
                    })
            })
    }

    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.cycles()
            .filter_map(|item| item.cycle.span())
            .reduce(|(lo, hi), (a, b)| (lo.min(a), hi.max(b)))
    }

    fn sort_event_dates(&mut self) {
        for installment in &mut self.installments {
            for cycle in &mut installment.cycles {
                cycle.sort_dates();
            }
        }
    }
}

/// Which conferences the host has switched on, by short name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EnabledSet {
    #[default]
    All,
    Only(BTreeSet<String>),
}

impl EnabledSet {
    pub fn only<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Only(names.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, name: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(names) => names.contains(name),
        }
    }
}

/// Immutable snapshot of the loaded conferences. Event dates inside every
/// cycle are sorted chronologically on construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    conferences: Vec<Conference>,
}

impl Dataset {
    pub fn new(mut conferences: Vec<Conference>) -> Self {
        for conference in &mut conferences {
            conference.sort_event_dates();
        }
        Self { conferences }
    }

    pub fn conferences(&self) -> &[Conference] {
        &self.conferences
    }

    pub fn is_empty(&self) -> bool {
        self.conferences.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<&Conference> {
        self.conferences
            .iter()
            .find(|conf| conf.name == name || conf.id == name)
    }

    /// Enabled conferences in dataset order.
    pub fn enabled<'a>(&'a self, enabled: &'a EnabledSet) -> impl Iterator<Item = &'a Conference> + 'a {
        self.conferences
            .iter()
            .filter(move |conf| enabled.contains(&conf.name))
    }
}
