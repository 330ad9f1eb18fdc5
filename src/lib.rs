#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod dataset;
pub mod date;
pub mod error;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, PackingOrder, load_config};
pub use dataset::{load_dataset, parse_conferences};
pub use date::{DateToken, day_difference, format_verbose, parse_date_token};
pub use error::{DateError, DatasetError};
pub use ir::{Conference, Cycle, Dataset, EnabledSet, EventDate, Installment};
pub use layout::{LayoutOutcome, TimelineLayout, ViewState, compute_layout};
pub use theme::{ColorScheme, Theme};
