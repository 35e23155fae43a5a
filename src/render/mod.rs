//! View Composition
//!
//! Turns view state and derived view models into text: badges, cards,
//! tables and charts.

pub mod badge;
pub mod chart;
pub mod views;

pub use badge::{bed_badge, recall_badge, severity_badge, stock_badge, Badge, Tone};
pub use chart::{ChartData, ChartRenderer, Series, TextBarChart};
