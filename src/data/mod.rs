//! Data layer: canonical model, workbook loading, filtering, aggregation.
//!
//! ```text
//!  Master sheet (.xlsx)
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader  │  fixed offsets → RawCell grid → cleaned records
//!   └──────────┘
//!        │
//!        ▼
//!   ┌────────────────┐
//!   │ CanonicalTable │  records + distinct years / provinces / categories
//!   └────────────────┘
//!        │
//!        ▼
//!   ┌──────────┐     ┌───────────┐
//!   │  filter  │ ──▶ │ aggregate │  KPIs, hierarchy rollup, chart totals
//!   └──────────┘     └───────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  export  │  filtered rows as CSV, aggregates as JSON
//!   └──────────┘
//! ```

pub mod aggregate;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
