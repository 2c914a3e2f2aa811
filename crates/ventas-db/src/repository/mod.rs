//! # Repository Module
//!
//! Database repository implementations for Ventas.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Caller                                                                │
//! │       │  provider.sales().try_fetch_by_id(1)                           │
//! │       ▼                                                                 │
//! │  SaleRepository                                                        │
//! │  ├── try_insert / insert                                               │
//! │  ├── try_fetch_by_id / fetch_by_id                                     │
//! │  ├── try_update / update                                               │
//! │  ├── try_delete_by_id / delete_by_id                                   │
//! │  └── try_list_all / list_all                                           │
//! │       │  one parameterized statement per call                          │
//! │       ▼                                                                 │
//! │  SQLite (Ventas table)                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`SaleRepository`](sale::SaleRepository) - Sale CRUD and listing

pub mod sale;
